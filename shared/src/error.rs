use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =========================================================
// 错误类别
// =========================================================

/// 后端调用失败的类别
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendErrorKind {
    /// 请求未能到达后端（断网、CORS、DNS 等）
    #[error("network error: {0}")]
    Network(String),

    /// 401/403，或登录凭据无效
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 后端返回了非 2xx 状态
    #[error("backend rejected request with status {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// 响应体无法解析
    #[error("malformed payload: {0}")]
    Serialization(String),

    /// 期望至多一行，结果却有多行
    #[error("expected at most one row, got {0}")]
    TooManyRows(usize),

    /// 表单校验失败（必填字段为空等）
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 配置错误（如后端地址无法解析）
    #[error("invalid configuration: {0}")]
    Config(String),
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "licenses.lookup"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// 后端访问错误
///
/// 除类别外还携带一串操作追踪，日志里能看出失败发生在哪一步。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", render_spans(.spans))]
pub struct BackendError {
    kind: BackendErrorKind,
    spans: Vec<ErrorSpan>,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind) -> Self {
        Self {
            kind,
            spans: Vec::new(),
        }
    }

    // --- 便捷构造 ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Network(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Unauthorized(message.into()))
    }

    pub fn api(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Api {
            status,
            code,
            message: message.into(),
        })
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Serialization(message.into()))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::InvalidInput(message.into()))
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Config(message.into()))
    }

    // --- 上下文 ---

    /// 添加操作追踪
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan {
            operation: operation.into(),
            detail: None,
        });
        self
    }

    /// 添加带细节的操作追踪
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan {
            operation: operation.into(),
            detail: Some(detail.into()),
        });
        self
    }

    // --- 访问器 ---

    pub fn kind(&self) -> &BackendErrorKind {
        &self.kind
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind, BackendErrorKind::Unauthorized(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind, BackendErrorKind::InvalidInput(_))
    }
}

impl From<BackendErrorKind> for BackendError {
    fn from(kind: BackendErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::serialization(e.to_string())
    }
}

impl From<url::ParseError> for BackendError {
    fn from(e: url::ParseError) -> Self {
        BackendError::config(e.to_string())
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

fn render_spans(spans: &[ErrorSpan]) -> String {
    if spans.is_empty() {
        return String::new();
    }
    let mut out = String::from(" | trace: ");
    for (i, span) in spans.iter().enumerate() {
        if i > 0 {
            out.push_str(" -> ");
        }
        out.push_str(&span.operation);
        if let Some(detail) = &span.detail {
            let _ = write!(out, "({})", detail);
        }
    }
    out
}

// =========================================================
// 传输用错误体
// =========================================================

/// 表 API 的错误响应体
///
/// 字段都可能缺失；认证接口使用 `error_description` / `msg`。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ErrorBody {
    /// 从非 2xx 响应构造错误；响应体无法解析时退回原始文本
    pub fn into_error(status: u16, body: &str) -> BackendError {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .clone()
            .or(parsed.error_description.clone())
            .or(parsed.msg.clone())
            .unwrap_or_else(|| body.trim().to_string());
        let message = match &parsed.details {
            Some(details) if !details.is_empty() => format!("{} ({})", message, details),
            _ => message,
        };

        if status == 401 || status == 403 {
            return BackendError::unauthorized(message);
        }

        let code = parsed.code.map(|c| match c {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        BackendError::api(status, code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_trace() {
        let err = BackendError::network("connection reset")
            .in_op_with("table.list", "advertisements")
            .in_op("dashboard.reload");
        assert_eq!(
            err.to_string(),
            "network error: connection reset | trace: table.list(advertisements) -> dashboard.reload"
        );
    }

    #[test]
    fn postgrest_body_is_decoded() {
        let body = r#"{"code":"23505","message":"duplicate key value","details":"Key (id)=(1) already exists.","hint":null}"#;
        let err = ErrorBody::into_error(409, body);
        match err.kind() {
            BackendErrorKind::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(*status, 409);
                assert_eq!(code.as_deref(), Some("23505"));
                assert!(message.starts_with("duplicate key value"));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        let err = ErrorBody::into_error(401, r#"{"message":"JWT expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "unauthorized: JWT expired");
    }

    #[test]
    fn plain_text_body_is_kept() {
        let err = ErrorBody::into_error(502, "Bad Gateway\n");
        assert_eq!(
            err.kind(),
            &BackendErrorKind::Api {
                status: 502,
                code: None,
                message: "Bad Gateway".into()
            }
        );
    }
}
