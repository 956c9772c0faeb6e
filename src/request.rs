use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::table::{LegacyLicense, parse_licenses};

/// 遗留页面的错误类型
#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("falha de rede: {0}")]
    Network(String),
    #[error("HTTP {status} ao buscar {url}")]
    Status { status: u16, url: String },
    #[error("JSON inválido: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type LegacyResult<T> = Result<T, LegacyError>;

// =========================================================
// 核心抽象层
// =========================================================

/// 取回静态文件正文
#[async_trait::async_trait(?Send)]
pub trait TextSource {
    async fn fetch_text(&self, url: &str) -> LegacyResult<String>;
}

/// 读取并解析 `licenses.json`
pub async fn load_licenses<S: TextSource + ?Sized>(
    source: &S,
    url: &str,
) -> LegacyResult<Vec<LegacyLicense>> {
    let text = source.fetch_text(url).await?;
    Ok(parse_licenses(&text)?)
}

// =========================================================
// 浏览器 fetch 实现
// =========================================================

pub struct BrowserFetch;

fn js_message(value: wasm_bindgen::JsValue) -> LegacyError {
    LegacyError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[async_trait::async_trait(?Send)]
impl TextSource for BrowserFetch {
    async fn fetch_text(&self, url: &str) -> LegacyResult<String> {
        let window =
            web_sys::window().ok_or_else(|| LegacyError::Network("sem window".to_string()))?;
        let value = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(js_message)?;
        let response: web_sys::Response = value.dyn_into().map_err(js_message)?;
        if !response.ok() {
            return Err(LegacyError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        let text = JsFuture::from(response.text().map_err(js_message)?)
            .await
            .map_err(js_message)?;
        text.as_string()
            .ok_or_else(|| LegacyError::Network("resposta sem texto".to_string()))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    pub struct MockSource {
        pub body: Option<String>,
        pub requested: RefCell<Vec<String>>,
    }

    impl MockSource {
        pub fn serving(body: &str) -> Self {
            Self {
                body: Some(body.to_string()),
                requested: RefCell::new(vec![]),
            }
        }

        pub fn offline() -> Self {
            Self {
                body: None,
                requested: RefCell::new(vec![]),
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl TextSource for MockSource {
        async fn fetch_text(&self, url: &str) -> LegacyResult<String> {
            self.requested.borrow_mut().push(url.to_string());
            self.body
                .clone()
                .ok_or_else(|| LegacyError::Network("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_load_licenses_reads_rows() {
        let source = MockSource::serving(r#"[{"id":1,"name":"A","status":"ready"}]"#);
        let rows = load_licenses(&source, "licenses.json").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "A");
        assert_eq!(*source.requested.borrow(), vec!["licenses.json"]);
    }

    #[tokio::test]
    async fn test_load_licenses_reports_parse_error() {
        let source = MockSource::serving("<html>404</html>");
        let err = load_licenses(&source, "licenses.json").await.unwrap_err();
        assert!(matches!(err, LegacyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_licenses_reports_network_error() {
        let source = MockSource::offline();
        let err = load_licenses(&source, "licenses.json").await.unwrap_err();
        assert!(matches!(err, LegacyError::Network(_)));
    }
}
