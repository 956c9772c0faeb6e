use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::error::{BackendError, BackendResult, ErrorBody};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 通用 HTTP 请求结构
///
/// 头部保持插入顺序，便于测试断言。
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> BackendResult<T> {
        serde_json::from_str(&self.body).map_err(BackendError::from)
    }

    /// 非 2xx 时转换为 [`BackendError`]
    pub fn error_for_status(self) -> BackendResult<Self> {
        if self.ok() {
            Ok(self)
        } else {
            Err(ErrorBody::into_error(self.status, &self.body))
        }
    }
}

/// HTTP 客户端特性
///
/// (?Send) 是因为浏览器 fetch 返回的 future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> BackendResult<HttpResponse>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for Rc<T> {
    async fn send(&self, req: HttpRequest) -> BackendResult<HttpResponse> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    /// 按 (方法, URL) 返回预设响应，并记录发出的请求
    ///
    /// 同一键预设多条响应时按顺序消费，最后一条会一直复用。
    pub struct MockHttpClient {
        responses: RefCell<HashMap<(HttpMethod, String), VecDeque<(u16, String)>>>,
        pub requests: RefCell<Vec<HttpRequest>>,
        offline: RefCell<bool>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                requests: RefCell::new(Vec::new()),
                offline: RefCell::new(false),
            }
        }

        pub fn mock_response(
            &self,
            method: HttpMethod,
            url: &str,
            status: u16,
            body: serde_json::Value,
        ) {
            self.mock_raw(method, url, status, &body.to_string());
        }

        pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .entry((method, url.to_string()))
                .or_default()
                .push_back((status, body.to_string()));
        }

        /// 之后的所有请求都以网络错误失败
        pub fn go_offline(&self) {
            *self.offline.borrow_mut() = true;
        }

        pub fn last_request(&self) -> HttpRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> BackendResult<HttpResponse> {
            self.requests.borrow_mut().push(req.clone());

            if *self.offline.borrow() {
                return Err(BackendError::network("Failed to fetch"));
            }

            let mut responses = self.responses.borrow_mut();
            let Some(queue) = responses.get_mut(&(req.method, req.url.clone())) else {
                return Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                });
            };
            let (status, body) = if queue.len() > 1 {
                queue.pop_front().unwrap_or_default()
            } else {
                queue.front().cloned().unwrap_or_default()
            };
            Ok(HttpResponse { status, body })
        }
    }

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let client = MockHttpClient::new();
        client.mock_raw(HttpMethod::Get, "http://x/a", 200, "1");
        client.mock_raw(HttpMethod::Get, "http://x/a", 200, "2");

        let first = client.send(HttpRequest::new("http://x/a", HttpMethod::Get)).await;
        let second = client.send(HttpRequest::new("http://x/a", HttpMethod::Get)).await;
        let third = client.send(HttpRequest::new("http://x/a", HttpMethod::Get)).await;

        assert_eq!(first.unwrap().body, "1");
        assert_eq!(second.unwrap().body, "2");
        assert_eq!(third.unwrap().body, "2");
        assert_eq!(client.requests.borrow().len(), 3);
    }

    #[test]
    fn error_for_status_decodes_body() {
        let resp = HttpResponse {
            status: 400,
            body: r#"{"message":"bad filter"}"#.into(),
        };
        let err = resp.error_for_status().unwrap_err();
        assert!(err.to_string().contains("bad filter"));
    }
}
