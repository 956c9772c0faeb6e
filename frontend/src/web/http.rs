//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享层的 [`HttpClient`]，仓库与认证网关都经由它访问后端。

use dtct_shared::BackendError;
use dtct_shared::error::BackendResult;
use dtct_shared::request::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

fn js_error(stage: &str, e: JsValue) -> BackendError {
    BackendError::network(format!("{}: {:?}", stage, e))
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHttpClient;

impl WebHttpClient {
    fn build(req: &HttpRequest) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        for (key, value) in &req.headers {
            headers.set(key, value)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for WebHttpClient {
    async fn send(&self, req: HttpRequest) -> BackendResult<HttpResponse> {
        let request = Self::build(&req).map_err(|e| js_error("build request", e))?;

        let window =
            web_sys::window().ok_or_else(|| BackendError::network("window is unavailable"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch", e))?;
        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("response cast", e))?;

        let status = response.status();
        let promise = response.text().map_err(|e| js_error("read body", e))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("read body", e))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
