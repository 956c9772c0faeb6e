use serde::{Deserialize, Serialize};

use crate::error::{BackendError, BackendErrorKind, BackendResult};
use crate::repository::Endpoint;
use crate::request::{HttpClient, HttpMethod, HttpRequest};

pub const AUTH_PREFIX: &str = "/auth/v1";
pub const LOGIN_FAILED_MESSAGE: &str = "E-mail ou senha inválidos";

/// 已登录管理员的会话，持久化到浏览器存储
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 认证接口客户端
pub struct AuthGateway<C> {
    client: C,
    endpoint: Endpoint,
}

impl<C: HttpClient> AuthGateway<C> {
    pub fn new(client: C, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.endpoint.api_url, AUTH_PREFIX, path)
    }

    /// 邮箱 + 密码登录
    ///
    /// 凭据错误（400/401）统一为 `Unauthorized`。
    pub async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(BackendError::invalid_input("email and password are required")
                .in_op("auth.sign_in"));
        }

        let body = serde_json::to_string(&PasswordGrant { email, password })?;
        let req = HttpRequest::new(self.url("/token?grant_type=password"), HttpMethod::Post)
            .with_header(crate::HEADER_API_KEY, &self.endpoint.anon_key)
            .with_header("Content-Type", "application/json")
            .with_body(body);

        let resp = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op("auth.sign_in"))?;

        let resp = match resp.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                let rejected = match e.kind() {
                    BackendErrorKind::Api {
                        status: 400,
                        message,
                        ..
                    } => Some(message.clone()),
                    _ => None,
                };
                let e = rejected.map(BackendError::unauthorized).unwrap_or(e);
                return Err(e.in_op("auth.sign_in"));
            }
        };

        let token: TokenResponse = resp.json().map_err(|e| e.in_op("auth.sign_in"))?;
        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            email: token
                .user
                .and_then(|u| u.email)
                .unwrap_or_else(|| email.to_string()),
        })
    }

    /// 校验会话令牌；令牌失效返回 `Ok(None)`
    pub async fn check(&self, session: &Session) -> BackendResult<Option<AuthUser>> {
        let req = self.authorized(HttpRequest::new(self.url("/user"), HttpMethod::Get), session);
        let resp = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op("auth.check"))?;
        match resp.error_for_status() {
            Ok(resp) => resp.json().map(Some).map_err(|e| e.in_op("auth.check")),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e.in_op("auth.check")),
        }
    }

    /// 结束后端会话
    pub async fn sign_out(&self, session: &Session) -> BackendResult<()> {
        let req = self.authorized(HttpRequest::new(self.url("/logout"), HttpMethod::Post), session);
        self.client
            .send(req)
            .await
            .and_then(|resp| resp.error_for_status())
            .map(|_| ())
            .map_err(|e| e.in_op("auth.sign_out"))
    }

    fn authorized(&self, req: HttpRequest, session: &Session) -> HttpRequest {
        self.endpoint
            .clone()
            .with_token(Some(session.access_token.clone()))
            .authorize(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::tests::MockHttpClient;
    use serde_json::json;
    use std::rc::Rc;

    const API: &str = "https://db.example.co";

    fn gateway(client: Rc<MockHttpClient>) -> AuthGateway<Rc<MockHttpClient>> {
        AuthGateway::new(client, Endpoint::new(API, "anon"))
    }

    fn session() -> Session {
        Session {
            access_token: "jwt".into(),
            refresh_token: None,
            email: "admin@dtct.gov".into(),
        }
    }

    #[tokio::test]
    async fn sign_in_returns_session() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_response(
            HttpMethod::Post,
            &format!("{}/auth/v1/token?grant_type=password", API),
            200,
            json!({
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "r1",
                "user": { "id": "u1", "email": "admin@dtct.gov" }
            }),
        );

        let session = gateway(client.clone())
            .sign_in(" admin@dtct.gov ", "secret")
            .await
            .unwrap();
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.email, "admin@dtct.gov");

        let req = client.last_request();
        assert_eq!(req.header("apikey"), Some("anon"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "email": "admin@dtct.gov", "password": "secret" }));
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let client = Rc::new(MockHttpClient::new());
        client.mock_response(
            HttpMethod::Post,
            &format!("{}/auth/v1/token?grant_type=password", API),
            400,
            json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }),
        );

        let err = gateway(client).sign_in("a@b.c", "wrong").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("Invalid login credentials"));
    }

    #[tokio::test]
    async fn empty_credentials_never_hit_the_network() {
        let client = Rc::new(MockHttpClient::new());
        let err = gateway(client.clone()).sign_in("  ", "x").await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn expired_token_fails_the_check() {
        let client = Rc::new(MockHttpClient::new());
        let url = format!("{}/auth/v1/user", API);
        client.mock_response(HttpMethod::Get, &url, 200, json!({ "id": "u1", "email": "admin@dtct.gov" }));
        client.mock_response(HttpMethod::Get, &url, 401, json!({ "msg": "JWT expired" }));
        let gw = gateway(client.clone());

        let user = gw.check(&session()).await.unwrap().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(client.last_request().header("Authorization"), Some("Bearer jwt"));
        assert!(gw.check(&session()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn offline_check_is_an_error_not_a_logout() {
        let client = Rc::new(MockHttpClient::new());
        client.go_offline();
        let err = gateway(client).check(&session()).await.unwrap_err();
        assert!(matches!(err.kind(), BackendErrorKind::Network(_)));
    }
}
