//! 认证模块
//!
//! 管理管理员会话，与路由系统解耦：
//! 路由服务只读取注入的 `is_authenticated` 信号。

use dtct_shared::auth::{LOGIN_FAILED_MESSAGE, Session};
use dtct_shared::config::PortalConfig;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PortalApi;
use crate::web::LocalStorage;

pub const LOGIN_ERROR_MESSAGE: &str = "Erro ao conectar ao servidor";

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// 当前会话（登录成功或从存储恢复）
    pub session: Option<Session>,
    /// 正在向后端校验恢复的会话
    pub is_checking: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// 核验结果回来时，会话可能已被新的登录替换
    pub fn holds_token(&self, token: &str) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.access_token == token)
    }

    pub fn email(&self) -> String {
        self.session
            .as_ref()
            .map(|s| s.email.clone())
            .unwrap_or_default()
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    config: StoredValue<PortalConfig>,
}

impl AuthContext {
    pub fn new(config: PortalConfig) -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            config: StoredValue::new(config),
        }
    }

    /// 用于路由守卫
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::is_authenticated))
    }

    /// 带当前会话令牌的 API
    pub fn api(&self) -> PortalApi {
        let config = self.config.get_value();
        self.state
            .with_untracked(|s| PortalApi::with_session(&config, s.session.as_ref()))
    }

    fn session_key(&self) -> String {
        self.config.with_value(|c| c.session_key.clone())
    }

    fn store(&self, session: Option<Session>) {
        let key = self.session_key();
        match &session {
            Some(s) => {
                LocalStorage::set_json(&key, s);
            }
            None => {
                LocalStorage::delete(&key);
            }
        }
        self.state.update(|state| state.session = session);
    }
}

pub fn use_auth() -> Option<AuthContext> {
    use_context::<AuthContext>()
}

/// 恢复上次保存的会话并向后端校验
///
/// 校验期间暂时视为已登录；令牌失效时清除。
pub fn init_auth(ctx: &AuthContext) {
    let Some(session) = LocalStorage::get_json::<Session>(&ctx.session_key()) else {
        return;
    };

    ctx.state.set(AuthState {
        session: Some(session.clone()),
        is_checking: true,
    });

    let ctx = *ctx;
    spawn_local(async move {
        match ctx.api().auth().check(&session).await {
            Ok(Some(_)) => log!("[Auth] Stored session restored for {}", session.email),
            Ok(None) => {
                if ctx.state.with_untracked(|s| s.holds_token(&session.access_token)) {
                    warn!("[Auth] Stored session expired");
                    ctx.store(None);
                } else {
                    log!("[Auth] Expired session already replaced");
                }
            }
            // 网络问题不等于令牌失效，保留会话
            Err(e) => error!("[Auth] Session check failed: {}", e),
        }
        ctx.state.update(|s| s.is_checking = false);
    });
}

/// 登录；失败时返回面向用户的错误文本
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), String> {
    match ctx.api().auth().sign_in(&email, &password).await {
        Ok(session) => {
            log!("[Auth] Signed in as {}", session.email);
            ctx.store(Some(session));
            Ok(())
        }
        Err(e) if e.is_unauthorized() || e.is_invalid_input() => {
            warn!("[Auth] Sign-in rejected: {}", e);
            Err(LOGIN_FAILED_MESSAGE.to_string())
        }
        Err(e) => {
            error!("[Auth] Sign-in failed: {}", e);
            Err(LOGIN_ERROR_MESSAGE.to_string())
        }
    }
}

/// 注销：后端失败只记录日志，本地会话总是清除
///
/// 导航由路由服务监听认证状态自动完成。
pub fn logout(ctx: &AuthContext) {
    let session = ctx.state.with_untracked(|s| s.session.clone());
    let api = ctx.api();
    ctx.store(None);

    if let Some(session) = session {
        spawn_local(async move {
            if let Err(e) = api.auth().sign_out(&session).await {
                warn!("[Auth] Sign-out failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: None,
            email: "admin@dtct.gov".to_string(),
        }
    }

    #[test]
    fn expired_check_only_matches_the_checked_token() {
        let restored = AuthState {
            session: Some(session("old-jwt")),
            is_checking: true,
        };
        assert!(restored.holds_token("old-jwt"));

        // 核验期间重新登录
        let relogged = AuthState {
            session: Some(session("new-jwt")),
            is_checking: true,
        };
        assert!(!relogged.holds_token("old-jwt"));
        assert!(relogged.is_authenticated());

        assert!(!AuthState::default().holds_token("old-jwt"));
    }
}
