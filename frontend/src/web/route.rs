//! 路由定义模块
//!
//! 纯粹的路由规则，不依赖 DOM。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 公共查询页
    #[default]
    Home,
    /// 管理员登录
    AdminLogin,
    /// 管理面板（需要认证）
    AdminDashboard,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由；忽略末尾的 `/`
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/index.html" => Self::Home,
            "/admin" => Self::AdminLogin,
            "/admin/dashboard" => Self::AdminDashboard,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::AdminLogin => "/admin",
            Self::AdminDashboard => "/admin/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::AdminDashboard)
    }

    /// 已认证用户是否应离开此路由
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::AdminLogin)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::AdminLogin
    }

    pub fn auth_success_redirect() -> Self {
        Self::AdminDashboard
    }

    /// 公共页面（导航栏显示“Área Administrativa”入口）
    pub fn is_public_home(&self) -> bool {
        matches!(self, Self::Home)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::AdminLogin);
        assert_eq!(AppRoute::from_path("/admin/"), AppRoute::AdminLogin);
        assert_eq!(
            AppRoute::from_path("/admin/dashboard"),
            AppRoute::AdminDashboard
        );
        assert_eq!(AppRoute::from_path("/licencas"), AppRoute::NotFound);
    }

    #[test]
    fn only_the_dashboard_is_guarded() {
        assert!(AppRoute::AdminDashboard.requires_auth());
        assert!(!AppRoute::Home.requires_auth());
        assert!(AppRoute::AdminLogin.should_redirect_when_authenticated());
        assert_eq!(AppRoute::auth_failure_redirect().to_path(), "/admin");
    }

    #[test]
    fn every_route_round_trips_except_not_found() {
        for route in [AppRoute::Home, AppRoute::AdminLogin, AppRoute::AdminDashboard] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }
}
