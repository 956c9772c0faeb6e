//! DTCT 门户前端
//!
//! 采用 Context-Driven 架构：
//! - `config` / `settings` / `notify`: 全局上下文
//! - `auth`: 管理员会话
//! - `web::router`: 自带的轻量路由与守卫
//! - `components`: 页面与 UI 组件

mod api;
mod auth;
mod config;
mod notify;
mod settings;
mod components {
    pub mod carousel;
    pub mod dashboard;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod login;
}

use crate::api::PortalApi;
use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::layout::{Footer, Navbar};
use crate::components::login::LoginPage;
use crate::config::provide_config;
use crate::notify::{Toaster, provide_notify};
use crate::settings::provide_settings;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 直接基于 web-sys，不引入 gloo-* 系列 crate，以减小 WASM 体积。
pub(crate) mod web {
    pub mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::WebHttpClient;
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::AdminLogin => view! { <LoginPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-red-600">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置
    let config = provide_config();
    provide_notify(config.notification_ttl);

    // 2. 会话：先从 LocalStorage 恢复，再向后端核验
    let auth_ctx = AuthContext::new(config.clone());
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 3. 站点设置只读，用匿名身份拉取
    provide_settings(PortalApi::public(&config));

    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen flex flex-col bg-gray-100">
                <Navbar />
                <main class="flex-grow">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
            <Toaster />
        </Router>
    }
}
