//! 编译期注入的门户配置
//!
//! 构建时通过环境变量（`DTCT_API_URL`、`DTCT_ANON_KEY` 等）写入，
//! 未设置的项使用共享层的默认值。

use dtct_shared::config::{
    EnvAdapter, PortalConfig, VAR_ANON_KEY, VAR_API_URL, VAR_NOTIFICATION_SECS,
    VAR_ROTATION_SECS, VAR_SESSION_KEY,
};
use leptos::prelude::*;

/// 构建环境的 EnvAdapter 实现
pub struct BuildEnv;

impl EnvAdapter for BuildEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = match name {
            VAR_API_URL => option_env!("DTCT_API_URL"),
            VAR_ROTATION_SECS => option_env!("DTCT_ROTATION_SECS"),
            VAR_NOTIFICATION_SECS => option_env!("DTCT_NOTIFICATION_SECS"),
            VAR_SESSION_KEY => option_env!("DTCT_SESSION_KEY"),
            _ => None,
        };
        value.map(str::to_string)
    }

    fn secret(&self, name: &str) -> Option<String> {
        match name {
            VAR_ANON_KEY => option_env!("DTCT_ANON_KEY").map(str::to_string),
            _ => self.var(name),
        }
    }
}

pub fn provide_config() -> PortalConfig {
    let config = PortalConfig::from_env(&BuildEnv);
    if config.anon_key.is_empty() {
        leptos::logging::warn!("DTCT_ANON_KEY não definido; o backend rejeitará as requisições");
    }
    provide_context(config.clone());
    config
}

pub fn use_config() -> PortalConfig {
    use_context::<PortalConfig>().unwrap_or_default()
}
