use std::time::Duration;

use crate::repository::Endpoint;

pub const DEFAULT_API_URL: &str = "http://localhost:54321";
pub const DEFAULT_SESSION_KEY: &str = "dtct.session";
pub const DEFAULT_ROTATION_SECS: u64 = 5;
pub const DEFAULT_NOTIFICATION_SECS: u64 = 3;

pub const VAR_API_URL: &str = "DTCT_API_URL";
pub const VAR_ANON_KEY: &str = "DTCT_ANON_KEY";
pub const VAR_ROTATION_SECS: &str = "DTCT_ROTATION_SECS";
pub const VAR_NOTIFICATION_SECS: &str = "DTCT_NOTIFICATION_SECS";
pub const VAR_SESSION_KEY: &str = "DTCT_SESSION_KEY";

/// 抽象环境变量接口
pub trait EnvAdapter {
    /// 普通变量
    fn var(&self, name: &str) -> Option<String>;
    /// 密钥类变量，默认与普通变量同源
    fn secret(&self, name: &str) -> Option<String> {
        self.var(name)
    }
}

/// 门户运行时配置
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub api_url: String,
    pub anon_key: String,
    pub rotation_interval: Duration,
    pub notification_ttl: Duration,
    pub session_key: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            anon_key: String::new(),
            rotation_interval: Duration::from_secs(DEFAULT_ROTATION_SECS),
            notification_ttl: Duration::from_secs(DEFAULT_NOTIFICATION_SECS),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

impl PortalConfig {
    /// 缺失或无效的值退回默认值
    pub fn from_env<E: EnvAdapter + ?Sized>(env: &E) -> Self {
        let defaults = Self::default();
        Self {
            api_url: non_blank(env.var(VAR_API_URL))
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            anon_key: non_blank(env.secret(VAR_ANON_KEY)).unwrap_or(defaults.anon_key),
            rotation_interval: seconds(env.var(VAR_ROTATION_SECS))
                .unwrap_or(defaults.rotation_interval),
            notification_ttl: seconds(env.var(VAR_NOTIFICATION_SECS))
                .unwrap_or(defaults.notification_ttl),
            session_key: non_blank(env.var(VAR_SESSION_KEY)).unwrap_or(defaults.session_key),
        }
    }

    /// 匿名访问的后端端点
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(&self.api_url, &self.anon_key)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn seconds(value: Option<String>) -> Option<Duration> {
    non_blank(value)?
        .parse::<u64>()
        .ok()
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct MockEnv {
        vars: HashMap<String, String>,
    }

    impl MockEnv {
        pub fn with_var(mut self, name: &str, value: &str) -> Self {
            self.vars.insert(name.to_string(), value.to_string());
            self
        }
    }

    impl EnvAdapter for MockEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }
    }

    #[test]
    fn empty_env_yields_defaults() {
        let cfg = PortalConfig::from_env(&MockEnv::default());
        assert_eq!(cfg, PortalConfig::default());
        assert_eq!(cfg.rotation_interval, Duration::from_secs(5));
        assert_eq!(cfg.notification_ttl, Duration::from_secs(3));
        assert_eq!(cfg.session_key, "dtct.session");
    }

    #[test]
    fn values_are_read_and_normalised() {
        let env = MockEnv::default()
            .with_var(VAR_API_URL, " https://abc.supabase.co/ ")
            .with_var(VAR_ANON_KEY, "anon")
            .with_var(VAR_ROTATION_SECS, "8")
            .with_var(VAR_NOTIFICATION_SECS, "soon");
        let cfg = PortalConfig::from_env(&env);
        assert_eq!(cfg.api_url, "https://abc.supabase.co");
        assert_eq!(cfg.anon_key, "anon");
        assert_eq!(cfg.rotation_interval, Duration::from_secs(8));
        assert_eq!(cfg.notification_ttl, Duration::from_secs(3));

        let endpoint = cfg.endpoint();
        assert_eq!(endpoint.api_url, "https://abc.supabase.co");
        assert_eq!(endpoint.access_token, None);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let env = MockEnv::default().with_var(VAR_ROTATION_SECS, "0");
        assert_eq!(
            PortalConfig::from_env(&env).rotation_interval,
            Duration::from_secs(DEFAULT_ROTATION_SECS)
        );
    }
}
