use dtct_shared::auth::{AuthGateway, Session};
use dtct_shared::config::PortalConfig;
use dtct_shared::repository::{Endpoint, TableRepository};
use dtct_shared::{Advertisement, License, SiteSettings};

use crate::web::WebHttpClient;

pub type Repo<E> = TableRepository<E, WebHttpClient>;

/// 后端访问入口
///
/// 公共页面用匿名 key；登录后带上会话令牌。
#[derive(Clone, Debug, PartialEq)]
pub struct PortalApi {
    endpoint: Endpoint,
}

impl PortalApi {
    pub fn public(config: &PortalConfig) -> Self {
        Self {
            endpoint: config.endpoint(),
        }
    }

    pub fn with_session(config: &PortalConfig, session: Option<&Session>) -> Self {
        Self {
            endpoint: config
                .endpoint()
                .with_token(session.map(|s| s.access_token.clone())),
        }
    }

    pub fn licenses(&self) -> Repo<License> {
        TableRepository::new(WebHttpClient, self.endpoint.clone())
    }

    pub fn advertisements(&self) -> Repo<Advertisement> {
        TableRepository::new(WebHttpClient, self.endpoint.clone())
    }

    pub fn settings(&self) -> Repo<SiteSettings> {
        TableRepository::new(WebHttpClient, self.endpoint.clone())
    }

    pub fn auth(&self) -> AuthGateway<WebHttpClient> {
        AuthGateway::new(WebHttpClient, self.endpoint.clone())
    }
}
