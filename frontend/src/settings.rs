//! 站点设置上下文
//!
//! 应用启动时拉取一次，管理员保存后手动刷新；导航栏、页脚和首页背景共用。

use dtct_shared::SiteSettings;
use dtct_shared::repository::SettingsStore;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PortalApi;

#[derive(Clone, Copy)]
pub struct SettingsContext {
    pub settings: RwSignal<SiteSettings>,
    api: StoredValue<PortalApi>,
}

impl SettingsContext {
    /// 重新拉取；没有记录时回到默认占位值，失败时保留当前值
    pub fn refresh(&self) {
        let settings = self.settings;
        let repo = self.api.with_value(PortalApi::settings);
        spawn_local(async move {
            match repo.load_settings().await {
                Ok(row) => settings.set(row.unwrap_or_default()),
                Err(e) => error!("Erro ao carregar configurações: {}", e),
            }
        });
    }

    /// 直接写入已保存的记录，省一次请求
    pub fn replace(&self, saved: SiteSettings) {
        self.settings.set(saved);
    }
}

pub fn provide_settings(api: PortalApi) -> SettingsContext {
    let ctx = SettingsContext {
        settings: RwSignal::new(SiteSettings::default()),
        api: StoredValue::new(api),
    };
    provide_context(ctx);
    ctx.refresh();
    ctx
}

pub fn use_settings() -> Signal<SiteSettings> {
    match use_context::<SettingsContext>() {
        Some(ctx) => ctx.settings.into(),
        None => Signal::derive(SiteSettings::default),
    }
}

pub fn use_settings_context() -> Option<SettingsContext> {
    use_context::<SettingsContext>()
}
