//! DTCT 门户共享层
//!
//! 前端与遗留页面共用的领域模型和后端访问逻辑，不依赖 DOM，可在本机直接测试。

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod carousel;
pub mod config;
pub mod date;
pub mod error;
pub mod import;
pub mod logic;
pub mod lookup;
pub mod protocol;
pub mod repository;
pub mod request;
pub mod serde_helper;

pub use error::{BackendError, BackendErrorKind, BackendResult};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const TABLE_LICENSES: &str = "licenses";
pub const TABLE_SITE_SETTINGS: &str = "site_settings";
pub const TABLE_ADVERTISEMENTS: &str = "advertisements";

pub const HEADER_API_KEY: &str = "apikey";

pub const DEFAULT_CONTACT_PHONE: &str = "(XX) XXXX-XXXX";
pub const DEFAULT_CONTACT_EMAIL: &str = "contato@dtct.gov";
pub const DEFAULT_WORKING_HOURS: &str = "Segunda a Sexta: 8h às 17h\nSábado: 8h às 12h";
pub const DEFAULT_SITE_NAME: &str = "CONSELHO MUNICIPAL DE NAMPULA";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 执照办理状态
///
/// 后端只约定 `pending` / `ready`，其余取值原样保留，展示时一律视为“处理中”。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LicenseStatus {
    #[default]
    Pending,
    Ready,
    Other(String),
}

impl LicenseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LicenseStatus::Pending => "pending",
            LicenseStatus::Ready => "ready",
            LicenseStatus::Other(s) => s,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LicenseStatus::Ready)
    }

    /// 面向市民的状态文本
    pub fn label(&self) -> &'static str {
        if self.is_ready() {
            "Disponível para Levantar"
        } else {
            "Em Processamento"
        }
    }
}

impl From<String> for LicenseStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => LicenseStatus::Pending,
            "ready" => LicenseStatus::Ready,
            _ => LicenseStatus::Other(s),
        }
    }
}

impl From<LicenseStatus> for String {
    fn from(s: LicenseStatus) -> Self {
        match s {
            LicenseStatus::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LicenseDraft {
    pub full_name: String,
    pub license_plate: String,
    #[serde(default)]
    pub status: LicenseStatus,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub pickup_location: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct License {
    #[serde(deserialize_with = "serde_helper::id_string")]
    pub id: String,
    #[serde(flatten)]
    pub base: LicenseDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SettingsDraft {
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub logo_url: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub site_name: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub contact_phone: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub contact_email: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub working_hours: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub background_image_url: String,
}

impl Default for SettingsDraft {
    fn default() -> Self {
        Self {
            logo_url: String::new(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            contact_phone: DEFAULT_CONTACT_PHONE.to_string(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            working_hours: DEFAULT_WORKING_HOURS.to_string(),
            background_image_url: String::new(),
        }
    }
}

/// 站点设置（单行表）
///
/// `id` 为空表示后端尚无记录，界面使用占位默认值。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SiteSettings {
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub id: String,
    #[serde(flatten)]
    pub base: SettingsDraft,
}

impl SiteSettings {
    pub fn has_row(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn logo_url(&self) -> Option<&str> {
        non_empty(&self.base.logo_url)
    }

    pub fn background_image_url(&self) -> Option<&str> {
        non_empty(&self.base.background_image_url)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AdvertisementDraft {
    pub image_url: String,
    pub title: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Advertisement {
    #[serde(deserialize_with = "serde_helper::id_string")]
    pub id: String,
    #[serde(flatten)]
    pub base: AdvertisementDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// =========================================================
// 通知 (Notices)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// 短暂提示消息（toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_round_trips_unknown_values() {
        let status: LicenseStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, LicenseStatus::Other("archived".into()));
        assert!(!status.is_ready());
        assert_eq!(status.label(), "Em Processamento");
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("archived"));
    }

    #[test]
    fn license_row_decodes_with_null_pickup_location() {
        let row = json!({
            "id": "5d1c",
            "full_name": "Ana Maria",
            "license_plate": "ABC-123-MP",
            "status": "pending",
            "pickup_location": null,
            "updated_at": "2024-03-01T09:30:00+00:00",
            "created_at": "2024-02-01T09:30:00+00:00"
        });
        let license: License = serde_json::from_value(row).unwrap();
        assert_eq!(license.base.status, LicenseStatus::Pending);
        assert_eq!(license.base.pickup_location, "");
        assert_eq!(license.updated_at.as_deref(), Some("2024-03-01T09:30:00+00:00"));
    }

    #[test]
    fn default_settings_use_placeholders() {
        let settings = SiteSettings::default();
        assert!(!settings.has_row());
        assert_eq!(settings.base.contact_phone, DEFAULT_CONTACT_PHONE);
        assert_eq!(settings.base.contact_email, DEFAULT_CONTACT_EMAIL);
        assert_eq!(settings.base.working_hours, DEFAULT_WORKING_HOURS);
        assert!(settings.logo_url().is_none());
    }

    #[test]
    fn settings_row_overrides_every_field() {
        let row = json!({
            "id": "1",
            "logo_url": "https://cdn.example/logo.png",
            "site_name": "DTCT",
            "contact_phone": "+258 26 000 000",
            "contact_email": null,
            "working_hours": "Seg-Sex 8h-15h",
            "background_image_url": "   "
        });
        let settings: SiteSettings = serde_json::from_value(row).unwrap();
        assert!(settings.has_row());
        assert_eq!(settings.logo_url(), Some("https://cdn.example/logo.png"));
        assert_eq!(settings.base.contact_email, "");
        assert!(settings.background_image_url().is_none());
    }
}
