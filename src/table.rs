use dtct_shared::LicenseStatus;
use serde::Deserialize;

pub const NOTIFY_LABEL: &str = "Notificar";
pub const NOTIFIED_LABEL: &str = "Notificado";

/// `licenses.json` 中的一行
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyLicense {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: LicenseStatus,
}

pub fn parse_licenses(text: &str) -> Result<Vec<LegacyLicense>, serde_json::Error> {
    serde_json::from_str(text)
}

/// “通知”按钮状态
///
/// 纯展示：不发请求也不持久化，只点一次有效。
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyButton {
    id: i64,
    notified: bool,
}

impl NotifyButton {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            notified: false,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.notified {
            NOTIFIED_LABEL
        } else {
            NOTIFY_LABEL
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.notified
    }

    /// 返回要弹出的提示；已通知过则返回 None
    pub fn notify(&mut self) -> Option<String> {
        if self.notified {
            return None;
        }
        self.notified = true;
        Some(format!("Notificação enviada para o ID: {}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_unknown_status() {
        let rows = parse_licenses(
            r#"[{"id":1,"name":"A","status":"ready"},{"id":2,"name":"B","status":"em análise"}]"#,
        )
        .unwrap();

        assert_eq!(rows[0].status, LicenseStatus::Ready);
        assert_eq!(rows[1].status, LicenseStatus::Other("em análise".into()));
        assert_eq!(rows[1].status.as_str(), "em análise");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_licenses(r#"{"id":1}"#).is_err());
    }

    #[test]
    fn test_notify_button_fires_once() {
        let mut button = NotifyButton::new(1);
        assert_eq!(button.label(), "Notificar");
        assert!(!button.is_disabled());

        assert_eq!(
            button.notify().as_deref(),
            Some("Notificação enviada para o ID: 1")
        );
        assert_eq!(button.label(), "Notificado");
        assert!(button.is_disabled());
        assert_eq!(button.notify(), None);
    }
}
