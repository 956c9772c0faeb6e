use crate::date::format_timestamp;
use crate::error::{BackendError, BackendResult};
use crate::repository::LicenseLookup;
use crate::{License, Notice};

pub const NOT_FOUND_MESSAGE: &str = "Nenhuma licença encontrada com os dados fornecidos";
pub const LOOKUP_FAILED_MESSAGE: &str = "Erro ao verificar licença";
pub const MISSING_FIELDS_MESSAGE: &str = "Preencha o nome completo e a matrícula";

/// 已校验的查询条件（去除首尾空白，均非空）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    full_name: String,
    license_plate: String,
}

impl LookupQuery {
    pub fn new(full_name: &str, license_plate: &str) -> BackendResult<Self> {
        let full_name = full_name.trim();
        let license_plate = license_plate.trim();
        if full_name.is_empty() || license_plate.is_empty() {
            return Err(BackendError::invalid_input("full name and plate are required")
                .in_op("licenses.lookup"));
        }
        Ok(Self {
            full_name: full_name.to_string(),
            license_plate: license_plate.to_string(),
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// 姓名和车牌都忽略大小写完全相等
    pub fn matches(&self, license: &License) -> bool {
        same_text(&license.base.full_name, &self.full_name)
            && same_text(&license.base.license_plate, &self.license_plate)
    }
}

fn same_text(stored: &str, typed: &str) -> bool {
    stored.trim().to_lowercase() == typed.to_lowercase()
}

/// 结果面板展示用视图
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseView {
    pub full_name: String,
    pub license_plate: String,
    pub status_label: &'static str,
    pub ready: bool,
    /// 仅在可领取时给出
    pub pickup_location: Option<String>,
    pub updated_at: Option<String>,
}

impl LicenseView {
    pub fn from_license(license: &License, offset_minutes: i32) -> Self {
        let status = &license.base.status;
        let pickup_location = Some(license.base.pickup_location.trim())
            .filter(|loc| status.is_ready() && !loc.is_empty())
            .map(str::to_string);
        Self {
            full_name: license.base.full_name.clone(),
            license_plate: license.base.license_plate.clone(),
            status_label: status.label(),
            ready: status.is_ready(),
            pickup_location,
            updated_at: license
                .updated_at
                .as_deref()
                .map(|raw| format_timestamp(raw, offset_minutes)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(LicenseView),
    NotFound,
    Failed(BackendError),
}

/// 执行一次查询
pub async fn lookup_license<L: LicenseLookup + ?Sized>(
    store: &L,
    full_name: &str,
    license_plate: &str,
    offset_minutes: i32,
) -> LookupOutcome {
    let query = match LookupQuery::new(full_name, license_plate) {
        Ok(q) => q,
        Err(e) => return LookupOutcome::Failed(e),
    };
    match store.find_license(&query).await {
        Ok(Some(license)) => {
            LookupOutcome::Found(LicenseView::from_license(&license, offset_minutes))
        }
        Ok(None) => LookupOutcome::NotFound,
        Err(e) => LookupOutcome::Failed(e),
    }
}

/// 查询区域的状态：结果 + 提示
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LookupPanel {
    pub result: Option<LicenseView>,
    pub notice: Option<Notice>,
}

impl LookupPanel {
    /// 合并一次查询结果，返回需要弹出的提示
    ///
    /// 失败时保留上一次的结果，只替换提示。
    pub fn apply(&mut self, outcome: LookupOutcome) -> Option<Notice> {
        match outcome {
            LookupOutcome::Found(view) => {
                self.result = Some(view);
                self.notice = None;
            }
            LookupOutcome::NotFound => {
                self.result = None;
                self.notice = Some(Notice::error(NOT_FOUND_MESSAGE));
            }
            LookupOutcome::Failed(e) if e.is_invalid_input() => {
                self.notice = Some(Notice::error(MISSING_FIELDS_MESSAGE));
            }
            LookupOutcome::Failed(_) => {
                self.notice = Some(Notice::error(LOOKUP_FAILED_MESSAGE));
            }
        }
        self.notice.clone()
    }
}
