//! 表单状态管理模块
//!
//! 把零散的 signal 整合为结构体，负责持有、重置、回填和转换为草稿。
//! 使用 `RwSignal` 因为它实现了 `Copy`，适合作为 Props 在组件间传递。

use dtct_shared::{
    Advertisement, AdvertisementDraft, License, LicenseDraft, LicenseStatus, SettingsDraft,
    SiteSettings,
};
use leptos::prelude::*;

/// 新建/编辑的通用部分
#[derive(Clone, Copy)]
pub struct Editing {
    pub open: RwSignal<bool>,
    /// 正在编辑的记录 id；`None` 表示新建
    pub id: RwSignal<Option<String>>,
}

impl Editing {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            id: RwSignal::new(None),
        }
    }

    pub fn start_new(&self) {
        self.id.set(None);
        self.open.set(true);
    }

    pub fn start_edit(&self, id: String) {
        self.id.set(Some(id));
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
        self.id.set(None);
    }

    pub fn is_editing(&self) -> bool {
        self.id.with(Option::is_some)
    }
}

// =========================================================
// 执照表单
// =========================================================

#[derive(Clone, Copy)]
pub struct LicenseForm {
    pub editing: Editing,
    pub full_name: RwSignal<String>,
    pub license_plate: RwSignal<String>,
    pub ready: RwSignal<bool>,
    pub pickup_location: RwSignal<String>,
}

impl LicenseForm {
    pub fn new() -> Self {
        Self {
            editing: Editing::new(),
            full_name: RwSignal::new(String::new()),
            license_plate: RwSignal::new(String::new()),
            ready: RwSignal::new(false),
            pickup_location: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.full_name.set(String::new());
        self.license_plate.set(String::new());
        self.ready.set(false);
        self.pickup_location.set(String::new());
    }

    pub fn fill(&self, license: &License) {
        self.full_name.set(license.base.full_name.clone());
        self.license_plate.set(license.base.license_plate.clone());
        self.ready.set(license.base.status.is_ready());
        self.pickup_location
            .set(license.base.pickup_location.clone());
        self.editing.start_edit(license.id.clone());
    }

    pub fn to_draft(&self) -> LicenseDraft {
        LicenseDraft {
            full_name: self.full_name.get_untracked().trim().to_string(),
            license_plate: self.license_plate.get_untracked().trim().to_string(),
            status: if self.ready.get_untracked() {
                LicenseStatus::Ready
            } else {
                LicenseStatus::Pending
            },
            pickup_location: self.pickup_location.get_untracked().trim().to_string(),
        }
    }
}

// =========================================================
// 广告表单
// =========================================================

#[derive(Clone, Copy)]
pub struct AdvertisementForm {
    pub editing: Editing,
    pub image_url: RwSignal<String>,
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl AdvertisementForm {
    pub fn new() -> Self {
        Self {
            editing: Editing::new(),
            image_url: RwSignal::new(String::new()),
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.image_url.set(String::new());
        self.title.set(String::new());
        self.description.set(String::new());
    }

    pub fn fill(&self, ad: &Advertisement) {
        self.image_url.set(ad.base.image_url.clone());
        self.title.set(ad.base.title.clone());
        self.description.set(ad.base.description.clone());
        self.editing.start_edit(ad.id.clone());
    }

    pub fn to_draft(&self) -> AdvertisementDraft {
        AdvertisementDraft {
            image_url: self.image_url.get_untracked().trim().to_string(),
            title: self.title.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
        }
    }
}

// =========================================================
// 站点设置表单
// =========================================================

#[derive(Clone, Copy)]
pub struct SettingsForm {
    pub logo_url: RwSignal<String>,
    pub site_name: RwSignal<String>,
    pub contact_phone: RwSignal<String>,
    pub contact_email: RwSignal<String>,
    pub working_hours: RwSignal<String>,
    pub background_image_url: RwSignal<String>,
}

impl SettingsForm {
    pub fn new() -> Self {
        Self {
            logo_url: RwSignal::new(String::new()),
            site_name: RwSignal::new(String::new()),
            contact_phone: RwSignal::new(String::new()),
            contact_email: RwSignal::new(String::new()),
            working_hours: RwSignal::new(String::new()),
            background_image_url: RwSignal::new(String::new()),
        }
    }

    pub fn fill(&self, settings: &SiteSettings) {
        let base = &settings.base;
        self.logo_url.set(base.logo_url.clone());
        self.site_name.set(base.site_name.clone());
        self.contact_phone.set(base.contact_phone.clone());
        self.contact_email.set(base.contact_email.clone());
        self.working_hours.set(base.working_hours.clone());
        self.background_image_url
            .set(base.background_image_url.clone());
    }

    pub fn to_draft(&self) -> SettingsDraft {
        SettingsDraft {
            logo_url: self.logo_url.get_untracked().trim().to_string(),
            site_name: self.site_name.get_untracked().trim().to_string(),
            contact_phone: self.contact_phone.get_untracked().trim().to_string(),
            contact_email: self.contact_email.get_untracked().trim().to_string(),
            working_hours: self.working_hours.get_untracked(),
            background_image_url: self.background_image_url.get_untracked().trim().to_string(),
        }
    }
}
