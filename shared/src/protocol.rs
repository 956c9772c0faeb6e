//! 表接口协议：实体元数据与 PostgREST 查询串构造

use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::error::{BackendError, BackendResult};
use crate::{
    Advertisement, AdvertisementDraft, License, LicenseDraft, SettingsDraft, SiteSettings,
    TABLE_ADVERTISEMENTS, TABLE_LICENSES, TABLE_SITE_SETTINGS,
};

pub const REST_PREFIX: &str = "/rest/v1";
pub const PREFER_RETURN: &str = "return=representation";
pub const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";

/// 可提交到表接口的表单载荷
pub trait Draft: Serialize + Clone {
    /// 发请求前的必填项校验
    fn validate(&self) -> BackendResult<()> {
        Ok(())
    }
}

/// 对应一张表的行类型
pub trait Entity: DeserializeOwned + Clone {
    type Draft: Draft;
    const TABLE: &'static str;
    /// 倒序列表使用的列
    const ORDER_BY: Option<&'static str>;

    fn id(&self) -> &str;
}

impl Entity for License {
    type Draft = LicenseDraft;
    const TABLE: &'static str = TABLE_LICENSES;
    const ORDER_BY: Option<&'static str> = Some("updated_at");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Advertisement {
    type Draft = AdvertisementDraft;
    const TABLE: &'static str = TABLE_ADVERTISEMENTS;
    const ORDER_BY: Option<&'static str> = Some("created_at");

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for SiteSettings {
    type Draft = SettingsDraft;
    const TABLE: &'static str = TABLE_SITE_SETTINGS;
    const ORDER_BY: Option<&'static str> = None;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Draft for LicenseDraft {
    fn validate(&self) -> BackendResult<()> {
        require("full_name", &self.full_name)?;
        require("license_plate", &self.license_plate)
    }
}

impl Draft for AdvertisementDraft {
    fn validate(&self) -> BackendResult<()> {
        require("image_url", &self.image_url)?;
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

impl Draft for SettingsDraft {}

fn require(field: &str, value: &str) -> BackendResult<()> {
    if value.trim().is_empty() {
        return Err(BackendError::invalid_input(format!("{} is required", field)));
    }
    Ok(())
}

// =========================================================
// 查询构造
// =========================================================

/// 单次表请求的查询参数
///
/// 参数保持插入顺序，生成的 URL 稳定。
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    table: &'static str,
    params: Vec<(String, String)>,
}

impl TableQuery {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            params: Vec::new(),
        }
    }

    pub fn select_all(self) -> Self {
        self.param("select", "*")
    }

    pub fn eq(self, column: &str, value: &str) -> Self {
        self.param(column, &format!("eq.{}", value))
    }

    /// 忽略大小写的精确匹配，`value` 中的通配符全部转义
    pub fn ilike_exact(self, column: &str, value: &str) -> Self {
        self.param(column, &format!("ilike.{}", escape_like(value)))
    }

    pub fn order_desc(self, column: &str) -> Self {
        self.param("order", &format!("{}.desc", column))
    }

    pub fn limit(self, n: usize) -> Self {
        self.param("limit", &n.to_string())
    }

    pub fn on_conflict(self, column: &str) -> Self {
        self.param("on_conflict", column)
    }

    fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// `api_url` 下的完整请求地址
    pub fn url(&self, api_url: &str) -> BackendResult<String> {
        let base = format!(
            "{}{}/{}",
            api_url.trim_end_matches('/'),
            REST_PREFIX,
            self.table
        );
        let mut url = Url::parse(&base).map_err(|e| BackendError::from(e).in_op_with("query.url", base))?;
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url.to_string())
    }
}

/// 转义 LIKE 模式中的 `\`、`%`、`_`
///
/// PostgREST 会把 `*` 改写成 `%`，无法转义，这里换成单字符的 `_`。
/// 因此模式可能比原值宽松，调用方需要再做一次精确比对。
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '*' => out.push('_'),
            _ => out.push(c),
        }
    }
    out
}

/// 模式里是否出现了放宽匹配的字符
pub fn widens_like(value: &str) -> bool {
    value.contains('*')
}
