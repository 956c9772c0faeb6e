use std::marker::PhantomData;

use serde_json::Value;

use crate::error::{BackendError, BackendResult};
use crate::lookup::LookupQuery;
use crate::protocol::{Draft, Entity, PREFER_RETURN, PREFER_UPSERT, TableQuery, widens_like};
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use crate::{HEADER_API_KEY, License, SiteSettings};

// =========================================================
// 仓库接口
// =========================================================

/// 单表仓库：每种实体一套 list/get/create/update/delete
#[async_trait::async_trait(?Send)]
pub trait Repository<E: Entity> {
    /// 全部记录，按实体的排序列倒序
    async fn list(&self) -> BackendResult<Vec<E>>;
    async fn get(&self, id: &str) -> BackendResult<Option<E>>;
    async fn create(&self, draft: &E::Draft) -> BackendResult<E>;
    async fn create_many(&self, drafts: &[E::Draft]) -> BackendResult<Vec<E>>;
    /// 按 id 插入或覆盖
    async fn update(&self, id: &str, draft: &E::Draft) -> BackendResult<E>;
    /// 返回是否真的删除了记录
    async fn delete(&self, id: &str) -> BackendResult<bool>;
}

/// 按姓名 + 车牌查询执照
#[async_trait::async_trait(?Send)]
pub trait LicenseLookup {
    async fn find_license(&self, query: &LookupQuery) -> BackendResult<Option<License>>;
}

/// 站点设置单行表
#[async_trait::async_trait(?Send)]
pub trait SettingsStore {
    /// 没有记录时返回 `None`，多于一行视为错误
    async fn load_settings(&self) -> BackendResult<Option<SiteSettings>>;
    /// 已有记录则覆盖，否则插入
    async fn save_settings(
        &self,
        current: &SiteSettings,
        draft: &crate::SettingsDraft,
    ) -> BackendResult<SiteSettings>;
}

#[async_trait::async_trait(?Send)]
impl<R: Repository<SiteSettings>> SettingsStore for R {
    async fn load_settings(&self) -> BackendResult<Option<SiteSettings>> {
        let rows = self.list().await.map_err(|e| e.in_op("settings.load"))?;
        at_most_one(rows).map_err(|e| e.in_op("settings.load"))
    }

    async fn save_settings(
        &self,
        current: &SiteSettings,
        draft: &crate::SettingsDraft,
    ) -> BackendResult<SiteSettings> {
        let saved = if current.has_row() {
            self.update(&current.id, draft).await
        } else {
            self.create(draft).await
        };
        saved.map_err(|e| e.in_op("settings.save"))
    }
}

/// 0 行 -> None，1 行 -> Some，更多 -> 错误
pub fn at_most_one<E>(mut rows: Vec<E>) -> BackendResult<Option<E>> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        n => Err(crate::BackendErrorKind::TooManyRows(n).into()),
    }
}

// =========================================================
// 表 API 实现
// =========================================================

/// 后端地址与凭据
///
/// 有登录会话时以会话令牌作为 Bearer，否则使用匿名 key。
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub api_url: String,
    pub anon_key: String,
    pub access_token: Option<String>,
}

impl Endpoint {
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    fn bearer(&self) -> String {
        format!(
            "Bearer {}",
            self.access_token.as_deref().unwrap_or(&self.anon_key)
        )
    }

    /// 附加公共请求头
    pub fn authorize(&self, req: HttpRequest) -> HttpRequest {
        req.with_header(HEADER_API_KEY, &self.anon_key)
            .with_header("Authorization", &self.bearer())
            .with_header("Accept", "application/json")
    }
}

pub struct TableRepository<E, C> {
    client: C,
    endpoint: Endpoint,
    _entity: PhantomData<E>,
}

impl<E: Entity, C: HttpClient> TableRepository<E, C> {
    pub fn new(client: C, endpoint: Endpoint) -> Self {
        Self {
            client,
            endpoint,
            _entity: PhantomData,
        }
    }

    // 核心方法：发送请求并解析为行数组
    async fn execute(
        &self,
        method: HttpMethod,
        query: TableQuery,
        prefer: Option<&str>,
        body: Option<String>,
    ) -> BackendResult<Vec<E>> {
        let url = query.url(&self.endpoint.api_url)?;
        let mut req = self.endpoint.authorize(HttpRequest::new(url, method));
        if let Some(prefer) = prefer {
            req = req.with_header("Prefer", prefer);
        }
        if let Some(body) = body {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let resp = self.client.send(req).await?.error_for_status()?;
        if resp.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        resp.json::<Vec<E>>()
    }

    fn base_query() -> TableQuery {
        TableQuery::table(E::TABLE).select_all()
    }

    fn first_row(rows: Vec<E>, op: &str) -> BackendResult<E> {
        rows.into_iter().next().ok_or_else(|| {
            BackendError::serialization("empty representation").in_op_with(op, E::TABLE)
        })
    }
}

#[async_trait::async_trait(?Send)]
impl<E: Entity, C: HttpClient> Repository<E> for TableRepository<E, C> {
    async fn list(&self) -> BackendResult<Vec<E>> {
        let query = match E::ORDER_BY {
            Some(column) => Self::base_query().order_desc(column),
            None => Self::base_query(),
        };
        self.execute(HttpMethod::Get, query, None, None)
            .await
            .map_err(|e| e.in_op_with("table.list", E::TABLE))
    }

    async fn get(&self, id: &str) -> BackendResult<Option<E>> {
        let query = Self::base_query().eq("id", id).limit(2);
        let rows = self
            .execute(HttpMethod::Get, query, None, None)
            .await
            .map_err(|e| e.in_op_with("table.get", E::TABLE))?;
        at_most_one(rows).map_err(|e| e.in_op_with("table.get", E::TABLE))
    }

    async fn create(&self, draft: &E::Draft) -> BackendResult<E> {
        let rows = self.create_many(std::slice::from_ref(draft)).await?;
        Self::first_row(rows, "table.create")
    }

    async fn create_many(&self, drafts: &[E::Draft]) -> BackendResult<Vec<E>> {
        for draft in drafts {
            draft
                .validate()
                .map_err(|e| e.in_op_with("table.create", E::TABLE))?;
        }
        let body = serde_json::to_string(drafts)?;
        self.execute(
            HttpMethod::Post,
            Self::base_query(),
            Some(PREFER_RETURN),
            Some(body),
        )
        .await
        .map_err(|e| e.in_op_with("table.create", E::TABLE))
    }

    async fn update(&self, id: &str, draft: &E::Draft) -> BackendResult<E> {
        draft
            .validate()
            .map_err(|e| e.in_op_with("table.update", E::TABLE))?;
        let mut row = serde_json::to_value(draft)?;
        if let Value::Object(map) = &mut row {
            map.insert("id".to_string(), Value::String(id.to_string()));
        }
        let body = Value::Array(vec![row]).to_string();
        let rows = self
            .execute(
                HttpMethod::Post,
                Self::base_query().on_conflict("id"),
                Some(PREFER_UPSERT),
                Some(body),
            )
            .await
            .map_err(|e| e.in_op_with("table.update", E::TABLE))?;
        Self::first_row(rows, "table.update")
    }

    async fn delete(&self, id: &str) -> BackendResult<bool> {
        let rows = self
            .execute(
                HttpMethod::Delete,
                Self::base_query().eq("id", id),
                Some(PREFER_RETURN),
                None,
            )
            .await
            .map_err(|e| e.in_op_with("table.delete", E::TABLE))?;
        Ok(!rows.is_empty())
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> LicenseLookup for TableRepository<License, C> {
    async fn find_license(&self, query: &LookupQuery) -> BackendResult<Option<License>> {
        let mut q = Self::base_query()
            .ilike_exact("full_name", query.full_name())
            .ilike_exact("license_plate", query.license_plate());
        // 含 `*` 时模式被放宽，命中行可能多于真正的匹配，不能截断
        if !widens_like(query.full_name()) && !widens_like(query.license_plate()) {
            q = q.limit(2);
        }
        let rows: Vec<License> = self
            .execute(HttpMethod::Get, q, None, None)
            .await
            .map_err(|e| e.in_op("licenses.lookup"))?;
        let matches = rows.into_iter().filter(|l| query.matches(l)).collect();
        at_most_one(matches).map_err(|e| e.in_op("licenses.lookup"))
    }
}

// =========================================================
// 内存 Mock 实现
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::request::tests::MockHttpClient;
    use crate::{Advertisement, AdvertisementDraft, LicenseDraft, LicenseStatus, SettingsDraft};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 内存实体存储
    ///
    /// 行以 JSON 保存，模拟后端的序列化边界；创建/更新时自动写入时间戳列。
    pub struct MemoryRepository<E> {
        pub rows: RefCell<Vec<Value>>,
        clock: RefCell<i64>,
        next_id: RefCell<u64>,
        pub fail_next: RefCell<Option<BackendError>>,
        _entity: PhantomData<E>,
    }

    impl<E: Entity> MemoryRepository<E> {
        pub fn new() -> Self {
            Self {
                rows: RefCell::new(Vec::new()),
                clock: RefCell::new(0),
                next_id: RefCell::new(1),
                fail_next: RefCell::new(None),
                _entity: PhantomData,
            }
        }

        /// 下一次调用以给定错误失败
        pub fn fail_with(&self, err: BackendError) {
            *self.fail_next.borrow_mut() = Some(err);
        }

        fn check_failure(&self) -> BackendResult<()> {
            match self.fail_next.borrow_mut().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn tick(&self) -> String {
            let mut clock = self.clock.borrow_mut();
            *clock += 1;
            chrono::DateTime::from_timestamp(1_700_000_000 + *clock, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default()
        }

        fn stamp(&self, row: &mut Value) {
            let now = self.tick();
            if let Value::Object(map) = row {
                map.insert("updated_at".into(), Value::String(now.clone()));
                map.entry("created_at")
                    .or_insert_with(|| Value::String(now));
            }
        }

        fn decode(rows: Vec<Value>) -> BackendResult<Vec<E>> {
            rows.into_iter()
                .map(|v| serde_json::from_value(v).map_err(BackendError::from))
                .collect()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl<E: Entity> Repository<E> for MemoryRepository<E> {
        async fn list(&self) -> BackendResult<Vec<E>> {
            self.check_failure()?;
            let mut rows = self.rows.borrow().clone();
            if let Some(column) = E::ORDER_BY {
                rows.sort_by(|a, b| {
                    let ka = a.get(column).and_then(Value::as_str).unwrap_or_default();
                    let kb = b.get(column).and_then(Value::as_str).unwrap_or_default();
                    kb.cmp(ka)
                });
            }
            Self::decode(rows)
        }

        async fn get(&self, id: &str) -> BackendResult<Option<E>> {
            self.check_failure()?;
            let rows: Vec<Value> = self
                .rows
                .borrow()
                .iter()
                .filter(|r| r.get("id").and_then(Value::as_str) == Some(id))
                .cloned()
                .collect();
            at_most_one(Self::decode(rows)?)
        }

        async fn create(&self, draft: &E::Draft) -> BackendResult<E> {
            let mut created = self.create_many(std::slice::from_ref(draft)).await?;
            created
                .pop()
                .ok_or_else(|| BackendError::serialization("empty representation"))
        }

        async fn create_many(&self, drafts: &[E::Draft]) -> BackendResult<Vec<E>> {
            self.check_failure()?;
            let mut inserted = Vec::new();
            for draft in drafts {
                draft.validate()?;
                let mut row = serde_json::to_value(draft)?;
                let id = {
                    let mut next = self.next_id.borrow_mut();
                    let id = format!("row-{}", *next);
                    *next += 1;
                    id
                };
                if let Value::Object(map) = &mut row {
                    map.insert("id".into(), Value::String(id));
                }
                self.stamp(&mut row);
                inserted.push(row);
            }
            self.rows.borrow_mut().extend(inserted.iter().cloned());
            Self::decode(inserted)
        }

        async fn update(&self, id: &str, draft: &E::Draft) -> BackendResult<E> {
            self.check_failure()?;
            draft.validate()?;
            let mut row = serde_json::to_value(draft)?;
            if let Value::Object(map) = &mut row {
                map.insert("id".into(), Value::String(id.to_string()));
            }
            let mut rows = self.rows.borrow_mut();
            if let Some(existing) = rows
                .iter_mut()
                .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            {
                if let (Value::Object(dst), Value::Object(src)) = (&mut *existing, row) {
                    dst.extend(src);
                }
                self.stamp(existing);
                return Self::decode(vec![existing.clone()])?
                    .pop()
                    .ok_or_else(|| BackendError::serialization("empty representation"));
            }
            self.stamp(&mut row);
            rows.push(row.clone());
            Self::decode(vec![row])?
                .pop()
                .ok_or_else(|| BackendError::serialization("empty representation"))
        }

        async fn delete(&self, id: &str) -> BackendResult<bool> {
            self.check_failure()?;
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
            Ok(rows.len() != before)
        }
    }

    #[async_trait::async_trait(?Send)]
    impl LicenseLookup for MemoryRepository<License> {
        async fn find_license(&self, query: &LookupQuery) -> BackendResult<Option<License>> {
            let matches: Vec<License> = self
                .list()
                .await?
                .into_iter()
                .filter(|l| query.matches(l))
                .collect();
            at_most_one(matches)
        }
    }

    // ----- TableRepository 请求形态 -----

    const API: &str = "https://db.example.co";

    fn endpoint() -> Endpoint {
        Endpoint::new(format!("{}/", API), "anon-key")
    }

    fn ad_row(id: &str, title: &str, created_at: &str) -> Value {
        json!({
            "id": id,
            "image_url": format!("https://img/{}.png", id),
            "title": title,
            "description": "desc",
            "created_at": created_at
        })
    }

    #[tokio::test]
    async fn list_orders_newest_first_and_sends_anon_credentials() {
        let client = Rc::new(MockHttpClient::new());
        let url = format!("{}/rest/v1/advertisements?select=*&order=created_at.desc", API);
        client.mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!([ad_row("2", "Novo", "2024-02-01T00:00:00+00:00")]),
        );
        let repo: TableRepository<Advertisement, _> =
            TableRepository::new(client.clone(), endpoint());

        let ads = repo.list().await.unwrap();
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0].base.title, "Novo");

        let req = client.last_request();
        assert_eq!(req.header("apikey"), Some("anon-key"));
        assert_eq!(req.header("Authorization"), Some("Bearer anon-key"));
    }

    #[tokio::test]
    async fn update_is_an_upsert_keyed_by_id() {
        let client = Rc::new(MockHttpClient::new());
        let url = format!("{}/rest/v1/advertisements?select=*&on_conflict=id", API);
        client.mock_response(
            HttpMethod::Post,
            &url,
            201,
            json!([ad_row("7", "Editado", "2024-02-01T00:00:00+00:00")]),
        );
        let repo: TableRepository<Advertisement, _> = TableRepository::new(
            client.clone(),
            endpoint().with_token(Some("session-jwt".into())),
        );

        let draft = AdvertisementDraft {
            image_url: "https://img/7.png".into(),
            title: "Editado".into(),
            description: "desc".into(),
        };
        let saved = repo.update("7", &draft).await.unwrap();
        assert_eq!(saved.id, "7");

        let req = client.last_request();
        assert_eq!(req.header("Prefer"), Some(PREFER_UPSERT));
        assert_eq!(req.header("Authorization"), Some("Bearer session-jwt"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body[0]["id"], "7");
        assert_eq!(body[0]["title"], "Editado");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let client = Rc::new(MockHttpClient::new());
        let hit = format!("{}/rest/v1/advertisements?select=*&id=eq.1", API);
        let miss = format!("{}/rest/v1/advertisements?select=*&id=eq.9", API);
        client.mock_response(
            HttpMethod::Delete,
            &hit,
            200,
            json!([ad_row("1", "Velho", "2024-01-01T00:00:00+00:00")]),
        );
        client.mock_response(HttpMethod::Delete, &miss, 200, json!([]));
        let repo: TableRepository<Advertisement, _> =
            TableRepository::new(client.clone(), endpoint());

        assert!(repo.delete("1").await.unwrap());
        assert!(!repo.delete("9").await.unwrap());
    }

    fn license_row(id: &str, name: &str, plate: &str) -> Value {
        json!({
            "id": id,
            "full_name": name,
            "license_plate": plate,
            "status": "ready",
            "pickup_location": "Balcão 3",
            "updated_at": "2024-03-01T10:00:00+00:00"
        })
    }

    #[tokio::test]
    async fn lookup_with_star_sends_no_wildcard_and_needs_an_exact_match() {
        let client = Rc::new(MockHttpClient::new());
        let url = format!(
            "{}/rest/v1/licenses?select=*&full_name=ilike.Ana+Maria&license_plate=ilike._",
            API
        );
        // `_` 在后端匹配任意单字符：返回一行车牌为 "X" 的记录
        client.mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!([license_row("1", "Ana Maria", "X")]),
        );
        let repo: TableRepository<License, _> = TableRepository::new(client.clone(), endpoint());

        let query = LookupQuery::new("Ana Maria", "*").unwrap();
        assert_eq!(repo.find_license(&query).await.unwrap(), None);

        let sent = client.last_request().url;
        assert_eq!(sent, url);
        assert!(!sent.contains("ilike.*"));
    }

    #[tokio::test]
    async fn lookup_matches_ignoring_case() {
        let client = Rc::new(MockHttpClient::new());
        let url = format!(
            "{}/rest/v1/licenses?select=*&full_name=ilike.ana+maria&license_plate=ilike.abc-123&limit=2",
            API
        );
        client.mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!([license_row("1", "Ana Maria", "ABC-123")]),
        );
        let repo: TableRepository<License, _> = TableRepository::new(client.clone(), endpoint());

        let query = LookupQuery::new("ana maria", "abc-123").unwrap();
        let found = repo.find_license(&query).await.unwrap().unwrap();
        assert_eq!(found.id, "1");
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_network() {
        let client = Rc::new(MockHttpClient::new());
        let repo: TableRepository<License, _> = TableRepository::new(client.clone(), endpoint());
        let draft = LicenseDraft {
            full_name: String::new(),
            license_plate: "ABC".into(),
            status: LicenseStatus::Pending,
            pickup_location: String::new(),
        };

        let err = repo.create(&draft).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn backend_rejection_carries_the_table_in_its_trace() {
        let client = Rc::new(MockHttpClient::new());
        let url = format!("{}/rest/v1/licenses?select=*&order=updated_at.desc", API);
        client.mock_response(
            HttpMethod::Get,
            &url,
            500,
            json!({ "message": "relation does not exist" }),
        );
        let repo: TableRepository<License, _> = TableRepository::new(client, endpoint());

        let err = repo.list().await.unwrap_err();
        assert!(err.to_string().contains("relation does not exist"));
        assert_eq!(err.spans()[0].operation, "table.list");
        assert_eq!(err.spans()[0].detail.as_deref(), Some("licenses"));
    }

    #[tokio::test]
    async fn settings_singleton_semantics() {
        let client = Rc::new(MockHttpClient::new());
        let url = format!("{}/rest/v1/site_settings?select=*", API);
        client.mock_response(HttpMethod::Get, &url, 200, json!([]));
        let repo: TableRepository<SiteSettings, _> =
            TableRepository::new(client.clone(), endpoint());
        assert_eq!(repo.load_settings().await.unwrap(), None);

        let two = Rc::new(MockHttpClient::new());
        two.mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!([{ "id": 1, "site_name": "A" }, { "id": 2, "site_name": "B" }]),
        );
        let repo: TableRepository<SiteSettings, _> = TableRepository::new(two, endpoint());
        let err = repo.load_settings().await.unwrap_err();
        assert_eq!(err.kind(), &crate::BackendErrorKind::TooManyRows(2));
    }

    #[tokio::test]
    async fn save_settings_inserts_then_overwrites() {
        let repo = MemoryRepository::<SiteSettings>::new();
        let draft = SettingsDraft {
            site_name: "DTCT".into(),
            ..Default::default()
        };

        let first = repo
            .save_settings(&SiteSettings::default(), &draft)
            .await
            .unwrap();
        assert!(first.has_row());

        let changed = SettingsDraft {
            contact_phone: "+258 84 000 0000".into(),
            ..draft
        };
        let second = repo.save_settings(&first, &changed).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(repo.rows.borrow().len(), 1);
        assert_eq!(
            repo.load_settings().await.unwrap().unwrap().base.contact_phone,
            "+258 84 000 0000"
        );
    }
}
