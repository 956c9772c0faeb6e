use std::marker::PhantomData;

use crate::error::{BackendError, BackendResult};
use crate::protocol::Entity;
use crate::repository::Repository;
use crate::{Advertisement, License, Notice, SiteSettings};

/// 某类资源在后台界面上的提示文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLabels {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub save_failed: &'static str,
    pub delete_failed: &'static str,
    pub load_failed: &'static str,
    pub confirm_delete: &'static str,
}

pub const LICENSE_LABELS: ResourceLabels = ResourceLabels {
    created: "Licença adicionada com sucesso",
    updated: "Licença atualizada com sucesso",
    deleted: "Licença excluída com sucesso",
    save_failed: "Erro ao salvar licença",
    delete_failed: "Erro ao excluir licença",
    load_failed: "Erro ao carregar licenças",
    confirm_delete: "Tem certeza que deseja excluir esta licença?",
};

pub const ADVERTISEMENT_LABELS: ResourceLabels = ResourceLabels {
    created: "Anúncio adicionado com sucesso",
    updated: "Anúncio atualizado com sucesso",
    deleted: "Anúncio excluído com sucesso",
    save_failed: "Erro ao salvar anúncio",
    delete_failed: "Erro ao excluir anúncio",
    load_failed: "Erro ao carregar anúncios",
    confirm_delete: "Tem certeza que deseja excluir este anúncio?",
};

pub const SETTINGS_LABELS: ResourceLabels = ResourceLabels {
    created: "Configurações salvas com sucesso",
    updated: "Configurações atualizadas com sucesso",
    deleted: "",
    save_failed: "Erro ao salvar configurações",
    delete_failed: "",
    load_failed: "Erro ao carregar configurações",
    confirm_delete: "",
};

/// 实体对应的界面文本
pub trait Labelled {
    const LABELS: ResourceLabels;
}

impl Labelled for License {
    const LABELS: ResourceLabels = LICENSE_LABELS;
}

impl Labelled for Advertisement {
    const LABELS: ResourceLabels = ADVERTISEMENT_LABELS;
}

impl Labelled for SiteSettings {
    const LABELS: ResourceLabels = SETTINGS_LABELS;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
}

impl ResourceLabels {
    pub fn success(&self, mutation: Mutation) -> Notice {
        Notice::success(match mutation {
            Mutation::Created => self.created,
            Mutation::Updated => self.updated,
            Mutation::Deleted => self.deleted,
        })
    }

    /// 把一次变更的结果转换为提示
    pub fn notice(&self, attempted: Mutation, result: &BackendResult<Mutation>) -> Notice {
        match result {
            Ok(done) => self.success(*done),
            Err(_) if attempted == Mutation::Deleted => Notice::error(self.delete_failed),
            Err(_) => Notice::error(self.save_failed),
        }
    }
}

/// 后台 CRUD 控制器
///
/// 只关注业务规则，不依赖 DOM；界面层负责确认框、提示和刷新列表。
pub struct AdminLogic<'a, E, R: ?Sized> {
    repo: &'a R,
    _entity: PhantomData<E>,
}

impl<'a, E, R> AdminLogic<'a, E, R>
where
    E: Entity + Labelled,
    R: Repository<E> + ?Sized,
{
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    pub fn labels(&self) -> ResourceLabels {
        E::LABELS
    }

    pub async fn list(&self) -> BackendResult<Vec<E>> {
        self.repo
            .list()
            .await
            .map_err(|e| e.in_op_with("admin.list", E::TABLE))
    }

    /// 有 `editing_id` 时覆盖该记录，否则新建
    pub async fn save(&self, editing_id: Option<&str>, draft: &E::Draft) -> BackendResult<Mutation> {
        let result = match editing_id {
            Some(id) => self.repo.update(id, draft).await.map(|_| Mutation::Updated),
            None => self.repo.create(draft).await.map(|_| Mutation::Created),
        };
        result.map_err(|e| e.in_op_with("admin.save", E::TABLE))
    }

    /// 没有删除任何记录视为失败
    pub async fn delete(&self, id: &str) -> BackendResult<Mutation> {
        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(|e| e.in_op_with("admin.delete", E::TABLE))?;
        if !removed {
            return Err(BackendError::api(404, None, format!("no row with id {}", id))
                .in_op_with("admin.delete", E::TABLE));
        }
        Ok(Mutation::Deleted)
    }
}
