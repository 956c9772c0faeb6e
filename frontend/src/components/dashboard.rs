use dtct_shared::BackendError;
use dtct_shared::logic::{Mutation, ResourceLabels};
use leptos::logging::error;
use leptos::prelude::*;

use crate::api::PortalApi;
use crate::auth::{AuthContext, logout, use_auth};
use crate::components::icons::LogOut;
use crate::notify::{NotifyContext, use_notify};

mod advertisements;
mod form_state;
mod import;
mod licenses;
mod settings_form;

use advertisements::AdvertisementsSection;
use licenses::LicensesSection;
use settings_form::SettingsSection;

/// 各管理区块共用的上下文
#[derive(Clone, Copy)]
pub struct Panel {
    pub auth: AuthContext,
    pub notify: NotifyContext,
}

impl Panel {
    pub fn api(&self) -> PortalApi {
        self.auth.api()
    }

    /// 记录并提示一次失败；会话失效时直接注销
    pub fn fail(&self, message: &str, e: &BackendError) {
        error!("{}: {}", message, e);
        self.notify.error(message);
        if e.is_unauthorized() {
            logout(&self.auth);
        }
    }

    /// 提示一次变更的结果，返回是否成功
    pub fn finish(
        &self,
        labels: ResourceLabels,
        attempted: Mutation,
        result: Result<Mutation, BackendError>,
    ) -> bool {
        let notice = labels.notice(attempted, &result);
        match result {
            Ok(_) => {
                self.notify.notify(notice);
                true
            }
            Err(e) => {
                self.fail(&notice.message, &e);
                false
            }
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let Some(auth) = use_auth() else {
        return view! { <p class="p-8">"Sessão indisponível"</p> }.into_any();
    };
    let panel = Panel {
        auth,
        notify: use_notify(),
    };

    let email = move || {
        auth.state.with(|s| {
            if s.is_checking {
                "Verificando sessão...".to_string()
            } else {
                s.email()
            }
        })
    };
    let on_logout = move |_| logout(&auth);

    view! {
        <div class="container mx-auto px-4 py-8 space-y-8">
            <div class="flex flex-wrap justify-between items-center gap-4">
                <div>
                    <h1 class="text-2xl font-bold text-gray-900">"Painel Administrativo"</h1>
                    <p class="text-sm text-gray-500">{email}</p>
                </div>
                <button
                    on:click=on_logout
                    class="flex items-center px-4 py-2 text-sm font-medium text-red-600 bg-red-50 rounded-md hover:bg-red-100"
                >
                    <LogOut class="w-5 h-5 mr-2" />
                    "Sair"
                </button>
            </div>

            <LicensesSection panel=panel />
            <SettingsSection panel=panel />
            <AdvertisementsSection panel=panel />
        </div>
    }
    .into_any()
}
