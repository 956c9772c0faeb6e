use dtct_shared::import::import_licenses;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::Panel;
use crate::components::icons::Upload;

pub const IMPORT_FAILED_MESSAGE: &str = "Erro ao importar licenças";

/// 批量导入：粘贴已从文档转换出的纯文本
#[component]
pub fn ImportForm(panel: Panel, on_imported: Callback<()>) -> impl IntoView {
    let open = RwSignal::new(false);
    let text = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        busy.set(true);
        let repo = panel.api().licenses();
        let pasted = text.get_untracked();
        spawn_local(async move {
            match import_licenses(&repo, &pasted).await {
                Ok(report) => {
                    for rejected in &report.rejected {
                        warn!("Linha {} ignorada: {}", rejected.line, rejected.content);
                    }
                    if report.accepted.is_empty() {
                        panel.notify.error(report.summary());
                    } else {
                        panel.notify.success(report.summary());
                        text.set(String::new());
                        on_imported.run(());
                    }
                }
                Err(e) => panel.fail(IMPORT_FAILED_MESSAGE, &e),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="bg-white p-4 rounded-lg shadow">
            <button
                type="button"
                on:click=move |_| open.update(|o| *o = !*o)
                class="flex items-center text-sm font-medium text-gray-700"
            >
                <Upload class="w-5 h-5 mr-2" />
                "Importar Licenças"
            </button>
            <Show when=move || open.get()>
                <form on:submit=on_submit class="mt-4 space-y-3">
                    <p class="text-sm text-gray-500">
                        "Uma licença por linha: nome;matrícula;estado;local (estado e local opcionais)."
                    </p>
                    <textarea
                        rows="6"
                        required
                        on:input=move |ev| text.set(event_target_value(&ev))
                        prop:value=move || text.get()
                        class="block w-full rounded-md border-gray-300 shadow-sm font-mono text-sm"
                    ></textarea>
                    <div class="flex justify-end">
                        <button
                            type="submit"
                            disabled=move || busy.get()
                            class="px-4 py-2 text-sm font-medium text-white bg-red-600 rounded-md hover:bg-red-700"
                        >
                            {move || if busy.get() { "Importando..." } else { "Importar" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
