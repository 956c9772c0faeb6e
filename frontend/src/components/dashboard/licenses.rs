use dtct_shared::License;
use dtct_shared::date::format_timestamp;
use dtct_shared::logic::{AdminLogic, LICENSE_LABELS, Mutation};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::Panel;
use super::form_state::LicenseForm;
use super::import::ImportForm;
use crate::components::icons::{Edit, Plus, RefreshCw, Trash2};
use crate::web::dialog::{confirm, local_offset_minutes};

#[component]
pub fn LicensesSection(panel: Panel) -> impl IntoView {
    let licenses = RwSignal::new(Vec::<License>::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let form = LicenseForm::new();

    let reload = move || {
        loading.set(true);
        let repo = panel.api().licenses();
        spawn_local(async move {
            match AdminLogic::new(&repo).list().await {
                Ok(list) => licenses.set(list),
                Err(e) => panel.fail(LICENSE_LABELS.load_failed, &e),
            }
            loading.set(false);
        });
    };
    reload();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        saving.set(true);
        let repo = panel.api().licenses();
        let editing = form.editing.id.get_untracked();
        let draft = form.to_draft();
        spawn_local(async move {
            let attempted = if editing.is_some() {
                Mutation::Updated
            } else {
                Mutation::Created
            };
            let result = AdminLogic::new(&repo).save(editing.as_deref(), &draft).await;
            // 失败时表单保持原样，方便重试
            if panel.finish(LICENSE_LABELS, attempted, result) {
                form.reset();
                form.editing.close();
                reload();
            }
            saving.set(false);
        });
    };

    let on_delete = move |id: String| {
        if !confirm(LICENSE_LABELS.confirm_delete) {
            return;
        }
        let repo = panel.api().licenses();
        spawn_local(async move {
            let result = AdminLogic::new(&repo).delete(&id).await;
            panel.finish(LICENSE_LABELS, Mutation::Deleted, result);
            reload();
        });
    };

    let on_new = move |_| {
        form.reset();
        form.editing.start_new();
    };

    let on_cancel = move |_| {
        form.reset();
        form.editing.close();
    };

    let offset = local_offset_minutes();

    view! {
        <section class="space-y-4">
            <div class="flex justify-between items-center">
                <h2 class="text-xl font-semibold">"Gerenciar Licenças"</h2>
                <div class="flex gap-2">
                    <button
                        on:click=move |_| reload()
                        disabled=move || loading.get()
                        class="px-3 py-2 text-gray-600 rounded-md hover:bg-gray-100"
                        title="Recarregar"
                    >
                        <span class=move || if loading.get() { "block animate-spin" } else { "block" }>
                            <RefreshCw class="w-5 h-5" />
                        </span>
                    </button>
                    <button
                        on:click=on_new
                        class="flex items-center px-4 py-2 bg-green-600 text-white rounded-md hover:bg-green-700"
                    >
                        <Plus class="w-5 h-5 mr-2" />
                        "Nova Licença"
                    </button>
                </div>
            </div>

            <Show when=move || form.editing.open.get()>
                <div class="bg-white p-6 rounded-lg shadow">
                    <h3 class="text-lg font-medium mb-4">
                        {move || if form.editing.is_editing() { "Editar Licença" } else { "Nova Licença" }}
                    </h3>
                    <form on:submit=on_submit class="space-y-4">
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <div>
                                <label class="block text-sm font-medium text-gray-700">"Nome Completo"</label>
                                <input
                                    type="text"
                                    required
                                    on:input=move |ev| form.full_name.set(event_target_value(&ev))
                                    prop:value=move || form.full_name.get()
                                    class="mt-1 block w-full rounded-md border-gray-300 shadow-sm"
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-700">"Matrícula"</label>
                                <input
                                    type="text"
                                    required
                                    on:input=move |ev| form.license_plate.set(event_target_value(&ev))
                                    prop:value=move || form.license_plate.get()
                                    class="mt-1 block w-full rounded-md border-gray-300 shadow-sm"
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-700">"Status"</label>
                                <select
                                    class="mt-1 block w-full rounded-md border-gray-300 shadow-sm"
                                    on:change=move |ev| form.ready.set(event_target_value(&ev) == "ready")
                                >
                                    <option value="pending" selected=move || !form.ready.get()>
                                        "Em Processamento"
                                    </option>
                                    <option value="ready" selected=move || form.ready.get()>
                                        "Disponível para Levantar"
                                    </option>
                                </select>
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-700">"Local de Levantamento"</label>
                                <input
                                    type="text"
                                    on:input=move |ev| form.pickup_location.set(event_target_value(&ev))
                                    prop:value=move || form.pickup_location.get()
                                    class="mt-1 block w-full rounded-md border-gray-300 shadow-sm"
                                />
                            </div>
                        </div>
                        <div class="flex justify-end space-x-4">
                            <button
                                type="button"
                                on:click=on_cancel
                                class="px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 rounded-md hover:bg-gray-200"
                            >
                                "Cancelar"
                            </button>
                            <button
                                type="submit"
                                disabled=move || saving.get()
                                class="px-4 py-2 text-sm font-medium text-white bg-red-600 rounded-md hover:bg-red-700"
                            >
                                {move || if form.editing.is_editing() { "Atualizar" } else { "Salvar" }}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>

            <ImportForm panel=panel on_imported=Callback::new(move |_| reload()) />

            <div class="bg-white shadow-md rounded-lg overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Nome"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Matrícula"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Status"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Local"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Atualizado"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Ações"</th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <Show when=move || licenses.with(Vec::is_empty) && !loading.get()>
                            <tr>
                                <td colspan="6" class="text-center py-8 text-gray-400">
                                    "Nenhuma licença cadastrada."
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || licenses.get()
                            key=|l| (l.id.clone(), l.updated_at.clone())
                            children=move |license| {
                                let id = license.id.clone();
                                let edited = license.clone();
                                let status_class = if license.base.status.is_ready() {
                                    "text-green-600 font-semibold"
                                } else {
                                    "text-red-600 font-semibold"
                                };
                                let updated = license
                                    .updated_at
                                    .as_deref()
                                    .map(|raw| format_timestamp(raw, offset))
                                    .unwrap_or_default();
                                view! {
                                    <tr>
                                        <td class="px-6 py-4 whitespace-nowrap">{license.base.full_name}</td>
                                        <td class="px-6 py-4 whitespace-nowrap font-mono">{license.base.license_plate}</td>
                                        <td class="px-6 py-4 whitespace-nowrap">
                                            <span class=status_class>{license.base.status.label()}</span>
                                        </td>
                                        <td class="px-6 py-4">{license.base.pickup_location}</td>
                                        <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{updated}</td>
                                        <td class="px-6 py-4 whitespace-nowrap">
                                            <div class="flex space-x-2">
                                                <button
                                                    on:click=move |_| form.fill(&edited)
                                                    class="text-blue-600 hover:text-blue-900"
                                                    title="Editar"
                                                >
                                                    <Edit class="w-5 h-5" />
                                                </button>
                                                <button
                                                    on:click=move |_| on_delete(id.clone())
                                                    class="text-red-600 hover:text-red-900"
                                                    title="Excluir"
                                                >
                                                    <Trash2 class="w-5 h-5" />
                                                </button>
                                            </div>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </section>
    }
}
