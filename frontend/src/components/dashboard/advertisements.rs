use dtct_shared::Advertisement;
use dtct_shared::logic::{ADVERTISEMENT_LABELS, AdminLogic, Mutation};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::Panel;
use super::form_state::AdvertisementForm;
use crate::components::icons::{Edit, Image, Plus, Trash2};
use crate::web::dialog::confirm;

#[component]
pub fn AdvertisementsSection(panel: Panel) -> impl IntoView {
    let ads = RwSignal::new(Vec::<Advertisement>::new());
    let saving = RwSignal::new(false);
    let form = AdvertisementForm::new();

    let reload = move || {
        let repo = panel.api().advertisements();
        spawn_local(async move {
            match AdminLogic::new(&repo).list().await {
                Ok(list) => ads.set(list),
                Err(e) => panel.fail(ADVERTISEMENT_LABELS.load_failed, &e),
            }
        });
    };
    reload();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        saving.set(true);
        let repo = panel.api().advertisements();
        let editing = form.editing.id.get_untracked();
        let draft = form.to_draft();
        spawn_local(async move {
            let attempted = if editing.is_some() {
                Mutation::Updated
            } else {
                Mutation::Created
            };
            let result = AdminLogic::new(&repo).save(editing.as_deref(), &draft).await;
            if panel.finish(ADVERTISEMENT_LABELS, attempted, result) {
                form.reset();
                form.editing.close();
                reload();
            }
            saving.set(false);
        });
    };

    let on_delete = move |id: String| {
        if !confirm(ADVERTISEMENT_LABELS.confirm_delete) {
            return;
        }
        let repo = panel.api().advertisements();
        spawn_local(async move {
            let result = AdminLogic::new(&repo).delete(&id).await;
            panel.finish(ADVERTISEMENT_LABELS, Mutation::Deleted, result);
            reload();
        });
    };

    view! {
        <section class="space-y-4">
            <div class="flex justify-between items-center">
                <h2 class="text-xl font-semibold flex items-center">
                    <Image class="w-5 h-5 mr-2" />
                    "Gerenciar Anúncios"
                </h2>
                <button
                    on:click=move |_| {
                        form.reset();
                        form.editing.start_new();
                    }
                    class="flex items-center px-4 py-2 bg-green-600 text-white rounded-md hover:bg-green-700"
                >
                    <Plus class="w-5 h-5 mr-2" />
                    "Novo Anúncio"
                </button>
            </div>

            <Show when=move || form.editing.open.get()>
                <div class="bg-white p-6 rounded-lg shadow">
                    <h3 class="text-lg font-medium mb-4">
                        {move || if form.editing.is_editing() { "Editar Anúncio" } else { "Novo Anúncio" }}
                    </h3>
                    <form on:submit=on_submit class="space-y-4">
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"URL da Imagem"</label>
                            <input
                                type="url"
                                required
                                on:input=move |ev| form.image_url.set(event_target_value(&ev))
                                prop:value=move || form.image_url.get()
                                class="mt-1 block w-full rounded-md border-gray-300 shadow-sm"
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"Título"</label>
                            <input
                                type="text"
                                required
                                on:input=move |ev| form.title.set(event_target_value(&ev))
                                prop:value=move || form.title.get()
                                class="mt-1 block w-full rounded-md border-gray-300 shadow-sm"
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"Descrição"</label>
                            <textarea
                                rows="3"
                                required
                                on:input=move |ev| form.description.set(event_target_value(&ev))
                                prop:value=move || form.description.get()
                                class="mt-1 block w-full rounded-md border-gray-300 shadow-sm"
                            ></textarea>
                        </div>
                        <div class="flex justify-end space-x-4">
                            <button
                                type="button"
                                on:click=move |_| form.editing.close()
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

            <div class="bg-white shadow-md rounded-lg overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Imagem"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Título"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Descrição"</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Ações"</th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || ads.get()
                            key=|ad| ad.id.clone()
                            children=move |ad| {
                                let id = ad.id.clone();
                                let edited = ad.clone();
                                view! {
                                    <tr>
                                        <td class="px-6 py-4 whitespace-nowrap">
                                            <img src=ad.base.image_url alt=ad.base.title.clone() class="h-12 w-20 object-cover rounded" />
                                        </td>
                                        <td class="px-6 py-4 whitespace-nowrap">{ad.base.title}</td>
                                        <td class="px-6 py-4">{ad.base.description}</td>
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
