use dtct_shared::logic::{Mutation, SETTINGS_LABELS};
use dtct_shared::repository::SettingsStore;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::Panel;
use super::form_state::SettingsForm;
use crate::components::icons::Settings;
use crate::settings::use_settings_context;

fn text_field(
    label: &'static str,
    kind: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700">{label}</label>
            <input
                type=kind
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class="mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-red-500 focus:ring-red-500"
            />
        </div>
    }
}

/// 站点设置（单行表）
#[component]
pub fn SettingsSection(panel: Panel) -> impl IntoView {
    let Some(ctx) = use_settings_context() else {
        return ().into_any();
    };
    let form = SettingsForm::new();
    let open = RwSignal::new(false);
    let saving = RwSignal::new(false);

    // 上下文刷新后回填表单
    Effect::new(move |_| ctx.settings.with(|s| form.fill(s)));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        saving.set(true);
        let repo = panel.api().settings();
        let current = ctx.settings.get_untracked();
        let draft = form.to_draft();
        spawn_local(async move {
            let attempted = if current.has_row() {
                Mutation::Updated
            } else {
                Mutation::Created
            };
            match repo.save_settings(&current, &draft).await {
                Ok(saved) => {
                    panel.notify.notify(SETTINGS_LABELS.success(attempted));
                    ctx.replace(saved);
                    open.set(false);
                }
                Err(e) => panel.fail(SETTINGS_LABELS.save_failed, &e),
            }
            saving.set(false);
        });
    };

    view! {
        <section class="space-y-4">
            <div class="flex justify-between items-center">
                <h2 class="text-xl font-semibold">"Configurações do Site"</h2>
                <button
                    on:click=move |_| {
                        ctx.refresh();
                        open.update(|o| *o = !*o);
                    }
                    class="flex items-center px-4 py-2 bg-gray-700 text-white rounded-md hover:bg-gray-800"
                >
                    <Settings class="w-5 h-5 mr-2" />
                    "Configurações"
                </button>
            </div>

            <Show when=move || open.get()>
                <div class="bg-white p-6 rounded-lg shadow">
                    <form on:submit=on_submit class="space-y-4">
                        {text_field("URL do Logo", "url", "https://exemplo.com/logo.png", form.logo_url)}
                        {text_field("Nome do Site", "text", "", form.site_name)}
                        {text_field("Telefone de Contato", "text", "(XX) XXXX-XXXX", form.contact_phone)}
                        {text_field("E-mail de Contato", "email", "contato@dtct.gov", form.contact_email)}
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"Horário de Funcionamento"</label>
                            <textarea
                                rows="3"
                                on:input=move |ev| form.working_hours.set(event_target_value(&ev))
                                prop:value=move || form.working_hours.get()
                                class="mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-red-500 focus:ring-red-500"
                            ></textarea>
                        </div>
                        <div>
                            {text_field("Imagem de Fundo", "url", "https://exemplo.com/fundo.jpg", form.background_image_url)}
                            <p class="mt-1 text-sm text-gray-500">
                                "URL da imagem de fundo do site (deixe em branco para usar o fundo padrão)"
                            </p>
                        </div>
                        <div class="flex justify-end space-x-4">
                            <button
                                type="button"
                                on:click=move |_| open.set(false)
                                class="px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 rounded-md hover:bg-gray-200"
                            >
                                "Cancelar"
                            </button>
                            <button
                                type="submit"
                                disabled=move || saving.get()
                                class="px-4 py-2 text-sm font-medium text-white bg-red-600 rounded-md hover:bg-red-700"
                            >
                                "Salvar"
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
    .into_any()
}
