use dtct_shared::lookup::{LicenseView, LookupOutcome, LookupPanel, lookup_license};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PortalApi;
use crate::components::carousel::AdCarousel;
use crate::components::icons::{Search, Truck};
use crate::config::use_config;
use crate::notify::use_notify;
use crate::settings::use_settings;
use crate::web::dialog::local_offset_minutes;

fn background_style(url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            "background-image: linear-gradient(rgba(255, 255, 255, 0.9), rgba(255, 255, 255, 0.9)), url({}); \
             background-size: cover; background-position: center; background-attachment: fixed;",
            url
        ),
        None => String::new(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let config = use_config();
    let notify = use_notify();
    let settings = use_settings();

    let full_name = RwSignal::new(String::new());
    let license_plate = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let panel = RwSignal::new(LookupPanel::default());

    let api = StoredValue::new(PortalApi::public(&config));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        loading.set(true);

        let repo = api.with_value(PortalApi::licenses);
        let name = full_name.get_untracked();
        let plate = license_plate.get_untracked();
        spawn_local(async move {
            let outcome = lookup_license(&repo, &name, &plate, local_offset_minutes()).await;
            if let LookupOutcome::Failed(e) = &outcome {
                error!("Erro ao verificar licença: {}", e);
            }

            // 页面可能已经卸载，信号只能用 try_* 访问
            if let Some(notice) = panel.try_update(|p| p.apply(outcome)).flatten() {
                notify.notify(notice);
            }
            loading.try_set(false);
        });
    };

    let style = move || settings.with(|s| background_style(s.background_image_url()));

    view! {
        <div class="min-h-screen" style=style>
            <div class="container mx-auto px-4 py-12">
                <div class="max-w-3xl mx-auto">
                    <div class="text-center mb-12">
                        <div class="flex justify-center mb-4">
                            <Truck class="h-16 w-16 text-red-600" />
                        </div>
                        <h1 class="text-4xl font-bold text-gray-900 mb-4">"Consulta de Licença"</h1>
                        <p class="text-lg text-red-600">"Verifique o estado da sua licença de transporte"</p>
                    </div>

                    <AdCarousel />

                    <div class="bg-white rounded-lg shadow-lg p-8 border-t-4 border-red-600">
                        <form on:submit=on_submit class="space-y-6">
                            <div>
                                <label for="fullName" class="block text-sm font-medium text-gray-700">
                                    "Nome Completo"
                                </label>
                                <input
                                    id="fullName"
                                    type="text"
                                    required
                                    on:input=move |ev| full_name.set(event_target_value(&ev))
                                    prop:value=move || full_name.get()
                                    class="mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-red-500 focus:ring-red-500"
                                />
                            </div>
                            <div>
                                <label for="licensePlate" class="block text-sm font-medium text-gray-700">
                                    "Matrícula do Veículo"
                                </label>
                                <input
                                    id="licensePlate"
                                    type="text"
                                    required
                                    on:input=move |ev| license_plate.set(event_target_value(&ev))
                                    prop:value=move || license_plate.get()
                                    class="mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-red-500 focus:ring-red-500"
                                />
                            </div>
                            <button
                                type="submit"
                                disabled=move || loading.get()
                                class="w-full flex justify-center items-center py-3 px-4 rounded-md shadow-sm text-sm font-medium text-white bg-red-600 hover:bg-red-700 disabled:opacity-50 disabled:cursor-not-allowed"
                            >
                                {move || if loading.get() {
                                    "Verificando...".into_any()
                                } else {
                                    view! { <Search class="w-5 h-5 mr-2" /> "Verificar Licença" }.into_any()
                                }}
                            </button>
                        </form>

                        {move || panel.with(|p| p.result.clone()).map(|license| view! { <LookupResult license=license /> })}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn LookupResult(license: LicenseView) -> impl IntoView {
    let status_class = if license.ready {
        "text-green-600 font-semibold"
    } else {
        "text-red-600 font-semibold"
    };

    view! {
        <div class="mt-8 p-6 bg-gray-50 rounded-lg border-l-4 border-red-600">
            <h3 class="text-lg font-medium text-gray-900 mb-4">"Resultado da Consulta"</h3>
            <div class="space-y-3">
                <p class="text-sm text-gray-600">
                    <span class="font-medium">"Nome: "</span>
                    {license.full_name}
                </p>
                <p class="text-sm text-gray-600">
                    <span class="font-medium">"Matrícula: "</span>
                    {license.license_plate}
                </p>
                <p class="text-sm text-gray-600">
                    <span class="font-medium">"Status: "</span>
                    <span class=status_class>{license.status_label}</span>
                </p>
                {license.pickup_location.map(|location| view! {
                    <p class="text-sm text-gray-600">
                        <span class="font-medium">"Local de Levantamento: "</span>
                        {location}
                    </p>
                })}
                {license.updated_at.map(|updated| view! {
                    <p class="text-sm text-gray-600">
                        <span class="font-medium">"Última Atualização: "</span>
                        {updated}
                    </p>
                })}
            </div>
        </div>
    }
}
