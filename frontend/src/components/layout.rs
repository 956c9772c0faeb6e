use dtct_shared::SiteSettings;
use leptos::prelude::*;

use crate::components::icons::Truck;
use crate::settings::use_settings;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

pub const DEPARTMENT_NAME: &str = "DEPARTAMENTO DE TRANSPORTES TECNOLOGIA E TRANSITO";

#[component]
pub fn Navbar() -> impl IntoView {
    let settings = use_settings();
    let router = use_router();
    let on_home = move || {
        router
            .map(|r| r.current_route().get().is_public_home())
            .unwrap_or(true)
    };

    let logo = move || {
        settings.with(|s: &SiteSettings| s.logo_url().map(str::to_string))
    };

    view! {
        <nav class="bg-white shadow-lg border-t-4 border-red-600">
            <div class="max-w-7xl mx-auto px-4">
                <div class="flex justify-between h-16">
                    <Link to=AppRoute::Home class="flex items-center">
                        {move || match logo() {
                            Some(src) => view! { <img src=src alt="Logo" class="h-8 w-auto" /> }.into_any(),
                            None => view! { <Truck class="h-8 w-8 text-red-600" /> }.into_any(),
                        }}
                        <div class="ml-2 flex flex-col">
                            <span class="text-sm font-bold text-gray-900">
                                {move || settings.with(|s| s.base.site_name.clone())}
                            </span>
                            <span class="text-xs text-red-600 font-medium">{DEPARTMENT_NAME}</span>
                        </div>
                    </Link>
                    <div class="flex items-center">
                        {move || if on_home() {
                            view! {
                                <Link to=AppRoute::AdminLogin class="inline-flex items-center px-4 py-2 text-sm font-medium rounded-md text-white bg-red-600 hover:bg-red-700">
                                    "Área Administrativa"
                                </Link>
                            }.into_any()
                        } else {
                            view! {
                                <Link to=AppRoute::Home class="inline-flex items-center px-4 py-2 text-sm font-medium rounded-md text-red-600 bg-red-50 hover:bg-red-100">
                                    "Voltar ao Início"
                                </Link>
                            }.into_any()
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let settings = use_settings();
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="bg-gray-800 text-white py-8">
            <div class="max-w-7xl mx-auto px-4">
                <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                    <div>
                        <h3 class="text-lg font-semibold mb-4">"DTCT"</h3>
                        <p class="text-gray-300">
                            "Facilitando o processo de licenciamento de transportes para melhor servir nossa comunidade."
                        </p>
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold mb-4">"Horário de Funcionamento"</h3>
                        <p class="text-gray-300 whitespace-pre-line">
                            {move || settings.with(|s| s.base.working_hours.clone())}
                        </p>
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold mb-4">"Contato"</h3>
                        <p class="text-gray-300">
                            "Telefone: " {move || settings.with(|s| s.base.contact_phone.clone())}
                        </p>
                        <p class="text-gray-300">
                            "Email: " {move || settings.with(|s| s.base.contact_email.clone())}
                        </p>
                    </div>
                </div>
                <div class="mt-8 pt-8 border-t border-gray-700 text-center text-gray-300">
                    <p>"© " {year} " DTCT. Todos os direitos reservados."</p>
                </div>
            </div>
        </footer>
    }
}
