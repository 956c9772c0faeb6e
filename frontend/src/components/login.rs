use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{login, use_auth};
use crate::components::icons::ShieldCheck;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_submitting = RwSignal::new(false);
    let error_msg = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(auth) = auth else {
            return;
        };
        if email.get_untracked().trim().is_empty() || password.get_untracked().is_empty() {
            error_msg.set(Some("Preencha o e-mail e a senha".to_string()));
            return;
        }

        is_submitting.set(true);
        error_msg.set(None);

        spawn_local(async move {
            // 成功后路由服务监听到认证状态变化，自动跳转到面板
            if let Err(message) = login(&auth, email.get_untracked(), password.get_untracked()).await
            {
                error_msg.set(Some(message));
                password.set(String::new());
            }
            is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-red-50 rounded-2xl text-red-600">
                            <ShieldCheck class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Área Administrativa"</h1>
                        <p class="text-gray-500">"Entre com suas credenciais de administrador"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-white">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"E-mail"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="admin@dtct.gov"
                                autocomplete="username"
                                on:input=move |ev| email.set(event_target_value(&ev))
                                prop:value=move || email.get()
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                autocomplete="current-password"
                                on:input=move |ev| password.set(event_target_value(&ev))
                                prop:value=move || password.get()
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn bg-red-600 text-white hover:bg-red-700" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
