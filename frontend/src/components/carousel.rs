use dtct_shared::Advertisement;
use dtct_shared::carousel::Rotation;
use dtct_shared::repository::Repository;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PortalApi;
use crate::config::use_config;
use crate::web::Interval;

/// 首页广告轮播
///
/// 列表长度变化时重新挂定时器；定时器归组件所有，卸载时随 `StoredValue` 一起 drop。
#[component]
pub fn AdCarousel() -> impl IntoView {
    let config = use_config();
    let period = config.rotation_interval;
    let ads = RwSignal::new(Vec::<Advertisement>::new());
    let rotation = RwSignal::new(Rotation::default());
    let timer = StoredValue::new_local(None::<Interval>);

    let repo = PortalApi::public(&config).advertisements();
    spawn_local(async move {
        match repo.list().await {
            Ok(list) => ads.set(list),
            Err(e) => error!("Erro ao carregar anúncios: {}", e),
        }
    });

    Effect::new(move |_| {
        let len = ads.with(Vec::len);
        let mut changed = false;
        rotation.update(|r| changed = r.set_len(len));
        if !changed && timer.with_value(Option::is_some) {
            return;
        }
        // 旧定时器在这里被 drop
        timer.set_value(if len > 1 {
            Interval::new(period, move || rotation.update(Rotation::advance))
        } else {
            None
        });
    });

    let current = move || {
        let index = rotation.with(Rotation::index);
        ads.with(|list| list.get(index).cloned())
    };

    view! {
        {move || {
            current()
                .map(|ad| {
                    view! {
                        <div class="mb-8">
                            <div class="bg-white rounded-lg shadow-lg overflow-hidden">
                                <div class="relative">
                                    <img
                                        src=ad.base.image_url.clone()
                                        alt=ad.base.title.clone()
                                        class="w-full h-48 object-cover"
                                    />
                                    <div class="absolute bottom-0 left-0 right-0 bg-gradient-to-t from-black to-transparent p-4">
                                        <h3 class="text-white font-semibold text-lg">{ad.base.title}</h3>
                                        <p class="text-white text-sm">{ad.base.description}</p>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
