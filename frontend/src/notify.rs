//! 短暂提示（toast）

use std::time::Duration;

use dtct_shared::Notice;
use leptos::prelude::*;

/// 提示上下文
///
/// 每条提示带递增序号，过期回调只清除自己那一条。
#[derive(Clone, Copy)]
pub struct NotifyContext {
    current: RwSignal<Option<(u64, Notice)>>,
    ttl: StoredValue<Duration>,
}

impl NotifyContext {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: RwSignal::new(None),
            ttl: StoredValue::new(ttl),
        }
    }

    pub fn notify(&self, notice: Notice) {
        let seq = self
            .current
            .with_untracked(|c| c.as_ref().map(|(n, _)| n + 1).unwrap_or(0));
        self.current.set(Some((seq, notice)));

        let current = self.current;
        set_timeout(
            move || {
                if current.with_untracked(|c| matches!(c, Some((n, _)) if *n == seq)) {
                    current.set(None);
                }
            },
            self.ttl.get_value(),
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notice::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notice::error(message));
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn provide_notify(ttl: Duration) -> NotifyContext {
    let ctx = NotifyContext::new(ttl);
    provide_context(ctx);
    ctx
}

pub fn use_notify() -> NotifyContext {
    use_context::<NotifyContext>().unwrap_or_else(|| NotifyContext::new(Duration::from_secs(3)))
}

/// 右上角提示框
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_notify();
    let notice = move || ctx.current.get().map(|(_, n)| n);

    view! {
        {move || {
            notice()
                .map(|n| {
                    let class = if n.is_error() {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    };
                    view! {
                        <div class="toast toast-top toast-end z-50">
                            <div class=class role="status" on:click=move |_| ctx.dismiss()>
                                <span>{n.message}</span>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
