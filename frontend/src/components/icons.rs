//! Lucide 图标（内联 SVG）

use leptos::prelude::*;

#[component]
fn Svg(#[prop(into)] class: String, children: Children) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
        >
            {children()}
        </svg>
    }
}

#[component]
pub fn Truck(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M14 18V6a2 2 0 0 0-2-2H4a2 2 0 0 0-2 2v11a1 1 0 0 0 1 1h2" />
            <path d="M15 18H9" />
            <path d="M19 18h2a1 1 0 0 0 1-1v-3.65a1 1 0 0 0-.22-.624l-3.48-4.35A1 1 0 0 0 17.52 8H14" />
            <circle cx="17" cy="18" r="2" />
            <circle cx="7" cy="18" r="2" />
        </Svg>
    }
}

#[component]
pub fn Search(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <circle cx="11" cy="11" r="8" />
            <path d="m21 21-4.3-4.3" />
        </Svg>
    }
}

#[component]
pub fn Plus(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M5 12h14" />
            <path d="M12 5v14" />
        </Svg>
    }
}

#[component]
pub fn Edit(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7" />
            <path d="M18.5 2.5a2.12 2.12 0 0 1 3 3L12 15l-4 1 1-4Z" />
        </Svg>
    }
}

#[component]
pub fn Trash2(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M3 6h18" />
            <path d="M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6" />
            <path d="M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2" />
            <line x1="10" x2="10" y1="11" y2="17" />
            <line x1="14" x2="14" y1="11" y2="17" />
        </Svg>
    }
}

#[component]
pub fn Settings(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M12.22 2h-.44a2 2 0 0 0-2 2v.18a2 2 0 0 1-1 1.73l-.43.25a2 2 0 0 1-2 0l-.15-.08a2 2 0 0 0-2.73.73l-.22.38a2 2 0 0 0 .73 2.73l.15.1a2 2 0 0 1 1 1.72v.51a2 2 0 0 1-1 1.74l-.15.09a2 2 0 0 0-.73 2.73l.22.38a2 2 0 0 0 2.73.73l.15-.08a2 2 0 0 1 2 0l.43.25a2 2 0 0 1 1 1.73V20a2 2 0 0 0 2 2h.44a2 2 0 0 0 2-2v-.18a2 2 0 0 1 1-1.73l.43-.25a2 2 0 0 1 2 0l.15.08a2 2 0 0 0 2.73-.73l.22-.39a2 2 0 0 0-.73-2.73l-.15-.08a2 2 0 0 1-1-1.74v-.5a2 2 0 0 1 1-1.74l.15-.09a2 2 0 0 0 .73-2.73l-.22-.38a2 2 0 0 0-2.73-.73l-.15.08a2 2 0 0 1-2 0l-.43-.25a2 2 0 0 1-1-1.73V4a2 2 0 0 0-2-2z" />
            <circle cx="12" cy="12" r="3" />
        </Svg>
    }
}

#[component]
pub fn Upload(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4" />
            <polyline points="17 8 12 3 7 8" />
            <line x1="12" x2="12" y1="3" y2="15" />
        </Svg>
    }
}

#[component]
pub fn Image(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <rect width="18" height="18" x="3" y="3" rx="2" ry="2" />
            <circle cx="9" cy="9" r="2" />
            <path d="m21 15-3.09-3.09a2 2 0 0 0-2.82 0L6 21" />
        </Svg>
    }
}

#[component]
pub fn LogOut(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4" />
            <polyline points="16 17 21 12 16 7" />
            <line x1="21" x2="9" y1="12" y2="12" />
        </Svg>
    }
}

#[component]
pub fn ShieldCheck(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10" />
            <path d="m9 12 2 2 4-4" />
        </Svg>
    }
}

#[component]
pub fn RefreshCw(#[prop(into, optional)] class: String) -> impl IntoView {
    view! {
        <Svg class=class>
            <path d="M3 12a9 9 0 0 1 9-9 9.75 9.75 0 0 1 6.74 2.74L21 8" />
            <path d="M21 3v5h-5" />
            <path d="M21 12a9 9 0 0 1-9 9 9.75 9.75 0 0 1-6.74-2.74L3 16" />
            <path d="M8 16H3v5" />
        </Svg>
    }
}
