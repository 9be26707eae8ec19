//! Fallback for unknown routes.

use crate::{components::AuthCard, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AuthCard title="Page not found" subtitle="The page you requested does not exist">
            <div class="flex flex-col items-center gap-4">
                <p class="text-7xl font-black text-white/20 select-none">"404"</p>
                <A
                    href=paths::LOGIN
                    {..}
                    class="inline-flex items-center rounded-xl bg-amber-500 px-5 py-2.5 text-sm font-semibold text-slate-900 hover:bg-amber-400"
                >
                    "Go to sign in"
                </A>
                <button
                    on:click=move |_| {
                        if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
                            let _ = history.back();
                        }
                    }
                    class="text-sm text-slate-300 hover:text-white"
                >
                    "Go back"
                </button>
            </div>
        </AuthCard>
    }
}
