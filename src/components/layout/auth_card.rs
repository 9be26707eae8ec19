//! Full-screen hotel backdrop with a frosted card, shared by the login and
//! signup views. The footer carries the build commit for support reports.

use crate::app_lib::GIT_COMMIT_HASH;
use leptos::prelude::*;

const COMMIT_DISPLAY_LEN: usize = 7;

#[component]
pub fn AuthCard(title: &'static str, subtitle: &'static str, children: Children) -> impl IntoView {
    let commit: String = GIT_COMMIT_HASH.chars().take(COMMIT_DISPLAY_LEN).collect();

    view! {
        <div class="relative flex min-h-screen items-center justify-center bg-slate-900 bg-[url('/assets/lobby.jpg')] bg-cover bg-center px-4 py-12">
            <div class="absolute inset-0 bg-gradient-to-br from-slate-900/80 via-slate-900/60 to-amber-900/40"></div>
            <div class="relative w-full max-w-md rounded-3xl border border-white/20 bg-white/10 p-8 shadow-2xl backdrop-blur-xl">
                <div class="mb-8 text-center">
                    <p class="text-3xl font-bold tracking-tight text-white">
                        "Grand" <span class="text-amber-400">"é"</span> "Stay"
                    </p>
                    <h1 class="mt-4 text-xl font-semibold text-white">{title}</h1>
                    <p class="mt-1 text-sm text-slate-300">{subtitle}</p>
                </div>
                {children()}
                <p class="mt-8 text-center text-xs text-slate-400">"build " {commit}</p>
            </div>
        </div>
    }
}
