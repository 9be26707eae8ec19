//! Alert banners for form feedback. Messages are rendered as text and must
//! never include tokens, authorization codes, or provider error details.

use leptos::prelude::*;

#[derive(Clone, Copy)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
}

/// Renders a styled alert banner.
#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => {
            "rounded-xl border border-red-300/40 bg-red-500/15 px-4 py-3 text-sm text-red-100 backdrop-blur"
        }
        AlertKind::Success => {
            "rounded-xl border border-emerald-300/40 bg-emerald-500/15 px-4 py-3 text-sm text-emerald-100 backdrop-blur"
        }
    };

    view! { <div class=class role="alert">{message}</div> }
}
