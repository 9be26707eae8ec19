//! Route table. Paths live in [`paths`] so the flow logic can target them
//! without the view layer.

pub mod paths;

#[cfg(target_arch = "wasm32")]
mod dashboard;
#[cfg(target_arch = "wasm32")]
mod login;
#[cfg(target_arch = "wasm32")]
mod not_found;
#[cfg(target_arch = "wasm32")]
mod signup;
#[cfg(target_arch = "wasm32")]
mod terms;

#[cfg(target_arch = "wasm32")]
pub(crate) use {
    dashboard::DashboardPage, login::LoginPage, not_found::NotFoundPage, signup::SignUpPage,
    terms::TermsPage,
};

#[cfg(target_arch = "wasm32")]
use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use leptos_router::{
    components::{Route, Routes},
    path,
};

/// `/auth/callback` renders the login view, which also finishes signup OAuth
/// returns since both redirect there.
#[cfg(target_arch = "wasm32")]
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=LoginPage />
            <Route path=path!("/auth/callback") view=LoginPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/terms") view=TermsPage />
        </Routes>
    }
}
