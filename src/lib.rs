//! Account access front end for the GrandéStay hotel booking app.
//!
//! The login and signup views hand authentication to an external identity
//! service (magic links and OAuth) and only react to its callbacks. The flow
//! logic in [`features::auth`] is plain Rust behind the [`IdentityService`]
//! seam so it runs natively in tests; the Leptos views, the browser identity
//! client and the HTTP helpers only build for `wasm32`.
//!
//! [`IdentityService`]: features::auth::service::IdentityService

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;
pub mod routes;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

/// Installs browser logging and mounts the app on `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    tracing::info!(commit = app_lib::GIT_COMMIT_HASH, "starting grandestay-web");
    leptos::prelude::mount_to_body(app::App);
}
