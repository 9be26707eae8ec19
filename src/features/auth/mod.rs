//! Auth feature module covering the magic-link and OAuth flows handed to the
//! external identity service. It keeps the flow logic out of the UI so it can
//! run against a test double, and it touches security boundaries: session
//! tokens, authorization codes and email addresses must never be logged.
//!
//! Flow Overview: Each auth view mounts a [`watcher::SessionWatcher`] that
//! redirects to the dashboard once a session appears, and a
//! [`callback::CallbackHandler`] that exchanges `?code=` for a session or
//! reports `?error=`. Form submissions in [`submit`] request a magic link or
//! an OAuth redirect from the [`service::IdentityService`].

pub mod callback;
pub mod gotrue;
pub mod pkce;
pub mod service;
pub mod signup_fields;
pub mod submit;
pub mod types;
pub mod validation;
pub mod view;
pub mod watcher;

#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
#[cfg(target_arch = "wasm32")]
mod storage;

#[cfg(test)]
pub(crate) mod test_support;
