//! Shared frontend utilities for identity-service access, configuration, errors,
//! and build metadata.
//!
//! ## Identity Service Flows
//!
//! ### Magic Link (login and signup)
//!
//! 1. **Request:** The client generates a PKCE verifier, stores it, and POSTs the
//!    email (plus registration metadata on signup) to `/auth/v1/otp`.
//! 2. **Return:** The emailed link lands on `/auth/callback?code=...`.
//! 3. **Exchange:** The callback view POSTs the code and the stored verifier to
//!    `/auth/v1/token?grant_type=pkce` and persists the returned session.
//!
//! ### OAuth
//!
//! The client stores a PKCE verifier and assigns `window.location` to
//! `/auth/v1/authorize`. The provider redirects back to `/auth/callback` with
//! either `code` (exchanged as above) or `error`.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. Session tokens pass through here, so
//! callers must never log request or response bodies.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub(crate) mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use errors::{AppError, provider_error};
