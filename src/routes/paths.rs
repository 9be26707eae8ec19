//! Route paths shared by the router and the auth flows.

pub const LOGIN: &str = "/";
pub const AUTH_CALLBACK: &str = "/auth/callback";
pub const DASHBOARD: &str = "/dashboard";
pub const SIGNUP: &str = "/signup";
pub const TERMS: &str = "/terms";

/// Absolute URL the identity service redirects back to after OAuth or a magic link.
pub fn callback_url(origin: &str) -> String {
    format!("{}{AUTH_CALLBACK}", origin.trim_end_matches('/'))
}
