//! Seams between the auth flow logic and whatever renders it. The Leptos views
//! implement these with router navigation and signals; tests implement them
//! with recorders.

use crate::{features::auth::types::OAuthProvider, routes::paths};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// Client-side navigation.
pub trait Navigator {
    fn navigate(&self, path: &str, mode: HistoryMode);
}

/// Per-view status fields driven by the auth flows.
///
/// Implementations must tolerate updates after the view is gone; a request that
/// completes after unmount is simply discarded.
pub trait ViewState {
    fn is_loading(&self) -> bool;
    fn set_loading(&self, loading: bool);
    fn set_error(&self, message: Option<String>);
    fn set_success(&self, message: Option<String>);
}

impl<T: ViewState + ?Sized> ViewState for Rc<T> {
    fn is_loading(&self) -> bool {
        (**self).is_loading()
    }

    fn set_loading(&self, loading: bool) {
        (**self).set_loading(loading);
    }

    fn set_error(&self, message: Option<String>) {
        (**self).set_error(message);
    }

    fn set_success(&self, message: Option<String>) {
        (**self).set_success(message);
    }
}

/// Which auth view a flow runs in. The two views share the flow logic but differ
/// in wording, entry route, and OAuth consent parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Signup,
}

impl AuthFlow {
    /// Route the view falls back to after a failed OAuth return.
    pub fn entry_route(self) -> &'static str {
        match self {
            AuthFlow::Login => paths::LOGIN,
            AuthFlow::Signup => paths::SIGNUP,
        }
    }

    /// Generic message for provider-reported OAuth failures.
    pub fn oauth_failure_message(self) -> &'static str {
        match self {
            AuthFlow::Login => "OAuth login failed. Please try again.",
            AuthFlow::Signup => "OAuth registration failed. Please try again.",
        }
    }

    pub fn magic_link_sent_message(self) -> &'static str {
        match self {
            AuthFlow::Login => "Check your email for the magic login link! ✨",
            AuthFlow::Signup => {
                "🎉 Magic link sent! Please check your email to complete registration."
            }
        }
    }

    /// Extra provider query parameters for the OAuth authorize URL. Signup asks
    /// for offline access and forces the consent screen.
    pub fn oauth_query_params(self, provider: OAuthProvider) -> Vec<(String, String)> {
        match (self, provider) {
            (AuthFlow::Signup, OAuthProvider::Google) => vec![
                ("access_type".to_string(), "offline".to_string()),
                ("prompt".to_string(), "consent".to_string()),
            ],
            _ => Vec::new(),
        }
    }
}
