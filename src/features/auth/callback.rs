//! OAuth and magic-link return handling. Both land on the auth views with either
//! `?code=` (exchanged for a session) or `?error=` (reported generically). The
//! provider's error detail is logged and kept in [`CallbackOutcome`] but never
//! rendered, and codes are never logged.

use crate::{
    app_lib::AppError,
    features::auth::{
        service::IdentityService,
        view::{AuthFlow, HistoryMode, Navigator, ViewState},
    },
};
use std::{cell::RefCell, collections::HashSet, fmt, future::Future, rc::Rc};
use tracing::{debug, info, warn};

/// Query parameters the identity service may append to a redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Collects the callback parameters from decoded key/value pairs. The first
    /// occurrence of a key wins and empty values count as absent.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "error" => &mut params.error,
                "error_code" => &mut params.error_code,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        params
    }

    /// Parses a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.error.is_none()
    }
}

/// Structured provider-reported OAuth failure. Kept for logs and callers; the
/// user only sees the flow's generic message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackError {
    pub error: String,
    pub code: Option<String>,
    pub description: Option<String>,
}

impl fmt::Display for CallbackError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.error)?;
        if let Some(code) = &self.code {
            write!(formatter, " ({code})")?;
        }
        if let Some(description) = &self.description {
            write!(formatter, ": {description}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CallbackError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Neither `code` nor `error` was present.
    NoCallback,
    /// The provider redirected back with `error`; no exchange was attempted.
    ProviderError(CallbackError),
    /// The code was exchanged; the session watcher takes it from here.
    Exchanged,
    /// The exchange was attempted and rejected (expired or reused code, network).
    ExchangeFailed(AppError),
    /// This handler already attempted the same code.
    AlreadyHandled,
}

impl CallbackOutcome {
    /// Whether the failure message has to be carried to the next view. A
    /// provider error navigates to the flow's entry route, which remounts the
    /// view unless it is already at `current_path`.
    pub fn needs_flash(&self, current_path: &str, flow: AuthFlow) -> bool {
        matches!(self, CallbackOutcome::ProviderError(_)) && current_path != flow.entry_route()
    }
}

pub struct CallbackHandler {
    service: Rc<dyn IdentityService>,
    navigator: Rc<dyn Navigator>,
    flow: AuthFlow,
    attempted_codes: Rc<RefCell<HashSet<String>>>,
}

impl CallbackHandler {
    pub fn new(
        service: Rc<dyn IdentityService>,
        navigator: Rc<dyn Navigator>,
        flow: AuthFlow,
    ) -> Self {
        Self {
            service,
            navigator,
            flow,
            attempted_codes: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    /// Reacts to the current query parameters.
    ///
    /// `error` wins over `code`: the view shows the generic failure message and
    /// navigates back to its entry route, replacing history. Otherwise `code` is
    /// exchanged once per handler with loading set for the duration.
    pub fn handle<V>(
        &self,
        params: &CallbackParams,
        view: V,
    ) -> impl Future<Output = CallbackOutcome> + 'static
    where
        V: ViewState + 'static,
    {
        let params = params.clone();
        let service = Rc::clone(&self.service);
        let navigator = Rc::clone(&self.navigator);
        let attempted_codes = Rc::clone(&self.attempted_codes);
        let flow = self.flow;

        async move {
            if let Some(error) = params.error {
                let error = CallbackError {
                    error,
                    code: params.error_code,
                    description: params.error_description,
                };
                warn!(flow = ?flow, error = %error, "identity provider returned an error");
                view.set_error(Some(flow.oauth_failure_message().to_string()));
                navigator.navigate(flow.entry_route(), HistoryMode::Replace);
                return CallbackOutcome::ProviderError(error);
            }

            let Some(code) = params.code else {
                return CallbackOutcome::NoCallback;
            };

            if !attempted_codes.borrow_mut().insert(code.clone()) {
                debug!(flow = ?flow, "authorization code already handled");
                return CallbackOutcome::AlreadyHandled;
            }

            view.set_loading(true);
            let result = service.exchange_code_for_session(&code).await;
            view.set_loading(false);

            match result {
                Ok(_) => {
                    info!(flow = ?flow, "authorization code exchanged for a session");
                    CallbackOutcome::Exchanged
                }
                Err(err) => {
                    warn!(
                        flow = ?flow,
                        error_code = err.code().unwrap_or("none"),
                        error = %err,
                        "authorization code exchange failed"
                    );
                    view.set_error(Some(flow.oauth_failure_message().to_string()));
                    CallbackOutcome::ExchangeFailed(err)
                }
            }
        }
    }
}
