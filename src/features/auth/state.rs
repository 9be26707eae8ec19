//! Auth context and view wiring for the Leptos pages. The provider builds the
//! browser identity client once and shares it through context; the hooks here
//! bind the flow logic to router navigation and per-form signals.

use crate::{
    app_lib::{AppError, config::AppConfig},
    components::{Alert, AlertKind},
    features::auth::{
        callback::{CallbackHandler, CallbackParams},
        client::BrowserIdentityClient,
        service::{AuthListener, IdentityService, Subscription},
        types::{OAuthRequest, OtpRequest, Session},
        view::{AuthFlow, HistoryMode, Navigator, ViewState},
        watcher::SessionWatcher,
    },
};
use async_trait::async_trait;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{
    NavigateOptions,
    hooks::{use_location, use_navigate, use_query_map},
};
use std::rc::Rc;
use tracing::error;

const CALLBACK_QUERY_KEYS: [&str; 4] = ["code", "error", "error_code", "error_description"];

#[derive(Clone, Copy)]
/// Identity client and cross-route notice shared through Leptos.
pub struct AuthContext {
    identity: StoredValue<Rc<dyn IdentityService>, LocalStorage>,
    notice: StoredValue<Option<String>>,
}

impl AuthContext {
    fn new(identity: Rc<dyn IdentityService>) -> Self {
        Self {
            identity: StoredValue::new_local(identity),
            notice: StoredValue::new(None),
        }
    }

    /// Returns the shared identity client.
    pub fn identity(&self) -> Rc<dyn IdentityService> {
        self.identity
            .try_get_value()
            .unwrap_or_else(|| Rc::new(UnconfiguredIdentity))
    }

    /// Leaves a message for the next auth view that mounts.
    pub fn flash(&self, message: &str) {
        self.notice.try_set_value(Some(message.to_string()));
    }

    /// Takes the pending notice, if any.
    pub fn take_notice(&self) -> Option<String> {
        self.notice.try_update_value(Option::take).flatten()
    }
}

/// Builds the identity client and provides [`AuthContext`]. A missing identity
/// URL or anon key renders the configuration error instead of the app.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    match BrowserIdentityClient::new(&AppConfig::load()) {
        Ok(client) => {
            provide_context(AuthContext::new(Rc::new(client)));
            view! { {children()} }.into_any()
        }
        Err(err) => {
            error!(error = %err, "identity client is not configured");
            view! {
                <div class="mx-auto mt-16 max-w-md px-4">
                    <Alert kind=AlertKind::Error message=err.user_message() />
                </div>
            }
            .into_any()
        }
    }
}

/// Returns the auth context, or one whose identity client rejects every request
/// when called outside [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| AuthContext::new(Rc::new(UnconfiguredIdentity)))
}

/// Loading, error, and success signals for one auth form.
#[derive(Clone, Copy)]
pub struct FormStatus {
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl FormStatus {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        }
    }
}

// Updates after the owning view is disposed are dropped by `try_set`.
impl ViewState for FormStatus {
    fn is_loading(&self) -> bool {
        self.loading.try_get_untracked().unwrap_or(false)
    }

    fn set_loading(&self, loading: bool) {
        let _ = self.loading.try_set(loading);
    }

    fn set_error(&self, message: Option<String>) {
        let _ = self.error.try_set(message);
    }

    fn set_success(&self, message: Option<String>) {
        let _ = self.success.try_set(message);
    }
}

/// [`Navigator`] backed by the Leptos router.
pub struct RouterNavigator {
    navigate: Box<dyn Fn(&str, NavigateOptions)>,
}

impl RouterNavigator {
    /// Must be called inside a `<Router>`.
    pub fn from_router() -> Self {
        let navigate = use_navigate();
        Self {
            navigate: Box::new(move |path, options| navigate(path, options)),
        }
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, path: &str, mode: HistoryMode) {
        (self.navigate)(
            path,
            NavigateOptions {
                replace: mode == HistoryMode::Replace,
                ..Default::default()
            },
        );
    }
}

/// Mounts the session watcher and callback handler for an auth view.
///
/// The watcher redirects to the dashboard once a session exists and is
/// unsubscribed when the view is cleaned up. The callback handler reruns
/// whenever the query string changes. A pending notice from another route is
/// shown as the view's error.
pub fn use_auth_flow(flow: AuthFlow, status: FormStatus) -> AuthContext {
    let auth = use_auth();
    let identity = auth.identity();
    let navigator: Rc<dyn Navigator> = Rc::new(RouterNavigator::from_router());

    if let Some(message) = auth.take_notice() {
        status.set_error(Some(message));
    }

    let watcher = SessionWatcher::new(Rc::clone(&identity), Rc::clone(&navigator));
    watcher.mount();
    let check = watcher.check_current_session();
    spawn_local(async move {
        check.await;
    });
    let watcher = StoredValue::new_local(watcher);
    on_cleanup(move || {
        watcher.try_with_value(SessionWatcher::unmount);
    });

    let handler = StoredValue::new_local(CallbackHandler::new(identity, navigator, flow));
    let query = use_query_map();
    let location = use_location();
    Effect::new(move |_| {
        let params = query.with(|query| {
            CallbackParams::from_pairs(
                CALLBACK_QUERY_KEYS
                    .into_iter()
                    .filter_map(|key| query.get(key).map(|value| (key, value))),
            )
        });
        if params.is_empty() {
            return;
        }
        let Some(pending) = handler.try_with_value(|handler| handler.handle(&params, status))
        else {
            return;
        };
        let current_path = location.pathname.get_untracked();
        spawn_local(async move {
            if pending.await.needs_flash(&current_path, flow) {
                auth.flash(flow.oauth_failure_message());
            }
        });
    });

    auth
}

/// `window.location.origin`, or empty outside a browser.
pub fn current_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Stand-in used when no [`AuthProvider`] is mounted.
struct UnconfiguredIdentity;

impl UnconfiguredIdentity {
    fn unavailable() -> AppError {
        AppError::Config("Sign-in is not available right now.".to_string())
    }
}

#[async_trait(?Send)]
impl IdentityService for UnconfiguredIdentity {
    fn on_auth_state_change(&self, _listener: AuthListener) -> Subscription {
        Subscription::new(0, || {})
    }

    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        Ok(None)
    }

    async fn sign_in_with_otp(&self, _request: &OtpRequest) -> Result<(), AppError> {
        Err(Self::unavailable())
    }

    async fn sign_in_with_oauth(&self, _request: &OAuthRequest) -> Result<(), AppError> {
        Err(Self::unavailable())
    }

    async fn exchange_code_for_session(&self, _code: &str) -> Result<Session, AppError> {
        Err(Self::unavailable())
    }
}
