//! Shared doubles for auth flow tests.

use crate::{
    app_lib::AppError,
    features::auth::{
        service::{AuthListener, IdentityService, ListenerRegistry, Subscription},
        types::{AuthEvent, AuthUser, OAuthRequest, OtpRequest, Session},
        view::{HistoryMode, Navigator, ViewState},
    },
};
use async_trait::async_trait;
use secrecy::SecretString;
use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    rc::Rc,
};

/// Ordered log of side effects shared between doubles, so tests can assert on
/// interleaving (e.g. loading is set before the request goes out).
pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub(crate) fn session() -> Session {
    Session {
        access_token: SecretString::from("access-token"),
        refresh_token: SecretString::from("refresh-token"),
        token_type: "bearer".to_string(),
        expires_at: Some(4_102_444_800),
        user: AuthUser {
            id: "0b7c2a1e".to_string(),
            email: Some("guest@example.com".to_string()),
        },
    }
}

/// Scripted identity service. Codes can be exchanged once; reusing one fails
/// the way the provider does.
pub(crate) struct FakeIdentityService {
    pub(crate) registry: ListenerRegistry,
    pub(crate) journal: Journal,
    pub(crate) current_session: RefCell<Option<Session>>,
    pub(crate) session_error: RefCell<Option<AppError>>,
    pub(crate) otp_requests: RefCell<Vec<OtpRequest>>,
    pub(crate) otp_error: RefCell<Option<AppError>>,
    pub(crate) oauth_requests: RefCell<Vec<OAuthRequest>>,
    pub(crate) oauth_error: RefCell<Option<AppError>>,
    pub(crate) exchanged_codes: RefCell<Vec<String>>,
    pub(crate) exchange_error: RefCell<Option<AppError>>,
    consumed_codes: RefCell<HashSet<String>>,
}

impl FakeIdentityService {
    pub(crate) fn new(journal: &Journal) -> Rc<Self> {
        Rc::new(Self {
            registry: ListenerRegistry::default(),
            journal: Rc::clone(journal),
            current_session: RefCell::new(None),
            session_error: RefCell::new(None),
            otp_requests: RefCell::new(Vec::new()),
            otp_error: RefCell::new(None),
            oauth_requests: RefCell::new(Vec::new()),
            oauth_error: RefCell::new(None),
            exchanged_codes: RefCell::new(Vec::new()),
            exchange_error: RefCell::new(None),
            consumed_codes: RefCell::new(HashSet::new()),
        })
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        self.registry.emit(event, session);
    }

    fn record(&self, entry: String) {
        self.journal.borrow_mut().push(entry);
    }
}

#[async_trait(?Send)]
impl IdentityService for FakeIdentityService {
    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        self.registry.subscribe(listener)
    }

    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        self.record("get_session".to_string());
        if let Some(err) = self.session_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.current_session.borrow().clone())
    }

    async fn sign_in_with_otp(&self, request: &OtpRequest) -> Result<(), AppError> {
        self.record(format!("otp:{}", request.email));
        self.otp_requests.borrow_mut().push(request.clone());
        match self.otp_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn sign_in_with_oauth(&self, request: &OAuthRequest) -> Result<(), AppError> {
        self.record(format!("oauth:{}", request.provider));
        self.oauth_requests.borrow_mut().push(request.clone());
        match self.oauth_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn exchange_code_for_session(&self, code: &str) -> Result<Session, AppError> {
        self.record(format!("exchange:{code}"));
        self.exchanged_codes.borrow_mut().push(code.to_string());
        if let Some(err) = self.exchange_error.borrow().clone() {
            return Err(err);
        }
        if !self.consumed_codes.borrow_mut().insert(code.to_string()) {
            return Err(AppError::Provider {
                code: Some("flow_state_not_found".to_string()),
                message: "invalid flow state, no valid flow state found".to_string(),
            });
        }

        let session = session();
        *self.current_session.borrow_mut() = Some(session.clone());
        self.registry.emit(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub(crate) calls: RefCell<Vec<(String, HistoryMode)>>,
}

impl RecordingNavigator {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, mode: HistoryMode) {
        self.calls.borrow_mut().push((path.to_string(), mode));
    }
}

/// View state that records every loading transition.
pub(crate) struct RecordingView {
    journal: Journal,
    loading: Cell<bool>,
    pub(crate) loading_history: RefCell<Vec<bool>>,
    pub(crate) error: RefCell<Option<String>>,
    pub(crate) success: RefCell<Option<String>>,
}

impl RecordingView {
    pub(crate) fn new(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            loading: Cell::new(false),
            loading_history: RefCell::new(Vec::new()),
            error: RefCell::new(None),
            success: RefCell::new(None),
        }
    }

    pub(crate) fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub(crate) fn success(&self) -> Option<String> {
        self.success.borrow().clone()
    }
}

impl ViewState for RecordingView {
    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn set_loading(&self, loading: bool) {
        self.journal.borrow_mut().push(format!("loading={loading}"));
        self.loading.set(loading);
        self.loading_history.borrow_mut().push(loading);
    }

    fn set_error(&self, message: Option<String>) {
        *self.error.borrow_mut() = message;
    }

    fn set_success(&self, message: Option<String>) {
        *self.success.borrow_mut() = message;
    }
}
