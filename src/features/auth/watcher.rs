//! Session watcher embedded in each auth view. It redirects to the dashboard once
//! a session shows up, either from a `SIGNED_IN` notification or from the
//! one-time session poll on mount.

use crate::{
    features::auth::{
        service::{AuthListener, IdentityService, Subscription},
        types::{AuthEvent, Session},
        view::{HistoryMode, Navigator},
    },
    routes::paths,
};
use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};
use tracing::{debug, warn};

/// Once-only redirect to the authenticated area, disarmed on unmount.
struct DashboardRedirect {
    navigator: Rc<dyn Navigator>,
    armed: Cell<bool>,
    fired: Cell<bool>,
}

impl DashboardRedirect {
    fn fire(&self, source: &'static str) -> bool {
        if !self.armed.get() || self.fired.replace(true) {
            return false;
        }
        debug!(source, "session present, redirecting to dashboard");
        self.navigator.navigate(paths::DASHBOARD, HistoryMode::Replace);
        true
    }
}

pub struct SessionWatcher {
    service: Rc<dyn IdentityService>,
    redirect: Rc<DashboardRedirect>,
    subscription: RefCell<Option<Subscription>>,
}

impl SessionWatcher {
    pub fn new(service: Rc<dyn IdentityService>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            service,
            redirect: Rc::new(DashboardRedirect {
                navigator,
                armed: Cell::new(false),
                fired: Cell::new(false),
            }),
            subscription: RefCell::new(None),
        }
    }

    /// Registers the session-change listener. Mounting twice keeps the first
    /// registration.
    pub fn mount(&self) {
        let mut subscription = self.subscription.borrow_mut();
        if subscription.is_some() {
            return;
        }

        let redirect = Rc::clone(&self.redirect);
        let listener: AuthListener = Rc::new(move |event: AuthEvent, session: Option<&Session>| {
            if event == AuthEvent::SignedIn && session.is_some() {
                redirect.fire("auth_state_change");
            }
        });
        self.redirect.armed.set(true);
        *subscription = Some(self.service.on_auth_state_change(listener));
    }

    /// Polls the current session once and redirects if one exists. Resolves to
    /// whether this call triggered the redirect.
    ///
    /// The future owns its handles so a host can spawn it; if the view unmounts
    /// before it resolves, the result is dropped.
    pub fn check_current_session(&self) -> impl Future<Output = bool> + 'static {
        let service = Rc::clone(&self.service);
        let redirect = Rc::clone(&self.redirect);
        async move {
            match service.get_session().await {
                Ok(Some(_)) => redirect.fire("get_session"),
                Ok(None) => false,
                Err(err) => {
                    warn!(error = %err, "failed to read current session");
                    false
                }
            }
        }
    }

    /// Deregisters the listener and disarms any pending redirect.
    pub fn unmount(&self) {
        self.redirect.armed.set(false);
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    pub fn has_redirected(&self) -> bool {
        self.redirect.fired.get()
    }
}

impl Drop for SessionWatcher {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app_lib::AppError,
        features::auth::test_support::{FakeIdentityService, RecordingNavigator, journal, session},
    };

    fn watcher(
        service: &Rc<FakeIdentityService>,
        navigator: &Rc<RecordingNavigator>,
    ) -> SessionWatcher {
        SessionWatcher::new(service.clone(), navigator.clone())
    }

    #[test]
    fn signed_in_event_redirects_once_replacing_history() {
        let service = FakeIdentityService::new(&journal());
        let navigator = RecordingNavigator::new();
        let watcher = watcher(&service, &navigator);
        watcher.mount();

        let session = session();
        service.emit(AuthEvent::SignedIn, Some(&session));
        service.emit(AuthEvent::SignedIn, Some(&session));
        service.emit(AuthEvent::TokenRefreshed, Some(&session));

        assert_eq!(
            *navigator.calls.borrow(),
            vec![(paths::DASHBOARD.to_string(), HistoryMode::Replace)]
        );
        assert!(watcher.has_redirected());
    }

    #[test]
    fn signed_in_without_session_is_ignored() {
        let service = FakeIdentityService::new(&journal());
        let navigator = RecordingNavigator::new();
        let watcher = watcher(&service, &navigator);
        watcher.mount();

        service.emit(AuthEvent::SignedIn, None);
        service.emit(AuthEvent::SignedOut, None);

        assert!(navigator.calls.borrow().is_empty());
        assert!(!watcher.has_redirected());
    }

    #[test]
    fn unmount_deregisters_listener() {
        let service = FakeIdentityService::new(&journal());
        let navigator = RecordingNavigator::new();
        let watcher = watcher(&service, &navigator);

        watcher.mount();
        watcher.mount();
        assert_eq!(service.listener_count(), 1);
        assert!(watcher.is_mounted());

        watcher.unmount();
        assert_eq!(service.listener_count(), 0);
        assert!(!watcher.is_mounted());

        service.emit(AuthEvent::SignedIn, Some(&session()));
        assert!(navigator.calls.borrow().is_empty());
    }

    #[test]
    fn dropping_watcher_deregisters_listener() {
        let service = FakeIdentityService::new(&journal());
        let navigator = RecordingNavigator::new();
        {
            let watcher = watcher(&service, &navigator);
            watcher.mount();
            assert_eq!(service.listener_count(), 1);
        }
        assert_eq!(service.listener_count(), 0);
    }

    #[tokio::test]
    async fn existing_session_redirects_on_poll() {
        let service = FakeIdentityService::new(&journal());
        *service.current_session.borrow_mut() = Some(session());
        let navigator = RecordingNavigator::new();
        let watcher = watcher(&service, &navigator);
        watcher.mount();

        assert!(watcher.check_current_session().await);
        service.emit(AuthEvent::SignedIn, Some(&session()));

        assert_eq!(navigator.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn poll_without_session_stays_put() {
        let service = FakeIdentityService::new(&journal());
        let navigator = RecordingNavigator::new();
        let watcher = watcher(&service, &navigator);
        watcher.mount();

        assert!(!watcher.check_current_session().await);
        assert!(navigator.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn poll_error_is_not_fatal() {
        let service = FakeIdentityService::new(&journal());
        *service.session_error.borrow_mut() = Some(AppError::Network("offline".to_string()));
        let navigator = RecordingNavigator::new();
        let watcher = watcher(&service, &navigator);
        watcher.mount();

        assert!(!watcher.check_current_session().await);
        assert!(navigator.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn poll_resolving_after_unmount_is_discarded() {
        let service = FakeIdentityService::new(&journal());
        *service.current_session.borrow_mut() = Some(session());
        let navigator = RecordingNavigator::new();
        let watcher = watcher(&service, &navigator);
        watcher.mount();

        let pending = watcher.check_current_session();
        drop(watcher);

        assert!(!pending.await);
        assert!(navigator.calls.borrow().is_empty());
    }
}
