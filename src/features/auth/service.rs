//! Seam between the auth views and the external identity service.
//!
//! The service owns global session state; views observe it through
//! [`IdentityService::on_auth_state_change`], which hands back a
//! [`Subscription`] that releases the listener when dropped. Tests substitute a
//! fake implementation, so nothing here reaches for ambient browser state.

use crate::{
    app_lib::AppError,
    features::auth::types::{AuthEvent, OAuthRequest, OtpRequest, Session},
};
use async_trait::async_trait;
use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

/// Callback invoked for every session-state change.
pub type AuthListener = Rc<dyn Fn(AuthEvent, Option<&Session>)>;

/// The five identity-service operations the auth views consume. All of them
/// are fallible and owned by the collaborator; callers never retry.
#[async_trait(?Send)]
pub trait IdentityService {
    /// Registers a session-change listener until the returned handle is dropped.
    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription;

    /// Returns the current session, if any.
    async fn get_session(&self) -> Result<Option<Session>, AppError>;

    /// Requests a magic-link email.
    async fn sign_in_with_otp(&self, request: &OtpRequest) -> Result<(), AppError>;

    /// Starts a redirect-based OAuth flow. On success the browser leaves the page.
    async fn sign_in_with_oauth(&self, request: &OAuthRequest) -> Result<(), AppError>;

    /// Exchanges an authorization code returned by a redirect for a session.
    async fn exchange_code_for_session(&self, code: &str) -> Result<Session, AppError>;
}

/// Cancellable handle for a registered listener. Dropping it deregisters the
/// listener; [`Subscription::unsubscribe`] does the same explicitly.
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(id: u64, release: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.release_listener();
    }

    fn release_listener(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_listener();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, AuthListener>,
}

/// Single-threaded listener registry shared by identity-service implementations.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Listeners>>,
}

impl ListenerRegistry {
    pub fn subscribe(&self, listener: AuthListener) -> Subscription {
        let id = {
            let mut listeners = self.inner.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.insert(id, listener);
            id
        };

        let registry = Rc::downgrade(&self.inner);
        Subscription::new(id, move || {
            if let Some(listeners) = registry.upgrade() {
                listeners.borrow_mut().entries.remove(&id);
            }
        })
    }

    /// Notifies every registered listener in registration order.
    ///
    /// Listeners are snapshotted first so a callback may unsubscribe (or
    /// subscribe) without re-entering the registry borrow.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        let listeners: Vec<AuthListener> = self.inner.borrow().entries.values().cloned().collect();
        for listener in listeners {
            listener(event, session);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_listener(counter: &Rc<Cell<u32>>) -> AuthListener {
        let counter = Rc::clone(counter);
        Rc::new(move |_: AuthEvent, _: Option<&Session>| {
            counter.set(counter.get() + 1);
        })
    }

    #[test]
    fn dropping_subscription_releases_listener() {
        let registry = ListenerRegistry::default();
        let calls = Rc::new(Cell::new(0));

        let subscription = registry.subscribe(counting_listener(&calls));
        assert_eq!(registry.len(), 1);
        registry.emit(AuthEvent::SignedIn, None);
        assert_eq!(calls.get(), 1);

        drop(subscription);
        assert!(registry.is_empty());
        registry.emit(AuthEvent::SignedIn, None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unsubscribe_only_releases_its_own_listener() {
        let registry = ListenerRegistry::default();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let first_subscription = registry.subscribe(counting_listener(&first));
        let second_subscription = registry.subscribe(counting_listener(&second));
        assert_ne!(first_subscription.id(), second_subscription.id());

        first_subscription.unsubscribe();
        registry.emit(AuthEvent::TokenRefreshed, None);

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn listener_may_unsubscribe_while_being_notified() {
        let registry = ListenerRegistry::default();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot_for_listener = Rc::clone(&slot);
        let subscription = registry.subscribe(Rc::new(move |_: AuthEvent, _: Option<&Session>| {
            slot_for_listener.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(subscription);

        registry.emit(AuthEvent::SignedOut, None);
        assert!(registry.is_empty());
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::default();
        let subscription = registry.subscribe(Rc::new(|_: AuthEvent, _: Option<&Session>| {}));
        drop(registry);
        drop(subscription);
    }
}
