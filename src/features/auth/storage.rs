//! `localStorage` persistence for the session and the pending PKCE verifier.
//! Storage failures (private mode, quota) degrade to "no session" rather than
//! breaking the auth views.

use crate::{
    app_lib::config::{CODE_VERIFIER_KEY, STORAGE_KEY},
    features::auth::types::{Session, StoredSession},
};
use tracing::warn;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub(super) fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    match serde_json::from_str::<StoredSession>(&raw) {
        Ok(stored) => Some(Session::from(stored)),
        Err(err) => {
            warn!(error = %err, "discarding unreadable stored session");
            clear_session();
            None
        }
    }
}

pub(super) fn save_session(session: &Session) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(&session.to_stored()) {
        Ok(raw) => {
            if storage.set_item(STORAGE_KEY, &raw).is_err() {
                warn!("failed to persist session");
            }
        }
        Err(err) => warn!(error = %err, "failed to encode session"),
    }
}

pub(super) fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

pub(super) fn save_code_verifier(verifier: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(CODE_VERIFIER_KEY, verifier).is_err() {
            warn!("failed to persist PKCE verifier");
        }
    }
}

/// Removes and returns the pending verifier; each verifier backs one exchange.
pub(super) fn take_code_verifier() -> Option<String> {
    let storage = local_storage()?;
    let verifier = storage.get_item(CODE_VERIFIER_KEY).ok().flatten();
    let _ = storage.remove_item(CODE_VERIFIER_KEY);
    verifier.filter(|value| !value.is_empty())
}
