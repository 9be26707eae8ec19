//! Browser implementation of [`IdentityService`] against the GoTrue REST API.
//! It mirrors the hosted SDK's PKCE flow: a verifier is stored before every
//! magic-link or OAuth request and consumed by the code exchange, and the
//! resulting session is persisted in `localStorage` and refreshed on read when
//! close to expiry. Request bodies carry tokens and must never be logged.

use crate::{
    app_lib::{
        AppError,
        api::{post_json, post_json_ignore_body},
        config::AppConfig,
    },
    features::auth::{
        gotrue::{GoTrueApi, OtpBody, PkceGrantBody, RefreshGrantBody},
        pkce::PkcePair,
        service::{AuthListener, IdentityService, ListenerRegistry, Subscription},
        storage,
        types::{AuthEvent, OAuthRequest, OtpRequest, Session, TokenResponse},
    },
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{info, warn};

/// Sessions expiring within this many seconds are refreshed before use.
const REFRESH_MARGIN_SECS: i64 = 30;

pub struct BrowserIdentityClient {
    api: GoTrueApi,
    listeners: ListenerRegistry,
}

impl BrowserIdentityClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the identity URL or anon key is missing.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: GoTrueApi::new(config)?,
            listeners: ListenerRegistry::default(),
        })
    }

    async fn token_grant<B: Serialize>(&self, grant_type: &str, body: &B) -> Result<Session, AppError> {
        let url = self.api.token_url(grant_type)?;
        let response: TokenResponse = post_json(url.as_str(), body, &self.api.headers()).await?;
        Ok(Session::from_token_response(response, now_secs()))
    }

    fn store_and_notify(&self, session: &Session, event: AuthEvent) {
        storage::save_session(session);
        self.listeners.emit(event, Some(session));
    }
}

#[async_trait(?Send)]
impl IdentityService for BrowserIdentityClient {
    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        let Some(session) = storage::load_session() else {
            return Ok(None);
        };
        if !session.expires_within(now_secs(), REFRESH_MARGIN_SECS) {
            return Ok(Some(session));
        }

        let body = RefreshGrantBody {
            refresh_token: session.refresh_token.expose_secret(),
        };
        match self.token_grant("refresh_token", &body).await {
            Ok(refreshed) => {
                info!("session refreshed");
                self.store_and_notify(&refreshed, AuthEvent::TokenRefreshed);
                Ok(Some(refreshed))
            }
            // Only a refused refresh token ends the session; offline or 5xx
            // failures keep it stored for the next read.
            Err(err) if err.is_rejection() => {
                warn!(error_code = err.code().unwrap_or("none"), "session refresh rejected, signing out");
                storage::clear_session();
                self.listeners.emit(AuthEvent::SignedOut, None);
                Ok(None)
            }
            Err(err) => {
                warn!(error = %err, "session refresh failed, keeping stored session");
                Ok(None)
            }
        }
    }

    async fn sign_in_with_otp(&self, request: &OtpRequest) -> Result<(), AppError> {
        let pkce = PkcePair::generate();
        storage::save_code_verifier(&pkce.verifier);

        let url = self.api.otp_url(request.email_redirect_to.as_deref())?;
        let body = OtpBody::new(request, &pkce.challenge);
        post_json_ignore_body(url.as_str(), &body, &self.api.headers()).await
    }

    async fn sign_in_with_oauth(&self, request: &OAuthRequest) -> Result<(), AppError> {
        let pkce = PkcePair::generate();
        let url = self.api.authorize_url(request, &pkce.challenge)?;

        let window = web_sys::window()
            .ok_or_else(|| AppError::Config("No browser window available.".to_string()))?;
        storage::save_code_verifier(&pkce.verifier);
        window
            .location()
            .set_href(url.as_str())
            .map_err(|_| AppError::Config("Unable to redirect to the sign-in provider.".to_string()))
    }

    async fn exchange_code_for_session(&self, code: &str) -> Result<Session, AppError> {
        let verifier = storage::take_code_verifier().ok_or_else(|| AppError::Provider {
            code: Some("pkce_verifier_missing".to_string()),
            message: "Sign-in link was opened in a different browser or has already been used."
                .to_string(),
        })?;

        let body = PkceGrantBody {
            auth_code: code,
            code_verifier: &verifier,
        };
        let session = self.token_grant("pkce", &body).await?;
        self.store_and_notify(&session, AuthEvent::SignedIn);
        Ok(session)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}
