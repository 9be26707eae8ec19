//! Session, event and request types for the identity service. Sessions carry
//! bearer tokens, so token fields are wrapped in `SecretString` and the wire
//! types below deliberately do not implement `Debug`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-state change notifications emitted by the identity service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

impl AuthEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthEvent::SignedIn => "SIGNED_IN",
            AuthEvent::SignedOut => "SIGNED_OUT",
            AuthEvent::TokenRefreshed => "TOKEN_REFRESHED",
        }
    }
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Provider-issued proof of authentication. The views only care whether one
/// exists; the identity client persists and refreshes it.
#[derive(Clone, Debug)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub token_type: String,
    /// Unix timestamp (seconds) after which the access token is rejected.
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// Builds a session from a token grant, deriving `expires_at` from
    /// `expires_in` when the provider omits it.
    pub fn from_token_response(response: TokenResponse, now_secs: i64) -> Self {
        let expires_at = response.expires_at.or_else(|| {
            response
                .expires_in
                .map(|expires_in| now_secs.saturating_add(expires_in))
        });
        Self {
            access_token: SecretString::from(response.access_token),
            refresh_token: SecretString::from(response.refresh_token),
            token_type: response.token_type,
            expires_at,
            user: response.user,
        }
    }

    /// Whether the access token expires within `margin_secs` of `now_secs`.
    /// Sessions without an expiry never need a refresh.
    pub fn expires_within(&self, now_secs: i64, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at.saturating_sub(now_secs) <= margin_secs)
    }

    pub fn to_stored(&self) -> StoredSession {
        StoredSession {
            access_token: self.access_token.expose_secret().to_string(),
            refresh_token: self.refresh_token.expose_secret().to_string(),
            token_type: self.token_type.clone(),
            expires_at: self.expires_at,
            user: self.user.clone(),
        }
    }
}

/// Token grant returned by `/token` (pkce and refresh grants).
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Session shape persisted in `localStorage`.
#[derive(Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Self {
            access_token: SecretString::from(stored.access_token),
            refresh_token: SecretString::from(stored.refresh_token),
            token_type: stored.token_type,
            expires_at: stored.expires_at,
            user: stored.user,
        }
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// OAuth providers offered on the auth views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
}

/// Profile captured on signup and attached as user metadata to the magic-link
/// request. Never persisted locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationProfile {
    /// Sent as the request's own `email` field, not as metadata.
    #[serde(skip)]
    pub email: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "zipcode")]
    pub zip_code: Option<String>,
    pub role: Role,
}

/// One-time-code (magic link) request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpRequest {
    pub email: String,
    pub data: Option<RegistrationProfile>,
    pub email_redirect_to: Option<String>,
}

impl OtpRequest {
    pub fn login(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            data: None,
            email_redirect_to: None,
        }
    }

    pub fn signup(profile: RegistrationProfile, email_redirect_to: impl Into<String>) -> Self {
        Self {
            email: profile.email.clone(),
            data: Some(profile),
            email_redirect_to: Some(email_redirect_to.into()),
        }
    }
}

/// Redirect-based OAuth request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthRequest {
    pub provider: OAuthProvider,
    pub redirect_to: String,
    /// Extra provider query parameters appended to the authorize URL.
    pub query_params: Vec<(String, String)>,
}
