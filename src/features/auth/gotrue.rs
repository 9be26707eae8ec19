//! Endpoints, headers, and request bodies of the GoTrue auth API. The browser
//! client sends these; nothing here touches the network or browser storage.
//! Bodies carry tokens and verifiers, so none of them implement `Debug`.

use crate::{
    app_lib::{
        AppError,
        config::{AppConfig, CLIENT_INFO},
    },
    features::auth::{
        pkce::CHALLENGE_METHOD,
        types::{OAuthRequest, OtpRequest, RegistrationProfile},
    },
};
use serde::Serialize;
use url::Url;

#[derive(Serialize)]
pub struct OtpBody<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a RegistrationProfile>,
    create_user: bool,
    code_challenge: &'a str,
    code_challenge_method: &'static str,
}

impl<'a> OtpBody<'a> {
    pub fn new(request: &'a OtpRequest, code_challenge: &'a str) -> Self {
        Self {
            email: &request.email,
            data: request.data.as_ref(),
            create_user: true,
            code_challenge,
            code_challenge_method: CHALLENGE_METHOD,
        }
    }
}

#[derive(Serialize)]
pub struct PkceGrantBody<'a> {
    pub auth_code: &'a str,
    pub code_verifier: &'a str,
}

#[derive(Serialize)]
pub struct RefreshGrantBody<'a> {
    pub refresh_token: &'a str,
}

/// Base URL and anon key of one identity project.
pub struct GoTrueApi {
    auth_url: String,
    anon_key: String,
}

impl GoTrueApi {
    /// # Errors
    /// Returns `AppError::Config` when the identity URL or anon key is missing.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            auth_url: config.auth_base_url(),
            anon_key: config.identity_anon_key.clone(),
        })
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("apikey".to_string(), self.anon_key.clone()),
            ("Authorization".to_string(), format!("Bearer {}", self.anon_key)),
            ("X-Client-Info".to_string(), CLIENT_INFO.to_string()),
        ]
    }

    /// `POST /otp`, with `redirect_to` when the link should land somewhere specific.
    pub fn otp_url(&self, redirect_to: Option<&str>) -> Result<Url, AppError> {
        let query: Vec<(&str, &str)> = redirect_to
            .map(|redirect_to| vec![("redirect_to", redirect_to)])
            .unwrap_or_default();
        self.endpoint("otp", &query)
    }

    /// `GET /authorize` for a redirect-based OAuth flow.
    pub fn authorize_url(&self, request: &OAuthRequest, code_challenge: &str) -> Result<Url, AppError> {
        let mut url = self.endpoint(
            "authorize",
            &[
                ("provider", request.provider.as_str()),
                ("redirect_to", request.redirect_to.as_str()),
                ("code_challenge", code_challenge),
                ("code_challenge_method", CHALLENGE_METHOD),
            ],
        )?;
        url.query_pairs_mut().extend_pairs(
            request
                .query_params
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        Ok(url)
    }

    /// `POST /token` for the given grant (`pkce` or `refresh_token`).
    pub fn token_url(&self, grant_type: &str) -> Result<Url, AppError> {
        self.endpoint("token", &[("grant_type", grant_type)])
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("{}/{path}", self.auth_url))
            .map_err(|err| AppError::Config(format!("Invalid identity URL: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}
