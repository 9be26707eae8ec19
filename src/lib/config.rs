//! Build-time configuration for the identity service with an optional runtime
//! override. The runtime config is read from `window.GRANDESTAY_CONFIG` (if
//! present) so static deployments can point at another project without
//! rebuilding. The anon key is a public client key; do not store secrets here.

use super::errors::AppError;

/// `localStorage` key holding the persisted session.
pub const STORAGE_KEY: &str = "auth";
/// `localStorage` key holding the pending PKCE verifier.
pub const CODE_VERIFIER_KEY: &str = "auth-code-verifier";
/// Value of the `X-Client-Info` header sent with every identity request.
pub const CLIENT_INFO: &str = "bansimplified";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub identity_url: String,
    pub identity_anon_key: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let identity_url = option_env!("GRANDESTAY_IDENTITY_URL").unwrap_or("");
        let identity_anon_key = option_env!("GRANDESTAY_IDENTITY_ANON_KEY").unwrap_or("");

        let mut config = Self {
            identity_url: identity_url.trim().to_string(),
            identity_anon_key: identity_anon_key.trim().to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Rejects a config the identity client cannot work with.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the base URL or anon key is missing, or the
    /// base URL is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.identity_url.is_empty() {
            return Err(AppError::Config(
                "GRANDESTAY_IDENTITY_URL is not set.".to_string(),
            ));
        }
        if self.identity_anon_key.is_empty() {
            return Err(AppError::Config(
                "GRANDESTAY_IDENTITY_ANON_KEY is not set.".to_string(),
            ));
        }
        match url::Url::parse(&self.identity_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(AppError::Config(format!(
                "GRANDESTAY_IDENTITY_URL is not a valid http(s) URL: {}",
                self.identity_url
            ))),
        }
    }

    /// Base URL of the GoTrue auth API, e.g. `https://xyz.supabase.co/auth/v1`.
    pub fn auth_base_url(&self) -> String {
        format!("{}/auth/v1", self.identity_url.trim_end_matches('/'))
    }
}

#[derive(Default)]
struct RuntimeConfig {
    identity_url: Option<String>,
    identity_anon_key: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.identity_url {
        config.identity_url = value;
    }
    if let Some(value) = runtime.identity_anon_key {
        config.identity_anon_key = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("GRANDESTAY_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        identity_url: read_runtime_value(&object, "identity_url"),
        identity_anon_key: read_runtime_value(&object, "identity_anon_key"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
