//! PKCE (RFC 7636) verifier and S256 challenge generation for the magic-link and
//! OAuth flows. The verifier stays in browser storage until the code exchange;
//! only the challenge leaves the page.

use base64::Engine;
use rand::{Rng, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Verifier length in characters (RFC 7636 allows 43 to 128).
pub const VERIFIER_LEN: usize = 56;
/// Challenge method understood by the identity service.
pub const CHALLENGE_METHOD: &str = "s256";

const UNRESERVED: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    pub fn generate() -> Self {
        Self::from_verifier(generate_verifier())
    }

    pub fn from_verifier(verifier: String) -> Self {
        let challenge = challenge_for(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// Random verifier drawn from the RFC 7636 unreserved character set.
pub fn generate_verifier() -> String {
    let mut rng = OsRng;
    (0..VERIFIER_LEN)
        .map(|_| char::from(UNRESERVED[rng.gen_range(0..UNRESERVED.len())]))
        .collect()
}

/// `BASE64URL-ENCODE(SHA256(ASCII(verifier)))` without padding.
pub fn challenge_for(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
}
