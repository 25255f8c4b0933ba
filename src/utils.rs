use axum_extra::extract::cookie::Key;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Length of the OAuth state token. Long enough to be unguessable.
const STATE_TOKEN_LEN: usize = 48;

/// Generates a cryptographically random state token for an authorization
/// request. Doubles as the pending-authorization key, so it must be unique
/// among concurrently pending logins.
pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Stretches the configured secret into the 64 bytes a cookie signing key
/// needs. Deterministic, so restarts keep existing sessions valid.
pub fn derive_cookie_key(secret: &str) -> Key {
    let first = Sha256::digest(secret.as_bytes());
    let second = Sha256::digest(first.as_slice());
    let mut master = [0u8; 64];
    master[..32].copy_from_slice(first.as_slice());
    master[32..].copy_from_slice(second.as_slice());
    Key::from(&master)
}
