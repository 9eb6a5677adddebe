//! Verification of the administrator password.
//!
//! The configured secret is either a plaintext password or an Argon2 PHC
//! hash string (`$argon2id$...`). PHC strings are verified with Argon2, so
//! operators can keep the real password out of the environment.

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;

/// Prefix shared by every Argon2 variant's PHC string.
const ARGON2_PHC_PREFIX: &str = "$argon2";

/// Check a login attempt against the configured administrator secret.
pub fn verify_admin_password(candidate: &str, secret: &str) -> bool {
    if secret.starts_with(ARGON2_PHC_PREFIX) {
        return verify_hashed(candidate, secret);
    }
    constant_time_eq(candidate.as_bytes(), secret.as_bytes())
}

fn verify_hashed(candidate: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(error = %e, "Configured admin password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

/// Byte comparison whose running time does not depend on where the inputs
/// first differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
