//! Confirmation code derivation for attendee registrations.
//!
//! # Responsibility
//! - Map an email address to a short, stable display label.
//!
//! # Invariants
//! - Same email always yields the same code (no salt, no randomness).
//! - Codes are exactly `CONFIRMATION_CODE_LEN` lowercase hex characters.
//! - The code is a low-entropy label, not a secret; it is guessable from the
//!   email and must not be used for authorization.

use sha2::{Digest, Sha256};

/// Number of leading hex digits of the SHA-256 digest kept as the code.
pub const CONFIRMATION_CODE_LEN: usize = 7;

/// Derives the confirmation code for `email`.
///
/// Hashes the UTF-8 bytes of `email` with SHA-256, renders the digest as
/// lowercase hex and keeps the first seven characters.
pub fn generate_code(email: &str) -> String {
    let digest = Sha256::digest(email.as_bytes());
    let mut code = format!("{digest:x}");
    code.truncate(CONFIRMATION_CODE_LEN);
    code
}
