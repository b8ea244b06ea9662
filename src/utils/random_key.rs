//! Random key generation.
//!
//! Keys are raw CSPRNG bytes encoded as URL-safe base64 without padding.
//! The byte buffer is sized so the encoded form is at least as long as the
//! requested display length; no upper bound is enforced here.

use base64::Engine as _;

/// Generates a random key of at least `length` characters.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_key(length: usize) -> String {
    // 4 base64 chars encode 3 bytes, so ceil(3n/4) bytes cover n chars.
    let byte_len = (length * 3).div_ceil(4);
    let mut buffer = vec![0u8; byte_len];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
