//! Match code generation.
//!
//! Match ids are 6-character strings over Crockford's Base32 alphabet, short
//! enough to read out loud when inviting a friend.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const MATCH_CODE_LEN: usize = 6;

/// Random match code from the thread RNG.
///
/// Codes are not guaranteed unique; the registry retries on collision.
pub fn generate_match_code() -> String {
    let mut rng = rand::rng();
    (0..MATCH_CODE_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Normalise a user-typed code: trimmed, upper-case.
pub fn normalize_match_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
