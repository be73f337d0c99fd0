//! Short code generation.
//!
//! Codes are drawn symbol by symbol, uniformly and independently, from the
//! 62-symbol alphanumeric alphabet. Only cryptographically secure generators
//! are accepted: predictable codes would let anyone enumerate other users'
//! links.

use rand::distr::Alphanumeric;
use rand::{CryptoRng, Rng};

/// Default number of symbols in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Number of distinct symbols a code is drawn from (`A-Z`, `a-z`, `0-9`).
pub const ALPHABET_SIZE: usize = 62;

/// Codes that collide with fixed routes and must never be allocated.
///
/// `GET /health` would shadow a mapping stored under `health`.
pub const RESERVED_CODES: &[&str] = &["health", "shorten"];

/// Generates a random code of `length` symbols using the thread-local CSPRNG.
///
/// `rand::rng()` is a ChaCha-based generator periodically reseeded from the
/// operating system, so it satisfies [`CryptoRng`].
pub fn generate_code(length: usize) -> String {
    generate_code_with(&mut rand::rng(), length)
}

/// Generates a random code of `length` symbols from the given generator.
pub fn generate_code_with<R>(rng: &mut R, length: usize) -> String
where
    R: Rng + CryptoRng,
{
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Returns true if `code` could have been produced by [`generate_code`].
///
/// Used to short-circuit lookups for paths that can never match a mapping.
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if `code` is taken by a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
