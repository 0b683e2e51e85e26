//! Numeric code generation

use rand::{rngs::OsRng, Rng};

/// Longest code representable in a `u64` range
pub const MAX_SUPPORTED_LENGTH: usize = 19;

/// Generate a numeric code of exactly `length` digits without a leading zero.
///
/// The value is drawn uniformly from `[10^(length-1), 10^length - 1]` using
/// the OS-provided CSPRNG. `length` is clamped to `1..=MAX_SUPPORTED_LENGTH`;
/// configured lengths are checked by `OtpConfig::validate` before use.
pub fn generate_numeric_code(length: usize) -> String {
    let length = length.clamp(1, MAX_SUPPORTED_LENGTH) as u32;
    let lower = 10u64.pow(length - 1);
    let upper = 10u64.pow(length) - 1;
    OsRng.gen_range(lower..=upper).to_string()
}
