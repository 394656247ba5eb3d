//! Utility functions.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of the random part of generated ids.
pub const ID_SUFFIX_LEN: usize = 16;

/// Generate an opaque id such as `album-Xk2...` (prefix, dash, 16 random chars).
pub fn generate_id(prefix: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{prefix}-{suffix}")
}
