//! Constant-time comparisons
//!
//! Used wherever a secret-derived value is compared against attacker input,
//! so that the comparison time does not leak how many leading bytes match.

use subtle::ConstantTimeEq;

/// Constant-time MAC tag comparison
pub fn constant_time_tag_compare(tag1: &[u8], tag2: &[u8]) -> bool {
    if tag1.len() != tag2.len() {
        return false;
    }

    tag1.ct_eq(tag2).into()
}

/// Constant-time string comparison (for digests)
pub fn constant_time_str_compare(str1: &str, str2: &str) -> bool {
    constant_time_tag_compare(str1.as_bytes(), str2.as_bytes())
}
