//! Locale-independent collation for human-facing strings.
//!
//! Names and institutions are compared the way a reader expects rather than
//! by raw code points: letters compare without regard to case or accents
//! first, then accents, then case (lowercase first). The ordering never
//! depends on the process locale, so results are identical across machines.

use deunicode::deunicode;
use std::cmp::Ordering;

/// Compare two strings with a three-level collation
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.chars().map(swap_case).cmp(b.chars().map(swap_case)))
}

/// Case- and accent-folded form of `s`
fn primary_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Swap ASCII-style case so that lowercase sorts before uppercase
fn swap_case(c: char) -> char {
    if c.is_lowercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else if c.is_uppercase() {
        c.to_lowercase().next().unwrap_or(c)
    } else {
        c
    }
}
