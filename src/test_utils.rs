//! Helpers shared by unit and integration tests.

use std::ffi::OsStr;

use crate::environment;

/// Remove ANSI escape sequences from a string.
///
/// # Examples
///
/// ```
/// use orgissues::test_utils::strip_ansi_codes;
/// let coloured = "\x1b[1mbold\x1b[0m";
/// assert_eq!(strip_ansi_codes(coloured), "bold");
/// ```
#[must_use]
pub fn strip_ansi_codes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && skip_ansi_sequence(&mut chars) {
            continue;
        }
        out.push(ch);
    }
    out
}

fn skip_ansi_sequence(chars: &mut impl Iterator<Item = char>) -> bool {
    if !matches!(chars.next(), Some('[')) {
        return false;
    }
    chars.any(|c| ('@'..='~').contains(&c))
}

/// Set an environment variable under the process-wide lock.
pub fn set_var<K: AsRef<OsStr>, V: AsRef<OsStr>>(key: K, value: V) {
    environment::assign(key, Some(value.as_ref()));
}

/// Remove an environment variable under the process-wide lock.
pub fn remove_var<K: AsRef<OsStr>>(key: K) {
    environment::assign(key, None);
}
