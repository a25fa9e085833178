//! Process-wide environment access.
//!
//! Reads and writes go through one mutex so tests that mutate variables do
//! not race with the token and endpoint lookups performed at runtime.

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn lock() -> MutexGuard<'static, ()> {
    // A poisoned lock only means another test panicked mid-update.
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Read an environment variable while holding the global lock.
///
/// # Errors
///
/// Returns [`env::VarError`] when the variable is unset or not valid Unicode.
pub fn var<K: AsRef<OsStr>>(key: K) -> Result<String, env::VarError> {
    let _guard = lock();
    env::var(key)
}

/// Return the first non-empty value among `keys`, in order.
#[must_use]
pub fn first_non_empty(keys: &[&str]) -> Option<String> {
    let _guard = lock();
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
}

/// Set (`Some`) or remove (`None`) an environment variable under the lock.
pub fn assign<K: AsRef<OsStr>>(key: K, value: Option<&OsStr>) {
    let _guard = lock();
    match value {
        // SAFETY: the mutex serialises access to the unsynchronised std env calls.
        Some(v) => unsafe { env::set_var(key, v) },
        // SAFETY: as above.
        None => unsafe { env::remove_var(key) },
    }
}

/// Run `op` with `pairs` applied, restoring the previous values afterwards.
///
/// The lock is released while `op` runs so it may call [`var`] itself.
pub fn with_vars<T, F>(pairs: &[(&str, Option<&str>)], op: F) -> T
where
    F: FnOnce() -> T,
{
    let saved: Vec<(OsString, Option<OsString>)> = pairs
        .iter()
        .map(|(key, _)| {
            let _guard = lock();
            (OsString::from(key), env::var_os(key))
        })
        .collect();
    for (key, value) in pairs {
        assign(key, value.map(OsStr::new));
    }
    let out = op();
    for (key, value) in &saved {
        assign(key, value.as_deref());
    }
    out
}
