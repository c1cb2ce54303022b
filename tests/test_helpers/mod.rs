//! Scoped environment variables for configuration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that sets `TASKBOARD_*` variables and restores them on drop.
///
/// Every variable with the prefix is cleared first so values from the
/// developer's shell cannot leak into a test.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Replaces the `TASKBOARD_*` environment with `vars`.
    pub fn taskboard(vars: &[(&str, &str)]) -> Self {
        let lock = env_lock();
        let stale: Vec<OsString> = env::vars_os()
            .map(|(key, _)| key)
            .filter(|key| key.to_string_lossy().starts_with("TASKBOARD_"))
            .collect();
        let mut previous = Vec::with_capacity(stale.len() + vars.len());

        for key in stale {
            previous.push((key.clone(), env::var_os(&key)));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                env::remove_var(&key);
            }
        }
        for (key, value) in vars {
            let name = OsString::from(*key);
            previous.push((name.clone(), env::var_os(&name)));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                env::set_var(&name, value);
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
