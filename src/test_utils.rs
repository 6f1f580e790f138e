//! Shared test utilities for unit tests
//!
//! Integration tests in tests/ compile as separate crates and keep their
//! own copy in tests/common/mod.rs.

use once_cell::sync::Lazy;
use std::env;

/// Variables that change how cstatus parses options or renders
pub const CSTATUS_ENV_VARS: &[&str] = &[
    "CSTATUS_WIDGETS",
    "CSTATUS_BLOCK_MINUTES",
    "CSTATUS_CONTEXT_WINDOW",
    "CSTATUS_LOG",
    "NO_COLOR",
];

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Lazy<tokio::sync::Mutex<()>> = Lazy::new(|| tokio::sync::Mutex::new(()));

/// RAII guard that restores environment variables on drop, even on panic
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// A guard with every cstatus variable unset
    pub fn clean() -> Self {
        let mut guard = Self::new();
        for key in CSTATUS_ENV_VARS {
            guard.remove(key);
        }
        guard
    }

    /// Set a variable, remembering its original value
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        // env::set_var is unsafe since edition 2024; callers hold ENV_MUTEX
        unsafe {
            env::set_var(key, value);
        }
    }

    /// Remove a variable, remembering its original value
    pub fn remove(&mut self, key: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

impl Default for EnvVarGuard {
    fn default() -> Self {
        Self::new()
    }
}
