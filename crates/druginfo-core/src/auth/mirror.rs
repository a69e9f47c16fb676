//! Token mirror: a second home for the session token outside the manager
//!
//! The server mirrors into the `EDB_TOKEN` process variable so a token
//! obtained once survives manager re-creation and can be seeded externally.

use parking_lot::Mutex;

use crate::config::ENV_TOKEN;

/// Read/write slot for a bearer token
pub trait TokenMirror: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Mirrors into a process environment variable (default `EDB_TOKEN`)
#[derive(Debug, Clone)]
pub struct EnvTokenMirror {
    var: String,
}

impl EnvTokenMirror {
    pub fn new() -> Self {
        Self::with_var(ENV_TOKEN)
    }

    /// Use a different variable name
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvTokenMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenMirror for EnvTokenMirror {
    fn get(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|v| !v.is_empty())
    }

    fn set(&self, token: &str) {
        std::env::set_var(&self.var, token);
    }

    fn clear(&self) {
        std::env::remove_var(&self.var);
    }
}

/// In-process mirror for tests and embedders that must not touch the environment
#[derive(Debug, Default)]
pub struct MemoryTokenMirror {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already mirrored
    pub fn seeded(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenMirror for MemoryTokenMirror {
    fn get(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    fn set(&self, token: &str) {
        *self.slot.lock() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock() = None;
    }
}
