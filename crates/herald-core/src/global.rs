//! Process-scoped configuration layer.
//!
//! Sits between the built-in defaults and each logger's own layer. Loggers
//! take a snapshot when they are constructed; later changes only affect
//! loggers built afterwards. Intended to be set once at startup.

use parking_lot::{const_rwlock, RwLock};

use crate::config::InstanceConfig;

static GLOBAL: RwLock<InstanceConfig> = const_rwlock(InstanceConfig::EMPTY);

/// Replace the global layer.
pub fn init(config: InstanceConfig) {
    *GLOBAL.write() = config;
    tracing::debug!(?config, "global config initialized");
}

/// Merge `config` onto the current global layer.
pub fn configure(config: &InstanceConfig) {
    let mut global = GLOBAL.write();
    *global = global.overlay(config);
    tracing::debug!(config = ?*global, "global config updated");
}

/// Clear the global layer.
pub fn reset() {
    *GLOBAL.write() = InstanceConfig::EMPTY;
}

/// Current global layer.
pub fn snapshot() -> InstanceConfig {
    *GLOBAL.read()
}
