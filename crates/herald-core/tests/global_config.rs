//! Global configuration layer
//!
//! The global layer is process-wide, so every test here holds `LOCK` and
//! resets the layer before it starts.

use std::sync::{Arc, Mutex, MutexGuard};

use herald_core::{
    configure, global, ConfigField, InstanceConfig, Logger, LoggerOptions, PlainPainter,
    SharedBuffer, Target,
};

static LOCK: Mutex<()> = Mutex::new(());

fn isolated() -> MutexGuard<'static, ()> {
    let guard = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    global::reset();
    guard
}

fn logger_with(config: InstanceConfig) -> (Logger, SharedBuffer) {
    let (target, buffer) = Target::buffer();
    let logger = Logger::with_options(
        LoggerOptions::new()
            .config(config)
            .stream(target)
            .painter(Arc::new(PlainPainter)),
    );
    (logger, buffer)
}

#[test]
fn test_global_layer_applies_to_new_loggers() {
    let _guard = isolated();
    configure(&InstanceConfig::EMPTY.with(ConfigField::UppercaseLabel, true));

    let (logger, buffer) = logger_with(InstanceConfig::EMPTY);
    logger.info("x");
    assert_eq!(buffer.lines(), vec!["ℹ INFO x"]);
}

#[test]
fn test_instance_beats_global() {
    let _guard = isolated();
    configure(&InstanceConfig::EMPTY.with(ConfigField::DisplayBadge, false));

    let (logger, buffer) =
        logger_with(InstanceConfig::EMPTY.with(ConfigField::DisplayBadge, true));
    logger.info("x");
    assert_eq!(buffer.lines(), vec!["ℹ info x"]);
}

#[test]
fn test_global_read_once_at_construction() {
    let _guard = isolated();
    let (logger, buffer) = logger_with(InstanceConfig::EMPTY);

    configure(&InstanceConfig::EMPTY.with(ConfigField::DisplayLabel, false));
    logger.info("x");
    assert_eq!(buffer.lines(), vec!["ℹ info x"]);
}

#[test]
fn test_configure_merges_and_init_replaces() {
    let _guard = isolated();
    configure(&InstanceConfig::EMPTY.with(ConfigField::DisplayDate, true));
    configure(&InstanceConfig::EMPTY.with(ConfigField::DisplayScope, false));

    let snapshot = global::snapshot();
    assert_eq!(snapshot.display_date, Some(true));
    assert_eq!(snapshot.display_scope, Some(false));

    global::init(InstanceConfig::EMPTY.with(ConfigField::DisplayFilename, true));
    let snapshot = global::snapshot();
    assert_eq!(snapshot.display_date, None);
    assert_eq!(snapshot.display_filename, Some(true));

    global::reset();
    assert!(global::snapshot().is_empty());
}
