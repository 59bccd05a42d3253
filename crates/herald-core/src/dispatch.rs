//! Emission gate and stream routing.

use std::cell::Cell;
use std::io;

use crate::level::LevelFilter;
use crate::stream::{StreamSet, Target};
use crate::types::{LoggerType, STDERR_TYPE_NAMES};

/// Whether a call to `ty` produces output at all.
pub fn should_emit(enabled: bool, filter: LevelFilter, ty: &LoggerType) -> bool {
    enabled && filter.allows(ty.log_level)
}

/// Targets for one call: the type's own streams, else the instance
/// default, else stderr for error-like types and stdout for the rest.
pub fn resolve_targets(name: &str, ty: &LoggerType, default: Option<&StreamSet>) -> Vec<Target> {
    if let Some(stream) = ty.stream.as_ref().filter(|s| !s.is_empty()) {
        return stream.targets().to_vec();
    }
    if let Some(stream) = default.filter(|s| !s.is_empty()) {
        return stream.targets().to_vec();
    }
    if STDERR_TYPE_NAMES.contains(&name) {
        vec![Target::Stderr]
    } else {
        vec![Target::Stdout]
    }
}

/// Writes rendered lines, overwriting the previous line in interactive
/// mode.
#[derive(Debug, Default)]
pub struct Dispatcher {
    interactive: bool,
    previous_interactive: Cell<bool>,
}

impl Dispatcher {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            previous_interactive: Cell::new(false),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Write every line to every target, in order. Stops at the first
    /// write error.
    pub fn write(&self, targets: &[Target], lines: &[String]) -> io::Result<()> {
        for line in lines {
            let erase = self.interactive && self.previous_interactive.get();
            for target in targets {
                target.write_line(line, erase)?;
            }
            self.previous_interactive.set(self.interactive);
        }
        Ok(())
    }
}

impl Clone for Dispatcher {
    /// A copy starts on a fresh line.
    fn clone(&self) -> Self {
        Dispatcher::new(self.interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use crate::types::TypeRegistry;

    #[test]
    fn test_gate() {
        let registry = TypeRegistry::with_defaults();
        let debug = registry.get("debug").unwrap();
        let error = registry.get("error").unwrap();
        let info_filter = LevelFilter::Level(LogLevel::Info);

        assert!(!should_emit(true, info_filter, debug));
        assert!(should_emit(true, info_filter, error));
        assert!(!should_emit(false, info_filter, error));
        assert!(!should_emit(true, LevelFilter::Off, error));
    }

    #[test]
    fn test_routing_precedence() {
        let registry = TypeRegistry::with_defaults();
        let info = registry.get("info").unwrap();
        let error = registry.get("error").unwrap();

        assert!(matches!(resolve_targets("info", info, None)[..], [Target::Stdout]));
        assert!(matches!(resolve_targets("error", error, None)[..], [Target::Stderr]));

        let (custom, _) = Target::buffer();
        let default = StreamSet::from(custom.clone());
        assert!(matches!(
            resolve_targets("error", error, Some(&default))[..],
            [Target::Custom(_)]
        ));

        let dedicated = info.clone().with_stream(vec![Target::Stderr, custom]);
        let targets = resolve_targets("info", &dedicated, Some(&StreamSet::from(Target::Stdout)));
        assert_eq!(targets.len(), 2);
        assert!(matches!(targets[0], Target::Stderr));
    }

    #[test]
    fn test_interactive_overwrites_previous_line() {
        let (target, buffer) = Target::buffer();
        let dispatcher = Dispatcher::new(true);
        dispatcher
            .write(&[target.clone()], &["one".to_string()])
            .unwrap();
        dispatcher.write(&[target], &["two".to_string()]).unwrap();
        assert_eq!(buffer.contents(), "one\n\x1b[1A\x1b[2Ktwo\n");
    }

    #[test]
    fn test_non_interactive_appends() {
        let (target, buffer) = Target::buffer();
        let dispatcher = Dispatcher::new(false);
        dispatcher
            .write(&[target], &["one".to_string(), "two".to_string()])
            .unwrap();
        assert_eq!(buffer.contents(), "one\ntwo\n");
    }
}
