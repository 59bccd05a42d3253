//! Severity levels and the instance threshold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HeraldError;

/// Fixed, ordered severity set: `debug < info < timer < warn < error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Timer,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Timer => "timer",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "timer" => Ok(LogLevel::Timer),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(HeraldError::InvalidLogLevel(s.to_string())),
        }
    }
}

/// An instance's log-level threshold.
///
/// `Off` suppresses every call, including types that declare no level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LevelFilter {
    Off,
    Level(LogLevel),
}

impl LevelFilter {
    /// Everything passes.
    pub const ALL: LevelFilter = LevelFilter::Level(LogLevel::Debug);

    /// Whether a type declaring `level` may emit under this threshold.
    pub fn allows(self, level: Option<LogLevel>) -> bool {
        match (self, level) {
            (LevelFilter::Off, _) => false,
            (LevelFilter::Level(_), None) => true,
            (LevelFilter::Level(threshold), Some(level)) => level >= threshold,
        }
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        LevelFilter::ALL
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::Level(level)
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelFilter::Off => f.write_str("off"),
            LevelFilter::Level(level) => level.fmt(f),
        }
    }
}

impl TryFrom<String> for LevelFilter {
    type Error = HeraldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LevelFilter> for String {
    fn from(filter: LevelFilter) -> Self {
        filter.to_string()
    }
}

impl FromStr for LevelFilter {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("off") {
            return Ok(LevelFilter::Off);
        }
        s.parse().map(LevelFilter::Level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Timer);
        assert!(LogLevel::Timer < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_filter_allows() {
        let warn = LevelFilter::Level(LogLevel::Warn);
        assert!(!warn.allows(Some(LogLevel::Info)));
        assert!(!warn.allows(Some(LogLevel::Timer)));
        assert!(warn.allows(Some(LogLevel::Warn)));
        assert!(warn.allows(Some(LogLevel::Error)));
        assert!(warn.allows(None));
    }

    #[test]
    fn test_off_suppresses_everything() {
        assert!(!LevelFilter::Off.allows(None));
        assert!(!LevelFilter::Off.allows(Some(LogLevel::Error)));
    }

    #[test]
    fn test_parse() {
        assert_eq!("Timer".parse::<LogLevel>().unwrap(), LogLevel::Timer);
        assert_eq!("off".parse::<LevelFilter>().unwrap(), LevelFilter::Off);
        assert_eq!(
            "error".parse::<LevelFilter>().unwrap(),
            LevelFilter::Level(LogLevel::Error)
        );
        assert!(matches!(
            "loud".parse::<LogLevel>(),
            Err(HeraldError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_filter_serde() {
        let off: LevelFilter = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(off, LevelFilter::Off);
        let warn: LevelFilter = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(warn, LevelFilter::Level(LogLevel::Warn));
        assert_eq!(serde_json::to_string(&LevelFilter::Off).unwrap(), "\"off\"");
    }
}
