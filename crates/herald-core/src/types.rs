//! Logger types and the per-instance type registry.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::level::LogLevel;
use crate::stream::StreamSet;
use crate::style::Color;

/// One message kind: how it looks, how severe it is, where it goes.
#[derive(Debug, Clone, Default)]
pub struct LoggerType {
    /// Glyph shown before the label. Empty means no badge segment.
    pub badge: String,
    pub color: Option<Color>,
    /// Display label. Empty means no label segment.
    pub label: String,
    /// Minimum severity; `None` is never filtered by level.
    pub log_level: Option<LogLevel>,
    /// Dedicated targets, taking precedence over the instance default.
    pub stream: Option<StreamSet>,
}

impl LoggerType {
    pub fn new(badge: &str, color: Color, label: &str, log_level: LogLevel) -> Self {
        Self {
            badge: badge.to_string(),
            color: Some(color),
            label: label.to_string(),
            log_level: Some(log_level),
            stream: None,
        }
    }

    pub fn with_stream(mut self, stream: impl Into<StreamSet>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Apply the fields a patch sets.
    pub fn patched(&self, patch: &LoggerTypePatch) -> LoggerType {
        LoggerType {
            badge: patch.badge.clone().unwrap_or_else(|| self.badge.clone()),
            color: patch.color.or(self.color),
            label: patch.label.clone().unwrap_or_else(|| self.label.clone()),
            log_level: patch.log_level.or(self.log_level),
            stream: patch.stream.clone().or_else(|| self.stream.clone()),
        }
    }
}

/// Partial type definition, merged field-by-field onto an existing type of
/// the same name (or onto an empty type for a new name).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerTypePatch {
    pub badge: Option<String>,
    pub color: Option<Color>,
    pub label: Option<String>,
    pub log_level: Option<LogLevel>,
    #[serde(skip)]
    pub stream: Option<StreamSet>,
}

impl From<LoggerType> for LoggerTypePatch {
    fn from(ty: LoggerType) -> Self {
        LoggerTypePatch {
            badge: Some(ty.badge),
            color: ty.color,
            label: Some(ty.label),
            log_level: ty.log_level,
            stream: ty.stream,
        }
    }
}

/// Names of the built-in types, in registration order.
pub const DEFAULT_TYPE_NAMES: [&str; 17] = [
    "await", "complete", "debug", "error", "fatal", "fav", "info", "log", "note", "pause",
    "pending", "star", "start", "success", "wait", "warn", "watch",
];

/// Types whose lines go to stderr when no stream is configured.
pub const STDERR_TYPE_NAMES: [&str; 3] = ["error", "fatal", "warn"];

fn builtin(name: &str) -> LoggerType {
    use Color::*;
    use LogLevel::*;

    match name {
        "await" => LoggerType::new("…", Blue, "awaiting", Info),
        "complete" => LoggerType::new("☒", Cyan, "complete", Info),
        "debug" => LoggerType::new("⬤", Red, "debug", Debug),
        "error" => LoggerType::new("✖", Red, "error", Error),
        "fatal" => LoggerType::new("✖", Red, "fatal", Error),
        "fav" => LoggerType::new("❤", Magenta, "favorite", Info),
        "info" => LoggerType::new("ℹ", Blue, "info", Info),
        "note" => LoggerType::new("●", Blue, "note", Info),
        "pause" => LoggerType::new("■", Yellow, "pause", Info),
        "pending" => LoggerType::new("☐", Magenta, "pending", Info),
        "star" => LoggerType::new("★", Yellow, "star", Info),
        "start" => LoggerType::new("▶", Green, "start", Info),
        "success" => LoggerType::new("✔", Green, "success", Info),
        "wait" => LoggerType::new("…", Blue, "waiting", Info),
        "warn" => LoggerType::new("⚠", Yellow, "warning", Warn),
        "watch" => LoggerType::new("…", Yellow, "watching", Info),
        // "log" carries no decoration at all
        _ => LoggerType {
            log_level: Some(Info),
            ..LoggerType::default()
        },
    }
}

/// Name → type mapping owned by one logger.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: BTreeMap<String, LoggerType>,
}

impl TypeRegistry {
    /// The built-in set.
    pub fn with_defaults() -> Self {
        let types = DEFAULT_TYPE_NAMES
            .iter()
            .map(|name| (name.to_string(), builtin(name)))
            .collect();
        Self { types }
    }

    /// No types at all.
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register or replace a type wholesale.
    pub fn insert(&mut self, name: impl Into<String>, ty: LoggerType) {
        self.types.insert(name.into(), ty);
    }

    /// Merge a patch onto the type called `name`, creating it if needed.
    pub fn patch(&mut self, name: &str, patch: &LoggerTypePatch) {
        let merged = match self.types.get(name) {
            Some(existing) => existing.patched(patch),
            None => LoggerType::default().patched(patch),
        };
        self.types.insert(name.to_string(), merged);
    }

    pub fn get(&self, name: &str) -> Option<&LoggerType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LoggerType)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
