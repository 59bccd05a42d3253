//! Message arguments and their textual form.
//!
//! Strings render verbatim. Structured values render deterministically:
//! objects list their keys sorted, nested strings are single-quoted, and
//! errors render their display text followed by each source in the chain.

use std::error::Error;
use std::fmt;

use serde_json::Value;

/// One argument passed to a logging call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Value(Value),
    Error(String),
}

impl Arg {
    /// Capture an error together with its source chain.
    pub fn error(err: &(dyn Error + 'static)) -> Self {
        let mut text = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        Arg::Error(text)
    }

    /// Capture any `Debug` value as text.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Arg::Text(format!("{value:?}"))
    }

    /// Capture any serializable value structurally. Falls back to `null`
    /// when the value cannot be represented.
    pub fn structured<T: serde::Serialize + ?Sized>(value: &T) -> Self {
        Arg::Value(serde_json::to_value(value).unwrap_or(Value::Null))
    }

    /// The text this argument renders as.
    pub fn render(&self) -> String {
        match self {
            Arg::Text(text) | Arg::Error(text) => text.clone(),
            Arg::Value(Value::String(text)) => text.clone(),
            Arg::Value(value) => inspect(value),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Text(text.to_string())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Text(text)
    }
}

impl From<&String> for Arg {
    fn from(text: &String) -> Self {
        Arg::Text(text.clone())
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Value(Value::Bool(value))
    }
}

macro_rules! arg_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Value(Value::from(value))
                }
            }
        )*
    };
}

arg_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// JSON has no NaN or infinity, so non-finite floats render as their text.
macro_rules! arg_from_float {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    if value.is_finite() {
                        Arg::Value(Value::from(value))
                    } else {
                        Arg::Text(value.to_string())
                    }
                }
            }
        )*
    };
}

arg_from_float!(f32, f64);

/// Render a JSON value the way it appears inside a log line.
fn inspect(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(inspect).collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let inner: Vec<String> = keys
                .into_iter()
                .map(|key| format!("{}: {}", key, inspect(&map[key])))
                .collect();
            format!("{{ {} }}", inner.join(", "))
        }
    }
}
