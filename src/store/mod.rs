//! Persistence service for settings fields
//!
//! Values are scalars stored under a `(key, section)` pair. Reads of unset
//! keys yield the zero value of the requested type and writes never fail at
//! the contract level, so callers treat the store as always available.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;

/// A scalar stored in a settings section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Truthiness: non-zero integers and non-empty strings count as true
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
        }
    }

    /// Integer view, 0 for strings that do not parse
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Bool(b) => i64::from(*b),
            Value::Int(n) => *n,
            Value::Str(s) => s.trim().parse().unwrap_or(0),
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Convert from a TOML value, ignoring non-scalar entries
    ///
    /// Whole floats such as `60.0` read as integers; fractional ones are
    /// ignored like tables.
    pub fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Boolean(b) => Some(Value::Bool(*b)),
            toml::Value::Integer(n) => Some(Value::Int(*n)),
            toml::Value::Float(f) if is_whole(*f) => Some(Value::Int(*f as i64)),
            toml::Value::String(s) => Some(Value::Str(s.clone())),
            _ => None,
        }
    }

    pub fn into_toml(self) -> toml::Value {
        match self {
            Value::Bool(b) => toml::Value::Boolean(b),
            Value::Int(n) => toml::Value::Integer(n),
            Value::Str(s) => toml::Value::String(s),
        }
    }
}

fn is_whole(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Key/value persistence consumed by the settings controller
///
/// Implementations use interior mutability so a single `Arc` handle can be
/// shared between the controller and the credential-entry window.
pub trait SettingsStore {
    /// Read the value stored under `key` in `section`, if any
    fn read(&self, key: &str, section: &str) -> Option<Value>;

    /// Persist `value` under `key` in `section` immediately
    fn update(&self, key: &str, value: Value, section: &str);

    fn read_bool(&self, key: &str, section: &str) -> bool {
        self.read(key, section).is_some_and(|v| v.as_bool())
    }

    fn read_int(&self, key: &str, section: &str) -> i64 {
        self.read(key, section).map_or(0, |v| v.as_int())
    }

    fn read_string(&self, key: &str, section: &str) -> String {
        self.read(key, section)
            .map(|v| v.as_string())
            .unwrap_or_default()
    }
}
