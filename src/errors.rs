use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::models::RspErr;

/// One step into a JSON document: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside the decoded document, rendered as `$.items[1].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// What went wrong while decoding a single value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("required field is missing")]
    MissingField,

    #[error("required field is null")]
    NullField,

    #[error("{0}")]
    InvalidValue(String),
}

/// Typed decode failure, pointing at the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct DecodeError {
    pub path: JsonPath,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(path: JsonPath, kind: DecodeErrorKind) -> Self {
        Self { path, kind }
    }

    pub fn unexpected_type(path: JsonPath, expected: &'static str, found: &Value) -> Self {
        Self::new(
            path,
            DecodeErrorKind::UnexpectedType {
                expected,
                found: json_type_name(found),
            },
        )
    }

    pub fn invalid_value(path: JsonPath, message: impl Into<String>) -> Self {
        Self::new(path, DecodeErrorKind::InvalidValue(message.into()))
    }

    /// True when a required key was absent or null.
    pub fn is_missing_required(&self) -> bool {
        matches!(
            self.kind,
            DecodeErrorKind::MissingField | DecodeErrorKind::NullField
        )
    }
}

/// JSON type name used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convenience alias for fallible crate results.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("api error {}: {}", .0.code, .0.description)]
    Api(#[from] RspErr),
}
