//! Untyped field values
//!
//! Both wire formats parse into a string-keyed mapping of dynamically typed values. The decoder
//! never looks at format-specific types directly: each format narrows its values into a
//! [`FieldValue`] through a [`FieldSource`], and the decoder matches on that.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use bson::{Bson, Document, oid::ObjectId};
use serde_json::{Map, Value};

/// The concrete dynamic type of a value, as reported in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Explicit "no value" marker
    Null,

    /// Boolean
    Bool,

    /// Integer number
    Integer,

    /// Floating-point number
    Float,

    /// String
    String,

    /// Document-store object identifier
    ObjectId,

    /// Array
    Array,

    /// Nested document or object
    Document,

    /// Binary data
    Binary,

    /// Document-store date-time
    DateTime,

    /// Any other format-specific type
    Other,
}

impl ValueKind {
    /// Human-readable name used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::ObjectId => "object id",
            Self::Array => "array",
            Self::Document => "document",
            Self::Binary => "binary",
            Self::DateTime => "date-time",
            Self::Other => "unsupported value",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed value borrowed from a parsed mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Explicit "no value" marker; decodes the same as an absent key
    Null,

    /// Boolean
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Unsigned integer too large for `i64`
    UInt(u64),

    /// Floating-point number
    Float(f64),

    /// String
    Str(&'a str),

    /// Native document-store identifier
    ObjectId(ObjectId),

    /// A value of a type no record field accepts
    Unsupported(ValueKind),
}

impl FieldValue<'_> {
    /// The concrete dynamic type of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) | Self::UInt(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::String,
            Self::ObjectId(_) => ValueKind::ObjectId,
            Self::Unsupported(kind) => *kind,
        }
    }

    /// Whether this is the "no value" marker.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<'a> From<&'a Bson> for FieldValue<'a> {
    fn from(value: &'a Bson) -> Self {
        match value {
            Bson::Null | Bson::Undefined => Self::Null,
            Bson::Boolean(value) => Self::Bool(*value),
            Bson::Int32(value) => Self::Int(i64::from(*value)),
            Bson::Int64(value) => Self::Int(*value),
            Bson::Double(value) => Self::Float(*value),
            Bson::String(value) => Self::Str(value),
            Bson::ObjectId(value) => Self::ObjectId(*value),
            Bson::Array(_) => Self::Unsupported(ValueKind::Array),
            Bson::Document(_) => Self::Unsupported(ValueKind::Document),
            Bson::Binary(_) => Self::Unsupported(ValueKind::Binary),
            Bson::DateTime(_) => Self::Unsupported(ValueKind::DateTime),
            _ => Self::Unsupported(ValueKind::Other),
        }
    }
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Self::Int(value)
                } else if let Some(value) = number.as_u64() {
                    Self::UInt(value)
                } else {
                    number
                        .as_f64()
                        .map_or(Self::Unsupported(ValueKind::Float), Self::Float)
                }
            }
            Value::String(value) => Self::Str(value),
            Value::Array(_) => Self::Unsupported(ValueKind::Array),
            Value::Object(_) => Self::Unsupported(ValueKind::Document),
        }
    }
}

/// A string-keyed mapping the record decoder can read fields from.
pub trait FieldSource {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

impl FieldSource for Document {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(FieldValue::from)
    }
}

impl FieldSource for Map<String, Value> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(FieldValue::from)
    }
}

impl FieldSource for BTreeMap<String, FieldValue<'_>> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).copied()
    }
}
