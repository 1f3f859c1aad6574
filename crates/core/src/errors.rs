//! Codec errors

use thiserror::Error;

use crate::{codec::Format, fields::Field, value::ValueKind};

/// Errors that can occur when decoding a record.
///
/// Decoding stops at the first failure, so at most one field is ever reported.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input bytes could not be parsed into a key-value mapping.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A present field holds a value of the wrong type.
    #[error("field `{field}` expected {expected}, found {found}")]
    FieldType {
        /// The field that failed
        field: Field,

        /// What the field accepts
        expected: &'static str,

        /// The dynamic type that was found
        found: ValueKind,
    },

    /// A present field has the right type but an invalid value.
    #[error("field `{field}` has an invalid value: {source}")]
    FieldFormat {
        /// The field that failed
        field: Field,

        /// Why the value was rejected
        source: FieldFormatError,
    },
}

impl DecodeError {
    /// The field that failed, if the failure was attributable to one.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Parse(_) => None,
            Self::FieldType { field, .. } | Self::FieldFormat { field, .. } => Some(*field),
        }
    }

    pub(crate) fn field_type(field: Field, expected: &'static str, found: ValueKind) -> Self {
        Self::FieldType {
            field,
            expected,
            found,
        }
    }

    pub(crate) fn field_format(field: Field, source: FieldFormatError) -> Self {
        Self::FieldFormat { field, source }
    }
}

/// Malformed input bytes.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Invalid BSON document bytes.
    #[error("malformed document: {0}")]
    Document(#[source] bson::de::Error),

    /// Invalid JSON text, or a top-level value that is not an object.
    #[error("malformed interchange text: {0}")]
    Interchange(#[source] serde_json::Error),
}

impl ParseError {
    /// The format that failed to parse.
    pub fn format(&self) -> Format {
        match self {
            Self::Document(_) => Format::Document,
            Self::Interchange(_) => Format::Interchange,
        }
    }
}

/// Reasons a correctly typed value is still rejected.
#[derive(Debug, Error)]
pub enum FieldFormatError {
    /// Not a valid UUID.
    #[error("invalid uuid")]
    Uuid(#[source] uuid::Error),

    /// Not a valid document-store identifier.
    #[error("invalid object id")]
    ObjectId(#[source] bson::oid::Error),

    /// A float with a fractional part, or not finite, where an integer is expected.
    #[error("{0} is not an integral value")]
    NotIntegral(f64),

    /// A number outside the range of a 64-bit signed integer.
    #[error("{0} is out of range for a 64-bit integer")]
    OutOfRange(String),
}

/// Errors raised while writing a record.
///
/// Records are not validated on encode. Apart from writer failures, the only rejection is a
/// value the target format cannot represent.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A NaN or infinite weight, which JSON has no representation for.
    #[error("field `{field}` holds {value}, which the interchange format cannot represent")]
    NonFinite {
        /// The field that failed
        field: Field,

        /// The offending value
        value: f64,
    },

    /// The BSON writer failed.
    #[error("failed to write document: {0}")]
    Document(#[from] bson::ser::Error),

    /// The JSON writer failed.
    #[error("failed to write interchange text: {0}")]
    Interchange(#[from] serde_json::Error),
}
