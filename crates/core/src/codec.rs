//! Wire formats

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    errors::{DecodeError, EncodeError},
    record::Flashsale,
};

pub mod document;
pub mod interchange;

pub use document::{decode_document, encode_document, to_document};
pub use interchange::{decode_interchange, encode_interchange, to_interchange};

/// The wire formats a record can be converted to and from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// BSON, as stored by the document store. `_id` is a native object id.
    Document,

    /// JSON text for external exchange. `_id` is a hex string.
    Interchange,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Document => "document",
            Self::Interchange => "interchange",
        })
    }
}

/// Decode a record from `bytes` in the given format.
///
/// # Errors
///
/// Returns [`DecodeError::Parse`] if the bytes are malformed, or a field error for the first
/// rejected field.
pub fn decode(format: Format, bytes: &[u8]) -> Result<Flashsale, DecodeError> {
    match format {
        Format::Document => decode_document(bytes),
        Format::Interchange => decode_interchange(bytes),
    }
}

/// Encode a record into the given format.
///
/// # Errors
///
/// Returns an error only if the underlying format writer fails.
pub fn encode(format: Format, record: &Flashsale) -> Result<Vec<u8>, EncodeError> {
    match format {
        Format::Document => encode_document(record),
        Format::Interchange => encode_interchange(record),
    }
}
