//! Flashsale
//!
//! Flashsale records and their conversion to and from the document-store (BSON) and interchange
//! (JSON) wire formats.

pub mod codec;
pub mod decode;
pub mod errors;
pub mod fields;
pub mod record;
pub mod uuids;
pub mod value;

pub use crate::{
    codec::{
        Format, decode, decode_document, decode_interchange, encode, encode_document,
        encode_interchange, to_document, to_interchange,
    },
    decode::from_fields,
    errors::{DecodeError, EncodeError, FieldFormatError, ParseError},
    fields::Field,
    record::{AGGREGATE_ID, Flashsale, FlashsaleUuid, ItemUuid, RecordId},
    value::{FieldSource, FieldValue, ValueKind},
};
