//! Interchange (JSON) format

use serde_json::{Map, Number, Value};

use crate::{
    decode::from_fields,
    errors::{DecodeError, EncodeError, ParseError},
    fields::Field,
    record::Flashsale,
};

/// Build the JSON object a record is exchanged as.
///
/// Same keys as the document format. `_id`, when present, is its lowercase hex string.
///
/// # Errors
///
/// Returns [`EncodeError::NonFinite`] if a weight is NaN or infinite.
pub fn to_interchange(record: &Flashsale) -> Result<Map<String, Value>, EncodeError> {
    let mut map = Map::new();

    let mut insert = |field: Field, value: Value| {
        map.insert(field.key().to_owned(), value);
    };

    if let Some(id) = record.id {
        insert(Field::RecordId, Value::from(id.to_hex()));
    }

    insert(Field::FlashsaleId, Value::from(record.flashsale_id.to_string()));
    insert(Field::ItemId, Value::from(record.item_id.to_string()));
    insert(Field::Sku, Value::from(record.sku.as_str()));
    insert(Field::Name, Value::from(record.name.as_str()));
    insert(Field::SoldWeight, weight(Field::SoldWeight, record.sold_weight)?);
    insert(Field::TotalWeight, weight(Field::TotalWeight, record.total_weight)?);
    insert(Field::UnsoldWeight, weight(Field::UnsoldWeight, record.unsold_weight)?);
    insert(Field::Lot, Value::from(record.lot.as_str()));
    insert(Field::Status, Value::from(record.status.as_str()));
    insert(Field::Timestamp, Value::from(record.timestamp));
    insert(Field::OnFlashsale, Value::from(record.on_flashsale));
    insert(Field::ProjectedDate, Value::from(record.projected_date));

    Ok(map)
}

fn weight(field: Field, value: f64) -> Result<Value, EncodeError> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or(EncodeError::NonFinite { field, value })
}

/// Encode a record as JSON bytes.
///
/// # Errors
///
/// Returns [`EncodeError::NonFinite`] if a weight is NaN or infinite, or
/// [`EncodeError::Interchange`] if the JSON writer fails.
#[tracing::instrument(
    name = "flashsale.codec.encode_interchange",
    skip_all,
    fields(persisted = record.is_persisted()),
    err(level = "debug")
)]
pub fn encode_interchange(record: &Flashsale) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(&to_interchange(record)?)?)
}

/// Decode a record from JSON bytes. The top-level value must be an object.
///
/// # Errors
///
/// Returns [`DecodeError::Parse`] if `bytes` is not a JSON object, or a field error for the
/// first rejected field.
#[tracing::instrument(
    name = "flashsale.codec.decode_interchange",
    skip_all,
    fields(len = bytes.len()),
    err(level = "debug")
)]
pub fn decode_interchange(bytes: &[u8]) -> Result<Flashsale, DecodeError> {
    let map: Map<String, Value> = serde_json::from_slice(bytes).map_err(ParseError::Interchange)?;

    from_fields(&map)
}

impl TryFrom<&Flashsale> for Map<String, Value> {
    type Error = EncodeError;

    fn try_from(record: &Flashsale) -> Result<Self, Self::Error> {
        to_interchange(record)
    }
}

impl TryFrom<&Map<String, Value>> for Flashsale {
    type Error = DecodeError;

    fn try_from(map: &Map<String, Value>) -> Result<Self, Self::Error> {
        from_fields(map)
    }
}
