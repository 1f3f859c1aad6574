//! Document-store (BSON) format

use bson::Document;

use crate::{
    decode::from_fields,
    errors::{DecodeError, EncodeError, ParseError},
    fields::Field,
    record::Flashsale,
};

/// Build the BSON document a record is stored as.
///
/// Identifiers are written as canonical UUID strings. `_id` is written as a native object id
/// and only when the record has one, so the store assigns it on first insert.
pub fn to_document(record: &Flashsale) -> Document {
    let mut document = Document::new();

    if let Some(id) = record.id {
        document.insert(Field::RecordId.key(), id);
    }

    document.insert(Field::FlashsaleId.key(), record.flashsale_id.to_string());
    document.insert(Field::ItemId.key(), record.item_id.to_string());
    document.insert(Field::Sku.key(), record.sku.as_str());
    document.insert(Field::Name.key(), record.name.as_str());
    document.insert(Field::SoldWeight.key(), record.sold_weight);
    document.insert(Field::TotalWeight.key(), record.total_weight);
    document.insert(Field::UnsoldWeight.key(), record.unsold_weight);
    document.insert(Field::Lot.key(), record.lot.as_str());
    document.insert(Field::Status.key(), record.status.as_str());
    document.insert(Field::Timestamp.key(), record.timestamp);
    document.insert(Field::OnFlashsale.key(), record.on_flashsale);
    document.insert(Field::ProjectedDate.key(), record.projected_date);

    document
}

/// Encode a record as BSON bytes.
///
/// # Errors
///
/// Returns [`EncodeError::Document`] if the BSON writer fails.
#[tracing::instrument(
    name = "flashsale.codec.encode_document",
    skip_all,
    fields(persisted = record.is_persisted()),
    err(level = "debug")
)]
pub fn encode_document(record: &Flashsale) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::new();

    to_document(record).to_writer(&mut bytes)?;

    Ok(bytes)
}

/// Decode a record from BSON bytes.
///
/// # Errors
///
/// Returns [`DecodeError::Parse`] if `bytes` is not a BSON document, or a field error for the
/// first rejected field.
#[tracing::instrument(
    name = "flashsale.codec.decode_document",
    skip_all,
    fields(len = bytes.len()),
    err(level = "debug")
)]
pub fn decode_document(bytes: &[u8]) -> Result<Flashsale, DecodeError> {
    let mut reader = bytes;

    let document = Document::from_reader(&mut reader).map_err(ParseError::Document)?;

    from_fields(&document)
}

impl From<&Flashsale> for Document {
    fn from(record: &Flashsale) -> Self {
        to_document(record)
    }
}

impl TryFrom<&Document> for Flashsale {
    type Error = DecodeError;

    fn try_from(document: &Document) -> Result<Self, Self::Error> {
        from_fields(document)
    }
}

#[cfg(test)]
mod tests {
    use bson::{Bson, doc, oid::ObjectId};
    use testresult::TestResult;

    use super::*;
    use crate::record::{FlashsaleUuid, ItemUuid};

    fn sample() -> Result<Flashsale, uuid::Error> {
        Ok(Flashsale {
            id: None,
            flashsale_id: FlashsaleUuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6")?,
            item_id: ItemUuid::parse_str("9b2d8c1e-0f4a-4e8b-a6d2-1c3e5f7a9b0d")?,
            sku: "APL-001".to_string(),
            name: "Gala Apples".to_string(),
            sold_weight: 12.5,
            total_weight: 40.0,
            unsold_weight: 27.5,
            lot: "L-2024-11".to_string(),
            status: "active".to_string(),
            timestamp: 1_700_000_000,
            on_flashsale: true,
            projected_date: 1_700_604_800,
        })
    }

    #[test]
    fn uuids_are_written_as_strings() -> TestResult {
        let document = to_document(&sample()?);

        assert_eq!(
            document.get_str("flashsaleID")?,
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
        assert_eq!(
            document.get_str("itemID")?,
            "9b2d8c1e-0f4a-4e8b-a6d2-1c3e5f7a9b0d"
        );

        Ok(())
    }

    #[test]
    fn unpersisted_record_has_no_id_key() -> TestResult {
        let document = to_document(&sample()?);

        assert!(!document.contains_key("_id"), "fresh records omit _id");
        assert_eq!(document.len(), 12);

        Ok(())
    }

    #[test]
    fn persisted_id_is_native_object_id() -> TestResult {
        let id = ObjectId::new();
        let record = Flashsale {
            id: Some(id),
            ..sample()?
        };

        let document = to_document(&record);

        assert_eq!(document.get("_id"), Some(&Bson::ObjectId(id)));

        Ok(())
    }

    #[test]
    fn numbers_keep_native_types() -> TestResult {
        let document = to_document(&sample()?);

        assert_eq!(document.get_i64("timestamp")?, 1_700_000_000);
        assert!(
            (document.get_f64("totalWeight")? - 40.0).abs() < f64::EPSILON,
            "weights are written as doubles"
        );
        assert!(document.get_bool("onFlashsale")?, "booleans are written natively");

        Ok(())
    }

    #[test]
    fn bytes_round_trip() -> TestResult {
        let record = Flashsale {
            id: Some(ObjectId::new()),
            ..sample()?
        };

        let decoded = decode_document(&encode_document(&record)?)?;

        assert_eq!(decoded, record);

        Ok(())
    }

    #[test]
    fn int32_values_are_accepted() -> TestResult {
        let document = doc! { "timestamp": 1_700_000_i32, "soldWeight": 4_i32 };

        let record = Flashsale::try_from(&document)?;

        assert_eq!(record.timestamp, 1_700_000);
        assert!((record.sold_weight - 4.0).abs() < f64::EPSILON, "int32 widens to f64");

        Ok(())
    }

    #[test]
    fn truncated_bytes_are_a_parse_error() -> TestResult {
        let bytes = encode_document(&sample()?)?;
        let truncated = bytes.get(..bytes.len() / 2).ok_or("slice out of range")?;

        let result = decode_document(truncated);

        assert!(
            matches!(result, Err(DecodeError::Parse(ParseError::Document(_)))),
            "expected a document parse error, got {result:?}"
        );

        Ok(())
    }
}
