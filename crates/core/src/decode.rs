//! Record decoding
//!
//! [`from_fields`] is the single decoder behind both wire formats. Each field is read in
//! [`Field::ALL`] order; a missing or null key leaves the field at its zero value, and the first
//! rejected value aborts the whole decode.

use tracing::debug;

use crate::{
    errors::{DecodeError, FieldFormatError},
    fields::Field,
    record::{Flashsale, RecordId},
    uuids::TypedUuid,
    value::{FieldSource, FieldValue, ValueKind},
};

/// Smallest `f64` that converts to an `i64` without saturating (-2^63).
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;

/// Exclusive upper bound for `f64` to `i64` conversion (2^63).
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// Decode a record from an untyped mapping.
///
/// Unknown keys are ignored. No field is required: an empty mapping decodes to
/// [`Flashsale::default`].
///
/// # Errors
///
/// Returns [`DecodeError::FieldType`] or [`DecodeError::FieldFormat`] for the first field whose
/// value is rejected.
pub fn from_fields<S>(source: &S) -> Result<Flashsale, DecodeError>
where
    S: FieldSource + ?Sized,
{
    Ok(Flashsale {
        id: decode_field(source, Field::RecordId, as_record_id)?,
        flashsale_id: decode_field(source, Field::FlashsaleId, as_uuid)?.unwrap_or_default(),
        item_id: decode_field(source, Field::ItemId, as_uuid)?.unwrap_or_default(),
        sku: decode_field(source, Field::Sku, as_string)?.unwrap_or_default(),
        name: decode_field(source, Field::Name, as_string)?.unwrap_or_default(),
        sold_weight: decode_field(source, Field::SoldWeight, as_f64)?.unwrap_or_default(),
        total_weight: decode_field(source, Field::TotalWeight, as_f64)?.unwrap_or_default(),
        unsold_weight: decode_field(source, Field::UnsoldWeight, as_f64)?.unwrap_or_default(),
        lot: decode_field(source, Field::Lot, as_string)?.unwrap_or_default(),
        status: decode_field(source, Field::Status, as_string)?.unwrap_or_default(),
        timestamp: decode_field(source, Field::Timestamp, as_i64)?.unwrap_or_default(),
        on_flashsale: decode_field(source, Field::OnFlashsale, as_bool)?.unwrap_or_default(),
        projected_date: decode_field(source, Field::ProjectedDate, as_i64)?.unwrap_or_default(),
    })
}

fn decode_field<'s, S, T>(
    source: &'s S,
    field: Field,
    convert: impl FnOnce(Field, FieldValue<'s>) -> Result<T, DecodeError>,
) -> Result<Option<T>, DecodeError>
where
    S: FieldSource + ?Sized,
{
    let Some(value) = source.field(field.key()) else {
        return Ok(None);
    };

    if value.is_null() {
        return Ok(None);
    }

    convert(field, value)
        .map(Some)
        .inspect_err(|error| debug!(%field, %error, "rejected flashsale field"))
}

fn as_record_id(field: Field, value: FieldValue<'_>) -> Result<RecordId, DecodeError> {
    match value {
        FieldValue::ObjectId(id) => Ok(id),
        FieldValue::Str(hex) => RecordId::parse_str(hex)
            .map_err(|source| DecodeError::field_format(field, FieldFormatError::ObjectId(source))),
        other => Err(DecodeError::field_type(
            field,
            "object id or hex string",
            other.kind(),
        )),
    }
}

fn as_uuid<T>(field: Field, value: FieldValue<'_>) -> Result<TypedUuid<T>, DecodeError> {
    match value {
        FieldValue::Str(uuid) => TypedUuid::parse_str(uuid)
            .map_err(|source| DecodeError::field_format(field, FieldFormatError::Uuid(source))),
        other => Err(DecodeError::field_type(
            field,
            ValueKind::String.as_str(),
            other.kind(),
        )),
    }
}

fn as_string(field: Field, value: FieldValue<'_>) -> Result<String, DecodeError> {
    match value {
        FieldValue::Str(value) => Ok(value.to_owned()),
        other => Err(DecodeError::field_type(
            field,
            ValueKind::String.as_str(),
            other.kind(),
        )),
    }
}

fn as_bool(field: Field, value: FieldValue<'_>) -> Result<bool, DecodeError> {
    match value {
        FieldValue::Bool(value) => Ok(value),
        other => Err(DecodeError::field_type(
            field,
            ValueKind::Bool.as_str(),
            other.kind(),
        )),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integers beyond 2^53 round to the nearest representable weight."
)]
fn as_f64(field: Field, value: FieldValue<'_>) -> Result<f64, DecodeError> {
    match value {
        FieldValue::Float(value) => Ok(value),
        FieldValue::Int(value) => Ok(value as f64),
        FieldValue::UInt(value) => Ok(value as f64),
        other => Err(DecodeError::field_type(field, "number", other.kind())),
    }
}

fn as_i64(field: Field, value: FieldValue<'_>) -> Result<i64, DecodeError> {
    match value {
        FieldValue::Int(value) => Ok(value),
        FieldValue::UInt(value) => i64::try_from(value).ok().ok_or_else(|| {
            DecodeError::field_format(field, FieldFormatError::OutOfRange(value.to_string()))
        }),
        FieldValue::Float(value) => float_to_i64(value)
            .map_err(|source| DecodeError::field_format(field, source)),
        other => Err(DecodeError::field_type(field, "number", other.kind())),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is integral and within i64 range, so the cast is exact."
)]
fn float_to_i64(value: f64) -> Result<i64, FieldFormatError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(FieldFormatError::NotIntegral(value));
    }

    if !(I64_MIN_F64..I64_END_F64).contains(&value) {
        return Err(FieldFormatError::OutOfRange(value.to_string()));
    }

    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use testresult::TestResult;

    use super::*;

    fn fields<'a>(entries: &[(&str, FieldValue<'a>)]) -> BTreeMap<String, FieldValue<'a>> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), *value))
            .collect()
    }

    #[test]
    fn empty_mapping_decodes_to_zero_value() -> TestResult {
        let record = from_fields(&fields(&[]))?;

        assert_eq!(record, Flashsale::default());

        Ok(())
    }

    #[test]
    fn null_values_decode_as_absent() -> TestResult {
        let record = from_fields(&fields(&[
            ("_id", FieldValue::Null),
            ("sku", FieldValue::Null),
            ("timestamp", FieldValue::Null),
        ]))?;

        assert_eq!(record, Flashsale::default());

        Ok(())
    }

    #[test]
    fn integral_float_coerces_to_i64() -> TestResult {
        let record = from_fields(&fields(&[(
            "timestamp",
            FieldValue::Float(1_700_000_000.0),
        )]))?;

        assert_eq!(record.timestamp, 1_700_000_000);

        Ok(())
    }

    #[test]
    fn fractional_float_is_rejected_for_integer_fields() {
        let result = from_fields(&fields(&[("projectedDate", FieldValue::Float(12.5))]));

        assert!(
            matches!(
                result,
                Err(DecodeError::FieldFormat {
                    field: Field::ProjectedDate,
                    source: FieldFormatError::NotIntegral(_),
                })
            ),
            "expected NotIntegral on projectedDate, got {result:?}"
        );
    }

    #[test]
    fn non_finite_float_is_rejected_for_integer_fields() {
        let result = from_fields(&fields(&[("timestamp", FieldValue::Float(f64::INFINITY))]));

        assert!(
            matches!(result, Err(DecodeError::FieldFormat { field: Field::Timestamp, .. })),
            "expected FieldFormat on timestamp, got {result:?}"
        );
    }

    #[test]
    fn out_of_range_numbers_are_rejected_for_integer_fields() {
        for value in [FieldValue::UInt(u64::MAX), FieldValue::Float(1e19)] {
            let result = from_fields(&fields(&[("timestamp", value)]));

            assert!(
                matches!(
                    result,
                    Err(DecodeError::FieldFormat {
                        source: FieldFormatError::OutOfRange(_),
                        ..
                    })
                ),
                "expected OutOfRange for {value:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn out_of_range_message_shows_the_value() {
        let result = from_fields(&fields(&[("timestamp", FieldValue::UInt(u64::MAX))]));

        assert_eq!(
            result.err().map(|error| error.to_string()).as_deref(),
            Some(
                "field `timestamp` has an invalid value: \
                 18446744073709551615 is out of range for a 64-bit integer"
            )
        );
    }

    #[test]
    fn i64_bounds_survive_float_conversion() -> TestResult {
        assert_eq!(float_to_i64(I64_MIN_F64)?, i64::MIN);
        assert!(float_to_i64(I64_END_F64).is_err(), "2^63 does not fit in i64");

        Ok(())
    }

    #[test]
    fn integers_widen_into_weights() -> TestResult {
        let record = from_fields(&fields(&[
            ("soldWeight", FieldValue::Int(3)),
            ("totalWeight", FieldValue::UInt(10)),
            ("unsoldWeight", FieldValue::Float(7.25)),
        ]))?;

        assert!((record.sold_weight - 3.0).abs() < f64::EPSILON, "sold weight");
        assert!((record.total_weight - 10.0).abs() < f64::EPSILON, "total weight");
        assert!((record.unsold_weight - 7.25).abs() < f64::EPSILON, "unsold weight");

        Ok(())
    }

    #[test]
    fn weights_are_not_cross_checked() -> TestResult {
        let record = from_fields(&fields(&[
            ("soldWeight", FieldValue::Float(5.0)),
            ("totalWeight", FieldValue::Float(10.0)),
            ("unsoldWeight", FieldValue::Float(1.0)),
        ]))?;

        assert!((record.unsold_weight - 1.0).abs() < f64::EPSILON, "unsold weight kept as given");

        Ok(())
    }

    #[test]
    fn strings_are_never_stringified() {
        let result = from_fields(&fields(&[("lot", FieldValue::Int(42))]));

        assert!(
            matches!(
                result,
                Err(DecodeError::FieldType {
                    field: Field::Lot,
                    found: ValueKind::Integer,
                    ..
                })
            ),
            "expected FieldType on lot, got {result:?}"
        );
    }

    #[test]
    fn booleans_are_not_coerced() {
        let result = from_fields(&fields(&[("onFlashsale", FieldValue::Str("true"))]));

        assert!(
            matches!(
                result,
                Err(DecodeError::FieldType {
                    field: Field::OnFlashsale,
                    found: ValueKind::String,
                    ..
                })
            ),
            "expected FieldType on onFlashsale, got {result:?}"
        );
    }

    #[test]
    fn numeric_uuid_is_a_type_error() {
        let result = from_fields(&fields(&[("itemID", FieldValue::Int(1))]));

        assert!(
            matches!(result, Err(DecodeError::FieldType { field: Field::ItemId, .. })),
            "expected FieldType on itemID, got {result:?}"
        );
    }

    #[test]
    fn record_id_accepts_native_and_hex() -> TestResult {
        let id = RecordId::parse_str("65a1b2c3d4e5f60718293a4b")?;

        let native = from_fields(&fields(&[("_id", FieldValue::ObjectId(id))]))?;
        let hex = from_fields(&fields(&[("_id", FieldValue::Str("65a1b2c3d4e5f60718293a4b"))]))?;

        assert_eq!(native.id, Some(id));
        assert_eq!(hex.id, Some(id));

        Ok(())
    }

    #[test]
    fn record_id_rejects_bad_hex() {
        let result = from_fields(&fields(&[("_id", FieldValue::Str("zz"))]));

        assert!(
            matches!(
                result,
                Err(DecodeError::FieldFormat {
                    field: Field::RecordId,
                    source: FieldFormatError::ObjectId(_),
                })
            ),
            "expected ObjectId format error, got {result:?}"
        );
    }

    #[test]
    fn first_invalid_field_in_order_is_reported() {
        let result = from_fields(&fields(&[
            ("projectedDate", FieldValue::Str("soon")),
            ("name", FieldValue::Bool(false)),
            ("itemID", FieldValue::Str("bad")),
        ]));

        assert_eq!(result.err().and_then(|error| error.field()), Some(Field::ItemId));
    }
}
