//! Record Fields

use std::fmt::{Display, Formatter, Result as FmtResult};

/// The closed set of keys a flash-sale record is stored under.
///
/// [`Field::ALL`] lists them in decode order, which decides which failure is reported when more
/// than one field is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `_id`
    RecordId,

    /// `flashsaleID`
    FlashsaleId,

    /// `itemID`
    ItemId,

    /// `sku`
    Sku,

    /// `name`
    Name,

    /// `soldWeight`
    SoldWeight,

    /// `totalWeight`
    TotalWeight,

    /// `unsoldWeight`
    UnsoldWeight,

    /// `lot`
    Lot,

    /// `status`
    Status,

    /// `timestamp`
    Timestamp,

    /// `onFlashsale`
    OnFlashsale,

    /// `projectedDate`
    ProjectedDate,
}

impl Field {
    /// Every field, in decode order.
    pub const ALL: [Self; 13] = [
        Self::RecordId,
        Self::FlashsaleId,
        Self::ItemId,
        Self::Sku,
        Self::Name,
        Self::SoldWeight,
        Self::TotalWeight,
        Self::UnsoldWeight,
        Self::Lot,
        Self::Status,
        Self::Timestamp,
        Self::OnFlashsale,
        Self::ProjectedDate,
    ];

    /// The wire key. Keys are case-sensitive and shared by both formats.
    pub const fn key(self) -> &'static str {
        match self {
            Self::RecordId => "_id",
            Self::FlashsaleId => "flashsaleID",
            Self::ItemId => "itemID",
            Self::Sku => "sku",
            Self::Name => "name",
            Self::SoldWeight => "soldWeight",
            Self::TotalWeight => "totalWeight",
            Self::UnsoldWeight => "unsoldWeight",
            Self::Lot => "lot",
            Self::Status => "status",
            Self::Timestamp => "timestamp",
            Self::OnFlashsale => "onFlashsale",
            Self::ProjectedDate => "projectedDate",
        }
    }

    /// Look up a field by its wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}
