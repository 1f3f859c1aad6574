//! Flashsale Records

use bson::oid::ObjectId;

use crate::uuids::TypedUuid;

/// Identifier the event-sourcing layer registers the flash-sale aggregate under.
pub const AGGREGATE_ID: i8 = 7;

/// Document-store identifier, assigned by the store on first insert.
pub type RecordId = ObjectId;

/// Flash-sale event marker.
#[derive(Debug)]
pub struct FlashsaleEvent;

/// Flash-sale event UUID
pub type FlashsaleUuid = TypedUuid<FlashsaleEvent>;

/// Inventory item marker.
#[derive(Debug)]
pub struct InventoryItem;

/// Inventory item UUID
pub type ItemUuid = TypedUuid<InventoryItem>;

/// One inventory item's participation in a flash-sale event.
///
/// `Default` is the zero value every omitted field decodes to. The three weights are stored as
/// given; `unsold_weight` is not derived from the other two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flashsale {
    /// Store identifier, `None` until the record has been persisted
    pub id: Option<RecordId>,

    /// Flash-sale event this entry belongs to
    pub flashsale_id: FlashsaleUuid,

    /// Inventory item on sale
    pub item_id: ItemUuid,

    /// Stock-keeping unit
    pub sku: String,

    /// Display name
    pub name: String,

    /// Quantity sold so far, by weight
    pub sold_weight: f64,

    /// Quantity allocated to the sale
    pub total_weight: f64,

    /// Quantity remaining
    pub unsold_weight: f64,

    /// Lot or batch identifier
    pub lot: String,

    /// Lifecycle label, e.g. `active` or `ended`
    pub status: String,

    /// Creation or update time, in the caller's epoch unit
    pub timestamp: i64,

    /// Whether the item is currently listed on sale
    pub on_flashsale: bool,

    /// Projected end or availability date, in the caller's epoch unit
    pub projected_date: i64,
}

impl Flashsale {
    /// Whether the store has assigned this record an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
