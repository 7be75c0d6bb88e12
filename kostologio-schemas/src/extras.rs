use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// Identifier for an extra line item, unique within its list.
pub type ExtraId = u64;

/// Ad-hoc, user-managed line item.
///
/// `auto_quantity` may only be true while `unit` is auto-capable on the
/// current page; the engine enforces the invariant on every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraLineItem {
    pub id: ExtraId,
    pub description: String,
    pub unit: Unit,
    /// Unit price. Stays the source of truth for this line even after a
    /// catalog price save.
    pub price: f64,
    /// Manually entered quantity, used only while `auto_quantity` is false.
    pub quantity: f64,
    pub auto_quantity: bool,
    /// Catalog key backing this extra, when price edits can be persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
}
