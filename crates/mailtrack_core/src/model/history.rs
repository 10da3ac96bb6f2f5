//! History ledger model.
//!
//! # Invariants
//! - Entries are append-only and immutable once created.
//! - The first entry of any item is always `Registered`.

use crate::model::item::{ItemId, ItemStatus};
use serde::{Deserialize, Serialize};

/// Stable identifier for a history entry.
pub type HistoryId = i64;

/// One status change of a postal item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub item_id: ItemId,
    pub status: ItemStatus,
    /// Time of the operation in Unix epoch milliseconds, as recorded by the
    /// store when the entry was appended.
    pub recorded_at: i64,
}
