//! Postal item domain model.
//!
//! # Responsibility
//! - Define the postal item record and its type/status vocabularies.
//! - Provide the terminal-status check used by transition validation.
//!
//! # Invariants
//! - `office_id` is `None` until the item first arrives at an office.
//! - `Received` is terminal; no transition leaves it.

use crate::model::office::OfficeId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a postal item, assigned by the store on insert.
pub type ItemId = i64;

/// Physical category of a postal item. Opaque to the transition logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Letter,
    Parcel,
    Package,
    Postcard,
}

/// Lifecycle status of a postal item.
///
/// Legal transitions are enforced at the service layer: items start as
/// `Registered`, may move between `Arrived` and `Departed`, and stop at
/// `Received`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Registered by the sender; not yet at any office.
    Registered,
    /// Arrived at a post office.
    Arrived,
    /// Departed from a post office.
    Departed,
    /// Received by the addressee. Terminal.
    Received,
}

impl ItemStatus {
    /// Returns whether no further transitions are accepted from this status.
    pub fn is_terminal(self) -> bool {
        self == Self::Received
    }
}

/// A tracked postal item.
///
/// History rows live in their own table and are read through the history
/// repository; the item itself carries only the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalItem {
    pub id: ItemId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub recipient_index: String,
    pub recipient_address: String,
    pub recipient_name: String,
    pub status: ItemStatus,
    /// Office the item is currently associated with, when any.
    pub office_id: Option<OfficeId>,
}

/// Field set for registering a postal item; status and id are not part of
/// it because registration forces `Registered` and the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPostalItem {
    pub kind: ItemType,
    pub recipient_index: String,
    pub recipient_address: String,
    pub recipient_name: String,
}
