//! Post office domain model.

use serde::{Deserialize, Serialize};

/// Stable identifier for a post office, assigned by the store on insert.
pub type OfficeId = i64;

/// A registered post office.
///
/// `id` is immutable after creation; all other fields are replaceable
/// through the update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOffice {
    pub id: OfficeId,
    /// Postal index/code of the office.
    pub index: String,
    pub name: String,
    pub address: String,
}

/// Field set for creating a post office; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPostOffice {
    pub index: String,
    pub name: String,
    pub address: String,
}
