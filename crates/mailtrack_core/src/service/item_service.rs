//! Postal item use-case service: registration and status transitions.
//!
//! # Responsibility
//! - Validate and apply status transitions to postal items.
//! - Append a history entry on every accepted transition.
//!
//! # Invariants
//! - `Received` is absorbing; no transition leaves it.
//! - `Departed` requires the item's current office to match the requested
//!   office; arrivals and receipts carry no such precondition.
//! - An item's status always equals its most recently appended history
//!   entry.

use crate::model::item::{ItemId, ItemStatus, ItemType, NewPostalItem, PostalItem};
use crate::model::office::OfficeId;
use crate::page::{Page, PageRequest};
use crate::repo::item_repo::ItemRepository;
use crate::repo::office_repo::OfficeRepository;
use crate::service::{FieldError, ServiceError, ServiceResult};
use serde::Serialize;

const RECIPIENT_NAME_MIN_CHARS: usize = 3;
const RECIPIENT_NAME_MAX_CHARS: usize = 30;
const RECIPIENT_ADDRESS_MIN_CHARS: usize = 10;
const RECIPIENT_ADDRESS_MAX_CHARS: usize = 100;

/// Payload for registering a new postal item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterItemRequest {
    pub kind: ItemType,
    pub recipient_index: String,
    pub recipient_address: String,
    pub recipient_name: String,
}

impl RegisterItemRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let address_chars = self.recipient_address.chars().count();
        if address_chars < RECIPIENT_ADDRESS_MIN_CHARS || address_chars > RECIPIENT_ADDRESS_MAX_CHARS
        {
            errors.push(FieldError {
                field: "recipient_address",
                message: format!(
                    "recipient address length should be at least {RECIPIENT_ADDRESS_MIN_CHARS} and at most {RECIPIENT_ADDRESS_MAX_CHARS}"
                ),
            });
        }

        let name_chars = self.recipient_name.chars().count();
        if name_chars < RECIPIENT_NAME_MIN_CHARS || name_chars > RECIPIENT_NAME_MAX_CHARS {
            errors.push(FieldError {
                field: "recipient_name",
                message: format!(
                    "recipient name length should be at least {RECIPIENT_NAME_MIN_CHARS} and at most {RECIPIENT_NAME_MAX_CHARS}"
                ),
            });
        }

        errors
    }
}

/// Payload for the three transition operations (arrive/depart/receive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub item_id: Option<ItemId>,
    pub office_id: Option<OfficeId>,
}

/// Postal item response projection. Office and history are not exposed
/// here; the history page carries its own projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub recipient_index: String,
    pub recipient_address: String,
    pub recipient_name: String,
    pub status: ItemStatus,
}

/// Converts a persisted item into its response projection.
pub fn item_to_response(item: PostalItem) -> ItemResponse {
    ItemResponse {
        id: item.id,
        kind: item.kind,
        recipient_index: item.recipient_index,
        recipient_address: item.recipient_address,
        recipient_name: item.recipient_name,
        status: item.status,
    }
}

/// Use-case service for the postal item lifecycle.
pub struct ItemService<I: ItemRepository, O: OfficeRepository> {
    items: I,
    offices: O,
}

impl<I: ItemRepository, O: OfficeRepository> ItemService<I, O> {
    /// Creates a service from item and office repository implementations.
    pub fn new(items: I, offices: O) -> Self {
        Self { items, offices }
    }

    /// Registers a new postal item.
    ///
    /// # Contract
    /// - Status is forced to `Registered`; no office is associated.
    /// - Exactly one history entry is seeded with the item.
    pub fn register(&self, request: Option<&RegisterItemRequest>) -> ServiceResult<ItemResponse> {
        let request = request.ok_or_else(|| {
            ServiceError::invalid_argument("the passed value of postal item is not valid")
        })?;

        let field_errors = request.validate();
        if !field_errors.is_empty() {
            return Err(ServiceError::InvalidArgument {
                message: "postal item fields are not valid".to_string(),
                field_errors,
            });
        }

        let id = self.items.create_item(&NewPostalItem {
            kind: request.kind,
            recipient_index: request.recipient_index.clone(),
            recipient_address: request.recipient_address.clone(),
            recipient_name: request.recipient_name.clone(),
        })?;

        Ok(ItemResponse {
            id,
            kind: request.kind,
            recipient_index: request.recipient_index.clone(),
            recipient_address: request.recipient_address.clone(),
            recipient_name: request.recipient_name.clone(),
            status: ItemStatus::Registered,
        })
    }

    /// Returns one postal item by id.
    pub fn view(&self, id: Option<ItemId>) -> ServiceResult<ItemResponse> {
        let id = id.ok_or_else(|| ServiceError::invalid_argument("item id is not valid"))?;
        let item = self
            .items
            .get_item(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("item with id ({id}) is not found")))?;
        Ok(item_to_response(item))
    }

    /// Returns one page of all postal items.
    pub fn list_items(&self, page: &PageRequest) -> ServiceResult<Page<ItemResponse>> {
        Ok(self.items.list_items(page)?.map(item_to_response))
    }

    /// Returns one page of the items currently at the given office.
    pub fn office_items(
        &self,
        office_id: Option<OfficeId>,
        page: &PageRequest,
    ) -> ServiceResult<Page<ItemResponse>> {
        let office_id =
            office_id.ok_or_else(|| ServiceError::invalid_argument("post office id is not valid"))?;
        if !self.offices.office_exists(office_id)? {
            return Err(ServiceError::NotFound(format!(
                "post office with id ({office_id}) is not found"
            )));
        }
        Ok(self
            .items
            .list_office_items(office_id, page)?
            .map(item_to_response))
    }

    /// Marks the item as arrived at a post office.
    pub fn arrive(&self, request: &TransitionRequest) -> ServiceResult<ItemResponse> {
        self.update_item(request, ItemStatus::Arrived)
    }

    /// Marks the item as departed from a post office.
    pub fn depart(&self, request: &TransitionRequest) -> ServiceResult<ItemResponse> {
        self.update_item(request, ItemStatus::Departed)
    }

    /// Marks the item as received by the addressee.
    pub fn receive(&self, request: &TransitionRequest) -> ServiceResult<ItemResponse> {
        self.update_item(request, ItemStatus::Received)
    }

    /// Validates and applies one status transition.
    ///
    /// Arrivals and receipts accept any existing office; only departures
    /// are pinned to the office the item most recently arrived at.
    fn update_item(
        &self,
        request: &TransitionRequest,
        target: ItemStatus,
    ) -> ServiceResult<ItemResponse> {
        let item_id = request
            .item_id
            .ok_or_else(|| ServiceError::invalid_argument("item id is not valid"))?;
        let office_id = request
            .office_id
            .ok_or_else(|| ServiceError::invalid_argument("post office id is not valid"))?;

        let item = self.items.get_item(item_id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("item with id ({item_id}) is not found"))
        })?;

        if item.status.is_terminal() {
            return Err(ServiceError::invalid_argument(format!(
                "item with id ({item_id}) has already been RECEIVED"
            )));
        }

        let office = self.offices.get_office(office_id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("post office with id ({office_id}) is not found"))
        })?;

        if target == ItemStatus::Departed {
            match item.office_id {
                None => {
                    return Err(ServiceError::invalid_argument(format!(
                        "item with id ({item_id}) did not arrive to post office yet"
                    )));
                }
                Some(current) if current != office.id => {
                    return Err(ServiceError::invalid_argument(format!(
                        "item with id ({item_id}) cannot depart from a post office ({office_id}) to which it did not arrive"
                    )));
                }
                Some(_) => {}
            }
        }

        self.items.apply_transition(item_id, office.id, target)?;

        Ok(item_to_response(PostalItem {
            status: target,
            office_id: Some(office.id),
            ..item
        }))
    }
}
