//! Core domain logic for the mail-tracking backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod page;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::history::{HistoryEntry, HistoryId};
pub use model::item::{ItemId, ItemStatus, ItemType, NewPostalItem, PostalItem};
pub use model::office::{NewPostOffice, OfficeId, PostOffice};
pub use page::{InvalidPageRequest, Page, PageRequest};
pub use repo::history_repo::{HistoryRecord, HistoryRepository, SqliteHistoryRepository};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::office_repo::{OfficeRepository, SqliteOfficeRepository};
pub use repo::{RepoError, RepoResult};
pub use service::history_service::HistoryService;
pub use service::item_service::{
    item_to_response, ItemResponse, ItemService, RegisterItemRequest, TransitionRequest,
};
pub use service::office_service::{
    office_to_response, CreateOfficeRequest, OfficeResponse, OfficeService, UpdateOfficeRequest,
};
pub use service::{ErrorKind, ErrorResponse, FieldError, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
