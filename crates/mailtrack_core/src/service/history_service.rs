//! History reader service.
//!
//! # Responsibility
//! - Provide paginated access to a postal item's history ledger.
//!
//! # Invariants
//! - Pages are delivered in store order (insertion order).

use crate::model::item::ItemId;
use crate::page::{Page, PageRequest};
use crate::repo::history_repo::{HistoryRecord, HistoryRepository};
use crate::repo::item_repo::ItemRepository;
use crate::service::{ServiceError, ServiceResult};

/// Use-case service for reading the history ledger.
pub struct HistoryService<H: HistoryRepository, I: ItemRepository> {
    history: H,
    items: I,
}

impl<H: HistoryRepository, I: ItemRepository> HistoryService<H, I> {
    /// Creates a service from history and item repository implementations.
    pub fn new(history: H, items: I) -> Self {
        Self { history, items }
    }

    /// Returns one page of history records for the given item.
    pub fn find_by_item(
        &self,
        item_id: Option<ItemId>,
        page: &PageRequest,
    ) -> ServiceResult<Page<HistoryRecord>> {
        let item_id =
            item_id.ok_or_else(|| ServiceError::invalid_argument("postal item id is not valid"))?;
        if !self.items.item_exists(item_id)? {
            return Err(ServiceError::NotFound(format!(
                "postal item with id ({item_id}) is not found"
            )));
        }
        Ok(self.history.list_item_history(item_id, page)?)
    }
}
