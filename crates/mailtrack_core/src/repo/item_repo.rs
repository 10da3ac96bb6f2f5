//! Postal item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence for `postal_item` records and their status writes.
//! - Keep registration and transition writes atomic (item row + ledger row).
//!
//! # Invariants
//! - `create_item` seeds exactly one `registered` history row in the same
//!   transaction as the item insert.
//! - `apply_transition` never updates the item without appending the
//!   matching history row.
//! - Read paths reject invalid persisted status/type text instead of
//!   masking it.

use crate::model::item::{ItemId, ItemStatus, ItemType, NewPostalItem, PostalItem};
use crate::model::office::OfficeId;
use crate::page::{Page, PageRequest};
use crate::repo::{ensure_schema_version, ensure_table_with_columns, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const ITEM_SELECT_SQL: &str = "SELECT
    item_id,
    item_type,
    recipient_index,
    recipient_address,
    recipient_name,
    status,
    office_id
FROM postal_item";

/// Repository interface for postal item persistence.
pub trait ItemRepository {
    /// Inserts a new item with status `registered`, no office, and its seed
    /// history row. Returns the store-assigned id.
    fn create_item(&self, item: &NewPostalItem) -> RepoResult<ItemId>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<PostalItem>>;
    fn item_exists(&self, id: ItemId) -> RepoResult<bool>;
    /// Applies one accepted transition: sets status and office, appends the
    /// history row. All-or-nothing.
    fn apply_transition(
        &self,
        item_id: ItemId,
        office_id: OfficeId,
        status: ItemStatus,
    ) -> RepoResult<()>;
    fn list_items(&self, page: &PageRequest) -> RepoResult<Page<PostalItem>>;
    fn list_office_items(
        &self,
        office_id: OfficeId,
        page: &PageRequest,
    ) -> RepoResult<Page<PostalItem>>;
}

/// SQLite-backed postal item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_with_columns(
            conn,
            "postal_item",
            &[
                "item_id",
                "item_type",
                "recipient_index",
                "recipient_address",
                "recipient_name",
                "status",
                "office_id",
            ],
        )?;
        ensure_table_with_columns(
            conn,
            "history_item",
            &["history_id", "item_id", "status", "recorded_at"],
        )?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &NewPostalItem) -> RepoResult<ItemId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO postal_item (
                item_type,
                recipient_index,
                recipient_address,
                recipient_name,
                status,
                office_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, NULL);",
            params![
                item_type_to_db(item.kind),
                item.recipient_index.as_str(),
                item.recipient_address.as_str(),
                item.recipient_name.as_str(),
                item_status_to_db(ItemStatus::Registered),
            ],
        )?;
        let item_id = tx.last_insert_rowid();

        append_history_in_tx(&tx, item_id, ItemStatus::Registered)?;

        tx.commit()?;
        Ok(item_id)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<PostalItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE item_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn item_exists(&self, id: ItemId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM postal_item WHERE item_id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn apply_transition(
        &self,
        item_id: ItemId,
        office_id: OfficeId,
        status: ItemStatus,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "UPDATE postal_item
             SET
                status = ?1,
                office_id = ?2
             WHERE item_id = ?3;",
            params![item_status_to_db(status), office_id, item_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "postal item",
                id: item_id,
            });
        }

        append_history_in_tx(&tx, item_id, status)?;

        tx.commit()?;
        Ok(())
    }

    fn list_items(&self, page: &PageRequest) -> RepoResult<Page<PostalItem>> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM postal_item;", [], |row| row.get(0))?;

        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             ORDER BY item_id ASC
             LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![page.page_size(), page.offset()])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(Page::new(items, page, total as u64))
    }

    fn list_office_items(
        &self,
        office_id: OfficeId,
        page: &PageRequest,
    ) -> RepoResult<Page<PostalItem>> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM postal_item WHERE office_id = ?1;",
            [office_id],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE office_id = ?1
             ORDER BY item_id ASC
             LIMIT ?2 OFFSET ?3;"
        ))?;
        let mut rows = stmt.query(params![office_id, page.page_size(), page.offset()])?;

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(Page::new(items, page, total as u64))
    }
}

fn append_history_in_tx(tx: &Transaction<'_>, item_id: ItemId, status: ItemStatus) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO history_item (item_id, status, recorded_at)
         VALUES (?1, ?2, (strftime('%s', 'now') * 1000));",
        params![item_id, item_status_to_db(status)],
    )?;
    Ok(())
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<PostalItem> {
    let type_text: String = row.get("item_type")?;
    let kind = parse_item_type(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid item type `{type_text}` in postal_item.item_type"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_item_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid item status `{status_text}` in postal_item.status"
        ))
    })?;

    Ok(PostalItem {
        id: row.get("item_id")?,
        kind,
        recipient_index: row.get("recipient_index")?,
        recipient_address: row.get("recipient_address")?,
        recipient_name: row.get("recipient_name")?,
        status,
        office_id: row.get("office_id")?,
    })
}

fn item_type_to_db(kind: ItemType) -> &'static str {
    match kind {
        ItemType::Letter => "letter",
        ItemType::Parcel => "parcel",
        ItemType::Package => "package",
        ItemType::Postcard => "postcard",
    }
}

pub(crate) fn parse_item_type(value: &str) -> Option<ItemType> {
    match value {
        "letter" => Some(ItemType::Letter),
        "parcel" => Some(ItemType::Parcel),
        "package" => Some(ItemType::Package),
        "postcard" => Some(ItemType::Postcard),
        _ => None,
    }
}

pub(crate) fn item_status_to_db(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Registered => "registered",
        ItemStatus::Arrived => "arrived",
        ItemStatus::Departed => "departed",
        ItemStatus::Received => "received",
    }
}

pub(crate) fn parse_item_status(value: &str) -> Option<ItemStatus> {
    match value {
        "registered" => Some(ItemStatus::Registered),
        "arrived" => Some(ItemStatus::Arrived),
        "departed" => Some(ItemStatus::Departed),
        "received" => Some(ItemStatus::Received),
        _ => None,
    }
}
