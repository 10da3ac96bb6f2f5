//! History ledger repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide paginated reads over the append-only `history_item` ledger.
//! - Own the joined read model the history page exposes.
//!
//! # Invariants
//! - Pages are delivered in store order (`history_id ASC`, i.e. insertion
//!   order).
//! - Office columns reflect the item's current office, not the office at
//!   the time the entry was written.

use crate::model::history::HistoryEntry;
use crate::model::item::{ItemId, ItemStatus, ItemType};
use crate::model::office::OfficeId;
use crate::page::{Page, PageRequest};
use crate::repo::item_repo::{parse_item_status, parse_item_type};
use crate::repo::{ensure_schema_version, ensure_table_with_columns, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use serde::Serialize;

/// Read model for one history page row: ledger entry joined with its item
/// and the item's current office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub item_id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub recipient_name: String,
    pub status: ItemStatus,
    pub office_id: Option<OfficeId>,
    pub office_name: Option<String>,
    /// Time of the operation in Unix epoch milliseconds.
    pub recorded_at: i64,
}

/// Repository interface for history ledger reads.
pub trait HistoryRepository {
    fn list_item_history(
        &self,
        item_id: ItemId,
        page: &PageRequest,
    ) -> RepoResult<Page<HistoryRecord>>;
    /// Returns the most recently appended ledger entry for the item.
    fn last_entry(&self, item_id: ItemId) -> RepoResult<Option<HistoryEntry>>;
}

/// SQLite-backed history repository.
pub struct SqliteHistoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHistoryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_with_columns(
            conn,
            "history_item",
            &["history_id", "item_id", "status", "recorded_at"],
        )?;
        ensure_table_with_columns(conn, "postal_item", &["item_id", "office_id"])?;
        ensure_table_with_columns(conn, "post_office", &["office_id", "name"])?;
        Ok(Self { conn })
    }
}

impl HistoryRepository for SqliteHistoryRepository<'_> {
    fn list_item_history(
        &self,
        item_id: ItemId,
        page: &PageRequest,
    ) -> RepoResult<Page<HistoryRecord>> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM history_item WHERE item_id = ?1;",
            [item_id],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT
                h.item_id,
                i.item_type,
                i.recipient_name,
                h.status,
                i.office_id,
                o.name AS office_name,
                h.recorded_at
             FROM history_item h
             INNER JOIN postal_item i ON i.item_id = h.item_id
             LEFT JOIN post_office o ON o.office_id = i.office_id
             WHERE h.item_id = ?1
             ORDER BY h.history_id ASC
             LIMIT ?2 OFFSET ?3;",
        )?;
        let mut rows = stmt.query(params![item_id, page.page_size(), page.offset()])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_history_row(row)?);
        }

        Ok(Page::new(records, page, total as u64))
    }

    fn last_entry(&self, item_id: ItemId) -> RepoResult<Option<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT history_id, item_id, status, recorded_at
             FROM history_item
             WHERE item_id = ?1
             ORDER BY history_id DESC
             LIMIT 1;",
        )?;

        let mut rows = stmt.query([item_id])?;
        if let Some(row) = rows.next()? {
            let status_text: String = row.get("status")?;
            let status = parse_item_status(&status_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid item status `{status_text}` in history_item.status"
                ))
            })?;
            return Ok(Some(HistoryEntry {
                id: row.get("history_id")?,
                item_id: row.get("item_id")?,
                status,
                recorded_at: row.get("recorded_at")?,
            }));
        }

        Ok(None)
    }
}

fn parse_history_row(row: &Row<'_>) -> RepoResult<HistoryRecord> {
    let type_text: String = row.get("item_type")?;
    let kind = parse_item_type(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid item type `{type_text}` in postal_item.item_type"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_item_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid item status `{status_text}` in history_item.status"
        ))
    })?;

    Ok(HistoryRecord {
        item_id: row.get("item_id")?,
        kind,
        recipient_name: row.get("recipient_name")?,
        status,
        office_id: row.get("office_id")?,
        office_name: row.get("office_name")?,
        recorded_at: row.get("recorded_at")?,
    })
}
