//! Post office repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD persistence for `post_office` records.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Deleting an office cascades to items currently referencing it and to
//!   their history rows (schema-level `ON DELETE CASCADE`).

use crate::model::office::{NewPostOffice, OfficeId, PostOffice};
use crate::repo::{ensure_schema_version, ensure_table_with_columns, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const OFFICE_SELECT_SQL: &str = "SELECT
    office_id,
    postal_index,
    name,
    address
FROM post_office";

/// Repository interface for post office CRUD operations.
pub trait OfficeRepository {
    fn create_office(&self, office: &NewPostOffice) -> RepoResult<OfficeId>;
    fn get_office(&self, id: OfficeId) -> RepoResult<Option<PostOffice>>;
    fn office_exists(&self, id: OfficeId) -> RepoResult<bool>;
    fn update_office(&self, office: &PostOffice) -> RepoResult<()>;
    fn delete_office(&self, id: OfficeId) -> RepoResult<()>;
}

/// SQLite-backed post office repository.
pub struct SqliteOfficeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOfficeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table_with_columns(
            conn,
            "post_office",
            &["office_id", "postal_index", "name", "address"],
        )?;
        Ok(Self { conn })
    }
}

impl OfficeRepository for SqliteOfficeRepository<'_> {
    fn create_office(&self, office: &NewPostOffice) -> RepoResult<OfficeId> {
        self.conn.execute(
            "INSERT INTO post_office (postal_index, name, address)
             VALUES (?1, ?2, ?3);",
            params![
                office.index.as_str(),
                office.name.as_str(),
                office.address.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_office(&self, id: OfficeId) -> RepoResult<Option<PostOffice>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OFFICE_SELECT_SQL} WHERE office_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_office_row(row)?));
        }

        Ok(None)
    }

    fn office_exists(&self, id: OfficeId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM post_office WHERE office_id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn update_office(&self, office: &PostOffice) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE post_office
             SET
                postal_index = ?1,
                name = ?2,
                address = ?3
             WHERE office_id = ?4;",
            params![
                office.index.as_str(),
                office.name.as_str(),
                office.address.as_str(),
                office.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "post office",
                id: office.id,
            });
        }

        Ok(())
    }

    fn delete_office(&self, id: OfficeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM post_office WHERE office_id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "post office",
                id,
            });
        }

        Ok(())
    }
}

fn parse_office_row(row: &Row<'_>) -> RepoResult<PostOffice> {
    Ok(PostOffice {
        id: row.get("office_id")?,
        index: row.get("postal_index")?,
        name: row.get("name")?,
        address: row.get("address")?,
    })
}
