//! Item store backed by a pooled SQLite database.
//!
//! Uses r2d2 with r2d2_sqlite. Every operation checks out one connection,
//! runs a single statement and returns the connection to the pool when it
//! goes out of scope.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::{apply_pragmas, initialize_schema};
use crate::model::{Item, ItemId, NewItem};

const ITEM_COLUMNS: &str =
    "id, name, description, location, date_found, contact_info, claimed";

/// Error type for item store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item {0} not found")]
    NotFound(ItemId),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to the persistent items table.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone)]
pub struct ItemStore {
    pool: Pool<SqliteConnectionManager>,
}

impl ItemStore {
    /// Open (creating on first run) the database at `db_path`.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the SQLite database file
    /// * `max_size` - Maximum number of connections in the pool
    pub fn open<P: AsRef<Path>>(db_path: P, max_size: u32) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(max_size.max(1))
            .connection_customizer(Box::new(PragmaCustomizer))
            .build(manager)?;

        let store = Self { pool };
        initialize_schema(&*store.conn()?)?;

        tracing::info!(path = %db_path.display(), "Item store opened");
        Ok(store)
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.pool.get()?)
    }

    /// All items, most recently found first.
    pub fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY date_found DESC, id DESC"
        ))?;
        let items = stmt
            .query_map([], item_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Fetch one item by id.
    pub fn get(&self, id: ItemId) -> Result<Item, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
            params![id],
            item_from_row,
        )
        .optional()?
        .ok_or(StoreError::NotFound(id))
    }

    /// Persist a new item. The store assigns the id and `claimed` starts false.
    pub fn create(&self, item: &NewItem) -> Result<Item, StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO items (name, description, location, date_found, contact_info)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.name,
                item.description,
                item.location,
                item.date_found,
                item.contact_info,
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Item {
            id,
            name: item.name.clone(),
            description: item.description.clone(),
            location: item.location.clone(),
            date_found: item.date_found,
            contact_info: item.contact_info.clone(),
            claimed: false,
        })
    }

    /// Mark an item as claimed. Claiming twice leaves it claimed.
    pub fn claim(&self, id: ItemId) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute("UPDATE items SET claimed = 1 WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Remove an item.
    pub fn delete(&self, id: ItemId) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Number of stored items.
    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        date_found: row.get(4)?,
        contact_info: row.get(5)?,
        claimed: row.get(6)?,
    })
}

/// Connection customizer that applies pragmas on checkout.
#[derive(Debug)]
struct PragmaCustomizer;

impl r2d2::CustomizeConnection<rusqlite::Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
        apply_pragmas(conn)
    }
}
