// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::path::Path;

use rusqlite::{params, Connection};
use sklad_model::{GoodId, GoodRecord, LocationStock, NormalizedGood};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Outcome of one document upsert, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub good_id: GoodId,
    pub locations_written: usize,
}

/// One exclusive SQLite session. Owns the connection explicitly; there
/// is no ambient global handle. Callers must serialize concurrent runs
/// externally: the composite-key subquery in the stock upsert is not
/// atomic across writers.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError(e.to_string()))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Idempotent schema creation. The foreign key on `id_good` is
    /// declared but not enforced at write time, so a document may carry
    /// its good and stock rows in either creation order.
    pub fn ensure_tables(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS goods (
                  id INTEGER NOT NULL PRIMARY KEY,
                  name TEXT NOT NULL,
                  package_height REAL NOT NULL,
                  package_width REAL NOT NULL
                );
                CREATE TABLE IF NOT EXISTS shops_goods (
                  id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                  id_good INTEGER NOT NULL REFERENCES goods(id),
                  location TEXT NOT NULL,
                  amount INTEGER NOT NULL
                );
                ",
            )
            .map_err(|e| StoreError(e.to_string()))
    }

    /// Writes one good and all of its stock rows in a single
    /// transaction: on any failure nothing of the document persists.
    ///
    /// The good row is an atomic replace by primary key. Stock rows are
    /// keyed by the natural (`id_good`, `location`) pair: the scalar
    /// subquery resolves an existing synthetic row id so the replace
    /// lands on the same row, and yields NULL for an unseen pair so
    /// AUTOINCREMENT assigns a fresh one. Locations missing from the
    /// document are left untouched.
    pub fn upsert_good_with_stock(
        &mut self,
        record: &NormalizedGood,
    ) -> Result<UpsertOutcome, StoreError> {
        self.ensure_tables()?;

        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError(e.to_string()))?;
        {
            let good = record.good_record();
            tx.execute(
                "INSERT OR REPLACE INTO goods (id, name, package_height, package_width)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    good.id.as_i64(),
                    good.name,
                    good.package_height,
                    good.package_width
                ],
            )
            .map_err(|e| StoreError(e.to_string()))?;

            let mut stock_stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO shops_goods (id, id_good, location, amount)
                     VALUES (
                       (SELECT id FROM shops_goods
                        WHERE id_good = ?1 AND location = ?2),
                       ?1, ?2, ?3)",
                )
                .map_err(|e| StoreError(e.to_string()))?;
            for row in record.location_stock() {
                stock_stmt
                    .execute(params![row.good_id.as_i64(), row.location, row.amount])
                    .map_err(|e| StoreError(e.to_string()))?;
            }
        }
        tx.commit().map_err(|e| StoreError(e.to_string()))?;

        Ok(UpsertOutcome {
            good_id: record.id,
            locations_written: record.locations.len(),
        })
    }

    pub fn good(&self, id: GoodId) -> Result<Option<GoodRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, package_height, package_width FROM goods WHERE id = ?1")
            .map_err(|e| StoreError(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id.as_i64()], |row| {
                Ok(GoodRecord {
                    id: GoodId::new(row.get(0)?),
                    name: row.get(1)?,
                    package_height: row.get(2)?,
                    package_width: row.get(3)?,
                })
            })
            .map_err(|e| StoreError(e.to_string()))?;
        rows.next()
            .transpose()
            .map_err(|e| StoreError(e.to_string()))
    }

    /// Stock rows for one good, ordered by location for determinism.
    pub fn stock_for(&self, id: GoodId) -> Result<Vec<LocationStock>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id_good, location, amount FROM shops_goods
                 WHERE id_good = ?1 ORDER BY location",
            )
            .map_err(|e| StoreError(e.to_string()))?;
        let rows = stmt
            .query_map(params![id.as_i64()], |row| {
                Ok(LocationStock {
                    good_id: GoodId::new(row.get(0)?),
                    location: row.get(1)?,
                    amount: row.get(2)?,
                })
            })
            .map_err(|e| StoreError(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError(e.to_string()))
    }

    pub fn good_count(&self) -> Result<i64, StoreError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM goods", [], |row| row.get(0))
            .map_err(|e| StoreError(e.to_string()))
    }

    pub fn stock_row_count(&self, id: GoodId) -> Result<i64, StoreError> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM shops_goods WHERE id_good = ?1",
                params![id.as_i64()],
                |row| row.get(0),
            )
            .map_err(|e| StoreError(e.to_string()))
    }

    pub fn table_names(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .map_err(|e| StoreError(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError(e.to_string()))
    }
}
