//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `statistics.db` file in the configured output directory
//! with four tables: `deliveries`, `drinks`, `refills` and `requests`.

use std::path::Path;

use rusqlite::Connection;

use crate::{DeliveryRow, DrinkRow, OutputResult, RefillRow, RequestRow};
use crate::writer::OutputWriter;

/// Writes statistics to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `statistics.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("statistics.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS deliveries (
                 camel       INTEGER NOT NULL,
                 camel_type  INTEGER NOT NULL,
                 request     INTEGER NOT NULL,
                 warehouse   INTEGER NOT NULL,
                 oasis       INTEGER NOT NULL,
                 load        INTEGER NOT NULL,
                 departs_at  REAL    NOT NULL,
                 delivers_at REAL    NOT NULL,
                 returns_at  REAL    NOT NULL,
                 walked      REAL    NOT NULL,
                 path        TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS drinks (
                 camel   INTEGER NOT NULL,
                 request INTEGER NOT NULL,
                 node    INTEGER NOT NULL,
                 time    REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS refills (
                 warehouse INTEGER NOT NULL,
                 time      REAL    NOT NULL,
                 before    INTEGER NOT NULL,
                 after     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS requests (
                 request      INTEGER PRIMARY KEY,
                 oasis        INTEGER NOT NULL,
                 baskets      INTEGER NOT NULL,
                 arrival      REAL    NOT NULL,
                 deadline     REAL    NOT NULL,
                 delivered    INTEGER NOT NULL,
                 delivered_at REAL,
                 state        TEXT    NOT NULL,
                 camels       INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_delivery(&mut self, row: &DeliveryRow, drinks: &[DrinkRow]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO deliveries \
             (camel, camel_type, request, warehouse, oasis, load, \
              departs_at, delivers_at, returns_at, walked, path) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                row.camel,
                row.camel_type,
                row.request,
                row.warehouse,
                row.oasis,
                row.load,
                row.departs_at,
                row.delivers_at,
                row.returns_at,
                row.walked,
                row.path,
            ],
        )?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO drinks (camel, request, node, time) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for d in drinks {
                stmt.execute(rusqlite::params![d.camel, d.request, d.node, d.time])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_refill(&mut self, row: &RefillRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO refills (warehouse, time, before, after) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.warehouse, row.time, row.before, row.after],
        )?;
        Ok(())
    }

    fn write_requests(&mut self, rows: &[RequestRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO requests \
                 (request, oasis, baskets, arrival, deadline, delivered, delivered_at, state, camels) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for r in rows {
                stmt.execute(rusqlite::params![
                    r.request,
                    r.oasis,
                    r.baskets,
                    r.arrival,
                    r.deadline,
                    r.delivered,
                    r.delivered_at,
                    r.state,
                    r.camels,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
