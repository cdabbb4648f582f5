//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `vehicle_snapshots`, `tick_summaries` and `dispatch_events`.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::writer::OutputWriter;
use crate::{DispatchEventRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS vehicle_snapshots (
                 tick        INTEGER NOT NULL,
                 vehicle_id  INTEGER NOT NULL,
                 name        TEXT    NOT NULL,
                 capability  TEXT    NOT NULL,
                 status      TEXT    NOT NULL,
                 lat         REAL    NOT NULL,
                 lng         REAL    NOT NULL,
                 incident_id INTEGER,
                 waypoints   INTEGER NOT NULL,
                 cursor      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 sim_time_ms    INTEGER NOT NULL,
                 new_incidents  INTEGER NOT NULL,
                 dispatched     INTEGER NOT NULL,
                 routes_applied INTEGER NOT NULL,
                 routes_stale   INTEGER NOT NULL,
                 moving         INTEGER NOT NULL,
                 arrivals       INTEGER NOT NULL,
                 idle           INTEGER NOT NULL,
                 en_route       INTEGER NOT NULL,
                 busy           INTEGER NOT NULL,
                 waiting        INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS dispatch_events (
                 seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                 tick        INTEGER NOT NULL,
                 sim_time_ms INTEGER NOT NULL,
                 kind        TEXT    NOT NULL,
                 vehicle_id  INTEGER NOT NULL,
                 incident_id INTEGER
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_snapshots \
                 (tick, vehicle_id, name, capability, status, lat, lng, incident_id, waypoints, cursor) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.tick as i64,
                    row.vehicle_id,
                    row.name,
                    row.capability,
                    row.status,
                    row.lat,
                    row.lng,
                    row.incident_id,
                    row.waypoints,
                    row.cursor,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, sim_time_ms, new_incidents, dispatched, routes_applied, routes_stale, \
              moving, arrivals, idle, en_route, busy, waiting) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                row.tick as i64,
                row.sim_time_ms as i64,
                row.new_incidents as i64,
                row.dispatched as i64,
                row.routes_applied as i64,
                row.routes_stale as i64,
                row.moving as i64,
                row.arrivals as i64,
                row.idle as i64,
                row.en_route as i64,
                row.busy as i64,
                row.waiting as i64,
            ],
        )?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[DispatchEventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO dispatch_events (tick, sim_time_ms, kind, vehicle_id, incident_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.tick as i64,
                    row.sim_time_ms as i64,
                    row.kind,
                    row.vehicle_id,
                    row.incident_id,
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
