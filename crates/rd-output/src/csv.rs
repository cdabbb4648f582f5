//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`
//! - `dispatch_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::opt_cell;
use crate::writer::OutputWriter;
use crate::{DispatchEventRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

pub const SNAPSHOT_HEADER: [&str; 10] = [
    "tick", "vehicle_id", "name", "capability", "status", "lat", "lng", "incident_id", "waypoints", "cursor",
];

pub const SUMMARY_HEADER: [&str; 12] = [
    "tick", "sim_time_ms", "new_incidents", "dispatched", "routes_applied", "routes_stale",
    "moving", "arrivals", "idle", "en_route", "busy", "waiting",
];

pub const EVENT_HEADER: [&str; 5] = ["tick", "sim_time_ms", "kind", "vehicle_id", "incident_id"];

/// Writes run output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut events = Writer::from_path(dir.join("dispatch_events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        Ok(Self { snapshots, summaries, events, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.vehicle_id.to_string(),
                row.name.clone(),
                row.capability.to_owned(),
                row.status.to_owned(),
                row.lat.to_string(),
                row.lng.to_string(),
                opt_cell(row.incident_id),
                row.waypoints.to_string(),
                row.cursor.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.sim_time_ms.to_string(),
            row.new_incidents.to_string(),
            row.dispatched.to_string(),
            row.routes_applied.to_string(),
            row.routes_stale.to_string(),
            row.moving.to_string(),
            row.arrivals.to_string(),
            row.idle.to_string(),
            row.en_route.to_string(),
            row.busy.to_string(),
            row.waiting.to_string(),
        ])?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[DispatchEventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.sim_time_ms.to_string(),
                row.kind.to_owned(),
                row.vehicle_id.to_string(),
                opt_cell(row.incident_id),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
