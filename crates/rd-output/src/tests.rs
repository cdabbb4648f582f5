//! Integration tests for rd-output.

#[cfg(test)]
mod fixtures {
    use crate::row::{DispatchEventRow, TickSummaryRow, VehicleSnapshotRow};

    pub fn snap_row(vehicle_id: u32, tick: u64) -> VehicleSnapshotRow {
        VehicleSnapshotRow {
            tick,
            vehicle_id,
            name:        format!("AMB-{vehicle_id}"),
            capability:  "MEDICAL",
            status:      "IDLE",
            lat:         18.9,
            lng:         72.8,
            incident_id: None,
            waypoints:   0,
            cursor:      0,
        }
    }

    pub fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow { tick, sim_time_ms: tick * 100, dispatched: 2, idle: 3, ..TickSummaryRow::default() }
    }

    pub fn event_row(tick: u64, kind: &'static str, incident_id: Option<u32>) -> DispatchEventRow {
        DispatchEventRow { tick, sim_time_ms: tick * 100, kind, vehicle_id: 1, incident_id }
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, EVENT_HEADER, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::writer::OutputWriter;

    use super::fixtures::{event_row, snap_row, summary_row};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("vehicle_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("dispatch_events.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        for (file, expected) in [
            ("vehicle_snapshots.csv", &SNAPSHOT_HEADER[..]),
            ("tick_summaries.csv", &SUMMARY_HEADER[..]),
            ("dispatch_events.csv", &EVENT_HEADER[..]),
        ] {
            let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
            let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
            assert_eq!(headers, expected, "{file}");
        }
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let mut busy = snap_row(1, 5);
        busy.status = "BUSY";
        busy.incident_id = Some(17);
        w.write_snapshots(&[snap_row(0, 5), busy]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "vehicle_snapshots.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "AMB-0");
        assert_eq!(&rows[0][7], "", "idle vehicle has an empty incident cell");
        assert_eq!(&rows[1][4], "BUSY");
        assert_eq!(&rows[1][7], "17");
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "300");
        assert_eq!(&rows[0][3], "2"); // dispatched
        assert_eq!(&rows[0][8], "3"); // idle
    }

    #[test]
    fn csv_event_rows_keep_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[event_row(4, "recalled", Some(2)), event_row(4, "dispatched", Some(3))]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "dispatch_events.csv");
        let kinds: Vec<&str> = rows.iter().map(|r| &r[2]).collect();
        assert_eq!(kinds, ["recalled", "dispatched"]);
        assert_eq!(&rows[1][4], "3");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_events(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use rd_core::{Capability, GeoPoint, IncidentId, NeedType, SimConfig, Tick, VehicleId};
    use rd_dispatch::DispatchEvent;
    use rd_fleet::{IncidentReport, VehicleRegistry};
    use rd_sim::{SimBuilder, SimObserver, TickSummary};
    use rd_spatial::{Pathfinder, RoadNetworkBuilder};

    use crate::row::{DispatchEventRow, TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputError, OutputResult, SimOutputObserver};

    fn config() -> SimConfig {
        SimConfig {
            total_ticks:                30,
            vehicle_speed_deg_per_tick: 0.25,
            snapshot_interval_ticks:    10,
            ..SimConfig::default()
        }
    }

    #[test]
    fn integration_csv() {
        let mut b = RoadNetworkBuilder::new();
        b.add_node("A", GeoPoint::new(0.0, 0.0));
        b.add_node("B", GeoPoint::new(0.0, 1.0));
        b.add_road("A", "B");
        let pathfinder = Pathfinder::dijkstra(Arc::new(b.build().unwrap()));

        let mut roster = VehicleRegistry::new();
        roster.add("AMB-1", Capability::Medical, GeoPoint::new(0.0, 0.0));
        roster.add("FIRE-1", Capability::Fire, GeoPoint::new(0.0, 0.0));

        let report = IncidentReport::new(IncidentId(9), 8.5, NeedType::Medical, GeoPoint::new(0.0, 1.0));
        let mut sim = SimBuilder::new(config(), roster, pathfinder).incidents([report]).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &sim.config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // interval = 10 → snapshots at ticks 0, 10, 20 (3 × 2 vehicles)
        assert_eq!(rows(&dir, "vehicle_snapshots.csv").len(), 6);
        assert_eq!(rows(&dir, "tick_summaries.csv").len(), 30);

        let events = rows(&dir, "dispatch_events.csv");
        let kinds: Vec<&str> = events.iter().map(|r| &r[2]).collect();
        assert_eq!(kinds, ["dispatched", "route_attached", "arrived"]);
        assert!(events.iter().all(|r| &r[3] == "0" && &r[4] == "9"));
    }

    #[test]
    fn events_after_the_last_tick_are_written_on_sim_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &config());
        obs.on_tick_end(&TickSummary { tick: Tick(0), ..TickSummary::default() });
        obs.on_event(Tick(1), &DispatchEvent::ReturnedToBase {
            vehicle:  VehicleId(2),
            incident: Some(IncidentId(7)),
            resolved: true,
        });
        obs.on_sim_end(Tick(1));
        assert!(obs.take_error().is_none());

        let events = rows(&dir, "dispatch_events.csv");
        assert_eq!(events.len(), 1);
        assert_eq!(&events[0][0], "1");
        assert_eq!(&events[0][2], "returned_to_base");
        assert_eq!(&events[0][3], "2");
        assert_eq!(&events[0][4], "7");
    }

    fn rows(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    /// Fails every summary write; counts finish calls.
    #[derive(Default)]
    struct Broken {
        attempts: usize,
        finished: usize,
    }

    impl OutputWriter for Broken {
        fn write_snapshots(&mut self, _rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("disk full at {}", row.tick))))
        }

        fn write_events(&mut self, _rows: &[DispatchEventRow]) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept_and_run_continues() {
        let mut obs = SimOutputObserver::new(Broken::default(), &config());
        for t in 0..3 {
            obs.on_tick_end(&TickSummary { tick: Tick(t), ..TickSummary::default() });
        }
        obs.on_sim_end(Tick(3));

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("disk full at 0"), "{err}");
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.attempts, 3);
        assert_eq!(writer.finished, 1);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    use super::fixtures::{event_row, snap_row, summary_row};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn open(dir: &TempDir) -> rusqlite::Connection {
        rusqlite::Connection::open(dir.path().join("output.db")).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1), snap_row(2, 1)]).unwrap();
        w.finish().unwrap();

        let count: i64 = open(&dir).query_row("SELECT COUNT(*) FROM vehicle_snapshots", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_idle_incident_is_null() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 0)]).unwrap();
        w.finish().unwrap();

        let val: Option<i64> = open(&dir)
            .query_row("SELECT incident_id FROM vehicle_snapshots WHERE vehicle_id = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(val, None);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let (tick, ms, dispatched): (i64, i64, i64) = open(&dir)
            .query_row(
                "SELECT tick, sim_time_ms, dispatched FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((tick, ms, dispatched), (7, 700, 2));
    }

    #[test]
    fn sqlite_events_in_insertion_order() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_events(&[event_row(2, "dispatched", Some(5)), event_row(2, "route_attached", Some(5))]).unwrap();
        w.write_events(&[event_row(9, "arrived", None)]).unwrap();
        w.finish().unwrap();

        let conn = open(&dir);
        let mut stmt = conn.prepare("SELECT kind FROM dispatch_events ORDER BY seq").unwrap();
        let kinds: Vec<String> = stmt.query_map([], |r| r.get(0)).unwrap().map(|k| k.unwrap()).collect();
        assert_eq!(kinds, ["dispatched", "route_attached", "arrived"]);
    }
}
