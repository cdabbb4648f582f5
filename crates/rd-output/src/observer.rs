//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use rd_core::{SimConfig, Tick};
use rd_dispatch::DispatchEvent;
use rd_fleet::{IncidentLedger, VehicleRegistry};
use rd_sim::{SimObserver, TickSummary};

use crate::row::{DispatchEventRow, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes vehicle snapshots, tick summaries and
/// dispatch events to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    tick_duration_ms: u64,
    /// Events of the current tick, flushed at tick end.
    events:           Vec<DispatchEventRow>,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for simulated
    /// time conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_ms: config.tick_duration_ms as u64,
            events:           Vec::new(),
            last_error:       None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn sim_time_ms(&self, tick: Tick) -> u64 {
        tick.0 * self.tick_duration_ms
    }

    fn flush_events(&mut self) {
        if !self.events.is_empty() {
            let events = std::mem::take(&mut self.events);
            let result = self.writer.write_events(&events);
            self.store_err(result);
        }
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &DispatchEvent) {
        let row = DispatchEventRow::of(tick, self.sim_time_ms(tick), event);
        self.events.push(row);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.flush_events();

        let row = TickSummaryRow {
            tick:           summary.tick.0,
            sim_time_ms:    self.sim_time_ms(summary.tick),
            new_incidents:  summary.new_incidents as u64,
            dispatched:     summary.dispatched as u64,
            routes_applied: summary.routes_applied as u64,
            routes_stale:   summary.routes_stale as u64,
            moving:         summary.moving as u64,
            arrivals:       summary.arrivals as u64,
            idle:           summary.idle as u64,
            en_route:       summary.en_route as u64,
            busy:           summary.busy as u64,
            waiting:        summary.waiting as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &VehicleRegistry, _incidents: &IncidentLedger) {
        let rows: Vec<VehicleSnapshotRow> = vehicles.iter().map(|v| VehicleSnapshotRow::of(tick, v)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.flush_events();
        let result = self.writer.finish();
        self.store_err(result);
    }
}
