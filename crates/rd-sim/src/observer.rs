//! Simulation observer trait for progress reporting and data collection.

use rd_core::Tick;
use rd_dispatch::DispatchEvent;
use rd_fleet::{IncidentLedger, VehicleRegistry};

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickSummary {
    pub tick:           Tick,
    /// Incidents that entered the ledger this tick.
    pub new_incidents:  usize,
    pub dispatched:     usize,
    pub routes_applied: usize,
    pub routes_stale:   usize,
    /// Vehicles whose position changed.
    pub moving:         usize,
    pub arrivals:       usize,
    /// Fleet status after the tick.
    pub idle:           usize,
    pub en_route:       usize,
    pub busy:           usize,
    /// Open incidents without a vehicle after the tick.
    pub waiting:        usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: dispatch log
///
/// ```rust,ignore
/// struct DispatchLog;
///
/// impl SimObserver for DispatchLog {
///     fn on_event(&mut self, tick: Tick, event: &DispatchEvent) {
///         println!("{tick}: {} {}", event.kind(), event.vehicle());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per dispatch event, in the order the events happened.
    fn on_event(&mut self, _tick: Tick, _event: &DispatchEvent) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to the fleet and the ledger.
    fn on_snapshot(
        &mut self,
        _tick:      Tick,
        _vehicles:  &VehicleRegistry,
        _incidents: &IncidentLedger,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
