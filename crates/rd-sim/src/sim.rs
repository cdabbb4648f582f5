//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use rd_core::{IncidentId, SimClock, SimConfig, Tick, VehicleId};
use rd_dispatch::{DispatchCoordinator, DispatchEvent, DispatchOutcome, DispatchPolicy, InlineRouteService, NearestIdlePolicy, RouteService};
use rd_fleet::{Incident, IncidentLedger, IncidentReport, VehicleRegistry, VehicleSnapshot, VehicleStatus};
use rd_mobility::MovementSimulator;

use crate::{SimObserver, SimResult, TickSummary};

/// The main simulation runner.
///
/// `Sim` owns the fleet and the ledger outright.  Collaborators read them
/// through [`vehicles`](Self::vehicles), [`incidents`](Self::incidents),
/// [`snapshot`](Self::snapshot) and [`feed`](Self::feed), and change them
/// only through the command methods, which route every mutation through the
/// [`DispatchCoordinator`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: DispatchPolicy = NearestIdlePolicy, S: RouteService = InlineRouteService> {
    /// Global configuration (total ticks, tick duration, speed, …).
    pub config: SimConfig,

    /// Simulation clock: current tick and simulated time.
    pub clock: SimClock,

    pub(crate) vehicles:    VehicleRegistry,
    pub(crate) incidents:   IncidentLedger,
    pub(crate) coordinator: DispatchCoordinator<P>,
    pub(crate) mobility:    MovementSimulator,
    pub(crate) routes:      S,

    /// Reports waiting to enter the ledger, keyed by delivery tick.
    pub(crate) intake: BTreeMap<Tick, Vec<IncidentReport>>,

    /// Events not yet handed to an observer.
    pub(crate) pending: Vec<DispatchEvent>,
}

impl<P: DispatchPolicy, S: RouteService> Sim<P, S> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            vehicles = self.vehicles.len(),
            start = %self.clock.current_tick,
            end = %self.config.end_tick(),
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        self.finish(observer);
        info!(
            tick = %self.clock.current_tick,
            incidents = self.incidents.len(),
            resolved = self.incidents.resolved_count(),
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Hand any events left by commands issued after the last tick to the
    /// observer, then call `on_sim_end`.  [`run`](Self::run) does this
    /// itself; callers driving [`step`](Self::step) by hand call it once at
    /// the end.
    pub fn finish<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        for event in self.pending.drain(..) {
            observer.on_event(now, &event);
        }
        observer.on_sim_end(now);
    }

    /// Run one tick and return its summary.
    ///
    /// Events from commands issued since the previous tick are delivered
    /// with this tick's events, tagged with this tick, and counted in its
    /// summary.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let summary = self.process_tick(now);

        for event in self.pending.drain(..) {
            observer.on_event(now, &event);
        }
        observer.on_tick_end(&summary);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.vehicles, &self.incidents);
        }

        self.clock.advance();
        summary
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Add a report to the ledger now and run an auto-dispatch pass.
    pub fn submit_incident(&mut self, report: IncidentReport) -> SimResult<IncidentId> {
        let id = self.incidents.submit(report)?;
        self.dispatch_pass();
        Ok(id)
    }

    /// Deliver `report` at the start of tick `at` (or the next tick, if `at`
    /// is already past).
    pub fn schedule_incident(&mut self, at: Tick, report: IncidentReport) -> SimResult<()> {
        report.validate()?;
        let at = at.max(self.clock.current_tick);
        self.intake.entry(at).or_default().push(report);
        Ok(())
    }

    /// Operator override; see [`DispatchCoordinator::manual_assign`].
    ///
    /// Any incident left without a vehicle by the override is offered to the
    /// idle fleet straight away.  Vehicles recalled by the override sit that
    /// pass out.
    pub fn manual_assign(&mut self, vehicle: VehicleId, incident: Option<IncidentId>) {
        let out = self.coordinator.manual_assign(&mut self.vehicles, &mut self.incidents, vehicle, incident);
        let unlinked = out.events.iter().any(|e| {
            matches!(e, DispatchEvent::Recalled { incident: Some(_), .. } | DispatchEvent::ReturnedToBase { .. })
        });
        let held = recalled(&out);
        self.apply(out);
        if unlinked {
            self.dispatch_pass_holding(&held);
        }
    }

    /// Recall a DISPATCHED vehicle.  Its incident is offered to the rest of
    /// the idle fleet.
    pub fn recall(&mut self, vehicle: VehicleId) {
        let out = self.coordinator.recall(&mut self.vehicles, &mut self.incidents, vehicle);
        let changed = !out.is_empty();
        self.apply(out);
        if changed {
            self.dispatch_pass_holding(&[vehicle]);
        }
    }

    /// Confirm a BUSY vehicle has finished.  The incident is resolved and
    /// the freed vehicle is offered to waiting incidents.
    pub fn return_to_base(&mut self, vehicle: VehicleId) {
        let out = self.coordinator.return_to_base(&mut self.vehicles, &mut self.incidents, vehicle);
        let changed = !out.is_empty();
        self.apply(out);
        if changed {
            self.dispatch_pass();
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn vehicles(&self) -> &VehicleRegistry {
        &self.vehicles
    }

    pub fn incidents(&self) -> &IncidentLedger {
        &self.incidents
    }

    /// Current vehicle positions, statuses, and routes for rendering.
    pub fn snapshot(&self) -> Vec<VehicleSnapshot> {
        self.vehicles.snapshot()
    }

    /// Incidents above the authenticity cut-off, most severe first.
    pub fn feed(&self) -> Vec<&Incident> {
        self.incidents.feed(self.config.min_authenticity)
    }

    /// Route requests not yet resolved.
    pub fn pending_routes(&self) -> usize {
        self.routes.pending()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        // ── Phase 1: incident intake ──────────────────────────────────────
        while let Some(entry) = self.intake.first_entry() {
            if *entry.key() > now {
                break;
            }
            for report in entry.remove() {
                match self.incidents.submit(report) {
                    Ok(_) => {
                        summary.new_incidents += 1;
                        self.dispatch_pass();
                    }
                    Err(e) => warn!(error = %e, "incident rejected"),
                }
            }
        }

        // ── Phase 2: route resolutions ────────────────────────────────────
        for resolution in self.routes.poll() {
            let event = self.coordinator.attach_route(&mut self.vehicles, resolution);
            self.pending.push(event);
        }

        // ── Phase 3: movement ─────────────────────────────────────────────
        let movement = self.mobility.tick(&mut self.vehicles);
        for arrival in &movement.arrivals {
            if let Some(event) = self.coordinator.record_arrival(&self.vehicles, arrival.vehicle) {
                self.pending.push(event);
            }
        }
        summary.moving = movement.moved;
        summary.arrivals = movement.arrivals.len();

        // ── Phase 4: counters ─────────────────────────────────────────────
        for event in &self.pending {
            match event {
                DispatchEvent::Dispatched { .. }          => summary.dispatched += 1,
                DispatchEvent::RouteAttached { .. }       => summary.routes_applied += 1,
                DispatchEvent::StaleRouteDiscarded { .. } => summary.routes_stale += 1,
                _ => {}
            }
        }
        summary.idle = self.vehicles.count_status(VehicleStatus::Idle);
        summary.en_route = self.vehicles.count_status(VehicleStatus::Dispatched);
        summary.busy = self.vehicles.count_status(VehicleStatus::Busy);
        summary.waiting = self.incidents.waiting().count();

        if summary.new_incidents > 0 || summary.arrivals > 0 {
            debug!(
                tick = %now,
                new = summary.new_incidents,
                arrivals = summary.arrivals,
                idle = summary.idle,
                waiting = summary.waiting,
                "tick"
            );
        }
        summary
    }

    fn dispatch_pass(&mut self) {
        self.dispatch_pass_holding(&[]);
    }

    fn dispatch_pass_holding(&mut self, held: &[VehicleId]) {
        let out = self.coordinator.auto_dispatch_holding(&mut self.vehicles, &mut self.incidents, held);
        self.apply(out);
    }

    /// Queue route requests and buffer events for the observer.
    fn apply(&mut self, out: DispatchOutcome) {
        for request in out.requests {
            self.routes.submit(request);
        }
        self.pending.extend(out.events);
    }
}

/// Vehicles an outcome recalled.
fn recalled(out: &DispatchOutcome) -> Vec<VehicleId> {
    out.events
        .iter()
        .filter_map(|e| match e {
            DispatchEvent::Recalled { vehicle, .. } => Some(*vehicle),
            _ => None,
        })
        .collect()
}
