//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use rd_core::{SimConfig, Tick};
use rd_dispatch::{DispatchCoordinator, DispatchPolicy, InlineRouteService, NearestIdlePolicy, RouteService};
use rd_fleet::{IncidentLedger, IncidentReport, VehicleRegistry};
use rd_mobility::MovementSimulator;
use rd_spatial::Pathfinder;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<P, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick duration, speed, threshold, …
/// - [`VehicleRegistry`]: the roster, all vehicles IDLE
/// - [`Pathfinder`]: the routing engine over the road network
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                          |
/// |-----------------------|--------------------------------------------------|
/// | `.policy(p)`          | `NearestIdlePolicy` at `config.severity_threshold` |
/// | `.route_service(s)`   | `InlineRouteService` over the given pathfinder   |
/// | `.incidents(v)`       | none; reports delivered at tick 0                |
/// | `.schedule(t, r)`     | none; report delivered at tick `t`               |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, roster, Pathfinder::dijkstra(network))
///     .incidents(reports)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: DispatchPolicy = NearestIdlePolicy, S: RouteService = InlineRouteService> {
    config:   SimConfig,
    vehicles: VehicleRegistry,
    policy:   P,
    routes:   S,
    schedule: Vec<(Tick, IncidentReport)>,
}

impl SimBuilder<NearestIdlePolicy, InlineRouteService> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, vehicles: VehicleRegistry, pathfinder: Pathfinder) -> Self {
        let policy = NearestIdlePolicy::new(config.severity_threshold);
        Self {
            config,
            vehicles,
            policy,
            routes: InlineRouteService::new(pathfinder),
            schedule: Vec::new(),
        }
    }
}

impl<P: DispatchPolicy, S: RouteService> SimBuilder<P, S> {
    /// Replace the auto-dispatch policy.
    pub fn policy<Q: DispatchPolicy>(self, policy: Q) -> SimBuilder<Q, S> {
        SimBuilder {
            config:   self.config,
            vehicles: self.vehicles,
            policy,
            routes:   self.routes,
            schedule: self.schedule,
        }
    }

    /// Replace the route service (e.g. with a `PooledRouteService`).
    pub fn route_service<T: RouteService>(self, routes: T) -> SimBuilder<P, T> {
        SimBuilder {
            config:   self.config,
            vehicles: self.vehicles,
            policy:   self.policy,
            routes,
            schedule: self.schedule,
        }
    }

    /// Reports to deliver at tick 0, in order.
    pub fn incidents(mut self, reports: impl IntoIterator<Item = IncidentReport>) -> Self {
        self.schedule.extend(reports.into_iter().map(|r| (Tick::ZERO, r)));
        self
    }

    /// Deliver `report` at the start of tick `at`.
    pub fn schedule(mut self, at: Tick, report: IncidentReport) -> Self {
        self.schedule.push((at, report));
        self
    }

    /// Validate the configuration and every scheduled report, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, S>> {
        self.config.validate()?;

        let mut intake: BTreeMap<Tick, Vec<IncidentReport>> = BTreeMap::new();
        for (at, report) in self.schedule {
            report.validate()?;
            intake.entry(at).or_default().push(report);
        }

        Ok(Sim {
            clock:       self.config.make_clock(),
            mobility:    MovementSimulator::from_config(&self.config),
            config:      self.config,
            vehicles:    self.vehicles,
            incidents:   IncidentLedger::new(),
            coordinator: DispatchCoordinator::new(self.policy),
            routes:      self.routes,
            intake,
            pending:     Vec::new(),
        })
    }
}
