//! Unit tests for rd-sim.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use rd_core::{Capability, GeoPoint, IncidentId, NeedType, SimConfig, Tick};
    use rd_dispatch::DispatchEvent;
    use rd_fleet::{IncidentLedger, IncidentReport, VehicleRegistry};
    use rd_spatial::{Pathfinder, RoadNetworkBuilder};

    use crate::{SimBuilder, SimObserver, TickSummary};

    /// Fast vehicles on a coarse grid so runs finish in a few dozen ticks.
    pub fn config() -> SimConfig {
        SimConfig {
            total_ticks:                40,
            vehicle_speed_deg_per_tick: 0.25,
            snapshot_interval_ticks:    0,
            ..SimConfig::default()
        }
    }

    /// A(0,0) – B(0,1) – C(1,1).
    pub fn pathfinder() -> Pathfinder {
        let mut b = RoadNetworkBuilder::new();
        b.add_node("A", GeoPoint::new(0.0, 0.0));
        b.add_node("B", GeoPoint::new(0.0, 1.0));
        b.add_node("C", GeoPoint::new(1.0, 1.0));
        b.add_road("A", "B");
        b.add_road("B", "C");
        Pathfinder::dijkstra(Arc::new(b.build().unwrap()))
    }

    /// One ambulance parked on A.
    pub fn one_ambulance() -> VehicleRegistry {
        let mut reg = VehicleRegistry::new();
        reg.add("AMB-1", Capability::Medical, GeoPoint::new(0.0, 0.0));
        reg
    }

    /// A medical report on C.
    pub fn at_c(id: u32, severity: f32) -> IncidentReport {
        IncidentReport::new(IncidentId(id), severity, NeedType::Medical, GeoPoint::new(1.0, 1.0))
    }

    /// AMB-1 on A, AMB-2 well off to the east.
    pub fn two_ambulances() -> VehicleRegistry {
        let mut reg = one_ambulance();
        reg.add("AMB-2", Capability::Medical, GeoPoint::new(0.0, 5.0));
        reg
    }

    pub fn builder() -> SimBuilder {
        SimBuilder::new(config(), one_ambulance(), pathfinder())
    }

    #[derive(Default)]
    pub struct Recorder {
        pub events:    Vec<(Tick, &'static str)>,
        pub summaries: Vec<TickSummary>,
        pub snapshots: Vec<Tick>,
        pub ended:     Option<Tick>,
    }

    impl Recorder {
        pub fn kinds(&self) -> Vec<&'static str> {
            self.events.iter().map(|&(_, k)| k).collect()
        }
    }

    impl SimObserver for Recorder {
        fn on_event(&mut self, tick: Tick, event: &DispatchEvent) {
            self.events.push((tick, event.kind()));
        }

        fn on_tick_end(&mut self, summary: &TickSummary) {
            self.summaries.push(*summary);
        }

        fn on_snapshot(&mut self, tick: Tick, _vehicles: &VehicleRegistry, _incidents: &IncidentLedger) {
            self.snapshots.push(tick);
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended = Some(final_tick);
        }
    }
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use rd_core::{GeoPoint, IncidentId, Tick, VehicleId};
    use rd_fleet::VehicleStatus;

    use super::helpers::{Recorder, at_c, builder};

    #[test]
    fn dispatch_route_and_arrival() {
        let mut sim = builder().incidents([at_c(1, 8.0)]).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.kinds(), ["dispatched", "route_attached", "arrived"]);
        // Assignment and route both land in tick 0.
        assert_eq!(rec.events[0].0, Tick(0));
        assert_eq!(rec.events[1].0, Tick(0));

        let v = sim.vehicles().get(VehicleId(0)).unwrap();
        assert_eq!(v.status(), VehicleStatus::Busy);
        assert_eq!(v.position(), GeoPoint::new(1.0, 1.0));
        assert_eq!(sim.incidents().get(IncidentId(1)).unwrap().assigned(), Some(VehicleId(0)));

        assert_eq!(rec.summaries.len(), 40);
        assert_eq!(rec.ended, Some(Tick(40)));
        assert_eq!(sim.now(), Tick(40));
    }

    #[test]
    fn summary_counts_follow_the_fleet() {
        let mut sim = builder().incidents([at_c(1, 8.0)]).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let first = rec.summaries[0];
        assert_eq!(first.new_incidents, 1);
        assert_eq!(first.dispatched, 1);
        assert_eq!(first.routes_applied, 1);
        assert_eq!(first.en_route, 1);
        assert_eq!(first.waiting, 0);

        let arrived = rec.summaries.iter().find(|s| s.arrivals == 1).expect("no arrival");
        assert_eq!(arrived.busy, 1);
        assert_eq!(arrived.en_route, 0);
        assert_eq!(rec.summaries.iter().map(|s| s.arrivals).sum::<usize>(), 1);
    }

    #[test]
    fn low_severity_waits_in_the_feed() {
        let mut sim = builder().incidents([at_c(1, 5.0)]).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(5, &mut rec).unwrap();

        assert!(rec.events.is_empty());
        assert_eq!(sim.vehicles().get(VehicleId(0)).unwrap().status(), VehicleStatus::Idle);
        let feed: Vec<_> = sim.feed().iter().map(|i| i.id()).collect();
        assert_eq!(feed, [IncidentId(1)]);
        assert_eq!(rec.summaries[4].waiting, 1);
    }

    #[test]
    fn scheduled_report_arrives_on_its_tick() {
        let mut sim = builder().schedule(Tick(3), at_c(1, 9.0)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(5, &mut rec).unwrap();

        let new: Vec<usize> = rec.summaries.iter().map(|s| s.new_incidents).collect();
        assert_eq!(new, [0, 0, 0, 1, 0]);
        assert_eq!(rec.events[0], (Tick(3), "dispatched"));
    }

    #[test]
    fn duplicate_report_is_skipped_not_fatal() {
        let mut sim = builder().incidents([at_c(1, 8.0), at_c(1, 9.0)]).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();

        assert_eq!(sim.incidents().len(), 1);
        assert_eq!(rec.summaries[0].new_incidents, 1);
    }

    #[test]
    fn snapshots_follow_the_interval() {
        let mut sim = builder().build().unwrap();
        sim.config.snapshot_interval_ticks = 5;
        let mut rec = Recorder::default();
        sim.run_ticks(12, &mut rec).unwrap();

        assert_eq!(rec.snapshots, [Tick(0), Tick(5), Tick(10)]);
    }
}

// ── Commands between ticks ────────────────────────────────────────────────────

#[cfg(test)]
mod commands {
    use rd_core::{IncidentId, Tick, VehicleId};
    use rd_fleet::VehicleStatus;

    use crate::{NoopObserver, SimBuilder};

    use super::helpers::{Recorder, at_c, builder, config, pathfinder, two_ambulances};

    fn two_ambulance_sim() -> crate::Sim {
        SimBuilder::new(config(), two_ambulances(), pathfinder()).build().unwrap()
    }

    #[test]
    fn recall_stops_the_vehicle_where_it_is() {
        let mut sim = builder().incidents([at_c(1, 8.0)]).build().unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        let stopped_at = sim.vehicles().get(VehicleId(0)).unwrap().position();

        sim.recall(VehicleId(0));
        let mut rec = Recorder::default();
        sim.run_ticks(3, &mut rec).unwrap();

        assert_eq!(rec.kinds(), ["recalled"]);
        let v = sim.vehicles().get(VehicleId(0)).unwrap();
        assert_eq!(v.status(), VehicleStatus::Idle);
        assert!(v.route().is_none());
        assert_eq!(v.position(), stopped_at);
        assert!(sim.incidents().get(IncidentId(1)).unwrap().is_waiting());
    }

    #[test]
    fn recalled_incident_goes_to_another_idle_vehicle() {
        let mut sim = two_ambulance_sim();
        sim.submit_incident(at_c(1, 9.0)).unwrap();
        assert_eq!(sim.incidents().get(IncidentId(1)).unwrap().assigned(), Some(VehicleId(0)));

        sim.recall(VehicleId(0));

        assert_eq!(sim.incidents().get(IncidentId(1)).unwrap().assigned(), Some(VehicleId(1)));
        assert_eq!(sim.vehicles().get(VehicleId(0)).unwrap().status(), VehicleStatus::Idle);
        assert_eq!(sim.vehicles().get(VehicleId(1)).unwrap().status(), VehicleStatus::Dispatched);
    }

    #[test]
    fn incident_displaced_by_reassignment_is_redispatched() {
        let mut sim = two_ambulance_sim();
        sim.submit_incident(at_c(1, 9.0)).unwrap();
        sim.submit_incident(at_c(2, 3.0)).unwrap();
        assert!(sim.incidents().get(IncidentId(2)).unwrap().is_waiting());

        sim.manual_assign(VehicleId(0), Some(IncidentId(2)));

        assert_eq!(sim.incidents().get(IncidentId(2)).unwrap().assigned(), Some(VehicleId(0)));
        assert_eq!(sim.incidents().get(IncidentId(1)).unwrap().assigned(), Some(VehicleId(1)));

        let mut rec = Recorder::default();
        sim.run_ticks(20, &mut rec).unwrap();
        assert_eq!(rec.kinds()[..4], ["dispatched", "recalled", "manual_dispatched", "dispatched"]);
        assert!(!sim.incidents().get(IncidentId(1)).unwrap().is_waiting());
    }

    #[test]
    fn commands_after_the_last_tick_reach_the_observer() {
        let mut sim = builder().incidents([at_c(1, 8.0)]).build().unwrap();
        sim.run_ticks(40, &mut NoopObserver).unwrap();
        assert_eq!(sim.vehicles().get(VehicleId(0)).unwrap().status(), VehicleStatus::Busy);

        sim.return_to_base(VehicleId(0));
        let mut rec = Recorder::default();
        sim.finish(&mut rec);

        assert_eq!(rec.events, [(Tick(40), "returned_to_base")]);
        assert_eq!(rec.ended, Some(Tick(40)));
        assert!(rec.summaries.is_empty());
    }

    #[test]
    fn reassignment_before_routing_discards_the_old_route() {
        let mut sim = builder().build().unwrap();
        sim.submit_incident(at_c(1, 8.0)).unwrap();
        sim.recall(VehicleId(0));
        sim.manual_assign(VehicleId(0), Some(IncidentId(1)));
        assert_eq!(sim.pending_routes(), 2);

        let mut rec = Recorder::default();
        let summary = sim.step(&mut rec);

        assert_eq!(
            rec.kinds(),
            ["dispatched", "recalled", "manual_dispatched", "stale_route_discarded", "route_attached"]
        );
        assert_eq!(summary.routes_stale, 1);
        assert_eq!(summary.routes_applied, 1);
        assert_eq!(summary.dispatched, 2);
        assert_eq!(sim.pending_routes(), 0);
    }

    #[test]
    fn return_to_base_resolves_and_takes_the_next_incident() {
        let mut sim = builder().incidents([at_c(1, 9.0), at_c(2, 8.0)]).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.vehicles().get(VehicleId(0)).unwrap().status(), VehicleStatus::Busy);
        assert!(sim.incidents().get(IncidentId(2)).unwrap().is_waiting());

        sim.return_to_base(VehicleId(0));
        let mut rec = Recorder::default();
        sim.step(&mut rec);

        assert_eq!(rec.kinds()[..2], ["returned_to_base", "dispatched"]);
        assert!(sim.incidents().get(IncidentId(1)).unwrap().is_resolved());
        assert_eq!(sim.incidents().get(IncidentId(2)).unwrap().assigned(), Some(VehicleId(0)));
        assert_eq!(sim.incidents().resolved_count(), 1);
        assert_eq!(rec.events[0].0, Tick(40));
    }

    #[test]
    fn return_to_base_on_idle_vehicle_is_ignored() {
        let mut sim = builder().build().unwrap();
        sim.return_to_base(VehicleId(0));
        let mut rec = Recorder::default();
        sim.step(&mut rec);
        assert!(rec.events.is_empty());
    }

    #[test]
    fn schedule_in_the_past_delivers_next_tick() {
        let mut sim = builder().build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        sim.schedule_incident(Tick(1), at_c(1, 8.0)).unwrap();

        let summary = sim.step(&mut NoopObserver);
        assert_eq!(summary.tick, Tick(5));
        assert_eq!(summary.new_incidents, 1);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rd_core::{CoreError, Tick};
    use rd_fleet::FleetError;

    use crate::{SimBuilder, SimError};

    use super::helpers::{at_c, config, one_ambulance, pathfinder};

    #[test]
    fn rejects_zero_speed() {
        let mut cfg = config();
        cfg.vehicle_speed_deg_per_tick = 0.0;
        let err = SimBuilder::new(cfg, one_ambulance(), pathfinder()).build().err().unwrap();
        assert!(matches!(err, SimError::Config(CoreError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_report() {
        let err = SimBuilder::new(config(), one_ambulance(), pathfinder())
            .schedule(Tick(2), at_c(1, 11.0))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Fleet(FleetError::InvalidSeverity { .. })));
    }
}
