//! Unit tests for rd-fleet.

#[cfg(test)]
mod vehicle {
    use rd_core::{Capability, GeoPoint, IncidentId, VehicleId};
    use rd_spatial::Route;

    use crate::{FleetError, Vehicle, VehicleStatus};

    fn ambulance() -> Vehicle {
        Vehicle::new(VehicleId(0), "AMB-1", Capability::Medical, GeoPoint::new(0.0, 0.0))
    }

    #[test]
    fn starts_idle_and_unassigned() {
        let v = ambulance();
        assert_eq!(v.status(), VehicleStatus::Idle);
        assert!(v.route().is_none());
        assert_eq!(v.incident(), None);
        assert_eq!(v.assignment_seq(), 0);
    }

    #[test]
    fn full_cycle() {
        let mut v = ambulance();
        assert_eq!(v.dispatch(IncidentId(7)).unwrap(), 1);
        v.attach_route(Route::direct(v.position(), GeoPoint::new(1.0, 1.0))).unwrap();
        assert_eq!(v.current_waypoint(), Some(GeoPoint::new(0.0, 0.0)));
        v.arrive().unwrap();
        assert_eq!(v.status(), VehicleStatus::Busy);
        assert!(v.route().is_none());
        assert_eq!(v.incident(), Some(IncidentId(7)));
        assert_eq!(v.release().unwrap(), Some(IncidentId(7)));
        assert_eq!(v.status(), VehicleStatus::Idle);
        assert_eq!(v.incident(), None);
    }

    #[test]
    fn recall_clears_route_and_link() {
        let mut v = ambulance();
        v.dispatch(IncidentId(3)).unwrap();
        v.attach_route(Route::direct(v.position(), GeoPoint::new(0.0, 1.0))).unwrap();
        v.advance_cursor();
        assert_eq!(v.recall().unwrap(), Some(IncidentId(3)));
        assert!(v.route().is_none());
        assert_eq!(v.cursor(), 0);
        assert!(v.is_idle());
    }

    #[test]
    fn each_dispatch_bumps_sequence() {
        let mut v = ambulance();
        v.dispatch(IncidentId(1)).unwrap();
        v.recall().unwrap();
        assert_eq!(v.dispatch(IncidentId(1)).unwrap(), 2);
    }

    #[test]
    fn illegal_transitions_rejected() {
        let mut v = ambulance();
        assert!(matches!(v.arrive(), Err(FleetError::IllegalTransition { .. })));
        assert!(v.recall().is_err());
        assert!(v.release().is_err());
        assert!(v.attach_route(Route::direct(v.position(), v.position())).is_err());

        v.dispatch(IncidentId(1)).unwrap();
        assert!(v.dispatch(IncidentId(2)).is_err());
        assert!(v.release().is_err(), "release is only from BUSY");

        v.arrive().unwrap();
        assert!(v.recall().is_err(), "recall is only from DISPATCHED");
        assert!(v.dispatch(IncidentId(2)).is_err());
        // Failed calls leave state untouched.
        assert_eq!(v.status(), VehicleStatus::Busy);
        assert_eq!(v.incident(), Some(IncidentId(1)));
    }

    #[test]
    fn transition_table() {
        use VehicleStatus::*;
        let all = [Idle, Dispatched, Busy];
        let legal = [(Idle, Dispatched), (Dispatched, Busy), (Dispatched, Idle), (Busy, Idle)];
        for from in all {
            for to in all {
                assert_eq!(from.can_transition_to(to), legal.contains(&(from, to)), "{from} → {to}");
            }
        }
    }
}

#[cfg(test)]
mod ledger {
    use rd_core::{Capability, GeoPoint, IncidentId, NeedType, Urgency, VehicleId};

    use crate::{FleetError, IncidentLedger, IncidentReport};

    fn report(id: u32, severity: f32) -> IncidentReport {
        IncidentReport::new(IncidentId(id), severity, NeedType::Rescue, GeoPoint::new(19.0, 72.8))
    }

    #[test]
    fn submit_and_lookup() {
        let mut ledger = IncidentLedger::new();
        ledger.submit(report(10, 8.0)).unwrap();
        ledger.submit(report(3, 2.0)).unwrap();
        assert_eq!(ledger.len(), 2);
        let i = ledger.get(IncidentId(3)).unwrap();
        assert_eq!(i.severity(), 2.0);
        assert_eq!(i.required_capability(), Capability::Fire);
        assert!(i.is_waiting());
        // Arrival order, not id order.
        assert_eq!(ledger.ids().collect::<Vec<_>>(), [IncidentId(10), IncidentId(3)]);
    }

    #[test]
    fn duplicate_rejected() {
        let mut ledger = IncidentLedger::new();
        ledger.submit(report(1, 5.0)).unwrap();
        assert!(matches!(ledger.submit(report(1, 6.0)), Err(FleetError::DuplicateIncident(_))));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn bad_reports_rejected() {
        let mut ledger = IncidentLedger::new();
        for s in [-0.5, 10.5, f32::NAN] {
            assert!(matches!(ledger.submit(report(1, s)), Err(FleetError::InvalidSeverity { .. })));
        }
        assert!(matches!(
            ledger.submit(report(1, 5.0).with_authenticity(0)),
            Err(FleetError::InvalidAuthenticity { .. })
        ));
        let mut nowhere = report(1, 5.0);
        nowhere.location = GeoPoint::new(f64::INFINITY, 0.0);
        assert!(ledger.submit(nowhere).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn scored_report_uses_urgency_and_need() {
        let r = IncidentReport::scored(IncidentId(1), Urgency::Urgent, NeedType::Infrastructure, GeoPoint::new(0.0, 0.0));
        assert_eq!(r.severity, 9.0);
    }

    #[test]
    fn feed_filters_and_sorts() {
        let mut ledger = IncidentLedger::new();
        ledger.submit(report(1, 5.0)).unwrap();
        ledger.submit(report(2, 9.0).with_authenticity(2)).unwrap();
        ledger.submit(report(3, 7.0).with_authenticity(4)).unwrap();
        ledger.submit(report(4, 5.0).with_authenticity(9)).unwrap();
        let ids: Vec<_> = ledger.feed(4).iter().map(|i| i.id().0).collect();
        assert_eq!(ids, [3, 1, 4]);
    }

    #[test]
    fn assignment_and_resolution() {
        let mut ledger = IncidentLedger::new();
        ledger.submit(report(1, 9.0)).unwrap();
        let i = ledger.get_mut(IncidentId(1)).unwrap();
        i.assign(VehicleId(4));
        assert_eq!(i.assigned(), Some(VehicleId(4)));
        assert_eq!(i.resolve(), Some(VehicleId(4)));
        assert!(i.is_resolved());
        assert!(!i.is_waiting());
        i.assign(VehicleId(5));
        assert!(!i.is_resolved(), "manual reassignment re-opens");
        assert_eq!(ledger.waiting().count(), 0);
    }
}

#[cfg(test)]
mod registry {
    use rd_core::{Capability, GeoPoint, IncidentId, VehicleId};

    use crate::{VehicleRegistry, VehicleStatus};

    #[test]
    fn ids_are_dense_in_insertion_order() {
        let mut reg = VehicleRegistry::new();
        let a = reg.add("AMB-1", Capability::Medical, GeoPoint::new(0.0, 0.0));
        let p = reg.add("POL-1", Capability::LawEnforcement, GeoPoint::new(0.0, 1.0));
        assert_eq!((a, p), (VehicleId(0), VehicleId(1)));
        assert_eq!(reg.by_name("POL-1").unwrap().id, p);
        assert!(reg.get(VehicleId(2)).is_none());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut reg = VehicleRegistry::new();
        let a = reg.add("AMB-1", Capability::Medical, GeoPoint::new(0.0, 0.0));
        reg.add("FIRE-1", Capability::Fire, GeoPoint::new(1.0, 0.0));
        reg.get_mut(a).unwrap().dispatch(IncidentId(9)).unwrap();

        let snap = reg.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].status, VehicleStatus::Dispatched);
        assert_eq!(snap[0].incident, Some(IncidentId(9)));
        assert_eq!(snap[0].route, None);
        assert_eq!(snap[1].status, VehicleStatus::Idle);
        assert_eq!(reg.count_status(VehicleStatus::Idle), 1);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use rd_core::{Capability, IncidentId, NeedType};

    use crate::{FleetError, load_incidents_reader, load_roster_reader};

    #[test]
    fn roster_parses() {
        let csv = "name,capability,lat,lng\n\
                   AMB-1,ambulance,18.9486,72.8336\n\
                   POL-1,Police,19.0178,72.8478\n\
                   FIRE-1,fire,19.1136,72.8697\n";
        let reg = load_roster_reader(Cursor::new(csv)).unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.by_name("POL-1").unwrap().capability, Capability::LawEnforcement);
    }

    #[test]
    fn roster_unknown_capability_is_error() {
        let csv = "name,capability,lat,lng\nX,hovercraft,0,0\n";
        assert!(matches!(load_roster_reader(Cursor::new(csv)), Err(FleetError::Core(_))));
    }

    #[test]
    fn incidents_fill_missing_severity() {
        let csv = "id,urgency,need_type,severity,lat,lng,timestamp,authenticity,description\n\
                   1,Life-threatening,Rescue,,19.06,72.845,t0,8,Water rising\n\
                   2,,Food,3.5,19.04,72.864,t1,,Rations\n";
        let reports = load_incidents_reader(Cursor::new(csv)).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, IncidentId(1));
        assert_eq!(reports[0].severity, 10.0);
        assert_eq!(reports[0].authenticity, Some(8));
        assert_eq!(reports[1].need, NeedType::Food);
        assert_eq!(reports[1].severity, 3.5);
        assert_eq!(reports[1].authenticity, None);
        assert_eq!(reports[1].description, "Rations");
    }

    #[test]
    fn incident_without_severity_or_urgency_is_error() {
        let csv = "id,urgency,need_type,severity,lat,lng,timestamp,authenticity,description\n\
                   1,,Medical,,19.0,72.8,,,\n";
        assert!(matches!(load_incidents_reader(Cursor::new(csv)), Err(FleetError::Parse(_))));
    }
}
