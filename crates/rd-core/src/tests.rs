//! Unit tests for rd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{IncidentId, NodeId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VehicleId(0) < VehicleId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn display() {
        assert_eq!(IncidentId(7).to_string(), "IncidentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn planar_distance_is_euclidean() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn haversine_one_degree_latitude() {
        // One degree of latitude ≈ 111.2 km.
        let d = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(2.0, -4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), GeoPoint::new(1.0, -2.0));
    }

    #[test]
    fn non_finite_detected() {
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
        assert!(GeoPoint::new(19.0, 72.8).is_finite());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new(100);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.elapsed_ms(), 200);
        assert_eq!(clock.ms_at(Tick(10)), 1_000);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(5).since(Tick(2)), 3);
        assert_eq!(Tick(2).since(Tick(5)), 0);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, SimConfig};

    #[test]
    fn default_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tick_duration_ms, 100);
        assert_eq!(cfg.severity_threshold, 7.0);
    }

    #[test]
    fn zero_tick_duration_rejected() {
        let cfg = SimConfig { tick_duration_ms: 0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn bad_speed_rejected() {
        for speed in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let cfg = SimConfig { vehicle_speed_deg_per_tick: speed, ..SimConfig::default() };
            assert!(cfg.validate().is_err(), "speed {speed} accepted");
        }
    }
}

#[cfg(test)]
mod capability {
    use crate::{Capability, NeedType, Urgency, severity_score};

    #[test]
    fn need_maps_to_capability() {
        assert_eq!(NeedType::Medical.required_capability(), Capability::Medical);
        assert_eq!(NeedType::Rescue.required_capability(), Capability::Fire);
        assert_eq!(NeedType::Infrastructure.required_capability(), Capability::Fire);
        assert_eq!(NeedType::Food.required_capability(), Capability::LawEnforcement);
        assert_eq!(NeedType::Shelter.required_capability(), Capability::LawEnforcement);
        assert_eq!(NeedType::Supplies.required_capability(), Capability::LawEnforcement);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("medical".parse::<NeedType>().unwrap(), NeedType::Medical);
        assert_eq!(" Infrastructure ".parse::<NeedType>().unwrap(), NeedType::Infrastructure);
        assert_eq!("Life-threatening".parse::<Urgency>().unwrap(), Urgency::LifeThreatening);
        assert_eq!("Ambulance".parse::<Capability>().unwrap(), Capability::Medical);
        assert_eq!("police".parse::<Capability>().unwrap(), Capability::LawEnforcement);
        assert!("teleport".parse::<NeedType>().is_err());
        assert!("tank".parse::<Capability>().is_err());
    }

    #[test]
    fn severity_adds_and_clamps() {
        assert_eq!(severity_score(Urgency::Minor, NeedType::Food), 3.0);
        assert_eq!(severity_score(Urgency::Urgent, NeedType::Shelter), 8.0);
        // 6 + 5 and 10 + 5 both clamp to the 0–10 scale.
        assert_eq!(severity_score(Urgency::Urgent, NeedType::Medical), 10.0);
        assert_eq!(severity_score(Urgency::LifeThreatening, NeedType::Medical), 10.0);
    }

    #[test]
    fn labels() {
        assert_eq!(Capability::Fire.to_string(), "fire");
        assert_eq!(NeedType::Supplies.to_string(), "Supplies");
        assert_eq!(Urgency::Minor.as_str(), "Minor");
    }
}
