//! The per-tick movement pass.

use tracing::{trace, warn};

use rd_core::{GeoPoint, IncidentId, SimConfig, VehicleId};
use rd_fleet::{Vehicle, VehicleRegistry, VehicleStatus};

use crate::{Step, step_toward};

/// A vehicle that reached the end of its route this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub vehicle:  VehicleId,
    pub incident: Option<IncidentId>,
    pub position: GeoPoint,
}

/// What one movement pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementReport {
    /// Vehicles whose position changed.
    pub moved:    usize,
    /// DISPATCHED vehicles still waiting for a route.
    pub waiting:  usize,
    /// DISPATCHED vehicles skipped because their route state was unusable.
    pub skipped:  usize,
    pub arrivals: Vec<Arrival>,
}

/// Advances DISPATCHED vehicles along their routes at a constant speed.
#[derive(Copy, Clone, Debug)]
pub struct MovementSimulator {
    speed: f64,
}

enum Outcome {
    Untouched,
    Waiting,
    Skipped,
    Moved,
    Arrived(Arrival),
}

impl MovementSimulator {
    /// `speed` is planar degrees per tick and must be positive.
    pub fn new(speed: f64) -> Self {
        debug_assert!(speed > 0.0 && speed.is_finite(), "speed must be positive, got {speed}");
        Self { speed }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.vehicle_speed_deg_per_tick)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Run one tick over the whole fleet, in roster order.
    ///
    /// A vehicle with unusable route state is skipped with a warning; it
    /// never stops the others from moving.
    pub fn tick(&self, vehicles: &mut VehicleRegistry) -> MovementReport {
        let mut report = MovementReport::default();
        for v in vehicles.iter_mut() {
            match self.step(v) {
                Outcome::Untouched => {}
                Outcome::Waiting   => report.waiting += 1,
                Outcome::Skipped   => report.skipped += 1,
                Outcome::Moved     => report.moved += 1,
                Outcome::Arrived(a) => {
                    report.moved += 1;
                    report.arrivals.push(a);
                }
            }
        }
        report
    }

    /// Advance a single vehicle by one tick.  Returns the arrival, if any.
    pub fn step_vehicle(&self, vehicle: &mut Vehicle) -> Option<Arrival> {
        match self.step(vehicle) {
            Outcome::Arrived(a) => Some(a),
            _ => None,
        }
    }

    fn step(&self, v: &mut Vehicle) -> Outcome {
        if v.status() != VehicleStatus::Dispatched {
            return Outcome::Untouched;
        }
        let Some(route) = v.route() else {
            trace!(vehicle = %v.id, "awaiting route");
            return Outcome::Waiting;
        };
        let last = route.len();
        let Some(target) = v.current_waypoint() else {
            warn!(vehicle = %v.id, cursor = v.cursor(), waypoints = last, "route exhausted while dispatched, skipping");
            return Outcome::Skipped;
        };

        match step_toward(v.position(), target, self.speed) {
            Step::Moved(p) => {
                v.move_to(p);
                Outcome::Moved
            }
            Step::Reached(p) => {
                v.move_to(p);
                v.advance_cursor();
                if v.cursor() < last {
                    return Outcome::Moved;
                }
                let incident = v.incident();
                if let Err(e) = v.arrive() {
                    warn!(vehicle = %v.id, error = %e, "arrival refused");
                    return Outcome::Skipped;
                }
                Outcome::Arrived(Arrival { vehicle: v.id, incident, position: p })
            }
        }
    }
}
