//! The `DispatchPolicy` trait: which incidents to serve and with what.

use rd_core::VehicleId;
use rd_fleet::{Incident, VehicleRegistry};

/// Pluggable auto-dispatch policy.
///
/// The coordinator only asks a policy about incidents that are open and
/// unassigned, and applies each selection before asking about the next
/// incident, so a policy never sees a vehicle it already handed out in the
/// same pass as idle.
pub trait DispatchPolicy: Send + Sync + 'static {
    /// Whether `incident` should be auto-dispatched at all.
    fn is_eligible(&self, incident: &Incident) -> bool;

    /// Pick a vehicle for `incident`, or `None` if nothing suitable is free.
    /// Vehicles listed in `held` are never picked.
    fn select(&self, incident: &Incident, vehicles: &VehicleRegistry, held: &[VehicleId]) -> Option<VehicleId>;
}

/// Nearest idle vehicle of the required capability.
///
/// An incident is eligible when its severity is strictly greater than
/// `severity_threshold`.  Candidates are scanned in roster order by planar
/// distance to the incident; the first vehicle at the minimum distance wins.
#[derive(Copy, Clone, Debug)]
pub struct NearestIdlePolicy {
    pub severity_threshold: f32,
}

impl NearestIdlePolicy {
    pub fn new(severity_threshold: f32) -> Self {
        Self { severity_threshold }
    }
}

impl Default for NearestIdlePolicy {
    fn default() -> Self {
        Self::new(7.0)
    }
}

impl DispatchPolicy for NearestIdlePolicy {
    fn is_eligible(&self, incident: &Incident) -> bool {
        incident.severity() > self.severity_threshold
    }

    fn select(&self, incident: &Incident, vehicles: &VehicleRegistry, held: &[VehicleId]) -> Option<VehicleId> {
        let required = incident.required_capability();
        let target = incident.location();

        let mut best: Option<(VehicleId, f64)> = None;
        for v in vehicles.iter() {
            if !v.is_idle() || v.capability != required || held.contains(&v.id) {
                continue;
            }
            let d = v.position().distance(target);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((v.id, d));
            }
        }
        best.map(|(id, _)| id)
    }
}
