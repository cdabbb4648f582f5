//! The dispatch coordinator: the only writer of status and assignment links.
//!
//! # Operations
//!
//! | Operation               | Effect                                           |
//! |-------------------------|--------------------------------------------------|
//! | `auto_dispatch`         | one pass over the ledger in arrival order        |
//! | `auto_dispatch_holding` | the same pass with some vehicles held back       |
//! | `manual_assign`         | operator override; `None` releases the vehicle   |
//! | `recall`                | DISPATCHED → IDLE, both links cleared            |
//! | `return_to_base`        | BUSY → IDLE, incident resolved                   |
//! | `record_arrival`        | report an arrival made by the movement tick      |
//! | `attach_route`          | apply a route resolution, or discard it if stale |
//!
//! Unknown vehicle or incident ids make an operation a logged no-op that
//! returns an empty [`DispatchOutcome`].
//!
//! # Reassignment
//!
//! Manual assignment never jumps a status edge.  A DISPATCHED vehicle is
//! recalled first and a BUSY one released first, and any other vehicle on
//! the target incident is released the same way, so each vehicle's status
//! history stays a walk over IDLE → DISPATCHED → BUSY → IDLE.

use tracing::{debug, info, warn};

use rd_core::{IncidentId, VehicleId};
use rd_fleet::{IncidentLedger, VehicleRegistry, VehicleStatus};

use crate::{DispatchEvent, DispatchOutcome, DispatchPolicy, NearestIdlePolicy, RouteRequest, RouteResolution};

pub struct DispatchCoordinator<P: DispatchPolicy = NearestIdlePolicy> {
    policy: P,
}

impl Default for DispatchCoordinator<NearestIdlePolicy> {
    fn default() -> Self {
        Self::new(NearestIdlePolicy::default())
    }
}

impl<P: DispatchPolicy> DispatchCoordinator<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    // ── Auto dispatch ─────────────────────────────────────────────────────

    /// Assign idle vehicles to every eligible, open, unassigned incident.
    ///
    /// Incidents are visited in arrival order.  Each assignment is applied
    /// before the next incident is considered, so a vehicle can be claimed
    /// at most once per pass.  Incidents already carrying a vehicle and
    /// resolved incidents are skipped.
    pub fn auto_dispatch(&self, vehicles: &mut VehicleRegistry, incidents: &mut IncidentLedger) -> DispatchOutcome {
        self.auto_dispatch_holding(vehicles, incidents, &[])
    }

    /// [`auto_dispatch`](Self::auto_dispatch) without offering the vehicles
    /// in `held`.  Used right after a recall so the recalled vehicle is not
    /// sent straight back to the incident it was pulled off.
    pub fn auto_dispatch_holding(
        &self,
        vehicles:  &mut VehicleRegistry,
        incidents: &mut IncidentLedger,
        held:      &[VehicleId],
    ) -> DispatchOutcome {
        let mut out = DispatchOutcome::default();
        let ids: Vec<IncidentId> = incidents.ids().collect();

        for incident_id in ids {
            let Some(incident) = incidents.get(incident_id) else { continue };
            if !incident.is_waiting() || !self.policy.is_eligible(incident) {
                continue;
            }
            match self.policy.select(incident, vehicles, held) {
                Some(vehicle_id) => {
                    self.assign(vehicles, incidents, vehicle_id, incident_id, false, &mut out);
                }
                None => {
                    debug!(incident = %incident_id, capability = %incident.required_capability(), "no idle vehicle");
                }
            }
        }
        out
    }

    // ── Manual commands ───────────────────────────────────────────────────

    /// Operator override.
    ///
    /// With `Some(incident)`, the vehicle is sent to that incident whatever
    /// its severity, releasing the vehicle and any previous holder of the
    /// incident first.  Assigning a vehicle to the incident it already
    /// serves is a no-op.  A resolved incident is re-opened.
    ///
    /// With `None`, a DISPATCHED vehicle is recalled, a BUSY vehicle returns
    /// to base, and an IDLE vehicle is left alone.
    pub fn manual_assign(
        &self,
        vehicles:  &mut VehicleRegistry,
        incidents: &mut IncidentLedger,
        vehicle:   VehicleId,
        incident:  Option<IncidentId>,
    ) -> DispatchOutcome {
        let mut out = DispatchOutcome::default();
        let Some(v) = vehicles.get(vehicle) else {
            warn!(%vehicle, "manual assign: unknown vehicle");
            return out;
        };
        let (status, current) = (v.status(), v.incident());

        let Some(target) = incident else {
            match status {
                VehicleStatus::Idle       => {}
                VehicleStatus::Dispatched => self.release(vehicles, incidents, vehicle, false, &mut out),
                VehicleStatus::Busy       => self.release(vehicles, incidents, vehicle, true, &mut out),
            }
            return out;
        };

        let Some(holder) = incidents.get(target).map(|i| i.assigned()) else {
            warn!(%vehicle, incident = %target, "manual assign: unknown incident");
            return out;
        };
        if current == Some(target) && status != VehicleStatus::Idle {
            debug!(%vehicle, incident = %target, "manual assign: already assigned");
            return out;
        }

        if status != VehicleStatus::Idle {
            self.release(vehicles, incidents, vehicle, false, &mut out);
        }
        if let Some(other) = holder.filter(|&h| h != vehicle) {
            self.release(vehicles, incidents, other, false, &mut out);
        }
        self.assign(vehicles, incidents, vehicle, target, true, &mut out);
        out
    }

    /// DISPATCHED → IDLE.  Route, cursor, and both links are cleared.
    pub fn recall(&self, vehicles: &mut VehicleRegistry, incidents: &mut IncidentLedger, vehicle: VehicleId) -> DispatchOutcome {
        let mut out = DispatchOutcome::default();
        match vehicles.get(vehicle).map(|v| v.status()) {
            Some(VehicleStatus::Dispatched) => self.release(vehicles, incidents, vehicle, false, &mut out),
            Some(status) => warn!(%vehicle, %status, "recall: vehicle is not dispatched"),
            None => warn!(%vehicle, "recall: unknown vehicle"),
        }
        out
    }

    /// BUSY → IDLE.  The vehicle's incident is marked resolved.
    pub fn return_to_base(
        &self,
        vehicles:  &mut VehicleRegistry,
        incidents: &mut IncidentLedger,
        vehicle:   VehicleId,
    ) -> DispatchOutcome {
        let mut out = DispatchOutcome::default();
        match vehicles.get(vehicle).map(|v| v.status()) {
            Some(VehicleStatus::Busy) => self.release(vehicles, incidents, vehicle, true, &mut out),
            Some(status) => warn!(%vehicle, %status, "return to base: vehicle is not busy"),
            None => warn!(%vehicle, "return to base: unknown vehicle"),
        }
        out
    }

    /// Report that the movement tick brought `vehicle` to its incident.
    ///
    /// The BUSY transition itself happens in the movement layer; this turns
    /// it into an event.  Returns `None` unless the vehicle is BUSY.
    pub fn record_arrival(&self, vehicles: &VehicleRegistry, vehicle: VehicleId) -> Option<DispatchEvent> {
        let v = vehicles.get(vehicle)?;
        if v.status() != VehicleStatus::Busy {
            warn!(%vehicle, status = %v.status(), "arrival reported for vehicle that is not busy");
            return None;
        }
        info!(%vehicle, incident = ?v.incident(), "arrived on scene");
        Some(DispatchEvent::Arrived { vehicle, incident: v.incident() })
    }

    // ── Route attachment ──────────────────────────────────────────────────

    /// Attach a resolved route, unless the assignment it was computed for is
    /// gone.
    ///
    /// The route is applied only if the vehicle is still DISPATCHED to the
    /// same incident under the same assignment sequence number.  A recall,
    /// an arrival, or any reassignment in between (including a reassignment
    /// back to the same incident) makes the result stale.
    pub fn attach_route(&self, vehicles: &mut VehicleRegistry, resolution: RouteResolution) -> DispatchEvent {
        let RouteResolution { request, route } = resolution;
        let RouteRequest { vehicle, incident, assignment_seq, .. } = request;

        let current = vehicles.get_mut(vehicle).filter(|v| {
            v.status() == VehicleStatus::Dispatched
                && v.incident() == Some(incident)
                && v.assignment_seq() == assignment_seq
        });
        let Some(v) = current else {
            debug!(%vehicle, %incident, "stale route discarded");
            return DispatchEvent::StaleRouteDiscarded { vehicle, incident };
        };

        let (waypoints, direct) = (route.len(), route.is_direct());
        if let Err(e) = v.attach_route(route) {
            warn!(%vehicle, error = %e, "route rejected");
            return DispatchEvent::StaleRouteDiscarded { vehicle, incident };
        }
        debug!(%vehicle, %incident, waypoints, direct, "route attached");
        DispatchEvent::RouteAttached { vehicle, incident, waypoints, direct }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Link an IDLE vehicle and an incident, and request its route.
    fn assign(
        &self,
        vehicles:  &mut VehicleRegistry,
        incidents: &mut IncidentLedger,
        vehicle:   VehicleId,
        incident:  IncidentId,
        manual:    bool,
        out:       &mut DispatchOutcome,
    ) {
        let (Some(v), Some(i)) = (vehicles.get_mut(vehicle), incidents.get_mut(incident)) else {
            return;
        };
        let assignment_seq = match v.dispatch(incident) {
            Ok(seq) => seq,
            Err(e) => {
                warn!(%vehicle, %incident, error = %e, "dispatch refused");
                return;
            }
        };
        i.assign(vehicle);

        info!(%vehicle, %incident, manual, severity = i.severity(), "dispatched");
        out.events.push(DispatchEvent::Dispatched { vehicle, incident, manual });
        out.requests.push(RouteRequest {
            vehicle,
            incident,
            assignment_seq,
            origin:      v.position(),
            destination: i.location(),
        });
    }

    /// Take a non-idle vehicle back to IDLE and unlink its incident.
    ///
    /// DISPATCHED vehicles are recalled.  BUSY vehicles return to base, and
    /// their incident is marked resolved when `resolve` is set.
    fn release(
        &self,
        vehicles:  &mut VehicleRegistry,
        incidents: &mut IncidentLedger,
        vehicle:   VehicleId,
        resolve:   bool,
        out:       &mut DispatchOutcome,
    ) {
        let Some(v) = vehicles.get_mut(vehicle) else { return };

        let (result, busy) = match v.status() {
            VehicleStatus::Dispatched => (v.recall(), false),
            VehicleStatus::Busy       => (v.release(), true),
            VehicleStatus::Idle       => return,
        };
        let incident = match result {
            Ok(incident) => incident,
            Err(e) => {
                warn!(%vehicle, error = %e, "release refused");
                return;
            }
        };

        let resolved = busy && resolve;
        if let Some(i) = incident.and_then(|id| incidents.get_mut(id)) {
            // Only unlink if the incident still points at this vehicle.
            if i.assigned() == Some(vehicle) {
                if resolved {
                    i.resolve();
                } else {
                    i.unassign();
                }
            }
        }

        if busy {
            info!(%vehicle, incident = ?incident, resolved, "returned to base");
            out.events.push(DispatchEvent::ReturnedToBase { vehicle, incident, resolved });
        } else {
            info!(%vehicle, incident = ?incident, "recalled");
            out.events.push(DispatchEvent::Recalled { vehicle, incident });
        }
    }
}
