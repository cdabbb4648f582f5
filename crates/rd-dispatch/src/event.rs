//! Dispatch events and operation outcomes.

use rd_core::{IncidentId, VehicleId};
use rd_fleet::VehicleStatus;

use crate::RouteRequest;

/// Something the coordinator did.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    /// IDLE → DISPATCHED.
    Dispatched { vehicle: VehicleId, incident: IncidentId, manual: bool },

    /// DISPATCHED → IDLE before arrival.
    Recalled { vehicle: VehicleId, incident: Option<IncidentId> },

    /// DISPATCHED → BUSY on reaching the scene.
    Arrived { vehicle: VehicleId, incident: Option<IncidentId> },

    /// BUSY → IDLE.  `resolved` is false when the vehicle was pulled off
    /// the job for reassignment rather than finishing it.
    ReturnedToBase { vehicle: VehicleId, incident: Option<IncidentId>, resolved: bool },

    /// A computed route was attached to a dispatched vehicle.
    RouteAttached { vehicle: VehicleId, incident: IncidentId, waypoints: usize, direct: bool },

    /// A computed route arrived for an assignment that no longer exists.
    StaleRouteDiscarded { vehicle: VehicleId, incident: IncidentId },
}

impl DispatchEvent {
    pub fn vehicle(&self) -> VehicleId {
        match *self {
            DispatchEvent::Dispatched { vehicle, .. }
            | DispatchEvent::Recalled { vehicle, .. }
            | DispatchEvent::Arrived { vehicle, .. }
            | DispatchEvent::ReturnedToBase { vehicle, .. }
            | DispatchEvent::RouteAttached { vehicle, .. }
            | DispatchEvent::StaleRouteDiscarded { vehicle, .. } => vehicle,
        }
    }

    pub fn incident(&self) -> Option<IncidentId> {
        match *self {
            DispatchEvent::Dispatched { incident, .. }
            | DispatchEvent::RouteAttached { incident, .. }
            | DispatchEvent::StaleRouteDiscarded { incident, .. } => Some(incident),
            DispatchEvent::Recalled { incident, .. }
            | DispatchEvent::Arrived { incident, .. }
            | DispatchEvent::ReturnedToBase { incident, .. } => incident,
        }
    }

    /// The status change this event records, if any.
    pub fn transition(&self) -> Option<(VehicleStatus, VehicleStatus)> {
        use VehicleStatus::*;
        match self {
            DispatchEvent::Dispatched { .. }     => Some((Idle, Dispatched)),
            DispatchEvent::Recalled { .. }       => Some((Dispatched, Idle)),
            DispatchEvent::Arrived { .. }        => Some((Dispatched, Busy)),
            DispatchEvent::ReturnedToBase { .. } => Some((Busy, Idle)),
            DispatchEvent::RouteAttached { .. }
            | DispatchEvent::StaleRouteDiscarded { .. } => None,
        }
    }

    /// Short label for logs and output rows.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchEvent::Dispatched { manual: false, .. } => "dispatched",
            DispatchEvent::Dispatched { manual: true, .. }  => "manual_dispatched",
            DispatchEvent::Recalled { .. }                  => "recalled",
            DispatchEvent::Arrived { .. }                   => "arrived",
            DispatchEvent::ReturnedToBase { .. }            => "returned_to_base",
            DispatchEvent::RouteAttached { .. }             => "route_attached",
            DispatchEvent::StaleRouteDiscarded { .. }       => "stale_route_discarded",
        }
    }
}

/// What a coordinator operation produced.
///
/// `requests` must be handed to a [`RouteService`](crate::RouteService);
/// the vehicles they name stay DISPATCHED without a route until the
/// resolution is attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    pub events:   Vec<DispatchEvent>,
    pub requests: Vec<RouteRequest>,
}

impl DispatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.requests.is_empty()
    }

    /// Append `other` after `self`.
    pub fn merge(&mut self, other: DispatchOutcome) {
        self.events.extend(other.events);
        self.requests.extend(other.requests);
    }

    /// Vehicles dispatched in this outcome, in order.
    pub fn dispatched(&self) -> impl Iterator<Item = (VehicleId, IncidentId)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            DispatchEvent::Dispatched { vehicle, incident, .. } => Some((vehicle, incident)),
            _ => None,
        })
    }
}
