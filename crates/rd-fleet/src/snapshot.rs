//! Read-only views handed to renderers and writers.

use rd_core::{Capability, GeoPoint, IncidentId, NeedType, VehicleId};

use crate::{Incident, Vehicle, VehicleStatus};

/// One vehicle as a renderer sees it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSnapshot {
    pub id:         VehicleId,
    pub name:       String,
    pub capability: Capability,
    pub status:     VehicleStatus,
    pub position:   GeoPoint,
    pub incident:   Option<IncidentId>,
    /// Route polyline, present while the vehicle is following one.
    pub route:      Option<Vec<GeoPoint>>,
}

impl VehicleSnapshot {
    pub fn of(v: &Vehicle) -> Self {
        Self {
            id:         v.id,
            name:       v.name.clone(),
            capability: v.capability,
            status:     v.status(),
            position:   v.position(),
            incident:   v.incident(),
            route:      v.route().map(|r| r.points.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentSnapshot {
    pub id:         IncidentId,
    pub severity:   f32,
    pub need:       NeedType,
    pub capability: Capability,
    pub location:   GeoPoint,
    pub assigned:   Option<VehicleId>,
    pub resolved:   bool,
}

impl IncidentSnapshot {
    pub fn of(i: &Incident) -> Self {
        Self {
            id:         i.id(),
            severity:   i.severity(),
            need:       i.need(),
            capability: i.required_capability(),
            location:   i.location(),
            assigned:   i.assigned(),
            resolved:   i.is_resolved(),
        }
    }
}
