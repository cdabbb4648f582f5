//! Plain data row types written by output backends.

use rd_core::Tick;
use rd_dispatch::DispatchEvent;
use rd_fleet::Vehicle;

/// One vehicle's state at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:        u64,
    pub vehicle_id:  u32,
    pub name:        String,
    pub capability:  &'static str,
    pub status:      &'static str,
    pub lat:         f64,
    pub lng:         f64,
    /// Linked incident; `None` while IDLE.
    pub incident_id: Option<u32>,
    /// Waypoints in the attached route; 0 when there is none.
    pub waypoints:   u32,
    pub cursor:      u32,
}

impl VehicleSnapshotRow {
    pub fn of(tick: Tick, v: &Vehicle) -> Self {
        let pos = v.position();
        Self {
            tick:        tick.0,
            vehicle_id:  v.id.0,
            name:        v.name.clone(),
            capability:  v.capability.as_str(),
            status:      v.status().as_str(),
            lat:         pos.lat,
            lng:         pos.lng,
            incident_id: v.incident().map(|i| i.0),
            waypoints:   v.route().map_or(0, |r| r.len() as u32),
            cursor:      v.cursor() as u32,
        }
    }
}

/// Counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub sim_time_ms:    u64,
    pub new_incidents:  u64,
    pub dispatched:     u64,
    pub routes_applied: u64,
    pub routes_stale:   u64,
    pub moving:         u64,
    pub arrivals:       u64,
    pub idle:           u64,
    pub en_route:       u64,
    pub busy:           u64,
    pub waiting:        u64,
}

/// One dispatch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEventRow {
    pub tick:        u64,
    pub sim_time_ms: u64,
    pub kind:        &'static str,
    pub vehicle_id:  u32,
    pub incident_id: Option<u32>,
}

impl DispatchEventRow {
    pub fn of(tick: Tick, sim_time_ms: u64, event: &DispatchEvent) -> Self {
        Self {
            tick:        tick.0,
            sim_time_ms,
            kind:        event.kind(),
            vehicle_id:  event.vehicle().0,
            incident_id: event.incident().map(|i| i.0),
        }
    }
}

/// Empty string for `None`, the number otherwise.
pub(crate) fn opt_cell(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}
