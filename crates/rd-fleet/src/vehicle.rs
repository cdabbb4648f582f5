//! Vehicles and their status state machine.
//!
//! ```text
//!            dispatch            arrive
//!   IDLE ─────────────▶ DISPATCHED ───────▶ BUSY
//!    ▲                      │                 │
//!    └────── recall ────────┘                 │
//!    └──────────────── release ───────────────┘
//! ```
//!
//! Each transition is a method on [`Vehicle`] that refuses to run from the
//! wrong state, so a vehicle's status history is always a walk over the
//! graph above.

use rd_core::{Capability, GeoPoint, IncidentId, VehicleId};
use rd_spatial::Route;

use crate::{FleetError, FleetResult};

// ── VehicleStatus ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleStatus {
    Idle,
    Dispatched,
    Busy,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Idle       => "IDLE",
            VehicleStatus::Dispatched => "DISPATCHED",
            VehicleStatus::Busy       => "BUSY",
        }
    }

    /// `true` if `self → next` is an edge of the lifecycle.
    ///
    /// ```
    /// use rd_fleet::VehicleStatus::*;
    ///
    /// assert!(Idle.can_transition_to(Dispatched));
    /// assert!(Dispatched.can_transition_to(Idle));   // recall
    /// assert!(!Idle.can_transition_to(Busy));
    /// assert!(!Busy.can_transition_to(Dispatched));
    /// ```
    pub fn can_transition_to(self, next: VehicleStatus) -> bool {
        use VehicleStatus::*;
        matches!(
            (self, next),
            (Idle, Dispatched) | (Dispatched, Busy) | (Dispatched, Idle) | (Busy, Idle)
        )
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// A rescue vehicle from the roster.
///
/// Identity fields are public.  Mutable state (status, route, cursor,
/// assignment) is private: the dispatch layer changes it through the
/// transition methods and the movement layer through
/// [`move_to`](Self::move_to) / [`advance_cursor`](Self::advance_cursor).
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id:         VehicleId,
    pub name:       String,
    pub capability: Capability,

    position: GeoPoint,
    status:   VehicleStatus,
    route:    Option<Route>,
    /// Index of the route waypoint currently being approached.
    cursor:   usize,
    incident: Option<IncidentId>,
    /// Incremented on every dispatch; identifies the assignment a route was
    /// computed for.
    assignment_seq: u64,
}

impl Vehicle {
    pub fn new(id: VehicleId, name: impl Into<String>, capability: Capability, position: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            capability,
            position,
            status: VehicleStatus::Idle,
            route: None,
            cursor: 0,
            incident: None,
            assignment_seq: 0,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn incident(&self) -> Option<IncidentId> {
        self.incident
    }

    #[inline]
    pub fn assignment_seq(&self) -> u64 {
        self.assignment_seq
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.status == VehicleStatus::Idle
    }

    /// Waypoint at the cursor, if a route is attached and not exhausted.
    pub fn current_waypoint(&self) -> Option<GeoPoint> {
        self.route.as_ref().and_then(|r| r.waypoint(self.cursor))
    }

    // ── Status transitions ────────────────────────────────────────────────

    fn transition(&mut self, next: VehicleStatus) -> FleetResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(FleetError::IllegalTransition { vehicle: self.id, from: self.status, to: next });
        }
        self.status = next;
        Ok(())
    }

    /// IDLE → DISPATCHED toward `incident`.  The route is cleared until a new
    /// one is attached.  Returns the new assignment sequence number.
    pub fn dispatch(&mut self, incident: IncidentId) -> FleetResult<u64> {
        self.transition(VehicleStatus::Dispatched)?;
        self.incident = Some(incident);
        self.clear_route();
        self.assignment_seq += 1;
        Ok(self.assignment_seq)
    }

    /// DISPATCHED → IDLE.  Clears route and assignment; returns the incident
    /// the vehicle was heading to.
    pub fn recall(&mut self) -> FleetResult<Option<IncidentId>> {
        // BUSY → IDLE is also legal, but that is a release.
        if self.status != VehicleStatus::Dispatched {
            return Err(FleetError::IllegalTransition {
                vehicle: self.id,
                from:    self.status,
                to:      VehicleStatus::Idle,
            });
        }
        self.transition(VehicleStatus::Idle)?;
        self.clear_route();
        Ok(self.incident.take())
    }

    /// DISPATCHED → BUSY on reaching the scene.  The incident link is kept.
    pub fn arrive(&mut self) -> FleetResult<()> {
        self.transition(VehicleStatus::Busy)?;
        self.clear_route();
        Ok(())
    }

    /// BUSY → IDLE after the job is done.  Returns the finished incident.
    pub fn release(&mut self) -> FleetResult<Option<IncidentId>> {
        // DISPATCHED → IDLE is also legal, but that is a recall.
        if self.status != VehicleStatus::Busy {
            return Err(FleetError::IllegalTransition {
                vehicle: self.id,
                from:    self.status,
                to:      VehicleStatus::Idle,
            });
        }
        self.transition(VehicleStatus::Idle)?;
        Ok(self.incident.take())
    }

    /// Attach a freshly computed route and restart the cursor.  Only a
    /// DISPATCHED vehicle follows a route; anything else is rejected.
    pub fn attach_route(&mut self, route: Route) -> FleetResult<()> {
        if self.status != VehicleStatus::Dispatched {
            return Err(FleetError::IllegalTransition {
                vehicle: self.id,
                from:    self.status,
                to:      VehicleStatus::Dispatched,
            });
        }
        self.route = Some(route);
        self.cursor = 0;
        Ok(())
    }

    fn clear_route(&mut self) {
        self.route = None;
        self.cursor = 0;
    }

    // ── Movement ──────────────────────────────────────────────────────────

    #[inline]
    pub fn move_to(&mut self, position: GeoPoint) {
        self.position = position;
    }

    #[inline]
    pub fn advance_cursor(&mut self) {
        self.cursor += 1;
    }
}
