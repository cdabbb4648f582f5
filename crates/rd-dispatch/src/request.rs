//! Route requests issued by the coordinator and their resolutions.

use rd_core::{GeoPoint, IncidentId, VehicleId};
use rd_spatial::Route;

/// A route to compute for one vehicle's assignment.
///
/// `incident` and `assignment_seq` record the assignment the route is for;
/// the coordinator compares them with the vehicle's state when the result
/// comes back.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub vehicle:        VehicleId,
    pub incident:       IncidentId,
    pub assignment_seq: u64,
    pub origin:         GeoPoint,
    pub destination:    GeoPoint,
}

/// A computed route and the request it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResolution {
    pub request: RouteRequest,
    pub route:   Route,
}
