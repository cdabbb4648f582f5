//! `rd-core`: foundational types for the rescue-dispatch engine.
//!
//! This crate is a dependency of every other `rd-*` crate.  It has no `rd-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `IncidentId`, `NodeId`                       |
//! | [`geo`]         | `GeoPoint`, planar and haversine distance                 |
//! | [`time`]        | `Tick`, `SimClock`                                        |
//! | [`config`]      | `SimConfig`                                               |
//! | [`capability`]  | `Capability`, `NeedType`, `Urgency`, `severity_score`     |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod capability;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use capability::{Capability, NeedType, Urgency, severity_score};
pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{IncidentId, NodeId, VehicleId};
pub use time::{SimClock, Tick};
