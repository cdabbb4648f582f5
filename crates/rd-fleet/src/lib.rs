//! `rd-fleet`: the mutable entities of the dispatch engine.
//!
//! Vehicles and incidents are owned here and mutated only through the
//! transition methods on [`Vehicle`] and [`Incident`].  Collaborators read
//! them through [`VehicleSnapshot`] / [`IncidentSnapshot`].
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`vehicle`]  | `Vehicle`, `VehicleStatus`                             |
//! | [`incident`] | `Incident`, `IncidentReport`                           |
//! | [`registry`] | `VehicleRegistry`                                      |
//! | [`ledger`]   | `IncidentLedger`, the severity-sorted feed             |
//! | [`snapshot`] | `VehicleSnapshot`, `IncidentSnapshot`                  |
//! | [`loader`]   | roster and incident CSV loaders                        |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                         |

pub mod error;
pub mod incident;
pub mod ledger;
pub mod loader;
pub mod registry;
pub mod snapshot;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use error::{FleetError, FleetResult};
pub use incident::{Incident, IncidentReport};
pub use ledger::IncidentLedger;
pub use loader::{load_incidents_csv, load_incidents_reader, load_roster_csv, load_roster_reader};
pub use registry::VehicleRegistry;
pub use snapshot::{IncidentSnapshot, VehicleSnapshot};
pub use vehicle::{Vehicle, VehicleStatus};
