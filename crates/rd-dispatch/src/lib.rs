//! `rd-dispatch`: matching incidents to vehicles and driving their status.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`policy`]      | `DispatchPolicy` trait, `NearestIdlePolicy`                 |
//! | [`coordinator`] | `DispatchCoordinator`: auto/manual dispatch, recall, return to base, route attachment |
//! | [`event`]       | `DispatchEvent`, `DispatchOutcome`                          |
//! | [`request`]     | `RouteRequest`, `RouteResolution`                           |
//! | [`service`]     | `RouteService` trait, `InlineRouteService`, `PooledRouteService` (feature `parallel`) |
//!
//! # Flow
//!
//! Every coordinator operation mutates the registry and ledger synchronously
//! and returns a [`DispatchOutcome`]: the events that happened and the
//! [`RouteRequest`]s the caller should hand to a [`RouteService`].  Vehicles
//! are DISPATCHED before their route exists.  When a [`RouteResolution`]
//! comes back, [`DispatchCoordinator::attach_route`] checks that the vehicle
//! is still on the same assignment and otherwise drops the result.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Enables `PooledRouteService` (Rayon).                    |
//! | `serde`    | Propagates serde derives to the fleet types.             |

pub mod coordinator;
pub mod event;
pub mod policy;
pub mod request;
pub mod service;


pub use coordinator::DispatchCoordinator;
pub use event::{DispatchEvent, DispatchOutcome};
pub use policy::{DispatchPolicy, NearestIdlePolicy};
pub use request::{RouteRequest, RouteResolution};
pub use service::{InlineRouteService, RouteService};

#[cfg(feature = "parallel")]
pub use service::PooledRouteService;
