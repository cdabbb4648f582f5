//! `rd-spatial`: road network, node snapping, and routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`network`]    | `RoadNetwork` (keyed nodes + adjacency), `RoadNetworkBuilder` |
//! | [`router`]     | `Router` trait, `NodePath`, `Route`, `DijkstraRouter`       |
//! | [`pathfinder`] | `Pathfinder`: point-to-point routes with straight-line fallback |
//! | [`presets`]    | Built-in Mumbai network and rescue HQ location             |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod network;
pub mod pathfinder;
pub mod presets;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use pathfinder::Pathfinder;
pub use router::{DijkstraRouter, NodePath, Route, Router};
