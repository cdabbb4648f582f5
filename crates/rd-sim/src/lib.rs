//! `rd-sim`: tick loop orchestrator for the rescue-dispatch engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Intake:    incidents scheduled for this tick enter the ledger;
//!                each one triggers an auto-dispatch pass.
//!   ② Routes:    poll the RouteService; attach fresh routes, drop stale ones.
//!   ③ Movement:  advance DISPATCHED vehicles; arrivals become BUSY.
//!   ④ Report:    events to the observer, TickSummary, periodic snapshot.
//! ```
//!
//! Commands from outside (`submit_incident`, `manual_assign`, `recall`,
//! `return_to_base`) are applied immediately between ticks; their events are
//! reported with the next tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Enables `rd_dispatch::PooledRouteService` for background routing. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rd_core::SimConfig;
//! use rd_sim::{NoopObserver, SimBuilder};
//! use rd_spatial::{Pathfinder, presets};
//!
//! let network = Arc::new(presets::mumbai()?);
//! let mut sim = SimBuilder::new(config, roster, Pathfinder::dijkstra(network))
//!     .incidents(reports)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
