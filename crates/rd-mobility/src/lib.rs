//! `rd-mobility`: moving dispatched vehicles along their routes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`kinematics`]  | `step_toward`: one tick of straight-line travel         |
//! | [`simulator`]   | `MovementSimulator`, `MovementReport`, `Arrival`         |
//!
//! # Movement model
//!
//! Each tick, every DISPATCHED vehicle with a route heads for the waypoint
//! at its cursor at a constant speed (planar degrees per tick):
//!
//! 1. If the waypoint is closer than one tick of travel, the vehicle snaps
//!    onto it and the cursor advances.
//! 2. If that was the last waypoint, the vehicle is on scene: BUSY, route
//!    cleared, and an [`Arrival`] is reported.
//! 3. Otherwise it moves one tick's distance along the straight line to the
//!    waypoint.
//!
//! Positions change continuously except for the snap in step 1, which never
//! covers more than one tick's distance.  IDLE and BUSY vehicles, and
//! DISPATCHED vehicles still waiting for a route, are not touched.

pub mod kinematics;
pub mod simulator;


pub use kinematics::{Step, step_toward};
pub use simulator::{Arrival, MovementReport, MovementSimulator};
