//! Top-level engine configuration.

use crate::{CoreError, CoreResult, SimClock, Tick};

/// Engine configuration.
///
/// Applications typically build this in code or load it from JSON (with the
/// `serde` feature) and hand it to the simulation builder, which calls
/// [`validate`](Self::validate) before anything else is constructed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated milliseconds per tick.  Default: 100.
    pub tick_duration_ms: u32,

    /// Ticks executed by `Sim::run`.  `Sim::run_ticks` ignores this.
    pub total_ticks: u64,

    /// Constant vehicle speed, in planar degrees travelled per tick.
    pub vehicle_speed_deg_per_tick: f64,

    /// Incidents with severity strictly greater than this are auto-dispatched.
    pub severity_threshold: f32,

    /// Minimum authenticity score for an incident to appear in the feed view.
    pub min_authenticity: u8,

    /// Emit a vehicle snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Seed for synthetic incident generation in drivers.  The engine itself
    /// is deterministic and never draws random numbers.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:           100,
            total_ticks:                600,
            vehicle_speed_deg_per_tick: 0.0005,
            severity_threshold:         7.0,
            min_authenticity:           4,
            snapshot_interval_ticks:    10,
            seed:                       42,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Reject values that would stall or corrupt the tick loop.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be non-zero".into()));
        }
        let speed = self.vehicle_speed_deg_per_tick;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(CoreError::Config(format!(
                "vehicle_speed_deg_per_tick must be positive and finite, got {speed}"
            )));
        }
        if !self.severity_threshold.is_finite() {
            return Err(CoreError::Config("severity_threshold must be finite".into()));
        }
        Ok(())
    }
}
