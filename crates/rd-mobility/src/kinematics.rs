//! Straight-line stepping.

use rd_core::GeoPoint;

/// Result of one tick of travel toward a target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// Target was within reach; the traveller is now exactly on it.
    Reached(GeoPoint),
    /// Moved `step` closer; the target is still ahead.
    Moved(GeoPoint),
}

/// Advance from `from` toward `to` by at most `step` (planar degrees).
///
/// ```
/// use rd_core::GeoPoint;
/// use rd_mobility::{Step, step_toward};
///
/// let a = GeoPoint::new(0.0, 0.0);
/// let b = GeoPoint::new(0.0, 1.0);
/// assert_eq!(step_toward(a, b, 0.25), Step::Moved(GeoPoint::new(0.0, 0.25)));
/// assert_eq!(step_toward(GeoPoint::new(0.0, 0.9), b, 0.25), Step::Reached(b));
/// ```
pub fn step_toward(from: GeoPoint, to: GeoPoint, step: f64) -> Step {
    let remaining = from.distance(to);
    if remaining == 0.0 || remaining < step {
        return Step::Reached(to);
    }
    Step::Moved(from.lerp(to, step / remaining))
}
