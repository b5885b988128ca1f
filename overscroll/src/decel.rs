//! Bounded-time deceleration used when the gap opens faster than the spring can absorb.

use crate::{Axis, Edge};

/// Strength of the ease-out curve applied to a [`DecelerationPlan`].
pub const DECELERATE_FACTOR: f64 = 2.0;

/// Ease-out curve: `1 - (1 - t)^(2 * DECELERATE_FACTOR)` for `t` in `[0, 1]`.
pub fn decelerate(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - libm::pow(1.0 - t, 2.0 * DECELERATE_FACTOR)
}

/// A one-shot motion that carries an inertial scroll `distance_to_stop` pixels further and
/// brings it to rest.
///
/// The controller creates a plan and hands it to [`crate::ScrollHost::run_smooth_scroll`]
/// exactly once. Cancelling it is the host's job: any later native scroll or touch-down wins.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecelerationPlan {
    /// Absolute arrival speed, pixels per millisecond.
    pub initial_speed: f64,
    /// Pixels travelled before stopping.
    pub distance_to_stop: u32,
    pub axis: Axis,
    /// `-1` scrolls toward the head, `+1` toward the tail (physical, after layout reversal).
    pub direction: i32,
    /// The gap marker the motion runs toward.
    pub edge: Edge,
    duration_ms: u64,
}

impl DecelerationPlan {
    /// Plans a stop over `distance_to_stop` pixels starting at `initial_speed` px/ms.
    ///
    /// The duration is `ceil(distance_to_stop / initial_speed)` milliseconds; a zero speed or
    /// zero distance yields an immediate stop (duration 0).
    pub fn new(
        initial_speed: f64,
        distance_to_stop: u32,
        axis: Axis,
        direction: i32,
        edge: Edge,
    ) -> Self {
        let initial_speed = if initial_speed.is_finite() {
            libm::fabs(initial_speed)
        } else {
            0.0
        };
        let duration_ms = if initial_speed == 0.0 || distance_to_stop == 0 {
            0
        } else {
            libm::ceil(distance_to_stop as f64 / initial_speed) as u64
        };
        Self {
            initial_speed,
            distance_to_stop,
            axis,
            direction: direction.signum(),
            edge,
            duration_ms,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_immediate(&self) -> bool {
        self.duration_ms == 0
    }

    /// `(dx, dy)` unit vector of the motion.
    pub fn direction_vector(&self) -> (i32, i32) {
        match self.axis {
            Axis::X => (self.direction, 0),
            Axis::Y => (0, self.direction),
        }
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    /// Signed distance travelled along the axis after `elapsed_ms`.
    pub fn offset_at(&self, elapsed_ms: u64) -> i32 {
        if self.is_immediate() {
            return 0;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        let travelled = libm::round(decelerate(t) * self.distance_to_stop as f64) as i32;
        travelled * self.direction
    }
}
