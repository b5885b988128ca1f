//! Two-axis damped spring used for the snap-back animation.

use crate::Axis;

/// Fixed integration sub-step.
const SOLVER_STEP_MS: f64 = 1.0;
/// Longest span a single `tick` integrates; longer frame gaps are truncated.
const MAX_TICK_MS: f64 = 64.0;
const REST_SPEED_THRESHOLD: f64 = 0.005;
const REST_DISPLACEMENT_THRESHOLD: f64 = 0.005;

/// Damped harmonic oscillator coefficients (unit mass).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringParams {
    pub tension: f64,
    pub friction: f64,
}

impl SpringParams {
    fn acceleration(&self, position: f64, velocity: f64, target: f64) -> f64 {
        self.tension * (target - position) - self.friction * velocity
    }
}

/// State of one spring axis. Velocity is in pixels per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringAxisState {
    pub position: f64,
    pub velocity: f64,
    pub target_position: f64,
    pub at_rest: bool,
}

impl SpringAxisState {
    fn resting() -> Self {
        Self {
            at_rest: true,
            ..Self::default()
        }
    }

    fn is_settled(&self, params: &SpringParams) -> bool {
        let displacement = libm::fabs(self.target_position - self.position);
        libm::fabs(self.velocity) <= REST_SPEED_THRESHOLD
            && (displacement <= REST_DISPLACEMENT_THRESHOLD || params.tension == 0.0)
    }

    /// Without tension nothing pulls toward the target, so the axis rests where it stopped.
    fn settle(&mut self, params: &SpringParams) {
        if params.tension > 0.0 {
            self.position = self.target_position;
        } else {
            self.target_position = self.position;
        }
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// One RK4 step of `dt` seconds.
    fn integrate(&mut self, params: &SpringParams, dt: f64) {
        let target = self.target_position;
        let (x, v) = (self.position, self.velocity);

        let a_v = v;
        let a_a = params.acceleration(x, v, target);

        let b_x = x + a_v * dt * 0.5;
        let b_v = v + a_a * dt * 0.5;
        let b_a = params.acceleration(b_x, b_v, target);

        let c_x = x + b_v * dt * 0.5;
        let c_v = v + b_a * dt * 0.5;
        let c_a = params.acceleration(c_x, c_v, target);

        let d_x = x + c_v * dt;
        let d_v = v + c_a * dt;
        let d_a = params.acceleration(d_x, d_v, target);

        self.position = x + (a_v + 2.0 * (b_v + c_v) + d_v) * dt / 6.0;
        self.velocity = v + (a_a + 2.0 * (b_a + c_a) + d_a) * dt / 6.0;
    }
}

/// One notification produced by [`SpringSimulator::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSample {
    /// Current X position, rounded to whole pixels.
    pub x: i32,
    /// Current Y position, rounded to whole pixels.
    pub y: i32,
    /// `true` only on the tick where both axes came to rest.
    pub settled: bool,
}

/// A pair of springs (X and Y) that always contract toward 0.
///
/// The simulator does not own a clock: the host's animation loop calls [`Self::tick`] with the
/// elapsed time and receives at most one sample per call. Ticks while both axes are at rest
/// produce nothing, so the "settled" notification is edge-triggered.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringSimulator {
    params: SpringParams,
    x: SpringAxisState,
    y: SpringAxisState,
    pending_ms: f64,
}

impl SpringSimulator {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            x: SpringAxisState::resting(),
            y: SpringAxisState::resting(),
            pending_ms: 0.0,
        }
    }

    pub fn params(&self) -> SpringParams {
        self.params
    }

    pub fn set_params(&mut self, params: SpringParams) {
        self.params = params;
    }

    pub fn state(&self, axis: Axis) -> &SpringAxisState {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn state_mut(&mut self, axis: Axis) -> &mut SpringAxisState {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Places `axis` at `start` and lets it contract toward 0.
    ///
    /// An axis that is still moving keeps its velocity; one at rest starts from standstill.
    pub fn start_to(&mut self, axis: Axis, start: f64) {
        let s = self.state_mut(axis);
        let velocity = if s.at_rest { 0.0 } else { s.velocity };
        *s = SpringAxisState {
            position: start,
            velocity,
            target_position: 0.0,
            at_rest: false,
        };
        self.pending_ms = 0.0;
        otrace!(?axis, start, velocity, "SpringSimulator::start_to");
    }

    /// Brings both axes to rest where they are, without a notification.
    pub fn stop(&mut self) {
        for s in [&mut self.x, &mut self.y] {
            if !s.at_rest {
                s.target_position = s.position;
                s.velocity = 0.0;
                s.at_rest = true;
            }
        }
        self.pending_ms = 0.0;
    }

    /// `true` only when both axes are at rest.
    pub fn is_at_rest(&self) -> bool {
        self.x.at_rest && self.y.at_rest
    }

    pub fn current_x(&self) -> i32 {
        libm::round(self.x.position) as i32
    }

    pub fn current_y(&self) -> i32 {
        libm::round(self.y.position) as i32
    }

    /// Advances the moving axes by `dt_ms` milliseconds.
    ///
    /// Returns `None` (and changes nothing) when both axes are already at rest.
    pub fn tick(&mut self, dt_ms: f64) -> Option<SpringSample> {
        if self.is_at_rest() {
            return None;
        }

        let dt_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_TICK_MS)
        } else {
            0.0
        };
        self.pending_ms += dt_ms;

        let params = self.params;
        let step_s = SOLVER_STEP_MS / 1000.0;
        while self.pending_ms >= SOLVER_STEP_MS {
            self.pending_ms -= SOLVER_STEP_MS;
            for s in [&mut self.x, &mut self.y] {
                if s.at_rest {
                    continue;
                }
                s.integrate(&params, step_s);
                if s.is_settled(&params) {
                    s.settle(&params);
                }
            }
            if self.is_at_rest() {
                self.pending_ms = 0.0;
                break;
            }
        }

        Some(SpringSample {
            x: self.current_x(),
            y: self.current_y(),
            settled: self.is_at_rest(),
        })
    }
}
