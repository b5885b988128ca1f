use crate::{
    AxisBinding, BouncyConfig, DecelerationPlan, Density, Edge, Error, GapEstimator, Gaps,
    Orientation, Result, ScrollHost, ScrollState, SpringSample, SpringSimulator,
};

/// Threshold used while no gap is showing. Zero would make every micro-movement snap back.
const MIN_DISTANCE_SENTINEL: u32 = 1;

/// Behaviorally distinct phases of the engine, derived from the session flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverscrollState {
    /// No gap, spring at rest.
    Idle,
    /// A gap is visible and the user is dragging it.
    Stretching,
    /// A gap is visible, nobody is dragging it and no animation owns it yet.
    PendingDecision,
    /// A deceleration plan was handed to the host.
    Decelerating,
    /// The spring is pulling the gap back to zero.
    SnappingBack,
}

/// Mutable per-binding bookkeeping. Read-only to callers; exposed for inspection.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverscrollSession {
    /// A spring snap-back is running.
    pub is_scroll_back: bool,
    /// The current gap was already seen by a scroll notification (or a release decision).
    pub gap_already_visible: bool,
    /// Gap length (px) at which the engine commits to snapping back.
    pub min_distance_to_scroll_back: u32,
    /// Spring samples drive the host; false while a finger is down.
    pub should_use_spring: bool,
    /// The next overshooting spring sample is discarded.
    pub is_spring_first_sample: bool,
    /// A fling back toward the content is shrinking the gap.
    pub fling_overscroll_back: bool,
    /// The controller owns the current gesture; the host must not scroll natively.
    pub gesture_captured: bool,
    /// The next scroll notification is the first one produced by a stretch.
    pub is_first_drag_sample: bool,
    pub prev_sample_time_ms: u64,
    /// Signed speed along the bound axis, physical px/ms.
    pub instantaneous_speed: f64,
    /// A finger is down.
    pub dragging: bool,
    /// A deceleration plan is in flight.
    pub decelerating: bool,
    /// Stretching moves seen in the current gesture.
    pub drag_sample_count: u32,
}

impl OverscrollSession {
    fn new(now_ms: u64) -> Self {
        Self {
            is_scroll_back: false,
            gap_already_visible: false,
            min_distance_to_scroll_back: MIN_DISTANCE_SENTINEL,
            should_use_spring: true,
            is_spring_first_sample: true,
            fling_overscroll_back: false,
            gesture_captured: false,
            is_first_drag_sample: false,
            prev_sample_time_ms: now_ms,
            instantaneous_speed: 0.0,
            dragging: false,
            decelerating: false,
            drag_sample_count: 0,
        }
    }
}

/// The overscroll state machine bound to one host container.
///
/// This type does not hold any UI objects beyond the host it drives. Adapters feed it:
/// - touch lifecycle (`on_touch_down` / `on_touch_move` / `on_touch_up` / `on_touch_cancel`)
///   and `on_fling`, each answering whether the gesture is captured
/// - `on_scrolled` after every scroll the host performs, including ones it was asked to make
/// - `tick(now_ms)` on every animation frame while [`Self::is_animating`]
///
/// All calls are expected from one event loop. Starting a snap-back and reacting to a spring
/// sample both need `&mut self`, so they can never interleave.
#[derive(Clone, Debug)]
pub struct Controller<H> {
    host: H,
    config: BouncyConfig,
    density: Density,
    binding: AxisBinding,
    spring: SpringSimulator,
    estimator: GapEstimator,
    session: OverscrollSession,
    gaps: Gaps,
    last_tick_ms: Option<u64>,
    pending_fling: Option<(i32, i32)>,
}

impl<H: ScrollHost> Controller<H> {
    /// Binds a controller to `host` (vertical, not reversed).
    ///
    /// Fails when the host's layout cannot scroll linearly.
    pub fn new(host: H, config: BouncyConfig) -> Result<Self> {
        let layout = host.layout_kind();
        if !layout.supports_linear_scroll() {
            owarn!(?layout, "Controller::new: unsupported layout");
            return Err(Error::UnsupportedLayout(layout));
        }
        odebug!(
            gap_limit = config.gap_limit(),
            speed_factor = config.speed_factor(),
            tension = config.tension(),
            friction = config.friction(),
            "Controller::new"
        );
        Ok(Self {
            host,
            spring: SpringSimulator::new(config.spring_params()),
            config,
            density: Density::IDENTITY,
            binding: AxisBinding::default(),
            estimator: GapEstimator::new(),
            session: OverscrollSession::new(0),
            gaps: Gaps::default(),
            last_tick_ms: None,
            pending_fling: None,
        })
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &BouncyConfig {
        &self.config
    }

    pub fn configure(&mut self, config: BouncyConfig) {
        self.config = config;
        self.spring.set_params(config.spring_params());
        odebug!(gap_limit = config.gap_limit(), "Controller::configure");
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    pub fn binding(&self) -> AxisBinding {
        self.binding
    }

    /// Rebinds the scroll axis. Any animation in progress is dropped.
    pub fn bind_axis(&mut self, orientation: Orientation, reversed: bool) -> Result<()> {
        let layout = self.host.layout_kind();
        if !layout.supports_linear_scroll() {
            owarn!(?layout, "Controller::bind_axis: unsupported layout");
            return Err(Error::UnsupportedLayout(layout));
        }
        self.binding = AxisBinding::new(orientation, reversed);
        self.spring.stop();
        self.estimator = GapEstimator::new();
        self.session = OverscrollSession::new(self.session.prev_sample_time_ms);
        self.gaps = Gaps::default();
        self.pending_fling = None;
        odebug!(?orientation, reversed, "Controller::bind_axis");
        Ok(())
    }

    pub fn session(&self) -> &OverscrollSession {
        &self.session
    }

    pub fn spring(&self) -> &SpringSimulator {
        &self.spring
    }

    /// Gaps observed by the most recent event.
    pub fn gaps(&self) -> Gaps {
        self.gaps
    }

    pub fn is_captured(&self) -> bool {
        self.session.gesture_captured
    }

    /// `true` while the spring needs `tick` calls.
    pub fn is_animating(&self) -> bool {
        !self.spring.is_at_rest()
    }

    pub fn state(&self) -> OverscrollState {
        if self.session.is_scroll_back && !self.spring.is_at_rest() {
            OverscrollState::SnappingBack
        } else if self.session.decelerating {
            OverscrollState::Decelerating
        } else if self.gaps.is_empty() {
            OverscrollState::Idle
        } else if self.session.dragging {
            OverscrollState::Stretching
        } else {
            OverscrollState::PendingDecision
        }
    }

    /// The gap limit in physical pixels.
    pub fn gap_limit_px(&self) -> f64 {
        self.density.dp_to_px(self.config.gap_limit())
    }

    /// Gap length (px) past which a gap arriving at `speed` (signed px/ms along the bound axis)
    /// snaps back immediately instead of decelerating first.
    ///
    /// Only speed moving into the visible gap counts; moving away yields 0. The result never
    /// exceeds the gap limit.
    pub fn scroll_back_threshold(&self, speed: f64, gaps: Gaps) -> u32 {
        let speed = speed * self.binding.sign() as f64;
        let toward_gap = match gaps.edge() {
            Some(Edge::Head) => -speed,
            Some(Edge::Tail) => speed,
            None => return 0,
        };
        if !(toward_gap > 0.0) {
            return 0;
        }
        let limit = self.gap_limit_px();
        let reach = limit / self.config.speed_factor() * self.density.px_to_dp(toward_gap);
        reach.min(limit) as u32
    }

    /// Resisted drag delta: `|raw| * (1 - visible / limit)`, signed like `raw`.
    ///
    /// Resistance grows linearly with the visible gap; at the limit the drag adds nothing.
    pub fn stretch_delta(&self, raw_delta: f64, gap_visible: u32) -> f64 {
        let ratio = (gap_visible as f64 / self.gap_limit_px()).clamp(0.0, 1.0);
        let dist = libm::fabs(raw_delta) * (1.0 - ratio);
        if raw_delta < 0.0 { -dist } else { dist }
    }

    fn refresh_gaps(&mut self) -> Gaps {
        let layout = self.host.gap_layout();
        self.gaps = self.estimator.estimate(
            &layout,
            self.binding.reversed,
            self.config.max_adapter_size_to_estimate(),
        );
        self.gaps
    }

    /// Touch-down. Always wins: stops the spring and any fling or deceleration in flight.
    ///
    /// Returns whether the gesture is captured from the start (a gap is already showing).
    pub fn on_touch_down(&mut self, now_ms: u64) -> bool {
        let s = &mut self.session;
        s.prev_sample_time_ms = now_ms;
        s.should_use_spring = false;
        s.is_scroll_back = false;
        s.decelerating = false;
        s.fling_overscroll_back = false;
        s.is_first_drag_sample = false;
        s.drag_sample_count = 0;
        s.dragging = true;
        self.pending_fling = None;

        self.spring.stop();
        self.host.stop_scroll();

        let gaps = self.refresh_gaps();
        self.session.gesture_captured = !gaps.is_empty();
        otrace!(?gaps, captured = self.session.gesture_captured, "on_touch_down");
        self.session.gesture_captured
    }

    /// A drag move of `(dx, dy)` pixels in scroll space (positive reveals later content).
    ///
    /// While a gap shows, the move is applied through `scroll_by` with stretch resistance.
    /// Once captured with no gap left, raw deltas are forwarded unchanged. Returns whether the
    /// gesture is captured; when it is not, the host scrolls natively.
    pub fn on_touch_move(&mut self, dx: i32, dy: i32, _now_ms: u64) -> bool {
        let gaps = self.refresh_gaps();
        let visible = gaps.visible();

        if visible > 0 {
            self.session.drag_sample_count = self.session.drag_sample_count.saturating_add(1);
            self.session.is_first_drag_sample = self.session.drag_sample_count == 1;

            let raw = self.binding.along(dx, dy);
            let delta = self.stretch_delta(raw as f64, visible) as i32;
            otrace!(raw, delta, visible, "stretch");
            let (sx, sy) = self.binding.split(delta);
            self.host.scroll_by(sx, sy);
        } else if self.session.gesture_captured {
            self.host.scroll_by(dx, dy);
        }

        if !self.session.gesture_captured {
            self.session.gesture_captured = !self.refresh_gaps().is_empty();
        }
        self.session.gesture_captured
    }

    /// Finger lifted. Returns whether the gesture had been captured.
    pub fn on_touch_up(&mut self, now_ms: u64) -> bool {
        self.release(now_ms)
    }

    /// Gesture cancelled by the host; handled like a release.
    pub fn on_touch_cancel(&mut self, now_ms: u64) -> bool {
        self.release(now_ms)
    }

    fn release(&mut self, _now_ms: u64) -> bool {
        let gaps = self.refresh_gaps();
        if !gaps.is_empty() {
            let speed = self.session.instantaneous_speed;
            let threshold = self.scroll_back_threshold(speed, gaps);
            self.session.min_distance_to_scroll_back = threshold;
            self.session.gap_already_visible = true;

            let below_threshold = (gaps.head > 0 && gaps.head < threshold)
                || (gaps.tail > 0 && gaps.tail < threshold);
            if below_threshold {
                self.decelerate(speed, gaps);
            } else {
                self.scroll_back(gaps);
            }
        }

        self.session.should_use_spring = true;
        self.session.dragging = false;
        let captured = core::mem::replace(&mut self.session.gesture_captured, false);

        if let Some((vx, vy)) = self.pending_fling.take() {
            self.dispatch_fling(vx, vy);
        }
        captured
    }

    /// A fling with pointer velocity `(velocity_x, velocity_y)` px/s.
    ///
    /// Uncaptured flings are left to the host. Captured ones are forwarded (negated into
    /// scroll space) when no gap shows, or when they shrink the visible gap. A fling reported
    /// before the finger is lifted is dispatched right after the release decision.
    ///
    /// Returns whether the fling was (or will be) forwarded.
    pub fn on_fling(&mut self, velocity_x: i32, velocity_y: i32) -> bool {
        if !self.session.gesture_captured {
            return false;
        }
        let gaps = self.refresh_gaps();
        let velocity = self.binding.along(velocity_x, velocity_y) * self.binding.sign();
        let shrinks_gap = (gaps.head > 0 && velocity < 0) || (gaps.tail > 0 && velocity > 0);
        if !gaps.is_empty() && !shrinks_gap {
            otrace!(velocity, ?gaps, "fling into gap dropped");
            return false;
        }

        if self.session.dragging {
            self.pending_fling = Some((velocity_x, velocity_y));
        } else {
            self.dispatch_fling(velocity_x, velocity_y);
        }
        true
    }

    fn dispatch_fling(&mut self, velocity_x: i32, velocity_y: i32) {
        let gaps = self.refresh_gaps();
        if !gaps.is_empty() {
            self.session.fling_overscroll_back = true;
        }
        otrace!(
            velocity_x,
            velocity_y,
            back = self.session.fling_overscroll_back,
            "fling forwarded"
        );
        self.host.fling(-velocity_x, -velocity_y);
    }

    /// Notification that the host scrolled by `(dx, dy)` while in `state`.
    pub fn on_scrolled(&mut self, dx: i32, dy: i32, state: ScrollState, now_ms: u64) {
        let raw = self.binding.along(dx, dy);
        let logical = self.binding.logical(raw);

        let layout = self.host.gap_layout();
        self.estimator.note_scroll(&layout, logical);
        let gaps = self.estimator.estimate(
            &layout,
            self.binding.reversed,
            self.config.max_adapter_size_to_estimate(),
        );
        self.gaps = gaps;

        self.sample_speed(raw, gaps, now_ms);

        if gaps.is_empty() {
            self.reset_to_idle();
            return;
        }

        let using_scroll_by = state == ScrollState::Idle && raw != 0;
        if state == ScrollState::Dragging || using_scroll_by {
            return;
        }

        let speed = self.session.instantaneous_speed;
        let s = &self.session;
        let crossed_to_other_side =
            s.is_scroll_back && ((logical > 0 && gaps.tail > 0) || (logical < 0 && gaps.head > 0));
        if crossed_to_other_side {
            odebug!(?gaps, "scrolled back past the other edge");
            self.session.gap_already_visible = true;
            self.session.is_scroll_back = false;
            self.spring.stop();
            self.session.min_distance_to_scroll_back = self.scroll_back_threshold(speed, gaps);
        }

        if self.session.is_scroll_back {
            return;
        }

        if !self.session.gap_already_visible {
            let threshold = self.scroll_back_threshold(speed, gaps);
            self.session.min_distance_to_scroll_back = threshold;
            self.session.gap_already_visible = true;

            if self.reached_threshold(gaps) {
                self.scroll_back(gaps);
            } else {
                self.decelerate(speed, gaps);
            }
        } else if self.reached_threshold(gaps) {
            self.scroll_back(gaps);
        }
    }

    fn reached_threshold(&self, gaps: Gaps) -> bool {
        let threshold = self.session.min_distance_to_scroll_back;
        gaps.head >= threshold || gaps.tail >= threshold
    }

    fn sample_speed(&mut self, raw: i32, gaps: Gaps, now_ms: u64) {
        let mut delta = raw;
        if self.session.is_first_drag_sample {
            self.session.is_first_drag_sample = false;
            let logical = self.binding.logical(raw);
            let substitute = if logical > 0 {
                gaps.tail as i32
            } else if logical < 0 {
                -(gaps.head as i32)
            } else {
                0
            };
            delta = self.binding.logical(substitute);
        }

        let elapsed = now_ms.saturating_sub(self.session.prev_sample_time_ms);
        if elapsed == 0 {
            return;
        }
        self.session.instantaneous_speed = delta as f64 / elapsed as f64;
        self.session.prev_sample_time_ms = now_ms;
    }

    fn reset_to_idle(&mut self) {
        let s = &mut self.session;
        if s.gap_already_visible || s.is_scroll_back || s.decelerating {
            odebug!("gap closed");
        }
        s.gap_already_visible = false;
        s.is_scroll_back = false;
        s.decelerating = false;
        s.min_distance_to_scroll_back = MIN_DISTANCE_SENTINEL;
        self.spring.stop();
    }

    /// Starts the spring from the visible gap toward 0.
    fn scroll_back(&mut self, gaps: Gaps) {
        self.session.is_scroll_back = true;
        self.session.is_spring_first_sample = true;
        self.session.decelerating = false;

        self.host.stop_scroll();

        let start = gaps.visible();
        self.spring.start_to(self.binding.axis(), start as f64);
        self.last_tick_ms = None;
        odebug!(start, ?gaps, "snap back");
    }

    /// Hands the host a plan that runs `min_distance_to_scroll_back` further and stops.
    fn decelerate(&mut self, speed: f64, gaps: Gaps) {
        let (edge, toward) = match gaps.edge() {
            Some(Edge::Head) => (Edge::Head, -1),
            Some(Edge::Tail) | None => (Edge::Tail, 1),
        };
        let plan = DecelerationPlan::new(
            speed,
            self.session.min_distance_to_scroll_back,
            self.binding.axis(),
            toward * self.binding.sign(),
            edge,
        );
        if plan.is_immediate() {
            self.scroll_back(gaps);
            return;
        }

        self.host.stop_scroll();
        self.session.decelerating = true;
        odebug!(
            speed,
            distance = plan.distance_to_stop,
            duration_ms = plan.duration_ms(),
            "decelerate"
        );
        self.host.run_smooth_scroll(plan);
    }

    /// Advances the spring to `now_ms` and applies the sample to the host.
    ///
    /// Returns the sample, or `None` when the spring is at rest.
    pub fn tick(&mut self, now_ms: u64) -> Option<SpringSample> {
        let dt = match self.last_tick_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_tick_ms = Some(now_ms);

        let sample = self.spring.tick(dt as f64)?;
        self.on_spring_update(sample);
        if sample.settled {
            self.on_spring_at_rest();
        }
        Some(sample)
    }

    fn on_spring_update(&mut self, sample: SpringSample) {
        if !self.session.should_use_spring {
            return;
        }

        let gaps = self.refresh_gaps();
        let position = self.binding.along(sample.x, sample.y);
        let mut diff = position - gaps.visible() as i32;
        if diff >= 0 {
            return;
        }

        if self.session.is_spring_first_sample {
            self.session.is_spring_first_sample = false;
            otrace!(diff, "first spring sample discarded");
            return;
        }

        if !self.session.fling_overscroll_back {
            self.host.stop_scroll();
        }
        if gaps.head > 0 {
            diff = -diff;
        }
        diff = self.binding.logical(diff);

        otrace!(position, diff, "spring correction");
        let (dx, dy) = self.binding.split(diff);
        self.host.scroll_by(dx, dy);
    }

    fn on_spring_at_rest(&mut self) {
        self.session.is_scroll_back = false;
        otrace!("spring at rest");
    }
}
