use alloc::vec::Vec;

use overscroll::{
    AxisBinding, DecelerationPlan, Density, GapLayout, LayoutKind, MarkerBounds, Orientation,
    ScrollHost, ScrollState, estimate_content_extent,
};

use crate::SmoothScroll;

/// Size (dp) of each gap marker, i.e. how far the list can be pulled past either end.
pub const MAX_OVERSCROLL_GAP_DP: f64 = 1000.0;

/// Exponential decay rate of a fling, per second.
const FLING_FRICTION: f64 = 4.0;
/// Flings slower than this (px/s) stop.
const MIN_FLING_VELOCITY: f64 = 50.0;
const DEFAULT_ESTIMATE_SAMPLES: usize = 5;

/// A scroll notification the list produced; feed it to `Controller::on_scrolled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub dx: i32,
    pub dy: i32,
    pub state: ScrollState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fling {
    /// Logical px/s, positive toward the tail.
    velocity: f64,
    carry: f64,
}

/// A simulated single-column (or single-row) list with a gap marker at each end.
///
/// The scroll offset is logical: 0 shows the first item at the leading edge, `max_offset()`
/// shows the last item at the trailing edge. Offsets below 0 open the head gap and offsets
/// past `max_offset()` open the tail gap, each by at most [`MAX_OVERSCROLL_GAP_DP`].
///
/// The list never notifies anyone directly: every movement lands in an outbox drained with
/// [`LinearList::take_events`].
#[derive(Clone, Debug)]
pub struct LinearList {
    item_extents: Vec<u32>,
    viewport_extent: u32,
    layout_kind: LayoutKind,
    binding: AxisBinding,
    density: Density,
    estimate_samples: usize,
    offset: i64,
    fling: Option<Fling>,
    smooth: Option<SmoothScroll>,
    now_ms: u64,
    last_advance_ms: Option<u64>,
    events: Vec<ScrollEvent>,
}

impl LinearList {
    pub fn new(item_extents: Vec<u32>, viewport_extent: u32) -> Self {
        Self {
            item_extents,
            viewport_extent,
            layout_kind: LayoutKind::Linear,
            binding: AxisBinding::default(),
            density: Density::IDENTITY,
            estimate_samples: DEFAULT_ESTIMATE_SAMPLES,
            offset: 0,
            fling: None,
            smooth: None,
            now_ms: 0,
            last_advance_ms: None,
            events: Vec::new(),
        }
    }

    /// `count` items of the same extent.
    pub fn uniform(count: usize, item_extent: u32, viewport_extent: u32) -> Self {
        Self::new(alloc::vec![item_extent; count], viewport_extent)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.binding.orientation = orientation;
        self
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.binding.reversed = reversed;
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self.offset = self.clamp_offset(self.offset);
        self
    }

    pub fn with_layout_kind(mut self, layout_kind: LayoutKind) -> Self {
        self.layout_kind = layout_kind;
        self
    }

    /// How many items are averaged for the content-size estimate of short lists.
    pub fn with_estimate_samples(mut self, samples: usize) -> Self {
        self.estimate_samples = samples;
        self
    }

    /// Starts at `offset` (clamped) without a notification.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = self.clamp_offset(offset);
        self
    }

    pub fn binding(&self) -> AxisBinding {
        self.binding
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn item_count(&self) -> usize {
        self.item_extents.len()
    }

    pub fn content_extent(&self) -> u64 {
        self.item_extents.iter().map(|&e| e as u64).sum()
    }

    pub fn viewport_extent(&self) -> u32 {
        self.viewport_extent
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Offset that shows the last item at the trailing edge; 0 when everything fits.
    pub fn max_offset(&self) -> i64 {
        (self.content_extent() as i64 - self.viewport_extent as i64).max(0)
    }

    pub fn max_gap_px(&self) -> i64 {
        libm::round(self.density.dp_to_px(MAX_OVERSCROLL_GAP_DP)) as i64
    }

    /// Head gap implied by the offset, in pixels.
    pub fn head_overscroll(&self) -> u32 {
        (-self.offset).max(0) as u32
    }

    /// Tail gap implied by the offset, in pixels.
    pub fn tail_overscroll(&self) -> u32 {
        (self.offset - self.max_offset()).max(0) as u32
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_some()
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth.is_some()
    }

    pub fn is_moving(&self) -> bool {
        self.is_flinging() || self.is_smooth_scrolling()
    }

    /// The clock used to start smooth scrolls requested by the controller.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn take_events(&mut self) -> Vec<ScrollEvent> {
        core::mem::take(&mut self.events)
    }

    /// Native finger drag of `(dx, dy)` scroll-space pixels.
    pub fn drag_by(&mut self, dx: i32, dy: i32) {
        let raw = self.binding.along(dx, dy);
        self.apply_logical(self.binding.logical(raw) as i64, ScrollState::Dragging);
    }

    /// Advances fling and smooth scroll to `now_ms`. Returns whether the list is still moving.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        self.now_ms = now_ms;
        let dt_ms = match self.last_advance_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_advance_ms = Some(now_ms);

        if let Some(mut fling) = self.fling.take() {
            let dt = dt_ms as f64 / 1000.0;
            let v1 = fling.velocity * libm::exp(-FLING_FRICTION * dt);
            let travelled = (fling.velocity - v1) / FLING_FRICTION + fling.carry;
            let whole = libm::trunc(travelled);
            fling.carry = travelled - whole;
            fling.velocity = v1;

            let blocked = self.apply_logical(whole as i64, ScrollState::Settling);
            if !blocked && libm::fabs(v1) >= MIN_FLING_VELOCITY {
                self.fling = Some(fling);
            }
        }

        if let Some(mut smooth) = self.smooth.take() {
            let raw = smooth.step(now_ms);
            let logical = self.binding.logical(raw) as i64;
            let blocked = self.apply_logical(logical, ScrollState::Settling);
            if !blocked && !smooth.is_done(now_ms) {
                self.smooth = Some(smooth);
            }
        }

        self.is_moving()
    }

    fn clamp_offset(&self, offset: i64) -> i64 {
        let gap = self.max_gap_px();
        offset.clamp(-gap, self.max_offset() + gap)
    }

    fn scroll_state(&self) -> ScrollState {
        if self.is_moving() {
            ScrollState::Settling
        } else {
            ScrollState::Idle
        }
    }

    /// Moves by a logical delta and records the notification. Returns whether the move was cut
    /// short by the end of a gap marker.
    fn apply_logical(&mut self, delta: i64, state: ScrollState) -> bool {
        let wanted = self.offset + delta;
        let next = self.clamp_offset(wanted);
        let applied = next - self.offset;
        self.offset = next;
        if applied != 0 {
            let raw = applied as i32 * self.binding.sign();
            let (dx, dy) = self.binding.split(raw);
            self.events.push(ScrollEvent { dx, dy, state });
        }
        next != wanted
    }

    fn marker_bounds(&self, logical_start: i64, logical_end: i64) -> MarkerBounds {
        let viewport = self.viewport_extent as i64;
        let (start, end) = if self.binding.reversed {
            (viewport - logical_end, viewport - logical_start)
        } else {
            (logical_start, logical_end)
        };
        MarkerBounds {
            start: start as i32,
            end: end as i32,
        }
    }
}

impl ScrollHost for LinearList {
    fn layout_kind(&self) -> LayoutKind {
        self.layout_kind
    }

    fn gap_layout(&self) -> GapLayout {
        let viewport = self.viewport_extent as i64;
        let gap = self.max_gap_px();
        let content = self.content_extent() as i64;

        // Logical positions relative to the leading edge of the viewport.
        let head_end = -self.offset;
        let tail_start = content - self.offset;
        let tail_end = tail_start + gap;

        let head = (head_end > 0).then(|| self.marker_bounds(head_end - gap, head_end));
        let tail = (tail_start < viewport).then(|| self.marker_bounds(tail_start, tail_end));
        let tail_fills_viewport = tail_start <= 0 && tail_end >= viewport;

        let estimated_content_extent = Some(estimate_content_extent(
            self.item_extents.iter().copied(),
            self.item_count(),
            self.estimate_samples,
        ));

        GapLayout {
            viewport_extent: self.viewport_extent as i32,
            padding_start: 0,
            padding_end: 0,
            head,
            tail,
            tail_fills_viewport,
            item_count: self.item_count(),
            estimated_content_extent,
        }
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        let raw = self.binding.along(dx, dy);
        let state = self.scroll_state();
        if self.apply_logical(self.binding.logical(raw) as i64, state) {
            self.fling = None;
            self.smooth = None;
        }
    }

    fn stop_scroll(&mut self) {
        self.fling = None;
        self.smooth = None;
    }

    fn fling(&mut self, velocity_x: i32, velocity_y: i32) {
        let raw = self.binding.along(velocity_x, velocity_y);
        self.smooth = None;
        self.fling = Some(Fling {
            velocity: self.binding.logical(raw) as f64,
            carry: 0.0,
        });
        self.last_advance_ms = Some(self.now_ms);
    }

    fn run_smooth_scroll(&mut self, plan: DecelerationPlan) {
        self.fling = None;
        self.smooth = Some(SmoothScroll::new(plan, self.now_ms));
        self.last_advance_ms = Some(self.now_ms);
    }
}
