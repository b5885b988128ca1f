use crate::{DecelerationPlan, GapLayout};

/// Layout strategy of a host container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutKind {
    /// A single row/column of items. The only layout the engine can drive.
    #[default]
    Linear,
    Grid,
    Staggered,
}

impl LayoutKind {
    pub fn supports_linear_scroll(self) -> bool {
        matches!(self, Self::Linear)
    }
}

/// Scroll state reported alongside each scroll notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    /// Not moving on its own; a delta in this state came from `scroll_by`.
    #[default]
    Idle,
    /// Moving under the user's finger.
    Dragging,
    /// Moving under fling or smooth scroll.
    Settling,
}

/// The capabilities the controller needs from a scrollable container.
///
/// Distances and velocities are physical pixels in the container's own coordinates (positive
/// `dy` scrolls content up, revealing later items in a non-reversed vertical list). The host
/// owns the actual scroll position and keeps notifying the controller of every change through
/// [`crate::Controller::on_scrolled`].
pub trait ScrollHost {
    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Linear
    }

    /// Current rendered geometry of the gap markers.
    fn gap_layout(&self) -> GapLayout;

    fn scroll_by(&mut self, dx: i32, dy: i32);

    /// Stops any fling or smooth scroll in progress.
    fn stop_scroll(&mut self);

    /// Starts a native inertial scroll (pixels per second, scroll space).
    fn fling(&mut self, velocity_x: i32, velocity_y: i32);

    /// Animates the plan once; cancelled by the next native scroll or `stop_scroll`.
    fn run_smooth_scroll(&mut self, plan: DecelerationPlan);
}
