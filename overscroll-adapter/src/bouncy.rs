use overscroll::{BouncyConfig, Controller, OverscrollState, Result, ScrollHost};

use crate::LinearList;

/// A [`LinearList`] with elastic overscroll: the reference event loop around
/// [`overscroll::Controller`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_touch_down` / `on_touch_move` / `on_fling` / `on_touch_up` as pointer events arrive
/// - `tick(now_ms)` on every frame while [`BouncyList::is_animating`]
///
/// After each call, the list's scroll notifications are delivered to the controller in order,
/// so the controller always sees the scrolls it caused itself.
#[derive(Clone, Debug)]
pub struct BouncyList {
    c: Controller<LinearList>,
}

impl BouncyList {
    /// Binds a controller to `list`, following its orientation, reversal and density.
    pub fn new(list: LinearList, config: BouncyConfig) -> Result<Self> {
        let binding = list.binding();
        let density = list.density();
        let mut c = Controller::new(list, config)?.with_density(density);
        c.bind_axis(binding.orientation, binding.reversed)?;
        Ok(Self { c })
    }

    pub fn controller(&self) -> &Controller<LinearList> {
        &self.c
    }

    pub fn controller_mut(&mut self) -> &mut Controller<LinearList> {
        &mut self.c
    }

    pub fn list(&self) -> &LinearList {
        self.c.host()
    }

    pub fn into_list(self) -> LinearList {
        self.c.into_host()
    }

    pub fn state(&self) -> OverscrollState {
        self.c.state()
    }

    pub fn is_animating(&self) -> bool {
        self.c.is_animating() || self.list().is_moving()
    }

    pub fn on_touch_down(&mut self, now_ms: u64) -> bool {
        self.c.host_mut().set_now(now_ms);
        let captured = self.c.on_touch_down(now_ms);
        self.pump(now_ms);
        captured
    }

    /// A finger move of `(dx, dy)` scroll-space pixels. The list drags natively unless the
    /// controller captured the gesture.
    pub fn on_touch_move(&mut self, dx: i32, dy: i32, now_ms: u64) -> bool {
        self.c.host_mut().set_now(now_ms);
        let captured = self.c.on_touch_move(dx, dy, now_ms);
        if !captured {
            self.c.host_mut().drag_by(dx, dy);
        }
        self.pump(now_ms);
        captured
    }

    /// A fling with pointer velocity in px/s. Report it before the matching `on_touch_up`.
    ///
    /// Returns whether the list will move because of it.
    pub fn on_fling(&mut self, velocity_x: i32, velocity_y: i32, now_ms: u64) -> bool {
        self.c.host_mut().set_now(now_ms);
        let moved = if self.c.is_captured() {
            self.c.on_fling(velocity_x, velocity_y)
        } else {
            self.c.host_mut().fling(-velocity_x, -velocity_y);
            true
        };
        self.pump(now_ms);
        moved
    }

    pub fn on_touch_up(&mut self, now_ms: u64) -> bool {
        self.c.host_mut().set_now(now_ms);
        let captured = self.c.on_touch_up(now_ms);
        self.pump(now_ms);
        captured
    }

    pub fn on_touch_cancel(&mut self, now_ms: u64) -> bool {
        self.c.host_mut().set_now(now_ms);
        let captured = self.c.on_touch_cancel(now_ms);
        self.pump(now_ms);
        captured
    }

    /// Advances fling, smooth scroll and spring to `now_ms`.
    ///
    /// Returns whether another tick is needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.c.host_mut().advance(now_ms);
        self.pump(now_ms);
        self.c.tick(now_ms);
        self.pump(now_ms);
        self.is_animating()
    }

    fn pump(&mut self, now_ms: u64) {
        loop {
            let events = self.c.host_mut().take_events();
            if events.is_empty() {
                break;
            }
            for e in events {
                self.c.on_scrolled(e.dx, e.dy, e.state, now_ms);
            }
        }
    }
}
