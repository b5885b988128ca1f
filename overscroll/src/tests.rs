use crate::*;

use alloc::vec::Vec;

const VIEWPORT: i32 = 1000;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    ScrollBy(i32, i32),
    Stop,
    Fling(i32, i32),
    Smooth(DecelerationPlan),
}

/// A container reduced to its overscroll: negative values show a head gap, positive a tail gap.
#[derive(Clone, Debug)]
struct MockHost {
    layout: LayoutKind,
    binding: AxisBinding,
    overscroll: i32,
    calls: Vec<Call>,
    pending: Vec<(i32, i32)>,
}

impl MockHost {
    fn new() -> Self {
        Self {
            layout: LayoutKind::Linear,
            binding: AxisBinding::default(),
            overscroll: 0,
            calls: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn reversed() -> Self {
        Self {
            binding: AxisBinding::new(Orientation::Vertical, true),
            ..Self::new()
        }
    }

    fn stops(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Stop).count()
    }

    fn smooth_plans(&self) -> Vec<DecelerationPlan> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Smooth(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl ScrollHost for MockHost {
    fn layout_kind(&self) -> LayoutKind {
        self.layout
    }

    fn gap_layout(&self) -> GapLayout {
        let reversed = self.binding.reversed;
        let head_gap = (-self.overscroll).max(0);
        let tail_gap = self.overscroll.max(0);
        let head = (head_gap > 0).then(|| {
            if reversed {
                MarkerBounds {
                    start: VIEWPORT - head_gap,
                    end: VIEWPORT + 1000,
                }
            } else {
                MarkerBounds {
                    start: head_gap - 1000,
                    end: head_gap,
                }
            }
        });
        let tail = (tail_gap > 0).then(|| {
            if reversed {
                MarkerBounds {
                    start: tail_gap - 1000,
                    end: tail_gap,
                }
            } else {
                MarkerBounds {
                    start: VIEWPORT - tail_gap,
                    end: VIEWPORT + 1000,
                }
            }
        });
        GapLayout {
            viewport_extent: VIEWPORT,
            padding_start: 0,
            padding_end: 0,
            head,
            tail,
            tail_fills_viewport: false,
            item_count: 100,
            estimated_content_extent: Some(5000),
        }
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        let raw = self.binding.along(dx, dy);
        self.overscroll += self.binding.logical(raw);
        self.calls.push(Call::ScrollBy(dx, dy));
        self.pending.push((dx, dy));
    }

    fn stop_scroll(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn fling(&mut self, velocity_x: i32, velocity_y: i32) {
        self.calls.push(Call::Fling(velocity_x, velocity_y));
    }

    fn run_smooth_scroll(&mut self, plan: DecelerationPlan) {
        self.calls.push(Call::Smooth(plan));
    }
}

fn controller(host: MockHost) -> Controller<MockHost> {
    let binding = host.binding;
    let mut c = Controller::new(host, BouncyConfig::default()).unwrap();
    c.bind_axis(binding.orientation, binding.reversed).unwrap();
    c
}

/// Feeds the host's own `scroll_by` results back as notifications, like a real event loop.
fn pump(c: &mut Controller<MockHost>, state: ScrollState, now_ms: u64) {
    let pending: Vec<_> = c.host_mut().pending.drain(..).collect();
    for (dx, dy) in pending {
        c.on_scrolled(dx, dy, state, now_ms);
    }
}

/// Ticks at 60 Hz until the spring rests; returns the time reached.
fn run_spring(c: &mut Controller<MockHost>, mut now_ms: u64) -> u64 {
    for _ in 0..2000 {
        if !c.is_animating() {
            break;
        }
        now_ms += 16;
        c.tick(now_ms);
        pump(c, ScrollState::Idle, now_ms);
    }
    now_ms
}

#[test]
fn config_defaults_match_tuning() {
    let cfg = BouncyConfig::default();
    assert_eq!(cfg.gap_limit(), 220.0);
    assert_eq!(cfg.speed_factor(), 5.0);
    assert_eq!(cfg.tension(), 1000.0);
    assert_eq!(cfg.friction(), 200.0);
    assert_eq!(cfg.view_count_estimate_size(), 5);
    assert_eq!(cfg.max_adapter_size_to_estimate(), 20);
    assert_eq!(BouncyConfig::builder().build().unwrap(), cfg);
}

#[test]
fn config_rejects_invalid_values() {
    assert_eq!(
        BouncyConfig::builder().with_gap_limit(0.0).build(),
        Err(Error::InvalidGapLimit(0.0))
    );
    assert!(matches!(
        BouncyConfig::builder().with_gap_limit(f64::NAN).build(),
        Err(Error::InvalidGapLimit(_))
    ));
    assert!(matches!(
        BouncyConfig::builder().with_speed_factor(f64::INFINITY).build(),
        Err(Error::InvalidSpeedFactor(_))
    ));
    assert!(matches!(
        BouncyConfig::builder().with_tension(-1.0).build(),
        Err(Error::InvalidSpringParams { .. })
    ));
    assert!(Density::new(0.0).is_err());
    assert!(Density::new(f64::NAN).is_err());
}

#[test]
fn speed_factor_below_one_is_raised() {
    let cfg = BouncyConfig::builder()
        .with_speed_factor(0.25)
        .build()
        .unwrap();
    assert_eq!(cfg.speed_factor(), 1.0);
}

#[test]
fn binding_rejects_non_linear_layouts() {
    let host = MockHost {
        layout: LayoutKind::Grid,
        ..MockHost::new()
    };
    let err = Controller::new(host, BouncyConfig::default()).unwrap_err();
    assert_eq!(err, Error::UnsupportedLayout(LayoutKind::Grid));

    let mut c = controller(MockHost::new());
    c.host_mut().layout = LayoutKind::Staggered;
    assert_eq!(
        c.bind_axis(Orientation::Horizontal, false),
        Err(Error::UnsupportedLayout(LayoutKind::Staggered))
    );
    assert_eq!(c.binding(), AxisBinding::default());
}

#[test]
fn threshold_is_bounded_by_gap_limit() {
    let c = controller(MockHost::new());
    let edges = [
        Gaps { head: 30, tail: 0 },
        Gaps { head: 0, tail: 30 },
        Gaps::default(),
    ];
    for gaps in edges {
        for i in -400..=400 {
            let speed = i as f64 * 0.05;
            let t = c.scroll_back_threshold(speed, gaps);
            assert!(t <= 220, "speed={speed} gaps={gaps:?} t={t}");
        }
    }
}

#[test]
fn threshold_only_counts_speed_into_the_gap() {
    let c = controller(MockHost::new());
    let tail = Gaps { head: 0, tail: 50 };
    let head = Gaps { head: 50, tail: 0 };
    assert_eq!(c.scroll_back_threshold(2.0, tail), 88);
    assert_eq!(c.scroll_back_threshold(-2.0, tail), 0);
    assert_eq!(c.scroll_back_threshold(-2.0, head), 88);
    assert_eq!(c.scroll_back_threshold(2.0, head), 0);

    let r = controller(MockHost::reversed());
    assert_eq!(r.scroll_back_threshold(-2.0, tail), 88);
    assert_eq!(r.scroll_back_threshold(2.0, tail), 0);
}

#[test]
fn threshold_converts_through_density() {
    let c = controller(MockHost::new()).with_density(Density::new(2.0).unwrap());
    assert_eq!(c.gap_limit_px(), 440.0);
    // 4 px/ms at 2x is 2 dp/ms: 88 dp, i.e. 176 px.
    assert_eq!(
        c.scroll_back_threshold(4.0, Gaps { head: 0, tail: 10 }),
        176
    );
}

#[test]
fn stretch_resistance_decreases_to_zero_at_limit() {
    let c = controller(MockHost::new());
    let mut prev = f64::INFINITY;
    for gap in 0..=220u32 {
        let d = c.stretch_delta(10.0, gap);
        assert!(d < prev, "gap={gap} d={d} prev={prev}");
        prev = d;
    }
    assert_eq!(c.stretch_delta(10.0, 220), 0.0);
    assert_eq!(c.stretch_delta(10.0, 500), 0.0);
    assert_eq!(c.stretch_delta(-10.0, 110), -5.0);
}

#[test]
fn scenario_a_slow_arrival_decelerates_to_threshold() {
    let mut c = controller(MockHost::new());

    c.on_scrolled(0, 20, ScrollState::Settling, 10);
    assert_eq!(c.state(), OverscrollState::Idle);

    c.host_mut().overscroll = 50;
    c.on_scrolled(0, 50, ScrollState::Settling, 35);

    assert_eq!(c.session().min_distance_to_scroll_back, 88);
    assert_eq!(c.state(), OverscrollState::Decelerating);
    let plans = c.host().smooth_plans();
    assert_eq!(plans.len(), 1);
    let plan = plans[0];
    assert_eq!(plan.distance_to_stop, 88);
    assert_eq!(plan.direction, 1);
    assert_eq!(plan.axis, Axis::Y);
    assert_eq!(plan.edge, Edge::Tail);
    assert_eq!(plan.duration_ms(), 44);

    // The plan carries the gap past the threshold: snap back from there.
    c.host_mut().overscroll = 90;
    c.on_scrolled(0, 40, ScrollState::Settling, 55);
    assert_eq!(c.state(), OverscrollState::SnappingBack);
    assert_eq!(c.spring().state(Axis::Y).position, 90.0);
}

#[test]
fn scenario_b_fast_arrival_rides_to_the_limit() {
    let mut c = controller(MockHost::new());
    c.on_scrolled(0, 60, ScrollState::Settling, 10);

    c.host_mut().overscroll = 200;
    c.on_scrolled(0, 120, ScrollState::Settling, 30);

    assert_eq!(c.session().min_distance_to_scroll_back, 220);
    assert_eq!(c.state(), OverscrollState::Decelerating);
    assert_eq!(c.host().smooth_plans()[0].distance_to_stop, 220);
}

#[test]
fn gap_beyond_threshold_on_arrival_snaps_back_at_once() {
    let mut c = controller(MockHost::new());
    c.on_scrolled(0, 10, ScrollState::Settling, 10);

    c.host_mut().overscroll = 60;
    c.on_scrolled(0, 10, ScrollState::Settling, 20);

    // 1 px/ms gives a 44 px threshold.
    assert_eq!(c.session().min_distance_to_scroll_back, 44);
    assert_eq!(c.state(), OverscrollState::SnappingBack);
    assert!(c.host().smooth_plans().is_empty());
}

#[test]
fn scenario_c_release_past_threshold_snaps_back() {
    let mut c = controller(MockHost::new());
    assert!(!c.on_touch_down(0));

    c.host_mut().overscroll = 150;
    c.on_scrolled(0, 20, ScrollState::Dragging, 10);
    assert_eq!(c.state(), OverscrollState::Stretching);

    c.on_touch_up(12);
    assert_eq!(c.state(), OverscrollState::SnappingBack);
    assert!(c.session().should_use_spring);
    let s = c.spring().state(Axis::Y);
    assert_eq!(s.position, 150.0);
    assert_eq!(s.target_position, 0.0);
    assert_eq!(s.velocity, 0.0);
    assert!(c.spring().state(Axis::X).at_rest);
}

#[test]
fn release_below_threshold_decelerates() {
    let mut c = controller(MockHost::new());
    c.on_touch_down(0);
    c.host_mut().overscroll = 30;
    c.on_scrolled(0, 30, ScrollState::Dragging, 10);

    c.on_touch_up(10);
    assert_eq!(c.state(), OverscrollState::Decelerating);
    let plan = c.host().smooth_plans()[0];
    assert_eq!(plan.distance_to_stop, 132);
    assert_eq!(plan.duration_ms(), 44);
}

#[test]
fn scenario_d_fling_back_is_forwarded_without_stopping_it() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 100;
    assert!(c.on_touch_down(0));

    // Finger moving down shrinks a tail gap.
    assert!(c.on_fling(0, 3000));
    assert!(!c.host().calls.contains(&Call::Fling(0, -3000)));

    c.on_touch_up(5);
    assert_eq!(c.host().calls.last(), Some(&Call::Fling(0, -3000)));
    assert!(c.session().fling_overscroll_back);
    assert_eq!(c.state(), OverscrollState::SnappingBack);

    c.host_mut().calls.clear();
    let mut now = 5;
    for _ in 0..10 {
        now += 16;
        c.tick(now);
        pump(&mut c, ScrollState::Idle, now);
    }
    assert!(
        c.host()
            .calls
            .iter()
            .any(|call| matches!(call, Call::ScrollBy(0, dy) if *dy < 0))
    );
    assert_eq!(c.host().stops(), 0);
}

#[test]
fn fling_into_gap_is_dropped() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 100;
    c.on_touch_down(0);
    assert!(!c.on_fling(0, -3000));
    c.on_touch_up(5);
    assert!(
        !c.host()
            .calls
            .iter()
            .any(|call| matches!(call, Call::Fling(..)))
    );
}

#[test]
fn uncaptured_fling_is_left_to_the_host() {
    let mut c = controller(MockHost::new());
    c.on_touch_down(0);
    assert!(!c.on_fling(0, 3000));
    c.on_touch_up(5);
    assert!(c.host().calls.iter().all(|call| *call == Call::Stop));
}

#[test]
fn scenario_e_gap_closing_mid_drag_resets_session() {
    let mut c = controller(MockHost::new());
    c.on_touch_down(0);
    c.host_mut().overscroll = 30;
    c.on_scrolled(0, 30, ScrollState::Dragging, 10);
    c.on_touch_up(10);
    assert!(c.session().gap_already_visible);

    assert!(c.on_touch_down(20));
    assert!(c.spring().is_at_rest());
    c.host_mut().overscroll = 0;
    c.on_scrolled(0, -30, ScrollState::Dragging, 30);

    assert!(!c.session().gap_already_visible);
    assert_eq!(c.session().min_distance_to_scroll_back, 1);
    assert_eq!(c.state(), OverscrollState::Idle);
}

#[test]
fn gap_closing_stops_a_running_spring() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 80;
    c.on_touch_down(0);
    c.on_touch_up(1);
    assert!(c.is_animating());

    c.host_mut().overscroll = 0;
    c.on_scrolled(0, -80, ScrollState::Idle, 5);
    assert!(!c.is_animating());
    assert!(!c.session().is_scroll_back);
    assert_eq!(c.state(), OverscrollState::Idle);
}

#[test]
fn snap_back_round_trip_closes_the_gap() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 150;
    c.on_touch_down(0);
    c.on_touch_up(1);
    assert_eq!(c.state(), OverscrollState::SnappingBack);

    run_spring(&mut c, 1);

    assert_eq!(c.host().overscroll, 0);
    assert_eq!(c.state(), OverscrollState::Idle);
    assert!(!c.session().is_scroll_back);
    assert!(c.tick(10_000).is_none());
}

#[test]
fn snap_back_round_trip_on_reversed_head() {
    let mut c = controller(MockHost::reversed());
    c.host_mut().overscroll = -120;
    c.on_touch_down(0);
    c.on_touch_up(1);
    assert_eq!(c.gaps(), Gaps { head: 120, tail: 0 });

    run_spring(&mut c, 1);
    assert_eq!(c.host().overscroll, 0);
    assert_eq!(c.state(), OverscrollState::Idle);
}

#[test]
fn first_overshooting_spring_sample_is_discarded() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 100;
    c.on_touch_down(0);
    c.on_touch_up(0);
    c.host_mut().calls.clear();

    c.tick(0);
    c.tick(16);
    assert!(c.host().calls.is_empty());
    assert!(!c.session().is_spring_first_sample);

    c.tick(32);
    assert!(matches!(c.host().calls.as_slice(), [Call::Stop, Call::ScrollBy(0, dy)] if *dy < 0));
}

#[test]
fn spring_samples_are_ignored_while_finger_is_down() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 100;
    assert!(c.on_touch_down(0));
    c.on_scrolled(0, 10, ScrollState::Settling, 10);
    assert_eq!(c.state(), OverscrollState::SnappingBack);
    assert!(!c.session().should_use_spring);

    c.host_mut().calls.clear();
    for now in [10, 26, 42, 58] {
        c.tick(now);
    }
    assert!(c.host().calls.is_empty());
}

#[test]
fn inertial_snap_back_before_any_touch_closes_the_gap() {
    let mut c = controller(MockHost::new());
    assert!(c.session().should_use_spring);

    c.host_mut().overscroll = 100;
    c.on_scrolled(0, 10, ScrollState::Settling, 10);
    assert_eq!(c.state(), OverscrollState::SnappingBack);

    run_spring(&mut c, 10);
    assert_eq!(c.host().overscroll, 0);
    assert_eq!(c.state(), OverscrollState::Idle);
    assert!(!c.is_animating());
}

#[test]
fn scrolling_past_the_other_edge_cancels_the_snap_back() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 100;
    c.on_scrolled(0, 10, ScrollState::Settling, 10);
    assert!(c.session().is_scroll_back);
    assert_eq!(c.session().min_distance_to_scroll_back, 44);

    // A fast inertial scroll carries the list through to the head gap.
    c.host_mut().overscroll = -30;
    c.on_scrolled(0, -130, ScrollState::Settling, 20);

    assert_eq!(c.gaps(), Gaps { head: 30, tail: 0 });
    assert!(!c.session().is_scroll_back);
    assert!(c.spring().is_at_rest());
    assert!(c.session().gap_already_visible);
    assert_eq!(c.session().min_distance_to_scroll_back, 220);
    assert_eq!(c.state(), OverscrollState::PendingDecision);
}

#[test]
fn cancel_is_handled_like_release() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 150;
    assert!(c.on_touch_down(0));
    assert!(c.on_touch_cancel(5));
    assert!(!c.is_captured());
    assert!(c.session().should_use_spring);
    assert_eq!(c.state(), OverscrollState::SnappingBack);

    run_spring(&mut c, 5);
    assert_eq!(c.host().overscroll, 0);
    assert_eq!(c.state(), OverscrollState::Idle);
}

#[test]
fn drag_over_gap_is_resisted_and_captured() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 110;
    assert!(c.on_touch_down(0));

    assert!(c.on_touch_move(0, 20, 5));
    assert_eq!(c.host().calls.last(), Some(&Call::ScrollBy(0, 10)));
    assert_eq!(c.session().drag_sample_count, 1);
    assert!(c.session().is_first_drag_sample);
}

#[test]
fn captured_drag_without_gap_forwards_raw_deltas() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 10;
    assert!(c.on_touch_down(0));
    c.host_mut().overscroll = 0;

    assert!(c.on_touch_move(3, -25, 5));
    assert_eq!(c.host().calls.last(), Some(&Call::ScrollBy(3, -25)));
}

#[test]
fn uncaptured_drag_without_gap_does_nothing() {
    let mut c = controller(MockHost::new());
    assert!(!c.on_touch_down(0));
    assert!(!c.on_touch_move(0, 25, 5));
    assert_eq!(c.host().calls, [Call::Stop]);
}

#[test]
fn horizontal_binding_scrolls_along_x() {
    let mut host = MockHost::new();
    host.binding = AxisBinding::new(Orientation::Horizontal, false);
    let mut c = controller(host);
    c.host_mut().overscroll = 110;
    c.on_touch_down(0);
    c.on_touch_move(20, 99, 5);
    assert_eq!(c.host().calls.last(), Some(&Call::ScrollBy(10, 0)));

    c.on_touch_up(6);
    assert!(!c.spring().state(Axis::X).at_rest);
    assert!(c.spring().state(Axis::Y).at_rest);
}

#[test]
fn first_stretch_sample_substitutes_gap_length() {
    let mut c = controller(MockHost::new());
    c.host_mut().overscroll = 30;
    c.on_touch_down(0);
    c.on_touch_move(0, 10, 5);
    let tail = c.host().overscroll;

    pump(&mut c, ScrollState::Idle, 10);
    assert!(!c.session().is_first_drag_sample);
    assert_eq!(c.session().instantaneous_speed, tail as f64 / 10.0);
}

#[test]
fn zero_elapsed_keeps_previous_speed() {
    let mut c = controller(MockHost::new());
    c.on_scrolled(0, 20, ScrollState::Settling, 10);
    assert_eq!(c.session().instantaneous_speed, 2.0);
    c.on_scrolled(0, 500, ScrollState::Settling, 10);
    assert_eq!(c.session().instantaneous_speed, 2.0);
}

#[test]
fn spring_tick_at_rest_is_idempotent() {
    let mut s = SpringSimulator::new(BouncyConfig::default().spring_params());
    assert!(s.tick(16.0).is_none());

    s.start_to(Axis::Y, 40.0);
    let mut settled = 0;
    for _ in 0..500 {
        if let Some(sample) = s.tick(16.0) {
            if sample.settled {
                settled += 1;
            }
        }
    }
    assert_eq!(settled, 1);
    assert!(s.is_at_rest());

    let before = *s.state(Axis::Y);
    assert!(s.tick(16.0).is_none());
    assert_eq!(*s.state(Axis::Y), before);
    assert_eq!(before.position, 0.0);
    assert_eq!(before.velocity, 0.0);
}

#[test]
fn spring_contracts_monotonically_when_overdamped() {
    let mut s = SpringSimulator::new(BouncyConfig::default().spring_params());
    s.start_to(Axis::X, 150.0);
    let mut prev = 150;
    while let Some(sample) = s.tick(16.0) {
        assert!(sample.x <= prev);
        assert_eq!(sample.y, 0);
        prev = sample.x;
    }
    assert_eq!(prev, 0);
}

#[test]
fn tensionless_spring_rests_only_once_it_stops_moving() {
    let mut s = SpringSimulator::new(BouncyConfig::default().spring_params());
    s.start_to(Axis::Y, 100.0);
    s.tick(16.0);
    assert!(s.state(Axis::Y).velocity < -100.0);

    s.set_params(SpringParams {
        tension: 0.0,
        friction: 200.0,
    });
    let first = s.tick(16.0).unwrap();
    assert!(!first.settled);
    assert!(!s.is_at_rest());

    let mut settled = 0;
    for _ in 0..100 {
        if let Some(sample) = s.tick(16.0) {
            settled += sample.settled as u32;
        }
    }
    assert_eq!(settled, 1);
    let y = *s.state(Axis::Y);
    assert!(y.position > 0.0 && y.position < 100.0, "{y:?}");
    assert_eq!(y.target_position, y.position);
    assert_eq!(y.velocity, 0.0);
}

#[test]
fn spring_restart_keeps_velocity_only_while_moving() {
    let mut s = SpringSimulator::new(BouncyConfig::default().spring_params());
    s.start_to(Axis::Y, 100.0);
    s.tick(16.0);
    let v = s.state(Axis::Y).velocity;
    assert!(v < 0.0);

    s.start_to(Axis::Y, 80.0);
    assert_eq!(s.state(Axis::Y).velocity, v);
    assert_eq!(s.state(Axis::Y).position, 80.0);

    s.stop();
    assert!(s.is_at_rest());
    s.start_to(Axis::Y, 80.0);
    assert_eq!(s.state(Axis::Y).velocity, 0.0);
}

#[test]
fn deceleration_plan_duration_and_curve() {
    let plan = DecelerationPlan::new(2.0, 88, Axis::Y, 1, Edge::Tail);
    assert_eq!(plan.duration_ms(), 44);
    assert_eq!(plan.direction_vector(), (0, 1));
    assert_eq!(plan.offset_at(0), 0);
    assert_eq!(plan.offset_at(44), 88);
    assert!(plan.is_finished(44));

    let mut prev = 0;
    for t in 0..=44 {
        let off = plan.offset_at(t);
        assert!(off >= prev);
        prev = off;
    }
    // Ease-out: more than half the distance in the first quarter.
    assert!(plan.offset_at(11) > 44);

    let up = DecelerationPlan::new(-3.0, 10, Axis::X, -5, Edge::Head);
    assert_eq!(up.initial_speed, 3.0);
    assert_eq!(up.duration_ms(), 4);
    assert_eq!(up.direction_vector(), (-1, 0));
    assert_eq!(up.offset_at(4), -10);
}

#[test]
fn deceleration_plan_degenerates_to_immediate_stop() {
    assert!(DecelerationPlan::new(0.0, 88, Axis::Y, 1, Edge::Tail).is_immediate());
    assert!(DecelerationPlan::new(2.0, 0, Axis::Y, 1, Edge::Tail).is_immediate());
    assert!(DecelerationPlan::new(f64::NAN, 10, Axis::Y, 1, Edge::Tail).is_immediate());
    assert_eq!(
        DecelerationPlan::new(0.0, 88, Axis::Y, 1, Edge::Tail).offset_at(100),
        0
    );
    assert_eq!(decelerate(0.0), 0.0);
    assert_eq!(decelerate(1.0), 1.0);
    assert_eq!(decelerate(2.0), 1.0);
}

fn layout() -> GapLayout {
    GapLayout {
        viewport_extent: 800,
        padding_start: 10,
        padding_end: 20,
        head: None,
        tail: None,
        tail_fills_viewport: false,
        item_count: 100,
        estimated_content_extent: None,
    }
}

#[test]
fn gap_estimator_reads_marker_geometry() {
    let mut e = GapEstimator::new();

    let head = GapLayout {
        head: Some(MarkerBounds {
            start: -940,
            end: 60,
        }),
        ..layout()
    };
    assert_eq!(e.estimate(&head, false, 20), Gaps { head: 50, tail: 0 });
    // Reversed: the head sits at the bottom, measured from its top edge.
    let head_rev = GapLayout {
        head: Some(MarkerBounds {
            start: 700,
            end: 1700,
        }),
        ..layout()
    };
    assert_eq!(e.estimate(&head_rev, true, 20), Gaps { head: 80, tail: 0 });

    let tail = GapLayout {
        tail: Some(MarkerBounds {
            start: 700,
            end: 1700,
        }),
        ..layout()
    };
    assert_eq!(e.estimate(&tail, false, 20), Gaps { head: 0, tail: 80 });
    assert_eq!(e.previous_tail(), 80);

    assert_eq!(e.estimate(&layout(), false, 20), Gaps::default());
    assert_eq!(e.previous_tail(), 0);
}

#[test]
fn gap_estimator_subtracts_content_shortfall_for_short_lists() {
    let mut e = GapEstimator::new();
    // Three 100 px items in an 800 px container: the tail marker starts at 310.
    let short = GapLayout {
        tail: Some(MarkerBounds {
            start: 310,
            end: 1310,
        }),
        item_count: 3,
        estimated_content_extent: Some(300),
        ..layout()
    };
    assert_eq!(e.estimate(&short, false, 20).tail, 0);

    let pulled = GapLayout {
        tail: Some(MarkerBounds {
            start: 210,
            end: 1210,
        }),
        ..short
    };
    assert_eq!(e.estimate(&pulled, false, 20).tail, 70);

    // Above the estimate cutoff the raw reading is used.
    assert_eq!(e.estimate(&short, false, 2).tail, 470);
}

#[test]
fn gap_estimator_tracks_tail_that_fills_viewport() {
    let mut e = GapEstimator::new();
    let full = GapLayout {
        tail_fills_viewport: true,
        item_count: 0,
        ..layout()
    };
    e.note_scroll(&full, 40);
    assert_eq!(e.estimate(&full, false, 20).tail, 40);
    e.note_scroll(&full, -15);
    assert_eq!(e.estimate(&full, false, 20).tail, 25);
    e.note_scroll(&full, -100);
    assert_eq!(e.estimate(&full, false, 20).tail, 0);

    e.note_scroll(&layout(), 500);
    assert_eq!(e.previous_tail(), 0);
}

#[test]
fn content_extent_estimate_averages_samples() {
    assert_eq!(estimate_content_extent([100, 200], 10, 5), 1500);
    assert_eq!(estimate_content_extent([100, 200, 900], 4, 2), 600);
    assert_eq!(estimate_content_extent(core::iter::empty(), 4, 5), 0);
}
