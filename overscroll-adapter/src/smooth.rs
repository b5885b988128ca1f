use overscroll::DecelerationPlan;

/// Runs a [`DecelerationPlan`] against a clock, handing out incremental deltas.
///
/// Hosts call [`SmoothScroll::step`] once per frame and apply the returned delta along the
/// plan's axis. The sum of all deltas equals the plan's signed distance once it is done.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothScroll {
    plan: DecelerationPlan,
    start_ms: u64,
    applied: i32,
}

impl SmoothScroll {
    pub fn new(plan: DecelerationPlan, now_ms: u64) -> Self {
        Self {
            plan,
            start_ms: now_ms,
            applied: 0,
        }
    }

    pub fn plan(&self) -> &DecelerationPlan {
        &self.plan
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.plan.is_finished(now_ms.saturating_sub(self.start_ms))
    }

    /// Signed pixels to move since the previous step.
    pub fn step(&mut self, now_ms: u64) -> i32 {
        let total = self.plan.offset_at(now_ms.saturating_sub(self.start_ms));
        let delta = total - self.applied;
        self.applied = total;
        delta
    }

    /// Signed pixels handed out so far.
    pub fn applied(&self) -> i32 {
        self.applied
    }
}
