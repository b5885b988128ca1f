use crate::{Error, Result, SpringParams};

const DEFAULT_GAP_LIMIT_DP: f64 = 220.0;
const DEFAULT_SPEED_FACTOR: f64 = 5.0;
const DEFAULT_TENSION: f64 = 1000.0;
const DEFAULT_FRICTION: f64 = 200.0;
const DEFAULT_VIEW_COUNT_ESTIMATE_SIZE: usize = 5;
const DEFAULT_MAX_ADAPTER_SIZE_TO_ESTIMATE: usize = 20;

/// Immutable tuning for the overscroll engine.
///
/// Lengths are in density-independent units (dp); the controller converts them to physical
/// pixels with its [`Density`]. Build one through [`BouncyConfig::builder`]; every value that
/// comes out of `build()` is valid, so the config can be shared across controllers freely.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BouncyConfig {
    gap_limit: f64,
    speed_factor: f64,
    tension: f64,
    friction: f64,
    view_count_estimate_size: usize,
    max_adapter_size_to_estimate: usize,
}

impl BouncyConfig {
    pub fn builder() -> BouncyConfigBuilder {
        BouncyConfigBuilder::new()
    }

    /// The maximum distance (dp) the gap can be stretched to.
    pub fn gap_limit(&self) -> f64 {
        self.gap_limit
    }

    /// Always `>= 1`. Larger values make a given arrival speed reach less of the gap limit.
    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// How many laid-out items the host should average when estimating content size.
    pub fn view_count_estimate_size(&self) -> usize {
        self.view_count_estimate_size
    }

    /// Item counts up to this value get the "content shorter than viewport" correction.
    pub fn max_adapter_size_to_estimate(&self) -> usize {
        self.max_adapter_size_to_estimate
    }

    pub fn spring_params(&self) -> SpringParams {
        SpringParams {
            tension: self.tension,
            friction: self.friction,
        }
    }
}

impl Default for BouncyConfig {
    fn default() -> Self {
        Self {
            gap_limit: DEFAULT_GAP_LIMIT_DP,
            speed_factor: DEFAULT_SPEED_FACTOR,
            tension: DEFAULT_TENSION,
            friction: DEFAULT_FRICTION,
            view_count_estimate_size: DEFAULT_VIEW_COUNT_ESTIMATE_SIZE,
            max_adapter_size_to_estimate: DEFAULT_MAX_ADAPTER_SIZE_TO_ESTIMATE,
        }
    }
}

/// Builder for [`BouncyConfig`]. Validation happens once, in [`BouncyConfigBuilder::build`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BouncyConfigBuilder {
    config: BouncyConfig,
}

impl BouncyConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: BouncyConfig::default(),
        }
    }

    pub fn with_gap_limit(mut self, gap_limit_dp: f64) -> Self {
        self.config.gap_limit = gap_limit_dp;
        self
    }

    /// Values below 1 are raised to 1.
    pub fn with_speed_factor(mut self, speed_factor: f64) -> Self {
        self.config.speed_factor = if speed_factor < 1.0 {
            1.0
        } else {
            speed_factor
        };
        self
    }

    pub fn with_tension(mut self, tension: f64) -> Self {
        self.config.tension = tension;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.config.friction = friction;
        self
    }

    pub fn with_view_count_estimate_size(mut self, count: usize) -> Self {
        self.config.view_count_estimate_size = count;
        self
    }

    pub fn with_max_adapter_size_to_estimate(mut self, size: usize) -> Self {
        self.config.max_adapter_size_to_estimate = size;
        self
    }

    pub fn build(self) -> Result<BouncyConfig> {
        let c = self.config;
        if !c.gap_limit.is_finite() || c.gap_limit <= 0.0 {
            owarn!(gap_limit = c.gap_limit, "BouncyConfig: rejected gap limit");
            return Err(Error::InvalidGapLimit(c.gap_limit));
        }
        if !c.speed_factor.is_finite() {
            return Err(Error::InvalidSpeedFactor(c.speed_factor));
        }
        if !c.tension.is_finite() || !c.friction.is_finite() || c.tension < 0.0 || c.friction < 0.0
        {
            return Err(Error::InvalidSpringParams {
                tension: c.tension,
                friction: c.friction,
            });
        }
        Ok(c)
    }
}

impl Default for BouncyConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Physical pixels per density-independent unit.
///
/// `gap_limit` and `speed_factor` are tuned in dp while the host reports pixels; every
/// threshold computation goes through this type in both directions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Density(f64);

impl Density {
    /// One pixel per dp.
    pub const IDENTITY: Density = Density(1.0);

    pub fn new(pixels_per_dp: f64) -> Result<Self> {
        if !pixels_per_dp.is_finite() || pixels_per_dp <= 0.0 {
            return Err(Error::InvalidDensity(pixels_per_dp));
        }
        Ok(Self(pixels_per_dp))
    }

    pub fn pixels_per_dp(self) -> f64 {
        self.0
    }

    pub fn dp_to_px(self, dp: f64) -> f64 {
        dp * self.0
    }

    pub fn px_to_dp(self, px: f64) -> f64 {
        px / self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::IDENTITY
    }
}
