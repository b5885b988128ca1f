use crate::LayoutKind;

/// Errors raised while setting up the engine.
///
/// Nothing fails once a [`crate::Controller`] is bound: numeric edge cases during scrolling are
/// handled by substitution, never reported.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("gap limit must be positive and finite (got {0})")]
    InvalidGapLimit(f64),
    #[error("speed factor must be finite (got {0})")]
    InvalidSpeedFactor(f64),
    #[error("spring tension and friction must be non-negative and finite (tension={tension}, friction={friction})")]
    InvalidSpringParams { tension: f64, friction: f64 },
    #[error("density must be positive and finite (got {0})")]
    InvalidDensity(f64),
    #[error("host layout {0:?} does not support linear scrolling")]
    UnsupportedLayout(LayoutKind),
}

pub type Result<T> = core::result::Result<T, Error>;
