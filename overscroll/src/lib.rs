//! A headless elastic overscroll engine.
//!
//! When a drag or fling carries a linear list past its first or last item, a visually empty
//! gap opens beyond the content. This crate decides how that gap behaves: it stretches with
//! increasing resistance under the finger, and once released it either snaps back to zero with
//! a damped spring or, when it arrived too fast to snap back without a visible jump, first
//! decelerates to a stop.
//!
//! It is UI-agnostic. A host container is expected to provide (see [`ScrollHost`]):
//! - the rendered geometry of the head/tail gap markers
//! - `scroll_by` / `stop_scroll` / `fling` / smooth-scroll primitives
//! - touch, fling and scroll notifications, plus a frame tick for the spring
//!
//! For a reference host and a smooth-scroll runner, see the `overscroll-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod axis;
mod config;
mod controller;
mod decel;
mod error;
mod gap;
mod host;
mod spring;

#[cfg(test)]
mod tests;

pub use axis::{Axis, AxisBinding, Orientation};
pub use config::{BouncyConfig, BouncyConfigBuilder, Density};
pub use controller::{Controller, OverscrollSession, OverscrollState};
pub use decel::{DECELERATE_FACTOR, DecelerationPlan, decelerate};
pub use error::{Error, Result};
pub use gap::{Edge, GapEstimator, GapLayout, Gaps, MarkerBounds, estimate_content_extent};
pub use host::{LayoutKind, ScrollHost, ScrollState};
pub use spring::{SpringAxisState, SpringParams, SpringSample, SpringSimulator};
