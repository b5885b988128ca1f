//! Adapter utilities for the `overscroll` crate.
//!
//! The `overscroll` crate decides what an overscroll gap should do but never moves anything
//! itself. This crate provides small, framework-neutral pieces an adapter usually needs:
//!
//! - [`SmoothScroll`]: runs a `DecelerationPlan` against a frame clock
//! - [`LinearList`]: a simulated list host with fling, smooth scroll and gap markers
//! - [`BouncyList`]: the event loop that feeds list notifications back into the controller
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod bouncy;
mod list;
mod smooth;


pub use bouncy::BouncyList;
pub use list::{LinearList, MAX_OVERSCROLL_GAP_DP, ScrollEvent};
pub use smooth::SmoothScroll;
