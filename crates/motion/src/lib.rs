#![forbid(unsafe_code)]
// Physics and easing code reads better with these allowed.
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]

//! # Motion
//!
//! Animation primitives for single-threaded UI hosts.
//!
//! - **Springs**: closed-form damped harmonic motion, configured either with
//!   raw stiffness/damping/mass or with Origami tension/friction
//! - **Timing curves**: fixed-duration transitions with easing
//! - **Animated values**: shared scalar cells owned by a screen and written by
//!   a scheduler through weak handles
//! - **Schedulers**: the [`Scheduler`] seam and a deterministic
//!   [`FrameScheduler`] for headless hosts and tests
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use motion::{
//!     AnimatedValue, Curve, EndState, FrameScheduler, Scheduler, SpringConfig, Transition,
//! };
//!
//! let scheduler = FrameScheduler::new(60);
//! let scale = AnimatedValue::new("scale", 0.8);
//!
//! scheduler.start(
//!     &scale,
//!     Transition::new(1.0, Curve::Spring(SpringConfig::from_tension_friction(50.0, 8.0))),
//!     Box::new(|end: EndState| assert!(end.is_completed())),
//! );
//!
//! assert!(scheduler.run_until_idle(Duration::from_secs(5)));
//! assert_eq!(scale.get(), 1.0);
//! ```

mod easing;
mod scheduler;
mod spring;
mod transition;
mod value;

pub use easing::Easing;
pub use scheduler::{
    frame_duration, Completion, EndState, FrameScheduler, Scheduler, TransitionId, DEFAULT_FPS,
    MAX_FPS,
};
pub use spring::{Spring, SpringConfig, DEFAULT_REST_DISPLACEMENT, DEFAULT_REST_SPEED};
pub use transition::{Curve, Sample, Sampler, Transition};
pub use value::{interpolate, AnimatedValue, WeakValue};
