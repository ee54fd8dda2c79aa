#![forbid(unsafe_code)]

//! # Showcase
//!
//! Controller for a mobile feature showcase screen: four tabs, an entrance
//! animation, a guarded rotation demo and a handful of platform effects.
//!
//! The host owns rendering and the OS; this crate owns state. A host mounts
//! a [`controller::ShowcaseController`] with a [`motion::Scheduler`] and a
//! [`capabilities::PlatformServices`] implementation, forwards taps as
//! [`messages::ShowcaseMsg`] and draws whatever
//! [`controller::ShowcaseController::render`] and
//! [`controller::ShowcaseController::scene`] describe.
//!
//! ## Public Modules
//!
//! - [`controller`] - Screen controller composing tabs, animation and effects
//! - [`tabs`] - Active tab and panel descriptors
//! - [`engine`] - Entrance and rotation animation with the busy guard
//! - [`scene`] - View transforms derived from animated values
//! - [`capabilities`] - Platform services seam
//! - [`config`] - Runtime configuration
//! - [`host`] - Headless host used by the `showcase` binary
//! - [`test_support`] - Platform fake and log capture for tests

pub mod capabilities;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod engine;
pub mod host;
pub mod logging;
pub mod messages;
pub mod scene;
pub mod tabs;
pub mod test_support;
