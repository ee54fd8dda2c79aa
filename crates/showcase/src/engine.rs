//! Entrance and rotation animations for the showcase screen.
//!
//! The engine owns four animated values and issues transitions for them on a
//! host [`Scheduler`]. The entrance sequence is fire-and-forget. The rotation
//! is guarded by an explicit [`RotationState`]: a second request while one is
//! running is refused with [`AlreadyBusy`] and nothing is queued.
//!
//! Completion callbacks only hold weak references to engine state. If the
//! screen is torn down while a rotation is in flight, the scheduler still runs
//! the callback, which finds nothing to reset and returns.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use motion::{
    AnimatedValue, Curve, Easing, EndState, Scheduler, SpringConfig, Transition, TransitionId,
    WeakValue,
};
use serde::Serialize;

/// Opacity before the entrance runs.
pub const FADE_START: f64 = 0.0;
/// Scale before the entrance runs.
pub const SCALE_START: f64 = 0.8;
/// Rotation progress at rest.
pub const ROTATION_REST: f64 = 0.0;

/// Timing and physics for the engine's transitions, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub fade: Duration,
    pub fade_easing: Easing,
    /// Spring shared by the slide and scale entrance transitions.
    pub entrance_spring: SpringConfig,
    pub rotation: Duration,
    /// Width of the viewport; the header slides in from `-viewport_width`.
    pub viewport_width: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fade: Duration::from_millis(1000),
            fade_easing: Easing::EaseInOut,
            entrance_spring: SpringConfig::from_tension_friction(50.0, 8.0),
            rotation: Duration::from_millis(2000),
            viewport_width: 390.0,
        }
    }
}

/// Busy guard for the rotation transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationState {
    #[default]
    Idle,
    /// A rotation is in flight; `run` numbers it within this engine.
    Running { run: u64 },
}

/// A rotation request was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Started {
    pub run: u64,
    pub transition: TransitionId,
}

/// A rotation request arrived while one was already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a rotation is already in progress")]
pub struct AlreadyBusy;

/// Point-in-time copy of every animated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationSnapshot {
    pub fade: f64,
    pub slide: f64,
    pub scale: f64,
    pub rotation: f64,
    pub busy: bool,
}

#[derive(Default)]
struct RotationTrack {
    state: Cell<RotationState>,
    runs: Cell<u64>,
    completed: Cell<u64>,
}

/// Drives the showcase's animated values.
pub struct AnimationEngine {
    scheduler: Rc<dyn Scheduler>,
    config: EngineConfig,
    fade: AnimatedValue,
    slide: AnimatedValue,
    scale: AnimatedValue,
    rotation: AnimatedValue,
    track: Rc<RotationTrack>,
}

impl AnimationEngine {
    /// Create the engine with every value at its starting point.
    #[must_use]
    pub fn new(scheduler: Rc<dyn Scheduler>, config: EngineConfig) -> Self {
        Self {
            scheduler,
            config,
            fade: AnimatedValue::new("fade", FADE_START),
            slide: AnimatedValue::new("slide", -config.viewport_width),
            scale: AnimatedValue::new("scale", SCALE_START),
            rotation: AnimatedValue::new("rotation", ROTATION_REST),
            track: Rc::new(RotationTrack::default()),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start fade, slide and scale toward their resting values, concurrently.
    ///
    /// There is no completion signal; each transition ends on its own.
    pub fn run_entrance(&self) {
        let spring = Curve::Spring(self.config.entrance_spring);
        self.launch(
            &self.fade,
            Transition::new(1.0, Curve::timing(self.config.fade, self.config.fade_easing)),
        );
        self.launch(&self.slide, Transition::new(0.0, spring));
        self.launch(&self.scale, Transition::new(1.0, spring));
        tracing::debug!(
            fade = ?self.config.fade,
            width = self.config.viewport_width,
            "entrance started"
        );
    }

    fn launch(&self, value: &AnimatedValue, transition: Transition) {
        let name = value.name();
        self.scheduler.start(
            value,
            transition,
            Box::new(move |end: EndState| {
                tracing::trace!(value = name, ?end, "entrance transition ended");
            }),
        );
    }

    /// Spin the rotation value once, unless a spin is already running.
    ///
    /// The busy check and the transition to [`RotationState::Running`] happen
    /// in the same turn. Completion is observed through [`Self::is_busy`].
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyBusy`] without touching any state when a rotation is
    /// in flight.
    pub fn start_rotation(&self) -> Result<Started, AlreadyBusy> {
        if self.is_busy() {
            return Err(AlreadyBusy);
        }

        let run = self.track.runs.get() + 1;
        self.track.runs.set(run);
        self.track.state.set(RotationState::Running { run });

        let track = Rc::downgrade(&self.track);
        let value = self.rotation.downgrade();
        let transition = self.scheduler.start(
            &self.rotation,
            Transition::new(1.0, Curve::linear(self.config.rotation)),
            Box::new(move |end: EndState| finish_rotation(&track, &value, run, end)),
        );

        tracing::debug!(run, %transition, "rotation started");
        Ok(Started { run, transition })
    }

    /// Whether a rotation is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self.track.state.get(), RotationState::Running { .. })
    }

    #[must_use]
    pub fn rotation_state(&self) -> RotationState {
        self.track.state.get()
    }

    /// Rotations that ran to their target.
    #[must_use]
    pub fn completed_rotations(&self) -> u64 {
        self.track.completed.get()
    }

    #[must_use]
    pub fn fade(&self) -> f64 {
        self.fade.get()
    }

    #[must_use]
    pub fn slide(&self) -> f64 {
        self.slide.get()
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale.get()
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation.get()
    }

    #[must_use]
    pub fn snapshot(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            fade: self.fade(),
            slide: self.slide(),
            scale: self.scale(),
            rotation: self.rotation(),
            busy: self.is_busy(),
        }
    }
}

impl fmt::Debug for AnimationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .field("rotation_state", &self.rotation_state())
            .finish_non_exhaustive()
    }
}

fn finish_rotation(track: &Weak<RotationTrack>, value: &WeakValue, run: u64, end: EndState) {
    let Some(track) = track.upgrade() else {
        tracing::trace!(run, ?end, "rotation ended after teardown; nothing to reset");
        return;
    };
    if track.state.get() != (RotationState::Running { run }) {
        return;
    }

    if let Some(value) = value.upgrade() {
        value.set(ROTATION_REST);
    }
    track.state.set(RotationState::Idle);
    if end.is_completed() {
        track.completed.set(track.completed.get() + 1);
    }
    tracing::debug!(run, ?end, "rotation finished");
}
