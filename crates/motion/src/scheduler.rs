//! Transition scheduling.
//!
//! The [`Scheduler`] trait is the seam between animation owners and whatever
//! drives frames on the host. Owners start transitions and hand over a
//! completion callback; the scheduler samples frames into the value and calls
//! the completion exactly once, with [`EndState::Completed`] when the
//! transition reached its target or [`EndState::Interrupted`] when it was
//! superseded or its value was dropped.
//!
//! [`FrameScheduler`] is a deterministic fixed-rate implementation for
//! headless hosts and tests: nothing moves until [`FrameScheduler::advance`]
//! or [`FrameScheduler::step_frame`] is called.

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

use crate::transition::{Sampler, Transition};
use crate::value::{AnimatedValue, WeakValue};

/// Frame rate used when none is configured.
pub const DEFAULT_FPS: u32 = 60;

/// Highest supported frame rate; faster rates are clamped to it.
pub const MAX_FPS: u32 = 1000;

const NANOS_PER_SEC: u64 = 1_000_000_000;

const fn clamp_fps(fps: u32) -> u32 {
    if fps == 0 {
        1
    } else if fps > MAX_FPS {
        MAX_FPS
    } else {
        fps
    }
}

/// Nominal length of one frame at `fps` frames per second, rounded down to
/// whole nanoseconds.
///
/// `fps` is clamped to `1..=MAX_FPS`, so the result is never zero.
#[must_use]
pub const fn frame_duration(fps: u32) -> Duration {
    Duration::from_nanos(NANOS_PER_SEC / clamp_fps(fps) as u64)
}

/// Point on the timeline where frame `n` ends.
///
/// Computed from the frame count rather than by summing frame lengths, so
/// `fps` frames always span exactly one second.
fn frame_end(fps: u32, n: u64) -> Duration {
    let nanos = u128::from(n) * u128::from(NANOS_PER_SEC) / u128::from(fps);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Identifier handed out for every started transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl TransitionId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndState {
    /// Reached its target.
    Completed,
    /// Stopped early: replaced by another transition or its value was dropped.
    Interrupted,
}

impl EndState {
    /// Whether the transition reached its target.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Callback run once when a transition ends.
pub type Completion = Box<dyn FnOnce(EndState)>;

/// Drives transitions on behalf of animation owners.
///
/// Starting a transition never blocks; the completion runs later, on the
/// same thread, from whatever turn the host uses to advance frames.
pub trait Scheduler {
    /// Start moving `value` along `transition`.
    ///
    /// A transition already running on the same value is interrupted first.
    fn start(
        &self,
        value: &AnimatedValue,
        transition: Transition,
        on_complete: Completion,
    ) -> TransitionId;
}

struct Running {
    id: TransitionId,
    value: WeakValue,
    sampler: Sampler,
    on_complete: Option<Completion>,
}

#[derive(Default)]
struct FrameState {
    next_id: u64,
    running: Vec<Running>,
    clock: Duration,
    frames: u64,
}

/// Fixed-rate, manually advanced scheduler.
///
/// ```rust
/// use std::time::Duration;
/// use motion::{AnimatedValue, Curve, FrameScheduler, Scheduler, Transition};
///
/// let scheduler = FrameScheduler::new(60);
/// let opacity = AnimatedValue::new("opacity", 0.0);
/// scheduler.start(
///     &opacity,
///     Transition::new(1.0, Curve::linear(Duration::from_millis(500))),
///     Box::new(|_| {}),
/// );
///
/// scheduler.advance(Duration::from_secs(1));
/// assert_eq!(opacity.get(), 1.0);
/// assert!(scheduler.is_idle());
/// ```
pub struct FrameScheduler {
    fps: u32,
    frame: Duration,
    state: RefCell<FrameState>,
}

impl FrameScheduler {
    /// Create a scheduler stepping at `fps` frames per second, clamped to
    /// `1..=MAX_FPS`.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        let fps = clamp_fps(fps);
        Self {
            fps,
            frame: frame_duration(fps),
            state: RefCell::new(FrameState::default()),
        }
    }

    /// Effective frame rate.
    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps
    }

    /// Nominal length of a single frame.
    #[must_use]
    pub const fn frame(&self) -> Duration {
        self.frame
    }

    /// Frames stepped so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.state.borrow().frames
    }

    /// Number of transitions still running.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.state.borrow().running.len()
    }

    /// Whether no transition is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }

    /// Whether the transition with `id` is still running.
    #[must_use]
    pub fn is_running(&self, id: TransitionId) -> bool {
        self.state.borrow().running.iter().any(|run| run.id == id)
    }

    /// Advance by wall-clock `elapsed`, stepping every frame that ends within
    /// it.
    ///
    /// Leftover time carries into the next call. Returns the number of frames
    /// stepped.
    pub fn advance(&self, elapsed: Duration) -> u64 {
        {
            let mut state = self.state.borrow_mut();
            state.clock = state.clock.saturating_add(elapsed);
        }
        let mut stepped = 0;
        while self.next_frame_due() {
            self.step_frame();
            stepped += 1;
        }
        stepped
    }

    /// Step frames until idle or until `limit` of animation time has passed.
    ///
    /// Returns whether the scheduler ended idle.
    pub fn run_until_idle(&self, limit: Duration) -> bool {
        let start = self.frames();
        while !self.is_idle() {
            let spent = frame_end(self.fps, self.frames() - start);
            if spent >= limit {
                break;
            }
            self.step_frame();
        }
        self.is_idle()
    }

    fn next_frame_due(&self) -> bool {
        let state = self.state.borrow();
        frame_end(self.fps, state.frames + 1) <= state.clock
    }

    /// Step every running transition by one frame.
    ///
    /// Completions run after the frame's bookkeeping is done, in start order,
    /// so they are free to start new transitions.
    pub fn step_frame(&self) {
        let ended = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let dt = frame_end(self.fps, state.frames + 1) - frame_end(self.fps, state.frames);
            state.frames += 1;
            state.clock = state.clock.max(frame_end(self.fps, state.frames));

            let mut ended = Vec::new();
            state.running.retain_mut(|run| {
                let Some(value) = run.value.upgrade() else {
                    tracing::trace!(id = %run.id, value = run.value.name(), "value dropped; interrupting");
                    ended.push((run.on_complete.take(), EndState::Interrupted));
                    return false;
                };
                let sample = run.sampler.step(dt);
                value.set(sample.value);
                if sample.done {
                    ended.push((run.on_complete.take(), EndState::Completed));
                    false
                } else {
                    true
                }
            });
            ended
        };

        for (on_complete, end) in ended {
            if let Some(on_complete) = on_complete {
                on_complete(end);
            }
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FrameScheduler")
            .field("fps", &self.fps)
            .field("frame", &self.frame)
            .field("frames", &state.frames)
            .field("running", &state.running.len())
            .finish()
    }
}

impl Scheduler for FrameScheduler {
    fn start(
        &self,
        value: &AnimatedValue,
        transition: Transition,
        on_complete: Completion,
    ) -> TransitionId {
        let handle = value.downgrade();
        let (id, superseded) = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = TransitionId(state.next_id);

            let mut superseded = Vec::new();
            state.running.retain_mut(|run| {
                if run.value.ptr_eq(&handle) {
                    tracing::trace!(id = %run.id, by = %id, value = value.name(), "superseded");
                    superseded.push(run.on_complete.take());
                    false
                } else {
                    true
                }
            });

            state.running.push(Running {
                id,
                value: handle,
                sampler: transition.sampler(value.get()),
                on_complete: Some(on_complete),
            });
            (id, superseded)
        };

        for on_complete in superseded.into_iter().flatten() {
            on_complete(EndState::Interrupted);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::transition::Curve;

    fn recorder() -> (Rc<Cell<Option<EndState>>>, Completion) {
        let slot = Rc::new(Cell::new(None));
        let sink = Rc::clone(&slot);
        (slot, Box::new(move |end: EndState| sink.set(Some(end))))
    }

    #[test]
    fn advance_carries_partial_frames() {
        let scheduler = FrameScheduler::new(100);
        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert_eq!(scheduler.frames(), 3);
    }

    #[test]
    fn completion_runs_once_on_target() {
        let scheduler = FrameScheduler::new(100);
        let value = AnimatedValue::new("v", 0.0);
        let (end, on_complete) = recorder();
        scheduler.start(
            &value,
            Transition::new(2.0, Curve::linear(Duration::from_millis(50))),
            on_complete,
        );

        scheduler.advance(Duration::from_millis(30));
        assert!(end.get().is_none());
        assert!(value.get() > 0.0 && value.get() < 2.0);

        scheduler.advance(Duration::from_millis(40));
        assert_eq!(end.get(), Some(EndState::Completed));
        assert!((value.get() - 2.0).abs() < f64::EPSILON);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn restarting_interrupts_previous() {
        let scheduler = FrameScheduler::new(60);
        let value = AnimatedValue::new("v", 0.0);
        let (first, first_done) = recorder();
        let (second, second_done) = recorder();

        let a = scheduler.start(
            &value,
            Transition::new(1.0, Curve::linear(Duration::from_secs(1))),
            first_done,
        );
        let b = scheduler.start(
            &value,
            Transition::new(1.0, Curve::linear(Duration::from_secs(1))),
            second_done,
        );

        assert_ne!(a, b);
        assert_eq!(first.get(), Some(EndState::Interrupted));
        assert!(second.get().is_none());
        assert!(!scheduler.is_running(a));
        assert!(scheduler.is_running(b));
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn dropped_value_interrupts_on_next_frame() {
        let scheduler = FrameScheduler::new(60);
        let value = AnimatedValue::new("v", 0.0);
        let (end, on_complete) = recorder();
        scheduler.start(
            &value,
            Transition::new(1.0, Curve::linear(Duration::from_secs(1))),
            on_complete,
        );
        drop(value);

        scheduler.step_frame();
        assert_eq!(end.get(), Some(EndState::Interrupted));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn completion_may_start_new_transition() {
        let scheduler = Rc::new(FrameScheduler::new(100));
        let value = AnimatedValue::new("v", 0.0);

        let chained = {
            let scheduler = Rc::clone(&scheduler);
            let value = value.clone();
            Box::new(move |_: EndState| {
                scheduler.start(
                    &value,
                    Transition::new(0.0, Curve::linear(Duration::from_millis(20))),
                    Box::new(|_| {}),
                );
            })
        };
        scheduler.start(
            &value,
            Transition::new(1.0, Curve::linear(Duration::from_millis(20))),
            chained,
        );

        assert!(scheduler.run_until_idle(Duration::from_secs(1)));
        assert!(value.get().abs() < f64::EPSILON);
    }

    #[test]
    fn one_second_is_exactly_fps_frames() {
        let scheduler = FrameScheduler::new(60);
        let value = AnimatedValue::new("v", 0.0);
        let (end, on_complete) = recorder();
        scheduler.start(
            &value,
            Transition::new(1.0, Curve::linear(Duration::from_secs(1))),
            on_complete,
        );

        assert_eq!(scheduler.advance(Duration::from_secs(1)), 60);
        assert_eq!(end.get(), Some(EndState::Completed));
        assert!((value.get() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn halfway_is_exact_at_uneven_frame_lengths() {
        let scheduler = FrameScheduler::new(60);
        let value = AnimatedValue::new("v", 0.0);
        scheduler.start(
            &value,
            Transition::new(1.0, Curve::linear(Duration::from_secs(2))),
            Box::new(|_| {}),
        );
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 60);
        assert!((value.get() - 0.5).abs() < 1e-12, "{}", value.get());
    }

    #[test]
    fn frame_rate_is_clamped() {
        assert_eq!(frame_duration(0), Duration::from_secs(1));
        assert_eq!(frame_duration(u32::MAX), Duration::from_millis(1));
        assert!(frame_duration(u32::MAX) > Duration::ZERO);

        let scheduler = FrameScheduler::new(u32::MAX);
        assert_eq!(scheduler.fps(), MAX_FPS);
        assert_eq!(scheduler.advance(Duration::from_millis(10)), 10);
    }

    #[test]
    fn manual_steps_consume_time() {
        let scheduler = FrameScheduler::new(100);
        scheduler.step_frame();
        scheduler.step_frame();
        assert_eq!(scheduler.frames(), 2);
        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert_eq!(scheduler.frames(), 5);
    }

    #[test]
    fn run_until_idle_respects_limit() {
        let scheduler = FrameScheduler::new(10);
        let value = AnimatedValue::new("v", 0.0);
        scheduler.start(
            &value,
            Transition::new(1.0, Curve::linear(Duration::from_secs(10))),
            Box::new(|_| {}),
        );
        assert!(!scheduler.run_until_idle(Duration::from_secs(1)));
        assert_eq!(scheduler.frames(), 10);
    }
}
