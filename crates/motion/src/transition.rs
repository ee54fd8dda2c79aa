//! Transition descriptions and their per-frame samplers.

use std::time::Duration;

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};

/// How a transition moves from its start value to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Fixed duration with an easing curve.
    Timing {
        /// Total length of the transition.
        duration: Duration,
        /// Progress shape.
        easing: Easing,
    },
    /// Damped spring; ends when the spring comes to rest.
    Spring(SpringConfig),
}

impl Curve {
    /// Fixed-duration curve.
    #[must_use]
    pub const fn timing(duration: Duration, easing: Easing) -> Self {
        Self::Timing { duration, easing }
    }

    /// Fixed-duration curve at constant speed.
    #[must_use]
    pub const fn linear(duration: Duration) -> Self {
        Self::timing(duration, Easing::Linear)
    }
}

/// A request to move a value to `to` along `curve`.
///
/// The start point is whatever the value holds when the transition starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Target value.
    pub to: f64,
    /// Curve followed to get there.
    pub curve: Curve,
}

impl Transition {
    /// Build a transition.
    #[must_use]
    pub const fn new(to: f64, curve: Curve) -> Self {
        Self { to, curve }
    }

    /// Start sampling from `from`.
    #[must_use]
    pub fn sampler(&self, from: f64) -> Sampler {
        let state = match self.curve {
            Curve::Timing { duration, easing } => SamplerState::Timing {
                duration,
                easing,
                elapsed: Duration::ZERO,
            },
            Curve::Spring(config) => SamplerState::Spring {
                config,
                position: from,
                velocity: 0.0,
                cached: None,
            },
        };
        Sampler {
            from,
            to: self.to,
            state,
        }
    }
}

/// Value produced by one sampler step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Value to display for this frame.
    pub value: f64,
    /// Whether the transition has reached its end.
    pub done: bool,
}

/// Running state of a [`Transition`].
#[derive(Debug, Clone)]
pub struct Sampler {
    from: f64,
    to: f64,
    state: SamplerState,
}

#[derive(Debug, Clone)]
enum SamplerState {
    Timing {
        duration: Duration,
        easing: Easing,
        elapsed: Duration,
    },
    Spring {
        config: SpringConfig,
        position: f64,
        velocity: f64,
        cached: Option<(f64, Spring)>,
    },
}

impl Sampler {
    /// Advance by `dt` and report the new value.
    ///
    /// The final sample of every transition is exactly its target.
    pub fn step(&mut self, dt: Duration) -> Sample {
        let (from, to) = (self.from, self.to);
        match &mut self.state {
            SamplerState::Timing {
                duration,
                easing,
                elapsed,
            } => {
                *elapsed = elapsed.saturating_add(dt);
                if *elapsed >= *duration {
                    return Sample {
                        value: to,
                        done: true,
                    };
                }
                let progress = easing.apply(elapsed.as_secs_f64() / duration.as_secs_f64());
                Sample {
                    value: from + (to - from) * progress,
                    done: false,
                }
            }
            SamplerState::Spring {
                config,
                position,
                velocity,
                cached,
            } => {
                let dt = dt.as_secs_f64();
                let spring = match cached {
                    Some((cached_dt, spring)) if (*cached_dt - dt).abs() < f64::EPSILON => *spring,
                    _ => {
                        let spring = Spring::from_config(dt, config);
                        *cached = Some((dt, spring));
                        spring
                    }
                };
                if spring.is_identity() {
                    return Sample {
                        value: to,
                        done: true,
                    };
                }

                (*position, *velocity) = spring.update(*position, *velocity, to);

                let settled = velocity.abs() <= config.rest_speed
                    && (to - *position).abs() <= config.rest_displacement;
                if settled {
                    *position = to;
                    *velocity = 0.0;
                }
                Sample {
                    value: *position,
                    done: settled,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(10);

    fn run(mut sampler: Sampler, max_frames: usize) -> (Vec<f64>, bool) {
        let mut values = Vec::new();
        for _ in 0..max_frames {
            let sample = sampler.step(FRAME);
            values.push(sample.value);
            if sample.done {
                return (values, true);
            }
        }
        (values, false)
    }

    #[test]
    fn linear_timing_is_proportional() {
        let transition = Transition::new(1.0, Curve::linear(Duration::from_millis(100)));
        let mut sampler = transition.sampler(0.0);
        let first = sampler.step(Duration::from_millis(25));
        assert!((first.value - 0.25).abs() < 1e-9);
        assert!(!first.done);
    }

    #[test]
    fn timing_ends_exactly_on_target() {
        let transition = Transition::new(1.0, Curve::timing(Duration::from_millis(95), Easing::EaseInOut));
        let (values, done) = run(transition.sampler(0.0), 20);
        assert!(done);
        assert_eq!(values.len(), 10);
        assert!((values.last().copied().unwrap_or_default() - 1.0).abs() < f64::EPSILON);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let transition = Transition::new(5.0, Curve::linear(Duration::ZERO));
        let sample = transition.sampler(1.0).step(FRAME);
        assert_eq!(sample, Sample { value: 5.0, done: true });
    }

    #[test]
    fn spring_settles_on_target() {
        let config = SpringConfig::from_tension_friction(50.0, 8.0);
        let transition = Transition::new(0.0, Curve::Spring(config));
        let (values, done) = run(transition.sampler(-390.0), 1000);
        assert!(done, "spring never settled");
        assert!(values.last().copied().unwrap_or(f64::NAN).abs() < f64::EPSILON);
        assert!(values.iter().any(|v| *v > 0.0), "underdamped spring should overshoot");
    }

    #[test]
    fn degenerate_spring_snaps() {
        let transition = Transition::new(1.0, Curve::Spring(SpringConfig::new(0.0, 1.0, 1.0)));
        let sample = transition.sampler(0.0).step(FRAME);
        assert_eq!(sample, Sample { value: 1.0, done: true });
    }
}
