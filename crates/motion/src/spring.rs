//! Damped spring physics.
//!
//! The stepper uses Ryan Juckett's closed-form damped harmonic motion:
//! for a fixed time step, the next position and velocity are a linear
//! combination of the current ones, so the four coefficients can be computed
//! once and reused every frame.
//!
//! See <https://www.ryanjuckett.com/damped-springs/> for the derivation.
//!
//! # License
//!
//! ```text
//! Copyright (c) 2008-2012 Ryan Juckett
//! http://www.ryanjuckett.com/
//!
//! This software is provided 'as-is', without any express or implied
//! warranty. In no event will the authors be held liable for any damages
//! arising from the use of this software.
//!
//! Permission is granted to anyone to use this software for any purpose,
//! including commercial applications, and to alter it and redistribute it
//! freely, subject to the following restrictions:
//!
//! 1. The origin of this software must not be misrepresented; you must not
//!    claim that you wrote the original software. If you use this software
//!    in a product, an acknowledgment in the product documentation would be
//!    appreciated but is not required.
//!
//! 2. Altered source versions must be plainly marked as such, and must not be
//!    misrepresented as being the original software.
//!
//! 3. This notice may not be removed or altered from any source
//!    distribution.
//!
//! Ported to Go by Charmbracelet, Inc. in 2021.
//! Ported to Rust by Charmed Rust in 2026.
//! Altered here: adds SpringConfig (tension/friction conversion and rest
//! thresholds) on top of the coefficient stepper.
//! ```

use serde::{Deserialize, Serialize};

const EPSILON: f64 = f64::EPSILON;

/// Default displacement below which a spring counts as settled.
pub const DEFAULT_REST_DISPLACEMENT: f64 = 0.001;

/// Default speed below which a spring counts as settled.
pub const DEFAULT_REST_SPEED: f64 = 0.001;

/// Physical parameters of a spring-driven transition.
///
/// Springs are usually described by designers in "tension/friction" terms
/// (the Origami model); [`SpringConfig::from_tension_friction`] converts
/// those into stiffness and damping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Spring constant `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Mass attached to the spring.
    pub mass: f64,
    /// Distance from the target under which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
}

impl SpringConfig {
    /// Create a configuration from raw physical parameters.
    #[must_use]
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_displacement: DEFAULT_REST_DISPLACEMENT,
            rest_speed: DEFAULT_REST_SPEED,
        }
    }

    /// Convert Origami tension/friction into stiffness/damping with unit mass.
    ///
    /// ```rust
    /// use motion::SpringConfig;
    ///
    /// let spring = SpringConfig::from_tension_friction(50.0, 8.0);
    /// assert!((spring.stiffness - 266.4).abs() < 1e-9);
    /// assert!((spring.damping - 25.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn from_tension_friction(tension: f64, friction: f64) -> Self {
        Self::new(
            (tension - 30.0) * 3.62 + 194.0,
            (friction - 8.0) * 3.0 + 25.0,
            1.0,
        )
    }

    /// Undamped angular frequency `ω = √(k/m)`, or zero for a degenerate spring.
    #[must_use]
    pub fn angular_frequency(&self) -> f64 {
        if self.stiffness <= 0.0 || self.mass <= 0.0 {
            return 0.0;
        }
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `ζ = c / (2√(km))`.
    ///
    /// Below 1 the spring oscillates around its target, above 1 it creeps.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        let critical = 2.0 * (self.stiffness.max(0.0) * self.mass.max(0.0)).sqrt();
        if critical < EPSILON {
            return 0.0;
        }
        self.damping.max(0.0) / critical
    }

    /// Whether the spring overshoots its target before settling.
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::from_tension_friction(40.0, 7.0)
    }
}

/// Precomputed spring coefficients for one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pos_pos: f64,
    pos_vel: f64,
    vel_pos: f64,
    vel_vel: f64,
}

impl Spring {
    /// Coefficients for advancing by `delta_time` seconds.
    ///
    /// Negative inputs are clamped to zero; a zero angular frequency yields a
    /// spring that never moves.
    #[must_use]
    pub fn new(delta_time: f64, angular_frequency: f64, damping_ratio: f64) -> Self {
        let omega = angular_frequency.max(0.0);
        let zeta = damping_ratio.max(0.0);

        if omega < EPSILON {
            return Self::IDENTITY;
        }

        if zeta > 1.0 + EPSILON {
            Self::over_damped(delta_time, omega, zeta)
        } else if zeta < 1.0 - EPSILON {
            Self::under_damped(delta_time, omega, zeta)
        } else {
            Self::critically_damped(delta_time, omega)
        }
    }

    /// Coefficients for a [`SpringConfig`].
    #[must_use]
    pub fn from_config(delta_time: f64, config: &SpringConfig) -> Self {
        Self::new(delta_time, config.angular_frequency(), config.damping_ratio())
    }

    const IDENTITY: Self = Self {
        pos_pos: 1.0,
        pos_vel: 0.0,
        vel_pos: 0.0,
        vel_vel: 1.0,
    };

    /// Whether this spring leaves every state untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    fn over_damped(dt: f64, omega: f64, zeta: f64) -> Self {
        let za = -omega * zeta;
        let zb = omega * (zeta * zeta - 1.0).sqrt();
        let z1 = za - zb;
        let z2 = za + zb;

        let e1 = (z1 * dt).exp();
        let e2 = (z2 * dt).exp();
        let inv_two_zb = 1.0 / (2.0 * zb);

        let e1_term = e1 * inv_two_zb;
        let e2_term = e2 * inv_two_zb;
        let z1_e1_term = z1 * e1_term;
        let z2_e2_term = z2 * e2_term;

        Self {
            pos_pos: e1_term * z2 - z2_e2_term + e2,
            pos_vel: -e1_term + e2_term,
            vel_pos: (z1_e1_term - z2_e2_term + e2) * z2,
            vel_vel: -z1_e1_term + z2_e2_term,
        }
    }

    fn under_damped(dt: f64, omega: f64, zeta: f64) -> Self {
        let omega_zeta = omega * zeta;
        let alpha = omega * (1.0 - zeta * zeta).sqrt();

        let decay = (-omega_zeta * dt).exp();
        let cos = (alpha * dt).cos();
        let sin = (alpha * dt).sin();
        let inv_alpha = 1.0 / alpha;

        let decay_sin = decay * sin;
        let decay_cos = decay * cos;
        let decay_omega_zeta_sin = decay * omega_zeta * sin * inv_alpha;

        Self {
            pos_pos: decay_cos + decay_omega_zeta_sin,
            pos_vel: decay_sin * inv_alpha,
            vel_pos: -decay_sin * alpha - omega_zeta * decay_omega_zeta_sin,
            vel_vel: decay_cos - decay_omega_zeta_sin,
        }
    }

    fn critically_damped(dt: f64, omega: f64) -> Self {
        let decay = (-omega * dt).exp();
        let time_decay = dt * decay;
        let time_decay_omega = time_decay * omega;

        Self {
            pos_pos: time_decay_omega + decay,
            pos_vel: time_decay,
            vel_pos: -omega * time_decay_omega,
            vel_vel: -time_decay_omega + decay,
        }
    }

    /// Advance `(position, velocity)` one step toward `target`.
    #[inline]
    #[must_use]
    pub fn update(&self, position: f64, velocity: f64, target: f64) -> (f64, f64) {
        let offset = position - target;
        (
            offset * self.pos_pos + velocity * self.pos_vel + target,
            offset * self.vel_pos + velocity * self.vel_vel,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn tension_friction_conversion() {
        let config = SpringConfig::from_tension_friction(50.0, 8.0);
        assert!((config.stiffness - 266.4).abs() < 1e-9);
        assert!((config.damping - 25.0).abs() < 1e-9);
        assert!((config.mass - 1.0).abs() < f64::EPSILON);
        assert!(config.is_underdamped());
    }

    #[test]
    fn degenerate_spring_is_identity() {
        let config = SpringConfig::new(0.0, 10.0, 1.0);
        let spring = Spring::from_config(DT, &config);
        assert!(spring.is_identity());
        assert_eq!(spring.update(3.0, 1.5, 10.0), (3.0, 1.5));
    }

    #[test]
    fn critically_damped_settles_without_overshoot() {
        let spring = Spring::new(DT, 8.0, 1.0);
        let (mut pos, mut vel) = (0.0, 0.0);
        for _ in 0..300 {
            (pos, vel) = spring.update(pos, vel, 1.0);
            assert!(pos <= 1.0 + 1e-9, "overshot to {pos}");
        }
        assert!((pos - 1.0).abs() < 1e-4);
        assert!(vel.abs() < 1e-3);
    }

    #[test]
    fn entrance_spring_overshoots_then_settles() {
        let spring = Spring::from_config(DT, &SpringConfig::from_tension_friction(50.0, 8.0));
        let (mut pos, mut vel) = (0.8, 0.0);
        let mut peak: f64 = 0.0;
        for _ in 0..240 {
            (pos, vel) = spring.update(pos, vel, 1.0);
            peak = peak.max(pos);
        }
        assert!(peak > 1.0, "underdamped spring should overshoot, peak={peak}");
        assert!((pos - 1.0).abs() < 1e-3);
    }

    #[test]
    fn over_damped_creeps() {
        let spring = Spring::new(DT, 5.0, 2.5);
        let (mut pos, mut vel) = (0.0, 0.0);
        for _ in 0..60 {
            (pos, vel) = spring.update(pos, vel, 100.0);
            assert!(pos <= 100.0);
        }
        assert!(pos > 0.0);
        assert!(vel > 0.0);
    }
}
