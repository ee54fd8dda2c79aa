//! Easing curves for timed transitions.

use serde::{Deserialize, Serialize};

/// Shape of a timed transition's progress over its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Starts slow, accelerates.
    EaseIn,
    /// Starts fast, decelerates.
    EaseOut,
    /// Slow at both ends.
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Inputs outside the unit interval are clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert!((Easing::EaseOut.apply(3.0) - 1.0).abs() < 1e-12);
        assert!(Easing::EaseIn.apply(-1.0).abs() < 1e-12);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }
}
