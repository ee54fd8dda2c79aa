//! Derived view transforms.
//!
//! The host applies these to its views every frame; they are pure functions of
//! an [`AnimationSnapshot`].

use motion::interpolate;
use serde::Serialize;

use crate::engine::AnimationSnapshot;

/// Distance feature cards rise from while fading in.
pub const CARD_RISE: f64 = 50.0;

/// Opacity and affine parts of one view's transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerTransform {
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotate_degrees: f64,
}

impl LayerTransform {
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate_degrees: 0.0,
    };
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// State of the rotation trigger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: &'static str,
}

impl TriggerState {
    #[must_use]
    pub const fn for_busy(busy: bool) -> Self {
        if busy {
            Self {
                enabled: false,
                label: "Animating...",
            }
        } else {
            Self {
                enabled: true,
                label: "Start Animation",
            }
        }
    }
}

/// Transforms for every animated view on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneTransforms {
    pub header: LayerTransform,
    pub content: LayerTransform,
    pub feature_card: LayerTransform,
    pub rotation_box: LayerTransform,
    pub rotation_trigger: TriggerState,
}

impl SceneTransforms {
    #[must_use]
    pub fn from_snapshot(snapshot: &AnimationSnapshot) -> Self {
        Self {
            header: LayerTransform {
                opacity: snapshot.fade,
                translate_x: snapshot.slide,
                ..LayerTransform::IDENTITY
            },
            content: LayerTransform {
                opacity: snapshot.fade,
                scale: snapshot.scale,
                ..LayerTransform::IDENTITY
            },
            feature_card: LayerTransform {
                opacity: snapshot.fade,
                translate_y: interpolate(snapshot.fade, (0.0, 1.0), (CARD_RISE, 0.0)),
                ..LayerTransform::IDENTITY
            },
            rotation_box: LayerTransform {
                scale: snapshot.scale,
                rotate_degrees: interpolate(snapshot.rotation, (0.0, 1.0), (0.0, 360.0)),
                ..LayerTransform::IDENTITY
            },
            rotation_trigger: TriggerState::for_busy(snapshot.busy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(fade: f64, rotation: f64, busy: bool) -> AnimationSnapshot {
        AnimationSnapshot {
            fade,
            slide: -120.0,
            scale: 0.9,
            rotation,
            busy,
        }
    }

    #[test]
    fn cards_rise_as_they_fade_in() {
        let hidden = SceneTransforms::from_snapshot(&snapshot(0.0, 0.0, false));
        let shown = SceneTransforms::from_snapshot(&snapshot(1.0, 0.0, false));
        assert!((hidden.feature_card.translate_y - CARD_RISE).abs() < 1e-12);
        assert!(shown.feature_card.translate_y.abs() < 1e-12);
    }

    #[test]
    fn header_follows_slide_and_content_follows_scale() {
        let scene = SceneTransforms::from_snapshot(&snapshot(0.5, 0.0, false));
        assert!((scene.header.translate_x + 120.0).abs() < 1e-12);
        assert!((scene.header.opacity - 0.5).abs() < 1e-12);
        assert!((scene.content.scale - 0.9).abs() < 1e-12);
    }

    #[test]
    fn rotation_maps_to_degrees_and_disables_trigger() {
        let scene = SceneTransforms::from_snapshot(&snapshot(1.0, 0.25, true));
        assert!((scene.rotation_box.rotate_degrees - 90.0).abs() < 1e-9);
        assert_eq!(scene.rotation_trigger, TriggerState::for_busy(true));
        assert!(!scene.rotation_trigger.enabled);
        assert_eq!(scene.rotation_trigger.label, "Animating...");
    }
}
