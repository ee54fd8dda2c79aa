//! Platform capabilities the showcase fires as opaque effects.
//!
//! The host implements [`PlatformServices`] on top of the OS share sheet,
//! haptics engine, URL opener and native alert dialogs. The controller never
//! waits on these beyond the call itself and never retries them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Length of a single vibration pulse.
pub const VIBRATION_PULSE: Duration = Duration::from_millis(250);

/// Platform family; decides which haptic strategy applies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    #[default]
    Ios,
    Android,
}

impl PlatformFamily {
    /// OS name as reported to the user.
    #[must_use]
    pub const fn os_name(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

/// Static facts about the running platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub family: PlatformFamily,
    pub os: String,
    pub version: String,
    pub is_large_screen: bool,
}

impl PlatformInfo {
    #[must_use]
    pub fn new(family: PlatformFamily, version: impl Into<String>, is_large_screen: bool) -> Self {
        Self {
            family,
            os: family.os_name().to_string(),
            version: version.into(),
            is_large_screen,
        }
    }
}

/// What the haptics engine should play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticPattern {
    /// Alternating wait/vibrate durations, starting with a wait.
    Pulses(Vec<Duration>),
    /// One continuous vibration.
    Flat(Duration),
}

impl HapticPattern {
    /// Strategy lookup: structured pulses on iOS, a flat buzz on Android.
    #[must_use]
    pub fn for_family(family: PlatformFamily) -> Self {
        match family {
            PlatformFamily::Ios => Self::Pulses(vec![
                Duration::ZERO,
                VIBRATION_PULSE,
                VIBRATION_PULSE,
                VIBRATION_PULSE,
            ]),
            PlatformFamily::Android => Self::Flat(VIBRATION_PULSE),
        }
    }

    /// Wall-clock length of the whole pattern.
    #[must_use]
    pub fn total(&self) -> Duration {
        match self {
            Self::Pulses(steps) => steps.iter().sum(),
            Self::Flat(duration) => *duration,
        }
    }
}

/// Payload for the share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub message: String,
    pub title: String,
}

/// What the user did with the share sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Dismissed,
}

/// Visual role of an alert button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertRole {
    Default,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertOption {
    pub label: String,
    pub role: AlertRole,
}

impl AlertOption {
    #[must_use]
    pub fn new(label: impl Into<String>, role: AlertRole) -> Self {
        Self {
            label: label.into(),
            role,
        }
    }
}

/// A modal alert dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub title: String,
    pub message: String,
    pub options: Vec<AlertOption>,
}

/// Failure reported by a platform capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    /// The capability ran and refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// OS side effects available to the showcase.
///
/// All calls happen on the UI thread; implementations must not block beyond
/// presenting the effect.
pub trait PlatformServices {
    /// Facts about the running platform.
    fn platform(&self) -> PlatformInfo;

    /// Present the share sheet.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] when the share sheet rejects the request.
    fn share(&self, request: &ShareRequest) -> Result<ShareOutcome, CapabilityError>;

    /// Play a haptic pattern. Best-effort.
    fn vibrate(&self, pattern: &HapticPattern);

    /// Hand a URL to the OS. Best-effort.
    fn open_url(&self, url: &str);

    /// Show a modal alert; returns the index of the option picked, if any.
    fn alert(&self, request: &AlertRequest) -> Option<usize>;

    /// Haptic strategy for this platform.
    fn haptic_pattern(&self) -> HapticPattern {
        HapticPattern::for_family(self.platform().family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ios_gets_pulse_pattern() {
        let pattern = HapticPattern::for_family(PlatformFamily::Ios);
        let HapticPattern::Pulses(steps) = &pattern else {
            panic!("expected pulses, got {pattern:?}");
        };
        let millis: Vec<u128> = steps.iter().map(Duration::as_millis).collect();
        assert_eq!(millis, vec![0, 250, 250, 250]);
        assert_eq!(pattern.total(), Duration::from_millis(750));
    }

    #[test]
    fn android_gets_flat_duration() {
        assert_eq!(
            HapticPattern::for_family(PlatformFamily::Android),
            HapticPattern::Flat(Duration::from_millis(250))
        );
    }

    #[test]
    fn platform_info_derives_os_name() {
        let info = PlatformInfo::new(PlatformFamily::Android, "34", true);
        assert_eq!(info.os, "android");
        assert!(info.is_large_screen);
    }

    #[test]
    fn capability_error_messages() {
        assert_eq!(
            CapabilityError::Rejected("user cancelled".into()).to_string(),
            "request rejected: user cancelled"
        );
    }
}
