//! Message taxonomy for the showcase screen.
//!
//! Host gesture handlers translate taps into [`ShowcaseMsg`] values and feed
//! them to [`ShowcaseController::update`](crate::controller::ShowcaseController::update).

use serde::Serialize;

use crate::engine::Started;
use crate::tabs::Tab;

/// Screens exposed to the host navigation shell.
///
/// The two screens are independent and never talk to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Destination {
    /// The tabbed feature showcase.
    #[default]
    Home,
    /// The standalone form screen.
    Forms,
}

impl Destination {
    /// Label shown in the navigation bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Forms => "Forms",
        }
    }

    /// All destinations in navigation order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Home, Self::Forms]
    }
}

/// Side effects a panel can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Share,
    Vibrate,
    OpenLink,
    PlatformAlert,
}

impl Effect {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Share => "📤 Share App",
            Self::Vibrate => "📳 Vibrate",
            Self::OpenLink => "🔗 Open RN Docs",
            Self::PlatformAlert => "Show Platform Alert",
        }
    }
}

/// Effects offered by the Interactions tab, in display order.
pub const INTERACTIONS: [Effect; 3] = [Effect::Share, Effect::Vibrate, Effect::OpenLink];

/// Events the host delivers to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseMsg {
    /// A tab affordance was tapped.
    SelectTab(usize),
    /// The rotation trigger was tapped.
    StartRotation,
    /// An effect trigger was tapped.
    Fire(Effect),
}

/// What the controller did with a [`ShowcaseMsg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A tab request was applied; `changed` is false when it was already active.
    TabSelected { tab: Tab, changed: bool },
    /// The tab index was outside the closed set and was ignored.
    Ignored,
    /// A rotation started.
    RotationStarted(Started),
    /// A rotation was already running; the request was dropped.
    AlreadyBusy,
    /// The effect was handed to the platform.
    Fired(Effect),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_titles() {
        let titles: Vec<&str> = Destination::all().iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["Home", "Forms"]);
        assert_eq!(Destination::default(), Destination::Home);
    }

    #[test]
    fn interactions_exclude_alert() {
        assert!(!INTERACTIONS.contains(&Effect::PlatformAlert));
        assert_eq!(INTERACTIONS[0].label(), "📤 Share App");
    }
}
