//! Tab selection and panel dispatch.
//!
//! The four panels form a closed set. [`TabController::render`] maps the
//! active [`Tab`] to a [`PanelDescriptor`] with an exhaustive match, so adding
//! or removing a panel is a compile-time change.

use serde::Serialize;

use crate::capabilities::PlatformInfo;
use crate::catalog::{FeatureRecord, GRID_COLUMNS};
use crate::messages::{Effect, INTERACTIONS};

/// The showcase tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Tab {
    #[default]
    Features,
    Animations,
    Platform,
    Interactions,
}

impl Tab {
    /// Number of tabs.
    pub const COUNT: usize = 4;

    /// All tabs in display order.
    #[must_use]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Features,
            Self::Animations,
            Self::Platform,
            Self::Interactions,
        ]
    }

    /// Position in the tab bar.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Features => 0,
            Self::Animations => 1,
            Self::Platform => 2,
            Self::Interactions => 3,
        }
    }

    /// Tab at `index`, if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Features),
            1 => Some(Self::Animations),
            2 => Some(Self::Platform),
            3 => Some(Self::Interactions),
            _ => None,
        }
    }

    /// Tab bar label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Features => "Features",
            Self::Animations => "Animations",
            Self::Platform => "Platform",
            Self::Interactions => "Interactions",
        }
    }
}

/// What the active tab should display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelDescriptor {
    FeatureGrid {
        features: &'static [FeatureRecord],
        columns: usize,
    },
    RotationDemo {
        busy: bool,
    },
    PlatformInfo {
        os: String,
        version: String,
        is_large_screen: bool,
        action: Effect,
    },
    InteractionPanel {
        actions: &'static [Effect],
    },
}

impl PanelDescriptor {
    /// Tab this descriptor belongs to.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        match self {
            Self::FeatureGrid { .. } => Tab::Features,
            Self::RotationDemo { .. } => Tab::Animations,
            Self::PlatformInfo { .. } => Tab::Platform,
            Self::InteractionPanel { .. } => Tab::Interactions,
        }
    }
}

/// Inputs a panel needs that the tab controller does not own.
#[derive(Debug, Clone, Copy)]
pub struct PanelContext<'a> {
    pub busy: bool,
    pub platform: &'a PlatformInfo,
    pub features: &'static [FeatureRecord],
}

/// Owns the active tab.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    /// Start on the first tab.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn active(&self) -> Tab {
        self.active
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active.index()
    }

    /// Activate `tab`. Returns whether the active tab changed.
    pub fn select(&mut self, tab: Tab) -> bool {
        if self.active == tab {
            return false;
        }
        tracing::debug!(from = self.active.title(), to = tab.title(), "tab selected");
        self.active = tab;
        true
    }

    /// Activate the tab at `index`.
    ///
    /// Indices outside the tab bar are ignored and leave the state unchanged.
    /// Returns the tab that is active afterwards, or `None` when ignored.
    pub fn select_index(&mut self, index: usize) -> Option<Tab> {
        let Some(tab) = Tab::from_index(index) else {
            tracing::debug!(index, "ignoring tab index outside the tab bar");
            return None;
        };
        self.select(tab);
        Some(tab)
    }

    /// Describe the active panel.
    #[must_use]
    pub fn render(&self, ctx: &PanelContext<'_>) -> PanelDescriptor {
        match self.active {
            Tab::Features => PanelDescriptor::FeatureGrid {
                features: ctx.features,
                columns: GRID_COLUMNS,
            },
            Tab::Animations => PanelDescriptor::RotationDemo { busy: ctx.busy },
            Tab::Platform => PanelDescriptor::PlatformInfo {
                os: ctx.platform.os.clone(),
                version: ctx.platform.version.clone(),
                is_large_screen: ctx.platform.is_large_screen,
                action: Effect::PlatformAlert,
            },
            Tab::Interactions => PanelDescriptor::InteractionPanel {
                actions: &INTERACTIONS,
            },
        }
    }
}
