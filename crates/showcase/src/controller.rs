//! The showcase screen controller.
//!
//! [`ShowcaseController`] composes the [`TabController`] and the
//! [`AnimationEngine`] and fires the interaction panel's platform effects.
//! Mounting runs the entrance sequence once; tab changes never touch the
//! animation state, and the effects never touch either.

use std::fmt;
use std::rc::Rc;

use motion::Scheduler;

use crate::capabilities::{
    AlertOption, AlertRequest, AlertRole, PlatformInfo, PlatformServices, ShareRequest,
};
use crate::catalog;
use crate::config::{ContentSettings, ShowcaseConfig};
use crate::engine::{AlreadyBusy, AnimationEngine, Started};
use crate::messages::{Effect, Outcome, ShowcaseMsg};
use crate::scene::SceneTransforms;
use crate::tabs::{PanelContext, PanelDescriptor, Tab, TabController};

/// Controller behind the `Home` destination.
pub struct ShowcaseController {
    tabs: TabController,
    engine: AnimationEngine,
    services: Rc<dyn PlatformServices>,
    content: ContentSettings,
    platform: PlatformInfo,
}

impl ShowcaseController {
    /// Build the controller and start the entrance sequence.
    #[must_use]
    pub fn mount(
        config: &ShowcaseConfig,
        scheduler: Rc<dyn Scheduler>,
        services: Rc<dyn PlatformServices>,
    ) -> Self {
        let platform = services.platform();
        let engine = AnimationEngine::new(scheduler, config.engine_config());
        engine.run_entrance();
        tracing::debug!(os = %platform.os, version = %platform.version, "showcase mounted");

        Self {
            tabs: TabController::new(),
            engine,
            services,
            content: config.content.clone(),
            platform,
        }
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    /// Select the tab at `index`; out-of-range indices are ignored.
    ///
    /// Returns whether the active tab changed.
    pub fn select_tab(&mut self, index: usize) -> bool {
        let before = self.tabs.active();
        self.tabs.select_index(index).is_some_and(|tab| tab != before)
    }

    /// Select `tab`. Returns whether the active tab changed.
    pub fn select(&mut self, tab: Tab) -> bool {
        self.tabs.select(tab)
    }

    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.tabs.active_index()
    }

    /// Describe the active panel.
    #[must_use]
    pub fn render(&self) -> PanelDescriptor {
        self.tabs.render(&PanelContext {
            busy: self.engine.is_busy(),
            platform: &self.platform,
            features: catalog::features(),
        })
    }

    // ------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------

    /// Ask the engine for a rotation.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyBusy`] when a rotation is already in flight.
    pub fn start_rotation(&self) -> Result<Started, AlreadyBusy> {
        self.engine.start_rotation()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.engine.is_busy()
    }

    #[must_use]
    pub const fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    /// View transforms for the current frame.
    #[must_use]
    pub fn scene(&self) -> SceneTransforms {
        SceneTransforms::from_snapshot(&self.engine.snapshot())
    }

    #[must_use]
    pub const fn platform(&self) -> &PlatformInfo {
        &self.platform
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    /// Present the share sheet; a rejection is logged and otherwise dropped.
    pub fn share(&self) {
        let request = ShareRequest {
            message: self.content.share_message.clone(),
            title: self.content.share_title.clone(),
        };
        match self.services.share(&request) {
            Ok(outcome) => tracing::debug!(target: "showcase::effects", ?outcome, "share finished"),
            Err(err) => tracing::error!(target: "showcase::effects", error = %err, "error sharing"),
        }
    }

    /// Play the platform's haptic pattern.
    pub fn vibrate(&self) {
        let pattern = self.services.haptic_pattern();
        self.services.vibrate(&pattern);
    }

    /// Open the documentation link.
    pub fn open_link(&self) {
        self.services.open_url(&self.content.link_url);
    }

    /// Show the platform alert. Both options simply close it.
    pub fn show_platform_alert(&self) {
        let request = AlertRequest {
            title: self.content.alert_title.clone(),
            message: format!(
                "You're running on {} {}",
                self.platform.os, self.platform.version
            ),
            options: vec![
                AlertOption::new("Cool!", AlertRole::Default),
                AlertOption::new("Awesome!", AlertRole::Cancel),
            ],
        };
        let _dismissed_with = self.services.alert(&request);
    }

    /// Fire `effect`.
    pub fn fire(&self, effect: Effect) {
        match effect {
            Effect::Share => self.share(),
            Effect::Vibrate => self.vibrate(),
            Effect::OpenLink => self.open_link(),
            Effect::PlatformAlert => self.show_platform_alert(),
        }
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    /// Route a host event to the matching operation.
    pub fn update(&mut self, msg: ShowcaseMsg) -> Outcome {
        match msg {
            ShowcaseMsg::SelectTab(index) => {
                let before = self.tabs.active();
                match self.tabs.select_index(index) {
                    Some(tab) => Outcome::TabSelected {
                        tab,
                        changed: tab != before,
                    },
                    None => Outcome::Ignored,
                }
            }
            ShowcaseMsg::StartRotation => match self.start_rotation() {
                Ok(started) => Outcome::RotationStarted(started),
                Err(AlreadyBusy) => Outcome::AlreadyBusy,
            },
            ShowcaseMsg::Fire(effect) => {
                self.fire(effect);
                Outcome::Fired(effect)
            }
        }
    }
}

impl fmt::Debug for ShowcaseController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcaseController")
            .field("tabs", &self.tabs)
            .field("engine", &self.engine)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
