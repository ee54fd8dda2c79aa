//! Headless host.
//!
//! Drives a [`ShowcaseController`] on a [`FrameScheduler`] with no display,
//! answering platform calls from configuration and printing what a screen
//! would show as JSON lines.

use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use motion::FrameScheduler;
use serde::Serialize;
use serde_json::json;

use crate::capabilities::{
    AlertRequest, CapabilityError, HapticPattern, PlatformInfo, PlatformServices, ShareOutcome,
    ShareRequest,
};
use crate::config::ShowcaseConfig;
use crate::controller::ShowcaseController;
use crate::messages::{Effect, INTERACTIONS, Outcome, ShowcaseMsg};
use crate::tabs::Tab;

/// Upper bound on simulated time when waiting for animations to settle.
const SETTLE_LIMIT: Duration = Duration::from_secs(30);

/// Platform services that only log.
#[derive(Debug, Clone)]
pub struct HeadlessServices {
    platform: PlatformInfo,
}

impl HeadlessServices {
    #[must_use]
    pub const fn new(platform: PlatformInfo) -> Self {
        Self { platform }
    }
}

impl PlatformServices for HeadlessServices {
    fn platform(&self) -> PlatformInfo {
        self.platform.clone()
    }

    fn share(&self, request: &ShareRequest) -> Result<ShareOutcome, CapabilityError> {
        tracing::info!(title = %request.title, message = %request.message, "share");
        Ok(ShareOutcome::Shared)
    }

    fn vibrate(&self, pattern: &HapticPattern) {
        tracing::info!(?pattern, total = ?pattern.total(), "vibrate");
    }

    fn open_url(&self, url: &str) {
        tracing::info!(url, "open url");
    }

    fn alert(&self, request: &AlertRequest) -> Option<usize> {
        tracing::info!(title = %request.title, message = %request.message, "alert");
        Some(0)
    }
}

fn emit(out: &mut impl Write, line: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut *out, line).context("failed to encode output line")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

fn mount(config: &ShowcaseConfig) -> (Rc<FrameScheduler>, ShowcaseController) {
    let scheduler = Rc::new(FrameScheduler::new(config.animation.fps));
    let services = Rc::new(HeadlessServices::new(config.platform_info()));
    let controller = ShowcaseController::mount(config, scheduler.clone(), services);
    (scheduler, controller)
}

fn settle(scheduler: &FrameScheduler) -> Result<()> {
    if !scheduler.run_until_idle(SETTLE_LIMIT) {
        bail!("animations did not settle within {SETTLE_LIMIT:?}");
    }
    Ok(())
}

/// Walk through the whole screen: entrance, every tab, the rotation guard
/// and every effect.
///
/// # Errors
///
/// Fails when output cannot be written or the animations never settle.
pub fn run_tour(config: &ShowcaseConfig, out: &mut impl Write) -> Result<()> {
    let (scheduler, mut controller) = mount(config);
    tracing::info!(platform = %controller.platform().os, "tour started");

    emit(out, &json!({ "step": "mounted", "scene": controller.scene() }))?;
    settle(&scheduler)?;
    emit(
        out,
        &json!({
            "step": "entrance_settled",
            "frames": scheduler.frames(),
            "scene": controller.scene(),
        }),
    )?;

    for tab in Tab::all() {
        controller.update(ShowcaseMsg::SelectTab(tab.index()));
        emit(
            out,
            &json!({ "step": "tab", "title": tab.title(), "panel": controller.render() }),
        )?;
    }

    controller.select(Tab::Animations);
    let first = controller.update(ShowcaseMsg::StartRotation);
    let second = controller.update(ShowcaseMsg::StartRotation);
    let Outcome::RotationStarted(started) = first else {
        bail!("rotation did not start from an idle screen");
    };
    emit(
        out,
        &json!({
            "step": "rotation_started",
            "run": started.run,
            "transition": started.transition.to_string(),
            "second_request_refused": second == Outcome::AlreadyBusy,
        }),
    )?;

    scheduler.advance(controller.engine().config().rotation / 2);
    emit(
        out,
        &json!({
            "step": "rotation_halfway",
            "rotation_box": controller.scene().rotation_box,
            "panel": controller.render(),
        }),
    )?;

    settle(&scheduler)?;
    emit(
        out,
        &json!({
            "step": "rotation_finished",
            "completed": controller.engine().completed_rotations(),
            "panel": controller.render(),
        }),
    )?;

    controller.select(Tab::Interactions);
    for effect in INTERACTIONS.into_iter().chain([Effect::PlatformAlert]) {
        controller.update(ShowcaseMsg::Fire(effect));
        emit(out, &json!({ "step": "effect", "label": effect.label() }))?;
    }

    tracing::info!(frames = scheduler.frames(), "tour finished");
    Ok(())
}

/// Print the descriptor of the tab at `index` once the entrance has settled.
///
/// # Errors
///
/// Fails on an out-of-range index or when output cannot be written.
pub fn render_tab(config: &ShowcaseConfig, index: usize, out: &mut impl Write) -> Result<()> {
    let Some(tab) = Tab::from_index(index) else {
        bail!("tab index {index} is out of range (0..{})", Tab::COUNT);
    };
    let (scheduler, mut controller) = mount(config);
    settle(&scheduler)?;
    controller.select(tab);
    emit(out, &controller.render())
}
