// Test infrastructure; stylistic pedantry is relaxed here.
#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]

//! Fakes and log capture for controller tests.
//!
//! [`RecordingServices`] stands in for the platform and remembers every call
//! in order. [`LogCapture`] is a `tracing` layer that keeps every event so
//! tests can assert on what reached the operator log.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use motion::FrameScheduler;
//! use showcase::config::ShowcaseConfig;
//! use showcase::controller::ShowcaseController;
//! use showcase::test_support::{EffectCall, LogCapture, RecordingServices};
//!
//! let services = Rc::new(RecordingServices::ios());
//! services.fail_share_with("no share targets");
//! let controller = ShowcaseController::mount(
//!     &ShowcaseConfig::default(),
//!     Rc::new(FrameScheduler::default()),
//!     services.clone(),
//! );
//!
//! let logs = LogCapture::new();
//! logs.with(|| controller.share());
//! assert_eq!(logs.count_at(tracing::Level::ERROR), 1);
//! assert!(matches!(services.calls()[0], EffectCall::Share(_)));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::capabilities::{
    AlertRequest, CapabilityError, HapticPattern, PlatformFamily, PlatformInfo, PlatformServices,
    ShareOutcome, ShareRequest,
};

// ============================================================================
// Recording platform
// ============================================================================

/// One call received by [`RecordingServices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectCall {
    Share(ShareRequest),
    Vibrate(HapticPattern),
    OpenUrl(String),
    Alert(AlertRequest),
}

/// Platform fake that records calls instead of touching an OS.
#[derive(Debug)]
pub struct RecordingServices {
    platform: PlatformInfo,
    share_result: RefCell<Result<ShareOutcome, CapabilityError>>,
    alert_choice: Option<usize>,
    calls: RefCell<Vec<EffectCall>>,
}

impl RecordingServices {
    pub fn new(platform: PlatformInfo) -> Self {
        Self {
            platform,
            share_result: RefCell::new(Ok(ShareOutcome::Shared)),
            alert_choice: Some(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn ios() -> Self {
        Self::new(PlatformInfo::new(PlatformFamily::Ios, "17.0", false))
    }

    pub fn android() -> Self {
        Self::new(PlatformInfo::new(PlatformFamily::Android, "34", false))
    }

    /// Make every following share call fail with `reason`.
    pub fn fail_share_with(&self, reason: impl Into<String>) {
        *self.share_result.borrow_mut() = Err(CapabilityError::Rejected(reason.into()));
    }

    /// Make every following share sheet close without sharing.
    pub fn dismiss_share(&self) {
        *self.share_result.borrow_mut() = Ok(ShareOutcome::Dismissed);
    }

    /// Option index the fake "user" picks on every alert.
    pub fn with_alert_choice(mut self, choice: Option<usize>) -> Self {
        self.alert_choice = choice;
        self
    }

    pub fn calls(&self) -> Vec<EffectCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_call(&self) -> Option<EffectCall> {
        self.calls.borrow().last().cloned()
    }

    fn record(&self, call: EffectCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl PlatformServices for RecordingServices {
    fn platform(&self) -> PlatformInfo {
        self.platform.clone()
    }

    fn share(&self, request: &ShareRequest) -> Result<ShareOutcome, CapabilityError> {
        self.record(EffectCall::Share(request.clone()));
        self.share_result.borrow().clone()
    }

    fn vibrate(&self, pattern: &HapticPattern) {
        self.record(EffectCall::Vibrate(pattern.clone()));
    }

    fn open_url(&self, url: &str) {
        self.record(EffectCall::OpenUrl(url.to_string()));
    }

    fn alert(&self, request: &AlertRequest) -> Option<usize> {
        self.record(EffectCall::Alert(request.clone()));
        self.alert_choice
    }
}

// ============================================================================
// Log capture
// ============================================================================

/// A `tracing` event as seen by [`LogCapture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

/// `tracing` layer that keeps every event it sees.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with this capture as the thread's default subscriber.
    pub fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.lock().iter().filter(|e| e.level == level).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CapturedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        self.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{value:?}");
        if field.name() == "message" {
            self.message = text;
        } else {
            self.fields.insert(field.name().to_string(), text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_sees_events_only_inside_scope() {
        let logs = LogCapture::new();
        tracing::error!("outside");
        logs.with(|| {
            tracing::error!(target: "showcase::effects", error = %"boom", "error sharing");
            tracing::debug!(count = 3, "inside");
        });
        tracing::error!("outside again");

        let events = logs.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].target, "showcase::effects");
        assert_eq!(events[0].message, "error sharing");
        assert_eq!(events[0].fields["error"], "boom");
        assert_eq!(events[1].fields["count"], "3");
        assert_eq!(logs.count_at(Level::ERROR), 1);
    }

    #[test]
    fn recording_services_keep_call_order() {
        let services = RecordingServices::android();
        services.open_url("https://example.org/");
        services.vibrate(&services.haptic_pattern());
        assert_eq!(
            services.calls(),
            vec![
                EffectCall::OpenUrl("https://example.org/".into()),
                EffectCall::Vibrate(HapticPattern::for_family(PlatformFamily::Android)),
            ]
        );
    }

    #[test]
    fn share_failure_is_sticky() {
        let services = RecordingServices::ios();
        let request = ShareRequest {
            message: "m".into(),
            title: "t".into(),
        };
        assert_eq!(services.share(&request), Ok(ShareOutcome::Shared));
        services.dismiss_share();
        assert_eq!(services.share(&request), Ok(ShareOutcome::Dismissed));
        services.fail_share_with("denied");
        assert!(services.share(&request).is_err());
        assert!(services.share(&request).is_err());
        assert_eq!(services.call_count(), 4);
    }
}
