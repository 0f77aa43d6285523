//! Sync engine tying observation, timing, and reconciliation together
//!
//! All three trigger paths (passive observation, the host's chat-changed
//! notification, and the periodic heartbeat) funnel into one debounced
//! rebuild request, so bursts of host mutation collapse into a single pass.

mod detect;
mod reconcile;
mod timing;

pub use detect::{OBSERVED_ATTRIBUTES, is_relevant};
pub use reconcile::{NO_CHARACTER_PLACEHOLDER, PassOutcome, Reconciler};
pub use timing::{DEBOUNCE_WINDOW, Debounce, HEARTBEAT_INTERVAL, heartbeat_due};

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::debug;

use crate::host::{HostSelectors, HostView, MutationEvent};
use crate::storage::SettingsStore;

/// Receiver of rebuild requests.
///
/// Folder mutations self-trigger a rebuild through this seam instead of
/// calling into the sync engine directly.
pub trait RebuildSink: Send + Sync {
    fn request_rebuild(&self, now: Instant);
}

/// The overlay orchestrator the embedder drives.
///
/// The embedder forwards host mutations and chat-changed notifications as
/// they happen and calls [`pump`](Self::pump) on its timer tick; everything
/// else (classification, debouncing, the heartbeat fallback, and the passes
/// themselves) happens in here.
pub struct Overlay {
    host: Arc<dyn HostView>,
    reconciler: Reconciler,
    selectors: HostSelectors,
    debounce: Mutex<Debounce>,
    heartbeat_interval: Duration,
    last_heartbeat: Mutex<Option<Instant>>,
}

impl Overlay {
    pub fn new(store: Arc<dyn SettingsStore>, host: Arc<dyn HostView>) -> Self {
        Self::with_tuning(
            store,
            host,
            HostSelectors::default(),
            DEBOUNCE_WINDOW,
            HEARTBEAT_INTERVAL,
        )
    }

    pub fn with_tuning(
        store: Arc<dyn SettingsStore>,
        host: Arc<dyn HostView>,
        selectors: HostSelectors,
        debounce_window: Duration,
        heartbeat_interval: Duration,
    ) -> Self {
        Self {
            reconciler: Reconciler::new(store, host.clone()),
            host,
            selectors,
            debounce: Mutex::new(Debounce::new(debounce_window)),
            heartbeat_interval,
            last_heartbeat: Mutex::new(None),
        }
    }

    /// Feed one observed host mutation through classification
    pub fn observe_mutation(&self, event: &MutationEvent, now: Instant) {
        if is_relevant(event, &self.selectors) {
            self.request_rebuild(now);
        }
    }

    /// The host switched chats or characters
    pub fn on_chat_changed(&self, now: Instant) {
        self.request_rebuild(now);
    }

    /// Whether a rebuild is scheduled and has not run yet
    pub fn rebuild_pending(&self) -> bool {
        self.debounce.lock().unwrap().pending()
    }

    /// Advance the engine's clock: run the scheduled pass if the debounce
    /// window has elapsed, then the heartbeat check. Returns the pass
    /// outcome when one ran.
    ///
    /// The pass runs first so a heartbeat-scheduled rebuild cannot push an
    /// already-due deadline further out.
    pub fn pump(&self, now: Instant) -> Option<PassOutcome> {
        let due = self.debounce.lock().unwrap().fire_if_due(now);
        let outcome = due.then(|| self.reconciler.run_pass());

        self.heartbeat(now);
        outcome
    }

    /// Periodic fallback: a visible popup without a mounted proxy means a
    /// host mutation slipped past classification (e.g. the whole subtree was
    /// replaced in one step)
    fn heartbeat(&self, now: Instant) {
        let mut last = self.last_heartbeat.lock().unwrap();
        if !heartbeat_due(*last, now, self.heartbeat_interval) {
            return;
        }
        *last = Some(now);
        drop(last);

        if self.host.popup_visible() && !self.host.proxy_mounted() {
            debug!("Heartbeat found visible popup without a proxy view");
            self.request_rebuild(now);
        }
    }
}

impl RebuildSink for Overlay {
    fn request_rebuild(&self, now: Instant) {
        self.debounce.lock().unwrap().request(now);
    }
}
