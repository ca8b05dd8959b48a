#![forbid(unsafe_code)]

use crate::status::{signals, LifecycleEmitter};
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const PHASE_INITIAL: u8 = 0;
const PHASE_CONNECTED: u8 = 1;
const PHASE_DISCONNECTED: u8 = 2;

/// Translates MongoDB SDAM heartbeat outcomes into the three named database
/// lifecycle signals: `open` on the first successful heartbeat,
/// `reconnected` on a success after a failure, `disconnected` on a failure
/// while connected. A failure before any success emits nothing; the registry
/// already reports the database as DOWN at that point.
#[derive(Clone)]
pub struct MongoStatusListener {
    phase: Arc<AtomicU8>,
    lifecycle: LifecycleEmitter,
}

impl MongoStatusListener {
    pub fn new() -> Self {
        Self {
            phase: Arc::new(AtomicU8::new(PHASE_INITIAL)),
            lifecycle: LifecycleEmitter::new(),
        }
    }

    /// The source to hand to `StatusRegistry::register_database`.
    pub fn lifecycle(&self) -> &LifecycleEmitter {
        &self.lifecycle
    }

    /// Handler to install as `ClientOptions::sdam_event_handler`.
    pub fn event_handler(&self) -> EventHandler<SdamEvent> {
        let listener = self.clone();
        EventHandler::callback(move |event: SdamEvent| match event {
            SdamEvent::ServerHeartbeatSucceeded(_) => listener.heartbeat_succeeded(),
            SdamEvent::ServerHeartbeatFailed(_) => listener.heartbeat_failed(),
            _ => {}
        })
    }

    /// Records a successful server heartbeat.
    pub fn heartbeat_succeeded(&self) {
        match self.phase.swap(PHASE_CONNECTED, Ordering::SeqCst) {
            PHASE_INITIAL => {
                tracing::info!(target: "vitals::mongodb", event = "connection_open");
                self.lifecycle.emit(signals::OPEN);
            }
            PHASE_DISCONNECTED => {
                tracing::info!(target: "vitals::mongodb", event = "connection_reconnected");
                self.lifecycle.emit(signals::RECONNECTED);
            }
            _ => {}
        }
    }

    /// Records a failed server heartbeat.
    pub fn heartbeat_failed(&self) {
        if self.phase.swap(PHASE_DISCONNECTED, Ordering::SeqCst) == PHASE_CONNECTED {
            tracing::warn!(target: "vitals::mongodb", event = "connection_lost");
            self.lifecycle.emit(signals::DISCONNECTED);
        }
    }
}

impl Default for MongoStatusListener {
    fn default() -> Self {
        Self::new()
    }
}
