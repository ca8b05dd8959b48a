#![forbid(unsafe_code)]

use crate::status::{signals, LifecycleEmitter};
use rdkafka::client::ClientContext;
use rdkafka::config::RDKafkaLogLevel;
use rdkafka::consumer::ConsumerContext;
use rdkafka::error::KafkaError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
pub enum KafkaClientRole {
    Producer,
    Consumer,
    Admin,
}

impl KafkaClientRole {
    pub fn as_str(self) -> &'static str {
        match self {
            KafkaClientRole::Producer => "producer",
            KafkaClientRole::Consumer => "consumer",
            KafkaClientRole::Admin => "admin",
        }
    }
}

/// Edge detector for librdkafka connectivity: the error callback fires
/// repeatedly while a broker stays unreachable, but each edge must reach the
/// lifecycle listeners once. Clients start disconnected, so the first
/// successful activity emits the initial connect.
#[derive(Debug)]
struct ConnectivityState {
    disconnected: AtomicBool,
}

impl ConnectivityState {
    fn new() -> Self {
        Self {
            disconnected: AtomicBool::new(true),
        }
    }

    fn mark_disconnected(&self) -> bool {
        !self.disconnected.swap(true, Ordering::SeqCst)
    }

    fn mark_connected(&self) -> bool {
        self.disconnected.swap(false, Ordering::SeqCst)
    }
}

/// rdkafka client context that feeds broker connectivity into a lifecycle
/// source. Install one per consumer, producer, or admin client and register
/// the source returned by [`lifecycle`](Self::lifecycle) with the registry.
#[derive(Clone)]
pub struct KafkaStatusContext {
    connector: String,
    role: KafkaClientRole,
    state: Arc<ConnectivityState>,
    lifecycle: LifecycleEmitter,
}

impl KafkaStatusContext {
    pub fn new(connector: impl Into<String>, role: KafkaClientRole) -> Self {
        Self {
            connector: connector.into(),
            role,
            state: Arc::new(ConnectivityState::new()),
            lifecycle: LifecycleEmitter::new(),
        }
    }

    /// The source to hand to the registry's `register_*` operations.
    pub fn lifecycle(&self) -> &LifecycleEmitter {
        &self.lifecycle
    }

    /// Reported by the owning poll or delivery loop after a successful
    /// fetch or delivery. Emits the connect edge when the client was
    /// disconnected.
    pub fn report_activity(&self) {
        if self.state.mark_connected() {
            tracing::info!(
                target: "vitals::kafka",
                event = "client_connected",
                connector = %self.connector,
                role = self.role.as_str(),
            );
            self.lifecycle.emit(signals::CONNECT);
        }
    }
}

impl ClientContext for KafkaStatusContext {
    fn log(&self, _level: RDKafkaLogLevel, _facility: &str, _message: &str) {
        // librdkafka already reports connection loss via the `error`
        // callback; forwarding every log line here would be noise.
    }

    fn error(&self, error: KafkaError, reason: &str) {
        if self.state.mark_disconnected() {
            tracing::warn!(
                target: "vitals::kafka",
                event = "client_error",
                connector = %self.connector,
                role = self.role.as_str(),
                error = %error,
                reason = %reason,
            );
            self.lifecycle.emit(signals::DISCONNECT);
        } else {
            tracing::debug!(
                target: "vitals::kafka",
                event = "client_error",
                connector = %self.connector,
                role = self.role.as_str(),
                error = %error,
                reason = %reason,
            );
        }
    }
}

impl ConsumerContext for KafkaStatusContext {}
