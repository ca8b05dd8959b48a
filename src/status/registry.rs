use super::snapshot::{
    ServiceStatus, StatusSnapshot, TopicStatus, TopicStatuses, ADMIN_SERVICE, DATABASE_SERVICE,
    WEB_SERVER_SERVICE,
};
use super::source::{signals, LifecycleSource, Listener};
use super::state::{Dependency, LifecycleEvent, RegistryState, Status};
use std::sync::{Arc, RwLock};

/// Process-wide connectivity registry. Constructed once at startup and
/// passed by handle to every registration call site; clones share state.
///
/// All operations are total and synchronous. Transitions may arrive from
/// many driver threads, so the state sits behind a lock: every transition
/// is applied under the write guard and every snapshot is taken under the
/// read guard, so a snapshot always reflects the last fully applied
/// transition.
#[derive(Clone)]
pub struct StatusRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::new())),
        }
    }

    /// Tracks a consumer's connectivity for `topic`. The topic is published
    /// as DOWN until its first connect signal arrives.
    pub fn register_consumer(&self, topic: &str, source: &dyn LifecycleSource) {
        self.register_keyed(Dependency::consumer(topic), source);
    }

    /// Tracks a producer's connectivity for `topic`.
    pub fn register_producer(&self, topic: &str, source: &dyn LifecycleSource) {
        self.register_keyed(Dependency::producer(topic), source);
    }

    /// Tracks the admin client's connectivity.
    pub fn register_admin(&self, source: &dyn LifecycleSource) {
        source.subscribe(
            signals::CONNECT,
            self.transition_listener(Dependency::Admin, LifecycleEvent::Connect),
        );
        source.subscribe(
            signals::DISCONNECT,
            self.transition_listener(Dependency::Admin, LifecycleEvent::Disconnect),
        );
    }

    /// Tracks the database connection. `open` and `reconnected` both map to
    /// a logical connect; `disconnected` fires for every disconnection
    /// cause, so no separate closed signal is handled.
    pub fn register_database(&self, connection: &dyn LifecycleSource) {
        connection.subscribe(
            signals::OPEN,
            self.transition_listener(Dependency::Database, LifecycleEvent::Connect),
        );
        connection.subscribe(
            signals::RECONNECTED,
            self.transition_listener(Dependency::Database, LifecycleEvent::Connect),
        );
        connection.subscribe(
            signals::DISCONNECTED,
            self.transition_listener(Dependency::Database, LifecycleEvent::Disconnect),
        );
    }

    /// Generic entry point for dependencies without a native emitter; the
    /// web server reports its own lifecycle through this. Applies the same
    /// transition rule as the subscription paths.
    pub fn report_event(&self, dependency: &Dependency, event: LifecycleEvent) {
        self.apply(dependency, event);
    }

    /// Current status of a single dependency; `None` for a topic the
    /// registry has never seen.
    pub fn dependency_status(&self, dependency: &Dependency) -> Option<Status> {
        let guard = self.state.read().expect("status registry poisoned");
        guard.status_of(dependency)
    }

    /// Point-in-time read of the full registry. The top-level status is
    /// fixed at UP; the per-service and per-topic values carry the live
    /// state.
    pub fn status_snapshot(&self) -> StatusSnapshot {
        let guard = self.state.read().expect("status registry poisoned");
        StatusSnapshot {
            status: Status::Up,
            services: vec![
                ServiceStatus {
                    name: WEB_SERVER_SERVICE.to_string(),
                    status: guard.web_server,
                },
                ServiceStatus {
                    name: DATABASE_SERVICE.to_string(),
                    status: guard.database,
                },
                ServiceStatus {
                    name: ADMIN_SERVICE.to_string(),
                    status: guard.admin,
                },
            ],
            topics: TopicStatuses {
                consumers: topic_statuses(&guard.consumers),
                producers: topic_statuses(&guard.producers),
            },
        }
    }

    fn register_keyed(&self, dependency: Dependency, source: &dyn LifecycleSource) {
        {
            let mut guard = self.state.write().expect("status registry poisoned");
            guard.seed(&dependency);
        }

        source.subscribe(
            signals::CONNECT,
            self.transition_listener(dependency.clone(), LifecycleEvent::Connect),
        );
        source.subscribe(
            signals::DISCONNECT,
            self.transition_listener(dependency, LifecycleEvent::Disconnect),
        );
    }

    fn transition_listener(&self, dependency: Dependency, event: LifecycleEvent) -> Listener {
        let registry = self.clone();
        Arc::new(move || registry.apply(&dependency, event))
    }

    fn apply(&self, dependency: &Dependency, event: LifecycleEvent) {
        let (previous, next) = {
            let mut guard = self.state.write().expect("status registry poisoned");
            guard.apply(dependency, event)
        };

        // A write that created the entry counts as coming from DOWN.
        let previous = previous.unwrap_or(Status::Down);
        if previous == next {
            return;
        }

        match dependency.topic() {
            Some(topic) => crate::status_event!(
                info,
                "status_transition",
                kind = dependency.kind().as_str(),
                topic = topic,
                status_from = previous.as_str(),
                status_to = next.as_str(),
            ),
            None => crate::status_event!(
                info,
                "status_transition",
                kind = dependency.kind().as_str(),
                status_from = previous.as_str(),
                status_to = next.as_str(),
            ),
        }
    }
}

fn topic_statuses(
    statuses: &std::collections::BTreeMap<String, Status>,
) -> std::collections::BTreeMap<String, TopicStatus> {
    statuses
        .iter()
        .map(|(topic, status)| (topic.clone(), TopicStatus { status: *status }))
        .collect()
}
