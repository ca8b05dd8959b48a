use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Binary connectivity state. A dependency is `Down` until its first
/// connect event arrives and `Down` again after any disconnect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Up => "UP",
            Status::Down => "DOWN",
        }
    }
}

/// The closed set of dependency categories the registry tracks. Consumer
/// and producer are keyed by topic; the rest are singletons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyKind {
    Consumer,
    Producer,
    Admin,
    WebServer,
    Database,
}

impl DependencyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyKind::Consumer => "consumer",
            DependencyKind::Producer => "producer",
            DependencyKind::Admin => "admin",
            DependencyKind::WebServer => "web_server",
            DependencyKind::Database => "database",
        }
    }
}

/// Canonical lifecycle transition. Source-specific signals are normalised
/// onto these two before they reach the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Connect,
    Disconnect,
}

impl LifecycleEvent {
    pub fn status(self) -> Status {
        match self {
            LifecycleEvent::Connect => Status::Up,
            LifecycleEvent::Disconnect => Status::Down,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleEvent::Connect => "connect",
            LifecycleEvent::Disconnect => "disconnect",
        }
    }
}

/// A fully addressed dependency: the kind plus the topic key for the keyed
/// kinds. Keyed kinds cannot be addressed without an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dependency {
    Consumer(String),
    Producer(String),
    Admin,
    WebServer,
    Database,
}

impl Dependency {
    pub fn consumer(topic: impl Into<String>) -> Self {
        Dependency::Consumer(topic.into())
    }

    pub fn producer(topic: impl Into<String>) -> Self {
        Dependency::Producer(topic.into())
    }

    pub fn kind(&self) -> DependencyKind {
        match self {
            Dependency::Consumer(_) => DependencyKind::Consumer,
            Dependency::Producer(_) => DependencyKind::Producer,
            Dependency::Admin => DependencyKind::Admin,
            Dependency::WebServer => DependencyKind::WebServer,
            Dependency::Database => DependencyKind::Database,
        }
    }

    pub fn topic(&self) -> Option<&str> {
        match self {
            Dependency::Consumer(topic) | Dependency::Producer(topic) => Some(topic),
            _ => None,
        }
    }
}

/// Aggregate connectivity state. Mutated by the event path only; the
/// registry wraps it in a lock so snapshots never observe a torn write.
#[derive(Clone, Debug)]
pub(crate) struct RegistryState {
    pub admin: Status,
    pub web_server: Status,
    pub database: Status,
    pub consumers: BTreeMap<String, Status>,
    pub producers: BTreeMap<String, Status>,
}

impl RegistryState {
    pub fn new() -> Self {
        Self {
            admin: Status::Down,
            web_server: Status::Down,
            database: Status::Down,
            consumers: BTreeMap::new(),
            producers: BTreeMap::new(),
        }
    }

    /// Inserts the topic entry for a keyed dependency at `Down` without
    /// touching an existing value. Singleton kinds need no seeding.
    pub fn seed(&mut self, dependency: &Dependency) {
        match dependency {
            Dependency::Consumer(topic) => {
                self.consumers.entry(topic.clone()).or_insert(Status::Down);
            }
            Dependency::Producer(topic) => {
                self.producers.entry(topic.clone()).or_insert(Status::Down);
            }
            _ => {}
        }
    }

    /// Applies the transition rule: connect sets `Up`, disconnect sets
    /// `Down`, whatever the previous value was. Writes to unseen topics
    /// create the entry. Returns `(previous, next)`; `previous` is `None`
    /// when the write created the entry.
    pub fn apply(
        &mut self,
        dependency: &Dependency,
        event: LifecycleEvent,
    ) -> (Option<Status>, Status) {
        let next = event.status();
        let previous = match dependency {
            Dependency::Admin => Some(std::mem::replace(&mut self.admin, next)),
            Dependency::WebServer => Some(std::mem::replace(&mut self.web_server, next)),
            Dependency::Database => Some(std::mem::replace(&mut self.database, next)),
            Dependency::Consumer(topic) => self.consumers.insert(topic.clone(), next),
            Dependency::Producer(topic) => self.producers.insert(topic.clone(), next),
        };
        (previous, next)
    }

    pub fn status_of(&self, dependency: &Dependency) -> Option<Status> {
        match dependency {
            Dependency::Admin => Some(self.admin),
            Dependency::WebServer => Some(self.web_server),
            Dependency::Database => Some(self.database),
            Dependency::Consumer(topic) => self.consumers.get(topic).copied(),
            Dependency::Producer(topic) => self.producers.get(topic).copied(),
        }
    }
}
