pub mod registry;
pub mod snapshot;
pub mod source;
pub mod state;

pub use registry::StatusRegistry;
pub use snapshot::{ServiceStatus, StatusSnapshot, TopicStatus, TopicStatuses};
pub use source::{signals, LifecycleEmitter, LifecycleSource, Listener};
pub use state::{Dependency, DependencyKind, LifecycleEvent, Status};
