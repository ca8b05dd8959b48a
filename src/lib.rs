pub mod config;
pub mod error;
pub mod logging;
pub mod status;
pub mod telemetry;
pub mod transport;

pub use error::{Error, Result};
pub use status::{Dependency, LifecycleEvent, Status, StatusRegistry, StatusSnapshot};
