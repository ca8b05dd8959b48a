use super::state::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display names of the singleton services as published in the status
/// document. Existing consumers of the document match on these strings.
pub const WEB_SERVER_SERVICE: &str = "Express API";
pub const DATABASE_SERVICE: &str = "MongoDB";
pub const ADMIN_SERVICE: &str = "Kafka Admin";

/// Point-in-time view of the registry. Field names and nesting are part of
/// the wire contract for any health endpoint built on top of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub status: Status,
    pub services: Vec<ServiceStatus>,
    pub topics: TopicStatuses,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub name: String,
    pub status: Status,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStatuses {
    pub consumers: BTreeMap<String, TopicStatus>,
    pub producers: BTreeMap<String, TopicStatus>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStatus {
    pub status: Status,
}
