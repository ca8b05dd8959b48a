#[cfg(feature = "kafka")]
pub mod kafka;
#[cfg(feature = "db-mongodb")]
pub mod mongodb;
