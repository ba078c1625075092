pub mod db;
pub mod models;

pub use db::ScanDb;
pub use models::{AdvisoryLogEntry, Holding};
