//! Pipeline stages
//!
//! Decoder → Resolver → Dumper → Activity logger. Each stage is a plain
//! function or a borrowed helper; the [`BackupEngine`](crate::BackupEngine)
//! owns the collaborators and runs them in order.

pub mod activity;
pub mod decoder;
pub mod dumper;
pub mod pagination;
pub mod resolver;

pub use activity::{ActivityLine, log_activity};
pub use decoder::{LogBatch, LogEvent, TriggerEvent, decode_batch};
pub use dumper::{DumpReport, ZoneDumper, health_checks_key, records_key};
pub use pagination::drain_pages;
pub use resolver::{ZoneSelection, resolve_zones, select_zones};
