// # zone-backup-core
//
// Core library for the event-triggered DNS zone backup pipeline.
//
// ## Architecture Overview
//
// One invocation flows through four stages, strictly in order:
// - **Batch decoder** (`pipeline::decoder`): base64 + gzip + JSON log batch → change notifications
// - **Identifier resolver** (`pipeline::resolver`): notification + config → zones to back up
// - **Zone dumper** (`pipeline::dumper`): zone → records file (+ health-check file)
// - **Activity logger** (`pipeline::activity`): one summary line per dumped zone
//
// The external collaborators sit behind two traits:
// - **ZoneSource**: paged read API of the DNS provider
// - **ObjectStore**: put-object API of the destination storage
//
// `BackupEngine` ties the stages together for one trigger payload.
//
// ## Design Principles
//
// 1. **Stateless**: nothing survives an invocation, nothing is cached between log events
// 2. **Sequential**: log events, zones and pages are processed one after the other
// 3. **Fail fast**: the first error aborts the invocation; redelivery is safe because every write overwrites
// 4. **Library-First**: the Lambda binary only wires configuration and adapters

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::BackupConfig;
pub use error::{Error, Result};
pub use engine::{BackupEngine, InvocationSummary};
pub use model::{ChangeNotification, HealthCheck, HostedZone, RecordSet};
pub use pipeline::{DumpReport, TriggerEvent};
pub use store::{DirectoryObjectStore, MemoryObjectStore};
pub use traits::{ObjectStore, Page, PageCursor, ZoneSource};
