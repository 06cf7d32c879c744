//! Core traits for the zone backup pipeline
//!
//! This module defines the interfaces of the two external collaborators.
//!
//! - [`ZoneSource`]: paged read API of the DNS provider
//! - [`ObjectStore`]: put-object API of the destination storage

pub mod object_store;
pub mod zone_source;

pub use object_store::ObjectStore;
pub use zone_source::{Page, PageCursor, ZoneSource};
