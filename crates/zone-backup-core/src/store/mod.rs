//! Object store implementations
//!
//! This module provides the built-in implementations of the ObjectStore trait:
//! - [`MemoryObjectStore`]: in-memory map, for tests and embedding
//! - [`DirectoryObjectStore`]: local directory with atomic writes, for local runs

pub mod directory;
pub mod memory;

pub use directory::DirectoryObjectStore;
pub use memory::MemoryObjectStore;
