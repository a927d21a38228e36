//! Storage layer for the envelope planner
//!
//! Provides JSON file storage with atomic writes and per-year snapshots.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use snapshot::{JsonSnapshotStore, SnapshotStore};
