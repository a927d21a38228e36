//! Cloud synchronization
//!
//! Sync is opportunistic. Pulls happen on demand and override local data when
//! a record exists. Pushes are debounced in the background and fire-and-forget.

pub mod cloud;
pub mod debounce;

pub use cloud::{CloudSync, DirectoryCloud, Session, SyncClient};
pub use debounce::DebouncedSync;
