//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators of the trust engine (clock, asset gateway,
//! event sink, storage) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod events;
pub mod gateway;
pub mod store;

pub use clock::NullClock;
pub use events::NullSink;
pub use gateway::{NullGateway, TransferRecord};
pub use store::NullStore;
