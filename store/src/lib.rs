//! Abstract storage traits for the VESTA trust escrow.
//!
//! Every storage backend (embedded KV, in-memory for testing) implements
//! these traits. The rest of the workspace depends only on the traits.

pub mod error;
pub mod trust;

pub use error::StoreError;
pub use trust::TrustStore;
