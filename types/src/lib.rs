//! Fundamental types for the VESTA trust escrow.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account addresses, amounts, asset identifiers, timestamps, and
//! trust identifiers.

pub mod address;
pub mod amount;
pub mod asset;
pub mod time;
pub mod trust_id;

pub use address::AccountAddress;
pub use amount::Amount;
pub use asset::AssetId;
pub use time::Timestamp;
pub use trust_id::TrustId;
