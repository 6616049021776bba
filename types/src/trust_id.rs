//! Trust identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A sequentially allocated trust identifier.
///
/// Allocated by the registry, starting at 1, never reused. The zero value
/// is reserved and never handed out, so it can safely mean "no trust" in
/// serialized contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrustId(u64);

impl TrustId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrustId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trust#{}", self.0)
    }
}
