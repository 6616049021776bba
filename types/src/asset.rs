//! Asset identifier for a trust.

use crate::address::AccountAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the fungible asset a trust is denominated in.
///
/// `Native` is the typed rendering of the platform-currency sentinel:
/// native deposits arrive as value attached to the call, while token
/// deposits are pulled from the settlor through the asset gateway.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// The platform's native currency.
    Native,
    /// A fungible token identified by its contract account.
    Token(AccountAddress),
}

impl AssetId {
    /// Whether this is the platform's native currency.
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(addr) => write!(f, "token:{}", addr),
        }
    }
}
