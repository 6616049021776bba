//! The asset gateway seam — the only place value physically moves.

use thiserror::Error;
use vesta_types::{AccountAddress, Amount, AssetId};

/// Error returned by a gateway that refused or failed a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

impl GatewayError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Moves value between accounts on behalf of the engine.
///
/// The engine calls this synchronously as the last effectful step of an
/// operation and commits its staged state only on success, so a failing
/// gateway can never leave the registry inconsistent with custody.
pub trait AssetGateway {
    fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: Amount,
    ) -> Result<(), GatewayError>;
}
