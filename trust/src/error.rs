//! Trust lifecycle errors.
//!
//! Every precondition violation aborts the whole operation with no partial
//! state change; none of these are fatal to the engine as a whole.

use crate::gateway::GatewayError;
use thiserror::Error;
use vesta_types::{AccountAddress, Amount, Timestamp, TrustId};

#[derive(Debug, Error)]
pub enum TrustError {
    #[error("{0} not found")]
    TrustNotFound(TrustId),

    #[error("caller {caller} is not the settlor {settlor}")]
    NotSettlor {
        caller: AccountAddress,
        settlor: AccountAddress,
    },

    #[error("caller {caller} is not the beneficiary {beneficiary}")]
    NotBeneficiary {
        caller: AccountAddress,
        beneficiary: AccountAddress,
    },

    #[error("{0} is not revocable")]
    NotRevocable(TrustId),

    #[error("{0} has been revoked")]
    Revoked(TrustId),

    #[error("release time {release} is not after the current time {now}")]
    ReleaseTimeNotFuture { release: Timestamp, now: Timestamp },

    #[error("all {0} deposit installments are used")]
    DepositsExhausted(u32),

    #[error("all {0} withdrawal installments are used")]
    WithdrawalsExhausted(u32),

    #[error("withdrawals open at {release}, current time is {now}")]
    NotYetReleasable { release: Timestamp, now: Timestamp },

    #[error("attached value {attached} does not match the installment amount {expected}")]
    AmountMismatch { expected: Amount, attached: Amount },

    #[error("transfer failed: {0}")]
    TransferFailed(#[from] GatewayError),

    #[error("arithmetic overflow in trust accounting")]
    Arithmetic,

    #[error("storage error: {0}")]
    Storage(String),
}
