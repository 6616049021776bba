//! Trust records: immutable configuration and mutable status.

use serde::{Deserialize, Serialize};
use vesta_types::{AccountAddress, Amount, AssetId, Timestamp};

/// Immutable configuration of a trust, fixed at creation.
///
/// Creation is deliberately permissive: zero installment counts and
/// `beneficiary == settlor` are accepted and simply produce degenerate
/// trusts (a `withdraw_count` of zero makes withdrawal forever impossible).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSetting {
    /// The funding principal; the only account that may deposit or revoke.
    pub settlor: AccountAddress,
    /// The asset the trust is denominated in.
    pub asset: AssetId,
    /// Fixed amount due per deposit installment.
    pub deposit_amount: Amount,
    /// Total number of deposit installments allowed.
    pub deposit_count: u32,
    /// Total number of withdrawal installments allowed.
    pub withdraw_count: u32,
    /// Earliest time at which the first withdrawal may occur.
    pub release_time: Timestamp,
    /// The receiving principal; the only account that may withdraw.
    pub beneficiary: AccountAddress,
    /// Whether the settlor retains a unilateral cancel right.
    pub revocable: bool,
}

/// Mutable status of a trust.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustStatus {
    /// Funds currently held in custody for this trust.
    pub balance: Amount,
    /// Deposit installments completed so far.
    pub deposited_count: u32,
    /// Withdrawal installments completed so far.
    pub withdrawn_count: u32,
    /// Earliest time for the next withdrawal.
    pub next_withdraw_time: Timestamp,
    /// Terminal flag; once set, no further transition succeeds.
    pub revoked: bool,
}

impl TrustStatus {
    /// Fresh status for a newly created trust.
    pub fn new(release_time: Timestamp) -> Self {
        Self {
            balance: Amount::ZERO,
            deposited_count: 0,
            withdrawn_count: 0,
            next_withdraw_time: release_time,
            revoked: false,
        }
    }

    /// Whether both installment schedules have been fully consumed.
    ///
    /// Exhaustion is a derived condition, not a stored state; an exhausted
    /// trust persists indefinitely as a historical record.
    pub fn is_exhausted(&self, setting: &TrustSetting) -> bool {
        self.deposited_count == setting.deposit_count
            && self.withdrawn_count == setting.withdraw_count
    }
}
