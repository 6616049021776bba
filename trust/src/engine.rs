//! Core trust lifecycle engine.
//!
//! Every operation is all-or-nothing: preconditions are checked against the
//! committed status, the mutation is staged on a copy, the asset gateway
//! runs, and the stage is committed only on success. A failed call leaves
//! the registry exactly as it was.

use tracing::{debug, warn};

use crate::error::TrustError;
use crate::event::{EventSink, TrustEvent};
use crate::gateway::AssetGateway;
use crate::record::{TrustSetting, TrustStatus};
use crate::registry::TrustRegistry;
use vesta_types::{AccountAddress, Amount, Timestamp, TrustId};

/// How the withdrawal gate advances after each installment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawSpacing {
    /// Only the first withdrawal is time-gated: `next_withdraw_time` is set
    /// to the release time at creation and never advanced. This reproduces
    /// the source behavior literally.
    ReleaseOnly,
    /// Each successful withdrawal pushes the gate to `now + period_secs`.
    Fixed { period_secs: u64 },
}

/// Engine construction parameters.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// The account that holds escrowed funds. Token deposits are pulled
    /// into it; withdrawals and revocation refunds are paid out of it.
    pub custody: AccountAddress,
    /// Withdrawal spacing policy, applied uniformly to all trusts.
    pub spacing: WithdrawSpacing,
}

impl EngineConfig {
    pub fn new(custody: AccountAddress) -> Self {
        Self {
            custody,
            spacing: WithdrawSpacing::ReleaseOnly,
        }
    }

    pub fn with_spacing(custody: AccountAddress, spacing: WithdrawSpacing) -> Self {
        Self { custody, spacing }
    }
}

/// The trust engine — enforces preconditions and computes transitions.
pub struct TrustEngine {
    /// The registry of all trusts, owned by the engine.
    pub registry: TrustRegistry,
    config: EngineConfig,
}

impl TrustEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: TrustRegistry::new(),
            config,
        }
    }

    /// Wrap an existing registry (e.g. one restored from a store).
    pub fn with_registry(registry: TrustRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Create a new trust.
    ///
    /// Fails only when `release_time` is not strictly after `now`; the
    /// configuration is otherwise accepted as supplied.
    pub fn create(
        &mut self,
        setting: TrustSetting,
        now: Timestamp,
        events: &dyn EventSink,
    ) -> Result<TrustId, TrustError> {
        let settlor = setting.settlor.clone();
        let beneficiary = setting.beneficiary.clone();
        let id = self.registry.create(setting, now)?;

        debug!(%id, %settlor, %beneficiary, "trust created");
        events.emit(&TrustEvent::Created {
            id,
            settlor,
            beneficiary,
        });
        Ok(id)
    }

    /// Deposit one installment into a trust. Caller must be the settlor.
    ///
    /// For a native trust, `attached` models the value the platform moved
    /// with the call and must equal the installment amount exactly. For a
    /// token trust, the installment is pulled from the settlor into custody
    /// through the gateway and `attached` is ignored.
    pub fn deposit(
        &mut self,
        id: TrustId,
        caller: &AccountAddress,
        attached: Amount,
        gateway: &dyn AssetGateway,
        events: &dyn EventSink,
    ) -> Result<(), TrustError> {
        let (setting, status) = self.lookup(id)?;

        if *caller != setting.settlor {
            return Err(TrustError::NotSettlor {
                caller: caller.clone(),
                settlor: setting.settlor,
            });
        }
        if status.revoked {
            return Err(TrustError::Revoked(id));
        }
        if status.deposited_count >= setting.deposit_count {
            return Err(TrustError::DepositsExhausted(setting.deposit_count));
        }
        if setting.asset.is_native() && attached != setting.deposit_amount {
            return Err(TrustError::AmountMismatch {
                expected: setting.deposit_amount,
                attached,
            });
        }

        let mut staged = status;
        staged.balance = staged
            .balance
            .checked_add(setting.deposit_amount)
            .ok_or(TrustError::Arithmetic)?;
        staged.deposited_count += 1;

        // Native value already arrived attached to the call; only token
        // installments go through the gateway.
        if !setting.asset.is_native() {
            gateway
                .transfer(
                    &setting.asset,
                    &setting.settlor,
                    &self.config.custody,
                    setting.deposit_amount,
                )
                .map_err(|e| {
                    warn!(%id, error = %e, "deposit transfer refused by gateway");
                    TrustError::TransferFailed(e)
                })?;
        }

        debug!(
            %id,
            amount = %setting.deposit_amount,
            installment = staged.deposited_count,
            of = setting.deposit_count,
            "deposit committed"
        );
        self.registry.commit_status(id, staged);
        events.emit(&TrustEvent::Deposited { id });
        Ok(())
    }

    /// Withdraw one installment from a trust. Caller must be the beneficiary.
    ///
    /// The amount is an equal share of whatever balance currently remains,
    /// divided by however many installments remain; the final installment
    /// receives the exact remainder with no truncation dust.
    pub fn withdraw(
        &mut self,
        id: TrustId,
        caller: &AccountAddress,
        now: Timestamp,
        gateway: &dyn AssetGateway,
        events: &dyn EventSink,
    ) -> Result<(), TrustError> {
        let (setting, status) = self.lookup(id)?;

        if *caller != setting.beneficiary {
            return Err(TrustError::NotBeneficiary {
                caller: caller.clone(),
                beneficiary: setting.beneficiary,
            });
        }
        if status.revoked {
            return Err(TrustError::Revoked(id));
        }
        if now < status.next_withdraw_time {
            return Err(TrustError::NotYetReleasable {
                release: status.next_withdraw_time,
                now,
            });
        }
        if status.withdrawn_count >= setting.withdraw_count {
            return Err(TrustError::WithdrawalsExhausted(setting.withdraw_count));
        }

        // The exhaustion check above guarantees remaining >= 1, so the
        // division cannot hit zero; the checked form keeps that a returned
        // error rather than a panic if it ever regresses.
        let remaining = setting.withdraw_count - status.withdrawn_count;
        let amount = status
            .balance
            .checked_div(remaining)
            .ok_or(TrustError::Arithmetic)?;

        let mut staged = status;
        staged.balance = staged
            .balance
            .checked_sub(amount)
            .ok_or(TrustError::Arithmetic)?;
        staged.withdrawn_count += 1;
        if let WithdrawSpacing::Fixed { period_secs } = self.config.spacing {
            staged.next_withdraw_time = now.plus_secs(period_secs);
        }

        gateway
            .transfer(&setting.asset, &self.config.custody, &setting.beneficiary, amount)
            .map_err(|e| {
                warn!(%id, error = %e, "withdrawal transfer refused by gateway");
                TrustError::TransferFailed(e)
            })?;

        debug!(
            %id,
            amount = %amount,
            installment = staged.withdrawn_count,
            of = setting.withdraw_count,
            remaining_balance = %staged.balance,
            "withdrawal committed"
        );
        self.registry.commit_status(id, staged);
        events.emit(&TrustEvent::Withdrawn { id });
        Ok(())
    }

    /// Revoke a trust, returning its entire balance to the settlor.
    /// Caller must be the settlor and the trust must be revocable.
    pub fn revoke(
        &mut self,
        id: TrustId,
        caller: &AccountAddress,
        gateway: &dyn AssetGateway,
        events: &dyn EventSink,
    ) -> Result<(), TrustError> {
        let (setting, status) = self.lookup(id)?;

        if *caller != setting.settlor {
            return Err(TrustError::NotSettlor {
                caller: caller.clone(),
                settlor: setting.settlor,
            });
        }
        if !setting.revocable {
            return Err(TrustError::NotRevocable(id));
        }
        if status.revoked {
            return Err(TrustError::Revoked(id));
        }

        // The stage carries both the terminal flag and the zeroed balance,
        // so a committed state can never show a revoked trust holding funds.
        let refund = status.balance;
        let mut staged = status;
        staged.revoked = true;
        staged.balance = Amount::ZERO;

        gateway
            .transfer(&setting.asset, &self.config.custody, &setting.settlor, refund)
            .map_err(|e| {
                warn!(%id, error = %e, "revocation refund refused by gateway");
                TrustError::TransferFailed(e)
            })?;

        debug!(%id, refund = %refund, "trust revoked");
        self.registry.commit_status(id, staged);
        events.emit(&TrustEvent::Revoked { id });
        Ok(())
    }

    /// Fetch a trust's setting and a working copy of its status.
    fn lookup(&self, id: TrustId) -> Result<(TrustSetting, TrustStatus), TrustError> {
        let setting = self
            .registry
            .setting(id)
            .ok_or(TrustError::TrustNotFound(id))?
            .clone();
        let status = self
            .registry
            .status(id)
            .ok_or(TrustError::TrustNotFound(id))?
            .clone();
        Ok((setting, status))
    }
}
