//! Nullable asset gateway — records transfers, fails on demand.

use std::sync::Mutex;
use vesta_trust::{AssetGateway, GatewayError};
use vesta_types::{AccountAddress, Amount, AssetId};

/// One transfer the gateway was asked to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    pub asset: AssetId,
    pub from: AccountAddress,
    pub to: AccountAddress,
    pub amount: Amount,
}

/// An asset gateway that moves no value.
///
/// Successful transfers are recorded in order. Scripted failures let tests
/// exercise the engine's all-or-nothing commit: call [`fail_next`] and the
/// next transfer is refused (and not recorded).
///
/// [`fail_next`]: Self::fail_next
pub struct NullGateway {
    transfers: Mutex<Vec<TransferRecord>>,
    fail_next: Mutex<bool>,
}

impl NullGateway {
    pub fn new() -> Self {
        Self {
            transfers: Mutex::new(Vec::new()),
            fail_next: Mutex::new(false),
        }
    }

    /// Refuse the next transfer with a gateway error.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// All transfers performed so far, in order.
    pub fn transfers(&self) -> Vec<TransferRecord> {
        self.transfers.lock().unwrap().clone()
    }

    /// Total amount moved to `account` across all recorded transfers.
    pub fn total_to(&self, account: &AccountAddress) -> u128 {
        self.transfers
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.to == *account)
            .map(|r| r.amount.raw())
            .sum()
    }
}

impl Default for NullGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetGateway for NullGateway {
    fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: Amount,
    ) -> Result<(), GatewayError> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(GatewayError::new("gateway declined transfer"));
        }
        self.transfers.lock().unwrap().push(TransferRecord {
            asset: asset.clone(),
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }
}
