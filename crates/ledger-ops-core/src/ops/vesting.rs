//! Vesting balances.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{check_object, check_positive, ensure, ValidationContext};

/// How a vesting balance unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VestingPolicy {
    /// Nothing unlocks before the cliff, then linear release.
    Linear {
        begin_timestamp: u32,
        vesting_cliff_seconds: u32,
        vesting_duration_seconds: u32,
    },
    /// Coin-days destroyed.
    Cdd {
        start_claim: u32,
        vesting_seconds: u32,
    },
}

impl VestingPolicy {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            VestingPolicy::Linear {
                vesting_cliff_seconds,
                vesting_duration_seconds,
                ..
            } => ensure(
                vesting_cliff_seconds <= vesting_duration_seconds,
                "policy",
                "cliff must not be later than the end of vesting",
            ),
            VestingPolicy::Cdd {
                vesting_seconds, ..
            } => ensure(*vesting_seconds > 0, "policy", "vesting period must be positive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingBalanceCreateOperation {
    pub fee: AssetAmount,
    pub creator: AccountId,
    pub owner: AccountId,
    pub amount: AssetAmount,
    pub policy: VestingPolicy,
}

impl OperationBody for VestingBalanceCreateOperation {
    fee_paid_by!(creator);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &self.amount)?;
        self.policy.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingBalanceWithdrawOperation {
    pub fee: AssetAmount,
    pub vesting_balance: ObjectId,
    pub owner: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for VestingBalanceWithdrawOperation {
    fee_paid_by!(owner);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object(
            "vesting_balance",
            &self.vesting_balance,
            ObjectType::VestingBalance,
        )?;
        check_positive("amount", &self.amount)
    }
}
