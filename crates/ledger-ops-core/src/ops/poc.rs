//! Proof-of-crowd: voting, staking and the silver/GCWD exchange.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount};
use crate::validation::{check_non_negative, check_positive, ensure, ValidationContext};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PocVoteOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub poc_vote_amount: AssetAmount,
}

impl OperationBody for PocVoteOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("poc_vote_amount", &self.poc_vote_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PocStakOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub stak_amount: AssetAmount,
    /// Staking period in days. Accepted periods are chain parameters.
    pub staking_period: u32,
}

impl OperationBody for PocStakOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("stak_amount", &self.stak_amount)?;
        ensure(self.staking_period > 0, "staking_period", "must be positive")
    }
}

/// Virtual: a referral bonus paid out of someone's stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PocStakingReferalOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub referal: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for PocStakingReferalOperation {
    fee_paid_by!(referal);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_non_negative("amount", &self.amount)
    }
}

/// Convert silver balance into the core asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSilverOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub amount: i64,
}

impl OperationBody for ExchangeSilverOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &AssetAmount::core(self.amount))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyGcwdOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for BuyGcwdOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Operation;

    #[test]
    fn test_stake_needs_period() {
        let mut op = PocStakOperation {
            fee: AssetAmount::core(1),
            account: AccountId(70),
            stak_amount: AssetAmount::core(1_000),
            staking_period: 0,
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
        op.staking_period = 90;
        assert!(op.validate(&ValidationContext::external()).is_ok());
    }

    #[test]
    fn test_referral_bonus_is_virtual() {
        let op: Operation = PocStakingReferalOperation {
            fee: AssetAmount::core(0),
            account: AccountId(70),
            referal: AccountId(71),
            amount: AssetAmount::core(5),
        }
        .into();
        assert!(op.is_virtual());
        assert_eq!(op.fee_payer(), AccountId(71));
    }
}
