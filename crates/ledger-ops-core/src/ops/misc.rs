//! Operations that carry opaque data, chain assertions or genesis balances.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::authority::{Authority, RequiredAuthorities};
use crate::crypto::Ed25519PublicKey;
use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, AssetId, ObjectId, ObjectType};
use crate::validation::{
    check_asset_symbol, check_object, check_positive, ensure, ValidationContext,
};

/// Maximum size of a custom operation's payload.
pub const MAX_CUSTOM_DATA_SIZE: usize = 8192;

/// Application-defined data, signed by an arbitrary set of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOperation {
    pub fee: AssetAmount,
    pub payer: AccountId,
    pub required_auths: BTreeSet<AccountId>,
    pub id: u16,
    pub data: Bytes,
}

impl OperationBody for CustomOperation {
    fee_paid_by!(payer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.data.len() <= MAX_CUSTOM_DATA_SIZE,
            "data",
            "payload is too large",
        )
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        for account in &self.required_auths {
            required.require_active(*account);
        }
    }
}

/// A condition on chain state that must hold for the transaction to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    AccountNameEqLit { account_id: AccountId, name: String },
    AssetSymbolEqLit { asset_id: AssetId, symbol: String },
    BlockId { id: [u8; 20] },
}

impl Predicate {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Predicate::AccountNameEqLit { name, .. } => {
                ensure(!name.is_empty(), "predicates", "account name must not be empty")
            }
            Predicate::AssetSymbolEqLit { symbol, .. } => check_asset_symbol("predicates", symbol),
            Predicate::BlockId { .. } => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertOperation {
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub predicates: Vec<Predicate>,
    pub required_auths: BTreeSet<AccountId>,
}

impl OperationBody for AssertOperation {
    fee_paid_by!(fee_paying_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(!self.predicates.is_empty(), "predicates", "must not be empty")?;
        for predicate in &self.predicates {
            predicate.validate()?;
        }
        Ok(())
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        for account in &self.required_auths {
            required.require_active(*account);
        }
    }
}

/// Claim a genesis balance by proving control of the key it was sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceClaimOperation {
    pub fee: AssetAmount,
    pub deposit_to_account: AccountId,
    pub balance_to_claim: ObjectId,
    pub balance_owner_key: Ed25519PublicKey,
    pub total_claimed: AssetAmount,
}

impl OperationBody for BalanceClaimOperation {
    fee_paid_by!(deposit_to_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(self.fee.amount == 0, "fee", "balance claims are free")?;
        check_object("balance_to_claim", &self.balance_to_claim, ObjectType::Balance)?;
        check_positive("total_claimed", &self.total_claimed)
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        required.require_other(Authority::single_key(self.balance_owner_key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::ops::Operation;

    #[test]
    fn test_custom_required_auths_are_active() {
        let op: Operation = CustomOperation {
            fee: AssetAmount::core(1),
            payer: AccountId(1),
            required_auths: BTreeSet::from([AccountId(2), AccountId(3)]),
            id: 7,
            data: Bytes::from_static(b"hello"),
        }
        .into();
        assert_eq!(
            op.required_authorities().active,
            BTreeSet::from([AccountId(1), AccountId(2), AccountId(3)])
        );
    }

    #[test]
    fn test_balance_claim_requires_owner_key() {
        let key = Keypair::from_seed(&[5; 32]).public_key();
        let op: Operation = BalanceClaimOperation {
            fee: AssetAmount::core(0),
            deposit_to_account: AccountId(12),
            balance_to_claim: ObjectId::new(ObjectType::Balance, 44),
            balance_owner_key: key,
            total_claimed: AssetAmount::core(10_000),
        }
        .into();
        assert!(op.validate().is_ok());
        let required = op.required_authorities();
        assert_eq!(required.other, vec![Authority::single_key(key)]);
        assert_eq!(required.active, BTreeSet::from([AccountId(12)]));
    }

    #[test]
    fn test_assert_needs_predicates() {
        let op = AssertOperation {
            fee: AssetAmount::core(1),
            fee_paying_account: AccountId(1),
            predicates: vec![],
            required_auths: BTreeSet::new(),
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_assert_symbol_predicate_checked() {
        let op = AssertOperation {
            fee: AssetAmount::core(1),
            fee_paying_account: AccountId(1),
            predicates: vec![Predicate::AssetSymbolEqLit {
                asset_id: AssetId(3),
                symbol: "bad symbol".into(),
            }],
            required_auths: BTreeSet::new(),
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }
}
