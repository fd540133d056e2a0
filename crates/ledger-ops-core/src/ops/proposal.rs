//! Proposals: operations that wrap other operations for delayed,
//! multi-party approval.
//!
//! A proposal's inner operations are stored as [`OpWrapper`]s in a `Vec`,
//! which gives the otherwise recursive [`Operation`] type a finite size.
//! Validation descends into every wrapped operation one level deeper; the
//! authority resolver unions everything the wrapped operations demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::authority::{Authority, RequiredAuthorities};
use crate::crypto::Ed25519PublicKey;
use crate::error::ValidationError;
use crate::ops::{Operation, OperationBody};
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{check_object, ensure, validate_with, ValidationContext};

/// A single operation embedded in another one.
///
/// Immutable once built. Serializes as exactly the wrapped operation, with
/// no extra framing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpWrapper {
    op: Operation,
}

impl OpWrapper {
    pub fn new(op: impl Into<Operation>) -> Self {
        Self { op: op.into() }
    }

    pub fn op(&self) -> &Operation {
        &self.op
    }

    pub fn into_inner(self) -> Operation {
        self.op
    }
}

impl From<Operation> for OpWrapper {
    fn from(op: Operation) -> Self {
        Self { op }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCreateOperation {
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub expiration_time: u32,
    pub proposed_ops: Vec<OpWrapper>,
    pub review_period_seconds: Option<u32>,
}

impl ProposalCreateOperation {
    /// Iterate the wrapped operations.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.proposed_ops.iter().map(OpWrapper::op)
    }
}

impl OperationBody for ProposalCreateOperation {
    fee_paid_by!(fee_paying_account);

    fn validate(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        let inner = ctx.nested()?;
        if self.proposed_ops.is_empty() {
            return Err(ValidationError::NestedStructureEmpty);
        }
        ensure(
            self.proposed_ops.len() <= ctx.limits.max_proposed_operations,
            "proposed_ops",
            "too many proposed operations",
        )?;
        if let Some(review) = self.review_period_seconds {
            ensure(review > 0, "review_period_seconds", "must be positive")?;
        }
        for op in self.operations() {
            validate_with(op, &inner)?;
        }
        Ok(())
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        for op in self.operations() {
            op.collect_authorities(required);
        }
    }
}

/// Add or remove approvals on a pending proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalUpdateOperation {
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub proposal: ObjectId,
    pub active_approvals_to_add: BTreeSet<AccountId>,
    pub active_approvals_to_remove: BTreeSet<AccountId>,
    pub owner_approvals_to_add: BTreeSet<AccountId>,
    pub owner_approvals_to_remove: BTreeSet<AccountId>,
    pub key_approvals_to_add: BTreeSet<Ed25519PublicKey>,
    pub key_approvals_to_remove: BTreeSet<Ed25519PublicKey>,
}

impl OperationBody for ProposalUpdateOperation {
    fee_paid_by!(fee_paying_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("proposal", &self.proposal, ObjectType::Proposal)?;
        ensure(
            !(self.active_approvals_to_add.is_empty()
                && self.active_approvals_to_remove.is_empty()
                && self.owner_approvals_to_add.is_empty()
                && self.owner_approvals_to_remove.is_empty()
                && self.key_approvals_to_add.is_empty()
                && self.key_approvals_to_remove.is_empty()),
            "proposal",
            "update changes no approvals",
        )?;
        ensure(
            self.active_approvals_to_add
                .is_disjoint(&self.active_approvals_to_remove),
            "active_approvals_to_remove",
            "an approval cannot be both added and removed",
        )?;
        ensure(
            self.owner_approvals_to_add
                .is_disjoint(&self.owner_approvals_to_remove),
            "owner_approvals_to_remove",
            "an approval cannot be both added and removed",
        )?;
        ensure(
            self.key_approvals_to_add
                .is_disjoint(&self.key_approvals_to_remove),
            "key_approvals_to_remove",
            "an approval cannot be both added and removed",
        )?;
        ensure(
            self.key_approvals_to_add
                .iter()
                .chain(&self.key_approvals_to_remove)
                .all(Ed25519PublicKey::is_well_formed),
            "key_approvals_to_add",
            "must be valid public keys",
        )
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        for account in self
            .active_approvals_to_add
            .iter()
            .chain(&self.active_approvals_to_remove)
        {
            required.require_active(*account);
        }
        for account in self
            .owner_approvals_to_add
            .iter()
            .chain(&self.owner_approvals_to_remove)
        {
            required.require_owner(*account);
        }
        for key in self
            .key_approvals_to_add
            .iter()
            .chain(&self.key_approvals_to_remove)
        {
            required.require_other(Authority::single_key(*key));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDeleteOperation {
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub using_owner_authority: bool,
    pub proposal: ObjectId,
}

impl OperationBody for ProposalDeleteOperation {
    fee_paid_by!(fee_paying_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("proposal", &self.proposal, ObjectType::Proposal)
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        if self.using_owner_authority {
            required.require_owner(self.fee_paying_account);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::ops::{AccountUpdateOperation, FillOrderOperation, TransferOperation};
    use crate::types::AssetId;
    use crate::validation::{ValidationLimits, ValidationMode};

    fn transfer(from: u64, to: u64) -> Operation {
        TransferOperation {
            fee: AssetAmount::core(1),
            from: AccountId(from),
            to: AccountId(to),
            amount: AssetAmount::core(10),
            memo: None,
        }
        .into()
    }

    fn owner_update(account: u64) -> Operation {
        AccountUpdateOperation {
            fee: AssetAmount::core(1),
            account: AccountId(account),
            owner: Some(Authority::single_key(
                Keypair::from_seed(&[9; 32]).public_key(),
            )),
            active: None,
            new_options: None,
        }
        .into()
    }

    fn propose(payer: u64, ops: Vec<Operation>) -> ProposalCreateOperation {
        ProposalCreateOperation {
            fee: AssetAmount::core(2),
            fee_paying_account: AccountId(payer),
            expiration_time: 1_800_000_000,
            proposed_ops: ops.into_iter().map(OpWrapper::from).collect(),
            review_period_seconds: None,
        }
    }

    fn nest(levels: usize) -> Operation {
        let mut op = transfer(1, 2);
        for _ in 0..levels {
            op = propose(1, vec![op]).into();
        }
        op
    }

    #[test]
    fn test_wrapper_is_transparent() {
        let wrapped = OpWrapper::new(transfer(1, 2));
        assert_eq!(wrapped.op(), &transfer(1, 2));
        assert_eq!(
            serde_json::to_value(&wrapped).unwrap(),
            serde_json::to_value(transfer(1, 2)).unwrap()
        );
        assert_eq!(wrapped.into_inner(), transfer(1, 2));
    }

    #[test]
    fn test_proposal_authorities_union_inner_ops() {
        let op: Operation = propose(1, vec![transfer(1, 7), owner_update(2)]).into();
        let required = op.required_authorities();
        assert_eq!(required.active, BTreeSet::from([AccountId(1)]));
        assert_eq!(required.owner, BTreeSet::from([AccountId(2)]));
        assert!(required.other.is_empty());
    }

    #[test]
    fn test_nested_proposal_authorities_recurse() {
        let inner: Operation = propose(3, vec![owner_update(4)]).into();
        let outer: Operation = propose(1, vec![inner, transfer(5, 6)]).into();
        let required = outer.required_authorities();
        assert_eq!(
            required.active,
            BTreeSet::from([AccountId(1), AccountId(3), AccountId(5)])
        );
        assert_eq!(required.owner, BTreeSet::from([AccountId(4)]));
    }

    #[test]
    fn test_empty_proposal_rejected() {
        let op: Operation = propose(1, vec![]).into();
        assert_eq!(op.validate(), Err(ValidationError::NestedStructureEmpty));
    }

    #[test]
    fn test_nesting_bound() {
        assert!(nest(3).validate().is_ok());
        assert_eq!(
            nest(4).validate(),
            Err(ValidationError::NestedStructureTooDeep { depth: 4, max: 3 })
        );
    }

    #[test]
    fn test_proposed_operations_bound() {
        let ctx = ValidationContext::new(
            ValidationMode::External,
            ValidationLimits {
                max_proposed_operations: 2,
                ..Default::default()
            },
        );
        let op = propose(1, vec![transfer(1, 2), transfer(1, 3), transfer(1, 4)]);
        assert!(matches!(
            op.validate(&ctx),
            Err(ValidationError::MalformedField {
                field: "proposed_ops",
                ..
            })
        ));
    }

    #[test]
    fn test_inner_errors_surface() {
        let bad = TransferOperation {
            fee: AssetAmount::core(1),
            from: AccountId(1),
            to: AccountId(2),
            amount: AssetAmount::core(-3),
            memo: None,
        };
        let op: Operation = propose(1, vec![bad.into()]).into();
        assert!(matches!(
            op.validate(),
            Err(ValidationError::MalformedField { field: "amount", .. })
        ));
    }

    #[test]
    fn test_virtual_inner_op_rejected_externally() {
        let fill: Operation = FillOrderOperation {
            fee: AssetAmount::core(0),
            order_id: ObjectId::new(ObjectType::LimitOrder, 1),
            account_id: AccountId(1),
            pays: AssetAmount::core(5),
            receives: AssetAmount::new(5, AssetId(1)),
        }
        .into();
        let op: Operation = propose(1, vec![fill]).into();
        assert!(matches!(
            op.validate(),
            Err(ValidationError::DisallowedVirtualSubmission(_))
        ));
        assert!(validate_with(&op, &ValidationContext::internal()).is_ok());
    }

    #[test]
    fn test_proposal_update_authorities() {
        let key = Keypair::from_seed(&[4; 32]).public_key();
        let op: Operation = ProposalUpdateOperation {
            fee: AssetAmount::core(1),
            fee_paying_account: AccountId(1),
            proposal: ObjectId::new(ObjectType::Proposal, 8),
            active_approvals_to_add: BTreeSet::from([AccountId(2)]),
            active_approvals_to_remove: BTreeSet::new(),
            owner_approvals_to_add: BTreeSet::from([AccountId(1)]),
            owner_approvals_to_remove: BTreeSet::new(),
            key_approvals_to_add: BTreeSet::from([key]),
            key_approvals_to_remove: BTreeSet::new(),
        }
        .into();
        assert!(op.validate().is_ok());
        let required = op.required_authorities();
        // Owner of 1 subsumes its active requirement as fee payer.
        assert_eq!(required.active, BTreeSet::from([AccountId(2)]));
        assert_eq!(required.owner, BTreeSet::from([AccountId(1)]));
        assert_eq!(required.other, vec![Authority::single_key(key)]);
    }

    #[test]
    fn test_proposal_update_overlap_rejected() {
        let op = ProposalUpdateOperation {
            fee: AssetAmount::core(1),
            fee_paying_account: AccountId(1),
            proposal: ObjectId::new(ObjectType::Proposal, 8),
            active_approvals_to_add: BTreeSet::from([AccountId(2)]),
            active_approvals_to_remove: BTreeSet::from([AccountId(2)]),
            owner_approvals_to_add: BTreeSet::new(),
            owner_approvals_to_remove: BTreeSet::new(),
            key_approvals_to_add: BTreeSet::new(),
            key_approvals_to_remove: BTreeSet::new(),
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_proposal_delete_with_owner() {
        let op: Operation = ProposalDeleteOperation {
            fee: AssetAmount::core(1),
            fee_paying_account: AccountId(6),
            using_owner_authority: true,
            proposal: ObjectId::new(ObjectType::Proposal, 2),
        }
        .into();
        let required = op.required_authorities();
        assert!(required.active.is_empty());
        assert_eq!(required.owner, BTreeSet::from([AccountId(6)]));
    }
}
