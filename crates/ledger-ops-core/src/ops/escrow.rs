//! Approved transfers: a payment held until the receiver approves it, with
//! an arbitrator for disputes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::transfer::{check_memo, Memo};
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{check_distinct, check_object, check_positive, ensure, ValidationContext};

fn check_escrow(escrow: &ObjectId) -> Result<(), ValidationError> {
    check_object("escrow", escrow, ObjectType::ApprovedTransfer)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTransferCreateOperation {
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub arbitr: AccountId,
    pub amount: AssetAmount,
    pub expiration: u32,
    pub memo: Option<Memo>,
}

impl OperationBody for ApprovedTransferCreateOperation {
    fee_paid_by!(from);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_distinct("to", self.from, self.to)?;
        ensure(
            self.arbitr != self.from && self.arbitr != self.to,
            "arbitr",
            "the arbitrator must not be a party",
        )?;
        check_positive("amount", &self.amount)?;
        ensure(self.expiration > 0, "expiration", "must be set")?;
        check_memo("memo", &self.memo)
    }
}

/// The receiver accepts the payment and releases it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTransferApproveOperation {
    pub fee: AssetAmount,
    pub escrow: ObjectId,
    pub to: AccountId,
}

impl OperationBody for ApprovedTransferApproveOperation {
    fee_paid_by!(to);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_escrow(&self.escrow)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTransferCancelOperation {
    pub fee: AssetAmount,
    pub escrow: ObjectId,
    pub from: AccountId,
}

impl OperationBody for ApprovedTransferCancelOperation {
    fee_paid_by!(from);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_escrow(&self.escrow)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTransferOpenDisputeOperation {
    pub fee: AssetAmount,
    pub escrow: ObjectId,
    pub account: AccountId,
}

impl OperationBody for ApprovedTransferOpenDisputeOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_escrow(&self.escrow)
    }
}

/// The arbitrator awards the held amount to one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTransferResolveDisputeOperation {
    pub fee: AssetAmount,
    pub escrow: ObjectId,
    pub arbitr: AccountId,
    pub winner: AccountId,
}

impl OperationBody for ApprovedTransferResolveDisputeOperation {
    fee_paid_by!(arbitr);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_escrow(&self.escrow)?;
        check_distinct("winner", self.arbitr, self.winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> ApprovedTransferCreateOperation {
        ApprovedTransferCreateOperation {
            fee: AssetAmount::core(1),
            from: AccountId(80),
            to: AccountId(81),
            arbitr: AccountId(82),
            amount: AssetAmount::core(250),
            expiration: 1_800_000_000,
            memo: None,
        }
    }

    #[test]
    fn test_create_valid() {
        assert!(create().validate(&ValidationContext::external()).is_ok());
    }

    #[test]
    fn test_arbitrator_cannot_be_party() {
        let mut op = create();
        op.arbitr = op.to;
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField { field: "arbitr", .. })
        ));
    }

    #[test]
    fn test_resolve_needs_escrow_id() {
        let op = ApprovedTransferResolveDisputeOperation {
            fee: AssetAmount::core(0),
            escrow: ObjectId::new(ObjectType::P2pOrder, 1),
            arbitr: AccountId(82),
            winner: AccountId(81),
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }
}
