//! Order book operations.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{check_non_negative, check_object, check_positive, ensure, ValidationContext};

/// Offer `amount_to_sell` for at least `min_to_receive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderCreateOperation {
    pub fee: AssetAmount,
    pub seller: AccountId,
    pub amount_to_sell: AssetAmount,
    pub min_to_receive: AssetAmount,
    /// Unix seconds after which the order is cancelled.
    pub expiration: u32,
    pub fill_or_kill: bool,
}

impl OperationBody for LimitOrderCreateOperation {
    fee_paid_by!(seller);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount_to_sell", &self.amount_to_sell)?;
        check_positive("min_to_receive", &self.min_to_receive)?;
        ensure(
            self.amount_to_sell.asset_id != self.min_to_receive.asset_id,
            "min_to_receive",
            "must name a different asset than amount_to_sell",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderCancelOperation {
    pub fee: AssetAmount,
    pub fee_paying_account: AccountId,
    pub order: ObjectId,
}

impl OperationBody for LimitOrderCancelOperation {
    fee_paid_by!(fee_paying_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("order", &self.order, ObjectType::LimitOrder)
    }
}

/// Adjust collateral and debt of a margin position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOrderUpdateOperation {
    pub fee: AssetAmount,
    pub funding_account: AccountId,
    pub delta_collateral: AssetAmount,
    pub delta_debt: AssetAmount,
}

impl OperationBody for CallOrderUpdateOperation {
    fee_paid_by!(funding_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.delta_collateral.asset_id != self.delta_debt.asset_id,
            "delta_debt",
            "collateral and debt must be different assets",
        )?;
        ensure(
            self.delta_collateral.amount != 0 || self.delta_debt.amount != 0,
            "delta_collateral",
            "at least one delta must be non-zero",
        )
    }
}

/// Virtual: an order was (partially) matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOrderOperation {
    pub fee: AssetAmount,
    pub order_id: ObjectId,
    pub account_id: AccountId,
    pub pays: AssetAmount,
    pub receives: AssetAmount,
}

impl OperationBody for FillOrderOperation {
    fee_paid_by!(account_id);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.order_id.is(ObjectType::LimitOrder)
                || self.order_id.is(ObjectType::CallOrder)
                || self.order_id.is(ObjectType::ForceSettlement),
            "order_id",
            "must reference a limit, call or settlement order",
        )?;
        check_non_negative("pays", &self.pays)?;
        check_non_negative("receives", &self.receives)?;
        ensure(
            self.pays.asset_id != self.receives.asset_id,
            "receives",
            "must name a different asset than pays",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetId;

    #[test]
    fn test_limit_order_same_asset_rejected() {
        let op = LimitOrderCreateOperation {
            fee: AssetAmount::core(1),
            seller: AccountId(5),
            amount_to_sell: AssetAmount::core(100),
            min_to_receive: AssetAmount::core(90),
            expiration: 1_800_000_000,
            fill_or_kill: false,
        };
        assert!(op.validate(&ValidationContext::external()).is_err());

        let op = LimitOrderCreateOperation {
            min_to_receive: AssetAmount::new(90, AssetId(2)),
            ..op
        };
        assert!(op.validate(&ValidationContext::external()).is_ok());
    }

    #[test]
    fn test_cancel_requires_limit_order_id() {
        let op = LimitOrderCancelOperation {
            fee: AssetAmount::core(1),
            fee_paying_account: AccountId(5),
            order: ObjectId::new(ObjectType::Proposal, 1),
        };
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField { field: "order", .. })
        ));
    }

    #[test]
    fn test_call_order_update_needs_a_delta() {
        let op = CallOrderUpdateOperation {
            fee: AssetAmount::core(1),
            funding_account: AccountId(5),
            delta_collateral: AssetAmount::core(0),
            delta_debt: AssetAmount::new(0, AssetId(3)),
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }
}
