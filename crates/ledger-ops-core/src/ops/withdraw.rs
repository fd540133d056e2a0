//! Recurring withdraw permissions: one account lets another pull a bounded
//! amount per period.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::transfer::{check_memo, Memo};
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{check_distinct, check_object, check_positive, ensure, ValidationContext};

fn check_schedule(period_sec: u32, periods_until_expiration: u32) -> Result<(), ValidationError> {
    ensure(period_sec > 0, "withdrawal_period_sec", "must be positive")?;
    ensure(
        periods_until_expiration > 0,
        "periods_until_expiration",
        "must be positive",
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawPermissionCreateOperation {
    pub fee: AssetAmount,
    pub withdraw_from_account: AccountId,
    pub authorized_account: AccountId,
    pub withdrawal_limit: AssetAmount,
    pub withdrawal_period_sec: u32,
    pub periods_until_expiration: u32,
    pub period_start_time: u32,
}

impl OperationBody for WithdrawPermissionCreateOperation {
    fee_paid_by!(withdraw_from_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_distinct(
            "authorized_account",
            self.withdraw_from_account,
            self.authorized_account,
        )?;
        check_positive("withdrawal_limit", &self.withdrawal_limit)?;
        check_schedule(self.withdrawal_period_sec, self.periods_until_expiration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawPermissionUpdateOperation {
    pub fee: AssetAmount,
    pub withdraw_from_account: AccountId,
    pub authorized_account: AccountId,
    pub permission_to_update: ObjectId,
    pub withdrawal_limit: AssetAmount,
    pub withdrawal_period_sec: u32,
    pub period_start_time: u32,
    pub periods_until_expiration: u32,
}

impl OperationBody for WithdrawPermissionUpdateOperation {
    fee_paid_by!(withdraw_from_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object(
            "permission_to_update",
            &self.permission_to_update,
            ObjectType::WithdrawPermission,
        )?;
        check_distinct(
            "authorized_account",
            self.withdraw_from_account,
            self.authorized_account,
        )?;
        check_positive("withdrawal_limit", &self.withdrawal_limit)?;
        check_schedule(self.withdrawal_period_sec, self.periods_until_expiration)
    }
}

/// Pull funds under an existing permission. Paid for and signed by the
/// authorized account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawPermissionClaimOperation {
    pub fee: AssetAmount,
    pub withdraw_permission: ObjectId,
    pub withdraw_from_account: AccountId,
    pub withdraw_to_account: AccountId,
    pub amount_to_withdraw: AssetAmount,
    pub memo: Option<Memo>,
}

impl OperationBody for WithdrawPermissionClaimOperation {
    fee_paid_by!(withdraw_to_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object(
            "withdraw_permission",
            &self.withdraw_permission,
            ObjectType::WithdrawPermission,
        )?;
        check_distinct(
            "withdraw_to_account",
            self.withdraw_from_account,
            self.withdraw_to_account,
        )?;
        check_positive("amount_to_withdraw", &self.amount_to_withdraw)?;
        check_memo("memo", &self.memo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawPermissionDeleteOperation {
    pub fee: AssetAmount,
    pub withdraw_from_account: AccountId,
    pub authorized_account: AccountId,
    pub withdrawal_permission: ObjectId,
}

impl OperationBody for WithdrawPermissionDeleteOperation {
    fee_paid_by!(withdraw_from_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object(
            "withdrawal_permission",
            &self.withdrawal_permission,
            ObjectType::WithdrawPermission,
        )?;
        check_distinct(
            "authorized_account",
            self.withdraw_from_account,
            self.authorized_account,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Operation;

    #[test]
    fn test_create_requires_schedule() {
        let mut op = WithdrawPermissionCreateOperation {
            fee: AssetAmount::core(1),
            withdraw_from_account: AccountId(10),
            authorized_account: AccountId(11),
            withdrawal_limit: AssetAmount::core(100),
            withdrawal_period_sec: 0,
            periods_until_expiration: 12,
            period_start_time: 1_700_000_000,
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
        op.withdrawal_period_sec = 86_400;
        assert!(op.validate(&ValidationContext::external()).is_ok());
    }

    #[test]
    fn test_claim_signed_by_recipient() {
        let op: Operation = WithdrawPermissionClaimOperation {
            fee: AssetAmount::core(1),
            withdraw_permission: ObjectId::new(ObjectType::WithdrawPermission, 3),
            withdraw_from_account: AccountId(10),
            withdraw_to_account: AccountId(11),
            amount_to_withdraw: AssetAmount::core(50),
            memo: None,
        }
        .into();
        assert!(op.validate().is_ok());
        let required = op.required_authorities();
        assert!(required.active.contains(&AccountId(11)));
        assert!(!required.active.contains(&AccountId(10)));
    }
}
