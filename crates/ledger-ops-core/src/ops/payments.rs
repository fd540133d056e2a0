//! Mass payments: one payer, many recipients, one asset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, AssetId, ObjectId, ObjectType};
use crate::validation::{check_object, check_positive, ensure, ValidationContext};

/// Maximum number of recipients of one mass payment.
pub const MAX_MASS_PAYMENT_ENTRIES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassPaymentEntry {
    pub to: AccountId,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassPaymentOperation {
    pub fee: AssetAmount,
    pub from: AccountId,
    pub asset_id: AssetId,
    pub entries: Vec<MassPaymentEntry>,
}

impl MassPaymentOperation {
    /// Sum of all entries, or `None` on overflow.
    pub fn total(&self) -> Option<AssetAmount> {
        self.entries
            .iter()
            .try_fold(0i64, |sum, entry| sum.checked_add(entry.amount))
            .map(|sum| AssetAmount::new(sum, self.asset_id))
    }
}

impl OperationBody for MassPaymentOperation {
    fee_paid_by!(from);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(!self.entries.is_empty(), "entries", "must not be empty")?;
        ensure(
            self.entries.len() <= MAX_MASS_PAYMENT_ENTRIES,
            "entries",
            "too many recipients",
        )?;
        let mut recipients = BTreeSet::new();
        for entry in &self.entries {
            ensure(entry.to != self.from, "entries", "cannot pay the payer")?;
            ensure(recipients.insert(entry.to), "entries", "duplicate recipient")?;
            check_positive("entries", &AssetAmount::new(entry.amount, self.asset_id))?;
        }
        match self.total() {
            Some(total) => check_positive("entries", &total),
            None => Err(ValidationError::malformed("entries", "total overflows")),
        }
    }
}

/// Execute a previously registered mass payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassPaymentPayOperation {
    pub fee: AssetAmount,
    pub payer: AccountId,
    pub mass_payment: ObjectId,
}

impl OperationBody for MassPaymentPayOperation {
    fee_paid_by!(payer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("mass_payment", &self.mass_payment, ObjectType::MassPayment)
    }
}
