//! Plain value transfers and memo-carrying messages.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::crypto::Ed25519PublicKey;
use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount};
use crate::validation::{check_distinct, check_positive, ensure, ValidationContext};

/// Maximum size of an encrypted memo payload.
pub const MAX_MEMO_SIZE: usize = 2048;

/// An encrypted note attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub from: Ed25519PublicKey,
    pub to: Ed25519PublicKey,
    pub nonce: u64,
    pub message: Bytes,
}

impl Memo {
    pub(crate) fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        ensure(self.message.len() <= MAX_MEMO_SIZE, field, "memo is too large")?;
        ensure(
            self.from.is_well_formed() && self.to.is_well_formed(),
            field,
            "memo keys must be valid public keys",
        )
    }
}

pub(crate) fn check_memo(field: &'static str, memo: &Option<Memo>) -> Result<(), ValidationError> {
    match memo {
        Some(memo) => memo.validate(field),
        None => Ok(()),
    }
}

/// Move an amount of an asset from one account to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
}

impl OperationBody for TransferOperation {
    fee_paid_by!(from);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &self.amount)?;
        check_distinct("to", self.from, self.to)?;
        check_memo("memo", &self.memo)
    }
}

/// An issuer moving its own asset out of a holder's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideTransferOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
}

impl OperationBody for OverrideTransferOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &self.amount)?;
        check_distinct("from", self.issuer, self.from)?;
        check_memo("memo", &self.memo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageOperation {
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub memo: Memo,
}

impl OperationBody for SendMessageOperation {
    fee_paid_by!(from);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_distinct("to", self.from, self.to)?;
        ensure(!self.memo.message.is_empty(), "memo", "message must not be empty")?;
        self.memo.validate("memo")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    fn memo(len: usize) -> Memo {
        Memo {
            from: Keypair::from_seed(&[1; 32]).public_key(),
            to: Keypair::from_seed(&[2; 32]).public_key(),
            nonce: 7,
            message: Bytes::from(vec![0xaa; len]),
        }
    }

    fn transfer() -> TransferOperation {
        TransferOperation {
            fee: AssetAmount::core(1),
            from: AccountId(10),
            to: AccountId(11),
            amount: AssetAmount::core(500),
            memo: Some(memo(32)),
        }
    }

    #[test]
    fn test_transfer_valid() {
        assert!(transfer().validate(&ValidationContext::external()).is_ok());
    }

    #[test]
    fn test_self_transfer_rejected() {
        let mut op = transfer();
        op.to = op.from;
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField { field: "to", .. })
        ));
    }

    #[test]
    fn test_zero_transfer_rejected() {
        let mut op = transfer();
        op.amount = AssetAmount::core(0);
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_oversized_memo_rejected() {
        let mut op = transfer();
        op.memo = Some(memo(MAX_MEMO_SIZE + 1));
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField { field: "memo", .. })
        ));
    }

    #[test]
    fn test_override_transfer_from_issuer_rejected() {
        let op = OverrideTransferOperation {
            fee: AssetAmount::core(1),
            issuer: AccountId(3),
            from: AccountId(3),
            to: AccountId(4),
            amount: AssetAmount::core(1),
            memo: None,
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_empty_message_rejected() {
        let op = SendMessageOperation {
            fee: AssetAmount::core(1),
            from: AccountId(3),
            to: AccountId(4),
            memo: memo(0),
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }
}
