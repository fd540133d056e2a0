//! Transactions: an ordered list of operations plus replay protection.

use serde::{Deserialize, Serialize};

use crate::authority::RequiredAuthorities;
use crate::canonical::canonical_bytes;
use crate::crypto::Blake3Hash;
use crate::error::{CoreError, ValidationError};
use crate::ops::Operation;
use crate::types::TransactionId;
use crate::validation::{validate_with, ValidationContext};

/// An ordered, heterogeneous list of operations applied atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Low 16 bits of a recent block number.
    pub ref_block_num: u16,
    /// Four bytes of that block's id.
    pub ref_block_prefix: u32,
    /// Unix seconds after which the transaction is void.
    pub expiration: u32,
    pub operations: Vec<Operation>,
}

impl Transaction {
    /// Validate every operation in order.
    ///
    /// The first failing operation is reported with its index; an empty
    /// transaction is rejected outright.
    pub fn validate(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        if self.operations.is_empty() {
            return Err(ValidationError::EmptyTransaction);
        }
        for (index, op) in self.operations.iter().enumerate() {
            validate_with(op, ctx).map_err(|source| ValidationError::InvalidOperation {
                index,
                kind: op.kind(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    /// Union of every operation's requirements, normalized so owner
    /// subsumes active.
    pub fn required_authorities(&self) -> RequiredAuthorities {
        self.operations
            .iter()
            .map(Operation::required_authorities)
            .collect()
    }

    /// Blake3 over the canonical encoding.
    pub fn id(&self) -> Result<TransactionId, CoreError> {
        let bytes = canonical_bytes(self)?;
        Ok(TransactionId(Blake3Hash::hash(&bytes).0))
    }

    pub fn has_virtual_operations(&self) -> bool {
        self.operations.iter().any(Operation::is_virtual)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Builder for constructing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    ref_block_num: u16,
    ref_block_prefix: u32,
    expiration: u32,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the transaction to a recent block.
    pub fn reference_block(mut self, num: u16, prefix: u32) -> Self {
        self.ref_block_num = num;
        self.ref_block_prefix = prefix;
        self
    }

    pub fn expiration(mut self, expiration: u32) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn operation(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    pub fn operations<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Operation>,
    {
        self.operations.extend(ops.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Transaction {
        Transaction {
            ref_block_num: self.ref_block_num,
            ref_block_prefix: self.ref_block_prefix,
            expiration: self.expiration,
            operations: self.operations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::Authority;
    use crate::crypto::Keypair;
    use crate::ops::{AccountUpdateOperation, OperationKind, TransferOperation};
    use crate::types::{AccountId, AssetAmount};
    use std::collections::BTreeSet;

    fn transfer(from: u64, to: u64, amount: i64) -> TransferOperation {
        TransferOperation {
            fee: AssetAmount::core(1),
            from: AccountId(from),
            to: AccountId(to),
            amount: AssetAmount::core(amount),
            memo: None,
        }
    }

    fn owner_update(account: u64) -> AccountUpdateOperation {
        AccountUpdateOperation {
            fee: AssetAmount::core(1),
            account: AccountId(account),
            owner: Some(Authority::single_key(
                Keypair::from_seed(&[3; 32]).public_key(),
            )),
            active: None,
            new_options: None,
        }
    }

    #[test]
    fn test_empty_transaction_rejected() {
        let tx = TransactionBuilder::new().build();
        assert_eq!(
            tx.validate(&ValidationContext::external()),
            Err(ValidationError::EmptyTransaction)
        );
    }

    #[test]
    fn test_failing_operation_reported_with_index() {
        let tx = TransactionBuilder::new()
            .operation(transfer(1, 2, 10))
            .operation(transfer(1, 3, -4))
            .build();
        let err = tx.validate(&ValidationContext::external()).unwrap_err();
        match &err {
            ValidationError::InvalidOperation { index, kind, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(*kind, OperationKind::Transfer);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            err.root_cause(),
            ValidationError::MalformedField { field: "amount", .. }
        ));
    }

    #[test]
    fn test_owner_subsumes_active_across_operations() {
        let tx = TransactionBuilder::new()
            .operation(transfer(1, 2, 10))
            .operation(transfer(2, 3, 10))
            .operation(owner_update(2))
            .build();
        let required = tx.required_authorities();
        assert_eq!(required.active, BTreeSet::from([AccountId(1)]));
        assert_eq!(required.owner, BTreeSet::from([AccountId(2)]));
    }

    #[test]
    fn test_id_is_deterministic() {
        let build = || {
            TransactionBuilder::new()
                .reference_block(7, 0xdead_beef)
                .expiration(1_800_000_000)
                .operation(transfer(1, 2, 10))
                .build()
        };
        assert_eq!(build().id().unwrap(), build().id().unwrap());

        let other = TransactionBuilder::new()
            .reference_block(8, 0xdead_beef)
            .expiration(1_800_000_000)
            .operation(transfer(1, 2, 10))
            .build();
        assert_ne!(build().id().unwrap(), other.id().unwrap());
    }

    #[test]
    fn test_builder_collects_operations() {
        let tx = TransactionBuilder::new()
            .operations(vec![transfer(1, 2, 1), transfer(2, 1, 1)])
            .build();
        assert_eq!(tx.len(), 2);
        assert!(!tx.has_virtual_operations());
    }
}
