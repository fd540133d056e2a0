//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use ledger_ops_core::ops::{OpWrapper, ProposalCreateOperation, TransferOperation};
use ledger_ops_core::{
    AccountId, AssetAmount, Authority, Ed25519PublicKey, Keypair, Operation, Transaction,
    TransactionBuilder,
};

/// Shorthand for an account id.
pub fn account(instance: u64) -> AccountId {
    AccountId(instance)
}

/// A well-formed public key derived from a one-byte seed.
pub fn key(seed: u8) -> Ed25519PublicKey {
    Keypair::from_seed(&[seed; 32]).public_key()
}

/// A named participant with a deterministic key.
#[derive(Debug, Clone)]
pub struct Party {
    pub name: &'static str,
    pub account: AccountId,
    pub key: Ed25519PublicKey,
}

impl Party {
    pub fn new(name: &'static str, instance: u64) -> Self {
        Self {
            name,
            account: account(instance),
            key: key(instance as u8),
        }
    }

    /// This party's key as a single-key authority.
    pub fn authority(&self) -> Authority {
        Authority::single_key(self.key)
    }
}

/// A fixed cast of accounts and an expiration for building transactions.
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub alice: Party,
    pub bob: Party,
    pub carol: Party,
    pub expiration: u32,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            alice: Party::new("alice", 17),
            bob: Party::new("bob", 18),
            carol: Party::new("carol", 19),
            expiration: 1_700_000_000,
        }
    }

    /// A plain core-asset transfer.
    pub fn transfer(&self, from: &Party, to: &Party, amount: i64) -> TransferOperation {
        TransferOperation {
            fee: AssetAmount::core(20),
            from: from.account,
            to: to.account,
            amount: AssetAmount::core(amount),
            memo: None,
        }
    }

    /// A proposal paid by `payer` wrapping the given operations.
    pub fn proposal<I>(&self, payer: &Party, ops: I) -> ProposalCreateOperation
    where
        I: IntoIterator,
        I::Item: Into<Operation>,
    {
        ProposalCreateOperation {
            fee: AssetAmount::core(20),
            fee_paying_account: payer.account,
            expiration_time: self.expiration + 3_600,
            proposed_ops: ops.into_iter().map(OpWrapper::new).collect(),
            review_period_seconds: None,
        }
    }

    /// `depth` proposals nested inside each other around a single transfer.
    ///
    /// Depth 0 is the bare transfer.
    pub fn nested_proposal(&self, depth: usize) -> Operation {
        let mut op: Operation = self.transfer(&self.alice, &self.bob, 100).into();
        for _ in 0..depth {
            op = self.proposal(&self.carol, [op]).into();
        }
        op
    }

    /// A transaction around the given operations.
    pub fn transaction<I>(&self, ops: I) -> Transaction
    where
        I: IntoIterator,
        I::Item: Into<Operation>,
    {
        TransactionBuilder::new()
            .reference_block(1, 0xdead_beef)
            .expiration(self.expiration)
            .operations(ops)
            .build()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_deterministic() {
        assert_eq!(key(7), key(7));
        assert_ne!(key(7), key(8));
        assert!(key(7).is_well_formed());
    }

    #[test]
    fn test_nested_proposal_depth() {
        let fixture = TestFixture::new();
        let mut op = fixture.nested_proposal(3);
        let mut depth = 0;
        while let Operation::ProposalCreate(proposal) = op {
            depth += 1;
            op = proposal.proposed_ops[0].op().clone();
        }
        assert_eq!(depth, 3);
        assert!(matches!(op, Operation::Transfer(_)));
    }
}
