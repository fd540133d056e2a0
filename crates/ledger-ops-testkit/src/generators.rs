//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ledger_ops_core::ops::{OpWrapper, ProposalCreateOperation, TransferOperation};
use ledger_ops_core::validation::MAX_SHARE_SUPPLY;
use ledger_ops_core::{
    AccountId, AssetAmount, Ed25519PublicKey, Keypair, Operation, OperationKind, Transaction,
    TransactionBuilder,
};

use crate::vectors::sample_operation;

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a well-formed public key.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate an ordinary account, never one of the reserved low ids.
pub fn account_id() -> impl Strategy<Value = AccountId> {
    (16u64..100_000).prop_map(AccountId)
}

/// Generate a positive core-asset amount.
pub fn positive_amount() -> impl Strategy<Value = AssetAmount> {
    (1i64..=MAX_SHARE_SUPPLY).prop_map(AssetAmount::core)
}

/// Generate any catalog kind.
pub fn operation_kind() -> impl Strategy<Value = OperationKind> {
    prop::sample::select(OperationKind::ALL)
}

/// Generate a valid transfer between two distinct accounts.
pub fn transfer() -> impl Strategy<Value = TransferOperation> {
    (account_id(), account_id(), positive_amount(), 0i64..1_000)
        .prop_filter("sender and recipient differ", |(from, to, _, _)| from != to)
        .prop_map(|(from, to, amount, fee)| TransferOperation {
            fee: AssetAmount::core(fee),
            from,
            to,
            amount,
            memo: None,
        })
}

/// Generate a structurally valid operation of any kind.
///
/// Virtual kinds are included, so these only all pass validation on the
/// internal path.
pub fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        transfer().prop_map(Operation::from),
        operation_kind().prop_map(sample_operation),
    ]
}

/// Generate proposal trees up to `max_depth` proposals deep.
///
/// Leaves are arbitrary operations from [`operation`]; inner nodes are
/// proposals wrapping one to three children.
pub fn proposal_tree(max_depth: u32) -> impl Strategy<Value = Operation> {
    operation().prop_recursive(max_depth, 32, 3, |inner| {
        (account_id(), prop::collection::vec(inner, 1..=3)).prop_map(|(payer, ops)| {
            ProposalCreateOperation {
                fee: AssetAmount::core(20),
                fee_paying_account: payer,
                expiration_time: 1_700_000_000,
                proposed_ops: ops.into_iter().map(OpWrapper::new).collect(),
                review_period_seconds: None,
            }
            .into()
        })
    })
}

/// How many proposals deep the deepest operation in `op` sits.
///
/// A non-proposal operation has depth 0; a proposal of plain operations
/// has depth 1.
pub fn proposal_depth(op: &Operation) -> usize {
    match op {
        Operation::ProposalCreate(proposal) => {
            1 + proposal
                .operations()
                .map(proposal_depth)
                .max()
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Every fee payer in `op`, including those of proposed operations.
pub fn fee_payers(op: &Operation) -> Vec<AccountId> {
    let mut payers = vec![op.fee_payer()];
    if let Operation::ProposalCreate(proposal) = op {
        payers.extend(proposal.operations().flat_map(fee_payers));
    }
    payers
}

/// Parameters for generating a transaction.
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: u32,
    pub operations: Vec<Operation>,
}

impl Arbitrary for TransactionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<u16>(),
            any::<u32>(),
            1u32..=u32::MAX,
            prop::collection::vec(proposal_tree(2), 1..8),
        )
            .prop_map(|(num, prefix, expiration, operations)| TransactionParams {
                ref_block_num: num,
                ref_block_prefix: prefix,
                expiration,
                operations,
            })
            .boxed()
    }
}

/// Build a transaction from parameters.
pub fn transaction_from_params(params: &TransactionParams) -> Transaction {
    TransactionBuilder::new()
        .reference_block(params.ref_block_num, params.ref_block_prefix)
        .expiration(params.expiration)
        .operations(params.operations.iter().cloned())
        .build()
}
