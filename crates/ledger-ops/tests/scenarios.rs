//! End-to-end checking scenarios.

use ledger_ops::core::ops::{
    AccountTransferOperation, AccountUpdateOperation, ProposalUpdateOperation,
};
use ledger_ops::core::{AssetAmount, Authority, ObjectId, ObjectType};
use ledger_ops::{
    CheckError, CheckerConfig, Operation, OperationKind, TransactionBuilder, TransactionChecker,
    ValidationError,
};
use ledger_ops_testkit::{sample_operation, TestFixture};
use std::collections::BTreeSet;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn root_cause(err: &CheckError) -> &ValidationError {
    match err {
        CheckError::Validation(e) => e.root_cause(),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_plain_transfer() {
    init_tracing();
    let f = TestFixture::new();
    let checker = TransactionChecker::default();

    let tx = f.transaction([f.transfer(&f.alice, &f.bob, 1_000)]);
    let report = checker.check(&tx).unwrap();

    assert_eq!(report.authorities.active, BTreeSet::from([f.alice.account]));
    assert!(report.authorities.owner.is_empty());
    assert!(report.authorities.other.is_empty());
    assert_eq!(report.signer_count(), 1);
}

#[test]
fn test_proposal_requires_union_of_inner_authorities() {
    init_tracing();
    let f = TestFixture::new();
    let checker = TransactionChecker::default();

    let handover = AccountTransferOperation {
        fee: AssetAmount::core(20),
        account_id: f.carol.account,
        new_owner: f.bob.account,
    };
    let inner: [Operation; 2] = [f.transfer(&f.bob, &f.carol, 50).into(), handover.into()];
    let proposal = f.proposal(&f.alice, inner);
    let report = checker.check(&f.transaction([proposal])).unwrap();

    assert_eq!(
        report.authorities.active,
        BTreeSet::from([f.alice.account, f.bob.account])
    );
    assert_eq!(report.authorities.owner, BTreeSet::from([f.carol.account]));
}

#[test]
fn test_key_approvals_become_embedded_authorities() {
    let f = TestFixture::new();
    let checker = TransactionChecker::default();

    let update = ProposalUpdateOperation {
        fee: AssetAmount::core(20),
        fee_paying_account: f.alice.account,
        proposal: ObjectId::new(ObjectType::Proposal, 9),
        active_approvals_to_add: BTreeSet::new(),
        active_approvals_to_remove: BTreeSet::new(),
        owner_approvals_to_add: BTreeSet::new(),
        owner_approvals_to_remove: BTreeSet::new(),
        key_approvals_to_add: BTreeSet::from([f.bob.key]),
        key_approvals_to_remove: BTreeSet::new(),
    };
    let required = checker.check_operation(&update.into()).unwrap();

    assert_eq!(required.active, BTreeSet::from([f.alice.account]));
    assert_eq!(required.other, vec![Authority::single_key(f.bob.key)]);
}

#[test]
fn test_active_key_rotation_requires_owner() {
    let f = TestFixture::new();
    let rotation = AccountUpdateOperation {
        fee: AssetAmount::core(20),
        account: f.bob.account,
        owner: None,
        active: Some(f.carol.authority()),
        new_options: None,
    };
    let report = TransactionChecker::default()
        .check(&f.transaction([rotation]))
        .unwrap();

    assert!(report.authorities.active.is_empty());
    assert_eq!(report.authorities.owner, BTreeSet::from([f.bob.account]));
}

#[test]
fn test_virtual_operation_only_on_internal_path() {
    init_tracing();
    let f = TestFixture::new();
    let tx = f.transaction([sample_operation(OperationKind::FillOrder)]);

    let external = TransactionChecker::default();
    let err = external.check(&tx).unwrap_err();
    assert_eq!(
        root_cause(&err),
        &ValidationError::DisallowedVirtualSubmission(OperationKind::FillOrder)
    );

    let internal = TransactionChecker::new(CheckerConfig::internal()).unwrap();
    assert!(internal.check(&tx).is_ok());
}

#[test]
fn test_virtual_operation_inside_proposal() {
    let f = TestFixture::new();
    let proposal = f.proposal(&f.alice, [sample_operation(OperationKind::FlipcoinWin)]);
    let tx = f.transaction([proposal]);

    let err = TransactionChecker::default().check(&tx).unwrap_err();
    assert_eq!(
        root_cause(&err),
        &ValidationError::DisallowedVirtualSubmission(OperationKind::FlipcoinWin)
    );
}

#[test]
fn test_nesting_limit() {
    init_tracing();
    let f = TestFixture::new();
    let checker = TransactionChecker::default();

    assert!(checker.check(&f.transaction([f.nested_proposal(3)])).is_ok());

    let err = checker
        .check(&f.transaction([f.nested_proposal(4)]))
        .unwrap_err();
    assert_eq!(
        root_cause(&err),
        &ValidationError::NestedStructureTooDeep { depth: 4, max: 3 }
    );
}

#[test]
fn test_configured_nesting_limit() {
    let f = TestFixture::new();
    let config = CheckerConfig::from_json(r#"{"limits": {"max_nesting_depth": 1}}"#).unwrap();
    let checker = TransactionChecker::new(config).unwrap();

    assert!(checker.check(&f.transaction([f.nested_proposal(1)])).is_ok());
    let err = checker
        .check(&f.transaction([f.nested_proposal(2)]))
        .unwrap_err();
    assert_eq!(
        root_cause(&err),
        &ValidationError::NestedStructureTooDeep { depth: 2, max: 1 }
    );
}

#[test]
fn test_failing_operation_is_located() {
    let f = TestFixture::new();
    let tx = f.transaction([
        f.transfer(&f.alice, &f.bob, 10),
        f.transfer(&f.alice, &f.alice, 10),
    ]);

    match TransactionChecker::default().check(&tx) {
        Err(CheckError::Validation(ValidationError::InvalidOperation { index, kind, .. })) => {
            assert_eq!(index, 1);
            assert_eq!(kind, OperationKind::Transfer);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_empty_transaction() {
    let tx = TransactionBuilder::new().expiration(1).build();
    let err = TransactionChecker::default().check(&tx).unwrap_err();
    assert_eq!(root_cause(&err), &ValidationError::EmptyTransaction);
}

#[tokio::test]
async fn test_batch_mixes_accepted_and_rejected() {
    init_tracing();
    let f = TestFixture::new();
    let config = CheckerConfig {
        batch_concurrency: 2,
        ..CheckerConfig::default()
    };
    let checker = TransactionChecker::new(config).unwrap();

    let txs = vec![
        f.transaction([f.transfer(&f.alice, &f.bob, 10)]),
        f.transaction([sample_operation(OperationKind::ExecuteBid)]),
        f.transaction([f.nested_proposal(2)]),
        f.transaction([f.nested_proposal(5)]),
        f.transaction([f.transfer(&f.carol, &f.bob, 10)]),
    ];
    let ids: Vec<_> = txs.iter().map(|tx| tx.id().unwrap()).collect();

    let results = checker.check_batch(txs).await;
    let accepted: Vec<bool> = results.iter().map(Result::is_ok).collect();
    assert_eq!(accepted, vec![true, false, true, false, true]);

    for (result, id) in results.iter().zip(&ids) {
        if let Ok(report) = result {
            assert_eq!(&report.transaction_id, id);
        }
    }
}

#[tokio::test]
async fn test_empty_batch() {
    let results = TransactionChecker::default().check_batch(Vec::new()).await;
    assert!(results.is_empty());
}
