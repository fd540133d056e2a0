//! Golden tests for the wire catalog.
//!
//! Every kind's ordinal is part of the wire format. These tests pin the
//! catalog table and check that each sample encodes with its ordinal as the
//! leading tag and decodes back unchanged.

use ledger_ops::core::{decode_operation, encode_operation, CoreError, OperationKind};
use ledger_ops_testkit::{all_samples, verify_catalog, CATALOG};

#[test]
fn test_catalog_is_pinned() {
    let mismatches = verify_catalog();
    assert!(mismatches.is_empty(), "catalog drifted: {:#?}", mismatches);
    assert_eq!(CATALOG.len(), 106);
}

#[test]
fn test_every_sample_leads_with_its_ordinal() {
    for op in all_samples() {
        let ordinal = op.kind().to_u16();
        let bytes = encode_operation(&op).unwrap();

        // [tag, payload]
        assert_eq!(bytes[0], 0x82, "{}", op.kind());
        if ordinal < 24 {
            assert_eq!(bytes[1], ordinal as u8, "{}", op.kind());
        } else {
            assert_eq!(&bytes[1..3], &[0x18, ordinal as u8], "{}", op.kind());
        }
    }
}

#[test]
fn test_every_sample_decodes() {
    for op in all_samples() {
        let bytes = encode_operation(&op).unwrap();
        let decoded = decode_operation(&bytes).unwrap();
        assert_eq!(decoded, op);
        assert_eq!(encode_operation(&decoded).unwrap(), bytes);
    }
}

#[test]
fn test_unassigned_ordinal_is_rejected() {
    let mut bytes = encode_operation(&all_samples()[OperationKind::MassPaymentPay.to_u16() as usize])
        .unwrap();
    // 105 -> 106
    assert_eq!(&bytes[1..3], &[0x18, 105]);
    bytes[2] = 106;
    assert!(matches!(
        decode_operation(&bytes),
        Err(CoreError::UnknownOperation(106))
    ));
}

#[test]
fn test_names_are_stable() {
    for vector in CATALOG {
        let kind = OperationKind::from_u16(vector.ordinal).unwrap();
        assert_eq!(kind.to_string(), vector.name);
    }
}
