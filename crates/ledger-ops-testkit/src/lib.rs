//! # Ledger Ops Testkit
//!
//! Testing utilities for the ledger operation catalog.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: The pinned catalog table and one valid sample per kind
//! - **Generators**: Proptest strategies for operations and proposal trees
//! - **Fixtures**: Named accounts and builders for test transactions
//!
//! ## Golden Vectors
//!
//! The catalog table guards the wire ordinals, which may never change:
//!
//! ```rust
//! use ledger_ops_testkit::vectors::verify_catalog;
//!
//! assert!(verify_catalog().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ledger_ops_testkit::generators::{proposal_depth, proposal_tree};
//!
//! proptest! {
//!     #[test]
//!     fn depth_is_bounded(op in proposal_tree(5)) {
//!         let ok = ledger_ops_core::validate(&op).is_ok();
//!         prop_assert!(!ok || proposal_depth(&op) <= 3);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ledger_ops_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let tx = fixture.transaction([fixture.transfer(&fixture.alice, &fixture.bob, 100)]);
//! assert_eq!(tx.len(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{account, key, Party, TestFixture};
pub use generators::{proposal_depth, proposal_tree, transaction_from_params, TransactionParams};
pub use vectors::{all_samples, sample_operation, verify_catalog, CatalogVector, CATALOG};
