//! # Ledger Ops
//!
//! Transaction checking for the ledger operation catalog.
//!
//! ## Overview
//!
//! Before a transaction is applied, a node must know two things about it:
//!
//! - **Is it well formed?** Every operation passes its stateless checks, and
//!   no virtual operation arrives from outside the chain.
//! - **Who must sign?** The union of every operation's required active,
//!   owner and embedded authorities, proposals included.
//!
//! [`TransactionChecker`] answers both, one transaction at a time or as a
//! concurrent batch.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ledger_ops::{CheckerConfig, TransactionChecker};
//! use ledger_ops::core::{AccountId, AssetAmount, TransactionBuilder};
//! use ledger_ops::core::ops::TransferOperation;
//!
//! async fn example() {
//!     let checker = TransactionChecker::new(CheckerConfig::default()).unwrap();
//!
//!     let tx = TransactionBuilder::new()
//!         .expiration(1_700_000_000)
//!         .operation(TransferOperation {
//!             fee: AssetAmount::core(20),
//!             from: AccountId(17),
//!             to: AccountId(42),
//!             amount: AssetAmount::core(1_000),
//!             memo: None,
//!         })
//!         .build();
//!
//!     let report = checker.check(&tx).unwrap();
//!     assert!(report.authorities.active.contains(&AccountId(17)));
//!
//!     let results = checker.check_batch(vec![tx]).await;
//!     assert!(results[0].is_ok());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `ledger_ops::core` - The operation catalog, validation and authorities

pub mod checker;
pub mod config;
pub mod error;

pub use ledger_ops_core as core;

pub use checker::{AuthorityReport, TransactionChecker};
pub use config::{CheckerConfig, DEFAULT_BATCH_CONCURRENCY, DEFAULT_MAX_OPERATIONS_PER_TRANSACTION};
pub use error::{CheckError, Result};

pub use ledger_ops_core::{
    Operation, OperationKind, OpWrapper, RequiredAuthorities, Transaction, TransactionBuilder,
    TransactionId, ValidationError, ValidationMode,
};
