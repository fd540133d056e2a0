//! # Ledger Ops Core
//!
//! Pure primitives for ledger transactions: the operation catalog, the
//! validation dispatcher, the authority resolver and canonicalization.
//!
//! This crate contains no I/O, no storage, no networking and no logging.
//! Every public function is a deterministic function of its arguments.
//!
//! ## Key Types
//!
//! - [`Operation`] - One of the protocol's closed set of operation kinds
//! - [`OperationKind`] - The permanent wire ordinal of an operation
//! - [`OpWrapper`] - An operation embedded inside a proposal
//! - [`RequiredAuthorities`] - Which accounts and authorities must sign
//! - [`Transaction`] - An ordered list of operations
//!
//! ## Canonicalization
//!
//! Operations and transactions are encoded using deterministic CBOR. See the
//! [`canonical`] module.

pub mod authority;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod ops;
pub mod transaction;
pub mod types;
pub mod validation;

pub use authority::{required_authorities, Authority, RequiredAuthorities};
pub use canonical::{
    canonical_bytes, decode_operation, decode_transaction, encode_operation, encode_transaction,
};
pub use crypto::{Blake3Hash, Ed25519PublicKey, Keypair};
pub use error::{CoreError, ValidationError};
pub use ops::{OpWrapper, Operation, OperationBody, OperationFamily, OperationKind};
pub use transaction::{Transaction, TransactionBuilder};
pub use types::{AccountId, AssetAmount, AssetId, ObjectId, ObjectType, Price, TransactionId};
pub use validation::{
    validate, validate_with, ValidationContext, ValidationLimits, ValidationMode,
};
