//! Checker configuration.

use ledger_ops_core::{ValidationContext, ValidationLimits, ValidationMode};
use serde::{Deserialize, Serialize};

use crate::error::{CheckError, Result};

/// Default bound on operations per transaction.
pub const DEFAULT_MAX_OPERATIONS_PER_TRANSACTION: usize = 512;

/// Default number of transactions checked at once by `check_batch`.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;

/// Configuration for the [`TransactionChecker`](crate::TransactionChecker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Entry path: `external` refuses virtual operations.
    pub mode: ValidationMode,
    /// Proposal nesting and size bounds.
    pub limits: ValidationLimits,
    pub max_operations_per_transaction: usize,
    pub batch_concurrency: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::External,
            limits: ValidationLimits::default(),
            max_operations_per_transaction: DEFAULT_MAX_OPERATIONS_PER_TRANSACTION,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl CheckerConfig {
    /// Configuration for replaying chain-produced transactions.
    pub fn internal() -> Self {
        Self {
            mode: ValidationMode::Internal,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CheckError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_operations_per_transaction == 0 {
            return Err(CheckError::InvalidConfig(
                "max_operations_per_transaction must be positive".into(),
            ));
        }
        if self.batch_concurrency == 0 {
            return Err(CheckError::InvalidConfig(
                "batch_concurrency must be positive".into(),
            ));
        }
        if self.limits.max_nesting_depth == 0 {
            return Err(CheckError::InvalidConfig(
                "limits.max_nesting_depth must be positive".into(),
            ));
        }
        if self.limits.max_proposed_operations == 0 {
            return Err(CheckError::InvalidConfig(
                "limits.max_proposed_operations must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn validation_context(&self) -> ValidationContext {
        ValidationContext::new(self.mode, self.limits)
    }
}
