//! The transaction checker: validation plus authority resolution.
//!
//! Checking is pure computation. Batches fan out over tokio's blocking pool,
//! bounded by a semaphore, and come back in input order.

use std::sync::Arc;

use ledger_ops_core::{
    validate_with, Operation, RequiredAuthorities, Transaction, TransactionId, ValidationContext,
};
use tokio::sync::Semaphore;

use crate::config::CheckerConfig;
use crate::error::{CheckError, Result};

/// What a transaction needs before it can be applied: the signatures to
/// collect, keyed by the transaction id they must sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityReport {
    pub transaction_id: TransactionId,
    pub operation_count: usize,
    pub authorities: RequiredAuthorities,
}

impl AuthorityReport {
    /// Number of distinct accounts plus embedded authorities that must sign.
    pub fn signer_count(&self) -> usize {
        self.authorities.accounts().len() + self.authorities.other.len()
    }
}

/// Checks transactions against a fixed configuration.
///
/// Cheap to clone; clones share the configuration.
#[derive(Debug, Clone)]
pub struct TransactionChecker {
    config: Arc<CheckerConfig>,
    ctx: ValidationContext,
}

impl TransactionChecker {
    pub fn new(config: CheckerConfig) -> Result<Self> {
        config.validate()?;
        let ctx = config.validation_context();
        Ok(Self {
            config: Arc::new(config),
            ctx,
        })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Validate a transaction and report the signatures it requires.
    pub fn check(&self, tx: &Transaction) -> Result<AuthorityReport> {
        let span = tracing::info_span!("check", operations = tx.len());
        let _enter = span.enter();

        match self.check_inner(tx) {
            Ok(report) => {
                tracing::debug!(
                    id = %report.transaction_id,
                    signers = report.signer_count(),
                    "transaction accepted"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!("transaction rejected: {}", e);
                Err(e)
            }
        }
    }

    fn check_inner(&self, tx: &Transaction) -> Result<AuthorityReport> {
        let max = self.config.max_operations_per_transaction;
        if tx.len() > max {
            return Err(CheckError::TooManyOperations {
                count: tx.len(),
                max,
            });
        }
        tx.validate(&self.ctx)?;
        Ok(AuthorityReport {
            transaction_id: tx.id()?,
            operation_count: tx.len(),
            authorities: tx.required_authorities(),
        })
    }

    /// Validate a single operation and return what it requires.
    pub fn check_operation(&self, op: &Operation) -> Result<RequiredAuthorities> {
        validate_with(op, &self.ctx).map_err(|e| {
            tracing::warn!(kind = %op.kind(), "operation rejected: {}", e);
            CheckError::from(e)
        })?;
        Ok(op.required_authorities())
    }

    /// Check many transactions concurrently.
    ///
    /// At most `batch_concurrency` checks run at once. The result for
    /// `txs[i]` is at index `i`; one failing transaction does not affect the
    /// others.
    pub async fn check_batch(&self, txs: Vec<Transaction>) -> Vec<Result<AuthorityReport>> {
        let semaphore = Arc::new(Semaphore::new(self.config.batch_concurrency));
        let mut handles = Vec::with_capacity(txs.len());

        for tx in txs {
            let checker = self.clone();
            let semaphore = semaphore.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| CheckError::TaskFailed(e.to_string()))?;
                tokio::task::spawn_blocking(move || checker.check(&tx))
                    .await
                    .map_err(|e| CheckError::TaskFailed(format!("spawn_blocking failed: {}", e)))?
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(match handle.await {
                Ok(result) => result,
                Err(e) => Err(CheckError::TaskFailed(e.to_string())),
            });
        }
        tracing::debug!(
            total = results.len(),
            rejected = results.iter().filter(|r| r.is_err()).count(),
            "batch checked"
        );
        results
    }
}

impl Default for TransactionChecker {
    fn default() -> Self {
        let config = CheckerConfig::default();
        let ctx = config.validation_context();
        Self {
            config: Arc::new(config),
            ctx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_ops_core::{
        AccountId, AssetAmount, TransactionBuilder, ValidationError,
    };
    use ledger_ops_core::ops::TransferOperation;

    fn transfer(from: u64, to: u64, amount: i64) -> TransferOperation {
        TransferOperation {
            fee: AssetAmount::core(1),
            from: AccountId(from),
            to: AccountId(to),
            amount: AssetAmount::core(amount),
            memo: None,
        }
    }

    #[test]
    fn test_check_reports_authorities() {
        let checker = TransactionChecker::default();
        let tx = TransactionBuilder::new()
            .operation(transfer(1, 2, 5))
            .operation(transfer(3, 2, 5))
            .build();
        let report = checker.check(&tx).unwrap();
        assert_eq!(report.operation_count, 2);
        assert_eq!(report.signer_count(), 2);
        assert_eq!(report.transaction_id, tx.id().unwrap());
    }

    #[test]
    fn test_operation_limit() {
        let config = CheckerConfig {
            max_operations_per_transaction: 1,
            ..CheckerConfig::default()
        };
        let checker = TransactionChecker::new(config).unwrap();
        let tx = TransactionBuilder::new()
            .operation(transfer(1, 2, 5))
            .operation(transfer(1, 3, 5))
            .build();
        assert!(matches!(
            checker.check(&tx),
            Err(CheckError::TooManyOperations { count: 2, max: 1 })
        ));
    }

    #[test]
    fn test_check_operation() {
        let checker = TransactionChecker::default();
        let required = checker
            .check_operation(&transfer(1, 2, 5).into())
            .unwrap();
        assert!(required.active.contains(&AccountId(1)));

        assert!(matches!(
            checker.check_operation(&transfer(1, 2, 0).into()),
            Err(CheckError::Validation(ValidationError::MalformedField { .. }))
        ));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = CheckerConfig {
            batch_concurrency: 0,
            ..CheckerConfig::default()
        };
        assert!(TransactionChecker::new(config).is_err());
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let checker = TransactionChecker::default();
        let txs: Vec<Transaction> = (0..20)
            .map(|i| {
                let amount = if i % 3 == 0 { -1 } else { 10 };
                TransactionBuilder::new()
                    .expiration(i)
                    .operation(transfer(1, 2, amount))
                    .build()
            })
            .collect();
        let expected: Vec<_> = txs.iter().map(|tx| tx.id().unwrap()).collect();

        let results = checker.check_batch(txs).await;
        assert_eq!(results.len(), 20);
        for (i, result) in results.iter().enumerate() {
            if i % 3 == 0 {
                assert!(result.is_err());
            } else {
                assert_eq!(result.as_ref().unwrap().transaction_id, expected[i]);
            }
        }
    }
}
