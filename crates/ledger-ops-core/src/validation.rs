//! Operation validation: structural checks only.
//!
//! Validation is a pure function of an operation's own fields. It never
//! looks at balances, object existence or chain time, so it can run on any
//! thread in any order and always gives the same answer for the same input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::Operation;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType, Price};

/// Default bound on how deeply proposals may nest inside proposals.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 3;

/// Default bound on the number of operations one proposal may carry.
pub const DEFAULT_MAX_PROPOSED_OPERATIONS: usize = 256;

/// Upper bound on any share amount or asset supply.
pub const MAX_SHARE_SUPPLY: i64 = 1_000_000_000_000_000;

/// 100% expressed in basis points.
pub const HUNDRED_PERCENT: u16 = 10_000;

/// Maximum length of a URL field.
pub const MAX_URL_LENGTH: usize = 127;

/// Which path an operation arrives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Submitted by an outside party. Virtual operations are refused.
    #[default]
    External,
    /// Produced while applying an evaluation result. Virtual operations
    /// are accepted.
    Internal,
}

/// Bounds applied while validating nested structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_nesting_depth: usize,
    pub max_proposed_operations: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_proposed_operations: DEFAULT_MAX_PROPOSED_OPERATIONS,
        }
    }
}

/// Everything validation may consult besides the operation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationContext {
    pub mode: ValidationMode,
    pub limits: ValidationLimits,
    depth: usize,
}

impl ValidationContext {
    pub fn new(mode: ValidationMode, limits: ValidationLimits) -> Self {
        Self {
            mode,
            limits,
            depth: 0,
        }
    }

    pub fn external() -> Self {
        Self::new(ValidationMode::External, ValidationLimits::default())
    }

    pub fn internal() -> Self {
        Self::new(ValidationMode::Internal, ValidationLimits::default())
    }

    /// How many proposals enclose the operation being validated.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The context for operations wrapped one proposal deeper.
    pub fn nested(&self) -> Result<Self, ValidationError> {
        let depth = self.depth + 1;
        if depth > self.limits.max_nesting_depth {
            return Err(ValidationError::NestedStructureTooDeep {
                depth,
                max: self.limits.max_nesting_depth,
            });
        }
        Ok(Self { depth, ..*self })
    }
}

/// Validate an operation as an externally submitted one, with default limits.
pub fn validate(op: &Operation) -> Result<(), ValidationError> {
    validate_with(op, &ValidationContext::external())
}

/// Validate an operation under an explicit entry mode and limits.
///
/// Returns the first violated constraint:
/// 1. virtual kinds on the external path
/// 2. a negative fee
/// 3. the variant's own structural rules
pub fn validate_with(op: &Operation, ctx: &ValidationContext) -> Result<(), ValidationError> {
    let kind = op.kind();
    if ctx.mode == ValidationMode::External && kind.is_virtual() {
        return Err(ValidationError::DisallowedVirtualSubmission(kind));
    }

    let body = op.body();
    check_fee(body.fee())?;
    body.validate(ctx)
}

pub(crate) fn ensure(
    condition: bool,
    field: &'static str,
    reason: &str,
) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::malformed(field, reason))
    }
}

pub(crate) fn check_fee(fee: &AssetAmount) -> Result<(), ValidationError> {
    ensure(fee.amount >= 0, "fee", "must not be negative")
}

pub(crate) fn check_positive(field: &'static str, amount: &AssetAmount) -> Result<(), ValidationError> {
    ensure(amount.amount > 0, field, "must be positive")?;
    ensure(amount.amount <= MAX_SHARE_SUPPLY, field, "exceeds maximum share supply")
}

pub(crate) fn check_non_negative(
    field: &'static str,
    amount: &AssetAmount,
) -> Result<(), ValidationError> {
    ensure(amount.amount >= 0, field, "must not be negative")?;
    ensure(amount.amount <= MAX_SHARE_SUPPLY, field, "exceeds maximum share supply")
}

pub(crate) fn check_object(
    field: &'static str,
    id: &ObjectId,
    expected: ObjectType,
) -> Result<(), ValidationError> {
    if id.is(expected) {
        Ok(())
    } else {
        Err(ValidationError::malformed(
            field,
            format!("{} is not a {:?} id", id, expected),
        ))
    }
}

pub(crate) fn check_distinct(
    field: &'static str,
    a: AccountId,
    b: AccountId,
) -> Result<(), ValidationError> {
    ensure(a != b, field, "accounts must differ")
}

pub(crate) fn check_percent(field: &'static str, value: u16) -> Result<(), ValidationError> {
    ensure(value <= HUNDRED_PERCENT, field, "exceeds 100%")
}

pub(crate) fn check_price(field: &'static str, price: &Price) -> Result<(), ValidationError> {
    ensure(price.is_well_formed(), field, "must be a positive rate between two assets")
}

pub(crate) fn check_text(
    field: &'static str,
    text: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len < min || len > max {
        return Err(ValidationError::malformed(
            field,
            format!("length {} outside {}..={}", len, min, max),
        ));
    }
    Ok(())
}

pub(crate) fn check_url(field: &'static str, url: &str) -> Result<(), ValidationError> {
    check_text(field, url, 0, MAX_URL_LENGTH)
}

/// Account names: 3..=63 chars of `a-z`, `0-9`, `-` and `.`, starting with
/// a letter and not ending with `-` or `.`.
pub(crate) fn check_account_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    check_text(field, name, 3, 63)?;
    let bytes = name.as_bytes();
    ensure(bytes[0].is_ascii_lowercase(), field, "must start with a letter")?;
    ensure(
        bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-' || *b == b'.'),
        field,
        "may only contain a-z, 0-9, '-' and '.'",
    )?;
    let last = bytes[bytes.len() - 1];
    ensure(last != b'-' && last != b'.', field, "must end with a letter or digit")
}

/// Asset symbols: 3..=16 chars of `A-Z`, `0-9` and `.`, starting with a
/// letter, at most one dot.
pub(crate) fn check_asset_symbol(field: &'static str, symbol: &str) -> Result<(), ValidationError> {
    check_text(field, symbol, 3, 16)?;
    let bytes = symbol.as_bytes();
    ensure(bytes[0].is_ascii_uppercase(), field, "must start with a letter")?;
    ensure(
        bytes
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || *b == b'.'),
        field,
        "may only contain A-Z, 0-9 and '.'",
    )?;
    ensure(
        bytes.iter().filter(|b| **b == b'.').count() <= 1,
        field,
        "may contain at most one '.'",
    )?;
    ensure(bytes[bytes.len() - 1] != b'.', field, "must not end with '.'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{FillOrderOperation, TransferOperation};
    use crate::types::AssetId;

    fn transfer(amount: i64) -> Operation {
        TransferOperation {
            fee: AssetAmount::core(10),
            from: AccountId(1),
            to: AccountId(2),
            amount: AssetAmount::core(amount),
            memo: None,
        }
        .into()
    }

    fn fill_order() -> Operation {
        FillOrderOperation {
            fee: AssetAmount::core(0),
            order_id: ObjectId::new(ObjectType::LimitOrder, 3),
            account_id: AccountId(1),
            pays: AssetAmount::core(100),
            receives: AssetAmount::new(5, AssetId(1)),
        }
        .into()
    }

    #[test]
    fn test_positive_transfer_is_valid() {
        assert!(validate(&transfer(100)).is_ok());
    }

    #[test]
    fn test_negative_transfer_is_malformed() {
        let result = validate(&transfer(-5));
        assert!(matches!(
            result,
            Err(ValidationError::MalformedField { field: "amount", .. })
        ));
    }

    #[test]
    fn test_negative_fee_is_malformed() {
        let mut op = TransferOperation {
            fee: AssetAmount::core(-1),
            from: AccountId(1),
            to: AccountId(2),
            amount: AssetAmount::core(1),
            memo: None,
        };
        let result = validate(&op.clone().into());
        assert!(matches!(
            result,
            Err(ValidationError::MalformedField { field: "fee", .. })
        ));

        op.fee = AssetAmount::core(0);
        assert!(validate(&op.into()).is_ok());
    }

    #[test]
    fn test_virtual_rejected_externally() {
        let result = validate(&fill_order());
        assert_eq!(
            result,
            Err(ValidationError::DisallowedVirtualSubmission(
                crate::ops::OperationKind::FillOrder
            ))
        );
    }

    #[test]
    fn test_virtual_accepted_internally() {
        assert!(validate_with(&fill_order(), &ValidationContext::internal()).is_ok());
    }

    #[test]
    fn test_nested_context_depth() {
        let ctx = ValidationContext::new(
            ValidationMode::External,
            ValidationLimits {
                max_nesting_depth: 2,
                ..Default::default()
            },
        );
        let one = ctx.nested().unwrap();
        let two = one.nested().unwrap();
        assert_eq!(two.depth(), 2);
        assert_eq!(
            two.nested(),
            Err(ValidationError::NestedStructureTooDeep { depth: 3, max: 2 })
        );
    }

    #[test]
    fn test_account_names() {
        assert!(check_account_name("name", "alice").is_ok());
        assert!(check_account_name("name", "bob-2.test").is_ok());
        assert!(check_account_name("name", "ab").is_err());
        assert!(check_account_name("name", "1abc").is_err());
        assert!(check_account_name("name", "Alice").is_err());
        assert!(check_account_name("name", "alice-").is_err());
    }

    #[test]
    fn test_asset_symbols() {
        assert!(check_asset_symbol("symbol", "GCWD").is_ok());
        assert!(check_asset_symbol("symbol", "BIT.USD").is_ok());
        assert!(check_asset_symbol("symbol", "usd").is_err());
        assert!(check_asset_symbol("symbol", "A.B.C").is_err());
        assert!(check_asset_symbol("symbol", "USD.").is_err());
    }
}
