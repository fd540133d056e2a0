//! User-issued and market-pegged asset management.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::authority::RequiredAuthorities;
use crate::error::ValidationError;
use crate::ops::transfer::{check_memo, Memo};
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, AssetId, ObjectId, ObjectType, Price};
use crate::validation::{
    check_asset_symbol, check_distinct, check_non_negative, check_object, check_percent,
    check_positive, check_price, check_text, ensure, ValidationContext, MAX_SHARE_SUPPLY,
};

/// Maximum decimal precision of an asset.
pub const MAX_ASSET_PRECISION: u8 = 12;

/// Maximum number of feed producers of one asset.
pub const MAX_FEED_PRODUCERS: usize = 200;

/// Maximum length of an asset description.
pub const MAX_ASSET_DESCRIPTION: usize = 1000;

/// Bounds on collateral ratios, in thousandths.
pub const MIN_COLLATERAL_RATIO: u16 = 1001;
pub const MAX_COLLATERAL_RATIO: u16 = 32000;

/// All permission bits an issuer may hold.
pub const ASSET_ISSUER_PERMISSION_MASK: u16 = 0x01ff;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptions {
    pub max_supply: i64,
    pub market_fee_percent: u16,
    pub max_market_fee: i64,
    pub issuer_permissions: u16,
    pub flags: u16,
    pub core_exchange_rate: Price,
    pub description: String,
}

impl AssetOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure(
            self.max_supply > 0 && self.max_supply <= MAX_SHARE_SUPPLY,
            "max_supply",
            "must be positive and within the share supply bound",
        )?;
        check_percent("market_fee_percent", self.market_fee_percent)?;
        ensure(
            (0..=MAX_SHARE_SUPPLY).contains(&self.max_market_fee),
            "max_market_fee",
            "out of range",
        )?;
        ensure(
            self.issuer_permissions & !ASSET_ISSUER_PERMISSION_MASK == 0,
            "issuer_permissions",
            "unknown permission bits",
        )?;
        ensure(
            self.flags & !self.issuer_permissions == 0,
            "flags",
            "flags must be a subset of issuer permissions",
        )?;
        check_price("core_exchange_rate", &self.core_exchange_rate)?;
        ensure(
            self.core_exchange_rate.base.asset_id == AssetId::CORE
                || self.core_exchange_rate.quote.asset_id == AssetId::CORE,
            "core_exchange_rate",
            "must be quoted against the core asset",
        )?;
        check_text("description", &self.description, 0, MAX_ASSET_DESCRIPTION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitassetOptions {
    pub feed_lifetime_sec: u32,
    pub minimum_feeds: u8,
    pub force_settlement_delay_sec: u32,
    pub force_settlement_offset_percent: u16,
    pub maximum_force_settlement_volume: u16,
    pub short_backing_asset: AssetId,
}

impl BitassetOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure(self.minimum_feeds > 0, "minimum_feeds", "must be positive")?;
        ensure(self.feed_lifetime_sec > 0, "feed_lifetime_sec", "must be positive")?;
        check_percent(
            "force_settlement_offset_percent",
            self.force_settlement_offset_percent,
        )?;
        check_percent(
            "maximum_force_settlement_volume",
            self.maximum_force_settlement_volume,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeed {
    pub settlement_price: Price,
    pub core_exchange_rate: Price,
    pub maintenance_collateral_ratio: u16,
    pub maximum_short_squeeze_ratio: u16,
}

impl PriceFeed {
    fn validate(&self) -> Result<(), ValidationError> {
        check_price("settlement_price", &self.settlement_price)?;
        check_price("core_exchange_rate", &self.core_exchange_rate)?;
        ensure(
            (MIN_COLLATERAL_RATIO..=MAX_COLLATERAL_RATIO)
                .contains(&self.maintenance_collateral_ratio),
            "maintenance_collateral_ratio",
            "out of range",
        )?;
        ensure(
            (MIN_COLLATERAL_RATIO..=MAX_COLLATERAL_RATIO)
                .contains(&self.maximum_short_squeeze_ratio),
            "maximum_short_squeeze_ratio",
            "out of range",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCreateOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub symbol: String,
    pub precision: u8,
    pub common_options: AssetOptions,
    pub bitasset_opts: Option<BitassetOptions>,
    pub is_prediction_market: bool,
}

impl OperationBody for AssetCreateOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_asset_symbol("symbol", &self.symbol)?;
        ensure(
            self.precision <= MAX_ASSET_PRECISION,
            "precision",
            "too many decimal places",
        )?;
        self.common_options.validate()?;
        if let Some(bitasset) = &self.bitasset_opts {
            bitasset.validate()?;
        }
        ensure(
            !self.is_prediction_market || self.bitasset_opts.is_some(),
            "bitasset_opts",
            "prediction markets must be market-pegged",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdateOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_issuer: Option<AccountId>,
    pub new_options: AssetOptions,
}

impl OperationBody for AssetUpdateOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        if let Some(new_issuer) = self.new_issuer {
            check_distinct("new_issuer", self.issuer, new_issuer)?;
        }
        self.new_options.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdateBitassetOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_options: BitassetOptions,
}

impl OperationBody for AssetUpdateBitassetOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        self.new_options.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdateFeedProducersOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_feed_producers: BTreeSet<AccountId>,
}

impl OperationBody for AssetUpdateFeedProducersOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.new_feed_producers.len() <= MAX_FEED_PRODUCERS,
            "new_feed_producers",
            "too many feed producers",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIssueOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_issue: AssetAmount,
    pub issue_to_account: AccountId,
    pub memo: Option<Memo>,
}

impl OperationBody for AssetIssueOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("asset_to_issue", &self.asset_to_issue)?;
        ensure(
            self.asset_to_issue.asset_id != AssetId::CORE,
            "asset_to_issue",
            "the core asset cannot be issued",
        )?;
        check_memo("memo", &self.memo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReserveOperation {
    pub fee: AssetAmount,
    pub payer: AccountId,
    pub amount_to_reserve: AssetAmount,
}

impl OperationBody for AssetReserveOperation {
    fee_paid_by!(payer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount_to_reserve", &self.amount_to_reserve)
    }
}

/// Add core asset to an asset's fee pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFundFeePoolOperation {
    pub fee: AssetAmount,
    pub from_account: AccountId,
    pub asset_id: AssetId,
    pub amount: i64,
}

impl OperationBody for AssetFundFeePoolOperation {
    fee_paid_by!(from_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &AssetAmount::core(self.amount))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSettleOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for AssetSettleOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount", &self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGlobalSettleOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_settle: AssetId,
    pub settle_price: Price,
}

impl OperationBody for AssetGlobalSettleOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_price("settle_price", &self.settle_price)?;
        ensure(
            self.settle_price.base.asset_id == self.asset_to_settle,
            "settle_price",
            "base must be the settled asset",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPublishFeedOperation {
    pub fee: AssetAmount,
    pub publisher: AccountId,
    pub asset_id: AssetId,
    pub feed: PriceFeed,
}

impl OperationBody for AssetPublishFeedOperation {
    fee_paid_by!(publisher);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        self.feed.validate()?;
        ensure(
            self.feed.settlement_price.base.asset_id == self.asset_id,
            "feed",
            "settlement price must be quoted in the fed asset",
        )
    }
}

/// Virtual: a pending force settlement was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSettleCancelOperation {
    pub fee: AssetAmount,
    pub settlement: ObjectId,
    pub account: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for AssetSettleCancelOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("settlement", &self.settlement, ObjectType::ForceSettlement)?;
        check_positive("amount", &self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClaimFeesOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub amount_to_claim: AssetAmount,
}

impl OperationBody for AssetClaimFeesOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount_to_claim", &self.amount_to_claim)
    }
}

/// Virtual: fee-backed asset revenue paid out to a designated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FbaDistributeOperation {
    pub fee: AssetAmount,
    pub account_id: AccountId,
    pub fba_id: u64,
    pub amount: i64,
}

impl OperationBody for FbaDistributeOperation {
    fee_paid_by!(account_id);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_non_negative("amount", &AssetAmount::core(self.amount))
    }
}

/// Bid on the collateral of a globally settled asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidCollateralOperation {
    pub fee: AssetAmount,
    pub bidder: AccountId,
    pub additional_collateral: AssetAmount,
    pub debt_covered: AssetAmount,
}

impl OperationBody for BidCollateralOperation {
    fee_paid_by!(bidder);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_non_negative("additional_collateral", &self.additional_collateral)?;
        check_non_negative("debt_covered", &self.debt_covered)?;
        ensure(
            self.additional_collateral.asset_id != self.debt_covered.asset_id,
            "debt_covered",
            "collateral and debt must be different assets",
        )
    }
}

/// Virtual: a collateral bid was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteBidOperation {
    pub fee: AssetAmount,
    pub bidder: AccountId,
    pub debt: AssetAmount,
    pub collateral: AssetAmount,
}

impl OperationBody for ExecuteBidOperation {
    fee_paid_by!(bidder);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_non_negative("debt", &self.debt)?;
        check_non_negative("collateral", &self.collateral)
    }
}

/// Withdraw core asset from an asset's fee pool back to the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClaimPoolOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_id: AssetId,
    pub amount_to_claim: AssetAmount,
}

impl OperationBody for AssetClaimPoolOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("amount_to_claim", &self.amount_to_claim)?;
        ensure(
            self.asset_id != self.amount_to_claim.asset_id,
            "amount_to_claim",
            "the pool holds a different asset than the one it backs",
        )
    }
}

/// Hand an asset to a new issuer. This needs the current issuer's owner
/// authority rather than active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdateIssuerOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_issuer: AccountId,
}

impl OperationBody for AssetUpdateIssuerOperation {
    fee_paid_by!(issuer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_distinct("new_issuer", self.issuer, self.new_issuer)
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        required.require_owner(self.issuer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> AssetOptions {
        AssetOptions {
            max_supply: 1_000_000,
            market_fee_percent: 100,
            max_market_fee: 1_000,
            issuer_permissions: 0x0f,
            flags: 0x03,
            core_exchange_rate: Price::new(AssetAmount::core(1), AssetAmount::new(1, AssetId(9))),
            description: "test asset".into(),
        }
    }

    fn create() -> AssetCreateOperation {
        AssetCreateOperation {
            fee: AssetAmount::core(100),
            issuer: AccountId(12),
            symbol: "GOLD".into(),
            precision: 5,
            common_options: options(),
            bitasset_opts: None,
            is_prediction_market: false,
        }
    }

    #[test]
    fn test_asset_create_valid() {
        assert!(create().validate(&ValidationContext::external()).is_ok());
    }

    #[test]
    fn test_flags_outside_permissions_rejected() {
        let mut op = create();
        op.common_options.flags = 0x10;
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField { field: "flags", .. })
        ));
    }

    #[test]
    fn test_precision_bound() {
        let mut op = create();
        op.precision = MAX_ASSET_PRECISION + 1;
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_prediction_market_needs_bitasset() {
        let mut op = create();
        op.is_prediction_market = true;
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_core_asset_cannot_be_issued() {
        let op = AssetIssueOperation {
            fee: AssetAmount::core(1),
            issuer: AccountId(12),
            asset_to_issue: AssetAmount::core(10),
            issue_to_account: AccountId(13),
            memo: None,
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_feed_ratio_bounds() {
        let feed = PriceFeed {
            settlement_price: Price::new(AssetAmount::new(1, AssetId(9)), AssetAmount::core(20)),
            core_exchange_rate: Price::new(AssetAmount::new(1, AssetId(9)), AssetAmount::core(21)),
            maintenance_collateral_ratio: 1750,
            maximum_short_squeeze_ratio: 1000,
        };
        let op = AssetPublishFeedOperation {
            fee: AssetAmount::core(1),
            publisher: AccountId(30),
            asset_id: AssetId(9),
            feed,
        };
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField {
                field: "maximum_short_squeeze_ratio",
                ..
            })
        ));
    }

    #[test]
    fn test_update_issuer_requires_owner() {
        let op = AssetUpdateIssuerOperation {
            fee: AssetAmount::core(1),
            issuer: AccountId(12),
            asset_to_update: AssetId(9),
            new_issuer: AccountId(13),
        };
        let mut required = RequiredAuthorities::new();
        op.collect_authorities(&mut required);
        assert!(required.owner.contains(&AccountId(12)));
    }
}
