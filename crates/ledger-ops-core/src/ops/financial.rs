//! System credit, peer credit offers and collateralized pledge offers.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{
    check_non_negative, check_object, check_percent, check_positive, ensure, ValidationContext,
};

/// Longest loan term, in days.
pub const MAX_CREDIT_DAYS: u32 = 365;

fn check_offer(offer: &ObjectId) -> Result<(), ValidationError> {
    check_object("credit_offer", offer, ObjectType::CreditOffer)
}

fn check_pledge(pledge: &ObjectId) -> Result<(), ValidationError> {
    check_object("pledge_offer", pledge, ObjectType::PledgeOffer)
}

/// Take a loan from the system credit pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSystemGetOperation {
    pub fee: AssetAmount,
    pub debitor: AccountId,
    pub credit_amount: AssetAmount,
}

impl OperationBody for CreditSystemGetOperation {
    fee_paid_by!(debitor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("credit_amount", &self.credit_amount)
    }
}

/// Virtual: a system loan was settled in full at maturity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditTotalRepayOperation {
    pub fee: AssetAmount,
    pub debitor: AccountId,
    pub creditor: AccountId,
    pub total_repay: AssetAmount,
}

impl OperationBody for CreditTotalRepayOperation {
    fee_paid_by!(debitor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_non_negative("total_repay", &self.total_repay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRepayOperation {
    pub fee: AssetAmount,
    pub debitor: AccountId,
    pub creditor: AccountId,
    pub repay_amount: AssetAmount,
}

impl OperationBody for CreditRepayOperation {
    fee_paid_by!(debitor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("repay_amount", &self.repay_amount)
    }
}

/// Offer a loan to the market at a fixed rate and term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditOfferCreateOperation {
    pub fee: AssetAmount,
    pub creditor: AccountId,
    pub credit_amount: AssetAmount,
    pub min_loan: i64,
    /// Interest for the whole term, in basis points.
    pub interest_rate: u16,
    pub repay_period_days: u32,
}

impl OperationBody for CreditOfferCreateOperation {
    fee_paid_by!(creditor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("credit_amount", &self.credit_amount)?;
        ensure(
            self.min_loan > 0 && self.min_loan <= self.credit_amount.amount,
            "min_loan",
            "must be positive and at most the offered amount",
        )?;
        check_percent("interest_rate", self.interest_rate)?;
        ensure(
            (1..=MAX_CREDIT_DAYS).contains(&self.repay_period_days),
            "repay_period_days",
            "term out of range",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditOfferCancelOperation {
    pub fee: AssetAmount,
    pub creditor: AccountId,
    pub credit_offer: ObjectId,
}

impl OperationBody for CreditOfferCancelOperation {
    fee_paid_by!(creditor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_offer(&self.credit_offer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditOfferFillOperation {
    pub fee: AssetAmount,
    pub debitor: AccountId,
    pub credit_offer: ObjectId,
    pub credit_amount: AssetAmount,
}

impl OperationBody for CreditOfferFillOperation {
    fee_paid_by!(debitor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_offer(&self.credit_offer)?;
        check_positive("credit_amount", &self.credit_amount)
    }
}

/// The economic terms shared by both sides of a pledge offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeTerms {
    pub pledge_amount: AssetAmount,
    pub credit_amount: AssetAmount,
    pub repay_amount: AssetAmount,
    pub pledge_days: u32,
}

impl PledgeTerms {
    fn validate(&self) -> Result<(), ValidationError> {
        check_positive("pledge_amount", &self.pledge_amount)?;
        check_positive("credit_amount", &self.credit_amount)?;
        check_positive("repay_amount", &self.repay_amount)?;
        ensure(
            self.pledge_amount.asset_id != self.credit_amount.asset_id,
            "pledge_amount",
            "pledge and credit must be different assets",
        )?;
        ensure(
            self.repay_amount.asset_id == self.credit_amount.asset_id,
            "repay_amount",
            "must be repaid in the credited asset",
        )?;
        ensure(
            self.repay_amount.amount >= self.credit_amount.amount,
            "repay_amount",
            "must cover the credit",
        )?;
        ensure(
            (1..=MAX_CREDIT_DAYS).contains(&self.pledge_days),
            "pledge_days",
            "term out of range",
        )
    }
}

/// A lender offers credit against a pledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeOfferGiveCreateOperation {
    pub fee: AssetAmount,
    pub creditor: AccountId,
    pub terms: PledgeTerms,
}

impl OperationBody for PledgeOfferGiveCreateOperation {
    fee_paid_by!(creditor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        self.terms.validate()
    }
}

/// A borrower offers a pledge in exchange for credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeOfferTakeCreateOperation {
    pub fee: AssetAmount,
    pub debitor: AccountId,
    pub terms: PledgeTerms,
}

impl OperationBody for PledgeOfferTakeCreateOperation {
    fee_paid_by!(debitor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        self.terms.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeOfferCancelOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub pledge_offer: ObjectId,
}

impl OperationBody for PledgeOfferCancelOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_pledge(&self.pledge_offer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeOfferFillOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub pledge_offer: ObjectId,
}

impl OperationBody for PledgeOfferFillOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_pledge(&self.pledge_offer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeOfferRepayOperation {
    pub fee: AssetAmount,
    pub debitor: AccountId,
    pub creditor: AccountId,
    pub pledge_offer: ObjectId,
    pub repay_amount: AssetAmount,
}

impl OperationBody for PledgeOfferRepayOperation {
    fee_paid_by!(debitor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_pledge(&self.pledge_offer)?;
        check_positive("repay_amount", &self.repay_amount)
    }
}

/// Virtual: an overdue pledge was forfeited to the creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeOfferAutoRepayOperation {
    pub fee: AssetAmount,
    pub debitor: AccountId,
    pub creditor: AccountId,
    pub pledge_offer: ObjectId,
    pub pledge_amount: AssetAmount,
}

impl OperationBody for PledgeOfferAutoRepayOperation {
    fee_paid_by!(debitor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_pledge(&self.pledge_offer)?;
        check_non_negative("pledge_amount", &self.pledge_amount)
    }
}
