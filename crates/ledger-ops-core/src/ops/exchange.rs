//! Peer-to-peer exchange: gateways post adverts, clients open orders
//! against them, and disputes go to an arbitrator.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{
    check_distinct, check_non_negative, check_object, check_positive, check_text, ensure,
    ValidationContext,
};

/// Maximum length of free text on adverts and disputes.
pub const MAX_P2P_TEXT: usize = 1000;

/// Whether the gateway buys or sells the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum P2pAdvType {
    Buy,
    Sell,
}

/// The commercial terms of a p2p advert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct P2pAdvTerms {
    pub adv_type: P2pAdvType,
    /// Three-letter fiat currency code.
    pub currency: String,
    /// Fiat units per whole asset unit, scaled by the asset precision.
    pub price: i64,
    pub min_amount: i64,
    pub max_amount: i64,
    pub timelimit_for_reply: u32,
    pub timelimit_for_approve: u32,
    pub description: String,
}

impl P2pAdvTerms {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure(
            self.currency.len() == 3 && self.currency.bytes().all(|b| b.is_ascii_uppercase()),
            "currency",
            "must be a three-letter currency code",
        )?;
        ensure(self.price > 0, "price", "must be positive")?;
        ensure(
            self.min_amount > 0 && self.min_amount <= self.max_amount,
            "min_amount",
            "must be positive and at most max_amount",
        )?;
        ensure(
            self.timelimit_for_reply > 0 && self.timelimit_for_approve > 0,
            "timelimit_for_reply",
            "time limits must be positive",
        )?;
        check_text("description", &self.description, 0, MAX_P2P_TEXT)
    }
}

fn check_adv(adv: &ObjectId) -> Result<(), ValidationError> {
    check_object("p2p_adv", adv, ObjectType::P2pAdv)
}

fn check_order(order: &ObjectId) -> Result<(), ValidationError> {
    check_object("p2p_order", order, ObjectType::P2pOrder)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateP2pAdvOperation {
    pub fee: AssetAmount,
    pub p2p_gateway: AccountId,
    pub terms: P2pAdvTerms,
}

impl OperationBody for CreateP2pAdvOperation {
    fee_paid_by!(p2p_gateway);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        self.terms.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditP2pAdvOperation {
    pub fee: AssetAmount,
    pub p2p_adv: ObjectId,
    pub p2p_gateway: AccountId,
    pub terms: P2pAdvTerms,
}

impl OperationBody for EditP2pAdvOperation {
    fee_paid_by!(p2p_gateway);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_adv(&self.p2p_adv)?;
        self.terms.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearP2pAdvBlackListOperation {
    pub fee: AssetAmount,
    pub p2p_adv: ObjectId,
    pub p2p_gateway: AccountId,
}

impl OperationBody for ClearP2pAdvBlackListOperation {
    fee_paid_by!(p2p_gateway);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_adv(&self.p2p_adv)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromP2pAdvBlackListOperation {
    pub fee: AssetAmount,
    pub p2p_adv: ObjectId,
    pub p2p_gateway: AccountId,
    pub blacklisted: AccountId,
}

impl OperationBody for RemoveFromP2pAdvBlackListOperation {
    fee_paid_by!(p2p_gateway);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_adv(&self.p2p_adv)?;
        check_distinct("blacklisted", self.p2p_gateway, self.blacklisted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateP2pOrderOperation {
    pub fee: AssetAmount,
    pub p2p_adv: ObjectId,
    pub p2p_client: AccountId,
    pub amount: AssetAmount,
    pub price: i64,
}

impl OperationBody for CreateP2pOrderOperation {
    fee_paid_by!(p2p_client);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_adv(&self.p2p_adv)?;
        check_positive("amount", &self.amount)?;
        ensure(self.price > 0, "price", "must be positive")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelP2pOrderOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub p2p_client: AccountId,
}

impl OperationBody for CancelP2pOrderOperation {
    fee_paid_by!(p2p_client);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)
    }
}

/// Virtual: the gateway did not reply in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocancelP2pOrderOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub p2p_gateway: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for AutocancelP2pOrderOperation {
    fee_paid_by!(p2p_gateway);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)?;
        check_non_negative("amount", &self.amount)
    }
}

/// Virtual: the order lapsed and the client's escrow was returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutorefundP2pOrderOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub p2p_client: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for AutorefundP2pOrderOperation {
    fee_paid_by!(p2p_client);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)?;
        check_non_negative("amount", &self.amount)
    }
}

/// The gateway accepts an order and publishes where to pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallP2pOrderOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub p2p_gateway: AccountId,
    pub payment_details: String,
}

impl OperationBody for CallP2pOrderOperation {
    fee_paid_by!(p2p_gateway);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)?;
        check_text("payment_details", &self.payment_details, 1, MAX_P2P_TEXT)
    }
}

/// The paying side marks the off-chain payment as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentP2pOrderOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub payer: AccountId,
}

impl OperationBody for PaymentP2pOrderOperation {
    fee_paid_by!(payer);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseP2pOrderOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub releaser: AccountId,
}

impl OperationBody for ReleaseP2pOrderOperation {
    fee_paid_by!(releaser);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenP2pDisputeOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub account: AccountId,
    pub reason: String,
}

impl OperationBody for OpenP2pDisputeOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)?;
        check_text("reason", &self.reason, 1, MAX_P2P_TEXT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyP2pDisputeOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub account: AccountId,
    pub reply: String,
}

impl OperationBody for ReplyP2pDisputeOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)?;
        check_text("reply", &self.reply, 1, MAX_P2P_TEXT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveP2pDisputeOperation {
    pub fee: AssetAmount,
    pub p2p_order: ObjectId,
    pub arbitrator: AccountId,
    pub winner: AccountId,
    pub looser: AccountId,
}

impl OperationBody for ResolveP2pDisputeOperation {
    fee_paid_by!(arbitrator);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_order(&self.p2p_order)?;
        check_distinct("looser", self.winner, self.looser)?;
        check_distinct("winner", self.arbitrator, self.winner)?;
        check_distinct("looser", self.arbitrator, self.looser)
    }
}
