//! Game zone: coin flips, goods lotteries and matrix rooms.
//!
//! Outcomes (wins, losses, refunds, closed rooms) are virtual: the chain
//! records them while settling a game, nobody submits them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{
    check_distinct, check_non_negative, check_object, check_positive, check_text, check_url,
    ensure, ValidationContext,
};

/// Maximum length of a lot description.
pub const MAX_LOT_DESCRIPTION: usize = 1000;

/// Number of matrix levels a player may open rooms on.
pub const MATRIX_LEVELS: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipcoinBetOperation {
    pub fee: AssetAmount,
    pub bettor: AccountId,
    pub bet: AssetAmount,
    pub nonce: u8,
}

impl OperationBody for FlipcoinBetOperation {
    fee_paid_by!(bettor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_positive("bet", &self.bet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipcoinCallOperation {
    pub fee: AssetAmount,
    pub flipcoin: ObjectId,
    pub caller: AccountId,
    pub bet: AssetAmount,
}

impl OperationBody for FlipcoinCallOperation {
    fee_paid_by!(caller);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("flipcoin", &self.flipcoin, ObjectType::Flipcoin)?;
        check_positive("bet", &self.bet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipcoinWinOperation {
    pub fee: AssetAmount,
    pub flipcoin: ObjectId,
    pub winner: AccountId,
    pub bet: AssetAmount,
    pub payout: AssetAmount,
}

impl OperationBody for FlipcoinWinOperation {
    fee_paid_by!(winner);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("flipcoin", &self.flipcoin, ObjectType::Flipcoin)?;
        check_non_negative("bet", &self.bet)?;
        check_non_negative("payout", &self.payout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipcoinCancelOperation {
    pub fee: AssetAmount,
    pub flipcoin: ObjectId,
    pub bettor: AccountId,
    pub bet: AssetAmount,
}

impl OperationBody for FlipcoinCancelOperation {
    fee_paid_by!(bettor);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("flipcoin", &self.flipcoin, ObjectType::Flipcoin)?;
        check_non_negative("bet", &self.bet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipcoinLooseOperation {
    pub fee: AssetAmount,
    pub flipcoin: ObjectId,
    pub looser: AccountId,
    pub bet: AssetAmount,
}

impl OperationBody for FlipcoinLooseOperation {
    fee_paid_by!(looser);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("flipcoin", &self.flipcoin, ObjectType::Flipcoin)?;
        check_non_negative("bet", &self.bet)
    }
}

/// Put goods up for a lottery among a fixed number of ticket holders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryGoodsCreateLotOperation {
    pub fee: AssetAmount,
    pub owner: AccountId,
    pub total_participants: u32,
    pub ticket_price: AssetAmount,
    pub latency_sec: u32,
    pub img_url: String,
    pub description: String,
}

impl OperationBody for LotteryGoodsCreateLotOperation {
    fee_paid_by!(owner);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.total_participants >= 2,
            "total_participants",
            "a lottery needs at least two participants",
        )?;
        check_positive("ticket_price", &self.ticket_price)?;
        check_url("img_url", &self.img_url)?;
        check_text("description", &self.description, 1, MAX_LOT_DESCRIPTION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryGoodsBuyTicketOperation {
    pub fee: AssetAmount,
    pub lot_id: ObjectId,
    pub participant: AccountId,
    pub ticket_price: AssetAmount,
}

impl OperationBody for LotteryGoodsBuyTicketOperation {
    fee_paid_by!(participant);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("lot_id", &self.lot_id, ObjectType::LotteryGoods)?;
        check_positive("ticket_price", &self.ticket_price)
    }
}

/// The winner tells the lot owner where to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryGoodsSendContactsOperation {
    pub fee: AssetAmount,
    pub lot_id: ObjectId,
    pub winner: AccountId,
    pub owner: AccountId,
}

impl OperationBody for LotteryGoodsSendContactsOperation {
    fee_paid_by!(winner);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("lot_id", &self.lot_id, ObjectType::LotteryGoods)?;
        check_distinct("owner", self.winner, self.owner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryGoodsConfirmDeliveryOperation {
    pub fee: AssetAmount,
    pub lot_id: ObjectId,
    pub winner: AccountId,
    pub owner: AccountId,
}

impl OperationBody for LotteryGoodsConfirmDeliveryOperation {
    fee_paid_by!(winner);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("lot_id", &self.lot_id, ObjectType::LotteryGoods)?;
        check_distinct("owner", self.winner, self.owner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryGoodsWinOperation {
    pub fee: AssetAmount,
    pub lot_id: ObjectId,
    pub winner: AccountId,
}

impl OperationBody for LotteryGoodsWinOperation {
    fee_paid_by!(winner);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("lot_id", &self.lot_id, ObjectType::LotteryGoods)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryGoodsLooseOperation {
    pub fee: AssetAmount,
    pub lot_id: ObjectId,
    pub looser: AccountId,
}

impl OperationBody for LotteryGoodsLooseOperation {
    fee_paid_by!(looser);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("lot_id", &self.lot_id, ObjectType::LotteryGoods)
    }
}

/// Virtual: a lot expired unfilled and a ticket was paid back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryGoodsRefundOperation {
    pub fee: AssetAmount,
    pub lot_id: ObjectId,
    pub participant: AccountId,
    pub amount: AssetAmount,
}

impl OperationBody for LotteryGoodsRefundOperation {
    fee_paid_by!(participant);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("lot_id", &self.lot_id, ObjectType::LotteryGoods)?;
        check_non_negative("amount", &self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixOpenRoomOperation {
    pub fee: AssetAmount,
    pub player: AccountId,
    pub matrix_level: u8,
}

impl OperationBody for MatrixOpenRoomOperation {
    fee_paid_by!(player);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            (1..=MATRIX_LEVELS).contains(&self.matrix_level),
            "matrix_level",
            "no such matrix level",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRoomClosedOperation {
    pub fee: AssetAmount,
    pub matrix_room: ObjectId,
    pub player: AccountId,
    pub level_reward: AssetAmount,
}

impl OperationBody for MatrixRoomClosedOperation {
    fee_paid_by!(player);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("matrix_room", &self.matrix_room, ObjectType::MatrixRoom)?;
        check_non_negative("level_reward", &self.level_reward)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCellFilledOperation {
    pub fee: AssetAmount,
    pub matrix_room: ObjectId,
    pub player: AccountId,
    pub cell_level: u8,
}

impl OperationBody for MatrixCellFilledOperation {
    fee_paid_by!(player);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("matrix_room", &self.matrix_room, ObjectType::MatrixRoom)?;
        ensure(
            (1..=MATRIX_LEVELS).contains(&self.cell_level),
            "cell_level",
            "no such matrix level",
        )
    }
}
