//! The operation catalog.
//!
//! [`Operation`] is a closed, tagged union over every operation kind the
//! protocol knows. Each kind has a permanent ordinal, written out explicitly
//! below. The ordinal is the wire discriminant: a serialized operation is
//! `[ordinal, payload]`. New kinds are appended at the end; an ordinal is
//! never reused or reordered.
//!
//! Every variant's payload implements [`OperationBody`], which is how the
//! validation dispatcher and the authority resolver reach variant-specific
//! logic without knowing about any particular kind.

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::fmt;

use crate::authority::RequiredAuthorities;
use crate::error::ValidationError;
use crate::types::{AccountId, AssetAmount};
use crate::validation::ValidationContext;

/// Implements the fee accessors of [`OperationBody`] for a body with a
/// `fee` field and the named fee-paying account field.
macro_rules! fee_paid_by {
    ($payer:ident) => {
        fn fee(&self) -> &$crate::types::AssetAmount {
            &self.fee
        }

        fn fee_payer(&self) -> $crate::types::AccountId {
            self.$payer
        }
    };
}

pub mod account;
pub mod asset;
pub mod confidential;
pub mod escrow;
pub mod exchange;
pub mod financial;
pub mod gamezone;
pub mod governance;
pub mod market;
pub mod misc;
pub mod payments;
pub mod poc;
pub mod proposal;
pub mod transfer;
pub mod vesting;
pub mod withdraw;

pub use account::*;
pub use asset::*;
pub use confidential::*;
pub use escrow::*;
pub use exchange::*;
pub use financial::*;
pub use gamezone::*;
pub use governance::*;
pub use market::*;
pub use misc::*;
pub use payments::*;
pub use poc::*;
pub use proposal::*;
pub use transfer::*;
pub use vesting::*;
pub use withdraw::*;

/// The contract every operation payload satisfies.
pub trait OperationBody {
    /// The fee attached to this operation.
    fn fee(&self) -> &AssetAmount;

    /// The account paying the fee. Its active authority is always required.
    fn fee_payer(&self) -> AccountId;

    /// Structural checks on the operation's own fields. Must not consult
    /// anything but `self` and the context's limits.
    fn validate(&self, ctx: &ValidationContext) -> Result<(), ValidationError>;

    /// Add the authorities this operation demands beyond the fee payer's
    /// active authority.
    fn collect_authorities(&self, _required: &mut RequiredAuthorities) {}
}

macro_rules! operation_catalog {
    ($( $ordinal:literal => $variant:ident($body:ident) $name:literal, )*) => {
        /// The tag of an [`Operation`]: its permanent wire ordinal.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum OperationKind {
            $( $variant = $ordinal, )*
        }

        impl OperationKind {
            /// Every kind, in ordinal order.
            pub const ALL: &'static [OperationKind] = &[ $( OperationKind::$variant, )* ];

            /// Try to parse from a wire ordinal.
            pub fn from_u16(value: u16) -> Option<Self> {
                match value {
                    $( $ordinal => Some(Self::$variant), )*
                    _ => None,
                }
            }

            /// The protocol name of this kind.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }
        }

        /// One operation of the protocol's closed catalog.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Operation {
            $( $variant($body), )*
        }

        impl Operation {
            /// The tag of the active variant.
            pub fn kind(&self) -> OperationKind {
                match self {
                    $( Operation::$variant(_) => OperationKind::$variant, )*
                }
            }

            /// The active variant's payload.
            pub fn body(&self) -> &dyn OperationBody {
                match self {
                    $( Operation::$variant(op) => op as &dyn OperationBody, )*
                }
            }
        }

        $(
            impl From<$body> for Operation {
                fn from(op: $body) -> Self {
                    Operation::$variant(op)
                }
            }
        )*

        impl Serialize for Operation {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(&self.kind().to_u16())?;
                match self {
                    $( Operation::$variant(op) => tuple.serialize_element(op)?, )*
                }
                tuple.end()
            }
        }

        fn deserialize_payload<'de, A: SeqAccess<'de>>(
            kind: OperationKind,
            seq: &mut A,
        ) -> Result<Operation, A::Error> {
            let op = match kind {
                $( OperationKind::$variant => Operation::$variant(next_payload(seq)?), )*
            };
            Ok(op)
        }
    };
}

operation_catalog! {
    0 => Transfer(TransferOperation) "transfer",
    1 => LimitOrderCreate(LimitOrderCreateOperation) "limit_order_create",
    2 => LimitOrderCancel(LimitOrderCancelOperation) "limit_order_cancel",
    3 => CallOrderUpdate(CallOrderUpdateOperation) "call_order_update",
    4 => FillOrder(FillOrderOperation) "fill_order",
    5 => AccountCreate(AccountCreateOperation) "account_create",
    6 => AccountUpdate(AccountUpdateOperation) "account_update",
    7 => AccountWhitelist(AccountWhitelistOperation) "account_whitelist",
    8 => AccountUpgrade(AccountUpgradeOperation) "account_upgrade",
    9 => AccountTransfer(AccountTransferOperation) "account_transfer",
    10 => AssetCreate(AssetCreateOperation) "asset_create",
    11 => AssetUpdate(AssetUpdateOperation) "asset_update",
    12 => AssetUpdateBitasset(AssetUpdateBitassetOperation) "asset_update_bitasset",
    13 => AssetUpdateFeedProducers(AssetUpdateFeedProducersOperation) "asset_update_feed_producers",
    14 => AssetIssue(AssetIssueOperation) "asset_issue",
    15 => AssetReserve(AssetReserveOperation) "asset_reserve",
    16 => AssetFundFeePool(AssetFundFeePoolOperation) "asset_fund_fee_pool",
    17 => AssetSettle(AssetSettleOperation) "asset_settle",
    18 => AssetGlobalSettle(AssetGlobalSettleOperation) "asset_global_settle",
    19 => AssetPublishFeed(AssetPublishFeedOperation) "asset_publish_feed",
    20 => WitnessCreate(WitnessCreateOperation) "witness_create",
    21 => WitnessUpdate(WitnessUpdateOperation) "witness_update",
    22 => ProposalCreate(ProposalCreateOperation) "proposal_create",
    23 => ProposalUpdate(ProposalUpdateOperation) "proposal_update",
    24 => ProposalDelete(ProposalDeleteOperation) "proposal_delete",
    25 => WithdrawPermissionCreate(WithdrawPermissionCreateOperation) "withdraw_permission_create",
    26 => WithdrawPermissionUpdate(WithdrawPermissionUpdateOperation) "withdraw_permission_update",
    27 => WithdrawPermissionClaim(WithdrawPermissionClaimOperation) "withdraw_permission_claim",
    28 => WithdrawPermissionDelete(WithdrawPermissionDeleteOperation) "withdraw_permission_delete",
    29 => CommitteeMemberCreate(CommitteeMemberCreateOperation) "committee_member_create",
    30 => CommitteeMemberUpdate(CommitteeMemberUpdateOperation) "committee_member_update",
    31 => CommitteeMemberUpdateGlobalParameters(CommitteeMemberUpdateGlobalParametersOperation) "committee_member_update_global_parameters",
    32 => VestingBalanceCreate(VestingBalanceCreateOperation) "vesting_balance_create",
    33 => VestingBalanceWithdraw(VestingBalanceWithdrawOperation) "vesting_balance_withdraw",
    34 => WorkerCreate(WorkerCreateOperation) "worker_create",
    35 => Custom(CustomOperation) "custom",
    36 => Assert(AssertOperation) "assert",
    37 => BalanceClaim(BalanceClaimOperation) "balance_claim",
    38 => OverrideTransfer(OverrideTransferOperation) "override_transfer",
    39 => TransferToBlind(TransferToBlindOperation) "transfer_to_blind",
    40 => BlindTransfer(BlindTransferOperation) "blind_transfer",
    41 => TransferFromBlind(TransferFromBlindOperation) "transfer_from_blind",
    42 => AssetSettleCancel(AssetSettleCancelOperation) "asset_settle_cancel",
    43 => AssetClaimFees(AssetClaimFeesOperation) "asset_claim_fees",
    44 => FbaDistribute(FbaDistributeOperation) "fba_distribute",
    45 => BidCollateral(BidCollateralOperation) "bid_collateral",
    46 => ExecuteBid(ExecuteBidOperation) "execute_bid",
    47 => AssetClaimPool(AssetClaimPoolOperation) "asset_claim_pool",
    48 => AssetUpdateIssuer(AssetUpdateIssuerOperation) "asset_update_issuer",
    49 => AccountStatusUpgrade(AccountStatusUpgradeOperation) "account_status_upgrade",
    50 => FlipcoinBet(FlipcoinBetOperation) "flipcoin_bet",
    51 => FlipcoinCall(FlipcoinCallOperation) "flipcoin_call",
    52 => FlipcoinWin(FlipcoinWinOperation) "flipcoin_win",
    53 => FlipcoinCancel(FlipcoinCancelOperation) "flipcoin_cancel",
    54 => FlipcoinLoose(FlipcoinLooseOperation) "flipcoin_loose",
    55 => LotteryGoodsCreateLot(LotteryGoodsCreateLotOperation) "lottery_goods_create_lot",
    56 => LotteryGoodsBuyTicket(LotteryGoodsBuyTicketOperation) "lottery_goods_buy_ticket",
    57 => LotteryGoodsSendContacts(LotteryGoodsSendContactsOperation) "lottery_goods_send_contacts",
    58 => LotteryGoodsConfirmDelivery(LotteryGoodsConfirmDeliveryOperation) "lottery_goods_confirm_delivery",
    59 => LotteryGoodsWin(LotteryGoodsWinOperation) "lottery_goods_win",
    60 => LotteryGoodsLoose(LotteryGoodsLooseOperation) "lottery_goods_loose",
    61 => SendMessage(SendMessageOperation) "send_message",
    62 => MatrixOpenRoom(MatrixOpenRoomOperation) "matrix_open_room",
    63 => MatrixRoomClosed(MatrixRoomClosedOperation) "matrix_room_closed",
    64 => MatrixCellFilled(MatrixCellFilledOperation) "matrix_cell_filled",
    65 => CreateP2pAdv(CreateP2pAdvOperation) "create_p2p_adv",
    66 => EditP2pAdv(EditP2pAdvOperation) "edit_p2p_adv",
    67 => ClearP2pAdvBlackList(ClearP2pAdvBlackListOperation) "clear_p2p_adv_black_list",
    68 => RemoveFromP2pAdvBlackList(RemoveFromP2pAdvBlackListOperation) "remove_from_p2p_adv_black_list",
    69 => CreateP2pOrder(CreateP2pOrderOperation) "create_p2p_order",
    70 => CancelP2pOrder(CancelP2pOrderOperation) "cancel_p2p_order",
    71 => AutocancelP2pOrder(AutocancelP2pOrderOperation) "autocancel_p2p_order",
    72 => AutorefundP2pOrder(AutorefundP2pOrderOperation) "autorefund_p2p_order",
    73 => CallP2pOrder(CallP2pOrderOperation) "call_p2p_order",
    74 => PaymentP2pOrder(PaymentP2pOrderOperation) "payment_p2p_order",
    75 => ReleaseP2pOrder(ReleaseP2pOrderOperation) "release_p2p_order",
    76 => OpenP2pDispute(OpenP2pDisputeOperation) "open_p2p_dispute",
    77 => ReplyP2pDispute(ReplyP2pDisputeOperation) "reply_p2p_dispute",
    78 => ResolveP2pDispute(ResolveP2pDisputeOperation) "resolve_p2p_dispute",
    79 => LotteryGoodsRefund(LotteryGoodsRefundOperation) "lottery_goods_refund",
    80 => CreditSystemGet(CreditSystemGetOperation) "credit_system_get",
    81 => CreditTotalRepay(CreditTotalRepayOperation) "credit_total_repay",
    82 => CreditRepay(CreditRepayOperation) "credit_repay",
    83 => CreditOfferCreate(CreditOfferCreateOperation) "credit_offer_create",
    84 => CreditOfferCancel(CreditOfferCancelOperation) "credit_offer_cancel",
    85 => CreditOfferFill(CreditOfferFillOperation) "credit_offer_fill",
    86 => PledgeOfferGiveCreate(PledgeOfferGiveCreateOperation) "pledge_offer_give_create",
    87 => PledgeOfferTakeCreate(PledgeOfferTakeCreateOperation) "pledge_offer_take_create",
    88 => PledgeOfferCancel(PledgeOfferCancelOperation) "pledge_offer_cancel",
    89 => PledgeOfferFill(PledgeOfferFillOperation) "pledge_offer_fill",
    90 => PledgeOfferRepay(PledgeOfferRepayOperation) "pledge_offer_repay",
    91 => PledgeOfferAutoRepay(PledgeOfferAutoRepayOperation) "pledge_offer_auto_repay",
    92 => CommitteeMemberUpdateGamezoneParameters(CommitteeMemberUpdateGamezoneParametersOperation) "committee_member_update_gamezone_parameters",
    93 => CommitteeMemberUpdateStakingParameters(CommitteeMemberUpdateStakingParametersOperation) "committee_member_update_staking_parameters",
    94 => PocVote(PocVoteOperation) "poc_vote",
    95 => PocStak(PocStakOperation) "poc_stak",
    96 => PocStakingReferal(PocStakingReferalOperation) "poc_staking_referal",
    97 => ExchangeSilver(ExchangeSilverOperation) "exchange_silver",
    98 => BuyGcwd(BuyGcwdOperation) "buy_gcwd",
    99 => ApprovedTransferCreate(ApprovedTransferCreateOperation) "approved_transfer_create",
    100 => ApprovedTransferApprove(ApprovedTransferApproveOperation) "approved_transfer_approve",
    101 => ApprovedTransferCancel(ApprovedTransferCancelOperation) "approved_transfer_cancel",
    102 => ApprovedTransferOpenDispute(ApprovedTransferOpenDisputeOperation) "approved_transfer_open_dispute",
    103 => ApprovedTransferResolveDispute(ApprovedTransferResolveDisputeOperation) "approved_transfer_resolve_dispute",
    104 => MassPayment(MassPaymentOperation) "mass_payment",
    105 => MassPaymentPay(MassPaymentPayOperation) "mass_payment_pay",
}

/// Broad grouping of operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationFamily {
    Core,
    Market,
    Account,
    Asset,
    Governance,
    Proposal,
    Confidential,
    GameZone,
    Messaging,
    Exchange,
    Financial,
    ProofOfCrowd,
    Escrow,
    Payments,
}

impl OperationKind {
    /// Convert to u16 for serialization.
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Virtual kinds are only ever produced by evaluating another
    /// operation; no submitter may construct them.
    pub fn is_virtual(self) -> bool {
        use OperationKind::*;
        matches!(
            self,
            FillOrder
                | AssetSettleCancel
                | FbaDistribute
                | ExecuteBid
                | FlipcoinWin
                | FlipcoinCancel
                | FlipcoinLoose
                | LotteryGoodsWin
                | LotteryGoodsLoose
                | MatrixRoomClosed
                | MatrixCellFilled
                | AutocancelP2pOrder
                | AutorefundP2pOrder
                | LotteryGoodsRefund
                | CreditTotalRepay
                | PledgeOfferAutoRepay
                | PocStakingReferal
        )
    }

    pub fn family(self) -> OperationFamily {
        use OperationKind::*;
        match self {
            Transfer | OverrideTransfer | Custom | Assert | BalanceClaim | FbaDistribute => {
                OperationFamily::Core
            }
            LimitOrderCreate | LimitOrderCancel | CallOrderUpdate | FillOrder => {
                OperationFamily::Market
            }
            AccountCreate | AccountUpdate | AccountWhitelist | AccountUpgrade
            | AccountTransfer | AccountStatusUpgrade | WithdrawPermissionCreate
            | WithdrawPermissionUpdate | WithdrawPermissionClaim | WithdrawPermissionDelete
            | VestingBalanceCreate | VestingBalanceWithdraw => OperationFamily::Account,
            AssetCreate | AssetUpdate | AssetUpdateBitasset | AssetUpdateFeedProducers
            | AssetIssue | AssetReserve | AssetFundFeePool | AssetSettle | AssetGlobalSettle
            | AssetPublishFeed | AssetSettleCancel | AssetClaimFees | BidCollateral
            | ExecuteBid | AssetClaimPool | AssetUpdateIssuer => OperationFamily::Asset,
            WitnessCreate | WitnessUpdate | CommitteeMemberCreate | CommitteeMemberUpdate
            | CommitteeMemberUpdateGlobalParameters | WorkerCreate
            | CommitteeMemberUpdateGamezoneParameters
            | CommitteeMemberUpdateStakingParameters => OperationFamily::Governance,
            ProposalCreate | ProposalUpdate | ProposalDelete => OperationFamily::Proposal,
            TransferToBlind | BlindTransfer | TransferFromBlind => OperationFamily::Confidential,
            FlipcoinBet | FlipcoinCall | FlipcoinWin | FlipcoinCancel | FlipcoinLoose
            | LotteryGoodsCreateLot | LotteryGoodsBuyTicket | LotteryGoodsSendContacts
            | LotteryGoodsConfirmDelivery | LotteryGoodsWin | LotteryGoodsLoose
            | LotteryGoodsRefund | MatrixOpenRoom | MatrixRoomClosed | MatrixCellFilled => {
                OperationFamily::GameZone
            }
            SendMessage => OperationFamily::Messaging,
            CreateP2pAdv | EditP2pAdv | ClearP2pAdvBlackList | RemoveFromP2pAdvBlackList
            | CreateP2pOrder | CancelP2pOrder | AutocancelP2pOrder | AutorefundP2pOrder
            | CallP2pOrder | PaymentP2pOrder | ReleaseP2pOrder | OpenP2pDispute
            | ReplyP2pDispute | ResolveP2pDispute => OperationFamily::Exchange,
            CreditSystemGet | CreditTotalRepay | CreditRepay | CreditOfferCreate
            | CreditOfferCancel | CreditOfferFill | PledgeOfferGiveCreate
            | PledgeOfferTakeCreate | PledgeOfferCancel | PledgeOfferFill | PledgeOfferRepay
            | PledgeOfferAutoRepay => OperationFamily::Financial,
            PocVote | PocStak | PocStakingReferal | ExchangeSilver | BuyGcwd => {
                OperationFamily::ProofOfCrowd
            }
            ApprovedTransferCreate | ApprovedTransferApprove | ApprovedTransferCancel
            | ApprovedTransferOpenDispute | ApprovedTransferResolveDispute => {
                OperationFamily::Escrow
            }
            MassPayment | MassPaymentPay => OperationFamily::Payments,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    pub fn is_virtual(&self) -> bool {
        self.kind().is_virtual()
    }

    pub fn fee(&self) -> &AssetAmount {
        self.body().fee()
    }

    pub fn fee_payer(&self) -> AccountId {
        self.body().fee_payer()
    }

    /// Validate on the external submission path with default limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validation::validate(self)
    }

    /// The signatures this operation demands.
    pub fn required_authorities(&self) -> RequiredAuthorities {
        crate::authority::required_authorities(self)
    }

    /// Add this operation's requirements to `required` without normalizing.
    pub(crate) fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        let body = self.body();
        required.require_active(body.fee_payer());
        body.collect_authorities(required);
    }
}

fn next_payload<'de, A, T>(seq: &mut A) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(1, &"an operation tag followed by its payload"))
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OperationVisitor;

        impl<'de> Visitor<'de> for OperationVisitor {
            type Value = Operation;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an operation tag followed by its payload")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Operation, A::Error> {
                let tag: u16 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let kind = OperationKind::from_u16(tag)
                    .ok_or_else(|| de::Error::custom(format!("unknown operation tag {}", tag)))?;
                let op = deserialize_payload(kind, &mut seq)?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(op)
            }
        }

        deserializer.deserialize_tuple(2, OperationVisitor)
    }
}
