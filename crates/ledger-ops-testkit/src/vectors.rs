//! Golden vectors for the operation catalog.
//!
//! The catalog table pins every kind's permanent ordinal, its wire name and
//! whether it is virtual. [`sample_operation`] builds one structurally valid
//! payload per kind, for codec and dispatch tests that must touch every
//! variant.

use std::collections::BTreeSet;

use bytes::Bytes;
use ledger_ops_core::ops::*;
use ledger_ops_core::{
    AssetAmount, AssetId, Authority, ObjectId, ObjectType, Operation, OperationKind, Price,
};

use crate::fixtures::{account, key};

/// One row of the catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogVector {
    pub ordinal: u16,
    pub name: &'static str,
    pub is_virtual: bool,
}

const fn v(ordinal: u16, name: &'static str, is_virtual: bool) -> CatalogVector {
    CatalogVector {
        ordinal,
        name,
        is_virtual,
    }
}

/// The full catalog, in ordinal order.
pub const CATALOG: &[CatalogVector] = &[
    v(0, "transfer", false),
    v(1, "limit_order_create", false),
    v(2, "limit_order_cancel", false),
    v(3, "call_order_update", false),
    v(4, "fill_order", true),
    v(5, "account_create", false),
    v(6, "account_update", false),
    v(7, "account_whitelist", false),
    v(8, "account_upgrade", false),
    v(9, "account_transfer", false),
    v(10, "asset_create", false),
    v(11, "asset_update", false),
    v(12, "asset_update_bitasset", false),
    v(13, "asset_update_feed_producers", false),
    v(14, "asset_issue", false),
    v(15, "asset_reserve", false),
    v(16, "asset_fund_fee_pool", false),
    v(17, "asset_settle", false),
    v(18, "asset_global_settle", false),
    v(19, "asset_publish_feed", false),
    v(20, "witness_create", false),
    v(21, "witness_update", false),
    v(22, "proposal_create", false),
    v(23, "proposal_update", false),
    v(24, "proposal_delete", false),
    v(25, "withdraw_permission_create", false),
    v(26, "withdraw_permission_update", false),
    v(27, "withdraw_permission_claim", false),
    v(28, "withdraw_permission_delete", false),
    v(29, "committee_member_create", false),
    v(30, "committee_member_update", false),
    v(31, "committee_member_update_global_parameters", false),
    v(32, "vesting_balance_create", false),
    v(33, "vesting_balance_withdraw", false),
    v(34, "worker_create", false),
    v(35, "custom", false),
    v(36, "assert", false),
    v(37, "balance_claim", false),
    v(38, "override_transfer", false),
    v(39, "transfer_to_blind", false),
    v(40, "blind_transfer", false),
    v(41, "transfer_from_blind", false),
    v(42, "asset_settle_cancel", true),
    v(43, "asset_claim_fees", false),
    v(44, "fba_distribute", true),
    v(45, "bid_collateral", false),
    v(46, "execute_bid", true),
    v(47, "asset_claim_pool", false),
    v(48, "asset_update_issuer", false),
    v(49, "account_status_upgrade", false),
    v(50, "flipcoin_bet", false),
    v(51, "flipcoin_call", false),
    v(52, "flipcoin_win", true),
    v(53, "flipcoin_cancel", true),
    v(54, "flipcoin_loose", true),
    v(55, "lottery_goods_create_lot", false),
    v(56, "lottery_goods_buy_ticket", false),
    v(57, "lottery_goods_send_contacts", false),
    v(58, "lottery_goods_confirm_delivery", false),
    v(59, "lottery_goods_win", true),
    v(60, "lottery_goods_loose", true),
    v(61, "send_message", false),
    v(62, "matrix_open_room", false),
    v(63, "matrix_room_closed", true),
    v(64, "matrix_cell_filled", true),
    v(65, "create_p2p_adv", false),
    v(66, "edit_p2p_adv", false),
    v(67, "clear_p2p_adv_black_list", false),
    v(68, "remove_from_p2p_adv_black_list", false),
    v(69, "create_p2p_order", false),
    v(70, "cancel_p2p_order", false),
    v(71, "autocancel_p2p_order", true),
    v(72, "autorefund_p2p_order", true),
    v(73, "call_p2p_order", false),
    v(74, "payment_p2p_order", false),
    v(75, "release_p2p_order", false),
    v(76, "open_p2p_dispute", false),
    v(77, "reply_p2p_dispute", false),
    v(78, "resolve_p2p_dispute", false),
    v(79, "lottery_goods_refund", true),
    v(80, "credit_system_get", false),
    v(81, "credit_total_repay", true),
    v(82, "credit_repay", false),
    v(83, "credit_offer_create", false),
    v(84, "credit_offer_cancel", false),
    v(85, "credit_offer_fill", false),
    v(86, "pledge_offer_give_create", false),
    v(87, "pledge_offer_take_create", false),
    v(88, "pledge_offer_cancel", false),
    v(89, "pledge_offer_fill", false),
    v(90, "pledge_offer_repay", false),
    v(91, "pledge_offer_auto_repay", true),
    v(92, "committee_member_update_gamezone_parameters", false),
    v(93, "committee_member_update_staking_parameters", false),
    v(94, "poc_vote", false),
    v(95, "poc_stak", false),
    v(96, "poc_staking_referal", true),
    v(97, "exchange_silver", false),
    v(98, "buy_gcwd", false),
    v(99, "approved_transfer_create", false),
    v(100, "approved_transfer_approve", false),
    v(101, "approved_transfer_cancel", false),
    v(102, "approved_transfer_open_dispute", false),
    v(103, "approved_transfer_resolve_dispute", false),
    v(104, "mass_payment", false),
    v(105, "mass_payment_pay", false),
];

/// Check the compiled catalog against [`CATALOG`].
///
/// Returns a description of every mismatch; an empty vector means the
/// catalog is intact.
pub fn verify_catalog() -> Vec<String> {
    let mut mismatches = Vec::new();
    if OperationKind::ALL.len() != CATALOG.len() {
        mismatches.push(format!(
            "catalog has {} kinds, expected {}",
            OperationKind::ALL.len(),
            CATALOG.len()
        ));
    }
    for vector in CATALOG {
        match OperationKind::from_u16(vector.ordinal) {
            None => mismatches.push(format!("ordinal {} is missing", vector.ordinal)),
            Some(kind) => {
                if kind.name() != vector.name {
                    mismatches.push(format!(
                        "ordinal {} is named {}, expected {}",
                        vector.ordinal,
                        kind.name(),
                        vector.name
                    ));
                }
                if kind.is_virtual() != vector.is_virtual {
                    mismatches.push(format!(
                        "{} virtual flag is {}, expected {}",
                        vector.name,
                        kind.is_virtual(),
                        vector.is_virtual
                    ));
                }
            }
        }
    }
    mismatches
}

fn core_amount(amount: i64) -> AssetAmount {
    AssetAmount::core(amount)
}

fn asset(amount: i64, id: u64) -> AssetAmount {
    AssetAmount::new(amount, AssetId(id))
}

fn object(object_type: ObjectType, instance: u64) -> ObjectId {
    ObjectId::new(object_type, instance)
}

fn memo() -> Memo {
    Memo {
        from: key(1),
        to: key(2),
        nonce: 7,
        message: Bytes::from_static(b"sealed"),
    }
}

fn asset_options() -> AssetOptions {
    AssetOptions {
        max_supply: 1_000_000_000,
        market_fee_percent: 100,
        max_market_fee: 1_000,
        issuer_permissions: 0x01,
        flags: 0x01,
        core_exchange_rate: Price::new(asset(1, 5), core_amount(10)),
        description: "sample asset".into(),
    }
}

fn bitasset_options() -> BitassetOptions {
    BitassetOptions {
        feed_lifetime_sec: 86_400,
        minimum_feeds: 1,
        force_settlement_delay_sec: 3_600,
        force_settlement_offset_percent: 100,
        maximum_force_settlement_volume: 2_000,
        short_backing_asset: AssetId::CORE,
    }
}

fn account_options() -> AccountOptions {
    AccountOptions {
        memo_key: key(3),
        voting_account: account(5),
        num_witness: 0,
        num_committee: 0,
    }
}

fn adv_terms() -> P2pAdvTerms {
    P2pAdvTerms {
        adv_type: P2pAdvType::Sell,
        currency: "USD".into(),
        price: 100,
        min_amount: 10,
        max_amount: 1_000,
        timelimit_for_reply: 900,
        timelimit_for_approve: 1_800,
        description: "bank transfer only".into(),
    }
}

fn pledge_terms() -> PledgeTerms {
    PledgeTerms {
        pledge_amount: asset(500, 2),
        credit_amount: core_amount(100),
        repay_amount: core_amount(110),
        pledge_days: 30,
    }
}

fn blind_output(tag: u8) -> BlindOutput {
    BlindOutput {
        commitment: Bytes::from(vec![tag; 33]),
        owner: Authority::single_key(key(tag)),
    }
}

fn blind_input(tag: u8) -> BlindInput {
    BlindInput {
        commitment: Bytes::from(vec![tag; 33]),
        owner: Authority::single_key(key(tag)),
    }
}

/// A structurally valid operation of the given kind.
///
/// Every sample passes validation on the internal path; non-virtual samples
/// also pass on the external path. Fee payers are small account numbers
/// distinct from the committee and temporary accounts unless the kind
/// fixes its payer.
pub fn sample_operation(kind: OperationKind) -> Operation {
    use OperationKind as K;
    let fee = core_amount(20);
    match kind {
        K::Transfer => TransferOperation {
            fee,
            from: account(10),
            to: account(11),
            amount: core_amount(1_000),
            memo: Some(memo()),
        }
        .into(),
        K::LimitOrderCreate => LimitOrderCreateOperation {
            fee,
            seller: account(10),
            amount_to_sell: core_amount(100),
            min_to_receive: asset(5, 2),
            expiration: 1_700_000_000,
            fill_or_kill: false,
        }
        .into(),
        K::LimitOrderCancel => LimitOrderCancelOperation {
            fee,
            fee_paying_account: account(10),
            order: object(ObjectType::LimitOrder, 1),
        }
        .into(),
        K::CallOrderUpdate => CallOrderUpdateOperation {
            fee,
            funding_account: account(10),
            delta_collateral: core_amount(500),
            delta_debt: asset(20, 2),
        }
        .into(),
        K::FillOrder => FillOrderOperation {
            fee: core_amount(0),
            order_id: object(ObjectType::LimitOrder, 1),
            account_id: account(10),
            pays: core_amount(100),
            receives: asset(5, 2),
        }
        .into(),
        K::AccountCreate => AccountCreateOperation {
            fee,
            registrar: account(10),
            referrer: account(10),
            referrer_percent: 5_000,
            name: "sample-account".into(),
            owner: Authority::single_key(key(4)),
            active: Authority::single_key(key(5)),
            options: account_options(),
        }
        .into(),
        K::AccountUpdate => AccountUpdateOperation {
            fee,
            account: account(10),
            owner: None,
            active: Some(Authority::single_key(key(6))),
            new_options: None,
        }
        .into(),
        K::AccountWhitelist => AccountWhitelistOperation {
            fee,
            authorizing_account: account(10),
            account_to_list: account(11),
            new_listing: 1,
        }
        .into(),
        K::AccountUpgrade => AccountUpgradeOperation {
            fee,
            account_to_upgrade: account(10),
            upgrade_to_lifetime_member: true,
        }
        .into(),
        K::AccountTransfer => AccountTransferOperation {
            fee,
            account_id: account(10),
            new_owner: account(11),
        }
        .into(),
        K::AssetCreate => AssetCreateOperation {
            fee,
            issuer: account(10),
            symbol: "SAMPLE".into(),
            precision: 5,
            common_options: asset_options(),
            bitasset_opts: None,
            is_prediction_market: false,
        }
        .into(),
        K::AssetUpdate => AssetUpdateOperation {
            fee,
            issuer: account(10),
            asset_to_update: AssetId(5),
            new_issuer: None,
            new_options: asset_options(),
        }
        .into(),
        K::AssetUpdateBitasset => AssetUpdateBitassetOperation {
            fee,
            issuer: account(10),
            asset_to_update: AssetId(5),
            new_options: bitasset_options(),
        }
        .into(),
        K::AssetUpdateFeedProducers => AssetUpdateFeedProducersOperation {
            fee,
            issuer: account(10),
            asset_to_update: AssetId(5),
            new_feed_producers: BTreeSet::from([account(11), account(12)]),
        }
        .into(),
        K::AssetIssue => AssetIssueOperation {
            fee,
            issuer: account(10),
            asset_to_issue: asset(1_000, 5),
            issue_to_account: account(11),
            memo: None,
        }
        .into(),
        K::AssetReserve => AssetReserveOperation {
            fee,
            payer: account(10),
            amount_to_reserve: asset(10, 5),
        }
        .into(),
        K::AssetFundFeePool => AssetFundFeePoolOperation {
            fee,
            from_account: account(10),
            asset_id: AssetId(5),
            amount: 10_000,
        }
        .into(),
        K::AssetSettle => AssetSettleOperation {
            fee,
            account: account(10),
            amount: asset(10, 5),
        }
        .into(),
        K::AssetGlobalSettle => AssetGlobalSettleOperation {
            fee,
            issuer: account(10),
            asset_to_settle: AssetId(5),
            settle_price: Price::new(asset(1, 5), core_amount(3)),
        }
        .into(),
        K::AssetPublishFeed => AssetPublishFeedOperation {
            fee,
            publisher: account(10),
            asset_id: AssetId(5),
            feed: PriceFeed {
                settlement_price: Price::new(asset(1, 5), core_amount(3)),
                core_exchange_rate: Price::new(asset(1, 5), core_amount(3)),
                maintenance_collateral_ratio: 1_750,
                maximum_short_squeeze_ratio: 1_500,
            },
        }
        .into(),
        K::WitnessCreate => WitnessCreateOperation {
            fee,
            witness_account: account(10),
            url: "https://witness.example".into(),
            block_signing_key: key(7),
        }
        .into(),
        K::WitnessUpdate => WitnessUpdateOperation {
            fee,
            witness: object(ObjectType::Witness, 1),
            witness_account: account(10),
            new_url: None,
            new_signing_key: Some(key(8)),
        }
        .into(),
        K::ProposalCreate => ProposalCreateOperation {
            fee,
            fee_paying_account: account(10),
            expiration_time: 1_700_000_000,
            proposed_ops: vec![OpWrapper::new(TransferOperation {
                fee: core_amount(20),
                from: account(12),
                to: account(13),
                amount: core_amount(50),
                memo: None,
            })],
            review_period_seconds: None,
        }
        .into(),
        K::ProposalUpdate => ProposalUpdateOperation {
            fee,
            fee_paying_account: account(10),
            proposal: object(ObjectType::Proposal, 1),
            active_approvals_to_add: BTreeSet::from([account(12)]),
            active_approvals_to_remove: BTreeSet::new(),
            owner_approvals_to_add: BTreeSet::new(),
            owner_approvals_to_remove: BTreeSet::new(),
            key_approvals_to_add: BTreeSet::new(),
            key_approvals_to_remove: BTreeSet::new(),
        }
        .into(),
        K::ProposalDelete => ProposalDeleteOperation {
            fee,
            fee_paying_account: account(10),
            using_owner_authority: false,
            proposal: object(ObjectType::Proposal, 1),
        }
        .into(),
        K::WithdrawPermissionCreate => WithdrawPermissionCreateOperation {
            fee,
            withdraw_from_account: account(10),
            authorized_account: account(11),
            withdrawal_limit: core_amount(100),
            withdrawal_period_sec: 86_400,
            periods_until_expiration: 30,
            period_start_time: 1_700_000_000,
        }
        .into(),
        K::WithdrawPermissionUpdate => WithdrawPermissionUpdateOperation {
            fee,
            withdraw_from_account: account(10),
            authorized_account: account(11),
            permission_to_update: object(ObjectType::WithdrawPermission, 1),
            withdrawal_limit: core_amount(200),
            withdrawal_period_sec: 86_400,
            period_start_time: 1_700_000_000,
            periods_until_expiration: 30,
        }
        .into(),
        K::WithdrawPermissionClaim => WithdrawPermissionClaimOperation {
            fee,
            withdraw_permission: object(ObjectType::WithdrawPermission, 1),
            withdraw_from_account: account(10),
            withdraw_to_account: account(11),
            amount_to_withdraw: core_amount(100),
            memo: None,
        }
        .into(),
        K::WithdrawPermissionDelete => WithdrawPermissionDeleteOperation {
            fee,
            withdraw_from_account: account(10),
            authorized_account: account(11),
            withdrawal_permission: object(ObjectType::WithdrawPermission, 1),
        }
        .into(),
        K::CommitteeMemberCreate => CommitteeMemberCreateOperation {
            fee,
            committee_member_account: account(10),
            url: "https://committee.example".into(),
        }
        .into(),
        K::CommitteeMemberUpdate => CommitteeMemberUpdateOperation {
            fee,
            committee_member: object(ObjectType::CommitteeMember, 1),
            committee_member_account: account(10),
            new_url: Some("https://committee.example/v2".into()),
        }
        .into(),
        K::CommitteeMemberUpdateGlobalParameters => {
            CommitteeMemberUpdateGlobalParametersOperation {
                fee,
                new_parameters: ChainParameters {
                    block_interval: 3,
                    maintenance_interval: 86_400,
                    maximum_transaction_size: 2_048,
                    maximum_block_size: 2_000_000,
                    maximum_time_until_expiration: 86_400,
                    maximum_proposal_lifetime: 2_419_200,
                    committee_proposal_review_period: 1_209_600,
                    maximum_asset_feed_publishers: 10,
                    maximum_authority_membership: 10,
                    network_percent_of_fee: 2_000,
                    lifetime_referrer_percent_of_fee: 3_000,
                },
            }
            .into()
        }
        K::VestingBalanceCreate => VestingBalanceCreateOperation {
            fee,
            creator: account(10),
            owner: account(11),
            amount: core_amount(1_000),
            policy: VestingPolicy::Linear {
                begin_timestamp: 1_700_000_000,
                vesting_cliff_seconds: 0,
                vesting_duration_seconds: 86_400,
            },
        }
        .into(),
        K::VestingBalanceWithdraw => VestingBalanceWithdrawOperation {
            fee,
            vesting_balance: object(ObjectType::VestingBalance, 1),
            owner: account(10),
            amount: core_amount(100),
        }
        .into(),
        K::WorkerCreate => WorkerCreateOperation {
            fee,
            owner: account(10),
            work_begin_date: 1_700_000_000,
            work_end_date: 1_800_000_000,
            daily_pay: 1_000,
            name: "refund worker".into(),
            url: "https://worker.example".into(),
        }
        .into(),
        K::Custom => CustomOperation {
            fee,
            payer: account(10),
            required_auths: BTreeSet::from([account(11)]),
            id: 42,
            data: Bytes::from_static(b"app data"),
        }
        .into(),
        K::Assert => AssertOperation {
            fee,
            fee_paying_account: account(10),
            predicates: vec![Predicate::AssetSymbolEqLit {
                asset_id: AssetId(5),
                symbol: "SAMPLE".into(),
            }],
            required_auths: BTreeSet::new(),
        }
        .into(),
        K::BalanceClaim => BalanceClaimOperation {
            fee: core_amount(0),
            deposit_to_account: account(10),
            balance_to_claim: object(ObjectType::Balance, 1),
            balance_owner_key: key(9),
            total_claimed: core_amount(500),
        }
        .into(),
        K::OverrideTransfer => OverrideTransferOperation {
            fee,
            issuer: account(10),
            from: account(11),
            to: account(12),
            amount: asset(10, 5),
            memo: None,
        }
        .into(),
        K::TransferToBlind => TransferToBlindOperation {
            fee,
            amount: core_amount(1_000),
            from: account(10),
            blinding_factor: [0x11; 32],
            outputs: vec![blind_output(20), blind_output(21)],
        }
        .into(),
        K::BlindTransfer => BlindTransferOperation {
            fee,
            inputs: vec![blind_input(20)],
            outputs: vec![blind_output(22)],
        }
        .into(),
        K::TransferFromBlind => TransferFromBlindOperation {
            fee,
            amount: core_amount(500),
            to: account(10),
            blinding_factor: [0x22; 32],
            inputs: vec![blind_input(22)],
        }
        .into(),
        K::AssetSettleCancel => AssetSettleCancelOperation {
            fee: core_amount(0),
            settlement: object(ObjectType::ForceSettlement, 1),
            account: account(10),
            amount: asset(10, 5),
        }
        .into(),
        K::AssetClaimFees => AssetClaimFeesOperation {
            fee,
            issuer: account(10),
            amount_to_claim: asset(10, 5),
        }
        .into(),
        K::FbaDistribute => FbaDistributeOperation {
            fee: core_amount(0),
            account_id: account(10),
            fba_id: 1,
            amount: 100,
        }
        .into(),
        K::BidCollateral => BidCollateralOperation {
            fee,
            bidder: account(10),
            additional_collateral: core_amount(1_000),
            debt_covered: asset(100, 5),
        }
        .into(),
        K::ExecuteBid => ExecuteBidOperation {
            fee: core_amount(0),
            bidder: account(10),
            debt: asset(100, 5),
            collateral: core_amount(1_000),
        }
        .into(),
        K::AssetClaimPool => AssetClaimPoolOperation {
            fee,
            issuer: account(10),
            asset_id: AssetId(5),
            amount_to_claim: core_amount(100),
        }
        .into(),
        K::AssetUpdateIssuer => AssetUpdateIssuerOperation {
            fee,
            issuer: account(10),
            asset_to_update: AssetId(5),
            new_issuer: account(11),
        }
        .into(),
        K::AccountStatusUpgrade => AccountStatusUpgradeOperation {
            fee,
            account_to_upgrade: account(10),
            referral_status_type: 2,
        }
        .into(),
        K::FlipcoinBet => FlipcoinBetOperation {
            fee,
            bettor: account(10),
            bet: core_amount(100),
            nonce: 1,
        }
        .into(),
        K::FlipcoinCall => FlipcoinCallOperation {
            fee,
            flipcoin: object(ObjectType::Flipcoin, 1),
            caller: account(11),
            bet: core_amount(100),
        }
        .into(),
        K::FlipcoinWin => FlipcoinWinOperation {
            fee: core_amount(0),
            flipcoin: object(ObjectType::Flipcoin, 1),
            winner: account(10),
            bet: core_amount(100),
            payout: core_amount(190),
        }
        .into(),
        K::FlipcoinCancel => FlipcoinCancelOperation {
            fee: core_amount(0),
            flipcoin: object(ObjectType::Flipcoin, 1),
            bettor: account(10),
            bet: core_amount(100),
        }
        .into(),
        K::FlipcoinLoose => FlipcoinLooseOperation {
            fee: core_amount(0),
            flipcoin: object(ObjectType::Flipcoin, 1),
            looser: account(11),
            bet: core_amount(100),
        }
        .into(),
        K::LotteryGoodsCreateLot => LotteryGoodsCreateLotOperation {
            fee,
            owner: account(10),
            total_participants: 10,
            ticket_price: core_amount(100),
            latency_sec: 3_600,
            img_url: "https://lot.example/item.png".into(),
            description: "a bicycle".into(),
        }
        .into(),
        K::LotteryGoodsBuyTicket => LotteryGoodsBuyTicketOperation {
            fee,
            lot_id: object(ObjectType::LotteryGoods, 1),
            participant: account(11),
            ticket_price: core_amount(100),
        }
        .into(),
        K::LotteryGoodsSendContacts => LotteryGoodsSendContactsOperation {
            fee,
            lot_id: object(ObjectType::LotteryGoods, 1),
            winner: account(11),
            owner: account(10),
        }
        .into(),
        K::LotteryGoodsConfirmDelivery => LotteryGoodsConfirmDeliveryOperation {
            fee,
            lot_id: object(ObjectType::LotteryGoods, 1),
            winner: account(11),
            owner: account(10),
        }
        .into(),
        K::LotteryGoodsWin => LotteryGoodsWinOperation {
            fee: core_amount(0),
            lot_id: object(ObjectType::LotteryGoods, 1),
            winner: account(11),
        }
        .into(),
        K::LotteryGoodsLoose => LotteryGoodsLooseOperation {
            fee: core_amount(0),
            lot_id: object(ObjectType::LotteryGoods, 1),
            looser: account(12),
        }
        .into(),
        K::SendMessage => SendMessageOperation {
            fee,
            from: account(10),
            to: account(11),
            memo: memo(),
        }
        .into(),
        K::MatrixOpenRoom => MatrixOpenRoomOperation {
            fee,
            player: account(10),
            matrix_level: 1,
        }
        .into(),
        K::MatrixRoomClosed => MatrixRoomClosedOperation {
            fee: core_amount(0),
            matrix_room: object(ObjectType::MatrixRoom, 1),
            player: account(10),
            level_reward: core_amount(300),
        }
        .into(),
        K::MatrixCellFilled => MatrixCellFilledOperation {
            fee: core_amount(0),
            matrix_room: object(ObjectType::MatrixRoom, 1),
            player: account(10),
            cell_level: 1,
        }
        .into(),
        K::CreateP2pAdv => CreateP2pAdvOperation {
            fee,
            p2p_gateway: account(10),
            terms: adv_terms(),
        }
        .into(),
        K::EditP2pAdv => EditP2pAdvOperation {
            fee,
            p2p_adv: object(ObjectType::P2pAdv, 1),
            p2p_gateway: account(10),
            terms: adv_terms(),
        }
        .into(),
        K::ClearP2pAdvBlackList => ClearP2pAdvBlackListOperation {
            fee,
            p2p_adv: object(ObjectType::P2pAdv, 1),
            p2p_gateway: account(10),
        }
        .into(),
        K::RemoveFromP2pAdvBlackList => RemoveFromP2pAdvBlackListOperation {
            fee,
            p2p_adv: object(ObjectType::P2pAdv, 1),
            p2p_gateway: account(10),
            blacklisted: account(11),
        }
        .into(),
        K::CreateP2pOrder => CreateP2pOrderOperation {
            fee,
            p2p_adv: object(ObjectType::P2pAdv, 1),
            p2p_client: account(11),
            amount: core_amount(100),
            price: 100,
        }
        .into(),
        K::CancelP2pOrder => CancelP2pOrderOperation {
            fee,
            p2p_order: object(ObjectType::P2pOrder, 1),
            p2p_client: account(11),
        }
        .into(),
        K::AutocancelP2pOrder => AutocancelP2pOrderOperation {
            fee: core_amount(0),
            p2p_order: object(ObjectType::P2pOrder, 1),
            p2p_gateway: account(10),
            amount: core_amount(100),
        }
        .into(),
        K::AutorefundP2pOrder => AutorefundP2pOrderOperation {
            fee: core_amount(0),
            p2p_order: object(ObjectType::P2pOrder, 1),
            p2p_client: account(11),
            amount: core_amount(100),
        }
        .into(),
        K::CallP2pOrder => CallP2pOrderOperation {
            fee,
            p2p_order: object(ObjectType::P2pOrder, 1),
            p2p_gateway: account(10),
            payment_details: "IBAN DE00 0000".into(),
        }
        .into(),
        K::PaymentP2pOrder => PaymentP2pOrderOperation {
            fee,
            p2p_order: object(ObjectType::P2pOrder, 1),
            payer: account(11),
        }
        .into(),
        K::ReleaseP2pOrder => ReleaseP2pOrderOperation {
            fee,
            p2p_order: object(ObjectType::P2pOrder, 1),
            releaser: account(10),
        }
        .into(),
        K::OpenP2pDispute => OpenP2pDisputeOperation {
            fee,
            p2p_order: object(ObjectType::P2pOrder, 1),
            account: account(11),
            reason: "payment not released".into(),
        }
        .into(),
        K::ReplyP2pDispute => ReplyP2pDisputeOperation {
            fee,
            p2p_order: object(ObjectType::P2pOrder, 1),
            account: account(10),
            reply: "payment never arrived".into(),
        }
        .into(),
        K::ResolveP2pDispute => ResolveP2pDisputeOperation {
            fee,
            p2p_order: object(ObjectType::P2pOrder, 1),
            arbitrator: account(12),
            winner: account(11),
            looser: account(10),
        }
        .into(),
        K::LotteryGoodsRefund => LotteryGoodsRefundOperation {
            fee: core_amount(0),
            lot_id: object(ObjectType::LotteryGoods, 1),
            participant: account(11),
            amount: core_amount(100),
        }
        .into(),
        K::CreditSystemGet => CreditSystemGetOperation {
            fee,
            debitor: account(10),
            credit_amount: core_amount(100),
        }
        .into(),
        K::CreditTotalRepay => CreditTotalRepayOperation {
            fee: core_amount(0),
            debitor: account(10),
            creditor: account(11),
            total_repay: core_amount(110),
        }
        .into(),
        K::CreditRepay => CreditRepayOperation {
            fee,
            debitor: account(10),
            creditor: account(11),
            repay_amount: core_amount(50),
        }
        .into(),
        K::CreditOfferCreate => CreditOfferCreateOperation {
            fee,
            creditor: account(11),
            credit_amount: core_amount(10_000),
            min_loan: 100,
            interest_rate: 500,
            repay_period_days: 30,
        }
        .into(),
        K::CreditOfferCancel => CreditOfferCancelOperation {
            fee,
            creditor: account(11),
            credit_offer: object(ObjectType::CreditOffer, 1),
        }
        .into(),
        K::CreditOfferFill => CreditOfferFillOperation {
            fee,
            debitor: account(10),
            credit_offer: object(ObjectType::CreditOffer, 1),
            credit_amount: core_amount(1_000),
        }
        .into(),
        K::PledgeOfferGiveCreate => PledgeOfferGiveCreateOperation {
            fee,
            creditor: account(11),
            terms: pledge_terms(),
        }
        .into(),
        K::PledgeOfferTakeCreate => PledgeOfferTakeCreateOperation {
            fee,
            debitor: account(10),
            terms: pledge_terms(),
        }
        .into(),
        K::PledgeOfferCancel => PledgeOfferCancelOperation {
            fee,
            account: account(11),
            pledge_offer: object(ObjectType::PledgeOffer, 1),
        }
        .into(),
        K::PledgeOfferFill => PledgeOfferFillOperation {
            fee,
            account: account(10),
            pledge_offer: object(ObjectType::PledgeOffer, 1),
        }
        .into(),
        K::PledgeOfferRepay => PledgeOfferRepayOperation {
            fee,
            debitor: account(10),
            creditor: account(11),
            pledge_offer: object(ObjectType::PledgeOffer, 1),
            repay_amount: core_amount(110),
        }
        .into(),
        K::PledgeOfferAutoRepay => PledgeOfferAutoRepayOperation {
            fee: core_amount(0),
            debitor: account(10),
            creditor: account(11),
            pledge_offer: object(ObjectType::PledgeOffer, 1),
            pledge_amount: asset(500, 2),
        }
        .into(),
        K::CommitteeMemberUpdateGamezoneParameters => {
            CommitteeMemberUpdateGamezoneParametersOperation {
                fee,
                new_parameters: GamezoneParameters {
                    flipcoin_fee_percent: 500,
                    lottery_fee_percent: 1_000,
                    flipcoin_bet_expiration: 3_600,
                },
            }
            .into()
        }
        K::CommitteeMemberUpdateStakingParameters => {
            CommitteeMemberUpdateStakingParametersOperation {
                fee,
                new_parameters: StakingParameters {
                    poc_min_stake: 100,
                    poc_max_stake: 1_000_000,
                    poc_referral_percent: 500,
                    poc_periods: vec![30, 90, 180],
                },
            }
            .into()
        }
        K::PocVote => PocVoteOperation {
            fee,
            account: account(10),
            poc_vote_amount: core_amount(100),
        }
        .into(),
        K::PocStak => PocStakOperation {
            fee,
            account: account(10),
            stak_amount: core_amount(1_000),
            staking_period: 90,
        }
        .into(),
        K::PocStakingReferal => PocStakingReferalOperation {
            fee: core_amount(0),
            account: account(10),
            referal: account(11),
            amount: core_amount(50),
        }
        .into(),
        K::ExchangeSilver => ExchangeSilverOperation {
            fee,
            account: account(10),
            amount: 1_000,
        }
        .into(),
        K::BuyGcwd => BuyGcwdOperation {
            fee,
            account: account(10),
            amount: core_amount(1_000),
        }
        .into(),
        K::ApprovedTransferCreate => ApprovedTransferCreateOperation {
            fee,
            from: account(10),
            to: account(11),
            arbitr: account(12),
            amount: core_amount(1_000),
            expiration: 1_700_000_000,
            memo: None,
        }
        .into(),
        K::ApprovedTransferApprove => ApprovedTransferApproveOperation {
            fee,
            escrow: object(ObjectType::ApprovedTransfer, 1),
            to: account(11),
        }
        .into(),
        K::ApprovedTransferCancel => ApprovedTransferCancelOperation {
            fee,
            escrow: object(ObjectType::ApprovedTransfer, 1),
            from: account(10),
        }
        .into(),
        K::ApprovedTransferOpenDispute => ApprovedTransferOpenDisputeOperation {
            fee,
            escrow: object(ObjectType::ApprovedTransfer, 1),
            account: account(10),
        }
        .into(),
        K::ApprovedTransferResolveDispute => ApprovedTransferResolveDisputeOperation {
            fee,
            escrow: object(ObjectType::ApprovedTransfer, 1),
            arbitr: account(12),
            winner: account(11),
        }
        .into(),
        K::MassPayment => MassPaymentOperation {
            fee,
            from: account(10),
            asset_id: AssetId::CORE,
            entries: vec![
                MassPaymentEntry {
                    to: account(11),
                    amount: 100,
                },
                MassPaymentEntry {
                    to: account(12),
                    amount: 200,
                },
            ],
        }
        .into(),
        K::MassPaymentPay => MassPaymentPayOperation {
            fee,
            payer: account(10),
            mass_payment: object(ObjectType::MassPayment, 1),
        }
        .into(),
    }
}

/// One sample of every kind, in ordinal order.
pub fn all_samples() -> Vec<Operation> {
    OperationKind::ALL.iter().map(|kind| sample_operation(*kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_ops_core::{validate, validate_with, ValidationContext, ValidationError};

    #[test]
    fn test_catalog_matches() {
        let mismatches = verify_catalog();
        assert!(mismatches.is_empty(), "{:#?}", mismatches);
    }

    #[test]
    fn test_catalog_ordinals_are_dense() {
        for (index, vector) in CATALOG.iter().enumerate() {
            assert_eq!(vector.ordinal as usize, index);
        }
    }

    #[test]
    fn test_sample_kinds() {
        for kind in OperationKind::ALL {
            assert_eq!(sample_operation(*kind).kind(), *kind);
        }
    }

    #[test]
    fn test_samples_validate() {
        let internal = ValidationContext::internal();
        for op in all_samples() {
            validate_with(&op, &internal)
                .unwrap_or_else(|e| panic!("{} sample rejected: {}", op.kind(), e));
            if !op.is_virtual() {
                validate(&op).unwrap_or_else(|e| panic!("{} sample rejected: {}", op.kind(), e));
            }
        }
    }

    #[test]
    fn test_virtual_samples_rejected_externally() {
        let virtual_kinds: Vec<_> = OperationKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.is_virtual())
            .collect();
        assert_eq!(virtual_kinds.len(), 17);

        for kind in virtual_kinds {
            assert_eq!(
                validate(&sample_operation(kind)),
                Err(ValidationError::DisallowedVirtualSubmission(kind)),
                "{} accepted on the external path",
                kind
            );
        }
    }

    #[test]
    fn test_virtual_rejection_precedes_field_checks() {
        let malformed: Operation = FillOrderOperation {
            fee: AssetAmount::core(-5),
            order_id: object(ObjectType::LimitOrder, 1),
            account_id: account(10),
            pays: core_amount(-100),
            receives: asset(5, 2),
        }
        .into();

        assert_eq!(
            validate(&malformed),
            Err(ValidationError::DisallowedVirtualSubmission(
                OperationKind::FillOrder
            ))
        );
        assert!(matches!(
            validate_with(&malformed, &ValidationContext::internal()),
            Err(ValidationError::MalformedField { field: "fee", .. })
        ));
    }
}
