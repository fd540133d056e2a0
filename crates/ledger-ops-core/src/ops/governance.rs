//! Block producers, the committee and funded workers.
//!
//! Chain-wide parameter changes are paid for by the committee account and
//! are only ever reachable through an approved proposal.

use serde::{Deserialize, Serialize};

use crate::crypto::Ed25519PublicKey;
use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount, ObjectId, ObjectType};
use crate::validation::{
    check_object, check_percent, check_text, check_url, ensure, ValidationContext,
    MAX_SHARE_SUPPLY,
};

/// Maximum length of a worker name.
pub const MAX_WORKER_NAME_LENGTH: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessCreateOperation {
    pub fee: AssetAmount,
    pub witness_account: AccountId,
    pub url: String,
    pub block_signing_key: Ed25519PublicKey,
}

impl OperationBody for WitnessCreateOperation {
    fee_paid_by!(witness_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_url("url", &self.url)?;
        ensure(
            self.block_signing_key.is_well_formed(),
            "block_signing_key",
            "must be a valid public key",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessUpdateOperation {
    pub fee: AssetAmount,
    pub witness: ObjectId,
    pub witness_account: AccountId,
    pub new_url: Option<String>,
    pub new_signing_key: Option<Ed25519PublicKey>,
}

impl OperationBody for WitnessUpdateOperation {
    fee_paid_by!(witness_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object("witness", &self.witness, ObjectType::Witness)?;
        if let Some(url) = &self.new_url {
            check_url("new_url", url)?;
        }
        if let Some(key) = &self.new_signing_key {
            ensure(key.is_well_formed(), "new_signing_key", "must be a valid public key")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMemberCreateOperation {
    pub fee: AssetAmount,
    pub committee_member_account: AccountId,
    pub url: String,
}

impl OperationBody for CommitteeMemberCreateOperation {
    fee_paid_by!(committee_member_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_url("url", &self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMemberUpdateOperation {
    pub fee: AssetAmount,
    pub committee_member: ObjectId,
    pub committee_member_account: AccountId,
    pub new_url: Option<String>,
}

impl OperationBody for CommitteeMemberUpdateOperation {
    fee_paid_by!(committee_member_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_object(
            "committee_member",
            &self.committee_member,
            ObjectType::CommitteeMember,
        )?;
        match &self.new_url {
            Some(url) => check_url("new_url", url),
            None => Ok(()),
        }
    }
}

/// Chain-wide tunables set by the committee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParameters {
    pub block_interval: u8,
    pub maintenance_interval: u32,
    pub maximum_transaction_size: u32,
    pub maximum_block_size: u32,
    pub maximum_time_until_expiration: u32,
    pub maximum_proposal_lifetime: u32,
    pub committee_proposal_review_period: u32,
    pub maximum_asset_feed_publishers: u8,
    pub maximum_authority_membership: u16,
    pub network_percent_of_fee: u16,
    pub lifetime_referrer_percent_of_fee: u16,
}

impl ChainParameters {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure(self.block_interval > 0, "block_interval", "must be positive")?;
        ensure(
            self.maintenance_interval > 0
                && self.maintenance_interval % u32::from(self.block_interval) == 0,
            "maintenance_interval",
            "must be a positive multiple of the block interval",
        )?;
        ensure(
            self.maximum_block_size >= self.maximum_transaction_size,
            "maximum_block_size",
            "must hold at least one maximal transaction",
        )?;
        ensure(
            self.committee_proposal_review_period < self.maximum_proposal_lifetime,
            "committee_proposal_review_period",
            "must be shorter than the proposal lifetime",
        )?;
        ensure(
            self.maximum_authority_membership > 0,
            "maximum_authority_membership",
            "must be positive",
        )?;
        check_percent("network_percent_of_fee", self.network_percent_of_fee)?;
        check_percent(
            "lifetime_referrer_percent_of_fee",
            self.lifetime_referrer_percent_of_fee,
        )?;
        check_percent(
            "network_percent_of_fee",
            self.network_percent_of_fee
                .saturating_add(self.lifetime_referrer_percent_of_fee),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMemberUpdateGlobalParametersOperation {
    pub fee: AssetAmount,
    pub new_parameters: ChainParameters,
}

impl OperationBody for CommitteeMemberUpdateGlobalParametersOperation {
    fn fee(&self) -> &AssetAmount {
        &self.fee
    }

    fn fee_payer(&self) -> AccountId {
        AccountId::COMMITTEE
    }

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        self.new_parameters.validate()
    }
}

/// Tunables of the game zone: flipcoin and lottery fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamezoneParameters {
    pub flipcoin_fee_percent: u16,
    pub lottery_fee_percent: u16,
    pub flipcoin_bet_expiration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMemberUpdateGamezoneParametersOperation {
    pub fee: AssetAmount,
    pub new_parameters: GamezoneParameters,
}

impl OperationBody for CommitteeMemberUpdateGamezoneParametersOperation {
    fn fee(&self) -> &AssetAmount {
        &self.fee
    }

    fn fee_payer(&self) -> AccountId {
        AccountId::COMMITTEE
    }

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_percent("flipcoin_fee_percent", self.new_parameters.flipcoin_fee_percent)?;
        check_percent("lottery_fee_percent", self.new_parameters.lottery_fee_percent)?;
        ensure(
            self.new_parameters.flipcoin_bet_expiration > 0,
            "flipcoin_bet_expiration",
            "must be positive",
        )
    }
}

/// Tunables of proof-of-crowd staking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParameters {
    pub poc_min_stake: i64,
    pub poc_max_stake: i64,
    pub poc_referral_percent: u16,
    pub poc_periods: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMemberUpdateStakingParametersOperation {
    pub fee: AssetAmount,
    pub new_parameters: StakingParameters,
}

impl OperationBody for CommitteeMemberUpdateStakingParametersOperation {
    fn fee(&self) -> &AssetAmount {
        &self.fee
    }

    fn fee_payer(&self) -> AccountId {
        AccountId::COMMITTEE
    }

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        let params = &self.new_parameters;
        ensure(
            params.poc_min_stake > 0 && params.poc_min_stake <= params.poc_max_stake,
            "poc_min_stake",
            "must be positive and at most poc_max_stake",
        )?;
        ensure(
            params.poc_max_stake <= MAX_SHARE_SUPPLY,
            "poc_max_stake",
            "exceeds maximum share supply",
        )?;
        check_percent("poc_referral_percent", params.poc_referral_percent)?;
        ensure(!params.poc_periods.is_empty(), "poc_periods", "must not be empty")?;
        ensure(
            params.poc_periods.iter().all(|p| *p > 0),
            "poc_periods",
            "periods must be positive",
        )
    }
}

/// A funded worker proposal: daily pay over a fixed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCreateOperation {
    pub fee: AssetAmount,
    pub owner: AccountId,
    pub work_begin_date: u32,
    pub work_end_date: u32,
    pub daily_pay: i64,
    pub name: String,
    pub url: String,
}

impl OperationBody for WorkerCreateOperation {
    fee_paid_by!(owner);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.work_end_date > self.work_begin_date,
            "work_end_date",
            "must be after work_begin_date",
        )?;
        ensure(
            self.daily_pay > 0 && self.daily_pay <= MAX_SHARE_SUPPLY,
            "daily_pay",
            "must be positive",
        )?;
        check_text("name", &self.name, 1, MAX_WORKER_NAME_LENGTH)?;
        check_url("url", &self.url)
    }
}
