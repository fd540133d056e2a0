//! Account registration and maintenance.

use serde::{Deserialize, Serialize};

use crate::authority::{Authority, RequiredAuthorities};
use crate::crypto::Ed25519PublicKey;
use crate::error::ValidationError;
use crate::ops::OperationBody;
use crate::types::{AccountId, AssetAmount};
use crate::validation::{check_account_name, check_distinct, check_percent, ensure, ValidationContext};

/// Listing flags for [`AccountWhitelistOperation`].
pub const NO_LISTING: u8 = 0;
pub const WHITE_LISTED: u8 = 1;
pub const BLACK_LISTED: u8 = 2;

/// Highest referral status an account can be upgraded to.
pub const MAX_REFERRAL_STATUS: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOptions {
    pub memo_key: Ed25519PublicKey,
    pub voting_account: AccountId,
    pub num_witness: u16,
    pub num_committee: u16,
}

impl AccountOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        ensure(
            self.memo_key.is_well_formed(),
            "memo_key",
            "must be a valid public key",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    pub fee: AssetAmount,
    pub registrar: AccountId,
    pub referrer: AccountId,
    /// Share of the fee paid to the referrer, in basis points.
    pub referrer_percent: u16,
    pub name: String,
    pub owner: Authority,
    pub active: Authority,
    pub options: AccountOptions,
}

impl OperationBody for AccountCreateOperation {
    fee_paid_by!(registrar);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_account_name("name", &self.name)?;
        check_percent("referrer_percent", self.referrer_percent)?;
        self.owner.validate()?;
        self.active.validate()?;
        self.options.validate()
    }
}

/// Replace an account's authorities or options.
///
/// Replacing the owner or active authority is a key change and needs the
/// account's owner authority. An options-only update needs only active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    pub fee: AssetAmount,
    pub account: AccountId,
    pub owner: Option<Authority>,
    pub active: Option<Authority>,
    pub new_options: Option<AccountOptions>,
}

impl AccountUpdateOperation {
    pub fn is_owner_update(&self) -> bool {
        self.owner.is_some() || self.active.is_some()
    }
}

impl OperationBody for AccountUpdateOperation {
    fee_paid_by!(account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.account != AccountId::TEMP,
            "account",
            "the temporary account cannot be updated",
        )?;
        ensure(
            self.owner.is_some() || self.active.is_some() || self.new_options.is_some(),
            "account",
            "update changes nothing",
        )?;
        if let Some(owner) = &self.owner {
            owner.validate()?;
        }
        if let Some(active) = &self.active {
            active.validate()?;
        }
        if let Some(options) = &self.new_options {
            options.validate()?;
        }
        Ok(())
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        if self.is_owner_update() {
            required.require_owner(self.account);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWhitelistOperation {
    pub fee: AssetAmount,
    pub authorizing_account: AccountId,
    pub account_to_list: AccountId,
    pub new_listing: u8,
}

impl OperationBody for AccountWhitelistOperation {
    fee_paid_by!(authorizing_account);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            self.new_listing <= WHITE_LISTED | BLACK_LISTED,
            "new_listing",
            "unknown listing flags",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpgradeOperation {
    pub fee: AssetAmount,
    pub account_to_upgrade: AccountId,
    pub upgrade_to_lifetime_member: bool,
}

impl OperationBody for AccountUpgradeOperation {
    fee_paid_by!(account_to_upgrade);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Hand an account over to a new owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransferOperation {
    pub fee: AssetAmount,
    pub account_id: AccountId,
    pub new_owner: AccountId,
}

impl OperationBody for AccountTransferOperation {
    fee_paid_by!(account_id);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        check_distinct("new_owner", self.account_id, self.new_owner)
    }

    fn collect_authorities(&self, required: &mut RequiredAuthorities) {
        required.require_owner(self.account_id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatusUpgradeOperation {
    pub fee: AssetAmount,
    pub account_to_upgrade: AccountId,
    pub referral_status_type: u8,
}

impl OperationBody for AccountStatusUpgradeOperation {
    fee_paid_by!(account_to_upgrade);

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), ValidationError> {
        ensure(
            (1..=MAX_REFERRAL_STATUS).contains(&self.referral_status_type),
            "referral_status_type",
            "unknown referral status",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    fn key(seed: u8) -> Ed25519PublicKey {
        Keypair::from_seed(&[seed; 32]).public_key()
    }

    fn options() -> AccountOptions {
        AccountOptions {
            memo_key: key(3),
            voting_account: AccountId(5),
            num_witness: 0,
            num_committee: 0,
        }
    }

    fn create() -> AccountCreateOperation {
        AccountCreateOperation {
            fee: AssetAmount::core(50),
            registrar: AccountId(17),
            referrer: AccountId(17),
            referrer_percent: 5_000,
            name: "new-account".into(),
            owner: Authority::single_key(key(1)),
            active: Authority::single_key(key(2)),
            options: options(),
        }
    }

    #[test]
    fn test_account_create_valid() {
        assert!(create().validate(&ValidationContext::external()).is_ok());
    }

    #[test]
    fn test_account_create_bad_name() {
        let mut op = create();
        op.name = "X".into();
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::MalformedField { field: "name", .. })
        ));
    }

    #[test]
    fn test_account_create_impossible_owner() {
        let mut op = create();
        op.owner = Authority::new(3).with_key(key(1), 1);
        assert!(matches!(
            op.validate(&ValidationContext::external()),
            Err(ValidationError::InconsistentAuthorityObject(_))
        ));
    }

    #[test]
    fn test_account_update_must_change_something() {
        let op = AccountUpdateOperation {
            fee: AssetAmount::core(1),
            account: AccountId(9),
            owner: None,
            active: None,
            new_options: None,
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
    }

    #[test]
    fn test_owner_update_requires_owner() {
        let op = AccountUpdateOperation {
            fee: AssetAmount::core(1),
            account: AccountId(9),
            owner: Some(Authority::single_key(key(4))),
            active: None,
            new_options: None,
        };
        let mut required = RequiredAuthorities::new();
        op.collect_authorities(&mut required);
        assert!(required.owner.contains(&AccountId(9)));

        let active_only = AccountUpdateOperation {
            owner: None,
            active: Some(Authority::single_key(key(4))),
            ..op
        };
        let mut required = RequiredAuthorities::new();
        active_only.collect_authorities(&mut required);
        assert!(required.owner.contains(&AccountId(9)));

        let options_only = AccountUpdateOperation {
            active: None,
            new_options: Some(options()),
            ..active_only
        };
        let mut required = RequiredAuthorities::new();
        options_only.collect_authorities(&mut required);
        assert!(required.owner.is_empty());
    }

    #[test]
    fn test_status_upgrade_range() {
        let mut op = AccountStatusUpgradeOperation {
            fee: AssetAmount::core(1),
            account_to_upgrade: AccountId(9),
            referral_status_type: 0,
        };
        assert!(op.validate(&ValidationContext::external()).is_err());
        op.referral_status_type = MAX_REFERRAL_STATUS;
        assert!(op.validate(&ValidationContext::external()).is_ok());
    }
}
