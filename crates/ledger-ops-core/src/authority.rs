//! Authorities: who must sign for an operation.
//!
//! An operation demands signatures from three places: the *active* authority
//! of some accounts (routine actions), the *owner* authority of some accounts
//! (key and ownership changes), and explicit [`Authority`] structures that
//! are not tied to a registered account.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::crypto::Ed25519PublicKey;
use crate::error::ValidationError;
use crate::ops::Operation;
use crate::types::AccountId;

/// A weighted threshold over accounts and keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    pub account_auths: BTreeMap<AccountId, u16>,
    pub key_auths: BTreeMap<Ed25519PublicKey, u16>,
}

impl Authority {
    /// Create an empty authority with the given threshold.
    pub fn new(weight_threshold: u32) -> Self {
        Self {
            weight_threshold,
            ..Default::default()
        }
    }

    /// An authority satisfied by a single key.
    pub fn single_key(key: Ed25519PublicKey) -> Self {
        Self::new(1).with_key(key, 1)
    }

    /// An authority satisfied by a single account's active authority.
    pub fn single_account(account: AccountId) -> Self {
        Self::new(1).with_account(account, 1)
    }

    pub fn with_key(mut self, key: Ed25519PublicKey, weight: u16) -> Self {
        self.key_auths.insert(key, weight);
        self
    }

    pub fn with_account(mut self, account: AccountId, weight: u16) -> Self {
        self.account_auths.insert(account, weight);
        self
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.account_auths
            .values()
            .chain(self.key_auths.values())
            .map(|w| u64::from(*w))
            .sum()
    }

    /// An authority whose weights can never reach its threshold.
    pub fn is_impossible(&self) -> bool {
        self.total_weight() < u64::from(self.weight_threshold)
    }

    /// Number of entries (accounts plus keys).
    pub fn num_auths(&self) -> usize {
        self.account_auths.len() + self.key_auths.len()
    }

    /// Structural check of the authority itself.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.weight_threshold == 0 {
            return Err(ValidationError::InconsistentAuthorityObject(
                "weight threshold is zero".into(),
            ));
        }
        if let Some(account) = self
            .account_auths
            .iter()
            .find_map(|(account, weight)| (*weight == 0).then_some(account))
        {
            return Err(ValidationError::InconsistentAuthorityObject(format!(
                "account {} has zero weight",
                account
            )));
        }
        for (key, weight) in &self.key_auths {
            if *weight == 0 {
                return Err(ValidationError::InconsistentAuthorityObject(format!(
                    "key {:?} has zero weight",
                    key
                )));
            }
            if !key.is_well_formed() {
                return Err(ValidationError::InconsistentAuthorityObject(format!(
                    "key {:?} is not a valid public key",
                    key
                )));
            }
        }
        if self.is_impossible() {
            return Err(ValidationError::InconsistentAuthorityObject(format!(
                "total weight {} cannot reach threshold {}",
                self.total_weight(),
                self.weight_threshold
            )));
        }
        Ok(())
    }
}

/// The signatures an operation (or transaction) demands.
///
/// `active` and `owner` have set semantics. `other` keeps every embedded
/// authority in encounter order; two structurally equal authorities compare
/// equal but are not merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequiredAuthorities {
    pub active: BTreeSet<AccountId>,
    pub owner: BTreeSet<AccountId>,
    pub other: Vec<Authority>,
}

impl RequiredAuthorities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_active(&mut self, account: AccountId) {
        self.active.insert(account);
    }

    pub fn require_owner(&mut self, account: AccountId) {
        self.owner.insert(account);
    }

    pub fn require_other(&mut self, authority: Authority) {
        self.other.push(authority);
    }

    /// Union with another requirement set: set union of `active` and
    /// `owner`, concatenation of `other`.
    pub fn merge(&mut self, other: RequiredAuthorities) {
        self.active.extend(other.active);
        self.owner.extend(other.owner);
        self.other.extend(other.other);
    }

    /// Drop active requirements that an owner requirement already covers.
    pub fn normalize(&mut self) {
        let owner = &self.owner;
        self.active.retain(|account| !owner.contains(account));
    }

    /// Every account that must sign, at any strength.
    pub fn accounts(&self) -> BTreeSet<AccountId> {
        self.active.union(&self.owner).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.owner.is_empty() && self.other.is_empty()
    }
}

/// The signatures a single operation demands.
///
/// The fee payer's active authority is always required; each variant adds
/// what its own fields declare. Proposals contribute the union of everything
/// they wrap. The result is normalized so an account appears in at most one
/// of `active` and `owner`.
pub fn required_authorities(op: &Operation) -> RequiredAuthorities {
    let mut required = RequiredAuthorities::new();
    op.collect_authorities(&mut required);
    required.normalize();
    required
}

impl FromIterator<RequiredAuthorities> for RequiredAuthorities {
    fn from_iter<I: IntoIterator<Item = RequiredAuthorities>>(iter: I) -> Self {
        let mut merged = RequiredAuthorities::new();
        for auths in iter {
            merged.merge(auths);
        }
        merged.normalize();
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    fn key(seed: u8) -> Ed25519PublicKey {
        Keypair::from_seed(&[seed; 32]).public_key()
    }

    #[test]
    fn test_single_key_authority_is_valid() {
        assert!(Authority::single_key(key(1)).validate().is_ok());
        assert!(Authority::single_account(AccountId(5)).validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let auth = Authority::new(0).with_key(key(1), 1);
        assert!(matches!(
            auth.validate(),
            Err(ValidationError::InconsistentAuthorityObject(_))
        ));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let auth = Authority::new(1)
            .with_account(AccountId(3), 0)
            .with_key(key(1), 1);
        assert!(matches!(
            auth.validate(),
            Err(ValidationError::InconsistentAuthorityObject(_))
        ));
    }

    #[test]
    fn test_impossible_authority_rejected() {
        let auth = Authority::new(5).with_key(key(1), 2).with_key(key(2), 2);
        assert!(auth.is_impossible());
        assert!(auth.validate().is_err());

        let reachable = auth.clone().with_account(AccountId(9), 1);
        assert!(!reachable.is_impossible());
        assert!(reachable.validate().is_ok());
    }

    #[test]
    fn test_malformed_key_rejected() {
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        let auth = Authority::single_key(Ed25519PublicKey(bytes));
        assert!(auth.validate().is_err());
    }

    #[test]
    fn test_merge_and_normalize() {
        let mut a = RequiredAuthorities::new();
        a.require_active(AccountId(1));
        a.require_active(AccountId(2));
        a.require_other(Authority::single_key(key(1)));

        let mut b = RequiredAuthorities::new();
        b.require_owner(AccountId(2));
        b.require_active(AccountId(1));
        b.require_other(Authority::single_key(key(1)));

        let merged: RequiredAuthorities = vec![a, b].into_iter().collect();
        assert_eq!(merged.active, BTreeSet::from([AccountId(1)]));
        assert_eq!(merged.owner, BTreeSet::from([AccountId(2)]));
        // Structurally equal authorities are kept side by side.
        assert_eq!(merged.other.len(), 2);
        assert_eq!(merged.other[0], merged.other[1]);
        assert_eq!(
            merged.accounts(),
            BTreeSet::from([AccountId(1), AccountId(2)])
        );
    }
}
