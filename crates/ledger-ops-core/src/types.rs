//! Strong type definitions for ledger operations.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Object space holding protocol objects (accounts, assets, orders...).
pub const PROTOCOL_SPACE: u8 = 1;

/// The well-known protocol object types an [`ObjectId`] may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ObjectType {
    Account = 2,
    Asset = 3,
    ForceSettlement = 4,
    CommitteeMember = 5,
    Witness = 6,
    LimitOrder = 7,
    CallOrder = 8,
    Proposal = 10,
    WithdrawPermission = 12,
    VestingBalance = 13,
    Worker = 14,
    Balance = 15,
    LotteryGoods = 16,
    MatrixRoom = 17,
    P2pAdv = 18,
    P2pOrder = 19,
    CreditOffer = 20,
    PledgeOffer = 21,
    ApprovedTransfer = 22,
    MassPayment = 23,
    Flipcoin = 24,
}

impl ObjectType {
    /// The type byte of this object type.
    pub const fn type_id(self) -> u8 {
        self as u8
    }
}

/// A generic reference to a protocol object: `space.type.instance`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    pub space: u8,
    pub type_id: u8,
    pub instance: u64,
}

impl ObjectId {
    /// Reference the given instance of a protocol object type.
    pub const fn new(object_type: ObjectType, instance: u64) -> Self {
        Self {
            space: PROTOCOL_SPACE,
            type_id: object_type.type_id(),
            instance,
        }
    }

    /// Check whether this id points at an object of the given type.
    pub fn is(&self, object_type: ObjectType) -> bool {
        self.space == PROTOCOL_SPACE && self.type_id == object_type.type_id()
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space, self.type_id, self.instance)
    }
}

/// An account reference, the instance part of `1.2.N`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    /// The committee account, which owns chain-parameter updates.
    pub const COMMITTEE: Self = Self(0);

    /// The temporary account that pays fees for blinded transfers.
    pub const TEMP: Self = Self(4);

    pub const fn new(instance: u64) -> Self {
        Self(instance)
    }

    pub const fn instance(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ObjectId::new(ObjectType::Account, self.0))
    }
}

impl From<AccountId> for ObjectId {
    fn from(id: AccountId) -> Self {
        ObjectId::new(ObjectType::Account, id.0)
    }
}

/// An asset reference, the instance part of `1.3.N`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl AssetId {
    /// The chain's core asset.
    pub const CORE: Self = Self(0);

    pub const fn new(instance: u64) -> Self {
        Self(instance)
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ObjectId::new(ObjectType::Asset, self.0))
    }
}

impl From<AssetId> for ObjectId {
    fn from(id: AssetId) -> Self {
        ObjectId::new(ObjectType::Asset, id.0)
    }
}

/// An amount of some asset. Amounts are signed so that malformed
/// (negative) values survive decoding and can be rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetAmount {
    pub amount: i64,
    pub asset_id: AssetId,
}

impl AssetAmount {
    pub const fn new(amount: i64, asset_id: AssetId) -> Self {
        Self { amount, asset_id }
    }

    /// An amount of the core asset.
    pub const fn core(amount: i64) -> Self {
        Self::new(amount, AssetId::CORE)
    }
}

impl Default for AssetAmount {
    fn default() -> Self {
        Self::core(0)
    }
}

/// An exchange rate between two assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub base: AssetAmount,
    pub quote: AssetAmount,
}

impl Price {
    pub const fn new(base: AssetAmount, quote: AssetAmount) -> Self {
        Self { base, quote }
    }

    /// A price is well formed when both sides are positive and name
    /// different assets.
    pub fn is_well_formed(&self) -> bool {
        self.base.amount > 0
            && self.quote.amount > 0
            && self.base.asset_id != self.quote.asset_id
    }
}

/// A 32-byte transaction identifier, computed as Blake3(canonical_bytes(tx)).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub [u8; 32]);

impl TransactionId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for TransactionId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
