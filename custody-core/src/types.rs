//! Core types for the custody registry
//!
//! All types are designed for:
//! - Deterministic serialization (serde)
//! - Exact arithmetic (Decimal for money)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier (externally owned account or contract address)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token identifier within a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(String);

impl TokenId {
    /// Create new token ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally unique asset identity: (collection, token)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    /// Collection contract the token belongs to
    pub collection: AccountId,
    /// Token within the collection
    pub token_id: TokenId,
}

impl AssetKey {
    /// Create a new asset key
    pub fn new(collection: AccountId, token_id: TokenId) -> Self {
        Self {
            collection,
            token_id,
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.token_id)
    }
}

/// Stable handle into the listed-asset arena
pub type AssetIndex = u64;

/// Reserved index meaning "no asset". The slot exists from construction,
/// is never owned by any account, and is excluded from all owner-index
/// bookkeeping.
pub const SENTINEL_ASSET: AssetIndex = 0;

/// A deposited asset record.
///
/// `owner == None` marks the sentinel row and removed slots; a slot is never
/// reused once cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Custody owner while deposited; `None` for sentinel/removed slots
    pub owner: Option<AccountId>,
    /// Collection contract
    pub collection: AccountId,
    /// Token within the collection
    pub token_id: TokenId,
    /// Free-form metadata supplied at deposit time
    pub metadata: String,
}

impl AssetRecord {
    /// The record's (collection, token) identity
    pub fn key(&self) -> AssetKey {
        AssetKey::new(self.collection.clone(), self.token_id.clone())
    }

    /// Whether the slot holds a live, owned record
    pub fn is_live(&self) -> bool {
        self.owner.is_some()
    }
}

/// Currency of a bounty: the native unit or an issued token contract
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// The platform's native currency, attached to calls as value
    Native,
    /// An issued token identified by its contract account
    Token(AccountId),
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Native => write!(f, "native"),
            Currency::Token(contract) => write!(f, "token:{}", contract),
        }
    }
}

/// Signed monetary differential attached to a proposal.
///
/// Positive: the proposal creator pays the counterparty; collected from the
/// creator when the proposal is created and held in escrow. Negative: the
/// creator expects to receive; collected from the accepting counterparty at
/// acceptance time. Zero moves no funds. This sign convention is the single
/// source of truth for fund direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    /// Currency the bounty is denominated in
    pub currency: Currency,
    /// Signed amount
    pub amount: Decimal,
}

impl Bounty {
    /// A zero bounty (no funds move)
    pub fn none() -> Self {
        Self {
            currency: Currency::Native,
            amount: Decimal::ZERO,
        }
    }

    /// A native-currency bounty
    pub fn native(amount: Decimal) -> Self {
        Self {
            currency: Currency::Native,
            amount,
        }
    }

    /// An issued-token bounty
    pub fn token(contract: AccountId, amount: Decimal) -> Self {
        Self {
            currency: Currency::Token(contract),
            amount,
        }
    }

    /// Whether no funds move at any stage
    pub fn is_zero(&self) -> bool {
        self.amount == Decimal::ZERO
    }

    /// Positive bounty: creator pays the counterparty
    pub fn creator_pays(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Negative bounty: creator receives from the counterparty
    pub fn creator_receives(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Absolute amount settled
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }
}
