//! Proposal types and per-call context

use chrono::{DateTime, Utc};
use custody_core::types::{AccountId, AssetIndex, Bounty, TokenId, SENTINEL_ASSET};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a direct offer
pub type OfferId = u64;

/// Identifier of a counter-offer
pub type CounterOfferId = u64;

/// Per-call environment: who is calling, the native value riding along, and
/// the current time. Supplied by the execution environment and trusted
/// as-is; the engine never reads the clock itself.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Authenticated caller
    pub caller: AccountId,
    /// Native currency attached to the call
    pub attached_value: Decimal,
    /// Current time
    pub now: DateTime<Utc>,
}

impl CallContext {
    /// Context with no attached value
    pub fn new(caller: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            caller,
            attached_value: Decimal::ZERO,
            now,
        }
    }

    /// Context with native value attached
    pub fn with_value(caller: AccountId, now: DateTime<Utc>, attached_value: Decimal) -> Self {
        Self {
            caller,
            attached_value,
            now,
        }
    }
}

/// A conditional exchange proposal referencing two custodied assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Proposal id
    pub id: OfferId,
    /// Creator of the proposal
    pub offerer: AccountId,
    /// Asset the offerer wants, by ledger index
    pub requested_asset: AssetIndex,
    /// Asset the offerer gives, by ledger index; [`SENTINEL_ASSET`] marks a
    /// funds-only offer
    pub offered_asset: AssetIndex,
    /// Signed monetary differential settled alongside the swap
    pub bounty: Bounty,
    /// Moment the proposal stops being acceptable
    pub expires_at: DateTime<Utc>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Whether the offerer gives only funds, no asset
    pub fn is_funds_only(&self) -> bool {
        self.offered_asset == SENTINEL_ASSET
    }

    /// Whether the proposal is past its expiry at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Input shape for assets deposited alongside a counter-offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Collection contract
    pub collection: AccountId,
    /// Token within the collection
    pub token_id: TokenId,
    /// Free-form metadata for the custody record
    pub metadata: String,
}

/// A multi-asset response to an open offer.
///
/// The offered assets are transferred into custody atomically with creation
/// and stay escrowed until acceptance or cancellation; the requested set is
/// the parent offer's offered side and remains with the counterparty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterOffer {
    /// Proposal id
    pub id: CounterOfferId,
    /// Offer this responds to
    pub parent_offer_id: OfferId,
    /// Creator (the owner of the parent's requested asset)
    pub creator: AccountId,
    /// Assets the creator gives, already in custody
    pub offered_assets: Vec<AssetIndex>,
    /// Assets the creator wants: the parent's offered side (empty when the
    /// parent is funds-only)
    pub requested_assets: Vec<AssetIndex>,
    /// Account that may accept: the parent offer's creator
    pub counterparty: AccountId,
    /// Signed monetary differential settled alongside the swap
    pub bounty: Bounty,
    /// Moment the proposal stops being acceptable; never later than the
    /// parent's expiry
    pub expires_at: DateTime<Utc>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl CounterOffer {
    /// Whether the proposal is past its expiry at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_offer_expiry_is_inclusive() {
        let now = Utc::now();
        let offer = Offer {
            id: 1,
            offerer: AccountId::new("alice"),
            requested_asset: 2,
            offered_asset: 1,
            bounty: Bounty::none(),
            expires_at: now,
            created_at: now - Duration::hours(1),
        };
        // expiry == now counts as expired: acceptance requires expiry > now
        assert!(offer.is_expired(now));
        assert!(!offer.is_expired(now - Duration::seconds(1)));
    }

    #[test]
    fn test_proposal_serde_round_trip() {
        let now = Utc::now();
        let offer = Offer {
            id: 7,
            offerer: AccountId::new("alice"),
            requested_asset: 2,
            offered_asset: 1,
            bounty: Bounty::native(Decimal::from(-100)),
            expires_at: now + Duration::hours(1),
            created_at: now,
        };
        let json = serde_json::to_string(&offer).unwrap();
        let back: Offer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, offer);

        let counter = CounterOffer {
            id: 3,
            parent_offer_id: 7,
            creator: AccountId::new("bob"),
            offered_assets: vec![4, 5],
            requested_assets: vec![1],
            counterparty: AccountId::new("alice"),
            bounty: Bounty::none(),
            expires_at: now + Duration::hours(1),
            created_at: now,
        };
        let json = serde_json::to_string(&counter).unwrap();
        let back: CounterOffer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counter);
    }

    #[test]
    fn test_funds_only_marker() {
        let now = Utc::now();
        let offer = Offer {
            id: 1,
            offerer: AccountId::new("alice"),
            requested_asset: 2,
            offered_asset: SENTINEL_ASSET,
            bounty: Bounty::none(),
            expires_at: now + Duration::hours(1),
            created_at: now,
        };
        assert!(offer.is_funds_only());
    }
}
