//! Observable registry events
//!
//! Structured `tracing` events emitted at the commit point of every
//! state-mutating operation. Embedders subscribe with any `tracing`
//! subscriber; the registry itself never installs one.

use custody_core::types::{AccountId, AssetIndex, AssetKey, Bounty};

use crate::types::{CounterOfferId, OfferId};

/// Asset deposited into custody
pub fn emit_asset_listed(owner: &AccountId, key: &AssetKey, index: AssetIndex) {
    tracing::info!(%owner, asset = %key, index, "asset listed");
}

/// Asset withdrawn from custody
pub fn emit_asset_unlisted(owner: &AccountId, key: &AssetKey, index: AssetIndex) {
    tracing::info!(%owner, asset = %key, index, "asset unlisted");
}

/// Direct offer created
pub fn emit_offer_made(
    id: OfferId,
    offerer: &AccountId,
    requested: AssetIndex,
    offered: AssetIndex,
    bounty: &Bounty,
) {
    tracing::info!(
        offer_id = id,
        %offerer,
        requested,
        offered,
        currency = %bounty.currency,
        amount = %bounty.amount,
        "offer made"
    );
}

/// Direct offer cancelled by its creator
pub fn emit_offer_cancelled(id: OfferId, offerer: &AccountId) {
    tracing::info!(offer_id = id, %offerer, "offer cancelled");
}

/// Counter-offer created against an open offer
pub fn emit_counter_offer_made(
    id: CounterOfferId,
    parent: OfferId,
    creator: &AccountId,
    asset_count: usize,
    bounty: &Bounty,
) {
    tracing::info!(
        counter_offer_id = id,
        parent_offer_id = parent,
        %creator,
        asset_count,
        currency = %bounty.currency,
        amount = %bounty.amount,
        "counter-offer made"
    );
}

/// Counter-offer cancelled by its creator
pub fn emit_counter_offer_cancelled(id: CounterOfferId, creator: &AccountId) {
    tracing::info!(counter_offer_id = id, %creator, "counter-offer cancelled");
}

/// Accepted proposal fully settled
pub fn emit_swap_executed(
    offer_id: OfferId,
    counter_offer_id: Option<CounterOfferId>,
    acceptor: &AccountId,
    bounty: &Bounty,
) {
    tracing::info!(
        offer_id,
        counter_offer_id,
        %acceptor,
        currency = %bounty.currency,
        amount = %bounty.amount,
        "swap executed"
    );
}
