//! Offer and counter-offer lifecycle
//!
//! Creation and cancellation of exchange proposals. Positive bounties are
//! collected into escrow at creation time; counter-offer assets are
//! deposited into custody atomically with the counter-offer itself.
//! Acceptance lives in [`crate::executor`].
//!
//! Cancellation deletes the proposal record before any refund transfer, so
//! a duplicate or reentrant cancellation observes no record.

use chrono::{DateTime, Duration, Utc};
use custody_core::{
    types::{AccountId, AssetIndex, Bounty, TokenId, SENTINEL_ASSET},
    AssetTransferService, FundsService,
};
use rust_decimal::Decimal;

use crate::{
    engine::SwapEngine,
    events, funds,
    types::{AssetSpec, CallContext, CounterOffer, CounterOfferId, Offer, OfferId},
    Error, Result,
};

impl<A: AssetTransferService, F: FundsService> SwapEngine<A, F> {
    /// Create a direct offer against a custodied asset.
    ///
    /// `requested` must be live and owned by someone other than the caller;
    /// `offered` is either the sentinel (funds-only) or a live asset of the
    /// caller distinct from `requested`. A positive bounty is collected into
    /// escrow immediately; a non-positive bounty requires zero attached
    /// value.
    pub fn create_offer(
        &mut self,
        ctx: &CallContext,
        requested: AssetIndex,
        offered: AssetIndex,
        bounty: Bounty,
        expires_at: DateTime<Utc>,
    ) -> Result<OfferId> {
        self.transactional(|engine| {
            engine.check_expiry_window(ctx.now, expires_at)?;

            match engine.state.ledger.owner_of(requested) {
                None => {
                    return Err(Error::NotFound(format!(
                        "no asset in custody at index {}",
                        requested
                    )))
                }
                Some(owner) if *owner == ctx.caller => {
                    return Err(Error::InvalidArgument(
                        "cannot request an asset you already own".to_string(),
                    ))
                }
                Some(_) => {}
            }

            if offered != SENTINEL_ASSET {
                if offered == requested {
                    return Err(Error::InvalidArgument(
                        "offered and requested assets must differ".to_string(),
                    ));
                }
                match engine.state.ledger.owner_of(offered) {
                    None => {
                        return Err(Error::NotFound(format!(
                            "no asset in custody at index {}",
                            offered
                        )))
                    }
                    Some(owner) if *owner != ctx.caller => {
                        return Err(Error::NotOwner(format!(
                            "{} does not own the asset at index {}",
                            ctx.caller, offered
                        )))
                    }
                    Some(_) => {}
                }
            }

            engine.settle_creation_bounty(ctx, &bounty)?;

            let id = engine.state.allocate_offer_id();
            let offer = Offer {
                id,
                offerer: ctx.caller.clone(),
                requested_asset: requested,
                offered_asset: offered,
                bounty: bounty.clone(),
                expires_at,
                created_at: ctx.now,
            };
            engine.state.offers.insert(id, offer);

            events::emit_offer_made(id, &ctx.caller, requested, offered, &bounty);
            engine.metrics.record_offer_created();
            Ok(id)
        })
    }

    /// Respond to an open offer with a bundle of the caller's own assets.
    ///
    /// The caller must currently custody the parent's requested asset. Every
    /// asset in `offered` is deposited into custody atomically with the
    /// counter-offer; the requested side is fixed to the parent's offered
    /// side. The effective expiry is capped at the parent's.
    pub fn create_counter_offer(
        &mut self,
        ctx: &CallContext,
        parent_offer_id: OfferId,
        offered: Vec<AssetSpec>,
        bounty: Bounty,
        expires_at: DateTime<Utc>,
    ) -> Result<CounterOfferId> {
        self.transactional(|engine| {
            let parent = engine
                .state
                .offers
                .get(&parent_offer_id)
                .cloned()
                .ok_or_else(|| {
                    Error::NotFound(format!("no open offer with id {}", parent_offer_id))
                })?;
            if parent.is_expired(ctx.now) {
                return Err(Error::Expired(format!(
                    "offer {} expired at {}",
                    parent_offer_id, parent.expires_at
                )));
            }
            if parent.offerer == ctx.caller {
                return Err(Error::InvalidArgument(
                    "cannot counter your own offer".to_string(),
                ));
            }

            match engine.state.ledger.owner_of(parent.requested_asset) {
                None => {
                    return Err(Error::NotFound(
                        "the offer's requested asset is no longer in custody".to_string(),
                    ))
                }
                Some(owner) if *owner != ctx.caller => {
                    return Err(Error::NotOwner(format!(
                        "{} does not own the offer's requested asset",
                        ctx.caller
                    )))
                }
                Some(_) => {}
            }

            if offered.is_empty() {
                return Err(Error::InvalidArgument(
                    "a counter-offer must carry at least one asset".to_string(),
                ));
            }
            if offered.len() > engine.config.max_assets_per_proposal {
                return Err(Error::InvalidArgument(format!(
                    "counter-offer carries {} assets, the cap is {}",
                    offered.len(),
                    engine.config.max_assets_per_proposal
                )));
            }

            let effective_expiry = expires_at.min(parent.expires_at);
            engine.check_expiry_window(ctx.now, effective_expiry)?;

            if !bounty.creator_pays() && ctx.attached_value != Decimal::ZERO {
                return Err(Error::AmountMismatch {
                    expected: Decimal::ZERO,
                    realized: ctx.attached_value,
                });
            }

            // Deposit the offered bundle; on any failure, hand back what is
            // already escrowed before bailing out.
            let mut offered_indices = Vec::with_capacity(offered.len());
            let mut escrowed: Vec<(AccountId, TokenId)> = Vec::new();
            for spec in &offered {
                match engine.deposit_asset(
                    ctx,
                    &spec.collection,
                    &spec.token_id,
                    spec.metadata.clone(),
                ) {
                    Ok(index) => {
                        offered_indices.push(index);
                        escrowed.push((spec.collection.clone(), spec.token_id.clone()));
                    }
                    Err(e) => {
                        engine.release_assets(&escrowed, &ctx.caller);
                        return Err(e);
                    }
                }
            }

            if bounty.creator_pays() {
                let escrow = engine.config.escrow_account.clone();
                if let Err(e) = funds::collect(
                    &mut engine.funds,
                    &escrow,
                    ctx,
                    &bounty.currency,
                    bounty.magnitude(),
                ) {
                    engine.release_assets(&escrowed, &ctx.caller);
                    return Err(e);
                }
            }

            let requested_assets = if parent.is_funds_only() {
                Vec::new()
            } else {
                vec![parent.offered_asset]
            };

            let id = engine.state.allocate_counter_offer_id();
            let counter = CounterOffer {
                id,
                parent_offer_id,
                creator: ctx.caller.clone(),
                offered_assets: offered_indices,
                requested_assets,
                counterparty: parent.offerer.clone(),
                bounty: bounty.clone(),
                expires_at: effective_expiry,
                created_at: ctx.now,
            };
            engine.state.counter_offers.insert(id, counter);

            events::emit_counter_offer_made(id, parent_offer_id, &ctx.caller, offered.len(), &bounty);
            engine.metrics.record_counter_offer_created();
            Ok(id)
        })
    }

    /// Cancel an offer. Creator only; allowed after expiry. The escrowed
    /// positive bounty, if any, is refunded after the record is deleted.
    pub fn cancel_offer(&mut self, ctx: &CallContext, id: OfferId) -> Result<()> {
        self.transactional(|engine| {
            let offer = engine
                .state
                .offers
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("no open offer with id {}", id)))?;
            if offer.offerer != ctx.caller {
                return Err(Error::NotOwner(format!(
                    "only {} may cancel offer {}",
                    offer.offerer, id
                )));
            }

            engine.state.offers.remove(&id);
            if offer.bounty.creator_pays() {
                funds::pay(
                    &mut engine.funds,
                    &offer.bounty.currency,
                    &offer.offerer,
                    offer.bounty.magnitude(),
                )?;
            }

            events::emit_offer_cancelled(id, &offer.offerer);
            engine.metrics.record_proposal_cancelled();
            Ok(())
        })
    }

    /// Cancel a counter-offer. Creator only; allowed after expiry and after
    /// the parent offer is gone. Still-custodied offered assets are returned
    /// to the creator, then the escrowed positive bounty is refunded.
    pub fn cancel_counter_offer(&mut self, ctx: &CallContext, id: CounterOfferId) -> Result<()> {
        self.transactional(|engine| {
            let counter = engine
                .state
                .counter_offers
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("no open counter-offer with id {}", id)))?;
            if counter.creator != ctx.caller {
                return Err(Error::NotOwner(format!(
                    "only {} may cancel counter-offer {}",
                    counter.creator, id
                )));
            }

            engine.state.counter_offers.remove(&id);

            let escrow = engine.config.escrow_account.clone();
            let mut returned: Vec<(AccountId, TokenId)> = Vec::new();
            for &index in &counter.offered_assets {
                // Assets withdrawn or re-homed since creation are skipped
                let record = match engine.state.ledger.get(index) {
                    Some(record) if record.owner.as_ref() == Some(&counter.creator) => {
                        record.clone()
                    }
                    _ => continue,
                };
                engine.state.ledger.remove(index)?;
                if let Err(e) = engine.assets.transfer(
                    &record.collection,
                    &record.token_id,
                    &escrow,
                    &counter.creator,
                ) {
                    engine.reclaim_assets(&returned, &counter.creator);
                    return Err(Error::TransferRejected(e.to_string()));
                }
                returned.push((record.collection, record.token_id));
            }

            if counter.bounty.creator_pays() {
                if let Err(e) = funds::pay(
                    &mut engine.funds,
                    &counter.bounty.currency,
                    &counter.creator,
                    counter.bounty.magnitude(),
                ) {
                    engine.reclaim_assets(&returned, &counter.creator);
                    return Err(e);
                }
            }

            events::emit_counter_offer_cancelled(id, &counter.creator);
            engine.metrics.record_proposal_cancelled();
            Ok(())
        })
    }

    /// Reject an expiry closer than the configured minimum window
    pub(crate) fn check_expiry_window(
        &self,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let window = i64::try_from(self.config.min_expiry_window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                Error::Config(format!(
                    "minimum expiry window {}s is out of range",
                    self.config.min_expiry_window_secs
                ))
            })?;
        if expires_at.signed_duration_since(now) < window {
            return Err(Error::InvalidArgument(format!(
                "expiry must be at least {}s away",
                self.config.min_expiry_window_secs
            )));
        }
        Ok(())
    }

    /// Collect a positive creation bounty into escrow; a non-positive
    /// bounty requires zero attached value.
    pub(crate) fn settle_creation_bounty(&mut self, ctx: &CallContext, bounty: &Bounty) -> Result<()> {
        if bounty.creator_pays() {
            let escrow = self.config.escrow_account.clone();
            funds::collect(
                &mut self.funds,
                &escrow,
                ctx,
                &bounty.currency,
                bounty.magnitude(),
            )
        } else if ctx.attached_value != Decimal::ZERO {
            Err(Error::AmountMismatch {
                expected: Decimal::ZERO,
                realized: ctx.attached_value,
            })
        } else {
            Ok(())
        }
    }

    /// Best-effort unwind: hand escrowed assets back to `to`, logging
    /// failures. Used when a multi-asset operation dies half-way.
    fn release_assets(&mut self, keys: &[(AccountId, TokenId)], to: &AccountId) {
        let escrow = self.config.escrow_account.clone();
        for (collection, token_id) in keys {
            if let Err(e) = self.assets.transfer(collection, token_id, &escrow, to) {
                tracing::error!(
                    %collection,
                    token = %token_id,
                    %to,
                    error = %e,
                    "failed to release escrowed asset during unwind"
                );
            }
        }
    }

    /// Best-effort unwind in the other direction: pull already-returned
    /// assets back into escrow to match the restored ledger state.
    fn reclaim_assets(&mut self, keys: &[(AccountId, TokenId)], from: &AccountId) {
        for (collection, token_id) in keys {
            self.claw_back_asset(collection, token_id, from);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::Utc;
    use custody_core::{
        types::{Currency, SENTINEL_ASSET},
        InMemoryAssetService, InMemoryFundsService,
    };

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn ctx(name: &str) -> CallContext {
        CallContext::new(acct(name), Utc::now())
    }

    fn expiry() -> DateTime<Utc> {
        Utc::now() + Duration::hours(1)
    }

    fn engine() -> SwapEngine<InMemoryAssetService, InMemoryFundsService> {
        let config = Config::default();
        let mut assets = InMemoryAssetService::new();
        assets.register_collection(acct("punks"));
        assets.mint(acct("punks"), TokenId::new("1"), acct("alice"));
        assets.mint(acct("punks"), TokenId::new("2"), acct("bob"));
        assets.mint(acct("punks"), TokenId::new("3"), acct("bob"));
        let funds = InMemoryFundsService::new(config.escrow_account.clone());
        SwapEngine::new(config, assets, funds)
    }

    fn deposit(
        engine: &mut SwapEngine<InMemoryAssetService, InMemoryFundsService>,
        who: &str,
        token: &str,
    ) -> AssetIndex {
        engine
            .deposit(&ctx(who), acct("punks"), TokenId::new(token), String::new())
            .unwrap()
    }

    #[test]
    fn test_create_offer_against_another_owners_asset() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");

        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();
        assert_eq!(id, 1);
        let offer = engine.offer(id).unwrap();
        assert_eq!(offer.offerer, acct("alice"));
        assert_eq!(offer.requested_asset, b);
        assert_eq!(offer.offered_asset, a);
    }

    #[test]
    fn test_offer_ids_are_monotonic() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");

        let first = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();
        let second = engine
            .create_offer(&ctx("bob"), a, b, Bounty::none(), expiry())
            .unwrap();
        assert_eq!((first, second), (1, 2));
    }

    #[test]
    fn test_create_offer_rejects_own_requested_asset() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");

        let result = engine.create_offer(&ctx("alice"), a, SENTINEL_ASSET, Bounty::none(), expiry());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_create_offer_rejects_foreign_offered_asset() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");

        // bob tries to offer alice's asset
        let result = engine.create_offer(&ctx("bob"), a, a, Bounty::none(), expiry());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        let result = engine.create_offer(&ctx("carol"), a, b, Bounty::none(), expiry());
        assert!(matches!(result, Err(Error::NotOwner(_))));
    }

    #[test]
    fn test_create_offer_rejects_short_expiry() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");

        let soon = Utc::now() + Duration::seconds(10);
        let result = engine.create_offer(&ctx("alice"), b, a, Bounty::none(), soon);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_oversized_expiry_window_fails_loudly() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");

        // A window that cannot be represented must error, not wrap negative
        engine.config.min_expiry_window_secs = u64::MAX;
        let result = engine.create_offer(&ctx("alice"), b, a, Bounty::none(), expiry());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_positive_bounty_escrowed_at_creation() {
        let mut engine = engine();
        let b = deposit(&mut engine, "bob", "2");
        engine
            .funds_service_mut()
            .credit(Currency::Native, acct("alice"), Decimal::from(50));

        let ctx = CallContext::with_value(acct("alice"), Utc::now(), Decimal::from(50));
        engine
            .create_offer(
                &ctx,
                b,
                SENTINEL_ASSET,
                Bounty::native(Decimal::from(50)),
                expiry(),
            )
            .unwrap();

        let escrow = engine.config().escrow_account.clone();
        assert_eq!(
            engine.funds_service().balance_of(&Currency::Native, &escrow),
            Decimal::from(50)
        );
    }

    #[test]
    fn test_negative_bounty_rejects_attached_value() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");

        let ctx = CallContext::with_value(acct("alice"), Utc::now(), Decimal::from(5));
        let result = engine.create_offer(&ctx, b, a, Bounty::native(Decimal::from(-50)), expiry());
        assert!(matches!(result, Err(Error::AmountMismatch { .. })));
    }

    #[test]
    fn test_cancel_offer_refunds_escrowed_bounty() {
        let mut engine = engine();
        let b = deposit(&mut engine, "bob", "2");
        engine
            .funds_service_mut()
            .credit(Currency::Native, acct("alice"), Decimal::from(50));

        let create = CallContext::with_value(acct("alice"), Utc::now(), Decimal::from(50));
        let id = engine
            .create_offer(
                &create,
                b,
                SENTINEL_ASSET,
                Bounty::native(Decimal::from(50)),
                expiry(),
            )
            .unwrap();

        engine.cancel_offer(&ctx("alice"), id).unwrap();
        assert!(engine.offer(id).is_none());
        assert_eq!(
            engine
                .funds_service()
                .balance_of(&Currency::Native, &acct("alice")),
            Decimal::from(50)
        );
    }

    #[test]
    fn test_cancel_offer_creator_only_and_idempotent() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");
        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();

        assert!(matches!(
            engine.cancel_offer(&ctx("bob"), id),
            Err(Error::NotOwner(_))
        ));
        engine.cancel_offer(&ctx("alice"), id).unwrap();
        assert!(matches!(
            engine.cancel_offer(&ctx("alice"), id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_counter_offer_deposits_assets_atomically() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");
        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();

        // bob counters with token 3, still in his wallet
        let counter_id = engine
            .create_counter_offer(
                &ctx("bob"),
                id,
                vec![AssetSpec {
                    collection: acct("punks"),
                    token_id: TokenId::new("3"),
                    metadata: String::new(),
                }],
                Bounty::none(),
                expiry(),
            )
            .unwrap();

        let counter = engine.counter_offer(counter_id).unwrap();
        assert_eq!(counter.counterparty, acct("alice"));
        assert_eq!(counter.requested_assets, vec![a]);
        assert_eq!(counter.offered_assets.len(), 1);
        let deposited = counter.offered_assets[0];
        assert_eq!(engine.asset(deposited).unwrap().owner, Some(acct("bob")));
    }

    #[test]
    fn test_counter_offer_rolls_back_failed_bundle() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");
        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();

        // Second asset in the bundle does not exist
        let result = engine.create_counter_offer(
            &ctx("bob"),
            id,
            vec![
                AssetSpec {
                    collection: acct("punks"),
                    token_id: TokenId::new("3"),
                    metadata: String::new(),
                },
                AssetSpec {
                    collection: acct("punks"),
                    token_id: TokenId::new("404"),
                    metadata: String::new(),
                },
            ],
            Bounty::none(),
            expiry(),
        );
        assert!(result.is_err());

        // Token 3 is back in bob's wallet and out of custody
        assert_eq!(
            engine
                .asset_service()
                .owner_of(&acct("punks"), &TokenId::new("3"))
                .unwrap(),
            acct("bob")
        );
        assert_eq!(engine.counter_offer_count(), 0);
        assert_eq!(engine.ledger().live_count(), 2);
    }

    #[test]
    fn test_counter_offer_rejects_empty_bundle_and_cap() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");
        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();

        let result =
            engine.create_counter_offer(&ctx("bob"), id, vec![], Bounty::none(), expiry());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let spec = AssetSpec {
            collection: acct("punks"),
            token_id: TokenId::new("3"),
            metadata: String::new(),
        };
        let oversized = vec![spec; engine.config().max_assets_per_proposal + 1];
        let result = engine.create_counter_offer(&ctx("bob"), id, oversized, Bounty::none(), expiry());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_counter_offer_expiry_capped_at_parent() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");
        let parent_expiry = Utc::now() + Duration::hours(1);
        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), parent_expiry)
            .unwrap();

        let counter_id = engine
            .create_counter_offer(
                &ctx("bob"),
                id,
                vec![AssetSpec {
                    collection: acct("punks"),
                    token_id: TokenId::new("3"),
                    metadata: String::new(),
                }],
                Bounty::none(),
                Utc::now() + Duration::days(7),
            )
            .unwrap();
        assert_eq!(
            engine.counter_offer(counter_id).unwrap().expires_at,
            parent_expiry
        );
    }

    #[test]
    fn test_counter_offer_requires_requested_asset_ownership() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");
        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();

        // carol does not custody the requested asset
        let result = engine.create_counter_offer(
            &ctx("carol"),
            id,
            vec![AssetSpec {
                collection: acct("punks"),
                token_id: TokenId::new("3"),
                metadata: String::new(),
            }],
            Bounty::none(),
            expiry(),
        );
        assert!(matches!(result, Err(Error::NotOwner(_))));
    }

    #[test]
    fn test_cancel_counter_offer_returns_assets() {
        let mut engine = engine();
        let a = deposit(&mut engine, "alice", "1");
        let b = deposit(&mut engine, "bob", "2");
        let id = engine
            .create_offer(&ctx("alice"), b, a, Bounty::none(), expiry())
            .unwrap();
        let counter_id = engine
            .create_counter_offer(
                &ctx("bob"),
                id,
                vec![AssetSpec {
                    collection: acct("punks"),
                    token_id: TokenId::new("3"),
                    metadata: String::new(),
                }],
                Bounty::none(),
                expiry(),
            )
            .unwrap();

        engine.cancel_counter_offer(&ctx("bob"), counter_id).unwrap();
        assert!(engine.counter_offer(counter_id).is_none());
        assert_eq!(
            engine
                .asset_service()
                .owner_of(&acct("punks"), &TokenId::new("3"))
                .unwrap(),
            acct("bob")
        );
        // The parent offer and the original deposits are untouched
        assert!(engine.offer(id).is_some());
        assert_eq!(engine.ledger().live_count(), 2);
    }
}
