//! Swap execution
//!
//! Acceptance of offers and counter-offers: the all-or-nothing settlement
//! step. Ownership of every referenced asset is re-validated against the
//! ledger at acceptance time; nothing trusts owners cached at proposal
//! creation, so a withdrawn or re-homed asset makes the proposal dead on
//! read.
//!
//! Settlement order is checks, effects, interactions: funds owed by the
//! acceptor are collected first, custody owners are swapped and the
//! proposal records deleted, and only then are outbound payouts made. A
//! failed payout unwinds the completed transfers and restores the pre-call
//! state.

use custody_core::{
    types::{AccountId, Currency},
    AssetTransferService, FundsService,
};
use rust_decimal::Decimal;

use crate::{
    engine::SwapEngine,
    events, funds,
    types::{CallContext, CounterOfferId, OfferId},
    Error, Result,
};

impl<A: AssetTransferService, F: FundsService> SwapEngine<A, F> {
    /// Accept an open offer.
    ///
    /// The caller must custody the requested asset right now; the offerer
    /// must still custody the offered asset (unless funds-only). A negative
    /// bounty is collected from the caller before settlement; a positive one
    /// is paid out of escrow after it.
    pub fn accept_offer(&mut self, ctx: &CallContext, id: OfferId) -> Result<()> {
        self.transactional(|engine| {
            let offer = engine
                .state
                .offers
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("no open offer with id {}", id)))?;
            if offer.offerer == ctx.caller {
                return Err(Error::InvalidArgument(
                    "cannot accept your own offer".to_string(),
                ));
            }
            if offer.is_expired(ctx.now) {
                return Err(Error::Expired(format!(
                    "offer {} expired at {}",
                    id, offer.expires_at
                )));
            }

            engine.require_custody(offer.requested_asset, &ctx.caller)?;
            if !offer.is_funds_only() {
                engine.require_custody(offer.offered_asset, &offer.offerer)?;
            }

            let collected = engine.collect_acceptance_bounty(ctx, &offer.bounty)?;

            engine
                .state
                .ledger
                .reassign(offer.requested_asset, offer.offerer.clone())?;
            if !offer.is_funds_only() {
                engine
                    .state
                    .ledger
                    .reassign(offer.offered_asset, ctx.caller.clone())?;
            }
            engine.state.offers.remove(&id);

            let payout = if offer.bounty.creator_pays() {
                funds::pay(
                    &mut engine.funds,
                    &offer.bounty.currency,
                    &ctx.caller,
                    offer.bounty.magnitude(),
                )
            } else if offer.bounty.creator_receives() {
                funds::pay(
                    &mut engine.funds,
                    &offer.bounty.currency,
                    &offer.offerer,
                    offer.bounty.magnitude(),
                )
            } else {
                Ok(())
            };
            if let Err(e) = payout {
                engine.refund_collected(ctx, &offer.bounty.currency, collected);
                return Err(e);
            }

            events::emit_swap_executed(id, None, &ctx.caller, &offer.bounty);
            engine.metrics.record_swap_executed();
            Ok(())
        })
    }

    /// Accept an open counter-offer. Counterparty (the parent offer's
    /// creator) only.
    ///
    /// Both the counter-offer and its parent must still be open and
    /// unexpired. Settlement consumes the parent offer: its escrowed
    /// positive bounty is refunded to the caller alongside the counter
    /// bounty's own settlement.
    pub fn accept_counter_offer(&mut self, ctx: &CallContext, id: CounterOfferId) -> Result<()> {
        self.transactional(|engine| {
            let counter = engine
                .state
                .counter_offers
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("no open counter-offer with id {}", id)))?;
            if counter.creator == ctx.caller {
                return Err(Error::InvalidArgument(
                    "cannot accept your own counter-offer".to_string(),
                ));
            }
            if counter.counterparty != ctx.caller {
                return Err(Error::NotOwner(format!(
                    "only {} may accept counter-offer {}",
                    counter.counterparty, id
                )));
            }

            let parent = engine
                .state
                .offers
                .get(&counter.parent_offer_id)
                .cloned()
                .ok_or_else(|| {
                    Error::NotFound(format!(
                        "parent offer {} is no longer open",
                        counter.parent_offer_id
                    ))
                })?;
            if counter.is_expired(ctx.now) {
                return Err(Error::Expired(format!(
                    "counter-offer {} expired at {}",
                    id, counter.expires_at
                )));
            }
            if parent.is_expired(ctx.now) {
                return Err(Error::Expired(format!(
                    "parent offer {} expired at {}",
                    parent.id, parent.expires_at
                )));
            }

            for &index in &counter.requested_assets {
                engine.require_custody(index, &ctx.caller)?;
            }
            for &index in &counter.offered_assets {
                engine.require_custody(index, &counter.creator)?;
            }

            let collected = engine.collect_acceptance_bounty(ctx, &counter.bounty)?;

            for &index in &counter.requested_assets {
                engine.state.ledger.reassign(index, counter.creator.clone())?;
            }
            for &index in &counter.offered_assets {
                engine.state.ledger.reassign(index, ctx.caller.clone())?;
            }
            engine.state.counter_offers.remove(&id);
            engine.state.offers.remove(&counter.parent_offer_id);

            // Outbound payouts: the counter bounty by sign, then the parent's
            // escrowed bounty back to its creator (the caller).
            let mut payouts: Vec<(Currency, AccountId, Decimal)> = Vec::new();
            if counter.bounty.creator_pays() {
                payouts.push((
                    counter.bounty.currency.clone(),
                    ctx.caller.clone(),
                    counter.bounty.magnitude(),
                ));
            } else if counter.bounty.creator_receives() {
                payouts.push((
                    counter.bounty.currency.clone(),
                    counter.creator.clone(),
                    counter.bounty.magnitude(),
                ));
            }
            if parent.bounty.creator_pays() {
                payouts.push((
                    parent.bounty.currency.clone(),
                    parent.offerer.clone(),
                    parent.bounty.magnitude(),
                ));
            }

            let escrow = engine.config.escrow_account.clone();
            let mut done = 0;
            let mut failure = None;
            for (currency, to, amount) in &payouts {
                match funds::pay(&mut engine.funds, currency, to, *amount) {
                    Ok(()) => done += 1,
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
            if let Some(e) = failure {
                for (currency, to, amount) in payouts.iter().take(done) {
                    funds::claw_back(&mut engine.funds, &escrow, currency, to, *amount);
                }
                engine.refund_collected(ctx, &counter.bounty.currency, collected);
                return Err(e);
            }

            events::emit_swap_executed(counter.parent_offer_id, Some(id), &ctx.caller, &counter.bounty);
            engine.metrics.record_swap_executed();
            Ok(())
        })
    }

    /// The asset at `index` must be live and custodied by `owner`
    fn require_custody(&self, index: custody_core::types::AssetIndex, owner: &AccountId) -> Result<()> {
        match self.state.ledger.owner_of(index) {
            None => Err(Error::NotFound(format!(
                "the asset at index {} is no longer in custody",
                index
            ))),
            Some(current) if current != owner => Err(Error::NotOwner(format!(
                "{} no longer owns the asset at index {}",
                owner, index
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Collect the funds the acceptor owes: the magnitude of a negative
    /// bounty. Any other sign requires zero attached value. Returns the
    /// collected amount so a later failure can refund it.
    fn collect_acceptance_bounty(
        &mut self,
        ctx: &CallContext,
        bounty: &custody_core::types::Bounty,
    ) -> Result<Decimal> {
        if bounty.creator_receives() {
            let escrow = self.config.escrow_account.clone();
            funds::collect(
                &mut self.funds,
                &escrow,
                ctx,
                &bounty.currency,
                bounty.magnitude(),
            )?;
            Ok(bounty.magnitude())
        } else if ctx.attached_value != Decimal::ZERO {
            Err(Error::AmountMismatch {
                expected: Decimal::ZERO,
                realized: ctx.attached_value,
            })
        } else {
            Ok(Decimal::ZERO)
        }
    }

    /// Best-effort refund of funds collected earlier in a failed call
    fn refund_collected(&mut self, ctx: &CallContext, currency: &Currency, amount: Decimal) {
        if amount == Decimal::ZERO {
            return;
        }
        if let Err(e) = funds::pay(&mut self.funds, currency, &ctx.caller, amount) {
            tracing::error!(
                %currency,
                caller = %ctx.caller,
                %amount,
                error = %e,
                "failed to refund collected funds during unwind"
            );
        }
    }
}
