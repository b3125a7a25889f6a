//! Registry engine: custody entry points and the transactional wrapper
//!
//! Owns the registry state (custody ledger, proposal tables, id counters)
//! and the two external services. Every state-mutating entry point runs
//! inside [`SwapEngine::transactional`]: the shared reentrancy flag is held
//! for the whole call and any error restores the pre-call state, so no
//! partial mutation is ever observable. External transfers already performed
//! on a failed path are compensated with the reverse transfer.
//!
//! Proposal entry points live in [`crate::offers`] and [`crate::executor`];
//! this module carries deposit, withdrawal and the read-only views.

use custody_core::{
    types::{AccountId, AssetIndex, AssetRecord, TokenId},
    AssetTransferService, CustodyLedger, FundsService,
};
use std::collections::HashMap;

use crate::{
    config::Config,
    events,
    guard::ReentrancyFlag,
    metrics::Metrics,
    types::{CallContext, CounterOffer, CounterOfferId, Offer, OfferId},
    Error, Result,
};

/// Internal registry state, snapshotted and restored around every
/// state-mutating call
#[derive(Debug, Clone)]
pub(crate) struct RegistryState {
    pub ledger: CustodyLedger,
    pub offers: HashMap<OfferId, Offer>,
    pub counter_offers: HashMap<CounterOfferId, CounterOffer>,
    next_offer_id: OfferId,
    next_counter_offer_id: CounterOfferId,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            ledger: CustodyLedger::new(),
            offers: HashMap::new(),
            counter_offers: HashMap::new(),
            next_offer_id: 1,
            next_counter_offer_id: 1,
        }
    }

    pub fn allocate_offer_id(&mut self) -> OfferId {
        let id = self.next_offer_id;
        self.next_offer_id += 1;
        id
    }

    pub fn allocate_counter_offer_id(&mut self) -> CounterOfferId {
        let id = self.next_counter_offer_id;
        self.next_counter_offer_id += 1;
        id
    }
}

/// Escrow-based asset-swap registry
///
/// Generic over the external asset-transfer and funds services. The engine
/// never reads the clock or the caller identity itself; both arrive through
/// a [`CallContext`] supplied by the execution environment.
pub struct SwapEngine<A, F> {
    pub(crate) state: RegistryState,
    pub(crate) assets: A,
    pub(crate) funds: F,
    pub(crate) config: Config,
    pub(crate) metrics: Metrics,
    guard: ReentrancyFlag,
}

impl<A: AssetTransferService, F: FundsService> SwapEngine<A, F> {
    /// Create a new registry over the given services
    pub fn new(config: Config, assets: A, funds: F) -> Self {
        Self {
            state: RegistryState::new(),
            assets,
            funds,
            config,
            metrics: Metrics::default(),
            guard: ReentrancyFlag::new(),
        }
    }

    /// Run one entry point under the reentrancy guard with snapshot
    /// rollback. Internal state mutations of a failed call are undone here;
    /// external interactions are compensated at the call sites.
    pub(crate) fn transactional<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let _entry = self.guard.enter()?;
        let snapshot = self.state.clone();
        let result = f(self);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    /// Deposit an asset into custody.
    ///
    /// The collection must conform to the supported asset standard, the
    /// caller must be the token's current holder, and the token must not
    /// already be in custody. The record is inserted first, then the asset
    /// is physically transferred into the escrow account.
    pub fn deposit(
        &mut self,
        ctx: &CallContext,
        collection: AccountId,
        token_id: TokenId,
        metadata: String,
    ) -> Result<AssetIndex> {
        self.transactional(|engine| {
            let index = engine.deposit_asset(ctx, &collection, &token_id, metadata.clone())?;
            let key = custody_core::types::AssetKey::new(collection.clone(), token_id.clone());
            events::emit_asset_listed(&ctx.caller, &key, index);
            engine.metrics.record_asset_listed();
            Ok(index)
        })
    }

    /// Withdraw a custodied asset back to its owner.
    ///
    /// Proposals referencing the asset are deliberately left in place; their
    /// acceptance re-validation makes them dead on read.
    pub fn withdraw(&mut self, ctx: &CallContext, index: AssetIndex) -> Result<()> {
        self.transactional(|engine| {
            let owner = engine
                .state
                .ledger
                .owner_of(index)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("no asset in custody at index {}", index)))?;
            if owner != ctx.caller {
                return Err(Error::NotOwner(format!(
                    "{} does not own the asset at index {}",
                    ctx.caller, index
                )));
            }

            let record = engine.state.ledger.remove(index)?;
            let escrow = engine.config.escrow_account.clone();
            engine
                .assets
                .transfer(&record.collection, &record.token_id, &escrow, &ctx.caller)
                .map_err(|e| Error::TransferRejected(e.to_string()))?;

            events::emit_asset_unlisted(&ctx.caller, &record.key(), index);
            engine.metrics.record_asset_unlisted();
            Ok(())
        })
    }

    /// Shared deposit path: validates holdership against the asset service,
    /// inserts the custody record, then pulls the asset into escrow.
    pub(crate) fn deposit_asset(
        &mut self,
        ctx: &CallContext,
        collection: &AccountId,
        token_id: &TokenId,
        metadata: String,
    ) -> Result<AssetIndex> {
        if !self.assets.supports_asset_standard(collection) {
            return Err(Error::InvalidArgument(format!(
                "collection {} does not conform to the supported asset standard",
                collection
            )));
        }
        let holder = self
            .assets
            .owner_of(collection, token_id)
            .map_err(|e| Error::NotFound(e.to_string()))?;
        if holder != ctx.caller {
            return Err(Error::NotOwner(format!(
                "{} does not hold {}/{}",
                ctx.caller, collection, token_id
            )));
        }

        let index = self.state.ledger.insert(
            ctx.caller.clone(),
            collection.clone(),
            token_id.clone(),
            metadata,
        )?;
        let escrow = self.config.escrow_account.clone();
        self.assets
            .transfer(collection, token_id, &ctx.caller, &escrow)
            .map_err(|e| Error::TransferRejected(e.to_string()))?;
        Ok(index)
    }

    /// Push an already-escrowed asset back toward escrow while unwinding a
    /// failed operation. Best-effort: failures are logged, never propagated.
    pub(crate) fn claw_back_asset(
        &mut self,
        collection: &AccountId,
        token_id: &TokenId,
        from: &AccountId,
    ) {
        let escrow = self.config.escrow_account.clone();
        if let Err(e) = self.assets.transfer(collection, token_id, from, &escrow) {
            tracing::error!(
                %collection,
                token = %token_id,
                %from,
                error = %e,
                "failed to claw back asset transfer"
            );
        }
    }

    /// Live custody record at `index`, if any
    pub fn asset(&self, index: AssetIndex) -> Option<&AssetRecord> {
        self.state.ledger.get(index)
    }

    /// Indices currently in custody for `owner`, in sequence order
    pub fn assets_of(&self, owner: &AccountId) -> &[AssetIndex] {
        self.state.ledger.assets_of(owner)
    }

    /// Open offer by id, if any
    pub fn offer(&self, id: OfferId) -> Option<&Offer> {
        self.state.offers.get(&id)
    }

    /// Open counter-offer by id, if any
    pub fn counter_offer(&self, id: CounterOfferId) -> Option<&CounterOffer> {
        self.state.counter_offers.get(&id)
    }

    /// Number of open offers
    pub fn offer_count(&self) -> usize {
        self.state.offers.len()
    }

    /// Number of open counter-offers
    pub fn counter_offer_count(&self) -> usize {
        self.state.counter_offers.len()
    }

    /// The custody ledger, for inspection
    pub fn ledger(&self) -> &CustodyLedger {
        &self.state.ledger
    }

    /// Metrics collector
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The external asset service
    pub fn asset_service(&self) -> &A {
        &self.assets
    }

    /// Mutable access to the external asset service, for embedders wiring up
    /// collections and test harnesses injecting failures
    pub fn asset_service_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    /// The external funds service
    pub fn funds_service(&self) -> &F {
        &self.funds
    }

    /// Mutable access to the external funds service
    pub fn funds_service_mut(&mut self) -> &mut F {
        &mut self.funds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use custody_core::{
        types::{AssetKey, Currency},
        InMemoryAssetService, InMemoryFundsService,
    };
    use rust_decimal::Decimal;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn engine() -> SwapEngine<InMemoryAssetService, InMemoryFundsService> {
        let config = Config::default();
        let mut assets = InMemoryAssetService::new();
        assets.register_collection(acct("punks"));
        assets.mint(acct("punks"), TokenId::new("1"), acct("alice"));
        assets.mint(acct("punks"), TokenId::new("2"), acct("bob"));
        let funds = InMemoryFundsService::new(config.escrow_account.clone());
        SwapEngine::new(config, assets, funds)
    }

    #[test]
    fn test_deposit_escrows_the_asset() {
        let mut engine = engine();
        let ctx = CallContext::new(acct("alice"), Utc::now());

        let index = engine
            .deposit(&ctx, acct("punks"), TokenId::new("1"), String::new())
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(engine.asset(index).unwrap().owner, Some(acct("alice")));
        assert_eq!(
            engine
                .asset_service()
                .owner_of(&acct("punks"), &TokenId::new("1"))
                .unwrap(),
            engine.config().escrow_account
        );
        assert_eq!(engine.metrics().assets_listed.get(), 1);
    }

    #[test]
    fn test_deposit_rejects_unsupported_collection() {
        let mut engine = engine();
        let ctx = CallContext::new(acct("alice"), Utc::now());
        let result = engine.deposit(&ctx, acct("rocks"), TokenId::new("1"), String::new());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_deposit_rejects_non_holder() {
        let mut engine = engine();
        let ctx = CallContext::new(acct("bob"), Utc::now());
        let result = engine.deposit(&ctx, acct("punks"), TokenId::new("1"), String::new());
        assert!(matches!(result, Err(Error::NotOwner(_))));
    }

    #[test]
    fn test_deposit_rolls_back_on_transfer_failure() {
        let mut engine = engine();
        engine
            .asset_service_mut()
            .freeze(&acct("punks"), &TokenId::new("1"));

        let ctx = CallContext::new(acct("alice"), Utc::now());
        let result = engine.deposit(&ctx, acct("punks"), TokenId::new("1"), String::new());
        assert!(matches!(result, Err(Error::TransferRejected(_))));

        // The failed insert left no trace
        assert_eq!(engine.ledger().live_count(), 0);
        assert!(!engine
            .ledger()
            .contains_key(&AssetKey::new(acct("punks"), TokenId::new("1"))));
    }

    #[test]
    fn test_withdraw_returns_the_asset() {
        let mut engine = engine();
        let ctx = CallContext::new(acct("alice"), Utc::now());
        let index = engine
            .deposit(&ctx, acct("punks"), TokenId::new("1"), String::new())
            .unwrap();

        engine.withdraw(&ctx, index).unwrap();
        assert!(engine.asset(index).is_none());
        assert_eq!(
            engine
                .asset_service()
                .owner_of(&acct("punks"), &TokenId::new("1"))
                .unwrap(),
            acct("alice")
        );
    }

    #[test]
    fn test_withdraw_rejects_non_owner() {
        let mut engine = engine();
        let alice = CallContext::new(acct("alice"), Utc::now());
        let index = engine
            .deposit(&alice, acct("punks"), TokenId::new("1"), String::new())
            .unwrap();

        let bob = CallContext::new(acct("bob"), Utc::now());
        assert!(matches!(
            engine.withdraw(&bob, index),
            Err(Error::NotOwner(_))
        ));
    }

    #[test]
    fn test_withdraw_twice_fails_not_found() {
        let mut engine = engine();
        let ctx = CallContext::new(acct("alice"), Utc::now());
        let index = engine
            .deposit(&ctx, acct("punks"), TokenId::new("1"), String::new())
            .unwrap();

        engine.withdraw(&ctx, index).unwrap();
        assert!(matches!(
            engine.withdraw(&ctx, index),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_transactional_restores_state_on_error() {
        let mut engine = engine();
        let result: Result<()> = engine.transactional(|engine| {
            engine
                .state
                .ledger
                .insert(acct("x"), acct("punks"), TokenId::new("9"), String::new())?;
            Err(Error::InvalidArgument("boom".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(engine.ledger().live_count(), 0);
    }

    #[test]
    fn test_unused_funds_service_stays_empty() {
        let engine = engine();
        assert_eq!(
            engine
                .funds_service()
                .balance_of(&Currency::Native, &acct("alice")),
            Decimal::ZERO
        );
    }
}
