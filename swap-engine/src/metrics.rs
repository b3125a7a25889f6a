//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for monitoring the registry.
//!
//! # Metrics
//!
//! - `swap_assets_listed_total` - Assets deposited into custody
//! - `swap_assets_unlisted_total` - Assets withdrawn from custody
//! - `swap_offers_created_total` - Direct offers created
//! - `swap_counter_offers_created_total` - Counter-offers created
//! - `swap_proposals_cancelled_total` - Offers and counter-offers cancelled
//! - `swap_swaps_executed_total` - Accepted proposals settled

use prometheus::{IntCounter, Registry};
use std::sync::Arc;

/// Metrics collector
///
/// Each engine instance carries its own [`Registry`], so embedding several
/// engines in one process never collides on metric names.
#[derive(Clone)]
pub struct Metrics {
    /// Assets deposited into custody
    pub assets_listed: IntCounter,

    /// Assets withdrawn from custody
    pub assets_unlisted: IntCounter,

    /// Direct offers created
    pub offers_created: IntCounter,

    /// Counter-offers created
    pub counter_offers_created: IntCounter,

    /// Offers and counter-offers cancelled
    pub proposals_cancelled: IntCounter,

    /// Accepted proposals settled
    pub swaps_executed: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let assets_listed = IntCounter::new(
            "swap_assets_listed_total",
            "Assets deposited into custody",
        )?;
        registry.register(Box::new(assets_listed.clone()))?;

        let assets_unlisted = IntCounter::new(
            "swap_assets_unlisted_total",
            "Assets withdrawn from custody",
        )?;
        registry.register(Box::new(assets_unlisted.clone()))?;

        let offers_created = IntCounter::new(
            "swap_offers_created_total",
            "Direct offers created",
        )?;
        registry.register(Box::new(offers_created.clone()))?;

        let counter_offers_created = IntCounter::new(
            "swap_counter_offers_created_total",
            "Counter-offers created",
        )?;
        registry.register(Box::new(counter_offers_created.clone()))?;

        let proposals_cancelled = IntCounter::new(
            "swap_proposals_cancelled_total",
            "Offers and counter-offers cancelled",
        )?;
        registry.register(Box::new(proposals_cancelled.clone()))?;

        let swaps_executed = IntCounter::new(
            "swap_swaps_executed_total",
            "Accepted proposals settled",
        )?;
        registry.register(Box::new(swaps_executed.clone()))?;

        Ok(Self {
            assets_listed,
            assets_unlisted,
            offers_created,
            counter_offers_created,
            proposals_cancelled,
            swaps_executed,
            registry,
        })
    }

    /// Record an asset deposit
    pub fn record_asset_listed(&self) {
        self.assets_listed.inc();
    }

    /// Record an asset withdrawal
    pub fn record_asset_unlisted(&self) {
        self.assets_unlisted.inc();
    }

    /// Record an offer creation
    pub fn record_offer_created(&self) {
        self.offers_created.inc();
    }

    /// Record a counter-offer creation
    pub fn record_counter_offer_created(&self) {
        self.counter_offers_created.inc();
    }

    /// Record a proposal cancellation
    pub fn record_proposal_cancelled(&self) {
        self.proposals_cancelled.inc();
    }

    /// Record a settled swap
    pub fn record_swap_executed(&self) {
        self.swaps_executed.inc();
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
