//! SwapRail Swap Engine
//!
//! Escrow-based asset-swap registry: parties deposit non-fungible assets
//! into custody, publish conditional exchange proposals against other
//! deposited assets (optionally with a signed monetary bounty), and
//! counter-parties accept, counter, or cancel those proposals.
//!
//! # Architecture
//!
//! 1. **Custody**: assets are deposited into the [`custody_core`] ledger and
//!    physically escrowed through the external asset-transfer service
//! 2. **Proposals**: offers and counter-offers reference ledger entries;
//!    positive bounties are escrowed at creation
//! 3. **Execution**: acceptance drives an all-or-nothing settlement — funds
//!    in, custody owners swapped, records retired, funds out
//!
//! Every entry point is synchronous and transactional: a reentrancy guard
//! covers the call, and any error restores the registry state so no partial
//! mutation is ever observable.
//!
//! # Example
//!
//! ```no_run
//! use custody_core::{AccountId, InMemoryAssetService, InMemoryFundsService};
//! use swap_engine::{CallContext, Config, SwapEngine};
//!
//! fn main() -> swap_engine::Result<()> {
//!     let config = Config::default();
//!     let assets = InMemoryAssetService::new();
//!     let funds = InMemoryFundsService::new(config.escrow_account.clone());
//!     let mut engine = SwapEngine::new(config, assets, funds);
//!
//!     let ctx = CallContext::new(AccountId::new("alice"), chrono::Utc::now());
//!     // let index = engine.deposit(&ctx, ...)?;
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod funds;
pub mod guard;
pub mod metrics;
pub mod offers;
pub mod types;

// Re-exports
pub use config::Config;
pub use engine::SwapEngine;
pub use error::{Error, Result};
pub use types::{AssetSpec, CallContext, CounterOffer, CounterOfferId, Offer, OfferId};
