//! SwapRail Custody Core
//!
//! Registry of non-fungible assets held in escrow while they are traded
//! through the swap engine.
//!
//! # Architecture
//!
//! - **Arena of records**: listed assets live in an append-only arena
//!   addressed by stable integer handles; index 0 is a reserved sentinel
//! - **Owner index**: per-owner ordered sequences with O(1) insertion and
//!   O(1) swap-remove, kept consistent by a reverse index
//! - **External custody**: the physical asset and fund movements are the job
//!   of external services behind the traits in [`services`]
//!
//! # Invariants
//!
//! - Cross-reference: for every owner `o` and position `i`,
//!   `reverse[key(assets[owner_index[o][i]])] == i`
//! - Every live record is indexed exactly once
//! - The sentinel row is never owned and never indexed

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod ledger;
pub mod services;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use ledger::CustodyLedger;
pub use services::{
    AssetTransferService, FundsService, InMemoryAssetService, InMemoryFundsService,
};
pub use types::{
    AccountId, AssetIndex, AssetKey, AssetRecord, Bounty, Currency, TokenId, SENTINEL_ASSET,
};
