//! External service contracts
//!
//! The registry never moves assets or funds itself. Physical custody is the
//! job of an external asset-transfer service, and monetary settlement the
//! job of an external funds service. Both are atomic per call: a transfer
//! either fully completes or fails leaving the world unchanged.
//!
//! In-memory implementations are provided for embedders and tests, with
//! failure injection for the unhappy paths (frozen assets, fee-on-transfer
//! tokens, payout-rejecting recipients).

use crate::{
    types::{AccountId, AssetKey, Currency, TokenId},
    Error, Result,
};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// External custody of non-fungible assets
pub trait AssetTransferService {
    /// Whether `collection` conforms to the supported asset standard
    fn supports_asset_standard(&self, collection: &AccountId) -> bool;

    /// Current owner of `(collection, token_id)`
    fn owner_of(&self, collection: &AccountId, token_id: &TokenId) -> Result<AccountId>;

    /// Move the asset between accounts. Atomic per call.
    fn transfer(
        &mut self,
        collection: &AccountId,
        token_id: &TokenId,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<()>;
}

/// External monetary settlement, uniform over native and issued currencies
pub trait FundsService {
    /// Balance of `holder` in `currency`
    fn balance_of(&self, currency: &Currency, holder: &AccountId) -> Decimal;

    /// Pull `amount` from `from` to `to`. Issued tokens may deduct a fee in
    /// flight; callers must verify the realized balance delta.
    fn transfer_from(
        &mut self,
        currency: &Currency,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<()>;

    /// Outbound transfer of `amount` from the escrow account to `to`
    fn transfer(&mut self, currency: &Currency, to: &AccountId, amount: Decimal) -> Result<()>;
}

/// In-memory asset service for embedders and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetService {
    owners: HashMap<AssetKey, AccountId>,
    supported: HashSet<AccountId>,
    frozen: HashSet<AssetKey>,
}

impl InMemoryAssetService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `collection` as conforming to the asset standard
    pub fn register_collection(&mut self, collection: AccountId) {
        self.supported.insert(collection);
    }

    /// Create a token owned by `owner`
    pub fn mint(&mut self, collection: AccountId, token_id: TokenId, owner: AccountId) {
        self.owners.insert(AssetKey::new(collection, token_id), owner);
    }

    /// Make every transfer of this token fail
    pub fn freeze(&mut self, collection: &AccountId, token_id: &TokenId) {
        self.frozen
            .insert(AssetKey::new(collection.clone(), token_id.clone()));
    }
}

impl AssetTransferService for InMemoryAssetService {
    fn supports_asset_standard(&self, collection: &AccountId) -> bool {
        self.supported.contains(collection)
    }

    fn owner_of(&self, collection: &AccountId, token_id: &TokenId) -> Result<AccountId> {
        let key = AssetKey::new(collection.clone(), token_id.clone());
        self.owners
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("token {} does not exist", key)))
    }

    fn transfer(
        &mut self,
        collection: &AccountId,
        token_id: &TokenId,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<()> {
        let key = AssetKey::new(collection.clone(), token_id.clone());
        if self.frozen.contains(&key) {
            return Err(Error::TransferRejected(format!("token {} is frozen", key)));
        }
        let owner = self
            .owners
            .get(&key)
            .ok_or_else(|| Error::NotFound(format!("token {} does not exist", key)))?;
        if owner != from {
            return Err(Error::TransferRejected(format!(
                "token {} is not held by {}",
                key, from
            )));
        }
        self.owners.insert(key, to.clone());
        Ok(())
    }
}

/// In-memory funds service for embedders and tests
#[derive(Debug, Clone)]
pub struct InMemoryFundsService {
    escrow: AccountId,
    balances: HashMap<(Currency, AccountId), Decimal>,
    /// Issued-token contracts that deduct a fee on every transfer, in basis points
    transfer_fee_bps: HashMap<AccountId, u32>,
    /// Recipients that refuse incoming payouts
    rejecting: HashSet<AccountId>,
}

impl InMemoryFundsService {
    /// Create a service paying out of `escrow`
    pub fn new(escrow: AccountId) -> Self {
        Self {
            escrow,
            balances: HashMap::new(),
            transfer_fee_bps: HashMap::new(),
            rejecting: HashSet::new(),
        }
    }

    /// Add `amount` to a holder's balance
    pub fn credit(&mut self, currency: Currency, holder: AccountId, amount: Decimal) {
        *self.balances.entry((currency, holder)).or_default() += amount;
    }

    /// Deduct a fee from every transfer of `token`, in basis points
    pub fn set_transfer_fee_bps(&mut self, token: AccountId, bps: u32) {
        self.transfer_fee_bps.insert(token, bps);
    }

    /// Make every payout to `account` fail
    pub fn set_rejecting(&mut self, account: AccountId) {
        self.rejecting.insert(account);
    }

    /// Let payouts to `account` succeed again
    pub fn clear_rejecting(&mut self, account: &AccountId) {
        self.rejecting.remove(account);
    }

    fn received_after_fee(&self, currency: &Currency, amount: Decimal) -> Decimal {
        match currency {
            Currency::Native => amount,
            Currency::Token(contract) => match self.transfer_fee_bps.get(contract) {
                Some(&bps) => {
                    let rate = Decimal::from(bps) / Decimal::from(10_000u32);
                    amount - amount * rate
                }
                None => amount,
            },
        }
    }

    fn debit(&mut self, currency: &Currency, holder: &AccountId, amount: Decimal) -> Result<()> {
        let balance = self
            .balances
            .entry((currency.clone(), holder.clone()))
            .or_default();
        if *balance < amount {
            return Err(Error::TransferRejected(format!(
                "{} has insufficient {} balance",
                holder, currency
            )));
        }
        *balance -= amount;
        Ok(())
    }
}

impl FundsService for InMemoryFundsService {
    fn balance_of(&self, currency: &Currency, holder: &AccountId) -> Decimal {
        self.balances
            .get(&(currency.clone(), holder.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn transfer_from(
        &mut self,
        currency: &Currency,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> Result<()> {
        self.debit(currency, from, amount)?;
        let received = self.received_after_fee(currency, amount);
        self.credit(currency.clone(), to.clone(), received);
        Ok(())
    }

    fn transfer(&mut self, currency: &Currency, to: &AccountId, amount: Decimal) -> Result<()> {
        if self.rejecting.contains(to) {
            return Err(Error::TransferRejected(format!(
                "{} rejected the transfer",
                to
            )));
        }
        let escrow = self.escrow.clone();
        self.debit(currency, &escrow, amount)?;
        let received = self.received_after_fee(currency, amount);
        self.credit(currency.clone(), to.clone(), received);
        Ok(())
    }
}
