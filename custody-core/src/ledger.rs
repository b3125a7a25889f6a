//! Asset custody ledger
//!
//! Arena of listed-asset records addressed by stable integer handles, plus a
//! per-owner index supporting O(1) insertion and O(1) removal. Removal is a
//! single remove-and-compact operation: the removed position in the owner's
//! sequence is overwritten by the last element, the sequence shrinks by one,
//! and the moved element's reverse-index entry is repaired before returning.
//!
//! The ledger is pure bookkeeping: it never talks to the external asset
//! service. Physical custody transfers are driven by the swap engine around
//! these mutations.

use crate::{
    types::{AccountId, AssetIndex, AssetKey, AssetRecord, TokenId, SENTINEL_ASSET},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry of assets currently in custody
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodyLedger {
    /// Arena of records; index 0 is the reserved sentinel
    assets: Vec<AssetRecord>,

    /// Per-owner ordered sequences of live asset indices
    owner_index: HashMap<AccountId, Vec<AssetIndex>>,

    /// (collection, token) -> position within the owner's sequence
    reverse_index: HashMap<AssetKey, usize>,
}

impl CustodyLedger {
    /// Create an empty ledger with the sentinel row in place
    pub fn new() -> Self {
        let sentinel = AssetRecord {
            owner: None,
            collection: AccountId::new(""),
            token_id: TokenId::new(""),
            metadata: String::new(),
        };
        Self {
            assets: vec![sentinel],
            owner_index: HashMap::new(),
            reverse_index: HashMap::new(),
        }
    }

    /// Append a record for `owner` and wire up both index structures.
    ///
    /// Rejects a (collection, token) key that is already in custody.
    pub fn insert(
        &mut self,
        owner: AccountId,
        collection: AccountId,
        token_id: TokenId,
        metadata: String,
    ) -> Result<AssetIndex> {
        let key = AssetKey::new(collection.clone(), token_id.clone());
        if self.reverse_index.contains_key(&key) {
            return Err(Error::InvalidArgument(format!(
                "{} is already in custody",
                key
            )));
        }

        let index = self.assets.len() as AssetIndex;
        self.assets.push(AssetRecord {
            owner: Some(owner.clone()),
            collection,
            token_id,
            metadata,
        });

        let seq = self.owner_index.entry(owner.clone()).or_default();
        self.reverse_index.insert(key, seq.len());
        seq.push(index);

        tracing::debug!(%owner, index, "asset record inserted");
        Ok(index)
    }

    /// Remove-and-compact: clears the record and repairs the owner sequence
    /// and reverse index in one operation. Returns the removed record.
    pub fn remove(&mut self, index: AssetIndex) -> Result<AssetRecord> {
        let record = self
            .get(index)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no live asset at index {}", index)))?;
        let owner = record
            .owner
            .clone()
            .ok_or_else(|| Error::NotFound(format!("no live asset at index {}", index)))?;

        self.detach(&owner, index, &record.key())?;
        self.assets[index as usize].owner = None;

        tracing::debug!(%owner, index, "asset record removed");
        Ok(record)
    }

    /// Re-home a live record between owner sequences without clearing it.
    ///
    /// Used by swap execution to reassign custody while the asset stays
    /// deposited. A no-op when `new_owner` already owns the record.
    pub fn reassign(&mut self, index: AssetIndex, new_owner: AccountId) -> Result<()> {
        if index == SENTINEL_ASSET {
            return Err(Error::InvalidArgument(
                "the sentinel index cannot be reassigned".to_string(),
            ));
        }
        let record = self
            .get(index)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no live asset at index {}", index)))?;
        let old_owner = record
            .owner
            .clone()
            .ok_or_else(|| Error::NotFound(format!("no live asset at index {}", index)))?;
        if old_owner == new_owner {
            return Ok(());
        }

        self.detach(&old_owner, index, &record.key())?;
        self.assets[index as usize].owner = Some(new_owner.clone());
        self.attach(new_owner.clone(), index);

        tracing::debug!(%old_owner, %new_owner, index, "asset custody reassigned");
        Ok(())
    }

    /// Swap-with-last-then-pop on the owner's sequence, repairing the moved
    /// element's reverse entry and clearing the removed key's entry.
    fn detach(&mut self, owner: &AccountId, index: AssetIndex, key: &AssetKey) -> Result<()> {
        let pos = self
            .reverse_index
            .remove(key)
            .ok_or_else(|| Error::Inconsistent(format!("{} missing from reverse index", key)))?;

        let moved = {
            let seq = self.owner_index.get_mut(owner).ok_or_else(|| {
                Error::Inconsistent(format!("owner {} missing from owner index", owner))
            })?;
            if seq.get(pos).copied() != Some(index) {
                return Err(Error::Inconsistent(format!(
                    "reverse entry for {} does not point back at index {}",
                    key, index
                )));
            }
            seq.swap_remove(pos);
            seq.get(pos).copied()
        };

        if let Some(moved) = moved {
            let moved_key = self.assets[moved as usize].key();
            self.reverse_index.insert(moved_key, pos);
        }
        if self
            .owner_index
            .get(owner)
            .map_or(false, |seq| seq.is_empty())
        {
            self.owner_index.remove(owner);
        }
        Ok(())
    }

    /// Append `index` to `owner`'s sequence and set its reverse entry
    fn attach(&mut self, owner: AccountId, index: AssetIndex) {
        let key = self.assets[index as usize].key();
        let seq = self.owner_index.entry(owner).or_default();
        self.reverse_index.insert(key, seq.len());
        seq.push(index);
    }

    /// Live record at `index`, if any
    pub fn get(&self, index: AssetIndex) -> Option<&AssetRecord> {
        self.assets
            .get(index as usize)
            .filter(|record| record.is_live())
    }

    /// Custody owner of the live record at `index`, if any
    pub fn owner_of(&self, index: AssetIndex) -> Option<&AccountId> {
        self.get(index).and_then(|record| record.owner.as_ref())
    }

    /// Indices currently owned by `owner`, in sequence order
    pub fn assets_of(&self, owner: &AccountId) -> &[AssetIndex] {
        self.owner_index
            .get(owner)
            .map(|seq| seq.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a (collection, token) key is currently in custody
    pub fn contains_key(&self, key: &AssetKey) -> bool {
        self.reverse_index.contains_key(key)
    }

    /// Number of live records
    pub fn live_count(&self) -> usize {
        self.reverse_index.len()
    }

    /// Total arena slots, including the sentinel and cleared slots
    pub fn slot_count(&self) -> usize {
        self.assets.len()
    }

    /// Verify the cross-reference invariant over the whole ledger.
    ///
    /// For every owner `o` and position `i` in its sequence, the record at
    /// `owner_index[o][i]` must be live, owned by `o`, and have a reverse
    /// entry pointing back at `i`; and every live record must be indexed.
    pub fn check_consistency(&self) -> Result<()> {
        for (owner, seq) in &self.owner_index {
            for (pos, &index) in seq.iter().enumerate() {
                let record = self.assets.get(index as usize).ok_or_else(|| {
                    Error::Inconsistent(format!("owner index references slot {} out of range", index))
                })?;
                if record.owner.as_ref() != Some(owner) {
                    return Err(Error::Inconsistent(format!(
                        "slot {} indexed under {} but owned by {:?}",
                        index, owner, record.owner
                    )));
                }
                if self.reverse_index.get(&record.key()).copied() != Some(pos) {
                    return Err(Error::Inconsistent(format!(
                        "reverse entry for {} disagrees with position {}",
                        record.key(),
                        pos
                    )));
                }
            }
        }

        let indexed: usize = self.owner_index.values().map(|seq| seq.len()).sum();
        let live = self.assets.iter().filter(|r| r.is_live()).count();
        if indexed != live || indexed != self.reverse_index.len() {
            return Err(Error::Inconsistent(format!(
                "{} indexed entries, {} live records, {} reverse entries",
                indexed,
                live,
                self.reverse_index.len()
            )));
        }
        Ok(())
    }
}

impl Default for CustodyLedger {
    fn default() -> Self {
        Self::new()
    }
}
