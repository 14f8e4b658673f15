//! Ledger Store - Balance, Supply, and Ownership State
//!
//! The store is the sole shared mutable resource of the engine. No component
//! mutates the maps directly; all writes go through the undo-logged mutation
//! API so that an enclosing operation can be unwound in full.
//!
//! # Undo Pattern
//!
//! Mutating operations follow an apply-then-confirm pattern:
//! 1. effects are applied through `credit`/`debit`/`record_owner`/...,
//!    each recording the prior value in an [`UndoLog`]
//! 2. if the operation fails later (a batch item, the acceptance handshake),
//!    `revert()` restores every touched entry in reverse order
//!
//! # Invariants
//! - All arithmetic uses checked operations
//! - BTreeMap for deterministic iteration
//! - Entries are removed when they reach zero (absent = 0)

use crate::errors::{LedgerError, LedgerResult};
use lib_types::{Address, Amount, AssetId, Phase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Composite balance key: (asset, phase, holder)
///
/// Flattened to a single tuple key to avoid sparse nested maps and to make
/// the supply invariant cheap to audit.
pub type BalanceKey = (AssetId, Phase, Address);

/// Composite supply key: (asset, phase)
pub type SupplyKey = (AssetId, Phase);

// ─── Undo Log ───────────────────────────────────────────────────────────

/// A single recorded prior value
#[derive(Debug, Clone)]
enum UndoEntry {
    Balance { key: BalanceKey, prior: Amount },
    Supply { key: SupplyKey, prior: Amount },
    Owner { asset: AssetId, prior: Option<Address> },
}

/// Prior values of every store entry touched by one operation
///
/// Reverting replays the entries in reverse, so an operation that touches
/// the same slot twice still restores the original value.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    /// Create an empty undo log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded mutations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether anything was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Ledger Store ───────────────────────────────────────────────────────

/// Balance, total-supply, and recorded-owner state
///
/// # Storage
/// Uses BTreeMap for deterministic serialization and iteration.
///
/// # Invariants
/// - `total_supply(a, p) == Σ_holder balance(a, p, holder)` after every
///   committed operation
/// - no entry is ever negative; decrements below zero fail, not wrap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerStore {
    /// (asset, phase, holder) -> quantity; absent = 0
    balances: BTreeMap<BalanceKey, Amount>,

    /// (asset, phase) -> circulating quantity; absent = 0
    supplies: BTreeMap<SupplyKey, Amount>,

    /// Recorded phase-0 owner per asset
    ///
    /// Set at phase-0 mint, follows phase-0 transfers, cleared when a
    /// phase-0 burn zeroes the owner's balance. Persists after the asset
    /// advances to a fungible phase: it anchors the current-phase scan.
    owners: BTreeMap<AssetId, Address>,
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Query Surface ──────────────────────────────────────────────────

    /// Balance of a holder at an (asset, phase) slot
    pub fn balance_of(&self, asset: AssetId, phase: Phase, holder: Address) -> Amount {
        self.balances
            .get(&(asset, phase, holder))
            .copied()
            .unwrap_or(0)
    }

    /// Circulating supply at an (asset, phase) slot
    pub fn total_supply(&self, asset: AssetId, phase: Phase) -> Amount {
        self.supplies.get(&(asset, phase)).copied().unwrap_or(0)
    }

    /// Recorded owner of an asset, if any
    pub fn owner_of(&self, asset: AssetId) -> Option<Address> {
        self.owners.get(&asset).copied()
    }

    /// Sum of all holder balances at an (asset, phase) slot
    ///
    /// Audit helper for the supply invariant; iterates the slot range.
    pub fn holder_sum(&self, asset: AssetId, phase: Phase) -> Amount {
        self.balances
            .range((asset, phase, Address::zero())..)
            .take_while(|((a, p, _), _)| *a == asset && *p == phase)
            .map(|(_, qty)| qty)
            .sum()
    }

    // ─── Undo-Logged Mutations ──────────────────────────────────────────

    /// Credit a balance slot, recording the prior value
    pub fn credit(
        &mut self,
        asset: AssetId,
        phase: Phase,
        holder: Address,
        amount: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<Amount> {
        let key = (asset, phase, holder);
        let prior = self.balance_of(asset, phase, holder);
        let next = prior.checked_add(amount).ok_or(LedgerError::Overflow)?;
        undo.entries.push(UndoEntry::Balance { key, prior });
        self.set_balance(key, next);
        Ok(next)
    }

    /// Debit a balance slot, recording the prior value
    ///
    /// Fails with `InsufficientBalance` carrying both sides if the slot
    /// holds less than `amount`; the store is untouched on failure.
    pub fn debit(
        &mut self,
        asset: AssetId,
        phase: Phase,
        holder: Address,
        amount: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<Amount> {
        let key = (asset, phase, holder);
        let prior = self.balance_of(asset, phase, holder);
        let next = prior
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                available: prior,
                required: amount,
            })?;
        undo.entries.push(UndoEntry::Balance { key, prior });
        self.set_balance(key, next);
        Ok(next)
    }

    /// Increase an (asset, phase) supply entry
    pub fn credit_supply(
        &mut self,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<Amount> {
        let key = (asset, phase);
        let prior = self.total_supply(asset, phase);
        let next = prior.checked_add(amount).ok_or(LedgerError::Overflow)?;
        undo.entries.push(UndoEntry::Supply { key, prior });
        self.set_supply(key, next);
        Ok(next)
    }

    /// Decrease an (asset, phase) supply entry
    pub fn debit_supply(
        &mut self,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<Amount> {
        let key = (asset, phase);
        let prior = self.total_supply(asset, phase);
        let next = prior
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                available: prior,
                required: amount,
            })?;
        undo.entries.push(UndoEntry::Supply { key, prior });
        self.set_supply(key, next);
        Ok(next)
    }

    /// Record an asset's owner
    pub fn record_owner(&mut self, asset: AssetId, owner: Address, undo: &mut UndoLog) {
        let prior = self.owners.insert(asset, owner);
        undo.entries.push(UndoEntry::Owner { asset, prior });
    }

    /// Clear an asset's recorded owner
    pub fn clear_owner(&mut self, asset: AssetId, undo: &mut UndoLog) {
        let prior = self.owners.remove(&asset);
        undo.entries.push(UndoEntry::Owner { asset, prior });
    }

    /// Restore every entry touched by an operation, in reverse order
    pub fn revert(&mut self, undo: UndoLog) {
        for entry in undo.entries.into_iter().rev() {
            match entry {
                UndoEntry::Balance { key, prior } => self.set_balance(key, prior),
                UndoEntry::Supply { key, prior } => self.set_supply(key, prior),
                UndoEntry::Owner { asset, prior } => match prior {
                    Some(owner) => {
                        self.owners.insert(asset, owner);
                    }
                    None => {
                        self.owners.remove(&asset);
                    }
                },
            }
        }
    }

    // Zero entries are removed, not tombstoned
    fn set_balance(&mut self, key: BalanceKey, value: Amount) {
        if value == 0 {
            self.balances.remove(&key);
        } else {
            self.balances.insert(key, value);
        }
    }

    fn set_supply(&mut self, key: SupplyKey, value: Amount) {
        if value == 0 {
            self.supplies.remove(&key);
        } else {
            self.supplies.insert(key, value);
        }
    }
}

// ─── Phase Table ────────────────────────────────────────────────────────

/// Per-asset ordered list of defined phases
///
/// The list length is the asset's phase count; index 0 is the
/// unique-ownership phase. An asset with no defined table has exactly one
/// phase (phase 0): fungible minting and transitions require a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseTable {
    phases: BTreeMap<AssetId, Vec<String>>,
}

impl PhaseTable {
    /// Create an empty phase table
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or overwrite) the ordered phase list for an asset
    ///
    /// The list must name at least the unique phase.
    pub fn define(&mut self, asset: AssetId, labels: Vec<String>) -> LedgerResult<()> {
        if labels.is_empty() {
            return Err(LedgerError::InvalidPhase {
                asset,
                phase: Phase::UNIQUE,
            });
        }
        self.phases.insert(asset, labels);
        Ok(())
    }

    /// Number of phases defined for an asset (1 when undefined: phase 0)
    pub fn phase_count(&self, asset: AssetId) -> usize {
        self.phases.get(&asset).map(Vec::len).unwrap_or(1)
    }

    /// Whether a phase is a legal slot for the asset
    pub fn contains(&self, asset: AssetId, phase: Phase) -> bool {
        phase.index() < self.phase_count(asset)
    }

    /// Label of a defined phase
    pub fn label(&self, asset: AssetId, phase: Phase) -> Option<&str> {
        self.phases
            .get(&asset)
            .and_then(|labels| labels.get(phase.index()))
            .map(String::as_str)
    }
}
