//! Phase Transitions
//!
//! An asset starts in phase 0 (unique ownership) and may advance into
//! fungible tiers. The current phase is a property of the asset, anchored
//! on its recorded owner: the first fungible phase where the owner holds a
//! nonzero balance, or phase 0 if there is none. Transitions only leave
//! phase 0 or move between fungible tiers; there is no way back to phase 0
//! and no terminal phase.

use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::state::Ledger;
use crate::store::UndoLog;
use lib_types::{Address, Amount, AssetId, Phase};

impl Ledger {
    /// Install the ordered phase list for an asset
    ///
    /// The list length is the asset's phase count; index 0 labels the
    /// unique-ownership phase. Fungible minting and transitions require a
    /// defined table.
    pub fn define_phases(&mut self, asset: AssetId, labels: Vec<String>) -> LedgerResult<()> {
        self.enter()?;
        let result = self.phases.define(asset, labels);
        self.exit();
        result
    }

    /// Currently-computed phase of an asset
    ///
    /// Scans fungible phases in ascending order and returns the first where
    /// the recorded owner holds a nonzero balance; with no such phase, or
    /// no recorded owner, the asset is in phase 0.
    pub fn current_phase(&self, asset: AssetId) -> Phase {
        let Some(owner) = self.store.owner_of(asset) else {
            return Phase::UNIQUE;
        };
        for index in 1..self.phases.phase_count(asset) {
            let phase = Phase::new(index as u32);
            if self.store.balance_of(asset, phase, owner) > 0 {
                return phase;
            }
        }
        Phase::UNIQUE
    }

    /// Move an asset's entire balance to a new phase slot
    ///
    /// Scoped to the single recorded owner: the owner's full balance at the
    /// current phase moves to the new slot, total supply moves with it, and
    /// the old slot is cleared. `new_phase` must be a defined fungible phase
    /// different from the current one.
    pub fn transition_phase(&mut self, asset: AssetId, new_phase: Phase) -> LedgerResult<()> {
        self.enter()?;
        let result = self.transition_phase_inner(asset, new_phase);
        self.exit();
        result
    }

    fn transition_phase_inner(&mut self, asset: AssetId, new_phase: Phase) -> LedgerResult<()> {
        // Assets never return to the unique-ownership regime
        if new_phase.is_unique() || !self.phases.contains(asset, new_phase) {
            return Err(LedgerError::InvalidPhase {
                asset,
                phase: new_phase,
            });
        }
        let owner = self
            .store
            .owner_of(asset)
            .ok_or(LedgerError::NotFound(asset))?;
        let old_phase = self.current_phase(asset);
        if new_phase == old_phase {
            return Err(LedgerError::InvalidPhase {
                asset,
                phase: new_phase,
            });
        }

        let quantity = self.store.balance_of(asset, old_phase, owner);
        let mut undo = UndoLog::new();
        if let Err(err) = self.relocate(asset, old_phase, new_phase, owner, quantity, &mut undo) {
            self.store.revert(undo);
            return Err(err);
        }

        tracing::debug!(%asset, %old_phase, %new_phase, %quantity, "phase transition");
        self.journal.record(LedgerEvent::PhaseChanged {
            asset,
            old_phase,
            new_phase,
        });
        Ok(())
    }

    fn relocate(
        &mut self,
        asset: AssetId,
        old_phase: Phase,
        new_phase: Phase,
        owner: Address,
        quantity: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<()> {
        self.store.debit(asset, old_phase, owner, quantity, undo)?;
        self.store.credit(asset, new_phase, owner, quantity, undo)?;
        // Supply follows the balance so the conservation invariant holds
        // per (asset, phase) slot across transitions
        self.store.debit_supply(asset, old_phase, quantity, undo)?;
        self.store.credit_supply(asset, new_phase, quantity, undo)?;
        Ok(())
    }
}
