//! Transfer Execution
//!
//! Single and batch transfers, plus the phase-0-only ownership transfer.
//!
//! # Enforcement
//!
//! Every transfer enforces, in order (checks-effects-interactions):
//! - **Recipient**: `to` must be a non-zero address
//! - **Authorization**: the caller must be `from` or an approved operator
//! - **Balance**: the debit slot is the asset's current phase; the debit
//!   fails with `InsufficientBalance { available, required }` if short
//! - **Acceptance**: the recipient handshake runs after all balance
//!   mutations; a rejection unwinds the entire operation
//!
//! Batch items are all-or-nothing: if any item fails, no item takes effect.

use crate::acceptance::TransferRequest;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::state::Ledger;
use crate::store::UndoLog;
use lib_types::{Address, Amount, AssetId, Phase};

impl Ledger {
    /// Transfer a single item from `from` to `to` at the asset's current phase
    pub fn transfer_single(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        asset: AssetId,
        amount: Amount,
        payload: &[u8],
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.transfer_single_inner(caller, from, to, asset, amount, payload);
        self.exit();
        result
    }

    fn transfer_single_inner(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        asset: AssetId,
        amount: Amount,
        payload: &[u8],
    ) -> LedgerResult<()> {
        self.check_recipient(to)?;
        self.check_authorized(caller, from)?;

        let phase = self.current_phase(asset);
        let mut undo = UndoLog::new();
        if let Err(err) = self.move_item(from, to, asset, phase, amount, &mut undo) {
            self.store.revert(undo);
            return Err(err);
        }

        let assets = [asset];
        let phases = [phase];
        let amounts = [amount];
        let request = TransferRequest {
            operator: caller,
            from: Some(from),
            to,
            assets: &assets,
            phases: &phases,
            amounts: &amounts,
            payload,
        };
        if let Err(err) = self.run_acceptance(&request, false) {
            self.store.revert(undo);
            return Err(err);
        }

        tracing::debug!(%asset, %phase, %amount, %from, %to, "transfer");
        self.journal.record(LedgerEvent::TransferSingle {
            operator: caller,
            from: Some(from),
            to: Some(to),
            asset,
            phase,
            amount,
        });
        Ok(())
    }

    /// Transfer a batch of items from `from` to `to`, all-or-nothing
    pub fn transfer_batch(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        assets: &[AssetId],
        amounts: &[Amount],
        payload: &[u8],
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.transfer_batch_inner(caller, from, to, assets, amounts, payload);
        self.exit();
        result
    }

    fn transfer_batch_inner(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        assets: &[AssetId],
        amounts: &[Amount],
        payload: &[u8],
    ) -> LedgerResult<()> {
        self.check_recipient(to)?;
        check_lengths(assets.len(), amounts.len())?;
        self.check_authorized(caller, from)?;

        let mut undo = UndoLog::new();
        let mut phases = Vec::with_capacity(assets.len());
        for (&asset, &amount) in assets.iter().zip(amounts) {
            let phase = self.current_phase(asset);
            if let Err(err) = self.move_item(from, to, asset, phase, amount, &mut undo) {
                self.store.revert(undo);
                return Err(err);
            }
            phases.push(phase);
        }

        let request = TransferRequest {
            operator: caller,
            from: Some(from),
            to,
            assets,
            phases: &phases,
            amounts,
            payload,
        };
        if let Err(err) = self.run_acceptance(&request, true) {
            self.store.revert(undo);
            return Err(err);
        }

        tracing::debug!(items = assets.len(), %from, %to, "batch transfer");
        self.journal.record(LedgerEvent::TransferBatch {
            operator: caller,
            from: Some(from),
            to: Some(to),
            assets: assets.to_vec(),
            phases,
            amounts: amounts.to_vec(),
        });
        Ok(())
    }

    /// Transfer phase-0 ownership of an asset
    ///
    /// Only valid while the asset is still in the unique-ownership regime,
    /// and only for the recorded owner themselves (operators excluded).
    pub fn transfer_unique(
        &mut self,
        caller: Address,
        to: Address,
        asset: AssetId,
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.transfer_unique_inner(caller, to, asset);
        self.exit();
        result
    }

    fn transfer_unique_inner(
        &mut self,
        caller: Address,
        to: Address,
        asset: AssetId,
    ) -> LedgerResult<()> {
        self.check_recipient(to)?;
        let owner = self
            .store
            .owner_of(asset)
            .ok_or(LedgerError::NotFound(asset))?;
        if caller != owner {
            return Err(LedgerError::Unauthorized {
                caller,
                holder: owner,
            });
        }
        let phase = self.current_phase(asset);
        if !phase.is_unique() {
            return Err(LedgerError::InvalidPhase { asset, phase });
        }

        let mut undo = UndoLog::new();
        if let Err(err) = self.move_item(owner, to, asset, Phase::UNIQUE, 1, &mut undo) {
            self.store.revert(undo);
            return Err(err);
        }

        let assets = [asset];
        let phases = [Phase::UNIQUE];
        let amounts = [1];
        let request = TransferRequest {
            operator: caller,
            from: Some(owner),
            to,
            assets: &assets,
            phases: &phases,
            amounts: &amounts,
            payload: &[],
        };
        if let Err(err) = self.run_acceptance(&request, false) {
            self.store.revert(undo);
            return Err(err);
        }

        tracing::debug!(%asset, %owner, %to, "ownership transfer");
        self.journal.record(LedgerEvent::TransferSingle {
            operator: caller,
            from: Some(owner),
            to: Some(to),
            asset,
            phase: Phase::UNIQUE,
            amount: 1,
        });
        Ok(())
    }

    // ─── Shared Plumbing ────────────────────────────────────────────────

    pub(crate) fn check_recipient(&self, to: Address) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        Ok(())
    }

    pub(crate) fn check_authorized(&self, caller: Address, holder: Address) -> LedgerResult<()> {
        if !self.approvals.may_act_for(holder, caller) {
            return Err(LedgerError::Unauthorized { caller, holder });
        }
        Ok(())
    }

    /// Debit `from` and credit `to` at one slot, keeping the recorded
    /// owner in sync for phase-0 moves
    fn move_item(
        &mut self,
        from: Address,
        to: Address,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<()> {
        self.store.debit(asset, phase, from, amount, undo)?;
        let to_balance = self.store.credit(asset, phase, to, amount, undo)?;
        if phase.is_unique() && amount > 0 {
            // Phase 0 encodes unique ownership: quantity 0 or 1
            if to_balance > 1 {
                return Err(LedgerError::InvalidAmount(amount));
            }
            self.store.record_owner(asset, to, undo);
        }
        Ok(())
    }
}

pub(crate) fn check_lengths(left: usize, right: usize) -> LedgerResult<()> {
    if left != right {
        return Err(LedgerError::LengthMismatch { left, right });
    }
    Ok(())
}
