//! Issuance and Retirement
//!
//! Minting behaves like a transfer from a null origin: balances and total
//! supply grow together, and the recipient handshake runs before the
//! operation commits. Burning retires balance and supply symmetrically and
//! never invokes the handshake.
//!
//! Phase-0 issuance is the entry point of an asset's lifecycle: exactly one
//! unit, to exactly one holder, recorded as the asset's owner.

use crate::acceptance::TransferRequest;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::state::Ledger;
use crate::store::UndoLog;
use crate::transfer::check_lengths;
use lib_types::{Address, Amount, AssetId, Phase};

impl Ledger {
    /// Mint `amount` of an asset at a phase slot to `to`
    ///
    /// Phase 0 requires the asset to be unowned (`AlreadyExists` otherwise)
    /// and `amount == 1`; the recipient becomes the recorded owner.
    pub fn mint(
        &mut self,
        to: Address,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.mint_inner(to, asset, phase, amount);
        self.exit();
        result
    }

    fn mint_inner(
        &mut self,
        to: Address,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.check_recipient(to)?;

        let mut undo = UndoLog::new();
        if let Err(err) = self.mint_item(to, asset, phase, amount, &mut undo) {
            self.store.revert(undo);
            return Err(err);
        }

        let assets = [asset];
        let phases = [phase];
        let amounts = [amount];
        let request = TransferRequest {
            operator: to,
            from: None,
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

        tracing::debug!(%asset, %phase, %amount, %to, "mint");
        self.journal.record(LedgerEvent::TransferSingle {
            operator: to,
            from: None,
            to: Some(to),
            asset,
            phase,
            amount,
        });
        Ok(())
    }

    /// Mint a batch of items to `to`, all-or-nothing
    pub fn mint_batch(
        &mut self,
        to: Address,
        assets: &[AssetId],
        phases: &[Phase],
        amounts: &[Amount],
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.mint_batch_inner(to, assets, phases, amounts);
        self.exit();
        result
    }

    fn mint_batch_inner(
        &mut self,
        to: Address,
        assets: &[AssetId],
        phases: &[Phase],
        amounts: &[Amount],
    ) -> LedgerResult<()> {
        self.check_recipient(to)?;
        check_lengths(assets.len(), phases.len())?;
        check_lengths(assets.len(), amounts.len())?;

        let mut undo = UndoLog::new();
        for ((&asset, &phase), &amount) in assets.iter().zip(phases).zip(amounts) {
            if let Err(err) = self.mint_item(to, asset, phase, amount, &mut undo) {
                self.store.revert(undo);
                return Err(err);
            }
        }

        let request = TransferRequest {
            operator: to,
            from: None,
            to,
            assets,
            phases,
            amounts,
            payload: &[],
        };
        if let Err(err) = self.run_acceptance(&request, true) {
            self.store.revert(undo);
            return Err(err);
        }

        tracing::debug!(items = assets.len(), %to, "batch mint");
        self.journal.record(LedgerEvent::TransferBatch {
            operator: to,
            from: None,
            to: Some(to),
            assets: assets.to_vec(),
            phases: phases.to_vec(),
            amounts: amounts.to_vec(),
        });
        Ok(())
    }

    /// Burn `amount` of an asset at a phase slot from `from`
    ///
    /// The caller must be `from` or an approved operator. A phase-0 burn
    /// that zeroes the holder's balance clears the recorded owner.
    pub fn burn(
        &mut self,
        caller: Address,
        from: Address,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.burn_inner(caller, from, asset, phase, amount);
        self.exit();
        result
    }

    fn burn_inner(
        &mut self,
        caller: Address,
        from: Address,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.check_authorized(caller, from)?;

        let mut undo = UndoLog::new();
        if let Err(err) = self.burn_item(from, asset, phase, amount, &mut undo) {
            self.store.revert(undo);
            return Err(err);
        }

        tracing::debug!(%asset, %phase, %amount, %from, "burn");
        self.journal.record(LedgerEvent::TransferSingle {
            operator: caller,
            from: Some(from),
            to: None,
            asset,
            phase,
            amount,
        });
        Ok(())
    }

    /// Burn a batch of items from `from`, all-or-nothing
    pub fn burn_batch(
        &mut self,
        caller: Address,
        from: Address,
        assets: &[AssetId],
        phases: &[Phase],
        amounts: &[Amount],
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.burn_batch_inner(caller, from, assets, phases, amounts);
        self.exit();
        result
    }

    fn burn_batch_inner(
        &mut self,
        caller: Address,
        from: Address,
        assets: &[AssetId],
        phases: &[Phase],
        amounts: &[Amount],
    ) -> LedgerResult<()> {
        check_lengths(assets.len(), phases.len())?;
        check_lengths(assets.len(), amounts.len())?;
        self.check_authorized(caller, from)?;

        let mut undo = UndoLog::new();
        for ((&asset, &phase), &amount) in assets.iter().zip(phases).zip(amounts) {
            if let Err(err) = self.burn_item(from, asset, phase, amount, &mut undo) {
                self.store.revert(undo);
                return Err(err);
            }
        }

        tracing::debug!(items = assets.len(), %from, "batch burn");
        self.journal.record(LedgerEvent::TransferBatch {
            operator: caller,
            from: Some(from),
            to: None,
            assets: assets.to_vec(),
            phases: phases.to_vec(),
            amounts: amounts.to_vec(),
        });
        Ok(())
    }

    // ─── Per-Item Rules ─────────────────────────────────────────────────

    fn mint_item(
        &mut self,
        to: Address,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<()> {
        if !self.phases.contains(asset, phase) {
            return Err(LedgerError::InvalidPhase { asset, phase });
        }
        if phase.is_unique() {
            if self.store.owner_of(asset).is_some() {
                return Err(LedgerError::AlreadyExists(asset));
            }
            if amount != 1 {
                return Err(LedgerError::InvalidAmount(amount));
            }
        }

        self.store.credit(asset, phase, to, amount, undo)?;
        self.store.credit_supply(asset, phase, amount, undo)?;
        if phase.is_unique() {
            self.store.record_owner(asset, to, undo);
        }
        Ok(())
    }

    fn burn_item(
        &mut self,
        from: Address,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
        undo: &mut UndoLog,
    ) -> LedgerResult<()> {
        let remaining = self.store.debit(asset, phase, from, amount, undo)?;
        self.store.debit_supply(asset, phase, amount, undo)?;
        if phase.is_unique() && amount > 0 && remaining == 0 {
            self.store.clear_owner(asset, undo);
        }
        Ok(())
    }
}
