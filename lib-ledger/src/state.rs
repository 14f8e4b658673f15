//! Ledger State Facade
//!
//! `Ledger` owns every component of the engine: the balance store, the
//! phase table, the delegation registry, the recipient hooks, the event
//! journal, and the single re-entrancy flag. Operations live in the
//! `transfer`, `mint_burn`, and `phase` modules as `impl Ledger` blocks;
//! this module carries construction, the pure query surface, delegation,
//! and the handshake plumbing.

use crate::acceptance::{Acknowledgement, HookRegistry, RecipientHook, TransferRequest};
use crate::approvals::ApprovalRegistry;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::{EventJournal, LedgerEvent};
use crate::store::{LedgerStore, PhaseTable};
use lib_types::{Address, Amount, AssetId, Phase};
use std::sync::Arc;

/// Default URI template; `{id}` is replaced with the asset id
pub const DEFAULT_URI_TEMPLATE: &str = "ledger://asset/{id}.json";

/// The phased asset ledger
///
/// Execution is fully sequential and transactional: each operation either
/// completes in full or leaves no observable effect. The ledger maps are
/// the sole shared mutable resource; no component mutates them directly.
#[derive(Debug)]
pub struct Ledger {
    pub(crate) store: LedgerStore,
    pub(crate) phases: PhaseTable,
    pub(crate) approvals: ApprovalRegistry,
    pub(crate) hooks: HookRegistry,
    pub(crate) journal: EventJournal,
    pub(crate) uri_template: String,
    /// Non-reentrant guard shared by every mutating entry point
    busy: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            store: LedgerStore::new(),
            phases: PhaseTable::new(),
            approvals: ApprovalRegistry::new(),
            hooks: HookRegistry::new(),
            journal: EventJournal::new(),
            uri_template: DEFAULT_URI_TEMPLATE.to_string(),
            busy: false,
        }
    }

    // ─── Query Surface ──────────────────────────────────────────────────

    /// Balance of a holder at an (asset, phase) slot
    pub fn balance_of(&self, asset: AssetId, phase: Phase, holder: Address) -> Amount {
        self.store.balance_of(asset, phase, holder)
    }

    /// Batch balance query
    pub fn balance_of_batch(&self, queries: &[(AssetId, Phase, Address)]) -> Vec<Amount> {
        queries
            .iter()
            .map(|&(asset, phase, holder)| self.store.balance_of(asset, phase, holder))
            .collect()
    }

    /// Circulating supply at an (asset, phase) slot
    pub fn total_supply(&self, asset: AssetId, phase: Phase) -> Amount {
        self.store.total_supply(asset, phase)
    }

    /// Recorded phase-0 owner of an asset
    pub fn phase_owner(&self, asset: AssetId) -> Option<Address> {
        self.store.owner_of(asset)
    }

    /// Whether an operator is approved by a holder
    pub fn is_approved(&self, holder: Address, operator: Address) -> bool {
        self.approvals.is_approved(holder, operator)
    }

    /// Number of phases defined for an asset
    pub fn phase_count(&self, asset: AssetId) -> usize {
        self.phases.phase_count(asset)
    }

    /// Label of a defined phase
    pub fn phase_label(&self, asset: AssetId, phase: Phase) -> Option<&str> {
        self.phases.label(asset, phase)
    }

    /// Emitted events, oldest first
    pub fn events(&self) -> &[LedgerEvent] {
        self.journal.events()
    }

    /// Hand the accumulated events to an external consumer
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        self.journal.drain()
    }

    // ─── Delegation ─────────────────────────────────────────────────────

    /// Grant or revoke an operator for the caller's entire balance set
    ///
    /// Idempotent; always emits `ApprovalChanged`.
    pub fn set_approval(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> LedgerResult<()> {
        self.enter()?;
        let result = self.set_approval_inner(caller, operator, approved);
        self.exit();
        result
    }

    fn set_approval_inner(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> LedgerResult<()> {
        if operator.is_zero() || operator == caller {
            return Err(LedgerError::InvalidRecipient);
        }
        self.approvals.set(caller, operator, approved);
        self.journal.record(LedgerEvent::ApprovalChanged {
            holder: caller,
            operator,
            approved,
        });
        Ok(())
    }

    // ─── Recipient Hooks ────────────────────────────────────────────────

    /// Attach executable acceptance logic to a recipient address
    pub fn register_hook(&mut self, recipient: Address, hook: Arc<dyn RecipientHook>) {
        self.hooks.register(recipient, hook);
    }

    /// Detach a recipient's acceptance logic
    pub fn unregister_hook(&mut self, recipient: Address) {
        self.hooks.unregister(recipient);
    }

    /// Run the acceptance handshake against a recipient
    ///
    /// Called after all balance mutations of the enclosing operation are
    /// applied. The guard stays held across the callback, so the hook can
    /// query the ledger but any nested mutating call gets `ReentrantCall`.
    pub(crate) fn run_acceptance(
        &mut self,
        request: &TransferRequest<'_>,
        batch: bool,
    ) -> LedgerResult<()> {
        let Some(hook) = self.hooks.hook_for(request.to) else {
            // No executable logic: proceed unconditionally
            return Ok(());
        };

        let expected = if batch {
            Acknowledgement::Batch
        } else {
            Acknowledgement::Single
        };
        let outcome = if batch {
            hook.on_batch_received(self, request)
        } else {
            hook.on_single_received(self, request)
        };

        match outcome {
            Ok(ack) if ack == expected => Ok(()),
            Ok(ack) => {
                tracing::warn!(to = %request.to, ?ack, "recipient returned wrong acknowledgement");
                Err(LedgerError::RecipientRejected(request.to))
            }
            Err(err) => {
                tracing::warn!(to = %request.to, %err, "recipient hook failed");
                Err(LedgerError::RecipientRejected(request.to))
            }
        }
    }

    // ─── Re-entrancy Guard ──────────────────────────────────────────────

    /// Take the guard; fails if a mutating operation is already in flight
    pub(crate) fn enter(&mut self) -> LedgerResult<()> {
        if self.busy {
            return Err(LedgerError::ReentrantCall);
        }
        self.busy = true;
        Ok(())
    }

    /// Release the guard
    pub(crate) fn exit(&mut self) {
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::new([1u8; 32])
    }

    fn olivia() -> Address {
        Address::new([2u8; 32])
    }

    #[test]
    fn test_set_approval_emits_event() {
        let mut ledger = Ledger::new();
        ledger.set_approval(alice(), olivia(), true).unwrap();

        assert!(ledger.is_approved(alice(), olivia()));
        assert_eq!(
            ledger.events(),
            &[LedgerEvent::ApprovalChanged {
                holder: alice(),
                operator: olivia(),
                approved: true,
            }]
        );
    }

    #[test]
    fn test_set_approval_rejects_self_and_zero() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.set_approval(alice(), alice(), true),
            Err(LedgerError::InvalidRecipient)
        );
        assert_eq!(
            ledger.set_approval(alice(), Address::zero(), true),
            Err(LedgerError::InvalidRecipient)
        );
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_revoke_after_grant() {
        let mut ledger = Ledger::new();
        ledger.set_approval(alice(), olivia(), true).unwrap();
        ledger.set_approval(alice(), olivia(), false).unwrap();
        assert!(!ledger.is_approved(alice(), olivia()));
        assert_eq!(ledger.events().len(), 2);
    }

    #[test]
    fn test_guard_rejects_nested_entry() {
        let mut ledger = Ledger::new();
        ledger.enter().unwrap();
        assert_eq!(ledger.enter(), Err(LedgerError::ReentrantCall));
        ledger.exit();
        assert!(ledger.enter().is_ok());
        ledger.exit();
    }

    #[test]
    fn test_guard_released_after_failed_operation() {
        let mut ledger = Ledger::new();
        assert!(ledger.set_approval(alice(), alice(), true).is_err());
        // The failed call must not leave the guard held
        assert!(ledger.set_approval(alice(), olivia(), true).is_ok());
    }

    #[test]
    fn test_balance_of_batch() {
        let ledger = Ledger::new();
        let queries = [
            (AssetId::new(1), Phase::UNIQUE, alice()),
            (AssetId::new(2), Phase::new(1), olivia()),
        ];
        assert_eq!(ledger.balance_of_batch(&queries), vec![0, 0]);
    }
}
