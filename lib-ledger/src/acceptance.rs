//! Recipient Acceptance Protocol
//!
//! Any transfer or mint whose recipient exposes executable logic must be
//! acknowledged by that recipient before the operation is final. The hook is
//! invoked synchronously, after balance mutations have been applied but
//! before the operation commits; anything other than the exact matching
//! acknowledgement code unwinds the entire operation.
//!
//! Recipients with no registered hook accept unconditionally.

use crate::state::Ledger;
use lib_types::{Address, Amount, AssetId, Phase};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Description of the operation presented to the recipient
#[derive(Debug, Clone, Copy)]
pub struct TransferRequest<'a> {
    /// The caller that triggered the operation
    pub operator: Address,
    /// Debited holder; `None` for mints (null origin)
    pub from: Option<Address>,
    /// Credited holder
    pub to: Address,
    /// Affected assets (one entry for single-item operations)
    pub assets: &'a [AssetId],
    /// Phase slot of each item
    pub phases: &'a [Phase],
    /// Quantity of each item
    pub amounts: &'a [Amount],
    /// Caller-supplied opaque data
    pub payload: &'a [u8],
}

/// Exact acknowledgement codes
///
/// Single-item operations must be answered with `Single`, batch operations
/// with `Batch`. Any mismatch is a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// Accepts a single-item transfer or mint
    Single,
    /// Accepts a batch transfer or mint
    Batch,
}

/// Executable recipient logic
///
/// Hooks receive the ledger so they can inspect state mid-operation. Any
/// nested mutating call is refused by the ledger's re-entrancy guard. An
/// `Err` from either method is treated as rejection.
pub trait RecipientHook {
    /// Invoked for single-item transfers and mints
    fn on_single_received(
        &self,
        ledger: &mut Ledger,
        request: &TransferRequest<'_>,
    ) -> anyhow::Result<Acknowledgement>;

    /// Invoked for batch transfers and mints
    fn on_batch_received(
        &self,
        ledger: &mut Ledger,
        request: &TransferRequest<'_>,
    ) -> anyhow::Result<Acknowledgement>;
}

/// Registry of recipients that expose executable logic
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: BTreeMap<Address, Arc<dyn RecipientHook>>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("registered", &self.hooks.len())
            .finish()
    }
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach executable logic to a recipient address
    pub fn register(&mut self, recipient: Address, hook: Arc<dyn RecipientHook>) {
        self.hooks.insert(recipient, hook);
    }

    /// Detach a recipient's logic
    pub fn unregister(&mut self, recipient: Address) {
        self.hooks.remove(&recipient);
    }

    /// Hook for a recipient, if registered
    pub fn hook_for(&self, recipient: Address) -> Option<Arc<dyn RecipientHook>> {
        self.hooks.get(&recipient).cloned()
    }
}

/// A recipient that acknowledges everything
///
/// Useful default for tests and passive custodial recipients.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl RecipientHook for AcceptAll {
    fn on_single_received(
        &self,
        _ledger: &mut Ledger,
        _request: &TransferRequest<'_>,
    ) -> anyhow::Result<Acknowledgement> {
        Ok(Acknowledgement::Single)
    }

    fn on_batch_received(
        &self,
        _ledger: &mut Ledger,
        _request: &TransferRequest<'_>,
    ) -> anyhow::Result<Acknowledgement> {
        Ok(Acknowledgement::Batch)
    }
}
