//! Ledger Event Journal
//!
//! Durable notifications for external observers. The journal is append-only
//! and is never re-read by the engine itself; it is the system's only
//! externally observable log. The ledger retains no history beyond current
//! balances and totals.

use lib_types::{Address, Amount, AssetId, Phase};
use serde::{Deserialize, Serialize};

/// Balance-change and configuration notifications
///
/// Mint and burn reuse the transfer events: a mint has `from = None`
/// (null origin), a burn has `to = None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Single-item balance change
    TransferSingle {
        operator: Address,
        from: Option<Address>,
        to: Option<Address>,
        asset: AssetId,
        phase: Phase,
        amount: Amount,
    },

    /// Batch balance change
    TransferBatch {
        operator: Address,
        from: Option<Address>,
        to: Option<Address>,
        assets: Vec<AssetId>,
        phases: Vec<Phase>,
        amounts: Vec<Amount>,
    },

    /// Delegation changed
    ApprovalChanged {
        holder: Address,
        operator: Address,
        approved: bool,
    },

    /// Asset moved between phase slots
    PhaseChanged {
        asset: AssetId,
        old_phase: Phase,
        new_phase: Phase,
    },

    /// Metadata URI template changed
    MetadataChanged { template: String },
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerEvent::TransferSingle { asset, amount, .. } => {
                write!(f, "TransferSingle(asset={}, amount={})", asset, amount)
            }
            LedgerEvent::TransferBatch { assets, .. } => {
                write!(f, "TransferBatch(items={})", assets.len())
            }
            LedgerEvent::ApprovalChanged { approved, .. } => {
                write!(f, "ApprovalChanged(approved={})", approved)
            }
            LedgerEvent::PhaseChanged {
                asset,
                old_phase,
                new_phase,
            } => {
                write!(f, "PhaseChanged(asset={}, {}->{})", asset, old_phase, new_phase)
            }
            LedgerEvent::MetadataChanged { .. } => write!(f, "MetadataChanged"),
        }
    }
}

/// Append-only journal of emitted events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventJournal {
    events: Vec<LedgerEvent>,
}

impl EventJournal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn record(&mut self, event: LedgerEvent) {
        tracing::debug!(event = %event, "ledger event");
        self.events.push(event);
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand the accumulated events to an external consumer
    pub fn drain(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}
