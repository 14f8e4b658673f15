//! Phased Asset Ledger
//!
//! This crate is the accounting engine for assets that exist in exactly one
//! of several mutually-exclusive lifecycle regimes ("phases"): phase 0 is a
//! unique-ownership regime (one holder, quantity 0 or 1) and phases >= 1
//! are fungible tiers (many holders, arbitrary quantities).
//!
//! # Key Types
//!
//! - [`Ledger`]: the engine facade; all operations are methods on it
//! - [`LedgerStore`]: balance / total-supply / recorded-owner state
//! - [`RecipientHook`]: synchronous acceptance handshake for recipients
//!   that expose executable logic
//! - [`LedgerEvent`]: append-only notifications for external observers
//! - [`LedgerError`]: the full failure taxonomy
//!
//! # Execution Model
//!
//! Fully sequential and transactional: each operation either completes in
//! full or has none of its effects observed. The acceptance handshake runs
//! recipient-controlled logic mid-operation; a per-ledger non-reentrant
//! guard refuses nested mutating calls, and the store's undo log unwinds
//! an operation its recipient rejects.

pub mod acceptance;
pub mod approvals;
pub mod errors;
pub mod events;
pub mod store;

mod metadata;
mod mint_burn;
mod phase;
mod state;
mod transfer;

pub use acceptance::{AcceptAll, Acknowledgement, HookRegistry, RecipientHook, TransferRequest};
pub use approvals::ApprovalRegistry;
pub use errors::{LedgerError, LedgerResult};
pub use events::{EventJournal, LedgerEvent};
pub use metadata::URI_ID_PLACEHOLDER;
pub use state::{Ledger, DEFAULT_URI_TEMPLATE};
pub use store::{LedgerStore, PhaseTable, UndoLog};
