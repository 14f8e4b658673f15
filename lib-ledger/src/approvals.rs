//! Operator Delegation Registry
//!
//! A holder may delegate operation rights over their entire balance set to
//! an operator. Delegation is all-assets, all-or-nothing: no per-asset or
//! time-bounded grants, no expiry, not transitive.

use lib_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// holder -> operators delegation set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalRegistry {
    approvals: BTreeMap<Address, BTreeSet<Address>>,
}

impl ApprovalRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant or revoke an operator for a holder
    ///
    /// Idempotent: overwrites any prior state for the pair.
    pub fn set(&mut self, holder: Address, operator: Address, approved: bool) {
        if approved {
            self.approvals.entry(holder).or_default().insert(operator);
        } else if let Some(operators) = self.approvals.get_mut(&holder) {
            operators.remove(&operator);
            if operators.is_empty() {
                self.approvals.remove(&holder);
            }
        }
    }

    /// Check whether an operator is approved by a holder
    pub fn is_approved(&self, holder: Address, operator: Address) -> bool {
        self.approvals
            .get(&holder)
            .map(|operators| operators.contains(&operator))
            .unwrap_or(false)
    }

    /// Check whether a caller may act on a holder's balances
    ///
    /// A holder always acts for themselves.
    pub fn may_act_for(&self, holder: Address, caller: Address) -> bool {
        caller == holder || self.is_approved(holder, caller)
    }
}
