//! Canonical Primitive Types for the Phased Asset Ledger
//!
//! Rule: No String identifiers in ledger state. Ever.
//!
//! These types are the foundational building blocks for all ledger-critical
//! data structures. They are designed to be:
//! - Fixed-size (no dynamic allocation)
//! - Deterministically serializable
//! - Efficient to copy and compare

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Asset quantities (supports up to ~340 undecillion units)
pub type Amount = u128;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// 32-byte account address (derived from public key)
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Create a new Address from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a zeroed Address
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// ASSET TYPES
// ============================================================================

/// Asset class/instance identifier
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Default)]
pub struct AssetId(pub u64);

impl AssetId {
    /// Create a new AssetId
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AssetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Lifecycle phase of an asset
///
/// Phase 0 is the unique-ownership regime: one holder, quantity 0 or 1.
/// Phases >= 1 are fungible tiers: many holders, arbitrary quantities.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Default)]
pub struct Phase(pub u32);

impl Phase {
    /// The unique-ownership phase
    pub const UNIQUE: Self = Self(0);

    /// Create a new Phase
    pub const fn new(phase: u32) -> Self {
        Self(phase)
    }

    /// Get the underlying value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Phase index as a table offset
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Check if this is the unique-ownership phase
    pub fn is_unique(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unique() {
            write!(f, "Phase(UNIQUE)")
        } else {
            write!(f, "Phase({})", self.0)
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Phase {
    fn from(phase: u32) -> Self {
        Self(phase)
    }
}

// ============================================================================
// TESTS
// ============================================================================
