//! Metadata URI Derivation
//!
//! Thin glue around the core: a deterministic URI derived from the asset id
//! by substituting `{id}` into a stored template. Not part of the ledger
//! maps; changing the template only emits a notification.

use crate::errors::LedgerResult;
use crate::events::LedgerEvent;
use crate::state::Ledger;
use lib_types::AssetId;

/// Placeholder substituted with the asset id
pub const URI_ID_PLACEHOLDER: &str = "{id}";

impl Ledger {
    /// Deterministic metadata URI for an asset
    pub fn uri(&self, asset: AssetId) -> String {
        self.uri_template
            .replace(URI_ID_PLACEHOLDER, &asset.to_string())
    }

    /// Replace the URI template, emitting `MetadataChanged`
    pub fn set_uri_template(&mut self, template: impl Into<String>) -> LedgerResult<()> {
        self.enter()?;
        self.uri_template = template.into();
        self.journal.record(LedgerEvent::MetadataChanged {
            template: self.uri_template.clone(),
        });
        self.exit();
        Ok(())
    }
}
