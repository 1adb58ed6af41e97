// SPDX-License-Identifier: Apache-2.0

use crate::backup::parse_restore;
use crate::error::{StoreError, StoreErrorCode};
use crate::reconcile::{reconcile_persisted, ReconcileSource};
use crate::slot::SlotStore;
use fleet_catalog_model::{Item, ItemId};

/// Result of a best-effort write of the working collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Written { bytes: usize },
    Failed { reason: String },
}

impl PersistOutcome {
    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// No entry carries the id; nothing changed and nothing was written.
    NotFound,
    Applied { persisted: PersistOutcome },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub count: usize,
    pub persisted: PersistOutcome,
}

/// Sole owner of the working collection. Every mutation writes the whole
/// collection back to its slot; a failed write is logged and reported but
/// the in-memory change stands.
#[derive(Debug)]
pub struct Fleet<S: SlotStore> {
    items: Vec<Item>,
    store: S,
    slot: String,
    load_source: ReconcileSource,
}

impl<S: SlotStore> Fleet<S> {
    /// Reconciles `seed` with the slot contents and writes the result back.
    pub fn open(seed: &[Item], store: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let raw = match store.read_slot(&slot) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(slot = %slot, error = %err, "slot read failed, using seed");
                None
            }
        };
        let reconciled = reconcile_persisted(seed, raw.as_deref());
        tracing::info!(
            slot = %slot,
            items = reconciled.items.len(),
            source = ?reconciled.source,
            "fleet opened"
        );
        let fleet = Self {
            items: reconciled.items,
            store,
            slot,
            load_source: reconciled.source,
        };
        fleet.persist();
        fleet
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Like [`Fleet::item`] but as a `NotFound` error, for callers that
    /// need the entry to exist.
    pub fn require(&self, id: ItemId) -> Result<&Item, StoreError> {
        self.item(id).ok_or_else(|| {
            StoreError::new(StoreErrorCode::NotFound, format!("no catalog item with id {id}"))
        })
    }

    #[must_use]
    pub fn load_source(&self) -> &ReconcileSource {
        &self.load_source
    }

    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn replace_first_image(&mut self, id: ItemId, payload: impl Into<String>) -> Mutation {
        self.mutate(id, |item| item.replace_cover_image(payload))
    }

    pub fn set_technical_sheet(&mut self, id: ItemId, payload: impl Into<String>) -> Mutation {
        self.mutate(id, |item| item.set_technical_sheet(payload))
    }

    /// Replaces the whole collection with a backup. Rejected input leaves
    /// the collection and the slot untouched.
    pub fn restore(&mut self, raw: &str) -> Result<Restored, StoreError> {
        let items = parse_restore(raw)?;
        let count = items.len();
        self.items = items;
        tracing::info!(slot = %self.slot, count, "collection restored from backup");
        Ok(Restored {
            count,
            persisted: self.persist(),
        })
    }

    fn mutate(&mut self, id: ItemId, apply: impl FnOnce(&mut Item)) -> Mutation {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            tracing::debug!(%id, "mutation skipped, unknown id");
            return Mutation::NotFound;
        };
        apply(item);
        Mutation::Applied {
            persisted: self.persist(),
        }
    }

    fn persist(&self) -> PersistOutcome {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(slot = %self.slot, error = %err, "collection encode failed");
                return PersistOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };
        match self.store.write_slot(&self.slot, &encoded) {
            Ok(()) => PersistOutcome::Written {
                bytes: encoded.len(),
            },
            Err(err) => {
                tracing::warn!(
                    slot = %self.slot,
                    bytes = encoded.len(),
                    error = %err,
                    "collection write failed, keeping in-memory state"
                );
                PersistOutcome::Failed {
                    reason: err.message,
                }
            }
        }
    }
}
