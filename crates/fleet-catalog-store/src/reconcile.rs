// SPDX-License-Identifier: Apache-2.0

use fleet_catalog_model::{Item, ItemId};
use serde::Deserialize;
use std::collections::HashMap;

/// Operator-owned media of one persisted entry.
pub trait MediaSource {
    fn media_id(&self) -> Option<ItemId>;
    fn media_images(&self) -> &[String];
    fn media_technical_sheet(&self) -> Option<&str>;
}

impl MediaSource for Item {
    fn media_id(&self) -> Option<ItemId> {
        Some(self.id)
    }

    fn media_images(&self) -> &[String] {
        &self.images
    }

    fn media_technical_sheet(&self) -> Option<&str> {
        self.technical_sheet.as_deref()
    }
}

/// Lenient view of a persisted entry. Descriptive fields are ignored, so a
/// stale or partially edited entry still contributes its media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMedia {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub technical_sheet: Option<String>,
}

impl MediaSource for PersistedMedia {
    fn media_id(&self) -> Option<ItemId> {
        self.id
    }

    fn media_images(&self) -> &[String] {
        self.images.as_deref().unwrap_or(&[])
    }

    fn media_technical_sheet(&self) -> Option<&str> {
        self.technical_sheet.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileSource {
    SeedOnly,
    Merged { matched: usize, dropped: usize },
    CorruptFallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub items: Vec<Item>,
    pub source: ReconcileSource,
}

/// Seed entry with persisted media applied: non-empty persisted images win,
/// the technical sheet is taken from persisted as-is.
#[must_use]
pub fn merge_media<M: MediaSource + ?Sized>(seed: &Item, persisted: &M) -> Item {
    let mut merged = seed.clone();
    let images = persisted.media_images();
    if !images.is_empty() {
        merged.images = images.to_vec();
    }
    merged.technical_sheet = persisted.media_technical_sheet().map(str::to_string);
    merged
}

/// Reconciles the seed with any persisted media source. Output follows seed
/// order and length; persisted ids absent from the seed are dropped.
#[must_use]
pub fn reconcile_with<M: MediaSource>(seed: &[Item], persisted: &[M]) -> Vec<Item> {
    let mut by_id: HashMap<ItemId, &M> = HashMap::with_capacity(persisted.len());
    for entry in persisted {
        if let Some(id) = entry.media_id() {
            by_id.entry(id).or_insert(entry);
        }
    }
    seed.iter()
        .map(|item| match by_id.get(&item.id) {
            Some(entry) => merge_media(item, *entry),
            None => item.clone(),
        })
        .collect()
}

#[must_use]
pub fn reconcile(seed: &[Item], persisted: Option<&[Item]>) -> Vec<Item> {
    match persisted {
        Some(persisted) => reconcile_with(seed, persisted),
        None => seed.to_vec(),
    }
}

/// Reconciles against the raw slot contents. Unreadable or wrongly shaped
/// data falls back to the seed and is reported in the returned source.
#[must_use]
pub fn reconcile_persisted(seed: &[Item], raw: Option<&str>) -> Reconciled {
    let Some(raw) = raw else {
        return Reconciled {
            items: seed.to_vec(),
            source: ReconcileSource::SeedOnly,
        };
    };
    match serde_json::from_str::<Vec<PersistedMedia>>(raw) {
        Ok(persisted) => {
            let items = reconcile_with(seed, &persisted);
            let matched = persisted
                .iter()
                .filter_map(|entry| entry.id)
                .filter(|id| seed.iter().any(|s| s.id == *id))
                .count();
            let dropped = persisted.len().saturating_sub(matched);
            tracing::debug!(matched, dropped, "reconciled persisted media");
            Reconciled {
                items,
                source: ReconcileSource::Merged { matched, dropped },
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "persisted collection unreadable, using seed");
            Reconciled {
                items: seed.to_vec(),
                source: ReconcileSource::CorruptFallback {
                    reason: err.to_string(),
                },
            }
        }
    }
}
