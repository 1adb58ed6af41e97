// SPDX-License-Identifier: Apache-2.0

use crate::error::{StoreError, StoreErrorCode};
use fleet_catalog_model::{check_unique_ids, Item};
use std::path::Path;

/// Parses the read-only seed dataset. Ids must be unique since they are the
/// only join key against persisted media.
pub fn parse_seed(raw: &str) -> Result<Vec<Item>, StoreError> {
    let items: Vec<Item> = serde_json::from_str(raw)
        .map_err(|e| StoreError::new(StoreErrorCode::Parse, format!("seed is not valid: {e}")))?;
    check_unique_ids(&items).map_err(|e| StoreError::new(StoreErrorCode::Validation, e.0))?;
    Ok(items)
}

pub fn load_seed(path: &Path) -> Result<Vec<Item>, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        let code = if e.kind() == std::io::ErrorKind::NotFound {
            StoreErrorCode::NotFound
        } else {
            StoreErrorCode::Io
        };
        StoreError::new(code, format!("read seed {}: {e}", path.display()))
    })?;
    let items = parse_seed(&raw)?;
    tracing::debug!(path = %path.display(), items = items.len(), "seed loaded");
    Ok(items)
}
