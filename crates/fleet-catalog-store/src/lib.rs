// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Persistence and the working collection: slot stores, seed/persisted
//! reconciliation, the owning [`Fleet`] controller, backups and uploads.

mod backup;
mod error;
mod fleet;
mod reconcile;
mod seed;
mod slot;
mod upload;

pub use backup::{backup_file_name, backup_json, parse_restore, today_backup_file_name};
pub use error::{StoreError, StoreErrorCode};
pub use fleet::{Fleet, Mutation, PersistOutcome, Restored};
pub use reconcile::{
    merge_media, reconcile, reconcile_persisted, reconcile_with, MediaSource, PersistedMedia,
    ReconcileSource, Reconciled,
};
pub use seed::{load_seed, parse_seed};
pub use slot::{slot_file_path, LocalFsStore, MemoryStore, SlotStore, SLOT_FILE_EXTENSION};
pub use upload::{
    encode_data_uri, mime_from_path, read_backup_file, read_data_uri, read_image_upload,
    read_technical_sheet_upload,
};

pub const CRATE_NAME: &str = "fleet-catalog-store";
