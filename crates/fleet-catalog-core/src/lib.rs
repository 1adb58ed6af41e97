// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Shared primitives for the fleet catalog workspace: exit codes, machine
//! errors, canonical JSON and configuration resolution.

pub mod canonical;
pub mod config;
mod error;

use sha2::{Digest, Sha256};

pub use config::{
    load_config, resolve_fleet_config_path, resolve_fleet_data_dir, BrandProfile, CatalogConfig,
    ConfigError, ConfigPathScope,
};
pub use error::{ExitCode, MachineError};

pub const CRATE_NAME: &str = "fleet-catalog-core";

pub const ENV_FLEET_LOG_LEVEL: &str = "FLEET_LOG_LEVEL";
pub const ENV_FLEET_LOG_JSON: &str = "FLEET_LOG_JSON";
pub const ENV_FLEET_STORAGE_DIR: &str = "FLEET_STORAGE_DIR";
pub const ENV_FLEET_SEED_PATH: &str = "FLEET_SEED_PATH";
pub const ENV_FLEET_OUTPUT_DIR: &str = "FLEET_OUTPUT_DIR";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
