// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ENV_FLEET_OUTPUT_DIR, ENV_FLEET_SEED_PATH, ENV_FLEET_STORAGE_DIR};

pub const DEFAULT_STORAGE_SLOT: &str = "vehicleData";
pub const DEFAULT_SEED_PATH: &str = "data/seed.json";
pub const DEFAULT_SPREADSHEET_FILE_NAME: &str = "catalogo_azilut.xlsx";
pub const DEFAULT_SNAPSHOT_FILE_NAME: &str = "catalogo_azilut.html";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigPathScope {
    User,
    Workspace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Company identity printed on datasheets and in the portable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandProfile {
    pub company_name: String,
    pub short_name: String,
    pub tagline: String,
    pub datasheet_title: String,
    pub address: String,
    pub email: String,
    pub phones: Vec<String>,
    pub website: String,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            company_name: "AZILUT S.A.".to_string(),
            short_name: "AZILUT".to_string(),
            tagline: "División Alquileres".to_string(),
            datasheet_title: "Ficha de Equipo".to_string(),
            address: "115 Bis Nº333 / Tolosa / La Plata".to_string(),
            email: "administracion@azilutsa.com.ar".to_string(),
            phones: vec![
                "221 483-0093 / 483-5670".to_string(),
                "221 4312522".to_string(),
            ],
            website: "www.azilut.com.ar".to_string(),
        }
    }
}

impl BrandProfile {
    /// Single-line contact footer used at the bottom of a datasheet.
    #[must_use]
    pub fn footer_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.address.replace(" / ", ", "),
            self.email,
            self.website
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub storage_dir: PathBuf,
    pub storage_slot: String,
    pub seed_path: PathBuf,
    pub output_dir: PathBuf,
    pub spreadsheet_file_name: String,
    pub snapshot_file_name: String,
    pub brand: BrandProfile,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_dir: resolve_fleet_data_dir(),
            storage_slot: DEFAULT_STORAGE_SLOT.to_string(),
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
            output_dir: PathBuf::from("."),
            spreadsheet_file_name: DEFAULT_SPREADSHEET_FILE_NAME.to_string(),
            snapshot_file_name: DEFAULT_SNAPSHOT_FILE_NAME.to_string(),
            brand: BrandProfile::default(),
        }
    }
}

impl CatalogConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError(format!("invalid config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let slot = self.storage_slot.trim();
        if slot.is_empty() {
            return Err(ConfigError("storage_slot must not be empty".to_string()));
        }
        if slot.contains('/') || slot.contains('\\') || slot.contains("..") {
            return Err(ConfigError(
                "storage_slot must be a plain name without path separators".to_string(),
            ));
        }
        if self.spreadsheet_file_name.trim().is_empty() {
            return Err(ConfigError(
                "spreadsheet_file_name must not be empty".to_string(),
            ));
        }
        if self.snapshot_file_name.trim().is_empty() {
            return Err(ConfigError("snapshot_file_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Applies `FLEET_*` overrides; `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = non_blank(ENV_FLEET_STORAGE_DIR) {
            self.storage_dir = PathBuf::from(dir.trim());
        }
        if let Some(seed) = non_blank(ENV_FLEET_SEED_PATH) {
            self.seed_path = PathBuf::from(seed.trim());
        }
        if let Some(out) = non_blank(ENV_FLEET_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(out.trim());
        }
    }

    #[must_use]
    pub fn spreadsheet_path(&self) -> PathBuf {
        self.output_dir.join(&self.spreadsheet_file_name)
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join(&self.snapshot_file_name)
    }
}

/// Loads the effective configuration.
///
/// An explicit path must exist. Without one, the workspace config is tried
/// before the user config, and built-in defaults apply when neither exists.
/// Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>) -> Result<CatalogConfig, ConfigError> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [
            resolve_fleet_config_path(ConfigPathScope::Workspace),
            resolve_fleet_config_path(ConfigPathScope::User),
        ]
        .into_iter()
        .find(|candidate| candidate.is_file()),
    };

    let mut cfg = match source {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .map_err(|e| ConfigError(format!("read {} failed: {e}", path.display())))?;
            CatalogConfig::from_json(&raw)?
        }
        None => CatalogConfig::default(),
    };
    cfg.apply_overrides(|key| std::env::var(key).ok());
    cfg.validate()?;
    Ok(cfg)
}

#[must_use]
pub fn resolve_fleet_data_dir() -> PathBuf {
    if let Ok(explicit) = std::env::var(ENV_FLEET_STORAGE_DIR) {
        let trimmed = explicit.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        let trimmed = xdg_data_home.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed).join("fleet-catalog");
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed)
                .join(".local")
                .join("share")
                .join("fleet-catalog");
        }
    }

    PathBuf::from(".fleet").join("data")
}

#[must_use]
pub fn resolve_fleet_config_path(scope: ConfigPathScope) -> PathBuf {
    match scope {
        ConfigPathScope::User => {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                let trimmed = xdg_config_home.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed).join("fleet").join(CONFIG_FILE_NAME);
                }
            }
            if let Ok(home) = std::env::var("HOME") {
                let trimmed = home.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed)
                        .join(".config")
                        .join("fleet")
                        .join(CONFIG_FILE_NAME);
                }
            }
            PathBuf::from(".fleet").join(CONFIG_FILE_NAME)
        }
        ConfigPathScope::Workspace => PathBuf::from(".fleet").join(CONFIG_FILE_NAME),
    }
}
