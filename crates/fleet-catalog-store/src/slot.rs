// SPDX-License-Identifier: Apache-2.0

use crate::error::{StoreError, StoreErrorCode};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SLOT_FILE_EXTENSION: &str = "json";

/// Named string slots holding the serialized working collection.
///
/// Reads of a slot that was never written return `Ok(None)`; only real I/O
/// failures surface as errors.
pub trait SlotStore {
    fn read_slot(&self, slot: &str) -> Result<Option<String>, StoreError>;
    fn write_slot(&self, slot: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: SlotStore + ?Sized> SlotStore for &T {
    fn read_slot(&self, slot: &str) -> Result<Option<String>, StoreError> {
        (**self).read_slot(slot)
    }

    fn write_slot(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        (**self).write_slot(slot, value)
    }
}

#[must_use]
pub fn slot_file_path(root: &Path, slot: &str) -> PathBuf {
    root.join(format!("{slot}.{SLOT_FILE_EXTENSION}"))
}

/// One file per slot under `root`, replaced atomically on write.
#[derive(Debug, Clone)]
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SlotStore for LocalFsStore {
    fn read_slot(&self, slot: &str) -> Result<Option<String>, StoreError> {
        let path = slot_file_path(&self.root, slot);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(
                &format!("read slot {}", path.display()),
                &err,
            )),
        }
    }

    fn write_slot(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StoreError::io(&format!("create {}", self.root.display()), &e))?;
        let target = slot_file_path(&self.root, slot);
        let tmp = self.root.join(format!("{slot}.{SLOT_FILE_EXTENSION}.tmp"));
        fs::write(&tmp, value.as_bytes())
            .map_err(|e| StoreError::io(&format!("write {}", tmp.display()), &e))?;
        fs::rename(&tmp, &target).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(&format!("publish {}", target.display()), &e)
        })
    }
}

/// In-process slots, used by tests and dry runs. Writes can be made to fail
/// to exercise quota-style rejections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<BTreeMap<String, String>>,
    write_failure: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_slot(self, slot: &str, value: impl Into<String>) -> Self {
        self.slots.borrow_mut().insert(slot.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn rejecting_writes(mut self, reason: impl Into<String>) -> Self {
        self.write_failure = Some(reason.into());
        self
    }

    #[must_use]
    pub fn snapshot(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }
}

impl SlotStore for MemoryStore {
    fn read_slot(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self.snapshot(slot))
    }

    fn write_slot(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        if let Some(reason) = &self.write_failure {
            return Err(StoreError::new(StoreErrorCode::Io, reason.clone()));
        }
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }
}
