// SPDX-License-Identifier: Apache-2.0

use crate::error::{ExportError, ExportErrorCode};
use std::fs;
use std::path::{Path, PathBuf};

/// A generated file that has not been written anywhere yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Writes `artifact` into `dir` through a temporary sibling and a rename, so
/// a failed export never leaves a truncated file behind.
pub fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf, ExportError> {
    let io = |what: &str, path: &Path, e: std::io::Error| {
        ExportError::new(
            ExportErrorCode::Io,
            format!("{what} {}: {e}", path.display()),
        )
    };
    fs::create_dir_all(dir).map_err(|e| io("create", dir, e))?;
    let target = dir.join(&artifact.file_name);
    let tmp = dir.join(format!("{}.tmp", artifact.file_name));
    fs::write(&tmp, &artifact.bytes).map_err(|e| io("write", &tmp, e))?;
    fs::rename(&tmp, &target).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        io("publish", &target, e)
    })?;
    tracing::info!(
        path = %target.display(),
        bytes = artifact.bytes.len(),
        "export written"
    );
    Ok(target)
}
