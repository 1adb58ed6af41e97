use crate::{CliError, OutputMode};
use fleet_catalog_core::canonical::stable_json_string;
use serde_json::Value;
use std::future::Future;

pub(crate) fn emit_ok(output_mode: OutputMode, payload: Value) -> Result<(), CliError> {
    let text = if output_mode.json {
        stable_json_string(&payload)
    } else {
        serde_json::to_string_pretty(&payload)
    }
    .map_err(|e| CliError::internal(e.to_string()))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Drives a file read to completion on a single-threaded runtime. There is
/// no timeout; a read that never resolves blocks the command.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(format!("failed to start runtime: {e}")))?;
    Ok(runtime.block_on(future))
}

/// Shortens embedded payloads for human-oriented listings.
pub(crate) fn abbreviate_payload(payload: &str) -> String {
    const KEEP: usize = 48;
    if payload.starts_with("data:") && payload.len() > KEEP {
        let head: String = payload.chars().take(KEEP).collect();
        format!("{head}... ({} bytes)", payload.len())
    } else {
        payload.to_string()
    }
}
