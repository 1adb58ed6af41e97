// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

/// Error payload printed on stderr in `--json` mode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}

#[cfg(test)]
mod tests {
    use super::{ExitCode, MachineError};

    #[test]
    fn machine_error_serializes_details_in_key_order() {
        let err = MachineError::new("validation_error", "bad backup")
            .with_detail("path", "backup.json")
            .with_detail("count", "0");
        let text = serde_json::to_string(&err).expect("json");
        assert_eq!(
            text,
            r#"{"code":"validation_error","message":"bad backup","details":{"count":"0","path":"backup.json"}}"#
        );
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(ExitCode::Usage as u8, 2);
        assert_eq!(ExitCode::Internal as u8, 10);
        assert_eq!(ExitCode::DependencyFailure.as_str(), "dependency_failure");
    }
}
