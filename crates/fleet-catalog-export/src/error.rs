// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExportErrorCode {
    /// The backend or one of its inputs cannot be used at all.
    Unavailable,
    Generation,
    Io,
}

impl ExportErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "export_unavailable",
            Self::Generation => "export_generation_failed",
            Self::Io => "export_io_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportError {
    pub code: ExportErrorCode,
    pub message: String,
}

impl ExportError {
    #[must_use]
    pub fn new(code: ExportErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn generation(context: &str, err: impl Display) -> Self {
        Self::new(ExportErrorCode::Generation, format!("{context}: {err}"))
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ExportError {}
