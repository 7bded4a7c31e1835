//! User-facing status lines

use crate::error::{ManagerError, Result};

/// Outcome class of a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Status line shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(err: &ManagerError) -> Self {
        Self {
            kind: StatusKind::Error,
            text: err.status_text(),
        }
    }

    /// Success text from `on_success`, or the error's own text
    pub fn from_result<T>(result: &Result<T>, on_success: impl FnOnce(&T) -> String) -> Self {
        match result {
            Ok(value) => Self::success(on_success(value)),
            Err(err) => Self::error(err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}
