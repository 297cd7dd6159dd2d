//! Structured error types shared across the tumor-heterogeneity crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ThetError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for tumor-heterogeneity inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ThetError {
    /// Dimension mismatches and malformed aggregates. These indicate caller bugs.
    #[error("structure error: {0}")]
    Structure(ErrorInfo),
    /// Invalid proposal configuration or hyperparameters.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Undefined numerical results (NaN densities, empty categorical support).
    #[error("numeric error: {0}")]
    Numeric(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ThetError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ThetError::Structure(info)
            | ThetError::Config(info)
            | ThetError::Numeric(info) => info,
        }
    }

    /// Shorthand for a [`ThetError::Structure`] error.
    pub fn structure(code: impl Into<String>, message: impl Into<String>) -> Self {
        ThetError::Structure(ErrorInfo::new(code, message))
    }

    /// Reports a sequence whose length disagrees with the model dimensions.
    pub fn dimension_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        ThetError::Structure(
            ErrorInfo::new("dimension-mismatch", format!("{what} has unexpected length"))
                .with_context("expected", expected)
                .with_context("actual", actual),
        )
    }
}
