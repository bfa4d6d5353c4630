//! Structured error types shared across the simplicial crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SimplicialError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (labels, orders, sizes).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for complex construction, queries and homology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SimplicialError {
    /// A referenced simplex is not in the complex.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// A label is already in use.
    #[error("duplicate label: {0}")]
    DuplicateLabel(ErrorInfo),
    /// A simplex with the same basis already exists.
    #[error("duplicate basis: {0}")]
    DuplicateBasis(ErrorInfo),
    /// Face count, face order or face distinctness is wrong.
    #[error("invalid order: {0}")]
    InvalidOrder(ErrorInfo),
    /// Broader structural violation (bad basis, order limits, corrupt state).
    #[error("invalid structure: {0}")]
    InvalidStructure(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
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

impl SimplicialError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SimplicialError::NotFound(info)
            | SimplicialError::DuplicateLabel(info)
            | SimplicialError::DuplicateBasis(info)
            | SimplicialError::InvalidOrder(info)
            | SimplicialError::InvalidStructure(info)
            | SimplicialError::Serde(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to whichever payload this error carries.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        let value = value.to_string();
        match self {
            SimplicialError::NotFound(info) => {
                SimplicialError::NotFound(info.with_context(key, value))
            }
            SimplicialError::DuplicateLabel(info) => {
                SimplicialError::DuplicateLabel(info.with_context(key, value))
            }
            SimplicialError::DuplicateBasis(info) => {
                SimplicialError::DuplicateBasis(info.with_context(key, value))
            }
            SimplicialError::InvalidOrder(info) => {
                SimplicialError::InvalidOrder(info.with_context(key, value))
            }
            SimplicialError::InvalidStructure(info) => {
                SimplicialError::InvalidStructure(info.with_context(key, value))
            }
            SimplicialError::Serde(info) => SimplicialError::Serde(info.with_context(key, value)),
        }
    }

    /// Attaches a remediation hint.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            SimplicialError::NotFound(info) => SimplicialError::NotFound(info.with_hint(hint)),
            SimplicialError::DuplicateLabel(info) => {
                SimplicialError::DuplicateLabel(info.with_hint(hint))
            }
            SimplicialError::DuplicateBasis(info) => {
                SimplicialError::DuplicateBasis(info.with_hint(hint))
            }
            SimplicialError::InvalidOrder(info) => {
                SimplicialError::InvalidOrder(info.with_hint(hint))
            }
            SimplicialError::InvalidStructure(info) => {
                SimplicialError::InvalidStructure(info.with_hint(hint))
            }
            SimplicialError::Serde(info) => SimplicialError::Serde(info.with_hint(hint)),
        }
    }

    /// Missing simplex.
    pub fn not_found(label: impl Display) -> Self {
        SimplicialError::NotFound(
            ErrorInfo::new("unknown-simplex", "simplex does not exist")
                .with_context("simplex", label.to_string()),
        )
    }

    /// Label already taken.
    pub fn duplicate_label(label: impl Display) -> Self {
        SimplicialError::DuplicateLabel(
            ErrorInfo::new("duplicate-label", "label already in use")
                .with_context("simplex", label.to_string()),
        )
    }

    /// Shorthand for a [`SimplicialError::DuplicateBasis`] with the given code.
    pub fn duplicate_basis(code: impl Into<String>, message: impl Into<String>) -> Self {
        SimplicialError::DuplicateBasis(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`SimplicialError::InvalidOrder`] with the given code.
    pub fn invalid_order(code: impl Into<String>, message: impl Into<String>) -> Self {
        SimplicialError::InvalidOrder(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`SimplicialError::InvalidStructure`] with the given code.
    pub fn invalid_structure(code: impl Into<String>, message: impl Into<String>) -> Self {
        SimplicialError::InvalidStructure(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`SimplicialError::Serde`] with the given code.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        SimplicialError::Serde(ErrorInfo::new(code, message))
    }
}
