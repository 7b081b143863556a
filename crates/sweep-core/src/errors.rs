//! Structured error types shared across the sweep crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuple::{format_radius, ExperimentTuple};

/// Diagnostic carried by every [`SweepError`]: a stable snake_case code, a
/// one-line message, and whatever the sweep knew when it failed (the file
/// involved, the tuple being run, raw lookup output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable code such as `range_inverted` or `shell_spawn`.
    pub code: String,
    /// One-line description.
    pub message: String,
    /// Sorted key/value details.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// What to change to get the sweep going again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Starts a diagnostic with no details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one detail; a repeated key overwrites the earlier value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the file the failure concerns under `path`.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        let shown = path.as_ref().display().to_string();
        self.with_context("path", shown)
    }

    /// Records the tuple being processed as `dimension`, `points` and `radius`,
    /// the radius rendered exactly as the benchmark would receive it.
    pub fn with_tuple(self, tuple: &ExperimentTuple) -> Self {
        self.with_context("dimension", tuple.dimension.to_string())
            .with_context("points", tuple.point_count.to_string())
            .with_context("radius", format_radius(tuple.radius))
    }

    /// Sets the remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the sweep driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SweepError {
    /// Invalid or inconsistent sweep plan.
    #[error("plan error: {0}")]
    Plan(ErrorInfo),
    /// External fragmentation lookup failed or produced malformed output.
    #[error("lookup error: {0}")]
    Lookup(ErrorInfo),
    /// External benchmark process could not be started.
    #[error("invoke error: {0}")]
    Invoke(ErrorInfo),
    /// Filesystem errors outside best-effort housekeeping.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

/// Renders `code: message (key=value, ...); hint`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        let mut details = self.context.iter();
        if let Some((key, value)) = details.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in details {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; {hint}"),
            None => Ok(()),
        }
    }
}

impl SweepError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SweepError::Plan(info)
            | SweepError::Lookup(info)
            | SweepError::Invoke(info)
            | SweepError::Io(info)
            | SweepError::Serde(info) => info,
        }
    }

    /// Filesystem failure on `path`; the OS message becomes the message.
    pub fn io(code: &str, path: impl AsRef<Path>, err: impl ToString) -> Self {
        SweepError::Io(ErrorInfo::new(code, err.to_string()).with_path(path))
    }
}
