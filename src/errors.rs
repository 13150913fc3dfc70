// /src/errors.rs
//! Toolkit-facing failures. Data-shape problems never end up here; they degrade silently.
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Toolkit call '{operation}' failed: {details}")]
    Toolkit { operation: String, details: String },

    #[error("Initializer produced no widget instance for id '{id}'")]
    MissingInstance { id: String },

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Python call failed: {0}")]
    PythonError(String),
}

impl SyncError {
    pub fn toolkit(operation: impl Into<String>, details: impl Into<String>) -> Self {
        SyncError::Toolkit {
            operation: operation.into(),
            details: details.into(),
        }
    }
}

/// A swap that did not complete, together with whichever instance is live afterwards.
///
/// Before the old instance is disposed that is the old one, and the replacement has already
/// been disposed. Once the old instance is gone it is the replacement.
#[derive(Error)]
#[error("{source}")]
pub struct SwapError<W> {
    pub widget: W,
    pub source: SyncError,
}

impl<W> SwapError<W> {
    pub fn new(widget: W, source: SyncError) -> Self {
        SwapError { widget, source }
    }

    pub fn into_parts(self) -> (W, SyncError) {
        (self.widget, self.source)
    }
}

// Widget handles rarely implement Debug.
impl<W> fmt::Debug for SwapError<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapError")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<W> From<SwapError<W>> for SyncError {
    fn from(err: SwapError<W>) -> Self {
        err.source
    }
}

#[cfg(feature = "python")]
impl From<SyncError> for pyo3::PyErr {
    fn from(err: SyncError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<pyo3::PyErr> for SyncError {
    fn from(err: pyo3::PyErr) -> Self {
        SyncError::PythonError(err.to_string())
    }
}
