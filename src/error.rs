//! Error types for canvas operations.
//!
//! Collaborator failures arrive as opaque `anyhow` errors through the
//! persistence bridge and are wrapped here so callers can tell retryable
//! commit failures apart from programming errors.

use thiserror::Error;

use crate::types::MarkerId;

/// Errors surfaced by the canvas orchestrator.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// A position commit failed. The displayed position has already been
    /// rolled back to the last committed value; the caller may retry.
    #[error("commit failed for marker {marker}")]
    CommitFailed {
        marker: MarkerId,
        source: anyhow::Error,
    },

    /// Marker creation failed at the bridge.
    #[error("marker creation failed")]
    CreateFailed(#[source] anyhow::Error),

    /// Marker deletion failed at the bridge.
    #[error("delete failed for marker {marker}")]
    DeleteFailed {
        marker: MarkerId,
        source: anyhow::Error,
    },

    /// Listing markers for the plan failed at the bridge.
    #[error("marker list failed")]
    ListFailed(#[source] anyhow::Error),

    /// The operation referenced a marker the canvas does not know.
    #[error("unknown marker {0}")]
    MarkerNotFound(MarkerId),
}

impl CanvasError {
    /// True for failures the caller can usefully retry.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::MarkerNotFound(_))
    }
}

/// Result type alias for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
