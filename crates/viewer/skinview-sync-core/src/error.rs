//! Error types for viewer synchronization.

use serde::{Deserialize, Serialize};

/// Failures surfaced by the synchronization layer.
///
/// A binding firing before the viewer exists is not an error (it is a no-op),
/// and texture load failures belong to the engine, so neither appears here.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SyncError {
    /// Symbolic animation name outside the closed set.
    #[error("Unknown animation: {name}")]
    UnknownAnimation { name: String },

    /// Initial creation needs both width and height.
    #[error("Viewer creation requires width and height (got {width:?} x {height:?})")]
    MissingDimensions {
        width: Option<u32>,
        height: Option<u32>,
    },

    /// A viewer already exists for this mounted instance.
    #[error("Viewer already created for this instance")]
    AlreadyCreated,

    /// The engine refused to construct a viewer.
    #[error("Engine error: {reason}")]
    Engine { reason: String },
}

impl SyncError {
    /// Create an engine error from any displayable reason.
    pub fn engine(reason: impl Into<String>) -> Self {
        Self::Engine {
            reason: reason.into(),
        }
    }

    /// Contract violations by the caller, as opposed to engine failures.
    #[inline]
    pub fn is_contract_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownAnimation { .. } | Self::MissingDimensions { .. } | Self::AlreadyCreated
        )
    }
}
