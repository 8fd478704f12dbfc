use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("offline cache `{cache}` could not fetch `{path}`: {reason}")]
    AssetFetch {
        cache: String,
        path: String,
        reason: String,
    },
}

/// Failure reported by the chart engine capability.
///
/// The engine is opaque, so all it hands back is a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a set of plot parameters was refused before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum InvalidParameterReason {
    #[error("Min X must be less than Max X.")]
    MinGreaterOrEqualMaxX,
    #[error("Min Y must be less than Max Y.")]
    MinGreaterOrEqualMaxY,
    #[error("Interval count must not be negative.")]
    NegativeIntervalCount,
    #[error("Resolution must not be negative.")]
    NegativeResolution,
}

/// Outcome of a failed `PlotSession::refresh`.
///
/// Every variant leaves the session in a continuable state; the controller
/// turns them into status text instead of propagating them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("invalid plot parameters: {0}")]
    InvalidParameters(InvalidParameterReason),

    #[error("chart engine construction failed: {0}")]
    ConstructionFailed(#[source] EngineError),

    #[error("expression rejected: {0}")]
    ExpressionRejected(String),

    #[error("render failed: {0}")]
    RenderFailed(#[source] EngineError),
}
