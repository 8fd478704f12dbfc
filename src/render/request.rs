use serde::Serialize;

use crate::core::PlotParameters;

/// Validated parameter set handed to the engine.
///
/// Only `api::parameter_model::render_request` builds one, so every request an
/// engine sees has ordered bounds and non-negative counts. It serializes for
/// logging and snapshots but never deserializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    expression: String,
    x_range: (f64, f64),
    y_range: (f64, f64),
    interval_count: usize,
    resolution: usize,
    dark_mode: bool,
}

impl RenderRequest {
    /// Callers must have validated `params` first.
    pub(crate) fn from_validated(params: &PlotParameters, dark_mode: bool) -> Self {
        Self {
            expression: params.expression.clone(),
            x_range: (params.min_x, params.max_x),
            y_range: (params.min_y, params.max_y),
            interval_count: usize::try_from(params.interval_count).unwrap_or_default(),
            resolution: usize::try_from(params.resolution).unwrap_or_default(),
            dark_mode,
        }
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    #[must_use]
    pub fn interval_count(&self) -> usize {
        self.interval_count
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }
}
