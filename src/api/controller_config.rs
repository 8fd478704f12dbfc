use serde::{Deserialize, Serialize};

use crate::core::{PlotParameters, Viewport};
use crate::error::{PlotError, PlotResult};

use super::coordinate_mapper::DEFAULT_READOUT_PRECISION;

pub const CONTROLLER_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Public controller bootstrap configuration.
///
/// Serializable so hosts can persist and reload the plot form without
/// inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotControllerConfig {
    #[serde(default)]
    pub initial_parameters: PlotParameters,
    #[serde(default = "default_canvas")]
    pub canvas: Viewport,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_readout_precision")]
    pub readout_precision: usize,
    /// Share of the parent width the canvas takes on resize.
    #[serde(default = "default_canvas_width_ratio")]
    pub canvas_width_ratio: f64,
}

impl PlotControllerConfig {
    #[must_use]
    pub fn new(canvas: Viewport) -> Self {
        Self {
            initial_parameters: PlotParameters::default(),
            canvas,
            dark_mode: false,
            readout_precision: default_readout_precision(),
            canvas_width_ratio: default_canvas_width_ratio(),
        }
    }

    #[must_use]
    pub fn with_initial_parameters(mut self, params: PlotParameters) -> Self {
        self.initial_parameters = params;
        self
    }

    #[must_use]
    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    #[must_use]
    pub fn with_readout_precision(mut self, precision: usize) -> Self {
        self.readout_precision = precision;
        self
    }

    #[must_use]
    pub fn with_canvas_width_ratio(mut self, ratio: f64) -> Self {
        self.canvas_width_ratio = ratio;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.canvas.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if self.readout_precision > 12 {
            return Err(PlotError::InvalidConfig(
                "readout precision must be <= 12".to_owned(),
            ));
        }
        if !self.canvas_width_ratio.is_finite()
            || self.canvas_width_ratio <= 0.0
            || self.canvas_width_ratio > 1.0
        {
            return Err(PlotError::InvalidConfig(
                "canvas width ratio must be finite and in (0, 1]".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        let payload = PlotControllerConfigJsonContractV1 {
            schema_version: CONTROLLER_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidConfig(format!("failed to serialize controller config v1: {e}"))
        })
    }

    /// Accepts either a bare config object or the versioned contract.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config = if let Ok(config) = serde_json::from_str::<Self>(input) {
            config
        } else {
            let payload: PlotControllerConfigJsonContractV1 = serde_json::from_str(input)
                .map_err(|e| {
                    PlotError::InvalidConfig(format!("failed to parse controller config: {e}"))
                })?;
            if payload.schema_version != CONTROLLER_CONFIG_JSON_SCHEMA_V1 {
                return Err(PlotError::InvalidConfig(format!(
                    "unsupported controller config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for PlotControllerConfig {
    fn default() -> Self {
        Self::new(default_canvas())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlotControllerConfigJsonContractV1 {
    schema_version: u32,
    config: PlotControllerConfig,
}

fn default_canvas() -> Viewport {
    Viewport::new(800, 600)
}

fn default_readout_precision() -> usize {
    DEFAULT_READOUT_PRECISION
}

fn default_canvas_width_ratio() -> f64 {
    0.8
}
