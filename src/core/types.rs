use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Backing-store size of a drawing surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// A point in plot space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// User-facing plot parameters, exactly as entered (after numeric coercion).
///
/// A fresh value is built for every refresh request. Nothing here is checked;
/// see `api::parameter_model::validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotParameters {
    pub expression: String,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub interval_count: i64,
    pub resolution: i64,
}

impl PlotParameters {
    /// Creates parameters for `expression` with the default window.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_x_range(mut self, min_x: f64, max_x: f64) -> Self {
        self.min_x = min_x;
        self.max_x = max_x;
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, min_y: f64, max_y: f64) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self
    }

    #[must_use]
    pub fn with_interval_count(mut self, interval_count: i64) -> Self {
        self.interval_count = interval_count;
        self
    }

    #[must_use]
    pub fn with_resolution(mut self, resolution: i64) -> Self {
        self.resolution = resolution;
        self
    }
}

impl Default for PlotParameters {
    fn default() -> Self {
        Self {
            expression: "x^2".to_owned(),
            min_x: -5.0,
            max_x: 5.0,
            min_y: -5.0,
            max_y: 5.0,
            interval_count: 10,
            resolution: 100,
        }
    }
}

/// Size of the plotting canvas as stored and as displayed.
///
/// Browsers may scale a canvas with CSS, so the rendered size can differ from
/// the backing-store resolution the engine draws into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    pub logical: Viewport,
    pub display_width: f64,
    pub display_height: f64,
}

impl CanvasGeometry {
    /// Geometry of a canvas shown at its backing-store size.
    #[must_use]
    pub fn unscaled(logical: Viewport) -> Self {
        Self {
            logical,
            display_width: f64::from(logical.width),
            display_height: f64::from(logical.height),
        }
    }

    #[must_use]
    pub fn with_display_size(mut self, display_width: f64, display_height: f64) -> Self {
        self.display_width = display_width;
        self.display_height = display_height;
        self
    }

    /// Device-to-logical scale factors per axis, or `None` when the display
    /// size cannot be divided by.
    #[must_use]
    pub fn logical_scale(self) -> Option<(f64, f64)> {
        let usable = |value: f64| value.is_finite() && value > 0.0;
        if !usable(self.display_width) || !usable(self.display_height) {
            return None;
        }
        Some((
            f64::from(self.logical.width) / self.display_width,
            f64::from(self.logical.height) / self.display_height,
        ))
    }

    /// Resizes the canvas to `width_px` wide, keeping its aspect ratio.
    ///
    /// Display and backing-store sizes are equal afterwards.
    pub fn fit_width(self, width_px: f64) -> PlotResult<Self> {
        if !self.logical.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.logical.width,
                height: self.logical.height,
            });
        }
        if !width_px.is_finite() || width_px < 1.0 {
            return Err(PlotError::InvalidData(format!(
                "canvas width must be finite and >= 1, got {width_px}"
            )));
        }

        let height_px = width_px / self.logical.aspect_ratio();
        let logical = Viewport::new(width_px as u32, (height_px as u32).max(1));
        Ok(Self {
            logical,
            display_width: width_px,
            display_height: height_px,
        })
    }
}
