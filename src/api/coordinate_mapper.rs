use serde::{Deserialize, Serialize};

use crate::core::{CanvasGeometry, PlotPoint};
use crate::render::RenderResult;

pub const OUTSIDE_CHART_READOUT: &str = "Mouse is outside Chart.";
pub const DEFAULT_READOUT_PRECISION: usize = 3;

/// Pointer position in device (CSS) pixels relative to the event target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub device_x: f64,
    pub device_y: f64,
    /// Whether the event target is the plotting surface.
    pub on_surface: bool,
}

impl PointerSample {
    #[must_use]
    pub fn on_surface(device_x: f64, device_y: f64) -> Self {
        Self {
            device_x,
            device_y,
            on_surface: true,
        }
    }

    #[must_use]
    pub fn elsewhere(device_x: f64, device_y: f64) -> Self {
        Self {
            device_x,
            device_y,
            on_surface: false,
        }
    }
}

/// Result of a pointer lookup, keeping the reasons for "no coordinate" apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CoordinateLookup {
    /// Nothing has been rendered yet.
    NoSession,
    /// The pointer is not over the plotting surface.
    OffSurface,
    /// Over the surface, but outside the plotted data region.
    OutsideData,
    Point(PlotPoint),
}

impl CoordinateLookup {
    #[must_use]
    pub fn point(self) -> Option<PlotPoint> {
        match self {
            Self::Point(point) => Some(point),
            Self::NoSession | Self::OffSurface | Self::OutsideData => None,
        }
    }
}

/// Maps a pointer sample to plot space using the current render result.
#[must_use]
pub fn locate(
    pointer: PointerSample,
    geometry: CanvasGeometry,
    current: Option<&RenderResult>,
) -> CoordinateLookup {
    let Some(result) = current else {
        return CoordinateLookup::NoSession;
    };
    if !pointer.on_surface {
        return CoordinateLookup::OffSurface;
    }
    let Some((scale_x, scale_y)) = geometry.logical_scale() else {
        return CoordinateLookup::OffSurface;
    };

    let logical_x = pointer.device_x * scale_x;
    let logical_y = pointer.device_y * scale_y;
    match result.query_coordinate(logical_x, logical_y) {
        Some(point) => CoordinateLookup::Point(point),
        None => CoordinateLookup::OutsideData,
    }
}

/// Text for the pointer readout; `None` leaves the readout untouched.
#[must_use]
pub fn format_readout(lookup: CoordinateLookup, precision: usize) -> Option<String> {
    match lookup {
        CoordinateLookup::NoSession => None,
        CoordinateLookup::OffSurface | CoordinateLookup::OutsideData => {
            Some(OUTSIDE_CHART_READOUT.to_owned())
        }
        CoordinateLookup::Point(point) => Some(format!(
            "({:.precision$}, {:.precision$})",
            point.x, point.y
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CoordinateLookup, OUTSIDE_CHART_READOUT, PointerSample, format_readout, locate,
    };
    use crate::core::{CanvasGeometry, PlotPoint, Viewport};
    use crate::render::{RenderOutput, RenderResult};

    /// Echoes logical pixels back as plot coordinates inside a 100x100 box.
    struct EchoOutput;

    impl RenderOutput for EchoOutput {
        fn estimated_area(&self) -> f64 {
            0.0
        }

        fn query_coordinate(&self, logical_x: f64, logical_y: f64) -> Option<PlotPoint> {
            (logical_x <= 100.0 && logical_y <= 100.0).then(|| PlotPoint::new(logical_x, logical_y))
        }
    }

    fn geometry() -> CanvasGeometry {
        CanvasGeometry::unscaled(Viewport::new(200, 200)).with_display_size(100.0, 100.0)
    }

    #[test]
    fn no_result_means_no_session() {
        let lookup = locate(PointerSample::on_surface(10.0, 10.0), geometry(), None);
        assert_eq!(lookup, CoordinateLookup::NoSession);
        assert_eq!(format_readout(lookup, 3), None);
    }

    #[test]
    fn pointer_elsewhere_is_off_surface() {
        let result = RenderResult::new(EchoOutput);
        let lookup = locate(PointerSample::elsewhere(10.0, 10.0), geometry(), Some(&result));
        assert_eq!(lookup, CoordinateLookup::OffSurface);
    }

    #[test]
    fn device_pixels_are_rescaled_before_query() {
        let result = RenderResult::new(EchoOutput);
        let lookup = locate(PointerSample::on_surface(20.0, 30.0), geometry(), Some(&result));
        assert_eq!(lookup, CoordinateLookup::Point(PlotPoint::new(40.0, 60.0)));
    }

    #[test]
    fn query_miss_is_outside_data() {
        let result = RenderResult::new(EchoOutput);
        let lookup = locate(PointerSample::on_surface(80.0, 10.0), geometry(), Some(&result));
        assert_eq!(lookup, CoordinateLookup::OutsideData);
        assert_eq!(
            format_readout(lookup, 3).as_deref(),
            Some(OUTSIDE_CHART_READOUT)
        );
    }

    #[test]
    fn readout_uses_requested_precision() {
        let lookup = CoordinateLookup::Point(PlotPoint::new(1.23456, -0.5));
        assert_eq!(
            format_readout(lookup, 3).as_deref(),
            Some("(1.235, -0.500)")
        );
    }
}
