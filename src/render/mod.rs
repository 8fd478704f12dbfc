mod headless_engine;
mod request;

pub use headless_engine::{EngineCallCounts, HeadlessEngine, HeadlessInstance, PlotMargins};
pub use request::RenderRequest;

use std::fmt;
use std::rc::Rc;

use crate::core::{PlotPoint, Viewport};
use crate::error::EngineError;

/// Drawing target handed to every engine update.
pub trait DrawingSurface {
    fn backing_size(&self) -> Viewport;
    fn set_backing_size(&mut self, viewport: Viewport);
}

impl DrawingSurface for Viewport {
    fn backing_size(&self) -> Viewport {
        *self
    }

    fn set_backing_size(&mut self, viewport: Viewport) {
        *self = viewport;
    }
}

/// Contract implemented by any chart engine backend.
///
/// The engine evaluates expressions, rasterizes the chart and estimates the
/// area. The controller treats all of that as opaque and only sequences the
/// calls.
pub trait PlotEngine {
    type Surface: DrawingSurface;
    type Instance: EngineInstance<Surface = Self::Surface>;

    fn construct(&mut self, request: &RenderRequest) -> Result<Self::Instance, EngineError>;

    /// Test-evaluates `expression` without rendering.
    ///
    /// `None` or an empty string means the expression is acceptable.
    fn precheck_expression(&self, expression: &str) -> Option<String>;

    /// Called once when the host starts up.
    fn init_diagnostics_hook(&mut self) {}
}

/// One live, stateful engine session.
pub trait EngineInstance {
    type Surface: DrawingSurface;

    fn update(
        &mut self,
        surface: &Self::Surface,
        request: &RenderRequest,
    ) -> Result<RenderResult, EngineError>;
}

/// What an engine hands back for one successful render.
pub trait RenderOutput {
    fn estimated_area(&self) -> f64;

    /// Maps a logical canvas pixel to plot space, `None` outside the plotted
    /// data region.
    fn query_coordinate(&self, logical_x: f64, logical_y: f64) -> Option<PlotPoint>;
}

/// Shared handle to the output of one successful render.
///
/// Clones refer to the same render; use `same_render` to compare identity.
#[derive(Clone)]
pub struct RenderResult {
    output: Rc<dyn RenderOutput>,
}

impl RenderResult {
    #[must_use]
    pub fn new(output: impl RenderOutput + 'static) -> Self {
        Self {
            output: Rc::new(output),
        }
    }

    #[must_use]
    pub fn estimated_area(&self) -> f64 {
        self.output.estimated_area()
    }

    #[must_use]
    pub fn query_coordinate(&self, logical_x: f64, logical_y: f64) -> Option<PlotPoint> {
        self.output.query_coordinate(logical_x, logical_y)
    }

    #[must_use]
    pub fn same_render(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.output, &other.output)
    }
}

impl fmt::Debug for RenderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderResult")
            .field("estimated_area", &self.estimated_area())
            .finish_non_exhaustive()
    }
}
