use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::core::{LinearScale, PlotPoint, Viewport};
use crate::error::EngineError;
use crate::render::{
    DrawingSurface, EngineInstance, PlotEngine, RenderOutput, RenderRequest, RenderResult,
};

type PlotFunction = Rc<dyn Fn(f64) -> f64>;

/// Number of calls an engine received, per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineCallCounts {
    pub constructs: usize,
    pub prechecks: usize,
    pub updates: usize,
}

/// Space reserved around the plotted region for caption and axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            left: 50.0,
            right: 20.0,
            top: 20.0,
            bottom: 50.0,
        }
    }
}

#[derive(Default)]
struct EngineState {
    functions: HashMap<String, PlotFunction>,
    rejections: HashMap<String, String>,
    construct_failure: Option<String>,
    update_failure: Option<String>,
    counts: EngineCallCounts,
    last_request: Option<RenderRequest>,
    last_trace: Vec<PlotPoint>,
    diagnostics_hooked: bool,
}

/// Engine used by tests, benches and headless hosts.
///
/// It does not parse anything: each expression string is registered together
/// with the closure that evaluates it. Unregistered expressions fail the
/// precheck like an unknown variable would. Clones share state, so a test can
/// keep a handle for inspection after moving the engine into a session.
#[derive(Clone, Default)]
pub struct HeadlessEngine {
    state: Rc<RefCell<EngineState>>,
    margins: PlotMargins,
}

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_function(
        self,
        expression: impl Into<String>,
        function: impl Fn(f64) -> f64 + 'static,
    ) -> Self {
        self.state
            .borrow_mut()
            .functions
            .insert(expression.into(), Rc::new(function));
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: PlotMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Makes the precheck of `expression` report `diagnostic`.
    pub fn reject_expression(&self, expression: impl Into<String>, diagnostic: impl Into<String>) {
        self.state
            .borrow_mut()
            .rejections
            .insert(expression.into(), diagnostic.into());
    }

    /// Makes every `construct` fail with `message` until cleared with `None`.
    pub fn fail_construction(&self, message: Option<&str>) {
        self.state.borrow_mut().construct_failure = message.map(str::to_owned);
    }

    /// Makes every `update` fail with `message` until cleared with `None`.
    pub fn fail_updates(&self, message: Option<&str>) {
        self.state.borrow_mut().update_failure = message.map(str::to_owned);
    }

    #[must_use]
    pub fn call_counts(&self) -> EngineCallCounts {
        self.state.borrow().counts
    }

    #[must_use]
    pub fn last_request(&self) -> Option<RenderRequest> {
        self.state.borrow().last_request.clone()
    }

    /// Curve samples of the last successful update, in surface pixels.
    ///
    /// Samples outside the y range are clipped, as a canvas would.
    #[must_use]
    pub fn last_trace(&self) -> Vec<PlotPoint> {
        self.state.borrow().last_trace.clone()
    }

    #[must_use]
    pub fn diagnostics_hooked(&self) -> bool {
        self.state.borrow().diagnostics_hooked
    }
}

impl HeadlessEngine {
    fn precheck(&self, expression: &str) -> Option<String> {
        let mut state = self.state.borrow_mut();
        state.counts.prechecks += 1;
        if let Some(diagnostic) = state.rejections.get(expression) {
            return Some(diagnostic.clone());
        }
        if !state.functions.contains_key(expression) {
            return Some(format!("Evaluation error: unknown variable {expression}"));
        }
        None
    }
}

impl PlotEngine for HeadlessEngine {
    type Surface = Viewport;
    type Instance = HeadlessInstance;

    fn construct(&mut self, request: &RenderRequest) -> Result<Self::Instance, EngineError> {
        let mut state = self.state.borrow_mut();
        state.counts.constructs += 1;
        if let Some(message) = &state.construct_failure {
            return Err(EngineError::new(message.clone()));
        }
        debug!(expression = request.expression(), "headless engine instance constructed");
        Ok(HeadlessInstance {
            state: Rc::clone(&self.state),
            margins: self.margins,
        })
    }

    fn precheck_expression(&self, expression: &str) -> Option<String> {
        self.precheck(expression)
    }

    fn init_diagnostics_hook(&mut self) {
        self.state.borrow_mut().diagnostics_hooked = true;
    }
}

/// Engine instance produced by `HeadlessEngine`.
pub struct HeadlessInstance {
    state: Rc<RefCell<EngineState>>,
    margins: PlotMargins,
}

impl EngineInstance for HeadlessInstance {
    type Surface = Viewport;

    fn update(
        &mut self,
        surface: &Self::Surface,
        request: &RenderRequest,
    ) -> Result<RenderResult, EngineError> {
        let function = {
            let mut state = self.state.borrow_mut();
            state.counts.updates += 1;
            state.last_request = Some(request.clone());
            if let Some(message) = &state.update_failure {
                return Err(EngineError::new(message.clone()));
            }
            state
                .functions
                .get(request.expression())
                .cloned()
                .ok_or_else(|| {
                    EngineError::new(format!(
                        "no function registered for `{}`",
                        request.expression()
                    ))
                })?
        };

        let region = PlotRegion::inside(surface.backing_size(), self.margins)?;
        let (min_x, max_x) = request.x_range();
        let (min_y, max_y) = request.y_range();
        let x_scale =
            LinearScale::new(min_x, max_x).map_err(|e| EngineError::new(e.to_string()))?;
        let y_scale = LinearScale::new(min_y, max_y)
            .map_err(|e| EngineError::new(e.to_string()))?
            .with_inverted(true);

        let trace: Vec<PlotPoint> = sample_curve(function.as_ref(), request)
            .filter(|point| (min_y..=max_y).contains(&point.y))
            .filter_map(|point| region.project(x_scale, y_scale, point))
            .collect();
        let step = (max_x - min_x).abs() / request.interval_count() as f64;
        let area = estimate_area(function.as_ref(), min_x, step, request.interval_count());

        debug!(
            expression = request.expression(),
            plotted_samples = trace.len(),
            area,
            dark_mode = request.dark_mode(),
            "headless engine rendered"
        );
        self.state.borrow_mut().last_trace = trace;
        Ok(RenderResult::new(HeadlessOutput {
            area,
            region,
            x_scale,
            y_scale,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotRegion {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotRegion {
    fn inside(viewport: Viewport, margins: PlotMargins) -> Result<Self, EngineError> {
        let width = f64::from(viewport.width) - margins.left - margins.right;
        let height = f64::from(viewport.height) - margins.top - margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(EngineError::new(format!(
                "surface {}x{} is too small to plot into",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }

    fn project(
        self,
        x_scale: LinearScale,
        y_scale: LinearScale,
        point: PlotPoint,
    ) -> Option<PlotPoint> {
        let x = x_scale.domain_to_pixel(point.x, self.width).ok()?;
        let y = y_scale.domain_to_pixel(point.y, self.height).ok()?;
        Some(PlotPoint::new(self.left + x, self.top + y))
    }

    fn local(self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (local_x, local_y) = (x - self.left, y - self.top);
        let inside =
            (0.0..=self.width).contains(&local_x) && (0.0..=self.height).contains(&local_y);
        inside.then_some((local_x, local_y))
    }
}

struct HeadlessOutput {
    area: f64,
    region: PlotRegion,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl RenderOutput for HeadlessOutput {
    fn estimated_area(&self) -> f64 {
        self.area
    }

    fn query_coordinate(&self, logical_x: f64, logical_y: f64) -> Option<PlotPoint> {
        let (local_x, local_y) = self.region.local(logical_x, logical_y)?;
        let x = self.x_scale.pixel_to_domain(local_x, self.region.width).ok()?;
        let y = self.y_scale.pixel_to_domain(local_y, self.region.height).ok()?;
        Some(PlotPoint::new(x, y))
    }
}

fn sample_curve<'a>(
    function: &'a dyn Fn(f64) -> f64,
    request: &RenderRequest,
) -> impl Iterator<Item = PlotPoint> + 'a {
    let (min_x, max_x) = request.x_range();
    let span = (max_x - min_x).abs();
    let resolution = request.resolution();
    (1..=resolution).map(move |i| {
        let x = (i as f64 / resolution as f64) * span + min_x;
        PlotPoint::new(x, function(x))
    })
}

// Each rectangle takes the endpoint value closest to zero; NaN heights are skipped.
fn estimate_area(
    function: &dyn Fn(f64) -> f64,
    min_x: f64,
    step: f64,
    interval_count: usize,
) -> f64 {
    (0..interval_count)
        .map(|i| {
            let x = (i as f64) * step + min_x;
            let x2 = if x > 0.0 { x + step } else { x - step };
            let (left, right) = (function(x), function(x2));
            if right.abs() > left.abs() { left } else { right }
        })
        .filter(|height| !height.is_nan())
        .map(|height| height * step)
        .sum()
}
