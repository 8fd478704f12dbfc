use tracing::{debug, info};

use crate::core::{CanvasGeometry, PlotParameters};
use crate::error::{PlotResult, RefreshError};
use crate::render::{DrawingSurface, PlotEngine, RenderResult};

use super::clock::{Clock, SystemClock};
use super::controller_config::PlotControllerConfig;
use super::coordinate_mapper::{CoordinateLookup, PointerSample, format_readout, locate};
use super::error_advisor::{AdvisorOutcome, ErrorAdvisor};
use super::plot_session::PlotSession;
use super::refresh_coalescer::{RefreshCoalescer, RefreshTicket};
use super::status_reporter::StatusReporter;

pub const LOADED_STATUS: &str = "Plotter loaded!";

/// What a UI event ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Rendered { estimated_area: f64, elapsed_ms: u64 },
    Failed(RefreshError),
    /// Another refresh is running; the request waits as the newest pending one.
    Queued,
    /// The refresh finished after newer parameters were requested.
    Discarded,
    /// Nothing has been requested yet, so there is nothing to redraw.
    NothingToRefresh,
}

/// Event-driven front of the plotting subsystem.
///
/// Every failure stops here and becomes status text; nothing is propagated
/// to the host.
pub struct PlotController<E: PlotEngine, S: StatusReporter, C: Clock = SystemClock> {
    session: PlotSession<E>,
    reporter: S,
    advisor: ErrorAdvisor,
    coalescer: RefreshCoalescer,
    clock: C,
    geometry: CanvasGeometry,
    initial_parameters: PlotParameters,
    readout_precision: usize,
    canvas_width_ratio: f64,
    last_requested: Option<PlotParameters>,
    area_readout: Option<String>,
    pointer_readout: Option<String>,
    diagnostics_hooked: bool,
}

impl<E: PlotEngine, S: StatusReporter> PlotController<E, S, SystemClock> {
    pub fn new(
        engine: E,
        surface: E::Surface,
        reporter: S,
        config: PlotControllerConfig,
    ) -> PlotResult<Self> {
        Self::with_clock(engine, surface, reporter, config, SystemClock::new())
    }
}

impl<E: PlotEngine, S: StatusReporter, C: Clock> PlotController<E, S, C> {
    pub fn with_clock(
        engine: E,
        mut surface: E::Surface,
        reporter: S,
        config: PlotControllerConfig,
        clock: C,
    ) -> PlotResult<Self> {
        config.validate()?;
        surface.set_backing_size(config.canvas);
        let mut session = PlotSession::new(engine, surface);
        session.set_dark_mode(config.dark_mode);

        Ok(Self {
            session,
            reporter,
            advisor: ErrorAdvisor::default(),
            coalescer: RefreshCoalescer::new(),
            clock,
            geometry: CanvasGeometry::unscaled(config.canvas),
            initial_parameters: config.initial_parameters,
            readout_precision: config.readout_precision,
            canvas_width_ratio: config.canvas_width_ratio,
            last_requested: None,
            area_readout: None,
            pointer_readout: None,
            diagnostics_hooked: false,
        })
    }

    #[must_use]
    pub fn with_advisor(mut self, advisor: ErrorAdvisor) -> Self {
        self.advisor = advisor;
        self
    }

    /// Hooks engine diagnostics (once) and draws the initial parameters.
    pub fn start(&mut self) -> RefreshOutcome {
        if !self.diagnostics_hooked {
            self.session.engine_mut().init_diagnostics_hook();
            self.diagnostics_hooked = true;
            info!("plot controller started");
        }
        self.reporter.report_progress(LOADED_STATUS);
        self.on_input_changed(self.initial_parameters.clone())
    }

    pub fn on_input_changed(&mut self, params: PlotParameters) -> RefreshOutcome {
        self.last_requested = Some(params.clone());
        match self.coalescer.request(params) {
            Some(ticket) => self.drive(ticket),
            None => RefreshOutcome::Queued,
        }
    }

    /// Redraws the last requested parameters with the new theme.
    pub fn on_color_scheme_changed(&mut self, dark_mode: bool) -> RefreshOutcome {
        self.session.set_dark_mode(dark_mode);
        self.refresh_last_requested()
    }

    /// Sizes the canvas to a share of `parent_width_px` and redraws.
    pub fn on_resize(&mut self, parent_width_px: f64) -> PlotResult<RefreshOutcome> {
        let geometry = self
            .geometry
            .fit_width(parent_width_px * self.canvas_width_ratio)?;
        debug!(
            width = geometry.logical.width,
            height = geometry.logical.height,
            "canvas resized"
        );
        self.apply_geometry(geometry);
        Ok(self.refresh_last_requested())
    }

    /// Records a display size that differs from the backing store (CSS scaling).
    pub fn set_geometry(&mut self, geometry: CanvasGeometry) {
        self.apply_geometry(geometry);
    }

    /// Updates the pointer readout; it is left alone while nothing is rendered.
    pub fn on_pointer_move(&mut self, pointer: PointerSample) -> CoordinateLookup {
        let lookup = locate(pointer, self.geometry, self.session.current_result());
        if let Some(text) = format_readout(lookup, self.readout_precision) {
            self.pointer_readout = Some(text);
        }
        lookup
    }

    #[must_use]
    pub fn session(&self) -> &PlotSession<E> {
        &self.session
    }

    #[must_use]
    pub fn current_result(&self) -> Option<&RenderResult> {
        self.session.current_result()
    }

    #[must_use]
    pub fn reporter(&self) -> &S {
        &self.reporter
    }

    #[must_use]
    pub fn advisor(&self) -> &ErrorAdvisor {
        &self.advisor
    }

    #[must_use]
    pub fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    #[must_use]
    pub fn last_requested(&self) -> Option<&PlotParameters> {
        self.last_requested.as_ref()
    }

    #[must_use]
    pub fn area_readout(&self) -> Option<&str> {
        self.area_readout.as_deref()
    }

    #[must_use]
    pub fn pointer_readout(&self) -> Option<&str> {
        self.pointer_readout.as_deref()
    }

    fn apply_geometry(&mut self, geometry: CanvasGeometry) {
        self.geometry = geometry;
        self.session.surface_mut().set_backing_size(geometry.logical);
    }

    fn refresh_last_requested(&mut self) -> RefreshOutcome {
        match self.last_requested.clone() {
            Some(params) => self.on_input_changed(params),
            None => RefreshOutcome::NothingToRefresh,
        }
    }

    /// Runs `ticket` and every request queued behind it; returns the last outcome.
    fn drive(&mut self, mut ticket: RefreshTicket) -> RefreshOutcome {
        loop {
            let (outcome, next) = self.settle_ticket(&ticket);
            match next {
                Some(next) => ticket = next,
                None => return outcome,
            }
        }
    }

    fn settle_ticket(
        &mut self,
        ticket: &RefreshTicket,
    ) -> (RefreshOutcome, Option<RefreshTicket>) {
        let params = ticket.params();
        self.reporter
            .report_progress(&format!("Rendering y={}...", params.expression));
        let started_ms = self.clock.now_ms();
        let rendered = self.session.render(params);
        let elapsed_ms = (self.clock.now_ms() - started_ms).max(0.0).ceil() as u64;

        let settlement = self.coalescer.settle(ticket);
        let outcome = if settlement.commit {
            self.publish(params, rendered, elapsed_ms)
        } else {
            RefreshOutcome::Discarded
        };
        (outcome, settlement.next)
    }

    fn publish(
        &mut self,
        params: &PlotParameters,
        rendered: Result<RenderResult, RefreshError>,
        elapsed_ms: u64,
    ) -> RefreshOutcome {
        match rendered {
            Ok(result) => {
                let estimated_area = result.estimated_area();
                self.session.commit(params, result);
                self.area_readout = Some(format!("Estimated Area: {estimated_area}"));
                self.reporter.report_success(&format!(
                    "Rendered y={} in {elapsed_ms}ms",
                    params.expression
                ));
                RefreshOutcome::Rendered {
                    estimated_area,
                    elapsed_ms,
                }
            }
            Err(err) => {
                let message = self.status_for_error(&err);
                self.reporter.report_error(&message);
                RefreshOutcome::Failed(err)
            }
        }
    }

    fn status_for_error(&self, err: &RefreshError) -> String {
        match err {
            RefreshError::InvalidParameters(reason) => reason.to_string(),
            RefreshError::ConstructionFailed(source) => {
                format!("Unable to start the chart engine: {source}")
            }
            RefreshError::ExpressionRejected(diagnostic) => {
                match self.advisor.recommend(diagnostic) {
                    AdvisorOutcome::Tip(tip) => format!("{diagnostic} Tip: {tip}"),
                    AdvisorOutcome::NoTip => diagnostic.clone(),
                }
            }
            RefreshError::RenderFailed(_) if self.session.current_result().is_some() => {
                "Rendering failed; showing the last good plot.".to_owned()
            }
            RefreshError::RenderFailed(_) => "Rendering failed.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LOADED_STATUS, PlotController, RefreshOutcome};
    use crate::api::clock::ManualClock;
    use crate::api::controller_config::PlotControllerConfig;
    use crate::api::status_reporter::{RecordingStatusReporter, StatusTone};
    use crate::core::{PlotParameters, Viewport};
    use crate::render::HeadlessEngine;

    type TestController = PlotController<HeadlessEngine, RecordingStatusReporter, ManualClock>;

    fn build_controller() -> (TestController, HeadlessEngine) {
        let engine = HeadlessEngine::new()
            .with_function("x^2", |x| x * x)
            .with_function("x", |x| x);
        let handle = engine.clone();
        let controller = PlotController::with_clock(
            engine,
            Viewport::new(1, 1),
            RecordingStatusReporter::new(),
            PlotControllerConfig::default(),
            ManualClock::with_step(4.2),
        )
        .expect("controller");
        (controller, handle)
    }

    #[test]
    fn start_hooks_diagnostics_and_renders_initial_parameters() {
        let (mut controller, engine) = build_controller();
        let outcome = controller.start();

        assert!(engine.diagnostics_hooked());
        assert!(matches!(
            outcome,
            RefreshOutcome::Rendered { elapsed_ms: 5, .. }
        ));
        let texts: Vec<&str> = controller
            .reporter()
            .history()
            .iter()
            .map(|line| line.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![LOADED_STATUS, "Rendering y=x^2...", "Rendered y=x^2 in 5ms"]
        );
        assert!(
            controller
                .area_readout()
                .is_some_and(|text| text.starts_with("Estimated Area: "))
        );
    }

    #[test]
    fn surface_takes_configured_canvas_size() {
        let (controller, _) = build_controller();
        assert_eq!(*controller.session().surface(), Viewport::new(800, 600));
    }

    #[test]
    fn color_scheme_change_before_any_request_does_nothing() {
        let (mut controller, engine) = build_controller();
        assert_eq!(
            controller.on_color_scheme_changed(true),
            RefreshOutcome::NothingToRefresh
        );
        assert_eq!(engine.call_counts().updates, 0);
    }

    #[test]
    fn invalid_input_reports_alert_with_reason() {
        let (mut controller, _) = build_controller();
        let outcome = controller.on_input_changed(PlotParameters::default().with_y_range(1.0, 1.0));
        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        let line = controller.reporter().current().expect("status");
        assert_eq!(line.tone, StatusTone::Alert);
        assert_eq!(line.text, "Min Y must be less than Max Y.");
    }

    #[test]
    fn request_while_busy_is_queued_without_engine_calls() {
        let (mut controller, engine) = build_controller();
        let _running = controller
            .coalescer
            .request(PlotParameters::default())
            .expect("ticket");

        let outcome = controller.on_input_changed(PlotParameters::new("x"));

        assert_eq!(outcome, RefreshOutcome::Queued);
        assert_eq!(engine.call_counts().updates, 0);
        assert_eq!(
            controller.last_requested().map(|p| p.expression.as_str()),
            Some("x")
        );
    }

    #[test]
    fn superseded_render_is_discarded_and_never_becomes_current() {
        let (mut controller, engine) = build_controller();
        let running = controller
            .coalescer
            .request(PlotParameters::default())
            .expect("ticket");
        controller.on_input_changed(PlotParameters::new("x"));

        let (outcome, next) = controller.settle_ticket(&running);
        assert_eq!(outcome, RefreshOutcome::Discarded);
        assert_eq!(engine.call_counts().updates, 1);
        assert!(controller.current_result().is_none());
        assert!(controller.area_readout().is_none());

        engine.fail_updates(Some("context lost"));
        let next = next.expect("queued request runs next");
        assert_eq!(next.params().expression, "x");
        let outcome = controller.drive(next);

        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert!(controller.current_result().is_none());
        assert!(controller.session().rendered_parameters().is_none());
        let line = controller.reporter().current().expect("status");
        assert_eq!(line.text, "Rendering failed.");
    }
}
