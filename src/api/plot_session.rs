use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::PlotParameters;
use crate::error::RefreshError;
use crate::render::{EngineInstance, PlotEngine, RenderResult};

use super::parameter_model::render_request;

/// Lifecycle state of a `PlotSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No engine instance exists yet.
    Uninitialized,
    /// One engine instance is bound to the session.
    Active,
}

/// Counters kept across the session's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub refreshes: u64,
    pub constructs: u64,
    pub updates: u64,
    pub failures: u64,
}

struct ActiveSession<I> {
    instance: I,
    current: Option<RenderResult>,
    rendered: Option<PlotParameters>,
}

/// Owns the engine, its single instance and the last good render.
///
/// The instance is built on the first valid refresh and then only updated.
/// A refresh never leaves the session half-updated: the current result is
/// replaced in one assignment, and only after the engine succeeded.
pub struct PlotSession<E: PlotEngine> {
    engine: E,
    surface: E::Surface,
    dark_mode: bool,
    active: Option<ActiveSession<E::Instance>>,
    stats: SessionStats,
}

impl<E: PlotEngine> PlotSession<E> {
    #[must_use]
    pub fn new(engine: E, surface: E::Surface) -> Self {
        Self {
            engine,
            surface,
            dark_mode: false,
            active: None,
            stats: SessionStats::default(),
        }
    }

    /// Validates, prechecks and renders `params`, then makes the result current.
    ///
    /// Must not be called again while a previous call is still running.
    pub fn refresh(&mut self, params: &PlotParameters) -> Result<RenderResult, RefreshError> {
        let result = self.render(params)?;
        self.commit(params, result.clone());
        Ok(result)
    }

    /// Same pipeline as `refresh`, but leaves the current result alone.
    ///
    /// Used when the caller only knows after the update whether the result is
    /// still wanted; it then hands it to `commit`.
    pub fn render(&mut self, params: &PlotParameters) -> Result<RenderResult, RefreshError> {
        self.stats.refreshes += 1;
        let outcome = self.run_render(params);
        match &outcome {
            Ok(result) => debug!(
                expression = %params.expression,
                area = result.estimated_area(),
                "plot rendered"
            ),
            Err(err) => {
                self.stats.failures += 1;
                warn!(expression = %params.expression, error = %err, "plot refresh failed");
            }
        }
        outcome
    }

    /// Makes `result` the current render. Ignored once the session is torn down.
    pub fn commit(&mut self, params: &PlotParameters, result: RenderResult) {
        if let Some(active) = self.active.as_mut() {
            active.current = Some(result);
            active.rendered = Some(params.clone());
        }
    }

    fn run_render(&mut self, params: &PlotParameters) -> Result<RenderResult, RefreshError> {
        let request =
            render_request(params, self.dark_mode).map_err(RefreshError::InvalidParameters)?;

        let active = match self.active.as_mut() {
            Some(active) => active,
            None => {
                let instance = self
                    .engine
                    .construct(&request)
                    .map_err(RefreshError::ConstructionFailed)?;
                self.stats.constructs += 1;
                self.active.insert(ActiveSession {
                    instance,
                    current: None,
                    rendered: None,
                })
            }
        };

        if let Some(diagnostic) = self
            .engine
            .precheck_expression(request.expression())
            .filter(|message| !message.is_empty())
        {
            return Err(RefreshError::ExpressionRejected(diagnostic));
        }

        self.stats.updates += 1;
        active
            .instance
            .update(&self.surface, &request)
            .map_err(RefreshError::RenderFailed)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Active
        } else {
            SessionState::Uninitialized
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Result of the last committed render.
    #[must_use]
    pub fn current_result(&self) -> Option<&RenderResult> {
        self.active.as_ref()?.current.as_ref()
    }

    /// Parameters of the last committed render.
    #[must_use]
    pub fn rendered_parameters(&self) -> Option<&PlotParameters> {
        self.active.as_ref()?.rendered.as_ref()
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Takes effect on the next refresh.
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub fn surface(&self) -> &E::Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut E::Surface {
        &mut self.surface
    }

    /// Drops the engine instance and the last result.
    ///
    /// The next valid refresh constructs a fresh instance.
    pub fn teardown(&mut self) {
        if self.active.take().is_some() {
            debug!("plot session torn down");
        }
    }
}
