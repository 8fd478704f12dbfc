//! plot-controller: interactive function-plotting controller.
//!
//! The crate sequences an injected chart engine behind a small, strictly
//! layered API: parameter validation, a construct-once session, pointer
//! readout and status reporting, plus the offline asset cache of the web
//! front end.

pub mod api;
pub mod core;
pub mod error;
pub mod offline;
pub mod render;
pub mod telemetry;

pub use api::{PlotController, PlotControllerConfig, PlotSession};
pub use error::{EngineError, PlotError, PlotResult, RefreshError};
