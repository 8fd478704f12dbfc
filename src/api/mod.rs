pub mod clock;
pub mod controller_config;
pub mod coordinate_mapper;
pub mod error_advisor;
pub mod input_coercion;
pub mod parameter_model;
pub mod plot_controller;
pub mod plot_session;
pub mod refresh_coalescer;
pub mod status_reporter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller_config::{CONTROLLER_CONFIG_JSON_SCHEMA_V1, PlotControllerConfig};
pub use coordinate_mapper::{
    CoordinateLookup, DEFAULT_READOUT_PRECISION, OUTSIDE_CHART_READOUT, PointerSample,
    format_readout, locate,
};
pub use error_advisor::{
    AdviceRule, AdvisorOutcome, ErrorAdvisor, GENERIC_SYNTAX_TIP, MessageMatcher,
    UNKNOWN_VARIABLE_TIP,
};
pub use input_coercion::{PlotInputFields, coerce_integer, coerce_real};
pub use parameter_model::{InvalidParameterReason, ValidationOutcome, render_request, validate};
pub use plot_controller::{LOADED_STATUS, PlotController, RefreshOutcome};
pub use plot_session::{PlotSession, SessionState, SessionStats};
pub use refresh_coalescer::{RefreshCoalescer, RefreshTicket, Settlement};
pub use status_reporter::{
    RecordingStatusReporter, StatusLine, StatusReporter, StatusTone, TracingStatusReporter,
};
