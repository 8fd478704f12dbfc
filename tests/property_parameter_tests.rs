use plot_controller::api::{
    InvalidParameterReason, PlotSession, ValidationOutcome, render_request, validate,
};
use plot_controller::core::{PlotParameters, Viewport};
use plot_controller::error::RefreshError;
use plot_controller::render::{EngineCallCounts, HeadlessEngine};
use proptest::prelude::*;

proptest! {
    #[test]
    fn unordered_x_bounds_are_always_rejected(
        max_x in -1_000.0f64..1_000.0,
        excess in 0.0f64..1_000.0
    ) {
        let params = PlotParameters::default().with_x_range(max_x + excess, max_x);
        prop_assert_eq!(
            validate(&params),
            ValidationOutcome::Invalid(InvalidParameterReason::MinGreaterOrEqualMaxX)
        );
    }

    #[test]
    fn negative_counts_are_rejected_without_engine_calls(
        interval_count in i64::MIN..0,
        resolution in -1_000i64..1_000
    ) {
        let engine = HeadlessEngine::new().with_function("x^2", |x| x * x);
        let mut session = PlotSession::new(engine.clone(), Viewport::new(800, 600));
        let params = PlotParameters::default()
            .with_interval_count(interval_count)
            .with_resolution(resolution);

        let err = session.refresh(&params).expect_err("negative interval count");

        prop_assert_eq!(
            err,
            RefreshError::InvalidParameters(InvalidParameterReason::NegativeIntervalCount)
        );
        prop_assert_eq!(engine.call_counts(), EngineCallCounts::default());
    }

    #[test]
    fn ordered_bounds_and_counts_render(
        min_x in -100.0f64..100.0,
        width in 0.01f64..100.0,
        interval_count in 0i64..200,
        resolution in 0i64..500
    ) {
        let engine = HeadlessEngine::new().with_function("x^2", |x| x * x);
        let mut session = PlotSession::new(engine, Viewport::new(800, 600));
        let params = PlotParameters::default()
            .with_x_range(min_x, min_x + width)
            .with_interval_count(interval_count)
            .with_resolution(resolution);

        let result = session.refresh(&params).expect("valid parameters render");
        prop_assert!(result.estimated_area() >= 0.0);
    }

    #[test]
    fn negative_resolution_is_rejected_for_any_valid_interval_count(
        resolution in i64::MIN..0,
        interval_count in 0i64..10_000
    ) {
        let params = PlotParameters::default()
            .with_interval_count(interval_count)
            .with_resolution(resolution);
        prop_assert_eq!(
            validate(&params),
            ValidationOutcome::Invalid(InvalidParameterReason::NegativeResolution)
        );
    }

    #[test]
    fn render_requests_only_carry_ordered_bounds(
        min_x in -10.0f64..10.0,
        max_x in -10.0f64..10.0,
        min_y in -10.0f64..10.0,
        max_y in -10.0f64..10.0,
        interval_count in -5i64..50,
        resolution in -5i64..50,
        dark_mode in any::<bool>()
    ) {
        let params = PlotParameters::default()
            .with_x_range(min_x, max_x)
            .with_y_range(min_y, max_y)
            .with_interval_count(interval_count)
            .with_resolution(resolution);

        match render_request(&params, dark_mode) {
            Ok(request) => {
                let (lo_x, hi_x) = request.x_range();
                let (lo_y, hi_y) = request.y_range();
                prop_assert!(lo_x < hi_x);
                prop_assert!(lo_y < hi_y);
                prop_assert_eq!(request.interval_count() as i64, interval_count);
                prop_assert_eq!(request.resolution() as i64, resolution);
                prop_assert_eq!(request.dark_mode(), dark_mode);
            }
            Err(reason) => {
                prop_assert_eq!(ValidationOutcome::Invalid(reason), validate(&params));
            }
        }
    }
}
