use plot_controller::api::{CONTROLLER_CONFIG_JSON_SCHEMA_V1, PlotControllerConfig};
use plot_controller::core::{PlotParameters, Viewport};

#[test]
fn config_json_round_trip_keeps_every_field() {
    let config = PlotControllerConfig::new(Viewport::new(1024, 768))
        .with_initial_parameters(PlotParameters::new("sin(x)").with_resolution(400))
        .with_dark_mode(true)
        .with_readout_precision(5)
        .with_canvas_width_ratio(0.5);

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {CONTROLLER_CONFIG_JSON_SCHEMA_V1}")));

    let restored = PlotControllerConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn bare_config_object_fills_defaults() {
    let config = PlotControllerConfig::from_json_str(r#"{ "dark_mode": true }"#).expect("parse");

    assert!(config.dark_mode);
    assert_eq!(config.canvas, Viewport::new(800, 600));
    assert_eq!(config.readout_precision, 3);
    assert_eq!(config.initial_parameters, PlotParameters::default());
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let input = r#"{ "schema_version": 9, "config": {} }"#;
    assert!(PlotControllerConfig::from_json_str(input).is_err());
}

#[test]
fn out_of_range_width_ratio_is_rejected() {
    let input = r#"{ "canvas_width_ratio": 1.5 }"#;
    assert!(PlotControllerConfig::from_json_str(input).is_err());
}
