use confit::{Bind, Binder, Error};
use indoc::indoc;

#[derive(Debug, PartialEq, Bind)]
#[confit(rename_all = "snake_case")]
struct Exporter {
    flush_interval: i64,
    #[confit(rename = "endpoint")]
    collector_endpoint: String,
}

#[test]
fn container_style_and_field_rename_both_apply() {
    let binder = Binder::<Exporter>::new().unwrap();
    let config = binder
        .parse(indoc! {r#"
            flush_interval = 30
            endpoint = "https://otel.internal"
        "#})
        .unwrap();
    assert_eq!(
        config,
        Exporter {
            flush_interval: 30,
            collector_endpoint: "https://otel.internal".to_string(),
        }
    );
}

#[test]
fn the_renamed_field_rejects_its_styled_spelling() {
    let binder = Binder::<Exporter>::new().unwrap();
    let error = binder
        .parse(indoc! {r#"
            flush_interval = 30
            collector_endpoint = "https://otel.internal"
        "#})
        .unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "endpoint: missing required key `endpoint`",
            "collector_endpoint: unknown key `collector_endpoint`",
        ]
    );
}

#[derive(Debug, PartialEq, Bind)]
struct Camera {
    /// Frames per second while recording.
    frame_rate: u32,
}

#[test]
fn kebab_case_is_the_unconfigured_style() {
    let binder = Binder::<Camera>::new().unwrap();
    let config = binder.parse("frame-rate = 60").unwrap();
    assert_eq!(config, Camera { frame_rate: 60 });
}
