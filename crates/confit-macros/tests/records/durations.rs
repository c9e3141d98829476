use std::time::Duration;

use confit::{Bind, Binder, Error};
use indoc::indoc;

#[derive(Debug, PartialEq, Bind)]
struct Retention {
    /// How long finished runs stay queryable.
    delete_after: Duration,
    #[confit(default = "default_sweep")]
    sweep_every: Duration,
}

fn default_sweep() -> Duration {
    Duration::from_secs(300)
}

fn bind(source: &str) -> Result<Retention, Error> {
    Binder::<Retention>::new().unwrap().parse(source)
}

#[test]
fn suffixed_string_literals_parse() {
    let config = bind(r#"delete-after = "26h""#).unwrap();
    assert_eq!(config.delete_after, Duration::from_secs(26 * 3_600));
    assert_eq!(config.sweep_every, Duration::from_secs(300));
}

#[test]
fn suffixed_sibling_keys_compose_by_summing() {
    let config = bind(indoc! {"
        delete-after-days = 1
        delete-after-hours = 2
    "})
    .unwrap();
    assert_eq!(config.delete_after, Duration::from_secs(93_600));
}

#[test]
fn a_literal_and_suffixed_keys_together_are_one_error() {
    let error = bind(indoc! {r#"
        delete-after = "1d"
        delete-after-hours = 2
    "#})
    .unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        ["delete-after: invalid value: `delete-after` is given both as a literal and as suffixed keys"]
    );
}

#[test]
fn every_bad_component_is_reported() {
    let error = bind(indoc! {r#"
        delete-after-days = "one"
        delete-after-hours = -2
    "#})
    .unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "delete-after-days: expected integer or float, found string",
            "delete-after-hours: invalid value: duration components cannot be negative",
        ]
    );
}
