use confit::{Bind, Binder, Error};
use indoc::indoc;

/// Connection settings for the primary database.
#[derive(Debug, PartialEq, Bind)]
struct Database {
    /// Connection string handed to the pool.
    database_url: String,
    #[confit(default = "default_port")]
    port: u16,
}

fn default_port() -> u16 {
    5432
}

#[test]
fn binds_with_the_default_applied() {
    let binder = Binder::<Database>::new().unwrap();
    let config = binder
        .parse(r#"database-url = "postgres://primary""#)
        .unwrap();
    assert_eq!(
        config,
        Database {
            database_url: "postgres://primary".to_string(),
            port: 5432,
        }
    );
}

#[test]
fn an_explicit_value_beats_the_default() {
    let binder = Binder::<Database>::new().unwrap();
    let config = binder
        .parse(indoc! {r#"
            database-url = "postgres://primary"
            port = 9000
        "#})
        .unwrap();
    assert_eq!(config.port, 9000);
}

#[test]
fn one_pass_reports_every_field_error() {
    let binder = Binder::<Database>::new().unwrap();
    let error = binder
        .parse(indoc! {r#"
            port = "5432"
            prot = 8080
        "#})
        .unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "database-url: missing required key `database-url`",
            "port: expected integer, found string",
            "prot: unknown key `prot`",
        ]
    );
}

#[test]
fn rust_snake_case_keys_are_not_accepted() {
    let binder = Binder::<Database>::new().unwrap();
    let error = binder
        .parse(r#"database_url = "postgres://primary""#)
        .unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "database-url: missing required key `database-url`",
            "database_url: unknown key `database_url`",
        ]
    );
}
