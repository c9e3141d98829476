use confit::{Bind, Binder, Error};
use indoc::indoc;

#[derive(Debug, PartialEq, Bind)]
struct Deployment {
    service: Service,
    /// Optional canary stage, skipped entirely when absent.
    canary: Option<Service>,
    webhooks: Vec<Webhook>,
}

#[derive(Debug, PartialEq, Bind)]
struct Service {
    image: String,
    #[confit(default = "default_replicas")]
    replicas: u32,
}

#[derive(Debug, PartialEq, Bind)]
struct Webhook {
    url: String,
    token: String,
}

fn default_replicas() -> u32 {
    1
}

#[test]
fn nested_tables_bind_as_records() {
    let binder = Binder::<Deployment>::new().unwrap();
    let config = binder
        .parse(indoc! {r#"
            [service]
            image = "registry/app:1.2"
            replicas = 3

            [[webhooks]]
            url = "https://hooks.internal/a"
            token = "secret-a"
        "#})
        .unwrap();
    assert_eq!(
        config,
        Deployment {
            service: Service {
                image: "registry/app:1.2".to_string(),
                replicas: 3,
            },
            canary: None,
            webhooks: vec![Webhook {
                url: "https://hooks.internal/a".to_string(),
                token: "secret-a".to_string(),
            }],
        }
    );
}

#[test]
fn keys_after_a_table_header_belong_to_that_table() {
    let binder = Binder::<Deployment>::new().unwrap();
    let error = binder
        .parse(indoc! {r#"
            [service]
            image = "registry/app:1.2"
            webhooks = []
        "#})
        .unwrap_err();
    // `webhooks = []` after the `[service]` header lives inside the
    // service table, so that record rejects it and the root misses it.
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "service.webhooks: unknown key `webhooks`",
            "webhooks: missing required key `webhooks`",
        ]
    );
}

#[test]
fn optional_record_none_round_trip() {
    let binder = Binder::<Deployment>::new().unwrap();
    let config = binder
        .parse(indoc! {r#"
            webhooks = []

            [service]
            image = "registry/app:1.2"
        "#})
        .unwrap();
    assert_eq!(config.canary, None);
    assert_eq!(config.service.replicas, 1);
    assert!(config.webhooks.is_empty());
}

#[test]
fn errors_carry_the_path_into_sequences_of_records() {
    let binder = Binder::<Deployment>::new().unwrap();
    let error = binder
        .parse(indoc! {r#"
            webhooks = [
                { url = "https://hooks.internal/a" },
                { url = "https://hooks.internal/b", token = 7 },
            ]

            [service]
            image = "registry/app:1.2"
        "#})
        .unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "webhooks[0].token: missing required key `token`",
            "webhooks[1].token: expected string, found integer",
        ]
    );
}

#[test]
fn unknown_keys_are_scoped_to_their_record() {
    let binder = Binder::<Deployment>::new().unwrap();
    let error = binder
        .parse(indoc! {r#"
            webhooks = []

            [service]
            image = "registry/app:1.2"
            replicsa = 2
        "#})
        .unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(messages, ["service.replicsa: unknown key `replicsa`"]);
}
