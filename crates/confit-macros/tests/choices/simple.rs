use confit::{Bind, Binder, Error};

#[derive(Debug, PartialEq, Bind)]
enum Format {
    Json,
    PlainText,
}

#[derive(Debug, PartialEq, Bind)]
struct Output {
    format: Format,
}

fn bind(source: &str) -> Result<Output, Error> {
    Binder::<Output>::new().unwrap().parse(source)
}

#[test]
fn variants_bind_from_their_kebab_names() {
    assert_eq!(
        bind(r#"format = "json""#).unwrap(),
        Output {
            format: Format::Json,
        }
    );
    assert_eq!(
        bind(r#"format = "plain-text""#).unwrap(),
        Output {
            format: Format::PlainText,
        }
    );
}

#[test]
fn unknown_values_list_the_choices() {
    let error = bind(r#"format = "xml""#).unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        ["format: invalid value: `xml` is not one of `json`, `plain-text`"]
    );
}

#[test]
fn non_string_values_are_a_type_mismatch() {
    let error = bind("format = 3").unwrap_err();
    let Error::Bind(report) = error else {
        panic!("expected a bind failure, got {error}");
    };
    let messages: Vec<_> = report.errors().iter().map(ToString::to_string).collect();
    assert_eq!(messages, ["format: expected string, found integer"]);
}
