use thiserror::Error;

/// Declaration-time schema failure.
///
/// Schemas are developer mistakes, not user input problems, so these
/// abort resolution immediately instead of being aggregated the way
/// [`BindError`](crate::bind::BindError)s are.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("record `{record}` declares external key `{key}` more than once")]
    DuplicateKey {
        record: &'static str,
        key: &'static str,
    },

    #[error(
        "record `{record}`: duration field `{field}` also answers to `{collides}`, \
         which collides with a declared field"
    )]
    SuffixOverlap {
        record: &'static str,
        field: &'static str,
        collides: String,
    },

    #[error("cyclic record nesting: {}", cycle.join(" -> "))]
    CyclicRecord { cycle: Vec<&'static str> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_display_joins_record_names() {
        let err = SchemaError::CyclicRecord {
            cycle: vec!["Outer", "Inner", "Outer"],
        };
        assert_eq!(
            err.to_string(),
            "cyclic record nesting: Outer -> Inner -> Outer"
        );
    }
}
