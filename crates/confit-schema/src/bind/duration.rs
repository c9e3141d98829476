//! Duration literals and suffixed-key composition.
//!
//! A duration field accepts either one literal (`timeout = "30s"`) or a
//! family of suffixed sibling keys that are summed (`delete-after-days = 1`,
//! `delete-after-hours = 2`). The suffix family is fixed; unknown
//! suffixes are ordinary unknown keys.

use std::time::Duration;

use confit_value::{Node, Scalar};

use crate::bind::Bind;
use crate::bind::context::BindContext;
use crate::bind::error::{BindErrorKind, Recorded};
use crate::schema::Shape;

/// Key suffixes recognized on duration fields, with their length in
/// seconds. Longest units first so rendered literals prefer them.
pub(crate) const UNITS: [(&str, f64); 7] = [
    ("weeks", 604_800.0),
    ("days", 86_400.0),
    ("hours", 3_600.0),
    ("minutes", 60.0),
    ("seconds", 1.0),
    ("milliseconds", 1e-3),
    ("microseconds", 1e-6),
];

impl Bind for Duration {
    fn shape() -> Shape {
        Shape::Duration
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::Duration(value)) => Ok(*value),
            Node::Scalar(Scalar::String(text)) => {
                parse_duration(text).map_err(|reason| cx.fail(BindErrorKind::InvalidValue { reason }))
            }
            other => Err(cx.mismatch(r#"duration (e.g. "30s", "26h")"#, other)),
        }
    }
}

/// Parses a literal like `30s`, `26h`, `1.5d`, or `500ms`. A bare
/// number counts as seconds.
pub(crate) fn parse_duration(text: &str) -> Result<Duration, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty duration string".to_owned());
    }
    // Two-letter suffixes shadow `s`, so they are tried first.
    let (number, scale) = if let Some(rest) = trimmed.strip_suffix("ms") {
        (rest, 1e-3)
    } else if let Some(rest) = trimmed.strip_suffix("us") {
        (rest, 1e-6)
    } else if let Some(rest) = trimmed.strip_suffix('w') {
        (rest, 604_800.0)
    } else if let Some(rest) = trimmed.strip_suffix('d') {
        (rest, 86_400.0)
    } else if let Some(rest) = trimmed.strip_suffix('h') {
        (rest, 3_600.0)
    } else if let Some(rest) = trimmed.strip_suffix('m') {
        (rest, 60.0)
    } else if let Some(rest) = trimmed.strip_suffix('s') {
        (rest, 1.0)
    } else {
        (trimmed, 1.0)
    };
    let magnitude: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("`{text}` is not a duration"))?;
    from_seconds(magnitude * scale)
        .ok_or_else(|| format!("`{text}` is not a representable, non-negative duration"))
}

/// Renders a duration as the shortest single-unit literal that is exact.
pub(crate) fn format_duration(value: Duration) -> String {
    let secs = value.as_secs();
    let nanos = value.subsec_nanos();
    if secs == 0 && nanos == 0 {
        return "0s".to_owned();
    }
    if nanos == 0 {
        return if secs % 604_800 == 0 {
            format!("{}w", secs / 604_800)
        } else if secs % 86_400 == 0 {
            format!("{}d", secs / 86_400)
        } else if secs % 3_600 == 0 {
            format!("{}h", secs / 3_600)
        } else if secs % 60 == 0 {
            format!("{}m", secs / 60)
        } else {
            format!("{secs}s")
        };
    }
    if nanos % 1_000_000 == 0
        && let Some(millis) = secs
            .checked_mul(1_000)
            .and_then(|whole| whole.checked_add(u64::from(nanos) / 1_000_000))
    {
        return format!("{millis}ms");
    }
    if nanos % 1_000 == 0
        && let Some(micros) = secs
            .checked_mul(1_000_000)
            .and_then(|whole| whole.checked_add(u64::from(nanos) / 1_000))
    {
        return format!("{micros}us");
    }
    format!("{}s", value.as_secs_f64())
}

/// Sums suffixed sibling keys into one duration. Every component is
/// checked even after one fails.
pub(crate) fn compose(
    parts: &[(String, f64, Node)],
    cx: &BindContext<'_>,
) -> Result<Duration, Recorded> {
    let mut seconds = 0.0;
    let mut failed = false;
    for (key, scale, node) in parts {
        cx.push_key(key);
        match component(node, cx) {
            Ok(value) => seconds += value * scale,
            Err(Recorded) => failed = true,
        }
        cx.pop();
    }
    if failed {
        return Err(Recorded);
    }
    from_seconds(seconds).ok_or_else(|| {
        cx.fail(BindErrorKind::InvalidValue {
            reason: format!("components sum to an unrepresentable duration ({seconds} seconds)"),
        })
    })
}

fn component(node: &Node, cx: &BindContext<'_>) -> Result<f64, Recorded> {
    let value = match node {
        Node::Scalar(Scalar::Integer(value)) => *value as f64,
        Node::Scalar(Scalar::Float(value)) => *value,
        other => return Err(cx.mismatch("integer or float", other)),
    };
    if value < 0.0 {
        return Err(cx.fail(BindErrorKind::InvalidValue {
            reason: "duration components cannot be negative".to_owned(),
        }));
    }
    Ok(value)
}

fn from_seconds(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds).ok()
}
