use darling::FromMeta;
use syn::ExprPath;

/// What `#[confit(default)]` resolved to for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DefaultValue {
    /// No default attribute; the field is required (or optional when its
    /// type is `Option<_>`).
    #[default]
    None,
    /// Bare `default`: fall back to `Default::default()`.
    Default,
    /// `default = "path"`: fall back to calling the named function.
    Path(ExprPath),
}

impl DefaultValue {
    pub fn is_none(&self) -> bool {
        matches!(self, DefaultValue::None)
    }
}

impl FromMeta for DefaultValue {
    fn from_none() -> Option<Self> {
        Some(DefaultValue::None)
    }

    fn from_word() -> darling::Result<Self> {
        Ok(DefaultValue::Default)
    }

    fn from_string(value: &str) -> darling::Result<Self> {
        let path: ExprPath = syn::parse_str(value)?;
        Ok(DefaultValue::Path(path))
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn bare_word_means_default_trait() {
        assert_eq!(DefaultValue::from_word().unwrap(), DefaultValue::Default);
    }

    #[test]
    fn string_value_parses_as_a_path() {
        let parsed = DefaultValue::from_string("timeouts::connect").unwrap();
        assert_eq!(parsed, DefaultValue::Path(parse_quote!(timeouts::connect)));
    }

    #[test]
    fn garbage_paths_are_rejected() {
        assert!(DefaultValue::from_string("not a path").is_err());
    }
}
