use darling::FromField;

use super::DefaultValue;

/// `#[confit(..)]` attributes on a single named field.
#[derive(Debug, Default, FromField)]
#[darling(attributes(confit), default)]
pub struct FieldAttrs {
    /// Fallback for an absent key.
    ///
    /// `#[confit(default)]` takes `Default::default()`;
    /// `#[confit(default = "path::to::fn")]` calls the named function.
    pub default: DefaultValue,
    /// Exact external key, bypassing the container's key style.
    pub rename: Option<String>,
}
