use darling::FromVariant;

/// `#[confit(..)]` attributes on a unit enum variant.
#[derive(Debug, Default, FromVariant)]
#[darling(attributes(confit), default)]
pub struct VariantAttrs {
    /// Exact external spelling, bypassing the container's key style.
    pub rename: Option<String>,
}
