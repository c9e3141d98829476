use darling::FromDeriveInput;
use syn::Path;

use super::RenameAll;

/// `#[confit(..)]` attributes on the deriving type itself.
#[derive(Debug, Default, FromDeriveInput)]
#[darling(attributes(confit), default)]
pub struct ContainerAttrs {
    /// Crate the generated code resolves its paths through.
    #[darling(rename = "crate")]
    pub crate_path: Option<Path>,
    /// Key style applied to every field or variant without an explicit
    /// `rename`.
    pub rename_all: Option<RenameAll>,
}
