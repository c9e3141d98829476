use convert_case::{Case, Casing as _};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident};

use crate::attrs::ContainerAttrs;

/// Everything the generators need about the deriving type.
pub struct MacroContext {
    pub attrs: ContainerAttrs,
    pub input: DeriveInput,
}

impl MacroContext {
    pub fn new(attrs: ContainerAttrs, input: DeriveInput) -> Self {
        MacroContext { attrs, input }
    }

    pub fn ident(&self) -> &Ident {
        &self.input.ident
    }

    /// Path the generated code links against, `::confit` unless the
    /// container says otherwise.
    pub fn root(&self) -> TokenStream {
        match &self.attrs.crate_path {
            Some(path) => quote!(#path),
            None => quote!(::confit),
        }
    }

    /// External spelling of a field or variant name. Kebab-case unless
    /// the container carries a `rename_all`.
    pub fn apply_rename(&self, name: &str) -> String {
        match self.attrs.rename_all {
            Some(rename_all) => name.to_case(rename_all.to_case()),
            None => name.to_case(Case::Kebab),
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use crate::create_context;

    #[test]
    fn keys_default_to_kebab_case() {
        let context = create_context(parse_quote! {
            struct Sample;
        })
        .unwrap();
        assert_eq!(context.apply_rename("database_url"), "database-url");
        assert_eq!(context.apply_rename("DeleteAfter"), "delete-after");
    }

    #[test]
    fn rename_all_overrides_the_default() {
        let context = create_context(parse_quote! {
            #[confit(rename_all = "camelCase")]
            struct Sample;
        })
        .unwrap();
        assert_eq!(context.apply_rename("database_url"), "databaseUrl");
    }

    #[test]
    fn crate_path_defaults_to_the_facade() {
        let context = create_context(parse_quote! {
            struct Sample;
        })
        .unwrap();
        assert_eq!(context.root().to_string(), ":: confit");

        let context = create_context(parse_quote! {
            #[confit(crate = ::confit_schema)]
            struct Sample;
        })
        .unwrap();
        assert_eq!(context.root().to_string(), ":: confit_schema");
    }
}
