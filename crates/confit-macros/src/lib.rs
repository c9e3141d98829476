//! Derive support for confit records.
//!
//! `#[derive(Bind)]` on a struct with named fields generates the
//! `Record`, `Bind`, and `ToNode` implementations that drive binding and
//! template rendering. On an enum of unit variants it generates a
//! string-selected choice. Attributes live under `#[confit(..)]`:
//!
//! - `#[confit(crate = ..)]` points generated code at a re-exporting
//!   crate (the default is `::confit`)
//! - `#[confit(rename_all = "..")]` changes the container-wide key style
//! - `#[confit(rename = "..")]` pins one field or variant
//! - `#[confit(default)]` / `#[confit(default = "path")]` supply a
//!   fallback for an absent key

use darling::FromDeriveInput as _;
use syn::parse_macro_input;

use crate::attrs::ContainerAttrs;
use crate::context::MacroContext;

mod attrs;
mod choice;
mod context;
mod record;

#[proc_macro_derive(Bind, attributes(confit))]
pub fn bind_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    expand(input).into()
}

fn expand(input: syn::DeriveInput) -> proc_macro2::TokenStream {
    try_expand(input).unwrap_or_else(syn::Error::into_compile_error)
}

fn try_expand(input: syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let context = create_context(input)?;
    match &context.input.data {
        syn::Data::Struct(data) => record::derive(&context, data),
        syn::Data::Enum(data) => choice::derive(&context, data),
        syn::Data::Union(_) => Err(syn::Error::new_spanned(
            context.ident(),
            "#[derive(Bind)] does not support unions",
        )),
    }
}

fn create_context(input: syn::DeriveInput) -> syn::Result<MacroContext> {
    let attrs = ContainerAttrs::from_derive_input(&input)
        .map_err(|error| syn::Error::new(error.span(), error.to_string()))?;
    Ok(MacroContext::new(attrs, input))
}
