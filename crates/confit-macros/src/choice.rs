//! Generates `Bind` and `ToNode` for unit enums: a closed set of string
//! values, one per variant.

use darling::FromVariant as _;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt as _;
use syn::{DataEnum, Fields};

use crate::attrs::VariantAttrs;
use crate::context::MacroContext;

pub fn derive(context: &MacroContext, data: &DataEnum) -> syn::Result<TokenStream> {
    if !context.input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &context.input.generics,
            "#[derive(Bind)] does not support generic choices",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            context.ident(),
            "#[derive(Bind)] on an enum requires at least one variant",
        ));
    }

    let mut names: Vec<String> = Vec::new();
    let mut idents = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "#[derive(Bind)] on an enum supports unit variants only",
            ));
        }
        let attrs = VariantAttrs::from_variant(variant)
            .map_err(|error| syn::Error::new(error.span(), error.to_string()))?;
        let name = match attrs.rename {
            Some(rename) => rename,
            None => context.apply_rename(&variant.ident.unraw().to_string()),
        };
        if names.contains(&name) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate choice value `{name}`"),
            ));
        }
        names.push(name);
        idents.push(&variant.ident);
    }

    let root = context.root();
    let ident = context.ident();
    let name = ident.to_string();
    let listing = names
        .iter()
        .map(|n| format!("`{n}`"))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(quote! {
        impl #root::Bind for #ident {
            fn shape() -> #root::Shape {
                #root::Shape::Choice {
                    name: #name,
                    variants: &[#(#names),*],
                }
            }

            fn coerce(
                node: &#root::Node,
                cx: &#root::BindContext<'_>,
            ) -> ::std::result::Result<Self, #root::Recorded> {
                let #root::Node::Scalar(#root::Scalar::String(text)) = node else {
                    return ::std::result::Result::Err(cx.mismatch("string", node));
                };
                match text.as_str() {
                    #(#names => ::std::result::Result::Ok(Self::#idents),)*
                    other => ::std::result::Result::Err(cx.fail(#root::BindErrorKind::InvalidValue {
                        reason: ::std::format!("`{}` is not one of {}", other, #listing),
                    })),
                }
            }
        }

        impl #root::ToNode for #ident {
            fn to_node(&self) -> #root::Node {
                #root::Node::from(match self {
                    #(Self::#idents => #names,)*
                })
            }
        }
    })
}
