//! Generates `Record`, `Bind`, and `ToNode` for structs with named
//! fields.
//!
//! The schema side declares every field once (key, shape, default, doc
//! lines); the assembly side pulls each key off the record cursor and
//! keeps going on error so one pass reports every bad field.

use darling::FromField as _;
use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::ext::IdentExt as _;
use syn::spanned::Spanned as _;
use syn::{Attribute, DataStruct, Expr, ExprLit, Fields, Lit, Meta, Type};

use crate::attrs::{DefaultValue, FieldAttrs};
use crate::context::MacroContext;

pub fn derive(context: &MacroContext, data: &DataStruct) -> syn::Result<TokenStream> {
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            context.ident(),
            "#[derive(Bind)] on a struct requires named fields",
        ));
    };
    if !context.input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &context.input.generics,
            "#[derive(Bind)] does not support generic records",
        ));
    }

    let root = context.root();
    let ident = context.ident();
    let name = ident.to_string();
    let container_doc = doc_lines(&context.input.attrs);

    let mut specs = Vec::new();
    let mut bindings = Vec::new();
    let mut constructions = Vec::new();
    let mut emits = Vec::new();

    for field in &fields.named {
        let attrs = FieldAttrs::from_field(field)
            .map_err(|error| syn::Error::new(error.span(), error.to_string()))?;
        let field_ident = field.ident.as_ref().expect("named fields have idents");
        let field_ty = &field.ty;
        let binding = format_ident!("field_{}", field_ident.unraw());
        let key = match &attrs.rename {
            Some(rename) => rename.clone(),
            None => context.apply_rename(&field_ident.unraw().to_string()),
        };
        let doc = doc_lines(&field.attrs);
        let inner = option_inner(field_ty);

        if inner.is_some() && !attrs.default.is_none() {
            return Err(syn::Error::new_spanned(
                field,
                "`default` is redundant on an `Option` field; an absent key already binds to `None`",
            ));
        }

        let span = field_ty.span();
        let shape = quote_spanned!(span=> <#field_ty as #root::Bind>::shape());
        let spec = match (&attrs.default, inner) {
            (DefaultValue::None, Some(_)) => quote! {
                #root::FieldSpec::optional(#key, #shape)
            },
            (DefaultValue::None, None) => quote! {
                #root::FieldSpec::required(#key, #shape)
            },
            (DefaultValue::Default, _) => quote_spanned! {span=>
                #root::FieldSpec::defaulted(#key, #shape, || #root::ToNode::to_node(
                    &<#field_ty as ::std::default::Default>::default(),
                ))
            },
            (DefaultValue::Path(path), _) => quote_spanned! {span=>
                #root::FieldSpec::defaulted(#key, #shape, || #root::ToNode::to_node(&#path()))
            },
        };
        specs.push(if doc.is_empty() {
            spec
        } else {
            quote! { #spec.with_doc(&[#(#doc),*]) }
        });

        bindings.push(match (&attrs.default, inner) {
            (DefaultValue::None, Some(inner)) => quote_spanned! {span=>
                let #binding = rec.optional::<#inner>(#key);
            },
            (DefaultValue::None, None) => quote_spanned! {span=>
                let #binding = rec.required::<#field_ty>(#key);
            },
            (DefaultValue::Default, _) => quote_spanned! {span=>
                let #binding = rec.defaulted(#key, <#field_ty as ::std::default::Default>::default);
            },
            (DefaultValue::Path(path), _) => quote_spanned! {span=>
                let #binding = rec.defaulted(#key, #path);
            },
        });
        constructions.push(quote! { #field_ident: #binding? });

        emits.push(match inner {
            Some(_) => quote! {
                if let ::std::option::Option::Some(value) = &self.#field_ident {
                    table.insert(#key, #root::ToNode::to_node(value));
                }
            },
            None => quote! {
                table.insert(#key, #root::ToNode::to_node(&self.#field_ident));
            },
        });
    }

    Ok(quote! {
        impl #root::Record for #ident {
            fn schema() -> ::std::result::Result<&'static #root::RecordSchema, #root::SchemaError> {
                #root::resolve::<Self>(|| {
                    #root::RecordSchema::new(
                        #name,
                        &[#(#container_doc),*],
                        ::std::vec![#(#specs),*],
                    )
                })
            }

            fn assemble(
                rec: &mut #root::RecordCursor<'_>,
            ) -> ::std::result::Result<Self, #root::Recorded> {
                #(#bindings)*
                rec.finish()?;
                ::std::result::Result::Ok(Self {
                    #(#constructions),*
                })
            }
        }

        impl #root::Bind for #ident {
            fn shape() -> #root::Shape {
                #root::Shape::Record(#root::RecordHandle::new(
                    #name,
                    ::std::any::TypeId::of::<Self>(),
                    <Self as #root::Record>::schema,
                ))
            }

            fn coerce(
                node: &#root::Node,
                cx: &#root::BindContext<'_>,
            ) -> ::std::result::Result<Self, #root::Recorded> {
                match node {
                    #root::Node::Table(table) => #root::coerce_record::<Self>(table, cx),
                    other => ::std::result::Result::Err(cx.mismatch("table", other)),
                }
            }
        }

        impl #root::ToNode for #ident {
            fn to_node(&self) -> #root::Node {
                let mut table = #root::Table::new();
                #(#emits)*
                #root::Node::Table(table)
            }
        }
    })
}

/// The `T` of `Option<T>`, if the written type is syntactically an
/// `Option`.
fn option_inner(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
        && args.args.len() == 1
        && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
    {
        Some(inner)
    } else {
        None
    }
}

/// Doc comment lines, one per `#[doc = ".."]` attribute, trimmed.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta
            && let Expr::Lit(ExprLit {
                lit: Lit::Str(text),
                ..
            }) = &meta.value
        {
            lines.push(text.value().trim().to_owned());
        }
    }
    lines
}
