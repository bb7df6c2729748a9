//! `#[derive(Command)]` implementation
//!
//! The derive walks a struct's named fields at compile time and emits an
//! `impl pinjson_core::Command` holding:
//!
//! 1. **Field table**: a `static` slice of `FieldDesc`, one entry per field
//!    in declaration order
//! 2. **Encoder**: `to_params`, mapping each field to a JSON value, with
//!    `None` left absent
//! 3. **Decoder**: `from_params`, the inverse
//!
//! # Code Generation Example
//!
//! Input:
//! ```ignore
//! #[derive(Command)]
//! #[command(method = "getblock")]
//! struct GetBlockCmd {
//!     hash: String,
//!     #[param(default = "1")]
//!     verbosity: Option<i32>,
//! }
//! ```
//!
//! Generated output (abridged):
//! ```ignore
//! impl ::pinjson_core::Command for GetBlockCmd {
//!     const METHOD: &'static str = "getblock";
//!
//!     fn fields() -> &'static [::pinjson_core::FieldDesc] {
//!         static FIELDS: &[::pinjson_core::FieldDesc] = &[
//!             FieldDesc { name: "hash", type_name: "String", optional: false, .. },
//!             FieldDesc { name: "verbosity", type_name: "i32", optional: true, default: Some("1"), .. },
//!         ];
//!         FIELDS
//!     }
//!
//!     fn to_params(&self) -> Result<Vec<Option<Value>>> {
//!         Ok(vec![encode_field(&self.hash, 0, ..)?, encode_optional(&self.verbosity, 1, ..)?])
//!     }
//!     // from_params ...
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, Fields, GenericArgument, Lit,
    LitStr, Meta, PathArguments, Type,
};

const WALLET_ONLY: u32 = 1;
const WEBSOCKET_ONLY: u32 = 2;
const NOTIFICATION: u32 = 4;

struct CommandAttrs {
    method: Option<LitStr>,
    flags: u32,
}

#[derive(Default)]
struct ParamAttrs {
    default: Option<LitStr>,
    usage: Option<LitStr>,
}

pub fn derive_command_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Command cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Command fields must be named; tuple structs are not supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Command can only be derived for structs",
            ))
        }
    };

    let attrs = parse_command_attrs(&input.attrs)?;
    let method = attrs.method.ok_or_else(|| {
        syn::Error::new_spanned(&input.ident, "missing #[command(method = \"...\")]")
    })?;
    let flags = attrs.flags;
    let description = option_tokens(doc_text(&input.attrs));

    let mut descs = Vec::with_capacity(fields.len());
    let mut encoders = Vec::with_capacity(fields.len());
    let mut decoders = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "Command fields must be named"))?;
        let name = ident.to_string().trim_start_matches("r#").to_string();
        let params = parse_param_attrs(&field.attrs)?;

        let inner = option_inner(&field.ty);
        let optional = inner.is_some();
        let value_ty = inner.unwrap_or(&field.ty);
        let type_name = quote!(#value_ty).to_string().replace(' ', "");
        let kind = field_kind(value_ty);
        let default = option_tokens(params.default.map(|lit| lit.value()));
        let usage = option_tokens(params.usage.map(|lit| lit.value()));
        let field_description = option_tokens(doc_text(&field.attrs));

        descs.push(quote! {
            ::pinjson_core::FieldDesc {
                name: #name,
                type_name: #type_name,
                kind: #kind,
                optional: #optional,
                default: #default,
                usage: #usage,
                description: #field_description,
                accepts: ::pinjson_core::accepts::<#value_ty>,
            }
        });

        if optional {
            encoders.push(quote! {
                ::pinjson_core::__private::encode_optional(&self.#ident, #index, &fields[#index])?
            });
            decoders.push(quote! {
                #ident: ::pinjson_core::__private::decode_optional(params.next().flatten(), #index, &fields[#index])?
            });
        } else {
            encoders.push(quote! {
                ::pinjson_core::__private::encode_field(&self.#ident, #index, &fields[#index])?
            });
            decoders.push(quote! {
                #ident: ::pinjson_core::__private::decode_required(params.next().flatten(), #index, &fields[#index])?
            });
        }
    }

    let ident = &input.ident;
    let construct = if matches!(&input.data, Data::Struct(d) if matches!(d.fields, Fields::Unit)) {
        quote! { Self }
    } else {
        quote! { Self { #(#decoders,)* } }
    };

    Ok(quote! {
        impl ::pinjson_core::Command for #ident {
            const METHOD: &'static str = #method;
            const FLAGS: ::pinjson_core::UsageFlag = ::pinjson_core::UsageFlag::from_bits(#flags);
            const DESCRIPTION: ::core::option::Option<&'static str> = #description;

            fn fields() -> &'static [::pinjson_core::FieldDesc] {
                static FIELDS: &[::pinjson_core::FieldDesc] = &[#(#descs),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn to_params(
                &self,
            ) -> ::pinjson_core::Result<::std::vec::Vec<::core::option::Option<::pinjson_core::__private::Value>>> {
                let fields = <Self as ::pinjson_core::Command>::fields();
                ::core::result::Result::Ok(::std::vec![#(#encoders),*])
            }

            #[allow(unused_variables, unused_mut)]
            fn from_params(
                params: ::std::vec::Vec<::core::option::Option<::pinjson_core::__private::Value>>,
            ) -> ::pinjson_core::Result<Self> {
                let fields = <Self as ::pinjson_core::Command>::fields();
                let mut params = params.into_iter();
                ::core::result::Result::Ok(#construct)
            }
        }
    })
}

fn parse_command_attrs(attrs: &[Attribute]) -> syn::Result<CommandAttrs> {
    let mut out = CommandAttrs {
        method: None,
        flags: 0,
    };
    for attr in attrs.iter().filter(|a| a.path().is_ident("command")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("method") {
                out.method = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("wallet_only") {
                out.flags |= WALLET_ONLY;
            } else if meta.path.is_ident("websocket_only") {
                out.flags |= WEBSOCKET_ONLY;
            } else if meta.path.is_ident("notification") {
                out.flags |= NOTIFICATION;
            } else {
                return Err(meta.error("unknown command attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn parse_param_attrs(attrs: &[Attribute]) -> syn::Result<ParamAttrs> {
    let mut out = ParamAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("param")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                out.default = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("usage") {
                out.usage = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("unknown param attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// Joined `///` lines, or `None` when there are none
fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

fn option_tokens(value: Option<String>) -> TokenStream2 {
    match value {
        Some(text) => quote! { ::core::option::Option::Some(#text) },
        None => quote! { ::core::option::Option::None },
    }
}

/// `T` when `ty` is `Option<T>`
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first()? {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn field_kind(ty: &Type) -> TokenStream2 {
    match ty {
        Type::Reference(r) => field_kind(&r.elem),
        Type::Array(a) => array_kind(&a.elem),
        Type::Slice(s) => array_kind(&s.elem),
        Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return quote! { ::pinjson_core::FieldKind::Object };
            };
            match segment.ident.to_string().as_str() {
                "String" | "str" => quote! { ::pinjson_core::FieldKind::String },
                "bool" => quote! { ::pinjson_core::FieldKind::Boolean },
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
                | "u128" | "usize" | "f32" | "f64" => quote! { ::pinjson_core::FieldKind::Numeric },
                "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => match &segment.arguments {
                    PathArguments::AngleBracketed(args) => match args.args.first() {
                        Some(GenericArgument::Type(elem)) => array_kind(elem),
                        _ => quote! { ::pinjson_core::FieldKind::Object },
                    },
                    _ => quote! { ::pinjson_core::FieldKind::Object },
                },
                _ => quote! { ::pinjson_core::FieldKind::Object },
            }
        }
        _ => quote! { ::pinjson_core::FieldKind::Object },
    }
}

fn array_kind(elem: &Type) -> TokenStream2 {
    let elem = field_kind(elem);
    quote! { ::pinjson_core::FieldKind::Array(&#elem) }
}
