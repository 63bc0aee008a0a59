//! `#[derive(ZeroValue)]` implementation.
//!
//! # Field-level attributes `#[zero_value(...)]`
//!
//! | Key | Description |
//! |-----|-------------|
//! | `skip` | Field does not take part in the emptiness check |
//!
//! # Variant-level attribute `#[zero_value]`
//!
//! Marks the unit variant that counts as empty. Exactly one is required.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Fields, Ident, Index, Meta, parse_quote,
    spanned::Spanned,
};

const ATTR: &str = "zero_value";

// ============================================================================
// Entry point
// ============================================================================

pub fn derive_zero_value(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let body = match &input.data {
        Data::Struct(data) => struct_body(&data.fields)?,
        Data::Enum(data) => enum_body(name, data)?,
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "ZeroValue cannot be derived for unions",
            ));
        }
    };

    let mut generics = input.generics.clone();
    if matches!(input.data, Data::Struct(_)) {
        for param in generics.type_params_mut() {
            param
                .bounds
                .push(parse_quote!(::livecfg_core::config::ZeroValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::livecfg_core::config::ZeroValue for #name #ty_generics #where_clause {
            fn is_zero(&self) -> bool {
                #body
            }
        }
    })
}

// ============================================================================
// Structs
// ============================================================================

fn struct_body(fields: &Fields) -> syn::Result<TokenStream> {
    let mut checks = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        if is_skipped(&field.attrs)? {
            continue;
        }
        let access = match &field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = Index::from(index);
                quote! { self.#index }
            }
        };
        checks.push(quote! {
            ::livecfg_core::config::ZeroValue::is_zero(&#access)
        });
    }

    Ok(quote! { true #(&& #checks)* })
}

fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;

    for attr in attrs {
        if !attr.path().is_ident(ATTR) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported zero_value field option, expected `skip`"))
            }
        })?;
    }

    Ok(skip)
}

// ============================================================================
// Enums
// ============================================================================

fn enum_body(name: &Ident, data: &DataEnum) -> syn::Result<TokenStream> {
    let mut marked: Option<&Ident> = None;

    for variant in &data.variants {
        let Some(attr) = variant.attrs.iter().find(|a| a.path().is_ident(ATTR)) else {
            continue;
        };
        if !matches!(attr.meta, Meta::Path(_)) {
            return Err(syn::Error::new(
                attr.span(),
                "variant marker takes no arguments, write `#[zero_value]`",
            ));
        }
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "only a unit variant can be marked `#[zero_value]`",
            ));
        }
        if marked.is_some() {
            return Err(syn::Error::new(
                variant.span(),
                "only one variant can be marked `#[zero_value]`",
            ));
        }
        marked = Some(&variant.ident);
    }

    let variant = marked.ok_or_else(|| {
        syn::Error::new(
            Span::call_site(),
            format!("ZeroValue on enum `{name}` requires one unit variant marked `#[zero_value]`"),
        )
    })?;

    Ok(quote! { ::core::matches!(self, Self::#variant) })
}
