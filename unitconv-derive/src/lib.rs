//! Derive macro implementation used by `unitconv-core`.
//!
//! `unitconv-derive` is an implementation detail of this workspace. The `UnitCategory` derive expands in terms of
//! `crate::UnitCategory`, `crate::UnitsConvertible` and `crate::strategy`, so it is intended to be used by
//! `unitconv-core` only.
//!
//! # Generated impls
//!
//! For a fieldless category enum `DistanceUnits`, the derive implements:
//!
//! - `crate::UnitCategory for DistanceUnits` (category name `distance`, every case, metadata accessors)
//! - `core::fmt::Display for DistanceUnits` (formats as the abbreviation)
//! - when every variant declares an `exponent`: `crate::strategy::Base10` and a `crate::UnitsConvertible` impl that
//!   derives conversions by power-of-ten scaling
//!
//! # Attributes
//!
//! Every variant carries a required `#[unit(...)]` attribute:
//!
//! - `abbreviation = "mm"`: identifier fragment, unique within the enum
//! - `description = "millimetres"`: prose name, unique within the enum
//! - `exponent = -3`: optional power of ten relative to the category's reference unit
//!
//! The enum may carry `#[category(...)]`:
//!
//! - `highest_precision = Micrometres`: defaults to the smallest exponent, or the first variant
//! - `same_zero_point = false`: defaults to `true`

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitBool, LitInt, LitStr, Token,
};

/// Derive `crate::UnitCategory` (and, for base-10 categories, the scaling conversion) for a category enum.
#[proc_macro_derive(UnitCategory, attributes(unit, category))]
pub fn derive_unit_category(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_unit_category_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_unit_category_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let category = category_name(&name.to_string());
    let settings = parse_category_attribute(&input.attrs)?;

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "UnitCategory can only be derived for enums",
            ))
        }
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new(name.span(), "a unit category needs at least one unit"));
    }

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.ident.span(),
                "unit variants cannot carry fields",
            ));
        }
        let attr = parse_unit_attribute(&variant.ident, &variant.attrs)?;
        variants.push((variant.ident.clone(), attr));
    }

    check_unique(variants.iter().map(|(_, attr)| &attr.abbreviation), "abbreviation")?;
    check_unique(variants.iter().map(|(_, attr)| &attr.description), "description")?;

    let exponents: Vec<i32> = variants.iter().filter_map(|(_, attr)| attr.exponent).collect();
    let base10 = !exponents.is_empty();
    if base10 && exponents.len() != variants.len() {
        return Err(syn::Error::new(
            name.span(),
            "either every variant or none declares `exponent`",
        ));
    }

    let highest_precision = match settings.highest_precision {
        Some(ident) => ident,
        None => variants
            .iter()
            .min_by_key(|(_, attr)| attr.exponent.unwrap_or(0))
            .map(|(ident, _)| ident.clone())
            .unwrap_or_else(|| variants[0].0.clone()),
    };
    if !variants.iter().any(|(ident, _)| *ident == highest_precision) {
        return Err(syn::Error::new(
            highest_precision.span(),
            format!("`{}` is not a variant of `{}`", highest_precision, name),
        ));
    }

    let same_zero_point = settings.same_zero_point;
    let idents: Vec<_> = variants.iter().map(|(ident, _)| ident).collect();
    let abbreviations: Vec<_> = variants.iter().map(|(_, attr)| &attr.abbreviation).collect();
    let descriptions: Vec<_> = variants.iter().map(|(_, attr)| &attr.description).collect();

    let mut expanded = quote! {
        impl crate::UnitCategory for #name {
            const CATEGORY: &'static str = #category;
            const ALL: &'static [Self] = &[#(#name::#idents),*];
            const SAME_ZERO_POINT: bool = #same_zero_point;
            const HIGHEST_PRECISION: Self = #name::#highest_precision;

            fn abbreviation(&self) -> &'static str {
                match self {
                    #(#name::#idents => #abbreviations,)*
                }
            }

            fn description(&self) -> &'static str {
                match self {
                    #(#name::#idents => #descriptions,)*
                }
            }
        }

        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(<#name as crate::UnitCategory>::abbreviation(self))
            }
        }
    };

    if base10 {
        expanded.extend(quote! {
            impl crate::strategy::Base10 for #name {
                fn exponent(&self) -> i32 {
                    match self {
                        #(#name::#idents => #exponents,)*
                    }
                }
            }

            impl crate::UnitsConvertible for #name {
                fn conversion(&self, to: &Self) -> crate::GenerationResult<crate::Operation> {
                    crate::strategy::base10::convert(self, to)
                }
            }
        });
    }

    Ok(expanded)
}

/// `ReferenceAccelerationUnits` becomes `reference_acceleration`.
fn category_name(type_name: &str) -> String {
    let stem = type_name.strip_suffix("Units").unwrap_or(type_name);
    let mut snake = String::with_capacity(stem.len() + 4);
    for (index, ch) in stem.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}

fn check_unique<'a>(values: impl Iterator<Item = &'a LitStr>, what: &str) -> syn::Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.value()) {
            return Err(syn::Error::new(
                value.span(),
                format!("duplicate {} `{}`", what, value.value()),
            ));
        }
    }
    Ok(())
}

/// Parsed contents of the enum-level `#[category(...)]` attribute.
struct CategoryAttribute {
    highest_precision: Option<Ident>,
    same_zero_point: bool,
}

impl Parse for CategoryAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut highest_precision = None;
        let mut same_zero_point = true;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "highest_precision" => {
                    highest_precision = Some(input.parse()?);
                }
                "same_zero_point" => {
                    same_zero_point = input.parse::<LitBool>()?.value;
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute `{}`", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(CategoryAttribute {
            highest_precision,
            same_zero_point,
        })
    }
}

fn parse_category_attribute(attrs: &[Attribute]) -> syn::Result<CategoryAttribute> {
    for attr in attrs {
        if attr.path().is_ident("category") {
            return attr.parse_args::<CategoryAttribute>();
        }
    }

    Ok(CategoryAttribute {
        highest_precision: None,
        same_zero_point: true,
    })
}

/// Parsed contents of a variant's `#[unit(...)]` attribute.
struct UnitAttribute {
    abbreviation: LitStr,
    description: LitStr,
    exponent: Option<i32>,
}

impl Parse for UnitAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut abbreviation: Option<LitStr> = None;
        let mut description: Option<LitStr> = None;
        let mut exponent: Option<i32> = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "abbreviation" => {
                    abbreviation = Some(input.parse()?);
                }
                "description" => {
                    description = Some(input.parse()?);
                }
                "exponent" => {
                    let negative = input.peek(Token![-]);
                    if negative {
                        input.parse::<Token![-]>()?;
                    }
                    let magnitude: i32 = input.parse::<LitInt>()?.base10_parse()?;
                    exponent = Some(if negative { -magnitude } else { magnitude });
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute `{}`", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        let abbreviation = abbreviation.ok_or_else(|| {
            syn::Error::new(input.span(), "missing required attribute `abbreviation`")
        })?;
        let description = description.ok_or_else(|| {
            syn::Error::new(input.span(), "missing required attribute `description`")
        })?;

        Ok(UnitAttribute {
            abbreviation,
            description,
            exponent,
        })
    }
}

fn parse_unit_attribute(variant: &Ident, attrs: &[Attribute]) -> syn::Result<UnitAttribute> {
    for attr in attrs {
        if attr.path().is_ident("unit") {
            return attr.parse_args::<UnitAttribute>();
        }
    }

    Err(syn::Error::new(
        variant.span(),
        "missing #[unit(...)] attribute",
    ))
}
