//! Procedural macros for coastal model development
//!
//! This crate provides a derive macro that turns a plain struct of `f64` fields into a
//! typed state vector for a leaf model, so that model dynamics never have to deal with
//! stringly-typed lookups.
//!
//! # Overview
//!
//! The `StateVector` derive macro generates:
//! - `generated_definitions()` returning a `VariableDefinition` per field, in declaration order
//! - An implementation of `coastal_core::state::StateVector` (`to_values` / `from_values`)
//!
//! # Example
//!
//! ```ignore
//! use coastal_core::StateVector;
//!
//! #[derive(Debug, Clone, Copy, StateVector)]
//! pub struct ClimateState {
//!     #[variable(unit = "cm", description = "Sea level rise relative to the start year")]
//!     pub sea_level: f64,
//!
//!     #[variable(name = "temperature", unit = "degC")]
//!     pub temperature_anomaly: f64,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr};

/// Metadata for a tracked quantity
struct VariableField {
    rust_name: Ident,
    variable_name: String,
    unit: String,
    description: String,
}

/// Parse a #[variable(...)] attribute using syn 2.0 API
fn parse_variable_attribute(attr: &Attribute, rust_name: &Ident) -> syn::Result<VariableField> {
    let mut name = None;
    let mut unit = None;
    let mut description = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let value: LitStr = meta.value()?.parse()?;
            name = Some(value.value());
        } else if meta.path.is_ident("unit") {
            let value: LitStr = meta.value()?.parse()?;
            unit = Some(value.value());
        } else if meta.path.is_ident("description") {
            let value: LitStr = meta.value()?.parse()?;
            description = Some(value.value());
        } else {
            return Err(meta.error("expected `name`, `unit` or `description`"));
        }
        Ok(())
    })?;

    Ok(VariableField {
        rust_name: rust_name.clone(),
        // Use rust field name if name not specified
        variable_name: name.unwrap_or_else(|| rust_name.to_string()),
        unit: unit.unwrap_or_default(),
        description: description.unwrap_or_default(),
    })
}

/// Every named field is a tracked quantity, with or without a `#[variable]` attribute
fn extract_variable_fields(fields: &Fields) -> syn::Result<Vec<VariableField>> {
    let named = match fields {
        Fields::Named(named) => named,
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "StateVector requires a struct with named fields",
            ))
        }
    };

    let mut variables = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let rust_name = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;

        match field.attrs.iter().find(|a| a.path().is_ident("variable")) {
            Some(attr) => variables.push(parse_variable_attribute(attr, &rust_name)?),
            None => variables.push(VariableField {
                variable_name: rust_name.to_string(),
                rust_name,
                unit: String::new(),
                description: String::new(),
            }),
        }
    }
    Ok(variables)
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "StateVector can only be derived for structs",
            ))
        }
    };

    let variables = extract_variable_fields(fields)?;
    let count = variables.len();

    let definitions: Vec<TokenStream2> = variables
        .iter()
        .map(|f| {
            let name = &f.variable_name;
            let unit = &f.unit;
            let description = &f.description;
            quote! {
                ::coastal_core::variable::VariableDefinition::new(#name, #unit, #description)
            }
        })
        .collect();

    let to_values: Vec<TokenStream2> = variables
        .iter()
        .map(|f| {
            let name = &f.rust_name;
            quote! { self.#name }
        })
        .collect();

    let from_values: Vec<TokenStream2> = variables
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let name = &f.rust_name;
            quote! { #name: values[#i] }
        })
        .collect();

    Ok(quote! {
        impl #struct_name {
            /// Returns the variable definitions for this state, in declaration order
            pub fn generated_definitions() -> Vec<::coastal_core::variable::VariableDefinition> {
                vec![
                    #(#definitions,)*
                ]
            }
        }

        impl ::coastal_core::state::StateVector for #struct_name {
            fn definitions() -> Vec<::coastal_core::variable::VariableDefinition> {
                Self::generated_definitions()
            }

            fn to_values(&self) -> Vec<::coastal_core::timeseries::FloatValue> {
                vec![#(#to_values,)*]
            }

            fn from_values(
                values: &[::coastal_core::timeseries::FloatValue],
            ) -> ::coastal_core::errors::CoastalResult<Self> {
                if values.len() != #count {
                    return Err(::coastal_core::errors::CoastalError::StateLength {
                        expected: #count,
                        found: values.len(),
                    });
                }
                Ok(Self {
                    #(#from_values,)*
                })
            }
        }
    })
}

/// Derive macro for typed leaf-model state
///
/// # Attributes
///
/// ## Field attributes
/// - `#[variable(name = "...", unit = "...", description = "...")]` - All keys optional.
///   `name` defaults to the field name.
///
/// All fields must be `FloatValue` (`f64`).
#[proc_macro_derive(StateVector, attributes(variable))]
pub fn derive_state_vector(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}
