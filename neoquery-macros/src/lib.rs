//! Procedural macros for neoquery.
//!
//! This crate is not meant to be used directly. Use the [`neoquery`] facade
//! crate which re-exports all macros.

extern crate proc_macro;

use proc_macro::TokenStream;

mod properties;

/// Derive [`Properties`](neoquery_core::traits::Properties) and
/// `From<T> for Arg` for a struct.
///
/// Each field becomes a node property, in declaration order, so the struct
/// can be passed straight to `create`, `merge` or `match_`.
///
/// # Attributes
///
/// **Struct-level:**
/// - `#[neoquery(label = "...")]` nests the properties under that label.
///   Without it the struct converts to a flat property map.
///
/// **Field-level:**
/// - `#[neoquery(prop = "...")]` overrides the property name (default: field name).
/// - `#[neoquery(skip)]` leaves the field out.
///
/// # Example
///
/// ```rust,ignore
/// use neoquery::prelude::*;
///
/// #[derive(Properties)]
/// #[neoquery(label = "Person")]
/// struct Person {
///     #[neoquery(skip)]
///     cache_key: u64,
///     name: String,
///     #[neoquery(prop = "years")]
///     age: i64,
/// }
///
/// // CREATE (p:`Person` {name: $p_Person_name, years: $p_Person_years})
/// let q = Query::new().create(map! { "p" => person })?;
/// ```
#[proc_macro_derive(Properties, attributes(neoquery))]
pub fn properties(input: TokenStream) -> TokenStream {
    properties::expand(input)
}
