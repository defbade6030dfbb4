use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Error, Fields, Generics, Ident, LitStr, Result, parse_macro_input,
    parse_quote, spanned::Spanned,
};

mod parsed;

use parsed::ParsedInspect;

/// Derive `jambalaya_test::Inspect`.
///
/// Structs with named fields expose each field as a property, in declaration
/// order. Fieldless enums become enumeration literals.
///
/// ```text
/// #[derive(Inspect)]
/// #[inspect(property(total), method(summary, fallible))]
/// struct Order {
///     id: i64,
///     #[inspect(rename = "orderNumber")]
///     order_number: String,
///     #[inspect(skip)]
///     cache: Cache,
/// }
/// ```
///
/// - `property(name)` adds a computed property calling `self.name()`.
/// - `method(name)` adds an accessor only visible to scan-all prefixes.
/// - `fallible` marks a getter returning `Result<T, E>` with `E: Display`;
///   an `Err` becomes a comment line instead of an assertion.
#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn derive_inspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedInspect::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
