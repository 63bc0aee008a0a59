//! Procedural macros for livecfg.
//!
//! This crate provides:
//!
//! - `#[derive(ZeroValue)]` - Generates the emptiness check used by
//!   `Manager::init_data`
//!
//! Generated code refers to `::livecfg_core`, so the deriving crate must
//! depend on `livecfg-core` directly.

mod zero;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `livecfg_core::config::ZeroValue`.
///
/// For **structs**, the value is empty when every field is empty. Fields
/// marked `#[zero_value(skip)]` are ignored. A unit struct is always empty.
/// Every type parameter gets a `ZeroValue` bound.
///
/// For **enums**, exactly one unit variant must be marked `#[zero_value]`;
/// the value is empty when it is that variant.
///
/// # Example
///
/// ```rust,ignore
/// use livecfg_core::config::ZeroValue;
///
/// #[derive(Default, ZeroValue)]
/// struct Upstream {
///     url: String,
///     retries: u8,
///     #[zero_value(skip)]
///     label: &'static str,
/// }
///
/// #[derive(Default, ZeroValue)]
/// enum Compression {
///     #[default]
///     #[zero_value]
///     None,
///     Gzip,
/// }
/// ```
#[proc_macro_derive(ZeroValue, attributes(zero_value))]
pub fn derive_zero_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match zero::derive_zero_value(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
