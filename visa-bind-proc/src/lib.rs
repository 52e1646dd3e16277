//! Procedural macros used by `visa-bind`.
//!
//! [`rusty_ident!`] rewrites VISA constant names such as `VI_ERROR_TMO` into
//! Rust style identifiers (`ErrorTmo`) inside the macro invocations it wraps.

use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

mod rusty_ident;

use rusty_ident::RustyIdent;

/// Renames every `VI_*` identifier inside the wrapped macro invocations.
///
/// An optional `prefix = "VI_ASRL_PAR_";` header strips a longer prefix first,
/// so `VI_ASRL_PAR_NONE` becomes `None` instead of `AsrlParNone`. Identifiers
/// that would start with a digit after stripping keep the plain `VI_` rule.
#[proc_macro]
pub fn rusty_ident(input: TokenStream) -> TokenStream {
    let macros = parse_macro_input!(input as RustyIdent);
    quote! {#macros}.into()
}
