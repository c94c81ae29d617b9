use proc_macro2::{Literal, TokenStream};
use quote::ToTokens;

/// Renders `v` as an unsuffixed integer literal, so it matches `usize`
/// patterns.
pub(crate) fn int(v: usize) -> TokenStream {
    Literal::usize_unsuffixed(v).into_token_stream()
}
