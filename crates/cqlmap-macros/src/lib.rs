extern crate proc_macro;

use proc_macro::TokenStream;

/// Derives `cqlmap::Model` and `cqlmap::Record` for a struct with named
/// fields.
///
/// Each field may carry one `#[cql("key=value,...")]` tag. The tag is
/// compiled into a column descriptor at runtime; fields without a tag, or
/// tagged `"-"`, are not mapped.
///
/// ```ignore
/// #[derive(Debug, Default, cqlmap::Model)]
/// struct User {
///     #[cql("column_name=id,primary_key=0")]
///     id: i32,
///
///     #[cql("column_name=city,primary_key=1")]
///     city: String,
/// }
/// ```
#[proc_macro_derive(Model, attributes(cql))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    match cqlmap_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
