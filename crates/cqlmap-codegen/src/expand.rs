mod model;
mod record;
mod util;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for cqlmap types
    cqlmap: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_impl = self.expand_model_impl();
        let record_impl = self.expand_record_impl();

        wrap_in_const(quote! {
            #model_impl
            #record_impl
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        cqlmap: quote!(_cqlmap::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use cqlmap as _cqlmap;
            #code
        };
    }
}
