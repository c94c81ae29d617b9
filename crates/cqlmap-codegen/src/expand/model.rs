use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let cqlmap = &self.cqlmap;
        let model_ident = &self.model.ident;
        let model_name = model_ident.to_string();
        let field_defs = self.expand_field_defs();

        quote! {
            impl #cqlmap::Model for #model_ident {
                const NAME: &'static str = #model_name;

                fn fields() -> &'static [#cqlmap::FieldDef] {
                    const FIELDS: &[#cqlmap::FieldDef] = &[
                        #( #field_defs, )*
                    ];
                    FIELDS
                }
            }
        }
    }

    fn expand_field_defs(&self) -> impl Iterator<Item = TokenStream> + '_ {
        let cqlmap = &self.cqlmap;

        self.model.fields.iter().map(move |field| {
            let name = field.name();
            let source_ty = &field.source_ty;
            let tag = match &field.tag {
                Some(tag) => quote!(Some(#tag)),
                None => quote!(None),
            };

            quote!(#cqlmap::FieldDef::new(#name, #tag, #source_ty))
        })
    }
}
