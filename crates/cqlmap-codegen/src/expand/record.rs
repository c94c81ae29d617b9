use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// Field access by ordinal. Only mapped fields are readable and
    /// settable; the others report `field_not_settable`.
    pub(super) fn expand_record_impl(&self) -> TokenStream {
        let cqlmap = &self.cqlmap;
        let model_ident = &self.model.ident;

        let field_arms = self.model.fields.iter().filter(|f| f.is_mapped()).map(|field| {
            let index = util::int(field.index);
            let ident = &field.ident;

            quote! {
                #index => Some(#cqlmap::Primitive::to_value(&self.#ident)),
            }
        });

        let set_field_arms = self.model.fields.iter().map(|field| {
            let index = util::int(field.index);
            let ident = &field.ident;
            let ty = &field.ty;
            let name = field.name();

            if field.is_mapped() {
                quote! {
                    #index => {
                        self.#ident = <#ty as #cqlmap::Primitive>::load(value).map_err(|value| {
                            #cqlmap::Error::type_mismatch(
                                #name,
                                <#ty as #cqlmap::Primitive>::TYPE_NAME,
                                value.type_name(),
                            )
                        })?;
                    }
                }
            } else {
                quote! {
                    #index => return Err(#cqlmap::Error::field_not_settable(#name)),
                }
            }
        });

        quote! {
            impl #cqlmap::Record for #model_ident {
                fn field(&self, index: usize) -> Option<#cqlmap::Value> {
                    match index {
                        #( #field_arms )*
                        _ => None,
                    }
                }

                fn set_field(&mut self, index: usize, value: #cqlmap::Value) -> #cqlmap::Result<()> {
                    match index {
                        #( #set_field_arms )*
                        _ => return Err(#cqlmap::Error::field_not_settable(format!("#{index}"))),
                    }

                    Ok(())
                }
            }
        }
    }
}
