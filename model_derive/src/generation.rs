//! Code generation for the `Model` derive

use crate::parsing::ModelInfo;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub fn generate_model_impl(
    input: &DeriveInput,
    model_info: &ModelInfo,
    field_names: &[String],
) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let model_name = &model_info.name;

    let check_impl = model_info.check.as_ref().map(|check| {
        quote! {
            fn check(&self) -> Result<(), String> {
                #check(self)
            }
        }
    });

    quote! {
        impl #impl_generics column_codec::Model for #name #ty_generics #where_clause {
            fn model_name() -> &'static str {
                #model_name
            }

            fn field_names() -> &'static [&'static str] {
                &[#(#field_names),*]
            }

            #check_impl
        }
    }
}
