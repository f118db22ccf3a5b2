use crate::meta;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

pub fn impl_xml_default(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let fields = match meta::fields(&input) {
        Ok(fields) => fields,
        Err(e) => return TokenStream::from(e.to_compile_error()),
    };

    let initializers = fields.iter().map(|field| {
        let ident = field.ident;
        match &field.default {
            Some(value) => quote! { #ident: #value },
            None => quote! { #ident: ::core::default::Default::default() },
        }
    });

    let expanded = quote! {
        impl ::core::default::Default for #name {
            fn default() -> Self {
                Self {
                    #(#initializers,)*
                }
            }
        }
    };
    TokenStream::from(expanded)
}
