use proc_macro::{Span, TokenStream};
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, LitStr};

fn to_camel_case(value: String) -> String {
    let mut chars = value.chars();
    if let Some(first) = chars.next() {
        if first.is_uppercase() && chars.clone().any(|c| c.is_lowercase()) {
            // Convert first letter to lowercase for camelCase (e.g., AxisRow -> axisRow)
            let mut result = first.to_lowercase().to_string();
            result.push_str(chars.as_str());
            result
        } else {
            // Fully lowercase for standard cases (e.g., YEAR -> year)
            value.to_lowercase()
        }
    } else {
        String::new()
    }
}

pub fn impl_xml_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let name_str = name.to_string();

    // Check if all variants should be camelCase
    let global_camel_case = input.attrs.iter().any(|attr| attr.path().is_ident("camel"));

    // Extract enum variants
    let data = match input.data {
        Data::Enum(data) => data,
        _ => {
            return TokenStream::from(
                Error::new(Span::call_site().into(), "XmlEnum can only be derived for enums")
                    .to_compile_error(),
            )
        }
    };

    let mut parse_arms = Vec::new();
    let mut format_arms = Vec::new();
    for variant in &data.variants {
        let ident = &variant.ident;
        if !matches!(variant.fields, Fields::Unit) {
            return TokenStream::from(
                Error::new_spanned(variant, "XmlEnum variants can not carry data").to_compile_error(),
            );
        }

        // Get metadata to transform final name
        let mut rename = None;
        let mut camel_case = global_camel_case;
        for attr in &variant.attrs {
            if attr.path().is_ident("name") {
                match attr.parse_args::<LitStr>() {
                    Ok(lit) => rename = Some(lit.value()),
                    Err(e) => return TokenStream::from(e.to_compile_error()),
                }
            } else if attr.path().is_ident("camel") {
                camel_case = true;
            }
        }

        // Apply transformation
        let text = match rename {
            Some(rename) => rename,
            None if camel_case => to_camel_case(ident.to_string()),
            None => ident.to_string(),
        };
        parse_arms.push(quote! { #text => Some(Self::#ident), });
        format_arms.push(quote! { Self::#ident => #text, });
    }

    let expanded = quote! {
        impl crate::stream::value::XmlValue for #name {
            const KIND: &'static str = #name_str;

            fn from_xml(value: &str) -> Option<Self> {
                match value {
                    #(#parse_arms)*
                    _ => None,
                }
            }

            fn to_xml(&self) -> Option<::std::borrow::Cow<'_, str>> {
                Some(::std::borrow::Cow::Borrowed(match self {
                    #(#format_arms)*
                }))
            }
        }
    };

    TokenStream::from(expanded)
}
