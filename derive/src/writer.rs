use crate::meta::{self, FieldRole, Shape};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Error};

pub fn impl_xml_writer(input: TokenStream) -> TokenStream {
    // Gather the code definition
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => TokenStream::from(e.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream, Error> {
    let name = &input.ident;
    let struct_meta = meta::struct_meta(input)?;
    let fields = meta::fields(input)?;

    let mut attr_writers = Vec::new();
    let mut count_writers = Vec::new();
    let mut element_writers = Vec::new();
    let mut presence = Vec::new();
    let mut needs_defaults = false;

    for field in &fields {
        let ident = field.ident;
        let field_name_str = &field.name;
        match field.role {
            FieldRole::Skip => (),
            FieldRole::Attribute => {
                let write = quote! {
                    if let Some(value) = crate::stream::value::XmlValue::to_xml(&self.#ident) {
                        attrs.push((#field_name_str, value));
                    }
                };
                // Required attributes are written regardless of their value
                if field.required {
                    attr_writers.push(write);
                } else {
                    needs_defaults = true;
                    attr_writers.push(quote! {
                        if self.#ident != defaults.#ident {
                            #write
                        }
                    });
                }
            }
            FieldRole::Element => match meta::shape(&field.field.ty) {
                Shape::Option(_) => {
                    presence.push(quote! { self.#ident.is_some() });
                    element_writers.push(quote! {
                        if let Some(value) = &self.#ident {
                            crate::stream::utils::XmlWriter::write_xml(value, writer, #field_name_str)?;
                        }
                    });
                }
                Shape::Vec(_) => {
                    presence.push(quote! { !self.#ident.is_empty() });
                    element_writers.push(quote! {
                        for value in &self.#ident {
                            crate::stream::utils::XmlWriter::write_xml(value, writer, #field_name_str)?;
                        }
                    });
                }
                Shape::Plain => {
                    presence.push(quote! { true });
                    element_writers.push(quote! {
                        crate::stream::utils::XmlWriter::write_xml(&self.#ident, writer, #field_name_str)?;
                    });
                }
            },
            FieldRole::Following => {
                presence.push(quote! { !self.#ident.is_empty() });
                element_writers.push(quote! {
                    crate::stream::utils::XmlListWriter::write_entries(&self.#ident, writer)?;
                });
                if let Some(count) = &field.count {
                    count_writers.push(quote! {
                        attrs.push((#count, ::std::borrow::Cow::Owned(self.#ident.len().to_string())));
                    });
                }
            }
        }
    }

    // Some structs always carry the same tag, others take the one
    // chosen by their parent
    let tag_name = match &struct_meta.name {
        Some(name_str) => quote! { #name_str },
        None => quote! { tag_name },
    };

    let defaults = if needs_defaults {
        quote! { let defaults = <Self as ::core::default::Default>::default(); }
    } else {
        quote! {}
    };

    let writer = if element_writers.is_empty() {
        // Allows to only write attributes
        quote! {
            element.write_empty()?;
        }
    } else {
        // Writes nested elements, collapsing to an empty tag when none are present
        quote! {
            if #(#presence)||* {
                element.write_inner_content::<_, crate::errors::XlsxError>(|writer| {
                    // Generated element writing logic
                    #(#element_writers)*
                    Ok(())
                })?;
            } else {
                element.write_empty()?;
            }
        }
    };

    // Generate the implementation for the `XmlWriter` trait for the struct
    Ok(quote! {
        impl<W: ::std::io::Write> crate::stream::utils::XmlWriter<W> for #name {
            #[allow(unused_mut, unused_variables)]
            fn write_xml<'a>(
                &self,
                writer: &'a mut ::quick_xml::Writer<W>,
                tag_name: &'a str,
            ) -> Result<&'a mut ::quick_xml::Writer<W>, crate::errors::XlsxError> {
                #defaults
                let mut attrs: Vec<(&str, ::std::borrow::Cow<'_, str>)> = Vec::new();
                // Generated attribute writing logic
                #(#attr_writers)*
                #(#count_writers)*

                let element = writer
                    .create_element(#tag_name)
                    .with_attributes(attrs.iter().map(|(key, value)| (*key, value.as_ref())));
                #writer

                Ok(writer)
            }
        }
    })
}
