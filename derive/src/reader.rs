use crate::meta::{self, FieldRole, Shape};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput, Error};

pub fn impl_xml_reader(input: TokenStream) -> TokenStream {
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

    let mut seen_flags = Vec::new(); // required attribute trackers
    let mut attributes = Vec::new(); // tag attributes
    let mut elements = Vec::new(); // tag elements
    let mut following = None;

    for field in &fields {
        let ident = field.ident;
        let name_bytes = field.name_bytes();
        match field.role {
            FieldRole::Skip => (),
            FieldRole::Attribute => {
                let mark = if field.required {
                    let seen = format_ident!("seen_{}", ident);
                    let attr_name = &field.name;
                    seen_flags.push((seen.clone(), attr_name.clone()));
                    quote! { #seen = true; }
                } else {
                    quote! {}
                };
                attributes.push(quote! {
                    #name_bytes => {
                        self.#ident = crate::stream::value::parse_attribute(start, &a)?;
                        #mark
                    }
                });
            }
            FieldRole::Element => {
                let logic = match meta::shape(&field.field.ty) {
                    Shape::Option(inner) => quote! {
                        let mut value = <#inner as ::core::default::Default>::default();
                        crate::stream::utils::XmlReader::read_xml(&mut value, e, xml, empty)?;
                        self.#ident = Some(value);
                    },
                    Shape::Vec(inner) => quote! {
                        let mut value = <#inner as ::core::default::Default>::default();
                        crate::stream::utils::XmlReader::read_xml(&mut value, e, xml, empty)?;
                        self.#ident.push(value);
                    },
                    Shape::Plain => {
                        let ty = &field.field.ty;
                        quote! {
                            let mut value = <#ty as ::core::default::Default>::default();
                            crate::stream::utils::XmlReader::read_xml(&mut value, e, xml, empty)?;
                            self.#ident = value;
                        }
                    }
                };
                elements.push(quote! {
                    #name_bytes => { #logic }
                });
            }
            FieldRole::Following => {
                if following.is_some() {
                    return Err(Error::new_spanned(
                        field.field,
                        "Only one `following_elements` field is supported",
                    ));
                }
                following = Some(ident);
            }
        }
    }

    let attribute_logic = if attributes.is_empty() {
        quote! {}
    } else {
        let seen_idents = seen_flags.iter().map(|(seen, _)| seen);
        let checks = seen_flags.iter().map(|(seen, attr_name)| {
            quote! {
                if !#seen {
                    crate::stream::utils::missing_required(start, #attr_name);
                }
            }
        });
        quote! {
            #(let mut #seen_idents = false;)*
            for attr in start.attributes() {
                let a = attr?;
                match a.key.as_ref() {
                    #(#attributes)*
                    _ => (),
                }
            }
            #(#checks)*
        }
    };

    // Children the struct does not name are offered to the following
    // elements field, anything left over is skipped
    let fallback = match following {
        Some(ident) => quote! {
            crate::stream::utils::XmlListReader::read_entry(&mut self.#ident, e, xml, empty)
        },
        None => quote! { Ok(false) },
    };
    let children = if elements.is_empty() {
        match following {
            Some(_) => quote! { |e, xml, empty| #fallback },
            None => quote! { |_, _, _| Ok(false) },
        }
    } else {
        quote! {
            |e, xml, empty| {
                match e.local_name().as_ref() {
                    #(#elements)*
                    _ => return #fallback,
                }
                Ok(true)
            }
        }
    };

    let entry = struct_meta.entry.map(|entry| {
        quote! {
            impl crate::stream::utils::ListEntry for #name {
                const TAG: &'static str = #entry;
            }
        }
    });

    // Generate the implementation for the `XmlReader` trait for the struct
    Ok(quote! {
        impl<B: ::std::io::BufRead> crate::stream::utils::XmlReader<B> for #name {
            fn read_xml(
                &mut self,
                start: &::quick_xml::events::BytesStart<'_>,
                xml: &mut ::quick_xml::Reader<B>,
                empty: bool,
            ) -> Result<(), crate::errors::XlsxError> {
                #attribute_logic
                crate::stream::utils::read_children(start, xml, empty, #children)
            }
        }
        #entry
    })
}
