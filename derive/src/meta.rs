use proc_macro2::Span;
use quote::ToTokens as _;
use syn::{
    spanned::Spanned as _, Data, DeriveInput, Error, Expr, Field, Fields, Ident,
    GenericArgument, LitByteStr, LitStr, PathArguments, Type,
};

/// Struct level `#[xml(...)]` options.
#[derive(Default)]
pub struct StructMeta {
    /// Fixed tag name, overrides the one handed in by the parent
    pub name: Option<String>,
    /// Tag used when the struct is a member of a counted list
    pub entry: Option<String>,
}

/// How a field maps onto the element.
#[derive(PartialEq, Eq)]
pub enum FieldRole {
    Attribute,
    Element,
    /// Takes every child tag the struct itself does not name
    Following,
    Skip,
}

/// Field level `#[xml(...)]` options.
pub struct FieldMeta<'a> {
    pub field: &'a Field,
    pub ident: &'a Ident,
    pub name: String,
    pub role: FieldRole,
    pub required: bool,
    pub default: Option<Expr>,
    /// Attribute written with the length of a `following_elements` field
    pub count: Option<String>,
}

impl FieldMeta<'_> {
    pub fn name_bytes(&self) -> LitByteStr {
        LitByteStr::new(self.name.as_bytes(), Span::call_site())
    }
}

/// Shape of a child element field.
pub enum Shape<'a> {
    Option(&'a Type),
    Vec(&'a Type),
    Plain,
}

pub fn shape(ty: &Type) -> Shape<'_> {
    if let Type::Path(type_path) = ty {
        if let Some(last) = type_path.path.segments.last() {
            let inner = match &last.arguments {
                PathArguments::AngleBracketed(args) => match args.args.first() {
                    Some(GenericArgument::Type(inner)) => Some(inner),
                    _ => None,
                },
                _ => None,
            };
            match (last.ident.to_string().as_str(), inner) {
                ("Option", Some(inner)) => return Shape::Option(inner),
                ("Vec", Some(inner)) => return Shape::Vec(inner),
                _ => (),
            }
        }
    }
    Shape::Plain
}

pub fn struct_meta(input: &DeriveInput) -> Result<StructMeta, Error> {
    let mut meta = StructMeta::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("xml")) {
        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("name") {
                meta.name = Some(nested.value()?.parse::<LitStr>()?.value());
            } else if nested.path.is_ident("entry") {
                meta.entry = Some(nested.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(nested.error(format!(
                    "Unsupported top-level `#[xml(...)]` option `{}`",
                    nested.path.clone().into_token_stream()
                )));
            }
            Ok(())
        })?;
    }
    Ok(meta)
}

pub fn fields(input: &DeriveInput) -> Result<Vec<FieldMeta<'_>>, Error> {
    let named = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            other => {
                return Err(Error::new(
                    other.span(),
                    "Only struct with named fields is supported",
                ))
            }
        },
        _ => return Err(Error::new(input.span(), "Only structs are supported")),
    };

    let mut metas = Vec::with_capacity(named.len());
    for field in named {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "Only named fields are supported"))?;
        let mut meta = FieldMeta {
            field,
            ident,
            name: ident.to_string(),
            role: FieldRole::Attribute,
            required: false,
            default: None,
            count: None,
        };
        for attr in &field.attrs {
            if !attr.path().is_ident("xml") {
                continue;
            }
            attr.parse_nested_meta(|nested| {
                if nested.path.is_ident("name") {
                    meta.name = nested.value()?.parse::<LitStr>()?.value();
                } else if nested.path.is_ident("default") {
                    meta.default = Some(nested.value()?.parse::<Expr>()?);
                } else if nested.path.is_ident("required") {
                    meta.required = true;
                } else if nested.path.is_ident("element") {
                    meta.role = FieldRole::Element;
                } else if nested.path.is_ident("following_elements") {
                    meta.role = FieldRole::Following;
                } else if nested.path.is_ident("skip") {
                    meta.role = FieldRole::Skip;
                } else if nested.path.is_ident("count") {
                    meta.count = Some(nested.value()?.parse::<LitStr>()?.value());
                } else {
                    return Err(nested.error(format!(
                        "Unsupported `#[xml(...)]` option `{}`",
                        nested.path.clone().into_token_stream()
                    )));
                }
                Ok(())
            })?;
        }
        if meta.count.is_some() && meta.role != FieldRole::Following {
            return Err(Error::new(
                field.span(),
                "`count` only applies to `following_elements` fields",
            ));
        }
        metas.push(meta);
    }
    Ok(metas)
}
