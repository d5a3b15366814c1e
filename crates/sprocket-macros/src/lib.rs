extern crate proc_macro;

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

/// Derives the field-descriptor table for a model.
///
/// Field names bind to parameters as `prefix + name` (case-insensitive)
/// and to result columns by exact name. `#[field(rename_all = "PascalCase")]`
/// on the struct, or `#[field(rename = "…")]` on a field, adjusts the
/// descriptor name. `#[field(scalar)]` forces a user-defined type to bind
/// as a scalar through its `FieldValue` impl; `#[field(composite)]` forces
/// recursive flattening.
#[proc_macro_derive(Model, attributes(field))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Types that bind as scalars without an explicit `#[field(scalar)]`.
const PRIMITIVES: &[&str] = &[
    "bool",
    "i16",
    "i32",
    "i64",
    "u32",
    "f32",
    "f64",
    "String",
    "DateTime",
    "NaiveDateTime",
];

#[derive(Clone, Copy)]
enum RenameAll {
    Verbatim,
    Pascal,
    Camel,
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    scalar: bool,
    composite: bool,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "Model can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "Model can only be derived for structs with named fields",
        ));
    };

    let rename_all = container_rename_all(&input.attrs)?;

    let descriptors = fields
        .named
        .iter()
        .map(|field| expand_field(ident, field, rename_all))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl ::sprocket::Model for #ident {
            const FIELDS: &'static [::sprocket::FieldDescriptor<Self>] = &[
                #(#descriptors),*
            ];
        }
    })
}

fn expand_field(
    model: &Ident,
    field: &syn::Field,
    rename_all: RenameAll,
) -> syn::Result<TokenStream2> {
    let ident = field
        .ident
        .as_ref()
        .expect("named fields always carry an ident");
    let attrs = field_attrs(&field.attrs)?;

    if attrs.scalar && attrs.composite {
        return Err(syn::Error::new_spanned(
            ident,
            "a field cannot be both scalar and composite",
        ));
    }

    let name = attrs
        .rename
        .unwrap_or_else(|| rename(rename_all, &ident.to_string()));

    let (optional, inner) = unwrap_option(&field.ty);
    let scalar = if attrs.scalar {
        true
    } else if attrs.composite {
        false
    } else {
        is_primitive(inner)
    };

    if scalar {
        return Ok(quote! {
            ::sprocket::FieldDescriptor {
                name: #name,
                ty: ::sprocket::FieldTy::Primitive,
                get: |model: &#model| ::sprocket::macro_support::field_value(&model.#ident),
                set: |model: &mut #model, value: ::sprocket::Value| {
                    model.#ident = ::sprocket::macro_support::from_value(value)?;
                    Ok(())
                },
            }
        });
    }

    let target = quote!(#inner).to_string();
    let get = if optional {
        quote! {
            |model: &#model| match &model.#ident {
                Some(nested) => ::sprocket::macro_support::composite_value(nested),
                None => ::sprocket::Value::Null,
            }
        }
    } else {
        quote! {
            |model: &#model| ::sprocket::macro_support::composite_value(&model.#ident)
        }
    };

    Ok(quote! {
        ::sprocket::FieldDescriptor {
            name: #name,
            ty: ::sprocket::FieldTy::Composite,
            get: #get,
            set: |_model: &mut #model, value: ::sprocket::Value| {
                Err(::sprocket::macro_support::composite_mismatch(value, #target))
            },
        }
    })
}

fn container_rename_all(attrs: &[syn::Attribute]) -> syn::Result<RenameAll> {
    let mut rename_all = RenameAll::Verbatim;
    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                rename_all = match lit.value().as_str() {
                    "PascalCase" => RenameAll::Pascal,
                    "camelCase" => RenameAll::Camel,
                    other => {
                        return Err(meta.error(format!("unsupported rename_all rule `{other}`")))
                    }
                };
                Ok(())
            } else {
                Err(meta.error("unsupported attribute; expected `rename_all`"))
            }
        })?;
    }
    Ok(rename_all)
}

fn field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
            } else if meta.path.is_ident("scalar") {
                parsed.scalar = true;
            } else if meta.path.is_ident("composite") {
                parsed.composite = true;
            } else {
                return Err(meta.error(
                    "unsupported attribute; expected `rename`, `scalar` or `composite`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}

fn rename(rule: RenameAll, name: &str) -> String {
    match rule {
        RenameAll::Verbatim => name.to_owned(),
        RenameAll::Pascal => name.to_upper_camel_case(),
        RenameAll::Camel => name.to_lower_camel_case(),
    }
}

fn unwrap_option(ty: &Type) -> (bool, &Type) {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return (true, inner);
                    }
                }
            }
        }
    }
    (false, ty)
}

fn is_primitive(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };

    // Vec<u8> binds as raw bytes; any other collection is unsupported and
    // surfaces as a missing `Model` impl at the use site.
    if segment.ident == "Vec" {
        if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
            if let Some(syn::GenericArgument::Type(Type::Path(inner))) = args.args.first() {
                return inner.path.is_ident("u8");
            }
        }
        return false;
    }

    PRIMITIVES.iter().any(|name| segment.ident == name)
}
