use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, GenericArgument, Ident,
    PathArguments, PathSegment, Type, Variant,
};

/// What the expansion needs to know about a single enum variant.
struct VariantMeta<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
}

impl VariantMeta<'_> {
    fn is_internal(&self) -> bool {
        self.ident == "Internal"
    }
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let ext_trait = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("rally_error can only be applied to enums"); };
    };

    let variants = match data.variants.iter().map(parse_variant).collect::<Result<Vec<_>, _>>() {
        Ok(variants) => variants,
        Err(err) => return err.to_compile_error(),
    };

    if let Some(v) = variants.iter().find(|v| v.source.is_some() && !v.has_context) {
        return syn::Error::new_spanned(
            v.ident,
            "rally_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error();
    }

    let derives = missing_derives(&input);
    let context_trait = context_trait(name, &ext_trait, &variants);
    let source_impls = variants.iter().filter_map(|v| source_impls(name, &ext_trait, v));
    let internal_impls = variants.iter().find(|v| v.is_internal()).map(|v| internal_impls(name, v));

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_trait
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| {
                std::borrow::Cow::Owned(format!(" ({c})"))
            })
        }
    }
}

fn parse_variant(v: &Variant) -> syn::Result<VariantMeta<'_>> {
    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            v,
            "rally_error requires named fields for source/context handling",
        ));
    };

    let has_context = context_field(fields)?.is_some();
    let source = source_field(fields).and_then(|f| f.ident.as_ref().map(|ident| (ident, &f.ty)));
    let cfg_attrs = v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();

    Ok(VariantMeta { ident: &v.ident, source, has_context, cfg_attrs })
}

fn context_field(fields: &FieldsNamed) -> syn::Result<Option<&Field>> {
    let Some(field) =
        fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|ident| ident == "context"))
    else {
        return Ok(None);
    };

    if is_context_type(&field.ty) {
        Ok(Some(field))
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn source_field(fields: &FieldsNamed) -> Option<&Field> {
    fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|ident| ident == "source")
            || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
    })
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                present.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !present.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }

    if derives.is_empty() { quote! {} } else { quote! { #[derive(#(#derives),*)] } }
}

fn context_trait(name: &Ident, ext_trait: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #ext_trait<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext_trait<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #arms )*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn source_impls(name: &Ident, ext_trait: &Ident, v: &VariantMeta<'_>) -> Option<TokenStream> {
    if v.is_internal() {
        return None;
    }
    let (field, ty) = v.source?;
    let ident = v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self { Self::#ident { #field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #ext_trait<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_impls(name: &Ident, internal: &VariantMeta<'_>) -> TokenStream {
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None }
            }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(s), context: None }
            }
        }
    }
}

/// Matches `Option<Cow<'static, str>>` (any path prefix on `Option`/`Cow`).
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|seg| seg.ident == "Option") else {
        return false;
    };
    let Some(GenericArgument::Type(inner)) = angle_args(option).and_then(|mut a| a.next()) else {
        return false;
    };
    let Some(cow) = last_segment(inner).filter(|seg| seg.ident == "Cow") else {
        return false;
    };
    let Some(mut args) = angle_args(cow) else {
        return false;
    };

    let static_lifetime =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_type = matches!(
        args.next(),
        Some(GenericArgument::Type(t)) if last_segment(t).is_some_and(|seg| seg.ident == "str")
    );

    static_lifetime && str_type
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last()
}

fn angle_args(segment: &PathSegment) -> Option<impl Iterator<Item = &GenericArgument>> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    Some(args.args.iter())
}
