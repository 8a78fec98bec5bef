//! `#[derive(Injectable)]` 实现

use crate::utils::{extract_generic_type, field_has_attribute, field_name};
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Error, Field, Fields, Meta, Result};

/// 字段上的注入标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectMarker {
    Required,
    Optional,
}

/// 解析 `#[inject]`、`#[inject()]` 与 `#[inject(optional)]`
pub fn parse_marker(attr: &Attribute) -> Result<InjectMarker> {
    match &attr.meta {
        Meta::Path(_) => Ok(InjectMarker::Required),
        Meta::List(list) if list.tokens.is_empty() => Ok(InjectMarker::Required),
        Meta::List(_) => {
            let mut marker = None;
            attr.parse_nested_meta(|meta| {
                if marker.is_some() {
                    return Err(meta.error("inject 只接受一个标记"));
                }
                if meta.path.is_ident("optional") {
                    marker = Some(InjectMarker::Optional);
                    Ok(())
                } else {
                    Err(meta.error("未知的注入标记，只支持 #[inject] 或 #[inject(optional)]"))
                }
            })?;
            marker.ok_or_else(|| Error::new_spanned(attr, "注入标记不能为空"))
        }
        Meta::NameValue(nv) => Err(Error::new_spanned(
            nv,
            "不支持 #[inject = ...]，请使用 #[inject] 或 #[inject(optional)]",
        )),
    }
}

fn injection_point(field: &Field) -> Result<Option<TokenStream>> {
    let attrs: Vec<&Attribute> = field
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("inject"))
        .collect();
    let Some(attr) = attrs.first() else {
        return Ok(None);
    };
    if let Some(extra) = attrs.get(1) {
        return Err(Error::new_spanned(extra, "同一字段只能有一个 #[inject]"));
    }

    let marker = parse_marker(attr)?;
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| Error::new(field.span(), "注入字段必须是具名字段"))?;

    if extract_generic_type(&field.ty, "Inject").is_none() {
        return Err(Error::new_spanned(
            &field.ty,
            "标记 #[inject] 的字段类型必须是 Inject<T>",
        ));
    }

    let name = field_name(ident);
    let constructor = match marker {
        InjectMarker::Required => quote!(required),
        InjectMarker::Optional => quote!(optional),
    };
    Ok(Some(quote_spanned! {field.ty.span()=>
        ::infrastructure_common::InjectionPoint::#constructor(#name, &self.#ident)
    }))
}

/// 生成 `Injectable` 实现
pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "Injectable 只能派生在结构体上",
            ))
        }
    };

    let points = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(injection_point)
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>>>()?,
        Fields::Unnamed(unnamed) => {
            if let Some(field) = unnamed.unnamed.iter().find(|f| field_has_attribute(f, "inject")) {
                return Err(Error::new(field.span(), "注入字段必须是具名字段"));
            }
            Vec::new()
        }
        Fields::Unit => Vec::new(),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::infrastructure_common::Injectable for #name #ty_generics #where_clause {
            fn injection_points(&self) -> ::std::vec::Vec<::infrastructure_common::InjectionPoint<'_>> {
                ::std::vec![#(#points),*]
            }
        }
    })
}
