//! `#[contract(layer)]` 实现
//!
//! 用在接口 trait 上时为 `dyn Trait` 实现 `Contract`，
//! 用在结构体上时为结构体本身实现 `Contract`。

use crate::utils::{layer_names, lookup_layer};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Error, Ident, Item, Result};

/// 解析层级参数，返回 `(Layer 变体, 能力 trait)`
pub fn parse_layer(args: TokenStream) -> Result<(Ident, Ident)> {
    if args.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            format!("contract 需要层级参数，可选值: {}", layer_names()),
        ));
    }
    let ident: Ident = syn::parse2(args)?;
    let (variant, base) = lookup_layer(&ident.to_string()).ok_or_else(|| {
        Error::new_spanned(
            &ident,
            format!("未知的层级 `{}`，可选值: {}", ident, layer_names()),
        )
    })?;
    Ok((
        Ident::new(variant, ident.span()),
        Ident::new(base, ident.span()),
    ))
}

fn contract_impl(target: TokenStream, variant: &Ident, base: &Ident) -> TokenStream {
    quote! {
        impl ::infrastructure_common::Contract for #target {
            const LAYER: ::infrastructure_common::Layer = ::infrastructure_common::Layer::#variant;
            type Base = dyn ::infrastructure_common::#base;

            fn upcast(
                this: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<<Self as ::infrastructure_common::Contract>::Base> {
                this
            }
        }
    }
}

/// 生成原始条目与 `Contract` 实现
pub fn expand(args: TokenStream, item: Item) -> Result<TokenStream> {
    let (variant, base) = parse_layer(args)?;

    let target = match &item {
        Item::Trait(item_trait) => {
            if !item_trait.generics.params.is_empty() {
                return Err(Error::new_spanned(
                    &item_trait.generics,
                    "contract 不支持泛型 trait",
                ));
            }
            let name = &item_trait.ident;
            quote!(dyn #name)
        }
        Item::Struct(item_struct) => {
            if !item_struct.generics.params.is_empty() {
                return Err(Error::new_spanned(
                    &item_struct.generics,
                    "contract 不支持泛型结构体",
                ));
            }
            let name = &item_struct.ident;
            quote!(#name)
        }
        other => {
            return Err(Error::new_spanned(
                other,
                "contract 只能用在 trait 或结构体上",
            ))
        }
    };

    let implementation = contract_impl(target, &variant, &base);
    Ok(quote! {
        #item

        #implementation
    })
}
