//! # Component Macros
//!
//! 依赖注入相关的过程宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`](derive@Injectable) - 根据 `#[inject]` 字段生成注入点列表
//! - [`contract`] - 声明接口所属的架构层级
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{contract, Injectable};
//! use infrastructure_common::{Inject, Service};
//!
//! #[contract(service)]
//! pub trait UserService: Service {
//!     fn describe(&self, id: u64) -> String;
//! }
//!
//! #[derive(Injectable)]
//! pub struct UserServiceImpl {
//!     #[inject]
//!     repository: Inject<dyn UserRepository>,
//!     #[inject(optional)]
//!     clock: Inject<dyn Clock>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, Item};

mod contract;
mod injectable;
mod utils;

/// 可注入组件派生宏
///
/// 为结构体实现 `Injectable`，按声明顺序列出所有标记字段。
///
/// # 标记
///
/// - `#[inject]` - 必需依赖
/// - `#[inject(optional)]` - 可选依赖，解析失败时保持为空
///
/// 未标记的字段不会被注入。标记字段的类型必须是 `Inject<T>`，
/// 其它标记值或字段类型都会产生编译错误。
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// 层级契约宏
///
/// 参数为层级名称：`config`、`entity`、`manager`、`repository`、`service`、
/// `controller`、`middleware`、`scheduler`、`listener`。
///
/// # 示例
///
/// ```rust,ignore
/// #[contract(repository)]
/// pub trait UserRepository: Repository {
///     fn find(&self, id: u64) -> Option<String>;
/// }
///
/// #[contract(entity)]
/// pub struct UserEntity;
/// ```
#[proc_macro_attribute]
pub fn contract(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as Item);
    contract::expand(args.into(), item)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
