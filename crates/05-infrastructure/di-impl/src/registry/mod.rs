//! 组件注册表

mod named;
mod typed;

pub use named::NamedRegistry;
pub use typed::{ComponentRecord, NameFn, TypedRegistry};
