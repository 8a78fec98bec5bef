//! # Infrastructure Common
//!
//! 分层依赖注入引擎的公共类型。
//!
//! ## 核心组件
//!
//! - [`TypeInfo`] / [`Layer`] - 接口键与架构层级
//! - [`Contract`] - 业务接口与所属层的绑定
//! - [`Inject`] / [`Injectable`] - 字段注入点
//! - [`Lifecycle`] - 组件生命周期钩子
//! - [`ContainerError`] - 容器错误
//!
//! ## 设计原则
//!
//! - 层级约束尽量在编译期由类型系统保证
//! - 组件之间只通过接口 trait 对象依赖

pub mod component;
pub mod errors;
pub mod health;
pub mod inject;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use errors::*;
pub use health::*;
pub use inject::*;
pub use lifecycle::*;
pub use metadata::*;
