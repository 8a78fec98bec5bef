//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义层容器与依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ContainerSource`] - 依赖源接口
//! - [`DependencyResolver`] - 依赖解析器接口
//! - [`InjectableContainer`] - 层容器接口

pub mod container;
pub mod resolver;

pub use container::*;
pub use resolver::*;
