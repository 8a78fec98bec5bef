//! # 依赖注入具体实现
//!
//! 提供九个架构层容器、注册表、组合解析器和服务层拓扑排序。
//!
//! ## 层级规则
//!
//! - Config、Entity 没有依赖
//! - Manager 只能依赖 Config
//! - Repository 可以依赖 Manager、Config 与 Entity
//! - Service 可以依赖同层 Service、Repository、Manager 与 Config
//! - Controller、Middleware、Scheduler、Listener 只能依赖 Service 与 Manager，
//!   直接注入 Repository 会被拒绝

pub mod containers;
pub mod helpers;
pub mod injector;
pub mod registry;
pub mod topology;

#[cfg(test)]
mod test_support;

pub use containers::{
    ConfigContainer, ControllerContainer, EdgeComponent, EntityContainer, EntityRecord,
    InjectableLayerContainer, LayerComponent, ListenerContainer, ManagerContainer,
    MiddlewareContainer, RepositoryContainer, SchedulerContainer, ServiceContainer,
};
pub use helpers::*;
pub use injector::{inject_dependencies, CompositeResolver, InjectionReport};
pub use registry::{ComponentRecord, NamedRegistry, TypedRegistry};
pub use topology::{topological_sort, DependencyGraph};

pub use di_abstractions::{
    ContainerSource, ContainerStats, DependencyResolver, InjectableContainer, LayerStats,
};
