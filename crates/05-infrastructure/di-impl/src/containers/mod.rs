//! 九个架构层容器
//!
//! 注入顺序固定为 Config → Entity → Manager → Repository → Service →
//! (Controller, Middleware, Scheduler, Listener)。每个容器在注入时只能看到
//! 低于自身的层，Service 额外可以看到同层。

mod config;
mod controller;
mod entity;
mod layer;
mod listener;
mod manager;
mod middleware;
mod repository;
mod scheduler;
mod service;

pub use config::ConfigContainer;
pub use controller::ControllerContainer;
pub use entity::{EntityContainer, EntityRecord};
pub use layer::{EdgeComponent, InjectableLayerContainer};
pub use listener::ListenerContainer;
pub use manager::ManagerContainer;
pub use middleware::MiddlewareContainer;
pub use repository::RepositoryContainer;
pub use scheduler::SchedulerContainer;
pub use service::ServiceContainer;

use crate::injector::inject_dependencies;
use crate::registry::{ComponentRecord, TypedRegistry};
use di_abstractions::DependencyResolver;
use infrastructure_common::{
    Controller, ContainerResult, Injectable, Listener, Manager, Middleware, Repository,
    Scheduler, Service,
};

/// 可注入的层能力 trait 对象
pub trait LayerComponent: Send + Sync + 'static {
    /// 组件名称
    fn component_name(&self) -> &str;

    /// 作为可注入组件
    fn as_injectable(&self) -> &dyn Injectable;
}

macro_rules! layer_component {
    ($($base:ident => $name:ident),* $(,)?) => {
        $(
            impl LayerComponent for dyn $base {
                fn component_name(&self) -> &str {
                    self.$name()
                }

                fn as_injectable(&self) -> &dyn Injectable {
                    self
                }
            }
        )*
    };
}

layer_component! {
    Manager => manager_name,
    Repository => repository_name,
    Service => service_name,
    Controller => controller_name,
    Middleware => middleware_name,
    Scheduler => scheduler_name,
    Listener => listener_name,
}

/// 为单条注册记录注入依赖
pub(crate) fn inject_record<B>(
    record: &ComponentRecord<B>,
    resolver: &dyn DependencyResolver,
) -> ContainerResult<()>
where
    B: ?Sized + LayerComponent,
{
    let instance = record.instance().as_ref();
    inject_dependencies(instance.component_name(), instance.as_injectable(), resolver)?;
    Ok(())
}

/// 按接口键顺序为注册表中的全部组件注入依赖
pub(crate) fn inject_registry<B>(
    registry: &TypedRegistry<B>,
    resolver: &dyn DependencyResolver,
) -> ContainerResult<()>
where
    B: ?Sized + LayerComponent,
{
    for record in registry.records() {
        inject_record(&record, resolver)?;
    }
    Ok(())
}
