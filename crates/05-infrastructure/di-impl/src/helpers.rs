//! 按层的泛型注册与获取函数
//!
//! `Arc<Concrete>` 到 `Arc<dyn I>` 的转换在调用处由编译器完成，
//! 未实现接口的组件无法通过编译。

use crate::containers::{
    ConfigContainer, ControllerContainer, EntityContainer, ListenerContainer, ManagerContainer,
    MiddlewareContainer, RepositoryContainer, SchedulerContainer, ServiceContainer,
};
use infrastructure_common::{
    ConfigProvider, Contract, ContainerResult, Controller, Entity, Listener, Manager, Middleware,
    Repository, Scheduler, Service,
};
use std::sync::Arc;

macro_rules! layer_helpers {
    ($($register:ident, $get:ident => $container:ty, $base:ty;)*) => {
        $(
            #[doc = concat!("以接口 `I` 向 `", stringify!($container), "` 注册组件")]
            pub fn $register<I>(container: &$container, component: Arc<I>) -> ContainerResult<()>
            where
                I: ?Sized + Contract<Base = $base>,
            {
                container.register::<I>(component)
            }

            #[doc = concat!("以接口 `I` 从 `", stringify!($container), "` 获取组件")]
            pub fn $get<I>(container: &$container) -> ContainerResult<Arc<I>>
            where
                I: ?Sized + Contract<Base = $base>,
            {
                container.get::<I>()
            }
        )*
    };
}

layer_helpers! {
    register_config, get_config => ConfigContainer, dyn ConfigProvider;
    register_entity, get_entity => EntityContainer, dyn Entity;
    register_manager, get_manager => ManagerContainer, dyn Manager;
    register_repository, get_repository => RepositoryContainer, dyn Repository;
    register_service, get_service => ServiceContainer, dyn Service;
    register_controller, get_controller => ControllerContainer, dyn Controller;
    register_middleware, get_middleware => MiddlewareContainer, dyn Middleware;
    register_scheduler, get_scheduler => SchedulerContainer, dyn Scheduler;
    register_listener, get_listener => ListenerContainer, dyn Listener;
}
