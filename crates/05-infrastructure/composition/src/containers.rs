//! 九层容器集合
//!
//! 组合根唯一持有全部容器，按层级依赖关系连接后以 `Arc` 共享。

use di_abstractions::{ContainerStats, InjectableContainer};
use di_impl::{
    ConfigContainer, ControllerContainer, EntityContainer, ListenerContainer, ManagerContainer,
    MiddlewareContainer, RepositoryContainer, SchedulerContainer, ServiceContainer,
};
use infrastructure_common::Layer;
use std::sync::Arc;

/// 全部层容器
pub struct ContainerSet {
    config: Arc<ConfigContainer>,
    entity: Arc<EntityContainer>,
    manager: Arc<ManagerContainer>,
    repository: Arc<RepositoryContainer>,
    service: Arc<ServiceContainer>,
    controller: Arc<ControllerContainer>,
    middleware: Arc<MiddlewareContainer>,
    scheduler: Arc<SchedulerContainer>,
    listener: Arc<ListenerContainer>,
}

impl ContainerSet {
    /// 创建并连接所有容器
    pub fn new() -> Self {
        let config = Arc::new(ConfigContainer::new());
        let entity = Arc::new(EntityContainer::new());
        let manager = Arc::new(ManagerContainer::new(config.clone()));
        let repository = Arc::new(RepositoryContainer::new(manager.clone(), entity.clone()));
        let service = Arc::new(ServiceContainer::new(manager.clone(), repository.clone()));

        let controller = Arc::new(ControllerContainer::new(service.clone()));
        let middleware = Arc::new(MiddlewareContainer::new(service.clone()));
        let scheduler = Arc::new(SchedulerContainer::new(service.clone()));
        let listener = Arc::new(ListenerContainer::new(service.clone()));
        controller.set_manager_container(manager.clone());
        middleware.set_manager_container(manager.clone());
        scheduler.set_manager_container(manager.clone());
        listener.set_manager_container(manager.clone());

        Self {
            config,
            entity,
            manager,
            repository,
            service,
            controller,
            middleware,
            scheduler,
            listener,
        }
    }

    /// 配置层容器
    pub fn config(&self) -> &Arc<ConfigContainer> {
        &self.config
    }

    /// 实体层容器
    pub fn entity(&self) -> &Arc<EntityContainer> {
        &self.entity
    }

    /// 管理器层容器
    pub fn manager(&self) -> &Arc<ManagerContainer> {
        &self.manager
    }

    /// 仓储层容器
    pub fn repository(&self) -> &Arc<RepositoryContainer> {
        &self.repository
    }

    /// 服务层容器
    pub fn service(&self) -> &Arc<ServiceContainer> {
        &self.service
    }

    /// 控制器层容器
    pub fn controller(&self) -> &Arc<ControllerContainer> {
        &self.controller
    }

    /// 中间件层容器
    pub fn middleware(&self) -> &Arc<MiddlewareContainer> {
        &self.middleware
    }

    /// 调度器层容器
    pub fn scheduler(&self) -> &Arc<SchedulerContainer> {
        &self.scheduler
    }

    /// 监听器层容器
    pub fn listener(&self) -> &Arc<ListenerContainer> {
        &self.listener
    }

    /// 按注入顺序排列的所有容器
    pub fn all(&self) -> [&dyn InjectableContainer; 9] {
        [
            &*self.config,
            &*self.entity,
            &*self.manager,
            &*self.repository,
            &*self.service,
            &*self.controller,
            &*self.middleware,
            &*self.scheduler,
            &*self.listener,
        ]
    }

    /// 按层级获取容器
    pub fn layer(&self, layer: Layer) -> &dyn InjectableContainer {
        match layer {
            Layer::Config => &*self.config,
            Layer::Entity => &*self.entity,
            Layer::Manager => &*self.manager,
            Layer::Repository => &*self.repository,
            Layer::Service => &*self.service,
            Layer::Controller => &*self.controller,
            Layer::Middleware => &*self.middleware,
            Layer::Scheduler => &*self.scheduler,
            Layer::Listener => &*self.listener,
        }
    }

    /// 各层统计快照
    pub fn stats(&self) -> ContainerStats {
        ContainerStats {
            layers: self.all().iter().map(|c| c.stats()).collect(),
        }
    }
}

impl Default for ContainerSet {
    fn default() -> Self {
        Self::new()
    }
}
