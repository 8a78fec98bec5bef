//! 接入层通用容器
//!
//! Controller、Middleware、Scheduler、Listener 的注入规则相同：
//! 只能依赖 Manager（含 Config）与 Service，禁止直接注入 Repository。
//! ManagerContainer 需要在注入前通过 `set_manager_container` 设置。

use super::{inject_registry, LayerComponent, ManagerContainer, ServiceContainer};
use crate::injector::CompositeResolver;
use crate::registry::{ComponentRecord, TypedRegistry};
use di_abstractions::{ContainerSource, InjectableContainer};
use infrastructure_common::{
    Contract, ContainerError, ContainerResult, Controller, Layer, Listener,
    ManagerContainerNotSet, Middleware, Resolved, Scheduler, TypeInfo,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info};

/// 接入层能力 trait 对象
pub trait EdgeComponent: LayerComponent {
    /// 所属层级
    const LAYER: Layer;
}

impl EdgeComponent for dyn Controller {
    const LAYER: Layer = Layer::Controller;
}

impl EdgeComponent for dyn Middleware {
    const LAYER: Layer = Layer::Middleware;
}

impl EdgeComponent for dyn Scheduler {
    const LAYER: Layer = Layer::Scheduler;
}

impl EdgeComponent for dyn Listener {
    const LAYER: Layer = Layer::Listener;
}

/// 接入层容器
pub struct InjectableLayerContainer<B: ?Sized + EdgeComponent> {
    registry: TypedRegistry<B>,
    manager: RwLock<Option<Arc<ManagerContainer>>>,
    service: Arc<ServiceContainer>,
}

impl<B: ?Sized + EdgeComponent> InjectableLayerContainer<B> {
    /// 创建容器
    pub fn new(service: Arc<ServiceContainer>) -> Self {
        Self {
            registry: TypedRegistry::new(B::LAYER, |c| c.component_name()),
            manager: RwLock::new(None),
            service,
        }
    }

    /// 设置管理器层容器
    pub fn set_manager_container(&self, manager: Arc<ManagerContainer>) {
        *self.manager.write() = Some(manager);
    }

    /// 是否已设置管理器层容器
    pub fn has_manager_container(&self) -> bool {
        self.manager.read().is_some()
    }

    /// 以接口 `I` 注册组件
    pub fn register<I>(&self, component: Arc<I>) -> ContainerResult<()>
    where
        I: ?Sized + Contract<Base = B>,
    {
        self.registry.register_instance(component)
    }

    /// 以显式接口键注册
    pub fn register_by_type(&self, key: TypeInfo, record: ComponentRecord<B>) -> ContainerResult<()> {
        self.registry.register_by_type(key, record)
    }

    /// 以接口 `I` 获取组件
    pub fn get<I>(&self) -> ContainerResult<Arc<I>>
    where
        I: ?Sized + Contract<Base = B>,
    {
        self.registry.get_instance::<I>()
    }

    /// 按接口类型查找
    pub fn get_by_type(&self, key: &TypeInfo) -> Option<Arc<B>> {
        self.registry.get_by_type(key)
    }

    /// 所有组件，按名称排序
    pub fn get_all(&self) -> Vec<Arc<B>> {
        self.registry.get_all()
    }

    /// 遍历，回调返回 false 时停止
    pub fn range_items<F>(&self, f: F)
    where
        F: FnMut(&TypeInfo, &Arc<B>) -> bool,
    {
        self.registry.range_items(f)
    }

    fn manager_or_panic(&self) -> Arc<ManagerContainer> {
        match self.manager.read().clone() {
            Some(manager) => manager,
            None => {
                let err = ManagerContainerNotSet { layer: B::LAYER };
                error!("{}", err);
                std::panic::panic_any(err)
            }
        }
    }
}

impl<B: ?Sized + EdgeComponent> InjectableContainer for InjectableLayerContainer<B> {
    fn layer(&self) -> Layer {
        B::LAYER
    }

    /// # Panics
    ///
    /// 未设置 ManagerContainer 时以 [`ManagerContainerNotSet`] 为负载 panic。
    fn inject_all(&self) -> ContainerResult<()> {
        let manager = self.manager_or_panic();
        if self.registry.is_injected() {
            return Ok(());
        }
        let resolver = CompositeResolver::new(&[self, &*manager, &*self.service]);
        inject_registry(&self.registry, &resolver)?;
        self.registry.mark_injected();
        info!("{} 容器注入完成，共 {} 个组件", B::LAYER, self.registry.count());
        Ok(())
    }

    fn is_injected(&self) -> bool {
        self.registry.is_injected()
    }

    fn count(&self) -> usize {
        self.registry.count()
    }

    fn names(&self) -> Vec<String> {
        self.registry.get_names()
    }
}

impl<B: ?Sized + EdgeComponent> ContainerSource for InjectableLayerContainer<B> {
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Option<Resolved>> {
        if layer == Layer::Repository {
            return Err(ContainerError::DependencyNotFound {
                field_type: *field_type,
                container_type: Layer::Repository.to_string(),
                message: Some(format!(
                    "{} 不能直接注入 Repository，必须通过 Service 访问数据",
                    B::LAYER
                )),
            });
        }
        Ok(None)
    }

    fn source_name(&self) -> &'static str {
        B::LAYER.as_str()
    }
}
