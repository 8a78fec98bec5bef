//! 管理器层容器

use super::{inject_registry, ConfigContainer};
use crate::injector::CompositeResolver;
use crate::registry::{ComponentRecord, TypedRegistry};
use di_abstractions::{ContainerSource, InjectableContainer};
use infrastructure_common::{
    Contract, ContainerError, ContainerResult, HealthCheckResult, Layer, Manager, Resolved,
    TypeInfo,
};
use std::sync::Arc;
use tracing::info;

/// 管理器层容器
///
/// 管理器只能依赖配置。作为依赖源时同时代理 Config 层，
/// 所以上层容器只需持有 ManagerContainer。
pub struct ManagerContainer {
    registry: TypedRegistry<dyn Manager>,
    config: Arc<ConfigContainer>,
}

impl ManagerContainer {
    /// 创建容器
    pub fn new(config: Arc<ConfigContainer>) -> Self {
        Self {
            registry: TypedRegistry::new(Layer::Manager, |m| m.manager_name()),
            config,
        }
    }

    /// 以接口 `I` 注册管理器
    pub fn register<I>(&self, manager: Arc<I>) -> ContainerResult<()>
    where
        I: ?Sized + Contract<Base = dyn Manager>,
    {
        self.registry.register_instance(manager)
    }

    /// 以显式接口键注册
    pub fn register_by_type(
        &self,
        key: TypeInfo,
        record: ComponentRecord<dyn Manager>,
    ) -> ContainerResult<()> {
        self.registry.register_by_type(key, record)
    }

    /// 以接口 `I` 获取管理器
    pub fn get<I>(&self) -> ContainerResult<Arc<I>>
    where
        I: ?Sized + Contract<Base = dyn Manager>,
    {
        self.registry.get_instance::<I>()
    }

    /// 按接口类型查找
    pub fn get_by_type(&self, key: &TypeInfo) -> Option<Arc<dyn Manager>> {
        self.registry.get_by_type(key)
    }

    /// 所有管理器，按名称排序
    pub fn get_all(&self) -> Vec<Arc<dyn Manager>> {
        self.registry.get_all()
    }

    /// 遍历，回调返回 false 时停止
    pub fn range_items<F>(&self, f: F)
    where
        F: FnMut(&TypeInfo, &Arc<dyn Manager>) -> bool,
    {
        self.registry.range_items(f)
    }

    /// 配置层容器
    pub fn config_container(&self) -> &Arc<ConfigContainer> {
        &self.config
    }

    /// 所有管理器的健康状态，按名称排序
    pub fn health_report(&self) -> Vec<HealthCheckResult> {
        self.get_all()
            .iter()
            .map(|m| HealthCheckResult::new(m.manager_name(), m.health()))
            .collect()
    }
}

impl InjectableContainer for ManagerContainer {
    fn layer(&self) -> Layer {
        Layer::Manager
    }

    fn inject_all(&self) -> ContainerResult<()> {
        if self.registry.is_injected() {
            return Ok(());
        }
        let resolver = CompositeResolver::new(&[&*self.config]);
        inject_registry(&self.registry, &resolver)?;
        self.registry.mark_injected();
        info!("Manager 容器注入完成，共 {} 个管理器", self.registry.count());
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

impl ContainerSource for ManagerContainer {
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Option<Resolved>> {
        match layer {
            Layer::Config => self.config.resolve(field_type, layer),
            Layer::Manager => match self.registry.get_record(field_type) {
                Some(record) => Ok(Some(record.typed().clone())),
                None => Err(ContainerError::not_found(*field_type, "Manager")),
            },
            _ => Ok(None),
        }
    }

    fn source_name(&self) -> &'static str {
        "Manager"
    }
}
