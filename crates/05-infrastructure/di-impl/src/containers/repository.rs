//! 仓储层容器

use super::{inject_registry, EntityContainer, ManagerContainer};
use crate::injector::CompositeResolver;
use crate::registry::{ComponentRecord, TypedRegistry};
use di_abstractions::{ContainerSource, InjectableContainer};
use infrastructure_common::{
    Contract, ContainerError, ContainerResult, Layer, Repository, Resolved, TypeInfo,
};
use std::sync::Arc;
use tracing::info;

/// 仓储层容器
///
/// 仓储可以依赖管理器、配置和实体。
pub struct RepositoryContainer {
    registry: TypedRegistry<dyn Repository>,
    manager: Arc<ManagerContainer>,
    entity: Arc<EntityContainer>,
}

impl RepositoryContainer {
    /// 创建容器
    pub fn new(manager: Arc<ManagerContainer>, entity: Arc<EntityContainer>) -> Self {
        Self {
            registry: TypedRegistry::new(Layer::Repository, |r| r.repository_name()),
            manager,
            entity,
        }
    }

    /// 以接口 `I` 注册仓储
    pub fn register<I>(&self, repository: Arc<I>) -> ContainerResult<()>
    where
        I: ?Sized + Contract<Base = dyn Repository>,
    {
        self.registry.register_instance(repository)
    }

    /// 以显式接口键注册
    pub fn register_by_type(
        &self,
        key: TypeInfo,
        record: ComponentRecord<dyn Repository>,
    ) -> ContainerResult<()> {
        self.registry.register_by_type(key, record)
    }

    /// 以接口 `I` 获取仓储
    pub fn get<I>(&self) -> ContainerResult<Arc<I>>
    where
        I: ?Sized + Contract<Base = dyn Repository>,
    {
        self.registry.get_instance::<I>()
    }

    /// 按接口类型查找
    pub fn get_by_type(&self, key: &TypeInfo) -> Option<Arc<dyn Repository>> {
        self.registry.get_by_type(key)
    }

    /// 所有仓储，按名称排序
    pub fn get_all(&self) -> Vec<Arc<dyn Repository>> {
        self.registry.get_all()
    }

    /// 遍历，回调返回 false 时停止
    pub fn range_items<F>(&self, f: F)
    where
        F: FnMut(&TypeInfo, &Arc<dyn Repository>) -> bool,
    {
        self.registry.range_items(f)
    }
}

impl InjectableContainer for RepositoryContainer {
    fn layer(&self) -> Layer {
        Layer::Repository
    }

    fn inject_all(&self) -> ContainerResult<()> {
        if self.registry.is_injected() {
            return Ok(());
        }
        let resolver = CompositeResolver::new(&[&*self.manager, &*self.entity]);
        inject_registry(&self.registry, &resolver)?;
        self.registry.mark_injected();
        info!("Repository 容器注入完成，共 {} 个仓储", self.registry.count());
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

impl ContainerSource for RepositoryContainer {
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Option<Resolved>> {
        if layer != Layer::Repository {
            return Ok(None);
        }
        match self.registry.get_record(field_type) {
            Some(record) => Ok(Some(record.typed().clone())),
            None => Err(ContainerError::not_found(*field_type, "Repository")),
        }
    }

    fn source_name(&self) -> &'static str {
        "Repository"
    }
}
