//! 服务层容器
//!
//! 服务之间允许互相依赖。注入前先按必需的服务依赖建图并做拓扑排序，
//! 被依赖的服务先注入，存在环时整体失败。

use super::{inject_record, LayerComponent, ManagerContainer, RepositoryContainer};
use crate::injector::CompositeResolver;
use crate::registry::{ComponentRecord, TypedRegistry};
use crate::topology::{topological_sort, DependencyGraph};
use di_abstractions::{ContainerSource, InjectableContainer};
use infrastructure_common::{
    Contract, ContainerError, ContainerResult, Layer, Resolved, Service, TypeInfo,
};
use std::sync::Arc;
use tracing::{debug, info};

/// 服务层容器
pub struct ServiceContainer {
    registry: TypedRegistry<dyn Service>,
    manager: Arc<ManagerContainer>,
    repository: Arc<RepositoryContainer>,
}

impl ServiceContainer {
    /// 创建容器
    pub fn new(manager: Arc<ManagerContainer>, repository: Arc<RepositoryContainer>) -> Self {
        Self {
            registry: TypedRegistry::new(Layer::Service, |s| s.service_name()),
            manager,
            repository,
        }
    }

    /// 以接口 `I` 注册服务
    pub fn register<I>(&self, service: Arc<I>) -> ContainerResult<()>
    where
        I: ?Sized + Contract<Base = dyn Service>,
    {
        self.registry.register_instance(service)
    }

    /// 以显式接口键注册
    pub fn register_by_type(
        &self,
        key: TypeInfo,
        record: ComponentRecord<dyn Service>,
    ) -> ContainerResult<()> {
        self.registry.register_by_type(key, record)
    }

    /// 以接口 `I` 获取服务
    pub fn get<I>(&self) -> ContainerResult<Arc<I>>
    where
        I: ?Sized + Contract<Base = dyn Service>,
    {
        self.registry.get_instance::<I>()
    }

    /// 按接口类型查找
    pub fn get_by_type(&self, key: &TypeInfo) -> Option<Arc<dyn Service>> {
        self.registry.get_by_type(key)
    }

    /// 所有服务，按名称排序
    pub fn get_all(&self) -> Vec<Arc<dyn Service>> {
        self.registry.get_all()
    }

    /// 遍历，回调返回 false 时停止
    pub fn range_items<F>(&self, f: F)
    where
        F: FnMut(&TypeInfo, &Arc<dyn Service>) -> bool,
    {
        self.registry.range_items(f)
    }

    /// 管理器层容器
    pub fn manager_container(&self) -> &Arc<ManagerContainer> {
        &self.manager
    }

    /// 服务依赖图，只包含必需的服务依赖
    pub fn dependency_graph(&self) -> ContainerResult<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        for record in self.registry.records() {
            let instance = record.instance().as_ref();
            let mut deps = Vec::new();
            for point in instance.as_injectable().injection_points() {
                if point.layer != Layer::Service || !point.marker.is_required() {
                    continue;
                }
                if !self.registry.contains(&point.dependency) {
                    return Err(ContainerError::DependencyNotFound {
                        field_type: point.dependency,
                        container_type: "Service".to_string(),
                        message: Some(format!(
                            "服务 {} 的字段 {} 依赖未注册的服务",
                            instance.component_name(),
                            point.field
                        )),
                    });
                }
                deps.push(point.dependency);
            }
            graph.insert(*record.interface(), deps);
        }
        Ok(graph)
    }

    /// 服务注入顺序
    pub fn injection_order(&self) -> ContainerResult<Vec<TypeInfo>> {
        topological_sort(&self.dependency_graph()?)
    }
}

impl InjectableContainer for ServiceContainer {
    fn layer(&self) -> Layer {
        Layer::Service
    }

    fn inject_all(&self) -> ContainerResult<()> {
        if self.registry.is_injected() {
            return Ok(());
        }

        let order = self.injection_order()?;
        debug!(
            "Service 注入顺序: {}",
            order.iter().map(|t| t.name).collect::<Vec<_>>().join(" -> ")
        );

        let resolver = CompositeResolver::new(&[self, &*self.manager, &*self.repository]);
        for key in &order {
            if let Some(record) = self.registry.get_record(key) {
                inject_record(&record, &resolver)?;
            }
        }

        self.registry.mark_injected();
        info!("Service 容器注入完成，共 {} 个服务", self.registry.count());
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

impl ContainerSource for ServiceContainer {
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Option<Resolved>> {
        if layer != Layer::Service {
            return Ok(None);
        }
        match self.registry.get_record(field_type) {
            Some(record) => Ok(Some(record.typed().clone())),
            None => Err(ContainerError::not_found(*field_type, "Service")),
        }
    }

    fn source_name(&self) -> &'static str {
        "Service"
    }
}
