//! 配置层容器

use crate::registry::{ComponentRecord, TypedRegistry};
use di_abstractions::{ContainerSource, InjectableContainer};
use infrastructure_common::{
    ConfigProvider, Contract, ContainerError, ContainerResult, Layer, Resolved, TypeInfo,
};
use std::sync::Arc;
use tracing::info;

/// 配置层容器
///
/// 配置提供者没有依赖，`inject_all` 只标记完成。
pub struct ConfigContainer {
    registry: TypedRegistry<dyn ConfigProvider>,
}

impl ConfigContainer {
    /// 创建容器
    pub fn new() -> Self {
        Self {
            registry: TypedRegistry::new(Layer::Config, |c| c.config_provider_name()),
        }
    }

    /// 以接口 `I` 注册配置提供者
    pub fn register<I>(&self, provider: Arc<I>) -> ContainerResult<()>
    where
        I: ?Sized + Contract<Base = dyn ConfigProvider>,
    {
        self.registry.register_instance(provider)
    }

    /// 以显式接口键注册
    pub fn register_by_type(
        &self,
        key: TypeInfo,
        record: ComponentRecord<dyn ConfigProvider>,
    ) -> ContainerResult<()> {
        self.registry.register_by_type(key, record)
    }

    /// 以接口 `I` 获取配置提供者
    pub fn get<I>(&self) -> ContainerResult<Arc<I>>
    where
        I: ?Sized + Contract<Base = dyn ConfigProvider>,
    {
        self.registry.get_instance::<I>()
    }

    /// 按接口类型查找
    pub fn get_by_type(&self, key: &TypeInfo) -> Option<Arc<dyn ConfigProvider>> {
        self.registry.get_by_type(key)
    }

    /// 所有配置提供者，按名称排序
    pub fn get_all(&self) -> Vec<Arc<dyn ConfigProvider>> {
        self.registry.get_all()
    }

    /// 依次查询所有配置提供者，返回第一个命中的值
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get_all().iter().find_map(|provider| provider.get(key))
    }

    /// 遍历，回调返回 false 时停止
    pub fn range_items<F>(&self, f: F)
    where
        F: FnMut(&TypeInfo, &Arc<dyn ConfigProvider>) -> bool,
    {
        self.registry.range_items(f)
    }
}

impl Default for ConfigContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl InjectableContainer for ConfigContainer {
    fn layer(&self) -> Layer {
        Layer::Config
    }

    fn inject_all(&self) -> ContainerResult<()> {
        if self.registry.is_injected() {
            return Ok(());
        }
        self.registry.mark_injected();
        info!("Config 容器就绪，共 {} 个配置提供者", self.registry.count());
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

impl ContainerSource for ConfigContainer {
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Option<Resolved>> {
        if layer != Layer::Config {
            return Ok(None);
        }
        match self.registry.get_record(field_type) {
            Some(record) => Ok(Some(record.typed().clone())),
            None => Err(ContainerError::not_found(*field_type, "Config")),
        }
    }

    fn source_name(&self) -> &'static str {
        "Config"
    }
}
