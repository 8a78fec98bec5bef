//! 实体层容器
//!
//! 实体按名称注册。一个实体可以额外声明若干接口视图，
//! 按接口解析时在所有实体中查找，结果必须唯一。

use crate::registry::NamedRegistry;
use di_abstractions::{ContainerSource, InjectableContainer};
use infrastructure_common::{
    erase, restore, Contract, ContainerError, ContainerResult, Entity, Layer, Resolved, TypeInfo,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// 实体注册记录
#[derive(Clone)]
pub struct EntityRecord {
    name: String,
    instance: Arc<dyn Entity>,
    views: BTreeMap<TypeInfo, Resolved>,
}

impl EntityRecord {
    /// 以接口 `E` 创建记录，`E` 本身即为第一个视图
    pub fn new<E>(entity: Arc<E>) -> Self
    where
        E: ?Sized + Contract<Base = dyn Entity>,
    {
        let mut views = BTreeMap::new();
        views.insert(TypeInfo::of::<E>(), erase(entity.clone()));
        let instance = E::upcast(entity);
        Self {
            name: instance.entity_name().to_string(),
            instance,
            views,
        }
    }

    /// 追加接口视图，通常是同一实例的另一个接口
    pub fn with_view<I>(mut self, view: Arc<I>) -> Self
    where
        I: ?Sized + Contract<Base = dyn Entity>,
    {
        self.views.insert(TypeInfo::of::<I>(), erase(view));
        self
    }

    /// 实体名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 实体实例
    pub fn instance(&self) -> &Arc<dyn Entity> {
        &self.instance
    }

    /// 是否提供指定接口
    pub fn implements(&self, key: &TypeInfo) -> bool {
        self.views.contains_key(key)
    }

    /// 已声明的接口
    pub fn interfaces(&self) -> Vec<TypeInfo> {
        self.views.keys().copied().collect()
    }

    /// 表名与接口列表，用于区分同名实体
    pub fn describe(&self) -> String {
        let interfaces: Vec<&str> = self.views.keys().map(|k| k.name).collect();
        format!(
            "表 {} 接口 [{}]",
            self.instance.table_name(),
            interfaces.join(", ")
        )
    }

    /// 以接口 `I` 获取
    pub fn downcast<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.views.get(&TypeInfo::of::<I>()).and_then(restore::<I>)
    }
}

/// 实体层容器
pub struct EntityContainer {
    registry: NamedRegistry<EntityRecord>,
    injected: AtomicBool,
}

impl EntityContainer {
    /// 创建容器
    pub fn new() -> Self {
        Self {
            registry: NamedRegistry::new(Layer::Entity, |r| r.name(), EntityRecord::describe),
            injected: AtomicBool::new(false),
        }
    }

    /// 以接口 `E` 注册实体
    pub fn register<E>(&self, entity: Arc<E>) -> ContainerResult<()>
    where
        E: ?Sized + Contract<Base = dyn Entity>,
    {
        self.registry.register(EntityRecord::new(entity))
    }

    /// 注册带有多个视图的实体
    pub fn register_record(&self, record: EntityRecord) -> ContainerResult<()> {
        self.registry.register(record)
    }

    /// 按名称获取
    pub fn get_by_name(&self, name: &str) -> ContainerResult<Arc<dyn Entity>> {
        self.registry
            .get_by_name(name)
            .map(|record| record.instance().clone())
    }

    /// 按名称获取注册记录
    pub fn get_record(&self, name: &str) -> ContainerResult<EntityRecord> {
        self.registry.get_by_name(name)
    }

    /// 所有提供指定接口的实体记录，按名称排序
    pub fn get_by_type(&self, key: &TypeInfo) -> Vec<EntityRecord> {
        self.registry
            .get_all()
            .into_iter()
            .filter(|record| record.implements(key))
            .collect()
    }

    /// 以接口 `I` 获取唯一实体
    pub fn get<I>(&self) -> ContainerResult<Arc<I>>
    where
        I: ?Sized + Contract<Base = dyn Entity>,
    {
        let key = TypeInfo::of::<I>();
        let resolved = self.find_unique(&key)?;
        restore::<I>(&resolved).ok_or_else(|| ContainerError::ImplementationDoesNotImplementInterface {
            interface: key,
            implementation: "Entity".to_string(),
        })
    }

    /// 所有实体，按名称排序
    pub fn get_all(&self) -> Vec<Arc<dyn Entity>> {
        self.registry
            .get_all()
            .into_iter()
            .map(|record| record.instance().clone())
            .collect()
    }

    /// 遍历，回调返回 false 时停止
    pub fn range_items<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Arc<dyn Entity>) -> bool,
    {
        self.registry.range_items(|name, record| f(name, record.instance()))
    }

    fn find_unique(&self, key: &TypeInfo) -> ContainerResult<Resolved> {
        let mut matches = self.get_by_type(key);
        match matches.len() {
            0 => Err(ContainerError::not_found(*key, "Entity")),
            1 => {
                let record = matches.remove(0);
                record
                    .views
                    .get(key)
                    .cloned()
                    .ok_or_else(|| ContainerError::not_found(*key, "Entity"))
            }
            _ => Err(ContainerError::AmbiguousMatch {
                interface: *key,
                candidates: matches.iter().map(|r| r.name().to_string()).collect(),
            }),
        }
    }
}

impl Default for EntityContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl InjectableContainer for EntityContainer {
    fn layer(&self) -> Layer {
        Layer::Entity
    }

    fn inject_all(&self) -> ContainerResult<()> {
        if !self.injected.swap(true, Ordering::SeqCst) {
            info!("Entity 容器就绪，共 {} 个实体", self.registry.count());
        }
        Ok(())
    }

    fn is_injected(&self) -> bool {
        self.injected.load(Ordering::SeqCst)
    }

    fn count(&self) -> usize {
        self.registry.count()
    }

    fn names(&self) -> Vec<String> {
        self.registry.get_names()
    }
}

impl ContainerSource for EntityContainer {
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Option<Resolved>> {
        if layer != Layer::Entity {
            return Ok(None);
        }
        self.find_unique(field_type).map(Some)
    }

    fn source_name(&self) -> &'static str {
        "Entity"
    }
}
