//! 按接口类型索引的注册表

use infrastructure_common::{
    erase, restore, Contract, ContainerError, ContainerResult, Layer, Resolved, TypeInfo,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// 取组件名称的函数
pub type NameFn<B> = fn(&B) -> &str;

/// 注册记录
///
/// 同时保存层能力 trait 对象和类型擦除后的原始接口对象，
/// 前者用于遍历与生命周期，后者用于注入到 `Inject<I>` 字段。
pub struct ComponentRecord<B: ?Sized> {
    interface: TypeInfo,
    instance: Arc<B>,
    typed: Resolved,
}

impl<B: ?Sized + Send + Sync + 'static> ComponentRecord<B> {
    /// 以接口 `I` 创建注册记录
    pub fn new<I>(instance: Arc<I>) -> Self
    where
        I: ?Sized + Contract<Base = B>,
    {
        Self {
            interface: TypeInfo::of::<I>(),
            typed: erase(instance.clone()),
            instance: I::upcast(instance),
        }
    }

    /// 记录对应的接口类型
    pub fn interface(&self) -> &TypeInfo {
        &self.interface
    }

    /// 层能力 trait 对象
    pub fn instance(&self) -> &Arc<B> {
        &self.instance
    }

    /// 类型擦除后的接口对象
    pub fn typed(&self) -> &Resolved {
        &self.typed
    }

    /// 还原为接口 `I`
    pub fn downcast<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        restore::<I>(&self.typed)
    }
}

impl<B: ?Sized> Clone for ComponentRecord<B> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface,
            instance: self.instance.clone(),
            typed: self.typed.clone(),
        }
    }
}

struct State<B: ?Sized> {
    items: BTreeMap<TypeInfo, ComponentRecord<B>>,
    injected: bool,
}

/// 类型注册表
///
/// 每个接口类型最多对应一个实例，读多写少，使用读写锁保护。
pub struct TypedRegistry<B: ?Sized> {
    layer: Layer,
    namer: NameFn<B>,
    state: RwLock<State<B>>,
}

impl<B: ?Sized + Send + Sync + 'static> TypedRegistry<B> {
    /// 创建注册表
    pub fn new(layer: Layer, namer: NameFn<B>) -> Self {
        Self {
            layer,
            namer,
            state: RwLock::new(State {
                items: BTreeMap::new(),
                injected: false,
            }),
        }
    }

    /// 所属层级
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// 组件名称
    pub fn name_of(&self, instance: &B) -> String {
        (self.namer)(instance).to_string()
    }

    /// 以接口 `I` 注册实例
    pub fn register_instance<I>(&self, instance: Arc<I>) -> ContainerResult<()>
    where
        I: ?Sized + Contract<Base = B>,
    {
        self.register_by_type(TypeInfo::of::<I>(), ComponentRecord::new(instance))
    }

    /// 以显式接口键注册
    ///
    /// 记录的接口必须与键一致，否则视为实现未满足接口。
    pub fn register_by_type(&self, key: TypeInfo, record: ComponentRecord<B>) -> ContainerResult<()> {
        let name = self.name_of(record.instance());
        if record.interface != key {
            return Err(ContainerError::ImplementationDoesNotImplementInterface {
                interface: key,
                implementation: format!("{} ({})", name, record.interface),
            });
        }

        let mut state = self.state.write();
        if let Some(existing) = state.items.get(&key) {
            return Err(ContainerError::InterfaceAlreadyRegistered {
                interface: key,
                existing: self.name_of(existing.instance()),
                new: name,
            });
        }
        if state.injected {
            warn!("{} 容器注入完成后注册组件 {}，该组件不会被自动注入", self.layer, name);
        }
        state.items.insert(key, record);
        debug!("注册{}组件: {} -> {}", self.layer, key, name);
        Ok(())
    }

    /// 按接口类型查找
    pub fn get_by_type(&self, key: &TypeInfo) -> Option<Arc<B>> {
        self.state
            .read()
            .items
            .get(key)
            .map(|record| record.instance().clone())
    }

    /// 按接口类型查找，未注册时返回错误
    pub fn require_by_type(&self, key: &TypeInfo) -> ContainerResult<Arc<B>> {
        self.get_by_type(key)
            .ok_or(ContainerError::InterfaceNotRegistered { interface: *key })
    }

    /// 按接口类型查找注册记录
    pub fn get_record(&self, key: &TypeInfo) -> Option<ComponentRecord<B>> {
        self.state.read().items.get(key).cloned()
    }

    /// 以接口 `I` 获取实例
    pub fn get_instance<I>(&self) -> ContainerResult<Arc<I>>
    where
        I: ?Sized + Contract<Base = B>,
    {
        let key = TypeInfo::of::<I>();
        self.get_record(&key)
            .and_then(|record| record.downcast::<I>())
            .ok_or_else(|| ContainerError::InstanceNotFound {
                key: key.to_string(),
                layer: self.layer,
            })
    }

    /// 是否已注册接口
    pub fn contains(&self, key: &TypeInfo) -> bool {
        self.state.read().items.contains_key(key)
    }

    /// 所有实例，按组件名称排序
    pub fn get_all(&self) -> Vec<Arc<B>> {
        let mut all: Vec<Arc<B>> = self
            .state
            .read()
            .items
            .values()
            .map(|record| record.instance().clone())
            .collect();
        all.sort_by(|a, b| (self.namer)(a.as_ref()).cmp((self.namer)(b.as_ref())));
        all
    }

    /// 所有组件名称，已排序
    pub fn get_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .read()
            .items
            .values()
            .map(|record| self.name_of(record.instance()))
            .collect();
        names.sort();
        names
    }

    /// 注册记录快照，按接口键排序
    pub fn records(&self) -> Vec<ComponentRecord<B>> {
        self.state.read().items.values().cloned().collect()
    }

    /// 组件数量
    pub fn count(&self) -> usize {
        self.state.read().items.len()
    }

    /// 遍历快照，回调返回 false 时停止
    pub fn range_items<F>(&self, mut f: F)
    where
        F: FnMut(&TypeInfo, &Arc<B>) -> bool,
    {
        for record in self.records() {
            if !f(record.interface(), record.instance()) {
                break;
            }
        }
    }

    /// 是否已完成注入
    pub fn is_injected(&self) -> bool {
        self.state.read().injected
    }

    pub(crate) fn mark_injected(&self) {
        self.state.write().injected = true;
    }
}
