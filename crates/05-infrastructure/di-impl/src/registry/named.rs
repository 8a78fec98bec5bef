//! 按名称索引的注册表

use infrastructure_common::{ContainerError, ContainerResult, Layer};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// 名称注册表
///
/// 名称必须非空且唯一，遍历顺序即名称的字典序。
/// `describer` 用于在重名错误中区分已有实例与新实例。
pub struct NamedRegistry<T> {
    layer: Layer,
    namer: fn(&T) -> &str,
    describer: fn(&T) -> String,
    items: RwLock<BTreeMap<String, T>>,
}

impl<T: Clone + Send + Sync> NamedRegistry<T> {
    /// 创建注册表
    pub fn new(layer: Layer, namer: fn(&T) -> &str, describer: fn(&T) -> String) -> Self {
        Self {
            layer,
            namer,
            describer,
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// 注册实例
    pub fn register(&self, item: T) -> ContainerResult<()> {
        let name = (self.namer)(&item).to_string();
        if name.trim().is_empty() {
            return Err(ContainerError::DuplicateRegistration {
                key: "<空名称>".to_string(),
                existing: "保留键".to_string(),
                new: format!("{} 组件", self.layer),
            });
        }

        let mut items = self.items.write();
        if let Some(existing) = items.get(&name) {
            return Err(ContainerError::DuplicateRegistration {
                existing: (self.describer)(existing),
                new: (self.describer)(&item),
                key: name,
            });
        }
        debug!("注册{}组件: {}", self.layer, name);
        items.insert(name, item);
        Ok(())
    }

    /// 按名称查找
    pub fn get_by_name(&self, name: &str) -> ContainerResult<T> {
        self.items
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ContainerError::InstanceNotFound {
                key: name.to_string(),
                layer: self.layer,
            })
    }

    /// 所有实例，按名称排序
    pub fn get_all(&self) -> Vec<T> {
        self.items.read().values().cloned().collect()
    }

    /// 所有名称，已排序
    pub fn get_names(&self) -> Vec<String> {
        self.items.read().keys().cloned().collect()
    }

    /// 实例数量
    pub fn count(&self) -> usize {
        self.items.read().len()
    }

    /// 遍历快照，回调返回 false 时停止
    pub fn range_items<F>(&self, mut f: F)
    where
        F: FnMut(&str, &T) -> bool,
    {
        let snapshot: Vec<(String, T)> = self
            .items
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (name, item) in &snapshot {
            if !f(name, item) {
                break;
            }
        }
    }
}
