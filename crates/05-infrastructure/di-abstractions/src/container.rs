//! 层容器抽象接口

use infrastructure_common::{ContainerResult, Layer};
use serde::Serialize;
use std::fmt;

/// 可执行依赖注入的层容器
pub trait InjectableContainer: Send + Sync {
    /// 所属层级
    fn layer(&self) -> Layer;

    /// 为所有已注册组件注入依赖
    ///
    /// 成功后再次调用直接返回，失败时可以修正后重试。
    fn inject_all(&self) -> ContainerResult<()>;

    /// 是否已完成注入
    fn is_injected(&self) -> bool;

    /// 已注册组件数量
    fn count(&self) -> usize;

    /// 按名称排序的组件名称
    fn names(&self) -> Vec<String>;

    /// 容器统计
    fn stats(&self) -> LayerStats {
        LayerStats {
            layer: self.layer(),
            registered_components: self.count(),
            injected: self.is_injected(),
        }
    }
}

/// 单层容器统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerStats {
    /// 层级
    pub layer: Layer,
    /// 已注册组件数量
    pub registered_components: usize,
    /// 是否已完成注入
    pub injected: bool,
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerStats {
    /// 各层统计，按初始化顺序排列
    pub layers: Vec<LayerStats>,
}

impl ContainerStats {
    /// 已注册组件总数
    pub fn registered_components(&self) -> usize {
        self.layers.iter().map(|l| l.registered_components).sum()
    }

    /// 是否所有层都已完成注入
    pub fn all_injected(&self) -> bool {
        self.layers.iter().all(|l| l.injected)
    }

    /// 查询某一层的统计
    pub fn layer(&self, layer: Layer) -> Option<&LayerStats> {
        self.layers.iter().find(|l| l.layer == layer)
    }
}

impl fmt::Display for ContainerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stats) in self.layers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{}={}{}",
                stats.layer,
                stats.registered_components,
                if stats.injected { "" } else { "(未注入)" }
            )?;
        }
        Ok(())
    }
}
