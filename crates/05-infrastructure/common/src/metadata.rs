//! 元数据定义
//!
//! 提供类型标识与架构层级信息，所有容器都以 [`TypeInfo`] 作为接口键

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性与哈希只看 `id`，排序按 (名称, 完整路径, id)，
/// 以便在 `BTreeMap` 中得到稳定的字典序。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型短名称，例如 `UserService`
    pub name: &'static str,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径，例如 `dyn app::service::UserService`
    pub module_path: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 `dyn Trait`
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full = std::any::type_name::<T>();
        Self {
            name: short_name(full),
            id: TypeId::of::<T>(),
            module_path: full,
        }
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

fn short_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    let tail = base.rsplit("::").next().unwrap_or(base);
    tail.trim_start_matches("dyn ").trim()
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.id == other.id {
            return Ordering::Equal;
        }
        self.name
            .cmp(other.name)
            .then_with(|| self.module_path.cmp(other.module_path))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 架构层级
///
/// 依赖只能从高层指向低层或同层（仅 Service 允许同层）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    /// 配置层
    Config,
    /// 实体层
    Entity,
    /// 管理器层
    Manager,
    /// 仓储层
    Repository,
    /// 服务层
    Service,
    /// 控制器层
    Controller,
    /// 中间件层
    Middleware,
    /// 调度器层
    Scheduler,
    /// 监听器层
    Listener,
}

impl Layer {
    /// 按初始化顺序排列的全部层级
    pub const ALL: [Layer; 9] = [
        Layer::Config,
        Layer::Entity,
        Layer::Manager,
        Layer::Repository,
        Layer::Service,
        Layer::Controller,
        Layer::Middleware,
        Layer::Scheduler,
        Layer::Listener,
    ];

    /// 层级名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Config => "Config",
            Layer::Entity => "Entity",
            Layer::Manager => "Manager",
            Layer::Repository => "Repository",
            Layer::Service => "Service",
            Layer::Controller => "Controller",
            Layer::Middleware => "Middleware",
            Layer::Scheduler => "Scheduler",
            Layer::Listener => "Listener",
        }
    }

    /// 层级序号，Config/Entity 在最底层，四个接入层共享最高序号
    pub fn rank(&self) -> u8 {
        match self {
            Layer::Config | Layer::Entity => 0,
            Layer::Manager => 1,
            Layer::Repository => 2,
            Layer::Service => 3,
            Layer::Controller | Layer::Middleware | Layer::Scheduler | Layer::Listener => 4,
        }
    }

    /// 是否为接入层（Controller/Middleware/Scheduler/Listener）
    pub fn is_edge(&self) -> bool {
        self.rank() == 4
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
