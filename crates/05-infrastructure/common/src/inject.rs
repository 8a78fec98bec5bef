//! 字段注入点
//!
//! 组件把依赖声明为 [`Inject<T>`] 字段，并通过 [`Injectable::injection_points`]
//! 暴露出来。注入器按声明顺序逐个解析并写入，每个字段只会写入一次。

use crate::component::Contract;
use crate::metadata::{Layer, TypeInfo};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// 类型擦除后的解析结果，内部保存的是 `Arc<I>`
pub type Resolved = Arc<dyn Any + Send + Sync>;

/// 擦除实例类型
pub fn erase<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) -> Resolved {
    Arc::new(instance)
}

/// 从解析结果中还原 `Arc<T>`
pub fn restore<T: ?Sized + Send + Sync + 'static>(resolved: &Resolved) -> Option<Arc<T>> {
    resolved.downcast_ref::<Arc<T>>().cloned()
}

/// 注入标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// 必需依赖，解析失败时中止注入
    Required,
    /// 可选依赖，解析失败时保持为空
    Optional,
}

impl Marker {
    /// 是否为必需依赖
    pub fn is_required(&self) -> bool {
        matches!(self, Marker::Required)
    }
}

/// 可注入的依赖字段
pub struct Inject<T: ?Sized> {
    cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Inject<T> {
    /// 创建空字段
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// 创建已填充的字段，常用于测试
    pub fn with(value: Arc<T>) -> Self {
        Self {
            cell: OnceCell::with_value(value),
        }
    }

    /// 获取依赖，未注入时返回 None
    pub fn try_get(&self) -> Option<&Arc<T>> {
        self.cell.get()
    }

    /// 获取依赖的克隆
    pub fn cloned(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// 是否已注入
    pub fn is_injected(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &std::any::type_name::<T>())
            .field("injected", &self.is_injected())
            .finish()
    }
}

/// # Panics
///
/// 字段尚未注入时解引用会 panic。可选依赖请使用 [`Inject::try_get`]。
impl<T: ?Sized> Deref for Inject<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.cell.get() {
            Some(value) => value,
            None => panic!(
                "依赖字段 {} 在注入完成前被访问",
                std::any::type_name::<T>()
            ),
        }
    }
}

/// 类型擦除的写入端
pub trait InjectionSlot: Send + Sync {
    /// 写入解析结果，类型不匹配时返回 false
    ///
    /// 已写入的字段保持原值。
    fn assign(&self, value: &Resolved) -> bool;

    /// 是否已写入
    fn is_filled(&self) -> bool;
}

impl<T: ?Sized + Send + Sync + 'static> InjectionSlot for Inject<T> {
    fn assign(&self, value: &Resolved) -> bool {
        match restore::<T>(value) {
            Some(instance) => {
                let _ = self.cell.set(instance);
                true
            }
            None => false,
        }
    }

    fn is_filled(&self) -> bool {
        self.is_injected()
    }
}

/// 注入点
pub struct InjectionPoint<'a> {
    /// 字段名
    pub field: &'static str,
    /// 依赖的接口类型
    pub dependency: TypeInfo,
    /// 依赖所属层级
    pub layer: Layer,
    /// 注入标记
    pub marker: Marker,
    /// 写入端
    pub slot: &'a dyn InjectionSlot,
}

impl<'a> InjectionPoint<'a> {
    /// 必需依赖
    pub fn required<T>(field: &'static str, slot: &'a Inject<T>) -> Self
    where
        T: ?Sized + Contract,
    {
        Self::build(field, slot, Marker::Required)
    }

    /// 可选依赖
    pub fn optional<T>(field: &'static str, slot: &'a Inject<T>) -> Self
    where
        T: ?Sized + Contract,
    {
        Self::build(field, slot, Marker::Optional)
    }

    fn build<T>(field: &'static str, slot: &'a Inject<T>, marker: Marker) -> Self
    where
        T: ?Sized + Contract,
    {
        Self {
            field,
            dependency: TypeInfo::of::<T>(),
            layer: T::LAYER,
            marker,
            slot,
        }
    }
}

impl fmt::Debug for InjectionPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("field", &self.field)
            .field("dependency", &self.dependency)
            .field("layer", &self.layer)
            .field("marker", &self.marker)
            .finish()
    }
}

/// 可注入组件
///
/// 没有依赖的组件直接使用默认实现；有依赖的组件一般通过
/// `#[derive(Injectable)]` 生成。
pub trait Injectable: Send + Sync + 'static {
    /// 按声明顺序返回所有注入点
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        Vec::new()
    }
}
