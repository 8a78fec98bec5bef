//! 错误类型定义

use crate::metadata::{Layer, TypeInfo};
use thiserror::Error;

/// 组件钩子返回的通用错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 容器操作结果
pub type ContainerResult<T> = Result<T, ContainerError>;

/// 生命周期操作结果
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// 容器错误类型
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error(
        "依赖未找到: 无法从 {container_type} 容器解析 {field_type}{}",
        detail(.message)
    )]
    DependencyNotFound {
        field_type: TypeInfo,
        container_type: String,
        message: Option<String>,
    },

    #[error("检测到循环依赖: {}", .residual.join(" -> "))]
    CircularDependency { residual: Vec<String> },

    #[error("找到多个匹配 {interface} 的实例: {}", .candidates.join(", "))]
    AmbiguousMatch {
        interface: TypeInfo,
        candidates: Vec<String>,
    },

    #[error("重复注册: 键 {key} 已被 {existing} 占用，拒绝 {new}")]
    DuplicateRegistration {
        key: String,
        existing: String,
        new: String,
    },

    #[error("实例未找到: {layer} 容器中不存在 {key}")]
    InstanceNotFound { key: String, layer: Layer },

    #[error("接口已注册: {interface} 已由 {existing} 实现，拒绝 {new}")]
    InterfaceAlreadyRegistered {
        interface: TypeInfo,
        existing: String,
        new: String,
    },

    #[error("实现类型 {implementation} 未实现接口 {interface}")]
    ImplementationDoesNotImplementInterface {
        interface: TypeInfo,
        implementation: String,
    },

    #[error("接口未注册: {interface}")]
    InterfaceNotRegistered { interface: TypeInfo },

    #[error("调度器 {scheduler} 校验失败: {reason}")]
    SchedulerValidation { scheduler: String, reason: String },
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

impl ContainerError {
    /// 构造依赖未找到错误
    pub fn not_found(field_type: TypeInfo, container_type: impl Into<String>) -> Self {
        Self::DependencyNotFound {
            field_type,
            container_type: container_type.into(),
            message: None,
        }
    }

    /// 是否为重复注册类错误
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRegistration { .. } | Self::InterfaceAlreadyRegistered { .. }
        )
    }

    /// 是否为依赖未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DependencyNotFound { .. })
    }
}

/// 接入层在设置 ManagerContainer 之前执行注入
///
/// 属于编程错误，由容器以 panic 负载的形式抛出。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{layer} 容器尚未设置 ManagerContainer，必须在 inject_all 之前调用 set_manager_container")]
pub struct ManagerContainerNotSet {
    pub layer: Layer,
}

/// 生命周期错误
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("组件启动失败: {component}: {source}")]
    StartFailed { component: String, source: BoxError },

    #[error("组件停止失败: {component}: {source}")]
    StopFailed { component: String, source: BoxError },
}
