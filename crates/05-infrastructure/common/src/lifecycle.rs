//! 组件生命周期管理

use crate::errors::BoxError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    /// 未初始化
    #[default]
    Uninitialized,
    /// 已完成注入
    Injected,
    /// 启动中
    Starting,
    /// 运行中
    Running,
    /// 停止中
    Stopping,
    /// 已停止
    Stopped,
    /// 错误状态
    Error,
}

impl LifecycleState {
    /// 是否处于运行中
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Uninitialized => "未初始化",
            Self::Injected => "已注入",
            Self::Starting => "启动中",
            Self::Running => "运行中",
            Self::Stopping => "停止中",
            Self::Stopped => "已停止",
            Self::Error => "错误",
        };
        f.write_str(text)
    }
}

/// 组件生命周期钩子
///
/// 启动按层级自底向上执行，停止顺序相反。默认实现什么也不做。
#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// 组件启动
    async fn on_start(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// 组件停止
    async fn on_stop(&self) -> Result<(), BoxError> {
        Ok(())
    }
}
