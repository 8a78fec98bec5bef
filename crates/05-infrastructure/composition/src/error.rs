//! 启动错误

use infrastructure_common::{ContainerError, LifecycleError};
use thiserror::Error;

/// 启动过程错误
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("容器注入失败: {0}")]
    Container(#[from] ContainerError),

    #[error("生命周期钩子失败: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("启动选项解析失败: {0}")]
    Options(#[from] toml::de::Error),

    #[error("无效的日志级别: {0}")]
    InvalidLogLevel(String),

    #[error("日志初始化失败: {message}")]
    Logging { message: String },
}

/// 启动结果
pub type BootstrapResult<T> = Result<T, BootstrapError>;
