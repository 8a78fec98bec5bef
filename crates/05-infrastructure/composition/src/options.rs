//! 启动选项
//!
//! ```toml
//! validate_schedulers = true
//! stop_on_first_error = false
//!
//! [logging]
//! level = "debug"
//! json_format = false
//! ```

use crate::builder::LoggingConfig;
use crate::error::{BootstrapError, BootstrapResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 启动选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapOptions {
    /// 注入完成后校验调度器
    pub validate_schedulers: bool,
    /// 停止时遇到第一个失败立即返回
    pub stop_on_first_error: bool,
    /// 日志配置
    pub logging: Option<LoggingOptions>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            validate_schedulers: true,
            stop_on_first_error: false,
            logging: None,
        }
    }
}

impl BootstrapOptions {
    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> BootstrapResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// `[logging]` 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    pub level: String,
    pub show_target: bool,
    pub show_thread_ids: bool,
    pub show_file: bool,
    pub show_line_number: bool,
    pub json_format: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        let defaults = LoggingConfig::default();
        Self {
            level: defaults.level.to_string(),
            show_target: defaults.show_target,
            show_thread_ids: defaults.show_thread_ids,
            show_file: defaults.show_file,
            show_line_number: defaults.show_line_number,
            json_format: defaults.json_format,
        }
    }
}

impl LoggingOptions {
    /// 转换为日志配置，级别不区分大小写
    pub fn to_config(&self) -> BootstrapResult<LoggingConfig> {
        let level = tracing::Level::from_str(self.level.trim())
            .map_err(|_| BootstrapError::InvalidLogLevel(self.level.clone()))?;
        Ok(LoggingConfig {
            level,
            show_target: self.show_target,
            show_thread_ids: self.show_thread_ids,
            show_file: self.show_file,
            show_line_number: self.show_line_number,
            json_format: self.json_format,
        })
    }
}
