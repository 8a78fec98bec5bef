//! 启动器构建器与日志配置

use crate::bootstrapper::Bootstrapper;
use crate::containers::ContainerSet;
use crate::error::{BootstrapError, BootstrapResult};
use crate::options::BootstrapOptions;
use tracing::{debug, info};

/// 启动器构建器
///
/// 使用建造者模式组装 [`Bootstrapper`]
pub struct BootstrapBuilder {
    /// 启动选项
    options: BootstrapOptions,
    /// 日志配置，为空时不初始化日志
    logging_config: Option<LoggingConfig>,
}

impl BootstrapBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            options: BootstrapOptions::default(),
            logging_config: None,
        }
    }

    /// 使用完整的启动选项
    ///
    /// 选项中的 `[logging]` 表会覆盖之前的日志配置。
    pub fn with_options(mut self, options: BootstrapOptions) -> BootstrapResult<Self> {
        if let Some(logging) = &options.logging {
            self.logging_config = Some(logging.to_config()?);
        }
        self.options = options;
        Ok(self)
    }

    /// 从 TOML 文本读取启动选项
    pub fn with_toml(self, content: &str) -> BootstrapResult<Self> {
        let options = BootstrapOptions::from_toml_str(content)?;
        self.with_options(options)
    }

    /// 是否在注入完成后校验调度器
    pub fn validate_schedulers(mut self, enabled: bool) -> Self {
        self.options.validate_schedulers = enabled;
        self
    }

    /// 停止时遇到第一个失败是否立即返回
    pub fn stop_on_first_error(mut self, enabled: bool) -> Self {
        self.options.stop_on_first_error = enabled;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 构建启动器
    pub fn build(self) -> BootstrapResult<Bootstrapper> {
        // 只有在明确配置了日志时才初始化，避免测试中重复初始化
        if let Some(config) = &self.logging_config {
            config.init()?;
        }
        debug!(
            "启动选项: validate_schedulers={}, stop_on_first_error={}",
            self.options.validate_schedulers, self.options.stop_on_first_error
        );
        Ok(Bootstrapper::new(ContainerSet::new(), self.options))
    }
}

impl Default for BootstrapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 初始化全局日志订阅者
    ///
    /// 已经初始化过时返回 [`BootstrapError::Logging`]，不会 panic。
    pub fn init(&self) -> BootstrapResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| BootstrapError::Logging {
            message: e.to_string(),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
