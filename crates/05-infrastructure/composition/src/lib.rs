//! # 基础设施组合层
//!
//! 依赖注入引擎的组合根，持有全部九个层容器，负责把它们连接起来并
//! 驱动整个启动过程。
//!
//! ## 主要功能
//!
//! - **容器集合**: 按层级依赖关系创建并连接各层容器
//! - **依赖注入**: 自底向上执行各层 `inject_all`
//! - **生命周期管理**: 按层级顺序启动组件，按相反顺序停止
//! - **日志初始化**: 开发与生产两种预设
//!
//! ## 基本使用
//!
//! ```rust,ignore
//! use infrastructure_composition::{Bootstrapper, LoggingConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bootstrapper = Bootstrapper::builder()
//!         .with_logging(LoggingConfig::development())
//!         .build()?;
//!
//!     let containers = bootstrapper.containers();
//!     containers.service().register::<dyn UserService>(Arc::new(UserServiceImpl::default()))?;
//!
//!     bootstrapper.start().await?;
//!     bootstrapper.stop().await?;
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod builder;
pub mod containers;
pub mod error;
pub mod options;


pub use bootstrapper::{Bootstrapper, LIFECYCLE_LAYERS};
pub use builder::{BootstrapBuilder, LoggingConfig};
pub use containers::ContainerSet;
pub use error::{BootstrapError, BootstrapResult};
pub use options::{BootstrapOptions, LoggingOptions};
