//! 组件基础接口定义
//!
//! 每个架构层都有一个能力 trait，业务接口以它为父 trait 声明，
//! 例如 `trait UserService: Service`。容器只保存各层的能力 trait 对象，
//! 具体业务接口通过 [`Contract`] 与所属层级绑定。

use crate::health::HealthStatus;
use crate::inject::Injectable;
use crate::lifecycle::Lifecycle;
use crate::metadata::Layer;
use crate::errors::BoxError;
use std::sync::Arc;

/// 配置提供者
pub trait ConfigProvider: Send + Sync + 'static {
    /// 配置提供者名称
    fn config_provider_name(&self) -> &str;

    /// 读取配置项
    fn get(&self, key: &str) -> Option<String>;

    /// 配置项是否存在
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// 实体
pub trait Entity: Send + Sync + 'static {
    /// 实体名称，作为实体容器中的唯一键
    fn entity_name(&self) -> &str;

    /// 对应的表名
    fn table_name(&self) -> &str;

    /// 主键
    fn id(&self) -> String {
        String::new()
    }
}

/// 管理器
pub trait Manager: Injectable + Lifecycle {
    /// 管理器名称
    fn manager_name(&self) -> &str;

    /// 健康检查
    fn health(&self) -> HealthStatus {
        HealthStatus::healthy()
    }
}

/// 仓储
pub trait Repository: Injectable + Lifecycle {
    /// 仓储名称
    fn repository_name(&self) -> &str;
}

/// 服务
pub trait Service: Injectable + Lifecycle {
    /// 服务名称
    fn service_name(&self) -> &str;
}

/// 控制器
pub trait Controller: Injectable {
    /// 控制器名称
    fn controller_name(&self) -> &str;

    /// 路由前缀
    fn route(&self) -> &str {
        "/"
    }
}

/// 中间件
pub trait Middleware: Injectable + Lifecycle {
    /// 中间件名称
    fn middleware_name(&self) -> &str;

    /// 执行顺序，数值越小越先执行
    fn order(&self) -> i32 {
        0
    }
}

/// 定时调度器
pub trait Scheduler: Injectable + Lifecycle {
    /// 调度器名称
    fn scheduler_name(&self) -> &str;

    /// cron 规则，5 段或 6 段
    fn rule(&self) -> &str;

    /// 时区，空字符串表示使用本地时区
    fn timezone(&self) -> &str {
        ""
    }

    /// 调度触发
    fn on_tick(&self, _tick_id: u64) -> Result<(), BoxError> {
        Ok(())
    }
}

/// 事件监听器
pub trait Listener: Injectable + Lifecycle {
    /// 监听器名称
    fn listener_name(&self) -> &str;

    /// 订阅的主题
    fn topic(&self) -> &str {
        ""
    }
}

/// 业务接口与架构层的绑定
///
/// 通常由 `#[contract(service)]` 之类的属性宏为 `dyn Trait` 生成。
/// `Base` 是该层的能力 trait 对象，`upcast` 把具体接口转换为它。
///
/// ```ignore
/// #[contract(service)]
/// pub trait UserService: Service {
///     fn find(&self, id: u64) -> Option<String>;
/// }
/// ```
pub trait Contract: Send + Sync + 'static {
    /// 所属层级
    const LAYER: Layer;

    /// 所属层的能力 trait 对象
    type Base: ?Sized + Send + Sync + 'static;

    /// 转换为层能力 trait 对象
    fn upcast(this: Arc<Self>) -> Arc<Self::Base>;
}

macro_rules! layer_contract {
    ($($base:ident => $layer:ident),* $(,)?) => {
        $(
            impl Contract for dyn $base {
                const LAYER: Layer = Layer::$layer;
                type Base = dyn $base;

                fn upcast(this: Arc<Self>) -> Arc<Self::Base> {
                    this
                }
            }
        )*
    };
}

// 能力 trait 本身也可以作为接口键注册
layer_contract! {
    ConfigProvider => Config,
    Entity => Entity,
    Manager => Manager,
    Repository => Repository,
    Service => Service,
    Controller => Controller,
    Middleware => Middleware,
    Scheduler => Scheduler,
    Listener => Listener,
}
