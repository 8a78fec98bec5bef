//! 依赖解析抽象接口
//!
//! 每个层容器同时也是其他容器的依赖源。注入器按顺序询问依赖源，
//! 第一个给出结果（实例或错误）的依赖源决定该字段的解析结果。

use infrastructure_common::{ContainerResult, Layer, Resolved, TypeInfo};

/// 依赖源
pub trait ContainerSource: Send + Sync {
    /// 尝试解析依赖
    ///
    /// - `Ok(Some(_))` 找到实例
    /// - `Ok(None)` 类型不归本依赖源管辖，交给下一个
    /// - `Err(_)` 归本依赖源管辖但无法提供，解析到此为止
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Option<Resolved>>;

    /// 依赖源名称，用于日志
    fn source_name(&self) -> &'static str;
}

/// 依赖解析器
pub trait DependencyResolver {
    /// 解析依赖，所有依赖源都不管辖时返回 `DependencyNotFound`
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Resolved>;
}
