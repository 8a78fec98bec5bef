//! 字段注入器与组合解析器

use di_abstractions::{ContainerSource, DependencyResolver};
use infrastructure_common::{
    ContainerError, ContainerResult, Injectable, Layer, Marker, Resolved, TypeInfo,
};
use tracing::{debug, trace};

/// 按顺序询问多个依赖源的解析器
pub struct CompositeResolver<'a> {
    sources: Vec<&'a dyn ContainerSource>,
}

impl<'a> CompositeResolver<'a> {
    /// 创建解析器，依赖源顺序即优先级
    pub fn new(sources: &[&'a dyn ContainerSource]) -> Self {
        Self {
            sources: sources.to_vec(),
        }
    }

    /// 依赖源名称
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.source_name()).collect()
    }
}

impl DependencyResolver for CompositeResolver<'_> {
    fn resolve(&self, field_type: &TypeInfo, layer: Layer) -> ContainerResult<Resolved> {
        for source in &self.sources {
            if let Some(instance) = source.resolve(field_type, layer)? {
                trace!("{} 由 {} 提供", field_type, source.source_name());
                return Ok(instance);
            }
        }
        Err(ContainerError::not_found(*field_type, "Unknown"))
    }
}

/// 单个组件的注入结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionReport {
    /// 成功写入的字段数
    pub assigned: usize,
    /// 解析失败而跳过的可选字段数
    pub skipped: usize,
}

/// 为单个组件注入依赖
///
/// 必需字段解析失败时立即返回原始错误；可选字段解析失败时保持为空。
pub fn inject_dependencies(
    owner: &str,
    instance: &dyn Injectable,
    resolver: &dyn DependencyResolver,
) -> ContainerResult<InjectionReport> {
    let mut report = InjectionReport::default();

    for point in instance.injection_points() {
        let resolved = match (resolver.resolve(&point.dependency, point.layer), point.marker) {
            (Ok(resolved), _) => resolved,
            (Err(err), Marker::Required) => return Err(err),
            (Err(err), Marker::Optional) => {
                debug!("{}.{} 为可选依赖，跳过: {}", owner, point.field, err);
                report.skipped += 1;
                continue;
            }
        };

        if !point.slot.assign(&resolved) {
            return Err(ContainerError::ImplementationDoesNotImplementInterface {
                interface: point.dependency,
                implementation: format!("{}.{}", owner, point.field),
            });
        }
        trace!("注入 {}.{}: {}", owner, point.field, point.dependency);
        report.assigned += 1;
    }

    Ok(report)
}
