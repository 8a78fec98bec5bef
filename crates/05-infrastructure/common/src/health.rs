//! 健康检查相关定义

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 健康状态
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "status", content = "data")]
pub enum HealthStatus {
    /// 健康状态
    #[default]
    Healthy,
    /// 降级状态
    Degraded {
        message: String,
        details: Option<BTreeMap<String, String>>,
    },
    /// 不健康状态
    Unhealthy {
        error: String,
        details: Option<BTreeMap<String, String>>,
    },
}

impl HealthStatus {
    /// 创建健康状态
    pub fn healthy() -> Self {
        Self::Healthy
    }

    /// 创建降级状态
    pub fn degraded(message: impl Into<String>) -> Self {
        Self::Degraded {
            message: message.into(),
            details: None,
        }
    }

    /// 创建不健康状态
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self::Unhealthy {
            error: error.into(),
            details: None,
        }
    }

    /// 附加详情
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Healthy => {}
            Self::Degraded { details, .. } | Self::Unhealthy { details, .. } => {
                details
                    .get_or_insert_with(BTreeMap::new)
                    .insert(key.into(), value.into());
            }
        }
        self
    }

    /// 检查是否健康
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// 检查是否降级
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// 检查是否不健康
    pub fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy { .. })
    }

    /// 合并两个状态，取更差的一个
    pub fn worst(self, other: HealthStatus) -> HealthStatus {
        fn severity(status: &HealthStatus) -> u8 {
            match status {
                HealthStatus::Healthy => 0,
                HealthStatus::Degraded { .. } => 1,
                HealthStatus::Unhealthy { .. } => 2,
            }
        }
        if severity(&other) > severity(&self) {
            other
        } else {
            self
        }
    }
}

/// 单个组件的健康检查结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthCheckResult {
    /// 组件名称
    pub component_name: String,
    /// 健康状态
    pub status: HealthStatus,
}

impl HealthCheckResult {
    /// 创建新的健康检查结果
    pub fn new(component_name: impl Into<String>, status: HealthStatus) -> Self {
        Self {
            component_name: component_name.into(),
            status,
        }
    }
}
