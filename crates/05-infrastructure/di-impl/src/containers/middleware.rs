//! 中间件层容器

use super::InjectableLayerContainer;
use infrastructure_common::Middleware;
use std::sync::Arc;

/// 中间件层容器
pub type MiddlewareContainer = InjectableLayerContainer<dyn Middleware>;

impl InjectableLayerContainer<dyn Middleware> {
    /// 按执行顺序排列的中间件，顺序相同时按名称
    pub fn get_ordered(&self) -> Vec<Arc<dyn Middleware>> {
        let mut all = self.get_all();
        all.sort_by_key(|m| m.order());
        all
    }
}
