//! 控制器层容器

use super::InjectableLayerContainer;
use infrastructure_common::Controller;
use std::sync::Arc;

/// 控制器层容器
pub type ControllerContainer = InjectableLayerContainer<dyn Controller>;

impl InjectableLayerContainer<dyn Controller> {
    /// 按路由查找控制器
    pub fn get_by_route(&self, route: &str) -> Option<Arc<dyn Controller>> {
        self.get_all().into_iter().find(|c| c.route() == route)
    }
}
