//! 监听器层容器

use super::InjectableLayerContainer;
use infrastructure_common::Listener;
use std::sync::Arc;

/// 监听器层容器
pub type ListenerContainer = InjectableLayerContainer<dyn Listener>;

impl InjectableLayerContainer<dyn Listener> {
    /// 订阅指定主题的监听器，按名称排序
    pub fn get_by_topic(&self, topic: &str) -> Vec<Arc<dyn Listener>> {
        self.get_all()
            .into_iter()
            .filter(|l| l.topic() == topic)
            .collect()
    }
}
