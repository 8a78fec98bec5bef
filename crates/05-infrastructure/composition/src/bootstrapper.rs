//! 启动器
//!
//! 负责按层级顺序完成注入、调度器校验以及组件生命周期的启动和停止。

use crate::builder::BootstrapBuilder;
use crate::containers::ContainerSet;
use crate::error::BootstrapResult;
use crate::options::BootstrapOptions;
use di_abstractions::ContainerStats;
use infrastructure_common::{
    HealthCheckResult, HealthStatus, Layer, Lifecycle, LifecycleError, LifecycleState,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 参与生命周期管理的层级，按启动顺序排列
pub const LIFECYCLE_LAYERS: [Layer; 6] = [
    Layer::Manager,
    Layer::Repository,
    Layer::Service,
    Layer::Middleware,
    Layer::Scheduler,
    Layer::Listener,
];

struct LifecycleMember {
    layer: Layer,
    name: String,
    component: Arc<dyn Lifecycle>,
}

fn member(layer: Layer, name: &str, component: Arc<dyn Lifecycle>) -> LifecycleMember {
    LifecycleMember {
        layer,
        name: name.to_string(),
        component,
    }
}

/// 启动器
pub struct Bootstrapper {
    containers: ContainerSet,
    options: BootstrapOptions,
    state: Mutex<LifecycleState>,
}

impl Bootstrapper {
    /// 创建启动器构建器
    pub fn builder() -> BootstrapBuilder {
        BootstrapBuilder::new()
    }

    pub(crate) fn new(containers: ContainerSet, options: BootstrapOptions) -> Self {
        Self {
            containers,
            options,
            state: Mutex::new(LifecycleState::Uninitialized),
        }
    }

    /// 层容器集合，用于注册组件
    pub fn containers(&self) -> &ContainerSet {
        &self.containers
    }

    /// 启动选项
    pub fn options(&self) -> &BootstrapOptions {
        &self.options
    }

    /// 当前状态
    pub fn state(&self) -> LifecycleState {
        *self.state.lock()
    }

    fn set_state(&self, state: LifecycleState) {
        *self.state.lock() = state;
    }

    /// 自底向上为所有层注入依赖
    ///
    /// 遇到第一个错误立即返回，已完成的层保持注入状态，修正后可以重试。
    pub fn inject_all(&self) -> BootstrapResult<()> {
        info!("开始依赖注入");
        for container in self.containers.all() {
            if let Err(e) = container.inject_all() {
                error!("{} 层注入失败: {}", container.layer(), e);
                self.set_state(LifecycleState::Error);
                return Err(e.into());
            }
        }

        if self.options.validate_schedulers {
            if let Err(e) = self.containers.scheduler().validate_all() {
                self.set_state(LifecycleState::Error);
                return Err(e.into());
            }
        }

        let mut state = self.state.lock();
        if matches!(*state, LifecycleState::Uninitialized | LifecycleState::Error) {
            *state = LifecycleState::Injected;
        }
        drop(state);

        info!("依赖注入完成: {}", self.containers.stats());
        Ok(())
    }

    fn lifecycle_members(&self) -> Vec<LifecycleMember> {
        let c = &self.containers;
        let mut members = Vec::new();
        for layer in LIFECYCLE_LAYERS {
            match layer {
                Layer::Manager => members.extend(
                    c.manager()
                        .get_all()
                        .iter()
                        .map(|m| member(layer, m.manager_name(), m.clone())),
                ),
                Layer::Repository => members.extend(
                    c.repository()
                        .get_all()
                        .iter()
                        .map(|r| member(layer, r.repository_name(), r.clone())),
                ),
                Layer::Service => members.extend(
                    c.service()
                        .get_all()
                        .iter()
                        .map(|s| member(layer, s.service_name(), s.clone())),
                ),
                Layer::Middleware => members.extend(
                    c.middleware()
                        .get_all()
                        .iter()
                        .map(|m| member(layer, m.middleware_name(), m.clone())),
                ),
                Layer::Scheduler => members.extend(
                    c.scheduler()
                        .get_all()
                        .iter()
                        .map(|s| member(layer, s.scheduler_name(), s.clone())),
                ),
                Layer::Listener => members.extend(
                    c.listener()
                        .get_all()
                        .iter()
                        .map(|l| member(layer, l.listener_name(), l.clone())),
                ),
                _ => {}
            }
        }
        members
    }

    /// 检查当前状态并切换到 `next`，两步在同一次加锁内完成
    ///
    /// `skip` 中的状态视为已由其他调用处理，返回 `None`。
    fn claim(&self, skip: &[LifecycleState], next: LifecycleState) -> Option<LifecycleState> {
        let mut state = self.state.lock();
        if skip.contains(&*state) {
            return None;
        }
        Some(std::mem::replace(&mut *state, next))
    }

    /// 启动所有组件
    ///
    /// 尚未注入时先执行 [`inject_all`](Self::inject_all)。任一组件启动失败时，
    /// 已启动的组件按相反顺序停止，状态置为错误。运行中或启动中再次调用直接返回。
    pub async fn start(&self) -> BootstrapResult<()> {
        let previous = match self.claim(
            &[LifecycleState::Running, LifecycleState::Starting],
            LifecycleState::Starting,
        ) {
            Some(previous) => previous,
            None => {
                info!("组件已在启动或运行中，跳过");
                return Ok(());
            }
        };

        if previous != LifecycleState::Injected {
            self.inject_all()?;
        }
        info!("开始启动组件");

        let members = self.lifecycle_members();
        for (index, m) in members.iter().enumerate() {
            if let Err(source) = m.component.on_start().await {
                error!("{} 组件 {} 启动失败: {}", m.layer, m.name, source);
                Self::rollback(&members[..index]).await;
                self.set_state(LifecycleState::Error);
                return Err(LifecycleError::StartFailed {
                    component: m.name.clone(),
                    source,
                }
                .into());
            }
            info!("{} 组件 {} 已启动", m.layer, m.name);
        }

        self.set_state(LifecycleState::Running);
        info!("全部 {} 个组件启动完成", members.len());
        Ok(())
    }

    async fn rollback(started: &[LifecycleMember]) {
        for m in started.iter().rev() {
            if let Err(e) = m.component.on_stop().await {
                warn!("回滚时停止 {} 组件 {} 失败: {}", m.layer, m.name, e);
            }
        }
    }

    /// 按启动的相反顺序停止所有组件
    ///
    /// 默认记录失败并继续，全部执行完后返回第一个失败；
    /// 开启 `stop_on_first_error` 时遇到失败立即返回。未运行时直接返回。
    pub async fn stop(&self) -> BootstrapResult<()> {
        {
            let mut state = self.state.lock();
            if *state != LifecycleState::Running {
                return Ok(());
            }
            *state = LifecycleState::Stopping;
        }
        info!("开始停止组件");

        let mut first_error = None;
        for m in self.lifecycle_members().iter().rev() {
            match m.component.on_stop().await {
                Ok(()) => info!("{} 组件 {} 已停止", m.layer, m.name),
                Err(source) => {
                    error!("{} 组件 {} 停止失败: {}", m.layer, m.name, source);
                    let err = LifecycleError::StopFailed {
                        component: m.name.clone(),
                        source,
                    };
                    if self.options.stop_on_first_error {
                        self.set_state(LifecycleState::Error);
                        return Err(err.into());
                    }
                    first_error.get_or_insert(err);
                }
            }
        }

        self.set_state(LifecycleState::Stopped);
        match first_error {
            Some(err) => Err(err.into()),
            None => {
                info!("全部组件已停止");
                Ok(())
            }
        }
    }

    /// 所有管理器的健康状态
    pub fn health_report(&self) -> Vec<HealthCheckResult> {
        self.containers.manager().health_report()
    }

    /// 整体健康状态，取所有管理器中最差的一个
    pub fn overall_health(&self) -> HealthStatus {
        self.health_report()
            .into_iter()
            .fold(HealthStatus::healthy(), |acc, r| acc.worst(r.status))
    }

    /// 各层统计快照
    pub fn stats(&self) -> ContainerStats {
        self.containers.stats()
    }
}
