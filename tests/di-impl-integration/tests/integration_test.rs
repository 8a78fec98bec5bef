//! 层容器集成测试

use async_trait::async_trait;
use component_macros::{contract, Injectable};
use di_impl::{
    register_entity, register_manager, register_repository, register_service, topological_sort,
    ComponentRecord, ConfigContainer, ControllerContainer, DependencyGraph, EntityContainer,
    InjectableContainer, ListenerContainer, ManagerContainer, MiddlewareContainer,
    RepositoryContainer, SchedulerContainer, ServiceContainer,
};
use infrastructure_common::{
    Contract, ContainerError, Controller, Entity, Inject, InjectionPoint, Layer, Lifecycle,
    Listener, Manager, Middleware, Repository, Scheduler, Service, TypeInfo,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn same<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

// ---- 组件 ----

#[contract(entity)]
pub struct UserEntity {
    id: &'static str,
}

impl Entity for UserEntity {
    fn entity_name(&self) -> &str {
        "user-entity"
    }

    fn table_name(&self) -> &str {
        "users"
    }

    fn id(&self) -> String {
        self.id.to_string()
    }
}

#[contract(manager)]
pub trait DbManager: Manager {
    fn dsn(&self) -> &str;
}

#[derive(Injectable)]
pub struct DbManagerImpl;

#[async_trait]
impl Lifecycle for DbManagerImpl {}

impl Manager for DbManagerImpl {
    fn manager_name(&self) -> &str {
        "db-manager"
    }
}

impl DbManager for DbManagerImpl {
    fn dsn(&self) -> &str {
        "memory://users"
    }
}

#[contract(repository)]
pub trait UserRepo: Repository {
    fn table(&self) -> String;
}

#[derive(Injectable, Default)]
pub struct UserRepoImpl {
    #[inject]
    manager: Inject<dyn DbManager>,
    #[inject]
    entity: Inject<UserEntity>,
}

#[async_trait]
impl Lifecycle for UserRepoImpl {}

impl Repository for UserRepoImpl {
    fn repository_name(&self) -> &str {
        "user-repo"
    }
}

impl UserRepo for UserRepoImpl {
    fn table(&self) -> String {
        format!("{}/{}", self.manager.dsn(), self.entity.table_name())
    }
}

#[contract(service)]
pub trait UserService: Service {
    fn table(&self) -> String;
}

#[derive(Injectable, Default)]
pub struct UserServiceImpl {
    #[inject]
    repo: Inject<dyn UserRepo>,
}

#[async_trait]
impl Lifecycle for UserServiceImpl {}

impl Service for UserServiceImpl {
    fn service_name(&self) -> &str {
        "user-service"
    }
}

impl UserService for UserServiceImpl {
    fn table(&self) -> String {
        self.repo.table()
    }
}

struct Layers {
    entity: Arc<EntityContainer>,
    manager: Arc<ManagerContainer>,
    repository: Arc<RepositoryContainer>,
    service: Arc<ServiceContainer>,
}

fn layers() -> Layers {
    let config = Arc::new(ConfigContainer::new());
    let entity = Arc::new(EntityContainer::new());
    let manager = Arc::new(ManagerContainer::new(config));
    let repository = Arc::new(RepositoryContainer::new(manager.clone(), entity.clone()));
    let service = Arc::new(ServiceContainer::new(manager.clone(), repository.clone()));
    Layers {
        entity,
        manager,
        repository,
        service,
    }
}

// ---- Scenario A ----

#[test]
fn test_bottom_up_injection() {
    let l = layers();
    let entity = Arc::new(UserEntity { id: "1" });
    let manager = Arc::new(DbManagerImpl);
    let repo = Arc::new(UserRepoImpl::default());
    let service = Arc::new(UserServiceImpl::default());

    register_entity::<UserEntity>(&l.entity, entity.clone()).unwrap();
    register_manager::<dyn DbManager>(&l.manager, manager.clone()).unwrap();
    register_repository::<dyn UserRepo>(&l.repository, repo.clone()).unwrap();
    register_service::<dyn UserService>(&l.service, service.clone()).unwrap();

    l.entity.inject_all().unwrap();
    l.manager.inject_all().unwrap();
    l.repository.inject_all().unwrap();
    l.service.inject_all().unwrap();

    assert!(same(service.repo.try_get().unwrap(), &repo));
    assert!(same(repo.manager.try_get().unwrap(), &manager));
    assert!(same(repo.entity.try_get().unwrap(), &entity));
    assert_eq!(repo.entity.id(), "1");
    assert_eq!(service.table(), "memory://users/users");
}

// ---- Scenario B ----

#[contract(service)]
pub trait Alpha: Service {}

#[contract(service)]
pub trait Beta: Service {
    fn alpha_injected(&self) -> bool;
}

#[derive(Injectable)]
pub struct AlphaImpl;

#[async_trait]
impl Lifecycle for AlphaImpl {}

impl Service for AlphaImpl {
    fn service_name(&self) -> &str {
        "a"
    }
}

impl Alpha for AlphaImpl {}

#[derive(Injectable, Default)]
pub struct BetaImpl {
    #[inject]
    alpha: Inject<dyn Alpha>,
}

#[async_trait]
impl Lifecycle for BetaImpl {}

impl Service for BetaImpl {
    fn service_name(&self) -> &str {
        "b"
    }
}

impl Beta for BetaImpl {
    fn alpha_injected(&self) -> bool {
        self.alpha.is_injected()
    }
}

#[test]
fn test_service_order_independent_of_registration() {
    for alpha_first in [true, false] {
        let l = layers();
        let beta = Arc::new(BetaImpl::default());
        if alpha_first {
            l.service.register::<dyn Alpha>(Arc::new(AlphaImpl)).unwrap();
            l.service.register::<dyn Beta>(beta.clone()).unwrap();
        } else {
            l.service.register::<dyn Beta>(beta.clone()).unwrap();
            l.service.register::<dyn Alpha>(Arc::new(AlphaImpl)).unwrap();
        }

        let order = l.service.injection_order().unwrap();
        assert_eq!(
            order,
            vec![TypeInfo::of::<dyn Alpha>(), TypeInfo::of::<dyn Beta>()]
        );
        l.service.inject_all().unwrap();
        assert!(beta.alpha_injected());
    }
}

// ---- 注册唯一性 ----

#[test]
fn test_duplicate_registration_keeps_first() {
    let l = layers();
    let first = Arc::new(DbManagerImpl);
    l.manager.register::<dyn DbManager>(first.clone()).unwrap();

    let err = l.manager.register::<dyn DbManager>(Arc::new(DbManagerImpl)).unwrap_err();
    assert!(err.is_duplicate());
    assert!(matches!(err, ContainerError::InterfaceAlreadyRegistered { .. }));

    let stored = l.manager.get::<dyn DbManager>().unwrap();
    assert!(same(&stored, &first));
    assert_eq!(l.manager.count(), 1);
}

// ---- 类型安全 ----

#[test]
fn test_mismatched_record_is_never_stored() {
    let l = layers();
    let record = ComponentRecord::new::<dyn Alpha>(Arc::new(AlphaImpl));

    let err = l
        .service
        .register_by_type(TypeInfo::of::<dyn Beta>(), record)
        .unwrap_err();
    assert!(matches!(
        err,
        ContainerError::ImplementationDoesNotImplementInterface { .. }
    ));
    assert!(l.service.get_by_type(&TypeInfo::of::<dyn Beta>()).is_none());
    assert_eq!(l.service.count(), 0);

    let record = ComponentRecord::new::<dyn Alpha>(Arc::new(AlphaImpl));
    l.service
        .register_by_type(TypeInfo::of::<dyn Alpha>(), record)
        .unwrap();
    assert!(l.service.get::<dyn Alpha>().is_ok());
}

// ---- 幂等注入 ----

#[contract(repository)]
pub trait Counted: Repository {}

/// 统计注入点被读取的次数
#[derive(Default)]
pub struct CountedRepo {
    reads: AtomicUsize,
    db: Inject<dyn DbManager>,
}

impl infrastructure_common::Injectable for CountedRepo {
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        vec![InjectionPoint::required("db", &self.db)]
    }
}

#[async_trait]
impl Lifecycle for CountedRepo {}

impl Repository for CountedRepo {
    fn repository_name(&self) -> &str {
        "counted"
    }
}

impl Counted for CountedRepo {}

#[test]
fn test_inject_all_is_idempotent() {
    let l = layers();
    let counted = Arc::new(CountedRepo::default());
    l.repository.register::<dyn Counted>(counted.clone()).unwrap();
    l.manager.register::<dyn DbManager>(Arc::new(DbManagerImpl)).unwrap();
    l.manager.inject_all().unwrap();

    for _ in 0..3 {
        l.repository.inject_all().unwrap();
    }
    assert_eq!(counted.reads.load(Ordering::SeqCst), 1);
    assert!(counted.db.is_injected());
    assert!(l.repository.is_injected());
}

#[test]
fn test_failed_injection_can_be_retried() {
    let l = layers();
    let counted = Arc::new(CountedRepo::default());
    l.repository.register::<dyn Counted>(counted.clone()).unwrap();

    assert!(l.repository.inject_all().unwrap_err().is_not_found());
    assert!(!l.repository.is_injected());

    l.manager.register::<dyn DbManager>(Arc::new(DbManagerImpl)).unwrap();
    l.repository.inject_all().unwrap();
    assert_eq!(counted.reads.load(Ordering::SeqCst), 2);
}

// ---- 拓扑排序 ----

fn info<T: ?Sized + 'static>() -> TypeInfo {
    TypeInfo::of::<T>()
}

struct A;
struct B;
struct C;

#[test]
fn test_topological_order_diamond() {
    let graph = DependencyGraph::from([
        (info::<C>(), vec![info::<A>(), info::<B>()]),
        (info::<B>(), vec![info::<A>()]),
        (info::<A>(), vec![]),
    ]);
    let order = topological_sort(&graph).unwrap();
    assert_eq!(order, vec![info::<A>(), info::<B>(), info::<C>()]);
}

#[test]
fn test_two_node_cycle() {
    let graph = DependencyGraph::from([
        (info::<A>(), vec![info::<B>()]),
        (info::<B>(), vec![info::<A>()]),
    ]);
    match topological_sort(&graph).unwrap_err() {
        ContainerError::CircularDependency { residual } => {
            assert!(!residual.is_empty());
            assert_eq!(residual, vec!["A", "B"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ---- 层级隔离 ----

/// 试图越层访问仓储的接入层组件
#[derive(Injectable, Default)]
pub struct Intruder {
    #[inject]
    repo: Inject<dyn UserRepo>,
}

#[async_trait]
impl Lifecycle for Intruder {}

#[contract(controller)]
pub trait IntruderApi: Controller {}

#[contract(middleware)]
pub trait IntruderFilter: Middleware {}

#[contract(scheduler)]
pub trait IntruderJob: Scheduler {}

#[contract(listener)]
pub trait IntruderHook: Listener {}

impl Controller for Intruder {
    fn controller_name(&self) -> &str {
        "intruder"
    }
}

impl Middleware for Intruder {
    fn middleware_name(&self) -> &str {
        "intruder"
    }
}

impl Scheduler for Intruder {
    fn scheduler_name(&self) -> &str {
        "intruder"
    }

    fn rule(&self) -> &str {
        "* * * * *"
    }
}

impl Listener for Intruder {
    fn listener_name(&self) -> &str {
        "intruder"
    }
}

impl IntruderApi for Intruder {}
impl IntruderFilter for Intruder {}
impl IntruderJob for Intruder {}
impl IntruderHook for Intruder {}

fn assert_repository_rejected(result: Result<(), ContainerError>) {
    match result.unwrap_err() {
        ContainerError::DependencyNotFound { container_type, .. } => {
            assert_eq!(container_type, "Repository");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_edge_layers_cannot_inject_repository() {
    let l = layers();
    l.manager.register::<dyn DbManager>(Arc::new(DbManagerImpl)).unwrap();
    l.repository
        .register::<dyn UserRepo>(Arc::new(UserRepoImpl::default()))
        .unwrap();
    register_entity::<UserEntity>(&l.entity, Arc::new(UserEntity { id: "1" })).unwrap();
    l.manager.inject_all().unwrap();
    l.repository.inject_all().unwrap();
    l.service.inject_all().unwrap();

    let controllers = ControllerContainer::new(l.service.clone());
    controllers.set_manager_container(l.manager.clone());
    controllers
        .register::<dyn IntruderApi>(Arc::new(Intruder::default()))
        .unwrap();
    assert_repository_rejected(controllers.inject_all());

    let middleware = MiddlewareContainer::new(l.service.clone());
    middleware.set_manager_container(l.manager.clone());
    middleware
        .register::<dyn IntruderFilter>(Arc::new(Intruder::default()))
        .unwrap();
    assert_repository_rejected(middleware.inject_all());

    let schedulers = SchedulerContainer::new(l.service.clone());
    schedulers.set_manager_container(l.manager.clone());
    schedulers
        .register::<dyn IntruderJob>(Arc::new(Intruder::default()))
        .unwrap();
    assert_repository_rejected(schedulers.inject_all());

    let listeners = ListenerContainer::new(l.service.clone());
    listeners.set_manager_container(l.manager.clone());
    listeners
        .register::<dyn IntruderHook>(Arc::new(Intruder::default()))
        .unwrap();
    assert_repository_rejected(listeners.inject_all());
}

// ---- 可选依赖 ----

#[contract(service)]
pub trait Reporter: Service {}

#[derive(Injectable, Default)]
pub struct ReporterImpl {
    #[inject(optional)]
    alpha: Inject<dyn Alpha>,
    #[inject(optional)]
    db: Inject<dyn DbManager>,
}

#[async_trait]
impl Lifecycle for ReporterImpl {}

impl Service for ReporterImpl {
    fn service_name(&self) -> &str {
        "reporter"
    }
}

impl Reporter for ReporterImpl {}

#[test]
fn test_optional_dependencies_stay_empty() {
    let l = layers();
    let reporter = Arc::new(ReporterImpl::default());
    l.service.register::<dyn Reporter>(reporter.clone()).unwrap();

    l.manager.inject_all().unwrap();
    l.repository.inject_all().unwrap();
    l.service.inject_all().unwrap();

    assert!(!reporter.alpha.is_injected());
    assert!(reporter.db.try_get().is_none());
}

// ---- Contract 元数据 ----

#[test]
fn test_contract_layers() {
    assert_eq!(<dyn DbManager as Contract>::LAYER, Layer::Manager);
    assert_eq!(<UserEntity as Contract>::LAYER, Layer::Entity);
    assert_eq!(<dyn IntruderHook as Contract>::LAYER, Layer::Listener);
}
