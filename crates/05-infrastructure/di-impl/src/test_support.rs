//! 单元测试共用组件

use async_trait::async_trait;
use infrastructure_common::{
    ConfigProvider, Contract, Controller, Entity, Inject, Injectable, InjectionPoint, Layer,
    Lifecycle, Manager, Repository, Service,
};
use std::collections::BTreeMap;
use std::sync::Arc;

macro_rules! contract {
    ($iface:ty => $layer:ident, $base:ty) => {
        impl Contract for $iface {
            const LAYER: Layer = Layer::$layer;
            type Base = $base;

            fn upcast(this: Arc<Self>) -> Arc<Self::Base> {
                this
            }
        }
    };
}

// Config

pub trait AppConfig: ConfigProvider {}
contract!(dyn AppConfig => Config, dyn ConfigProvider);

#[derive(Default)]
pub struct StaticConfig {
    pub values: BTreeMap<String, String>,
}

impl StaticConfig {
    pub fn with(key: &str, value: &str) -> Self {
        Self {
            values: BTreeMap::from([(key.to_string(), value.to_string())]),
        }
    }
}

impl ConfigProvider for StaticConfig {
    fn config_provider_name(&self) -> &str {
        "static"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl AppConfig for StaticConfig {}

// Manager

pub trait Clock: Manager {
    fn now(&self) -> u64;
}
contract!(dyn Clock => Manager, dyn Manager);

#[derive(Default)]
pub struct SystemClock {
    pub config: Inject<dyn AppConfig>,
}

impl Injectable for SystemClock {
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        vec![InjectionPoint::optional("config", &self.config)]
    }
}

#[async_trait]
impl Lifecycle for SystemClock {}

impl Manager for SystemClock {
    fn manager_name(&self) -> &str {
        "clock"
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        self.config
            .try_get()
            .and_then(|c| c.get("clock.fixed"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(42)
    }
}

// Entity

pub trait Named: Entity {
    fn display_name(&self) -> String;
}
contract!(dyn Named => Entity, dyn Entity);

pub struct UserEntity;
contract!(UserEntity => Entity, dyn Entity);

impl Entity for UserEntity {
    fn entity_name(&self) -> &str {
        "user"
    }

    fn table_name(&self) -> &str {
        "users"
    }
}

impl Named for UserEntity {
    fn display_name(&self) -> String {
        "用户".to_string()
    }
}

pub struct OrderEntity;
contract!(OrderEntity => Entity, dyn Entity);

impl Entity for OrderEntity {
    fn entity_name(&self) -> &str {
        "order"
    }

    fn table_name(&self) -> &str {
        "orders"
    }
}

impl Named for OrderEntity {
    fn display_name(&self) -> String {
        "订单".to_string()
    }
}

// Repository

pub trait UserRepository: Repository {
    fn find(&self, id: u64) -> Option<String>;
}
contract!(dyn UserRepository => Repository, dyn Repository);

#[derive(Default)]
pub struct UserRepositoryImpl {
    pub clock: Inject<dyn Clock>,
    pub entity: Inject<UserEntity>,
}

impl Injectable for UserRepositoryImpl {
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        vec![
            InjectionPoint::required("clock", &self.clock),
            InjectionPoint::optional("entity", &self.entity),
        ]
    }
}

#[async_trait]
impl Lifecycle for UserRepositoryImpl {}

impl Repository for UserRepositoryImpl {
    fn repository_name(&self) -> &str {
        "user_repository"
    }
}

impl UserRepository for UserRepositoryImpl {
    fn find(&self, id: u64) -> Option<String> {
        (id == 1).then(|| format!("alice@{}", self.clock.now()))
    }
}

// Service

pub trait Greeter: Service {
    fn greet(&self) -> String;
}
contract!(dyn Greeter => Service, dyn Service);

#[derive(Default)]
pub struct GreetingService;

impl Injectable for GreetingService {}

#[async_trait]
impl Lifecycle for GreetingService {}

impl Service for GreetingService {
    fn service_name(&self) -> &str {
        "greeting"
    }
}

impl Greeter for GreetingService {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

pub trait UserService: Service {
    fn describe(&self, id: u64) -> String;
}
contract!(dyn UserService => Service, dyn Service);

#[derive(Default)]
pub struct UserServiceImpl {
    pub repository: Inject<dyn UserRepository>,
    pub greeter: Inject<dyn Greeter>,
}

impl Injectable for UserServiceImpl {
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        vec![
            InjectionPoint::required("repository", &self.repository),
            InjectionPoint::required("greeter", &self.greeter),
        ]
    }
}

#[async_trait]
impl Lifecycle for UserServiceImpl {}

impl Service for UserServiceImpl {
    fn service_name(&self) -> &str {
        "user"
    }
}

impl UserService for UserServiceImpl {
    fn describe(&self, id: u64) -> String {
        match self.repository.find(id) {
            Some(user) => format!("{} {}", self.greeter.greet(), user),
            None => "unknown".to_string(),
        }
    }
}

// Controller

pub trait UserApi: Controller {
    fn show(&self, id: u64) -> String;
}
contract!(dyn UserApi => Controller, dyn Controller);

#[derive(Default)]
pub struct UserController {
    pub users: Inject<dyn UserService>,
    pub clock: Inject<dyn Clock>,
}

impl Injectable for UserController {
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        vec![
            InjectionPoint::required("users", &self.users),
            InjectionPoint::optional("clock", &self.clock),
        ]
    }
}

impl Controller for UserController {
    fn controller_name(&self) -> &str {
        "user_controller"
    }

    fn route(&self) -> &str {
        "/users"
    }
}

impl UserApi for UserController {
    fn show(&self, id: u64) -> String {
        self.users.describe(id)
    }
}

/// 越层访问仓储的控制器
pub trait AuditApi: Controller {}
contract!(dyn AuditApi => Controller, dyn Controller);

#[derive(Default)]
pub struct AuditController {
    pub repository: Inject<dyn UserRepository>,
}

impl Injectable for AuditController {
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        vec![InjectionPoint::required("repository", &self.repository)]
    }
}

impl Controller for AuditController {
    fn controller_name(&self) -> &str {
        "audit_controller"
    }
}

impl AuditApi for AuditController {}
