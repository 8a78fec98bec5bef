//! 组件宏集成测试

use async_trait::async_trait;
use component_macros::{contract, Injectable};
use infrastructure_common::{
    erase, ConfigProvider, Contract, Entity, Inject, Injectable as _, Layer, Lifecycle, Marker,
    Service, TypeInfo,
};
use std::sync::Arc;

#[contract(config)]
pub trait AppSettings: ConfigProvider {}

pub struct Settings;

impl ConfigProvider for Settings {
    fn config_provider_name(&self) -> &str {
        "settings"
    }

    fn get(&self, key: &str) -> Option<String> {
        (key == "name").then(|| "lite".to_string())
    }
}

impl AppSettings for Settings {}

#[contract(entity)]
pub struct Account;

impl Entity for Account {
    fn entity_name(&self) -> &str {
        "account"
    }

    fn table_name(&self) -> &str {
        "accounts"
    }
}

#[contract(service)]
pub trait Greeter: Service {
    fn greet(&self) -> String;
}

/// 测试服务
#[derive(Injectable, Default)]
pub struct GreeterImpl {
    #[inject]
    settings: Inject<dyn AppSettings>,
    #[inject(optional)]
    account: Inject<Account>,
    greeting: String,
}

#[async_trait]
impl Lifecycle for GreeterImpl {}

impl Service for GreeterImpl {
    fn service_name(&self) -> &str {
        "greeter"
    }
}

impl Greeter for GreeterImpl {
    fn greet(&self) -> String {
        let name = self.settings.get("name").unwrap_or_default();
        format!("{} {}", self.greeting, name)
    }
}

#[test]
fn test_derive_lists_points_in_declaration_order() {
    let service = GreeterImpl::default();
    let points = service.injection_points();

    let fields: Vec<&str> = points.iter().map(|p| p.field).collect();
    assert_eq!(fields, vec!["settings", "account"]);

    assert_eq!(points[0].dependency, TypeInfo::of::<dyn AppSettings>());
    assert_eq!(points[0].layer, Layer::Config);
    assert_eq!(points[0].marker, Marker::Required);

    assert_eq!(points[1].dependency, TypeInfo::of::<Account>());
    assert_eq!(points[1].layer, Layer::Entity);
    assert_eq!(points[1].marker, Marker::Optional);
}

#[test]
fn test_generated_slots_accept_resolved_values() {
    let service = GreeterImpl {
        greeting: "hello".to_string(),
        ..GreeterImpl::default()
    };
    let settings: Arc<dyn AppSettings> = Arc::new(Settings);

    let points = service.injection_points();
    assert!(points[0].slot.assign(&erase(settings)));
    assert!(!points[1].slot.is_filled());
    drop(points);

    assert_eq!(service.greet(), "hello lite");
}

#[test]
fn test_contract_layers() {
    assert_eq!(<dyn AppSettings as Contract>::LAYER, Layer::Config);
    assert_eq!(<Account as Contract>::LAYER, Layer::Entity);
    assert_eq!(<dyn Greeter as Contract>::LAYER, Layer::Service);
}

#[test]
fn test_contract_upcast() {
    let greeter: Arc<dyn Greeter> = Arc::new(GreeterImpl::default());
    let base: Arc<dyn Service> = <dyn Greeter as Contract>::upcast(greeter);
    assert_eq!(base.service_name(), "greeter");

    let entity: Arc<dyn Entity> = <Account as Contract>::upcast(Arc::new(Account));
    assert_eq!(entity.table_name(), "accounts");
}

/// 泛型结构体同样可以派生
#[derive(Injectable)]
pub struct Wrapper<T: Send + Sync + 'static> {
    #[inject]
    account: Inject<Account>,
    value: T,
}

#[test]
fn test_generic_struct_derive() {
    let wrapper = Wrapper {
        account: Inject::with(Arc::new(Account)),
        value: 7u32,
    };
    let points = wrapper.injection_points();
    assert_eq!(points.len(), 1);
    assert!(points[0].slot.is_filled());
    assert_eq!(wrapper.value, 7);
    assert_eq!(wrapper.account.entity_name(), "account");
}
