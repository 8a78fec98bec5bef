use component_macros::Injectable;
use infrastructure_common::{Entity, Inject, Injectable as _};

pub struct Order;

impl Entity for Order {
    fn entity_name(&self) -> &str {
        "order"
    }

    fn table_name(&self) -> &str {
        "orders"
    }
}

#[derive(Injectable)]
struct Plain {
    #[inject]
    order: Inject<dyn Entity>,
    #[inject()]
    second: Inject<dyn Entity>,
    #[inject(optional)]
    third: infrastructure_common::Inject<dyn Entity>,
    label: &'static str,
}

#[derive(Injectable)]
struct Empty;

fn main() {
    let plain = Plain {
        order: Inject::new(),
        second: Inject::new(),
        third: Inject::new(),
        label: "plain",
    };
    assert_eq!(plain.injection_points().len(), 3);
    assert_eq!(plain.label, "plain");
    assert!(Empty.injection_points().is_empty());
}
