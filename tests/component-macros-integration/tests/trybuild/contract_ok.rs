use async_trait::async_trait;
use component_macros::contract;
use infrastructure_common::{Contract, Injectable, Layer, Lifecycle, Listener};
use std::sync::Arc;

#[contract(listener)]
pub trait OrderCreated: Listener {
    fn handled(&self) -> usize;
}

pub struct Handler;

impl Injectable for Handler {}

#[async_trait]
impl Lifecycle for Handler {}

impl Listener for Handler {
    fn listener_name(&self) -> &str {
        "order_created"
    }
}

impl OrderCreated for Handler {
    fn handled(&self) -> usize {
        0
    }
}

fn main() {
    assert_eq!(<dyn OrderCreated as Contract>::LAYER, Layer::Listener);
    let handler: Arc<dyn OrderCreated> = Arc::new(Handler);
    let base = <dyn OrderCreated as Contract>::upcast(handler);
    assert_eq!(base.listener_name(), "order_created");
}
