#![allow(dead_code)]

use produce_checkout::application::dispatcher::CheckoutDispatcher;
use produce_checkout::config::CheckoutConfig;
use produce_checkout::domain::cart::CartSnapshot;
use produce_checkout::domain::money::Price;
use produce_checkout::domain::payment::CheckoutResult;
use produce_checkout::infrastructure::in_memory::{
    RecordingNavigator, RecordingNotifier, ScriptedWalletProvider,
};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

pub fn cart(items: u32, total: Decimal) -> CartSnapshot {
    CartSnapshot::new(items, Price::new(total).unwrap())
}

/// A dispatcher wired to recording adapters, plus handles to inspect them.
pub struct Harness {
    pub dispatcher: CheckoutDispatcher,
    pub navigator: RecordingNavigator,
    pub notifier: RecordingNotifier,
    pub results: Arc<Mutex<Vec<CheckoutResult>>>,
}

impl Harness {
    pub fn new(config: CheckoutConfig) -> Self {
        let navigator = RecordingNavigator::new();
        let notifier = RecordingNotifier::new();
        let results: Arc<Mutex<Vec<CheckoutResult>>> = Arc::default();
        let sink = Arc::clone(&results);

        let dispatcher = CheckoutDispatcher::new(config, Box::new(navigator.clone()))
            .with_notifier(Box::new(notifier.clone()))
            .on_checkout(Box::new(move |result: &CheckoutResult| {
                sink.lock().unwrap().push(result.clone());
            }));

        Self {
            dispatcher,
            navigator,
            notifier,
            results,
        }
    }

    pub fn with_wallet(mut self, provider: ScriptedWalletProvider) -> Self {
        self.dispatcher = self.dispatcher.with_wallet_provider(Box::new(provider));
        self
    }

    pub fn results(&self) -> Vec<CheckoutResult> {
        self.results.lock().unwrap().clone()
    }
}
