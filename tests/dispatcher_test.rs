use produce_checkout::application::dispatcher::CheckoutDispatcher;
use produce_checkout::config::CheckoutConfig;
use produce_checkout::domain::payment::{CheckoutOutcome, PaymentMethod, SkipReason};
use produce_checkout::error::CheckoutError;
use produce_checkout::infrastructure::in_memory::{RecordingNavigator, ScriptedWalletProvider};
use rust_decimal_macros::dec;
use std::sync::Arc;

mod common;

#[tokio::test]
async fn test_cash_on_delivery_scenario() {
    let harness = common::Harness::new(CheckoutConfig::default());
    let cart = common::cart(3, dec!(450.00));

    let outcome = harness
        .dispatcher
        .complete_checkout(Some(&cart), PaymentMethod::CashOnDelivery)
        .await
        .unwrap();

    let results = harness.results();
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(outcome, CheckoutOutcome::Completed(result.clone()));
    assert_eq!(result.payment_method, PaymentMethod::CashOnDelivery);
    assert_eq!(result.amount.value(), dec!(450.00));
    assert!(result.transaction_id.starts_with("COD-"));
    assert!(result.transaction_id.len() > "COD-".len());
    assert_eq!(result.provider_payload, None);

    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["paymentMethod"], "cod");
    assert_eq!(json["amount"], "450.00");

    assert!(harness.navigator.submitted().await.is_empty());
    assert!(!harness.dispatcher.is_processing());
}

#[tokio::test]
async fn test_empty_cart_is_a_no_op_for_every_method() {
    let provider = ScriptedWalletProvider::succeeding("idx", "token");
    let harness =
        common::Harness::new(CheckoutConfig::default()).with_wallet(provider.clone());
    let empty = common::cart(0, dec!(0));

    for method in PaymentMethod::ALL {
        let outcome = harness
            .dispatcher
            .complete_checkout(Some(&empty), method)
            .await
            .unwrap();
        assert_eq!(outcome, CheckoutOutcome::Skipped(SkipReason::EmptyCart));

        let outcome = harness.dispatcher.complete_checkout(None, method).await.unwrap();
        assert_eq!(outcome, CheckoutOutcome::Skipped(SkipReason::EmptyCart));
    }

    assert!(harness.results().is_empty());
    assert!(provider.opened_configs().is_empty());
    assert!(harness.navigator.submitted().await.is_empty());
    assert!(harness.notifier.notifications().is_empty());
    assert!(!harness.dispatcher.is_processing());
}

#[tokio::test]
async fn test_empty_cart_can_be_rejected() {
    let config = CheckoutConfig {
        reject_empty_cart: true,
        ..CheckoutConfig::default()
    };
    let harness = common::Harness::new(config);

    let result = harness
        .dispatcher
        .complete_checkout(Some(&common::cart(0, dec!(0))), PaymentMethod::CashOnDelivery)
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(harness.results().is_empty());
}

#[tokio::test]
async fn test_second_checkout_is_ignored_while_one_is_in_flight() {
    let provider = ScriptedWalletProvider::hanging();
    let dispatcher = Arc::new(
        CheckoutDispatcher::new(CheckoutConfig::default(), Box::new(RecordingNavigator::new()))
            .with_wallet_provider(Box::new(provider.clone())),
    );
    let mut status = dispatcher.status();
    let cart = common::cart(2, dec!(80.00));

    let pending = {
        let dispatcher = Arc::clone(&dispatcher);
        let cart = cart.clone();
        tokio::spawn(async move {
            dispatcher
                .complete_checkout(Some(&cart), PaymentMethod::WalletWidget)
                .await
        })
    };
    status.wait_for(|s| s.is_processing()).await.unwrap();

    for method in PaymentMethod::ALL {
        let outcome = dispatcher.complete_checkout(Some(&cart), method).await.unwrap();
        assert_eq!(outcome, CheckoutOutcome::Skipped(SkipReason::AlreadyProcessing));
    }
    assert_eq!(provider.opened_configs().len(), 1);

    // Dropping the pending checkout releases the guard.
    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());
    status.wait_for(|s| !s.is_processing()).await.unwrap();

    let outcome = dispatcher
        .complete_checkout(Some(&cart), PaymentMethod::CashOnDelivery)
        .await
        .unwrap();
    assert!(outcome.result().is_some());
}
