use super::guard::ProcessingGuard;
use crate::config::CheckoutConfig;
use crate::domain::cart::CartSnapshot;
use crate::domain::payment::{
    CheckoutOutcome, CheckoutResult, CheckoutStatus, PaymentMethod, SkipReason,
};
use crate::domain::ports::{
    Notification, NotifierBox, RedirectNavigatorBox, WalletWidgetProviderBox,
};
use crate::domain::redirect::RedirectForm;
use crate::domain::widget::{WidgetConfig, WidgetOutcome};
use crate::error::{CheckoutError, Result};
use crate::infrastructure::log_notifier::LogNotifier;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use ulid::Generator;

/// Receives every `CheckoutResult` the dispatcher produces.
pub type CheckoutCallback = Box<dyn Fn(&CheckoutResult) + Send + Sync>;

/// Routes a checkout to one of the three payment strategies.
///
/// The dispatcher owns the processing guard: while one checkout is in flight,
/// further calls are ignored. `status()` exposes the guard to observers.
pub struct CheckoutDispatcher {
    config: CheckoutConfig,
    navigator: RedirectNavigatorBox,
    wallet: Option<WalletWidgetProviderBox>,
    notifier: NotifierBox,
    on_checkout: Option<CheckoutCallback>,
    status: Arc<watch::Sender<CheckoutStatus>>,
    ids: Mutex<Generator>,
}

impl CheckoutDispatcher {
    /// Creates a dispatcher without a wallet widget and with log notifications.
    pub fn new(config: CheckoutConfig, navigator: RedirectNavigatorBox) -> Self {
        Self {
            config,
            navigator,
            wallet: None,
            notifier: Box::new(LogNotifier),
            on_checkout: None,
            status: Arc::new(watch::Sender::new(CheckoutStatus::Idle)),
            ids: Mutex::new(Generator::new()),
        }
    }

    /// Injects the wallet widget capability.
    pub fn with_wallet_provider(mut self, wallet: WalletWidgetProviderBox) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_notifier(mut self, notifier: NotifierBox) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn on_checkout(mut self, callback: CheckoutCallback) -> Self {
        self.on_checkout = Some(callback);
        self
    }

    pub fn status(&self) -> watch::Receiver<CheckoutStatus> {
        self.status.subscribe()
    }

    pub fn is_processing(&self) -> bool {
        self.status.borrow().is_processing()
    }

    /// Completes the checkout of `cart` with `method`.
    ///
    /// An empty or missing cart, an unavailable method, or a checkout already
    /// in flight all end in `CheckoutOutcome::Skipped` without touching any
    /// provider. `Completed` results are also passed to the `on_checkout`
    /// callback.
    ///
    /// A hosted redirect keeps the guard for `redirect_release_delay` on the
    /// current Tokio runtime. Polled from any other executor the guard is
    /// released as soon as the form has been submitted.
    pub async fn complete_checkout(
        &self,
        cart: Option<&CartSnapshot>,
        method: PaymentMethod,
    ) -> Result<CheckoutOutcome> {
        let Some(cart) = cart.filter(|c| !c.is_empty()) else {
            if self.config.reject_empty_cart {
                return Err(CheckoutError::EmptyCart);
            }
            debug!("checkout ignored: cart is empty");
            return Ok(CheckoutOutcome::Skipped(SkipReason::EmptyCart));
        };

        if !method.is_available() {
            debug!("checkout ignored: {method} is not available");
            return Ok(CheckoutOutcome::Skipped(SkipReason::MethodUnavailable));
        }

        let Some(guard) = ProcessingGuard::acquire(&self.status, method) else {
            debug!("checkout ignored: another checkout is in flight");
            return Ok(CheckoutOutcome::Skipped(SkipReason::AlreadyProcessing));
        };

        info!(
            "starting {} checkout for {} items, total {}",
            method.label(),
            cart.total_items,
            cart.total_price
        );

        let outcome = match method {
            PaymentMethod::CashOnDelivery => self.cash_on_delivery(cart, guard),
            PaymentMethod::WalletWidget => self.wallet_widget(cart, guard).await,
            PaymentMethod::HostedRedirect => self.hosted_redirect(cart, guard).await,
        };

        match &outcome {
            Ok(CheckoutOutcome::Completed(result)) => {
                self.notifier.notify(Notification::success(format!(
                    "Order placed with {}",
                    result.payment_method.label()
                )));
                if let Some(callback) = &self.on_checkout {
                    callback(result);
                }
            }
            Ok(CheckoutOutcome::Cancelled) => {
                self.notifier
                    .notify(Notification::info("Payment was cancelled"));
            }
            Ok(_) => {}
            Err(e) => {
                warn!("{} checkout failed: {e}", method.label());
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }

        outcome
    }

    fn cash_on_delivery(
        &self,
        cart: &CartSnapshot,
        _guard: ProcessingGuard,
    ) -> Result<CheckoutOutcome> {
        let transaction_id = format!("COD-{}", self.next_id()?);
        Ok(CheckoutOutcome::Completed(CheckoutResult {
            payment_method: PaymentMethod::CashOnDelivery,
            transaction_id,
            amount: cart.total_price,
            provider_payload: None,
        }))
    }

    async fn wallet_widget(
        &self,
        cart: &CartSnapshot,
        _guard: ProcessingGuard,
    ) -> Result<CheckoutOutcome> {
        let wallet = self
            .wallet
            .as_ref()
            .ok_or(CheckoutError::ProviderUnavailable)?;

        let product_identity = match &cart.reference {
            Some(reference) => reference.clone(),
            None => format!("PROD-{}", self.next_id()?),
        };
        let widget_config = WidgetConfig {
            public_key: self.config.wallet_public_key.clone(),
            product_identity,
            product_name: self.config.wallet_product_name.clone(),
            product_url: self.config.wallet_return_url.clone(),
            payment_preference: self.config.wallet_payment_preferences.clone(),
        };
        let amount_minor = cart.total_price.to_minor_units()?;

        let session = wallet.open(&widget_config)?;
        debug!(
            "wallet widget opened for {} ({amount_minor} minor units)",
            widget_config.product_identity
        );

        let outcome = match self.config.widget_timeout() {
            Some(limit) => tokio::time::timeout(limit, session.show(amount_minor))
                .await
                .map_err(|_| CheckoutError::ProviderTimeout)?,
            None => session.show(amount_minor).await,
        };

        match outcome {
            WidgetOutcome::Success(payment) => {
                let mut payload = serde_json::Map::new();
                payload.insert("idx".to_string(), payment.idx.clone().into());
                payload.insert("token".to_string(), payment.token.into());
                payload.insert("amount".to_string(), payment.amount.into());
                payload.insert("raw".to_string(), payment.raw);

                Ok(CheckoutOutcome::Completed(CheckoutResult {
                    payment_method: PaymentMethod::WalletWidget,
                    transaction_id: payment.idx,
                    amount: cart.total_price,
                    provider_payload: Some(payload),
                }))
            }
            WidgetOutcome::Failure(message) => Err(CheckoutError::ProviderError(message)),
            WidgetOutcome::Cancelled => Ok(CheckoutOutcome::Cancelled),
        }
    }

    async fn hosted_redirect(
        &self,
        cart: &CartSnapshot,
        guard: ProcessingGuard,
    ) -> Result<CheckoutOutcome> {
        let product_id = format!("pid-{}", self.next_id()?);
        let form = RedirectForm::payment_request(
            cart.total_price,
            &product_id,
            &self.config.redirect_target(),
        )?;

        self.navigator.submit(&form).await?;
        info!("redirected to hosted payment page for {product_id}");

        // Completion arrives on the success/failure URLs, so the guard is only
        // held long enough to swallow repeated clicks.
        let delay = self.config.redirect_release_delay();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    drop(guard);
                });
            }
            Err(_) => {
                warn!("no tokio runtime to hold the redirect guard, releasing it now");
                drop(guard);
            }
        }

        Ok(CheckoutOutcome::Redirected(form))
    }

    fn next_id(&self) -> Result<ulid::Ulid> {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        ids.generate()
            .map_err(|e| CheckoutError::ValidationError(e.to_string()))
    }
}
