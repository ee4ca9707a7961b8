use crate::domain::ports::{
    Notification, Notifier, RedirectNavigator, WalletWidgetProvider, WidgetSession,
    WidgetSessionBox,
};
use crate::domain::redirect::RedirectForm;
use crate::domain::widget::{WidgetConfig, WidgetOutcome, WidgetPayment};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// How a scripted widget session ends.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedOutcome {
    Succeed { idx: String, token: String },
    Fail(String),
    Cancel,
    /// Never calls back.
    Hang,
}

/// A wallet widget that plays back a fixed outcome.
///
/// Clones share their recorded history, so tests can keep a handle after
/// moving the provider into a dispatcher.
#[derive(Clone)]
pub struct ScriptedWalletProvider {
    outcome: ScriptedOutcome,
    opened: Arc<Mutex<Vec<WidgetConfig>>>,
    shown: Arc<Mutex<Vec<u64>>>,
}

impl ScriptedWalletProvider {
    pub fn new(outcome: ScriptedOutcome) -> Self {
        Self {
            outcome,
            opened: Arc::default(),
            shown: Arc::default(),
        }
    }

    pub fn succeeding(idx: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(ScriptedOutcome::Succeed {
            idx: idx.into(),
            token: token.into(),
        })
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(ScriptedOutcome::Fail(message.into()))
    }

    pub fn cancelling() -> Self {
        Self::new(ScriptedOutcome::Cancel)
    }

    pub fn hanging() -> Self {
        Self::new(ScriptedOutcome::Hang)
    }

    /// Configurations accepted by `open`, in order.
    pub fn opened_configs(&self) -> Vec<WidgetConfig> {
        self.opened
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Minor-unit amounts the widget was shown with, in order.
    pub fn shown_amounts(&self) -> Vec<u64> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl WalletWidgetProvider for ScriptedWalletProvider {
    fn open(&self, config: &WidgetConfig) -> Result<WidgetSessionBox> {
        if let Some(problem) = config.problem() {
            return Err(CheckoutError::InitializationError(problem.to_string()));
        }
        self.opened
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(config.clone());

        Ok(Box::new(ScriptedSession {
            outcome: self.outcome.clone(),
            product_identity: config.product_identity.clone(),
            shown: Arc::clone(&self.shown),
        }))
    }
}

struct ScriptedSession {
    outcome: ScriptedOutcome,
    product_identity: String,
    shown: Arc<Mutex<Vec<u64>>>,
}

#[async_trait]
impl WidgetSession for ScriptedSession {
    async fn show(self: Box<Self>, amount_minor: u64) -> WidgetOutcome {
        let ScriptedSession {
            outcome,
            product_identity,
            shown,
        } = *self;
        shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(amount_minor);

        match outcome {
            ScriptedOutcome::Succeed { idx, token } => {
                let raw = serde_json::json!({
                    "idx": idx,
                    "token": token,
                    "amount": amount_minor,
                    "product_identity": product_identity,
                });
                WidgetOutcome::Success(WidgetPayment {
                    idx,
                    token,
                    amount: amount_minor,
                    raw,
                })
            }
            ScriptedOutcome::Fail(message) => WidgetOutcome::Failure(message),
            ScriptedOutcome::Cancel => WidgetOutcome::Cancelled,
            ScriptedOutcome::Hang => std::future::pending().await,
        }
    }
}

/// A thread-safe navigator that records submitted forms instead of navigating.
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    forms: Arc<RwLock<Vec<RedirectForm>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submitted(&self) -> Vec<RedirectForm> {
        self.forms.read().await.clone()
    }
}

#[async_trait]
impl RedirectNavigator for RecordingNavigator {
    async fn submit(&self, form: &RedirectForm) -> Result<()> {
        let mut forms = self.forms.write().await;
        forms.push(form.clone());
        Ok(())
    }
}

/// Keeps every notification for later inspection.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::widget::PaymentPreference;

    fn config(public_key: &str) -> WidgetConfig {
        WidgetConfig {
            public_key: public_key.to_string(),
            product_identity: "PROD-1".to_string(),
            product_name: "Fresh produce".to_string(),
            product_url: "http://localhost/checkout".to_string(),
            payment_preference: vec![PaymentPreference::Wallet],
        }
    }

    #[tokio::test]
    async fn test_scripted_success_reports_amount() {
        let provider = ScriptedWalletProvider::succeeding("idx-9", "tok-9");
        let session = provider.open(&config("key")).unwrap();

        let WidgetOutcome::Success(payment) = session.show(1999).await else {
            panic!("expected success");
        };
        assert_eq!(payment.idx, "idx-9");
        assert_eq!(payment.amount, 1999);
        assert_eq!(payment.raw["product_identity"], "PROD-1");
        assert_eq!(provider.shown_amounts(), vec![1999]);
    }

    #[test]
    fn test_scripted_provider_rejects_bad_config() {
        let provider = ScriptedWalletProvider::cancelling();
        assert!(matches!(
            provider.open(&config("")),
            Err(CheckoutError::InitializationError(_))
        ));
        assert!(provider.opened_configs().is_empty());
    }

    #[tokio::test]
    async fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        let form = RedirectForm {
            endpoint: "https://pay.example".to_string(),
            fields: vec![("amt".to_string(), "1.00".to_string())],
        };
        navigator.submit(&form).await.unwrap();
        assert_eq!(navigator.submitted().await, vec![form]);
    }
}
