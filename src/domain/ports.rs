use super::redirect::RedirectForm;
use super::widget::{WidgetConfig, WidgetOutcome};
use crate::error::Result;
use async_trait::async_trait;

/// Constructs wallet widget sessions; the capability may be absent at runtime.
pub trait WalletWidgetProvider: Send + Sync {
    /// Fails with `InitializationError` when the widget rejects `config`.
    fn open(&self, config: &WidgetConfig) -> Result<WidgetSessionBox>;
}

/// An opened widget. Showing it consumes the session, so each outcome fires once.
#[async_trait]
pub trait WidgetSession: Send {
    async fn show(self: Box<Self>, amount_minor: u64) -> WidgetOutcome;
}

#[async_trait]
pub trait RedirectNavigator: Send + Sync {
    /// Submits `form` to its endpoint in a new browsing target.
    async fn submit(&self, form: &RedirectForm) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub type WalletWidgetProviderBox = Box<dyn WalletWidgetProvider>;
pub type WidgetSessionBox = Box<dyn WidgetSession>;
pub type RedirectNavigatorBox = Box<dyn RedirectNavigator>;
pub type NotifierBox = Box<dyn Notifier>;
