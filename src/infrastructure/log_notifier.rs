use crate::domain::ports::{Notification, NotificationLevel, Notifier};
use log::{error, info};

/// Forwards notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info | NotificationLevel::Success => {
                info!("{}", notification.message)
            }
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}
