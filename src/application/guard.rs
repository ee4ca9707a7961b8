use crate::domain::payment::{CheckoutStatus, PaymentMethod};
use log::debug;
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the dispatcher in `Processing` until dropped.
///
/// At most one guard exists per status channel at any time.
#[derive(Debug)]
pub struct ProcessingGuard {
    status: Arc<watch::Sender<CheckoutStatus>>,
}

impl ProcessingGuard {
    /// Moves the status from `Idle` to `Processing`, or returns `None` if a
    /// checkout is already in flight.
    pub fn acquire(
        status: &Arc<watch::Sender<CheckoutStatus>>,
        method: PaymentMethod,
    ) -> Option<Self> {
        let acquired = status.send_if_modified(|current| {
            if current.is_processing() {
                false
            } else {
                *current = CheckoutStatus::Processing { method };
                true
            }
        });

        acquired.then(|| Self {
            status: Arc::clone(status),
        })
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.status.send_replace(CheckoutStatus::Idle);
        debug!("checkout guard released");
    }
}
