//! Low-stock work queue.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{alerts::errors::AlertQueueError, products::records::ProductUuid};

/// Sending half, held by checkout.
#[derive(Debug, Clone)]
pub struct AlertQueue {
    sender: mpsc::Sender<ProductUuid>,
}

/// Receiving half, drained by the alert worker.
#[derive(Debug)]
pub struct AlertReceiver {
    receiver: mpsc::Receiver<ProductUuid>,
}

impl AlertQueue {
    /// Create a queue holding at most `capacity` pending products (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> (Self, AlertReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));

        (Self { sender }, AlertReceiver { receiver })
    }

    /// Queue a product for a low-stock check without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`AlertQueueError::Full`] when the worker is behind and
    /// [`AlertQueueError::Closed`] when it has stopped.
    pub fn submit(&self, product: ProductUuid) -> Result<(), AlertQueueError> {
        self.sender.try_send(product).map_err(|error| match error {
            TrySendError::Full(_) => AlertQueueError::Full,
            TrySendError::Closed(_) => AlertQueueError::Closed,
        })
    }
}

impl AlertReceiver {
    /// Wait for the next product. `None` once every sender is gone and the queue is empty.
    pub async fn recv(&mut self) -> Option<ProductUuid> {
        self.receiver.recv().await
    }

    /// Take a pending product if there is one.
    pub fn try_recv(&mut self) -> Option<ProductUuid> {
        self.receiver.try_recv().ok()
    }

    /// Stop accepting new submissions; already queued products can still be received.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
