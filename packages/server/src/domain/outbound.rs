//! Per-connection outbound queue.
//!
//! The broker holds an [`Outbound`] for every subscriber and pushes encoded
//! frames into it without waiting. The connection's writer task drains the
//! paired [`OutboundReceiver`]. When a push fails the broker evicts the
//! handle, which makes the receiver report end-of-stream and wakes anything
//! waiting on [`OutboundReceiver::evicted`], so a writer blocked on a stalled
//! socket stops too and the connection runs its normal disconnect path.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;
use tokio::sync::{Notify, mpsc};

/// Default number of frames buffered per subscriber.
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;

/// Why a frame could not be queued for a subscriber.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("outbound queue is full")]
    Full,
    #[error("outbound queue is closed")]
    Closed,
}

#[derive(Debug, Default)]
struct Eviction {
    flagged: AtomicBool,
    notify: Notify,
}

/// Sending half of a connection's outbound queue.
#[derive(Debug, Clone)]
pub struct Outbound {
    sender: mpsc::Sender<String>,
    eviction: Arc<Eviction>,
}

/// Receiving half of a connection's outbound queue.
#[derive(Debug)]
pub struct OutboundReceiver {
    receiver: mpsc::Receiver<String>,
    eviction: Arc<Eviction>,
}

impl Outbound {
    /// Create a bounded outbound queue. A capacity of zero is raised to one.
    pub fn channel(capacity: usize) -> (Outbound, OutboundReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let eviction = Arc::new(Eviction::default());
        (
            Outbound {
                sender,
                eviction: eviction.clone(),
            },
            OutboundReceiver { receiver, eviction },
        )
    }

    /// Queue a frame without waiting.
    pub fn try_deliver(&self, frame: String) -> Result<(), DeliveryError> {
        self.sender.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Full,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    /// Tell the receiving side to stop.
    pub fn evict(&self) {
        self.eviction.flagged.store(true, Ordering::Release);
        self.eviction.notify.notify_one();
    }
}

impl OutboundReceiver {
    /// Next queued frame, or `None` once every sender is gone or the
    /// subscriber has been evicted.
    pub async fn recv(&mut self) -> Option<String> {
        if self.is_evicted() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.eviction.notify.notified() => None,
            frame = self.receiver.recv() => frame,
        }
    }

    /// Resolves once the subscriber has been evicted.
    ///
    /// Lets the writer abandon a socket write that never completes.
    pub async fn evicted(&self) {
        if self.is_evicted() {
            return;
        }
        self.eviction.notify.notified().await;
    }

    pub fn is_evicted(&self) -> bool {
        self.eviction.flagged.load(Ordering::Acquire)
    }
}
