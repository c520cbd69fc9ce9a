//! Bounded dispatch queue between producers and file workers
//!
//! Enqueue never blocks. When the queue is full the record is dropped and
//! only the metrics (and the optional overflow callback) notice; the producer
//! gets no signal.

use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::Arc;

/// Default number of queued records
pub const DEFAULT_QUEUE_CAPACITY: usize = 50_000;

/// Callback type for overflow notifications
///
/// Called with the total number of dropped records on the first drop and on
/// every 1000th drop after that.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;

pub struct DispatchQueue {
    sender: RwLock<Option<Sender<LogRecord>>>,
    receiver: Receiver<LogRecord>,
    capacity: usize,
    metrics: Arc<LoggerMetrics>,
    on_overflow: Option<OverflowCallback>,
}

impl DispatchQueue {
    /// Create a queue holding at most `capacity` records.
    ///
    /// `capacity` must be non-zero; a zero-capacity channel would turn every
    /// enqueue into a rendezvous with a worker.
    pub fn new(capacity: usize, metrics: Arc<LoggerMetrics>) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender: RwLock::new(Some(sender)),
            receiver,
            capacity,
            metrics,
            on_overflow: None,
        }
    }

    #[must_use]
    pub fn with_overflow_callback(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Offer a record without blocking.
    ///
    /// Returns `false` if the record was dropped because the queue is full
    /// or already closed.
    pub fn enqueue(&self, record: LogRecord) -> bool {
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            self.metrics.record_dropped();
            return false;
        };

        match sender.try_send(record) {
            Ok(()) => {
                self.metrics.record_enqueued();
                true
            }
            Err(TrySendError::Full(_)) => {
                drop(guard);
                self.drop_on_full();
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_dropped();
                false
            }
        }
    }

    fn drop_on_full(&self) {
        let dropped_before = self.metrics.record_dropped();
        let dropped = dropped_before + 1;
        if dropped_before == 0 || dropped % 1000 == 0 {
            if let Some(ref callback) = self.on_overflow {
                callback(dropped);
            }
        }
    }

    /// A handle workers block on; `recv` fails once the queue is closed and empty
    pub fn receiver(&self) -> Receiver<LogRecord> {
        self.receiver.clone()
    }

    /// Stop admission. Records already queued stay available to receivers.
    pub fn close(&self) {
        drop(self.sender.write().take());
    }

    pub fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
