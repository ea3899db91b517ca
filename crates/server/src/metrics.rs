use std::sync::atomic::{AtomicU64, Ordering};

/// Relay counters, incremented per request from the webhook pipeline.
///
/// Counters are monotonic and shared across handlers; relaxed ordering is
/// sufficient since they are only read for reporting.
#[derive(Debug, Default)]
pub struct RelayMetrics {
    received: AtomicU64,
    rejected_signature: AtomicU64,
    rejected_payload: AtomicU64,
    delivered: AtomicU64,
    delivery_failed: AtomicU64,
}

/// Point-in-time copy of the relay counters.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    /// Webhook requests received.
    pub received: u64,
    /// Requests rejected at the signature stage (missing header, mismatch,
    /// or unconfigured secret).
    pub rejected_signature: u64,
    /// Requests rejected at payload validation.
    pub rejected_payload: u64,
    /// Events successfully relayed downstream.
    pub delivered: u64,
    /// Downstream deliveries that failed.
    pub delivery_failed: u64,
}

impl RelayMetrics {
    /// Create a zeroed metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected_signature(&self) {
        self.rejected_signature.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected_payload(&self) {
        self.rejected_payload.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_delivery_failed(&self) {
        self.delivery_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            rejected_signature: self.rejected_signature.load(Ordering::Relaxed),
            rejected_payload: self.rejected_payload.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            delivery_failed: self.delivery_failed.load(Ordering::Relaxed),
        }
    }
}
