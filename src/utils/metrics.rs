//! Session Metrics
//!
//! Per-session counters for connects, logins and command exchanges.
//!
//! Uses atomic counters so a shared session can be observed while in use.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Counters owned by one [`crate::Session`]
#[derive(Debug)]
pub struct Metrics {
    /// Successful TCP connects
    pub connections_total: AtomicU64,
    /// Failed connects and connections lost mid-exchange
    pub connection_errors: AtomicU64,
    /// Login exchanges started
    pub logins_total: AtomicU64,
    /// Logins refused by the server
    pub logins_failed: AtomicU64,
    /// Frames written
    pub packets_sent: AtomicU64,
    /// Frames read
    pub packets_received: AtomicU64,
    /// Bytes written, length prefix included
    pub bytes_sent: AtomicU64,
    /// Body bytes read
    pub bytes_received: AtomicU64,
    /// Responses whose request id did not match
    pub id_mismatches: AtomicU64,
    /// Frames that failed to decode
    pub invalid_frames: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            connections_total: AtomicU64::new(0),
            connection_errors: AtomicU64::new(0),
            logins_total: AtomicU64::new(0),
            logins_failed: AtomicU64::new(0),
            packets_sent: AtomicU64::new(0),
            packets_received: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            id_mismatches: AtomicU64::new(0),
            invalid_frames: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn connection_established(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_error(&self) {
        self.connection_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn login_attempt(&self) {
        self.logins_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn login_failed(&self) {
        self.logins_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn packet_sent(&self, byte_count: u64) {
        self.packets_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn packet_received(&self, byte_count: u64) {
        self.packets_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn id_mismatch(&self) {
        self.id_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn invalid_frame(&self) {
        self.invalid_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connection_errors: self.connection_errors.load(Ordering::Relaxed),
            logins_total: self.logins_total.load(Ordering::Relaxed),
            logins_failed: self.logins_failed.load(Ordering::Relaxed),
            packets_sent: self.packets_sent.load(Ordering::Relaxed),
            packets_received: self.packets_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            id_mismatches: self.id_mismatches.load(Ordering::Relaxed),
            invalid_frames: self.invalid_frames.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            connections_total = snapshot.connections_total,
            connection_errors = snapshot.connection_errors,
            logins_total = snapshot.logins_total,
            logins_failed = snapshot.logins_failed,
            packets_sent = snapshot.packets_sent,
            packets_received = snapshot.packets_received,
            bytes_sent = snapshot.bytes_sent,
            bytes_received = snapshot.bytes_received,
            id_mismatches = snapshot.id_mismatches,
            invalid_frames = snapshot.invalid_frames,
            uptime_seconds = snapshot.uptime_seconds,
            "RCON session metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub connections_total: u64,
    pub connection_errors: u64,
    pub logins_total: u64,
    pub logins_failed: u64,
    pub packets_sent: u64,
    pub packets_received: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub id_mismatches: u64,
    pub invalid_frames: u64,
    pub uptime_seconds: u64,
}

/// Timer for measuring exchange duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = self.operation,
            duration_ms = duration.as_millis() as u64,
            "Operation completed"
        );
    }
}
