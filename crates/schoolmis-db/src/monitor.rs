//! Connection state for the document store.
//!
//! The monitor is a circuit breaker with three resting states. `Connected`
//! routes requests to the document store. A failure that means "unreachable"
//! moves it to `Disconnected`, where requests are served from memory. Once
//! `retry_after` has elapsed, the next request claims the probe by moving the
//! state to `Connecting`; the probe result decides which of the two resting
//! states follows. `Disconnecting` is entered only on shutdown.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ReadyState {
    Disconnected = 0,
    Connected = 1,
    Connecting = 2,
    Disconnecting = 3,
}

impl ReadyState {
    pub const ALL: [ReadyState; 4] = [
        ReadyState::Disconnected,
        ReadyState::Connected,
        ReadyState::Connecting,
        ReadyState::Disconnecting,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ReadyState::Connected,
            2 => ReadyState::Connecting,
            3 => ReadyState::Disconnecting,
            _ => ReadyState::Disconnected,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadyState::Disconnected => "disconnected",
            ReadyState::Connected => "connected",
            ReadyState::Connecting => "connecting",
            ReadyState::Disconnecting => "disconnecting",
        }
    }

    pub fn is_connected(self) -> bool {
        self == ReadyState::Connected
    }
}

#[derive(Debug)]
pub struct ConnectionMonitor {
    state: AtomicU8,
    last_failure: Mutex<Option<Instant>>,
    last_error: Mutex<Option<String>>,
    retry_after: Duration,
}

impl ConnectionMonitor {
    pub fn new(retry_after: Duration) -> Self {
        Self {
            state: AtomicU8::new(ReadyState::Disconnected.as_u8()),
            last_failure: Mutex::new(None),
            last_error: Mutex::new(None),
            retry_after,
        }
    }

    pub fn state(&self) -> ReadyState {
        ReadyState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn mark_connected(&self) {
        let previous = self.swap(ReadyState::Connected);
        if previous != ReadyState::Connected {
            info!(previous = previous.label(), "Document store connected");
        }
        *self.last_failure.lock() = None;
    }

    pub fn record_failure(&self, error: &str) {
        let previous = self.swap(ReadyState::Disconnected);
        if previous == ReadyState::Connected {
            warn!(error, "Document store unreachable, serving from memory");
        }
        *self.last_failure.lock() = Some(Instant::now());
        *self.last_error.lock() = Some(error.to_string());
    }

    pub fn mark_disconnecting(&self) {
        self.swap(ReadyState::Disconnecting);
    }

    /// Claims the right to probe the store. At most one caller wins per
    /// cool-down window.
    pub fn begin_probe(&self) -> bool {
        let cooled_down = self
            .last_failure
            .lock()
            .is_none_or(|at| at.elapsed() >= self.retry_after);

        cooled_down
            && self
                .state
                .compare_exchange(
                    ReadyState::Disconnected.as_u8(),
                    ReadyState::Connecting.as_u8(),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
    }

    fn swap(&self, next: ReadyState) -> ReadyState {
        ReadyState::from_u8(self.state.swap(next.as_u8(), Ordering::AcqRel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_state_codes() {
        for state in ReadyState::ALL {
            assert_eq!(ReadyState::from_u8(state.as_u8()), state);
        }
        assert_eq!(ReadyState::Connected.as_u8(), 1);
        assert_eq!(ReadyState::from_u8(42), ReadyState::Disconnected);
    }

    #[test]
    fn test_new_monitor_probes_immediately() {
        let monitor = ConnectionMonitor::new(Duration::from_secs(60));
        assert_eq!(monitor.state(), ReadyState::Disconnected);
        assert!(monitor.begin_probe());
        assert_eq!(monitor.state(), ReadyState::Connecting);
        assert!(!monitor.begin_probe());
    }

    #[test]
    fn test_failure_waits_for_cool_down() {
        let monitor = ConnectionMonitor::new(Duration::from_secs(60));
        monitor.mark_connected();
        monitor.record_failure("server selection timeout");

        assert_eq!(monitor.state(), ReadyState::Disconnected);
        assert_eq!(monitor.last_error().as_deref(), Some("server selection timeout"));
        assert!(!monitor.begin_probe());
    }

    #[test]
    fn test_zero_cool_down_allows_probe_after_failure() {
        let monitor = ConnectionMonitor::new(Duration::ZERO);
        monitor.record_failure("down");
        assert!(monitor.begin_probe());
        monitor.mark_connected();
        assert!(monitor.state().is_connected());
    }

    #[test]
    fn test_disconnecting_blocks_probes() {
        let monitor = ConnectionMonitor::new(Duration::ZERO);
        monitor.mark_disconnecting();
        assert!(!monitor.begin_probe());
        assert_eq!(monitor.state().label(), "disconnecting");
    }
}
