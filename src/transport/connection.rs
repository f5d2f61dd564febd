//! # Connection Lifecycle Observation
//!
//! The platform adapter (the OS Bluetooth stack binding) owns scanning,
//! pairing and GATT service discovery. This module defines the read-only
//! view of that lifecycle which the print pipeline consumes: the core never
//! mutates connection state, it only gates on it.
//!
//! ## Lifecycle
//!
//! ```text
//! Disconnected ──► Scanning ──► Connected ──► ServiceReady
//!       ▲                                          │
//!       └──────────────────────────────────────────┘
//! ```
//!
//! A transfer may only start from `ServiceReady` (the write characteristic
//! has been discovered). Scanning is bounded by [`SCAN_WINDOW`]: if no
//! target turns up within it, the wait reports
//! [`DeviceError::NotFound`] and the adapter is expected to halt scanning.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::DeviceError;

/// Fixed wait window for device discovery.
pub const SCAN_WINDOW: Duration = Duration::from_secs(5);

/// Where the platform adapter currently is in the connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Scanning,
    Connected,
    /// The printer's write characteristic has been discovered; transfers
    /// may start.
    ServiceReady,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Scanning => "scanning",
            ConnectionState::Connected => "connected",
            ConnectionState::ServiceReady => "service ready",
        };
        f.write_str(name)
    }
}

/// Read-only handle on the adapter's connection state.
///
/// Cloneable; every clone observes the same underlying state. The paired
/// sender stays with the platform adapter.
#[derive(Debug, Clone)]
pub struct ConnectionWatch {
    rx: watch::Receiver<ConnectionState>,
}

impl ConnectionWatch {
    /// Create a state channel. The sender side belongs to the platform
    /// adapter; the watch is handed to the print pipeline.
    pub fn channel() -> (watch::Sender<ConnectionState>, Self) {
        let (tx, rx) = watch::channel(ConnectionState::default());
        (tx, Self { rx })
    }

    /// The most recently published state.
    pub fn current(&self) -> ConnectionState {
        *self.rx.borrow()
    }

    /// Gate for starting a transfer: `Ok` only in `ServiceReady`.
    pub fn ensure_ready(&self) -> Result<(), DeviceError> {
        let state = self.current();
        if state == ConnectionState::ServiceReady {
            Ok(())
        } else {
            Err(DeviceError::NotReady(state.to_string()))
        }
    }

    /// Wait until the connection reaches `ServiceReady`.
    ///
    /// Bounded by [`SCAN_WINDOW`]: if the adapter has not produced a ready
    /// connection within it, returns [`DeviceError::NotFound`]. Also fails
    /// immediately when the adapter drops its sender (adapter shut down).
    pub async fn await_ready(&mut self) -> Result<(), DeviceError> {
        let wait = self.rx.wait_for(|s| *s == ConnectionState::ServiceReady);
        match tokio::time::timeout(SCAN_WINDOW, wait).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(_)) => Err(DeviceError::AdapterUnavailable(
                "adapter closed the state channel".into(),
            )),
            Err(_) => Err(DeviceError::NotFound),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
