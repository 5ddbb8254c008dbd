//! Connectivity tracking for backend synchronization.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Connectivity state of the client, as last observed by a sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    /// The last sync request reached the API (or none was attempted yet).
    Online,
    /// The last sync request failed.
    Offline,
}

/// Shared, cheaply clonable connectivity flag.
///
/// Sync tasks flip it; the UI reads it to show a "changes not saved to server"
/// hint. Being offline never blocks local catalog changes.
#[derive(Debug, Clone)]
pub struct Connectivity {
    offline: Arc<AtomicBool>,
}

impl Connectivity {
    pub fn new() -> Self {
        Self {
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> ConnectivityState {
        if self.is_offline() {
            ConnectivityState::Offline
        } else {
            ConnectivityState::Online
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::Acquire)
    }

    /// Mark the client as offline.
    pub fn set_offline(&self) {
        if !self.offline.swap(true, Ordering::AcqRel) {
            tracing::warn!("backend unreachable; catalog changes are kept locally only");
        }
    }

    /// Mark the client as online.
    pub fn set_online(&self) {
        if self.offline.swap(false, Ordering::AcqRel) {
            tracing::info!("backend reachable again");
        }
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_online_and_clones_share_state() {
        let a = Connectivity::new();
        let b = a.clone();
        assert_eq!(a.state(), ConnectivityState::Online);

        b.set_offline();
        assert_eq!(a.state(), ConnectivityState::Offline);

        a.set_online();
        assert!(!b.is_offline());
    }
}
