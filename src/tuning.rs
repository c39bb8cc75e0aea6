//! Timing related configuration

use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// How many times a volume lock is requested before giving up.
    pub lock_attempts: u32,

    /// How long to wait between two failed lock requests.
    pub lock_retry_wait: Duration,

    /// An eject request that completes faster than this is taken to mean the
    /// tray was already open.
    pub already_open_threshold: Duration,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lock_attempts: 3,
            lock_retry_wait: Duration::from_millis(3000), //Long enough for a filesystem scan to let go
            already_open_threshold: Duration::from_millis(200), //Same cutoff util-linux eject uses
        }
    }
}
