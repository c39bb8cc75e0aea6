//! Abstraction layer for the operating system services tray control needs.

use std::io;
use std::time::{Duration, Instant};
use std::thread;
use crate::drive::{DriveLetter, DriveTable};
use crate::volume::{Clock, VolumeDevice};

#[cfg(windows)]
pub mod windows;

#[cfg(not(windows))]
pub mod portable;

#[cfg(test)]
pub mod simulated;

#[cfg(windows)]
pub use crate::platform::windows::*;

#[cfg(not(windows))]
pub use crate::platform::portable::*;

/// Everything a tray action touches: the drive table, a way to open volumes,
/// and the clock used for lock retries and toggle timing.
pub trait Host: DriveTable + Clock {
    type Volume: VolumeDevice;

    /// Open the volume mounted at `letter` for control requests.
    fn open_volume(&self, letter: DriveLetter) -> io::Result<Self::Volume>;
}

/// Wall clock backed by `Instant`, shared by the real hosts.
#[derive(Copy, Clone, Debug)]
pub struct SystemClock {
    epoch: Instant
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {
            epoch: Instant::now()
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
