//! Exclusive access to a volume for the duration of one tray action.

use std::io;
use std::time::Duration;
use tracing::{debug, warn};
use crate::tuning::Configuration;

#[cfg(windows)]
pub mod windows;

/// The raw control requests a volume accepts.
///
/// Each method issues exactly one request to the device and reports the OS
/// error if it was refused. Ordering is not enforced here; that is the job of
/// `VolumeSession`. Dropping the device releases its handle.
pub trait VolumeDevice {
    /// Request an exclusive lock on the volume.
    fn lock_volume(&mut self) -> io::Result<()>;

    /// Detach the filesystem from the volume. Only meaningful once locked.
    fn dismount_volume(&mut self) -> io::Result<()>;

    /// Enable or disable the media removal prevention flag.
    fn set_removal_prevention(&mut self, prevent: bool) -> io::Result<()>;

    fn eject_media(&mut self) -> io::Result<()>;

    fn load_media(&mut self) -> io::Result<()>;
}

/// Monotonic time source, also used to wait between lock attempts.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed point.
    fn now(&self) -> Duration;

    /// Block the calling thread.
    fn sleep(&self, duration: Duration);
}

/// An open volume being walked through the control sequence.
///
/// The sequence is lock, dismount, allow removal, then a single eject or
/// load. Every step refuses to run until the previous one has succeeded, and
/// every step that already succeeded reports success again without touching
/// the device. The device, and with it the OS handle, is released when the
/// session is dropped.
pub struct VolumeSession<'c, D> where D: VolumeDevice {
    device: D,
    clock: &'c dyn Clock,
    tuning: Configuration,
    locked: bool,
    dismounted: bool,
    removal_allowed: bool
}

impl<'c, D> VolumeSession<'c, D> where D: VolumeDevice {
    pub fn new(device: D, clock: &'c dyn Clock, tuning: &Configuration) -> VolumeSession<'c, D> {
        VolumeSession {
            device,
            clock,
            tuning: *tuning,
            locked: false,
            dismounted: false,
            removal_allowed: false
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_dismounted(&self) -> bool {
        self.dismounted
    }

    pub fn is_removal_allowed(&self) -> bool {
        self.removal_allowed
    }

    /// Lock the volume, retrying while some other process holds it.
    pub fn lock(&mut self) -> bool {
        if self.locked {
            return true;
        }

        let attempts = self.tuning.lock_attempts;

        for attempt in 1..=attempts {
            match self.device.lock_volume() {
                Ok(()) => {
                    debug!(attempt, "volume locked");
                    self.locked = true;
                    return true;
                },
                Err(e) => debug!(attempt, error = %e, "volume lock refused")
            }

            if attempt != attempts {
                warn!("volume is busy, retrying lock in {:?}", self.tuning.lock_retry_wait);
                self.clock.sleep(self.tuning.lock_retry_wait);
            }
        }

        false
    }

    pub fn dismount(&mut self) -> bool {
        if !self.locked {
            return false;
        }

        if self.dismounted {
            return true;
        }

        self.dismounted = Self::report("dismount", self.device.dismount_volume());
        self.dismounted
    }

    pub fn allow_removal(&mut self) -> bool {
        if !self.locked || !self.dismounted {
            return false;
        }

        if self.removal_allowed {
            return true;
        }

        self.removal_allowed = Self::report("allow removal", self.device.set_removal_prevention(false));
        self.removal_allowed
    }

    pub fn eject_media(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }

        Self::report("eject", self.device.eject_media())
    }

    pub fn load_media(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }

        Self::report("load", self.device.load_media())
    }

    fn is_ready(&self) -> bool {
        self.locked && self.dismounted && self.removal_allowed
    }

    fn report(request: &str, result: io::Result<()>) -> bool {
        match result {
            Ok(()) => {
                debug!(request, "control request completed");
                true
            },
            Err(e) => {
                debug!(request, error = %e, "control request failed");
                false
            }
        }
    }
}
