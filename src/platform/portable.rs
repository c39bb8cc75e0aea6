//! Fallback host for systems without a drive letter volume model.

use std::io;
use std::time::Duration;
use crate::drive::{DriveLetter, DriveTable, DriveType, LogicalDrives};
use crate::platform::{Host, SystemClock};
use crate::volume::{Clock, VolumeDevice};

/// A host with no logical drives.
#[derive(Default)]
pub struct PortableHost {
    clock: SystemClock
}

pub type SystemHost = PortableHost;

/// Obtain the host for the running system.
///
/// # Platform considerations
///
/// This is the portable version of the function. It never finds a drive and
/// refuses to open volumes.
pub fn open_host() -> SystemHost {
    PortableHost::default()
}

/// No volume can ever be opened here.
pub enum PortableVolume {}

impl VolumeDevice for PortableVolume {
    fn lock_volume(&mut self) -> io::Result<()> {
        match *self {}
    }

    fn dismount_volume(&mut self) -> io::Result<()> {
        match *self {}
    }

    fn set_removal_prevention(&mut self, _prevent: bool) -> io::Result<()> {
        match *self {}
    }

    fn eject_media(&mut self) -> io::Result<()> {
        match *self {}
    }

    fn load_media(&mut self) -> io::Result<()> {
        match *self {}
    }
}

impl DriveTable for PortableHost {
    fn logical_drives(&self) -> LogicalDrives {
        LogicalDrives::empty()
    }

    fn drive_type(&self, _letter: DriveLetter) -> DriveType {
        DriveType::NoRootDir
    }
}

impl Clock for PortableHost {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration)
    }
}

impl Host for PortableHost {
    type Volume = PortableVolume;

    fn open_volume(&self, letter: DriveLetter) -> io::Result<PortableVolume> {
        Err(io::Error::new(io::ErrorKind::Other, format!("volume {} is not available: tray control requires Windows", letter)))
    }
}
