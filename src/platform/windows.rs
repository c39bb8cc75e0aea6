//! Windows host.

use std::{io, ffi};
use std::os::windows::ffi::OsStrExt;
use std::time::Duration;
use winapi::um::fileapi;
use winapi::um::winbase::{DRIVE_NO_ROOT_DIR, DRIVE_REMOVABLE, DRIVE_FIXED, DRIVE_REMOTE, DRIVE_CDROM, DRIVE_RAMDISK};
use winapi::um::winnt::WCHAR;
use crate::drive::{DriveLetter, DriveTable, DriveType, LogicalDrives};
use crate::platform::{Host, SystemClock};
use crate::volume::Clock;
use crate::volume::windows::WindowsVolume;

/// The local machine, as seen through the Win32 API.
#[derive(Default)]
pub struct WindowsHost {
    clock: SystemClock
}

pub type SystemHost = WindowsHost;

/// Obtain the host for the running system.
///
/// # Platform considerations
///
/// This is the Windows version of the function. Drives come from
/// `GetLogicalDrives` and volumes are opened in the `\\.\X:` namespace.
pub fn open_host() -> SystemHost {
    WindowsHost::default()
}

impl DriveTable for WindowsHost {
    fn logical_drives(&self) -> LogicalDrives {
        LogicalDrives::from_bits(unsafe { fileapi::GetLogicalDrives() })
    }

    fn drive_type(&self, letter: DriveLetter) -> DriveType {
        let mut root_path_ffi : Vec<WCHAR> = ffi::OsString::from(letter.root_path()).encode_wide().collect();
        root_path_ffi.push(0 as WCHAR);

        match unsafe { fileapi::GetDriveTypeW(root_path_ffi.as_ptr()) } {
            DRIVE_NO_ROOT_DIR => DriveType::NoRootDir,
            DRIVE_REMOVABLE => DriveType::Removable,
            DRIVE_FIXED => DriveType::Fixed,
            DRIVE_REMOTE => DriveType::Remote,
            DRIVE_CDROM => DriveType::CdRom,
            DRIVE_RAMDISK => DriveType::RamDisk,
            _ => DriveType::Unknown
        }
    }
}

impl Clock for WindowsHost {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration)
    }
}

impl Host for WindowsHost {
    type Volume = WindowsVolume;

    fn open_volume(&self, letter: DriveLetter) -> io::Result<WindowsVolume> {
        WindowsVolume::open_letter(letter)
    }
}
