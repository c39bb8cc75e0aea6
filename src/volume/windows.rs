//! Windows volume control through `DeviceIoControl`.

use std::{io, ptr, ffi, mem};
use std::os::windows::ffi::OsStrExt;
use winapi::shared::minwindef::{DWORD, FALSE, LPVOID};
use winapi::shared::ntdef::BOOLEAN;
use winapi::um::{fileapi, handleapi, ioapiset};
use winapi::um::fileapi::OPEN_EXISTING;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::winioctl::{FSCTL_LOCK_VOLUME, FSCTL_DISMOUNT_VOLUME, IOCTL_DISK_MEDIA_REMOVAL, IOCTL_DISK_EJECT_MEDIA, IOCTL_DISK_LOAD_MEDIA, PREVENT_MEDIA_REMOVAL};
use winapi::um::winnt::{WCHAR, HANDLE, GENERIC_READ, FILE_SHARE_READ, FILE_SHARE_WRITE};
use tracing::debug;
use crate::drive::DriveLetter;
use crate::volume::VolumeDevice;

pub struct WindowsVolume {
    volume_device: HANDLE
}

impl WindowsVolume {
    /// Open the volume mounted at a drive letter.
    pub fn open_letter(letter: DriveLetter) -> io::Result<WindowsVolume> {
        WindowsVolume::open_device(&ffi::OsString::from(letter.device_path()))
    }

    /// Open a volume by it's NT device path.
    ///
    /// Only read access is requested and other openers are allowed to keep
    /// reading and writing, which is all the volume control requests need.
    pub fn open_device(nt_device_path: &ffi::OsStr) -> io::Result<WindowsVolume> {
        let mut nt_device_path_ffi : Vec<WCHAR> = nt_device_path.encode_wide().collect();
        nt_device_path_ffi.push(0 as WCHAR);

        let nt_device = unsafe { fileapi::CreateFileW(nt_device_path_ffi.as_ptr(), GENERIC_READ, FILE_SHARE_READ | FILE_SHARE_WRITE, ptr::null_mut(), OPEN_EXISTING, 0, ptr::null_mut()) };

        if nt_device == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }

        debug!(path = ?nt_device_path, "opened volume");

        unsafe {
            Ok(WindowsVolume::from_device_handle(nt_device))
        }
    }

    /// Construct a volume directly from an NT handle.
    ///
    /// This is an unsafe function. The nt_device handle must be a valid,
    /// open volume handle, and ownership of it passes to the returned value,
    /// which closes it on drop.
    pub unsafe fn from_device_handle(nt_device: HANDLE) -> WindowsVolume {
        WindowsVolume {
            volume_device: nt_device
        }
    }

    /// Issue a control request that returns no output.
    fn control(&mut self, code: DWORD, input: LPVOID, input_size: DWORD) -> io::Result<()> {
        let mut bytes_returned : DWORD = 0;

        let ok = unsafe { ioapiset::DeviceIoControl(self.volume_device, code, input, input_size, ptr::null_mut(), 0, &mut bytes_returned, ptr::null_mut()) };
        if ok == FALSE {
            return Err(io::Error::last_os_error());
        }

        Ok(())
    }
}

impl Drop for WindowsVolume {
    fn drop(&mut self) {
        unsafe { handleapi::CloseHandle(self.volume_device) };
    }
}

impl VolumeDevice for WindowsVolume {
    fn lock_volume(&mut self) -> io::Result<()> {
        self.control(FSCTL_LOCK_VOLUME, ptr::null_mut(), 0)
    }

    fn dismount_volume(&mut self) -> io::Result<()> {
        self.control(FSCTL_DISMOUNT_VOLUME, ptr::null_mut(), 0)
    }

    fn set_removal_prevention(&mut self, prevent: bool) -> io::Result<()> {
        let mut pmr = PREVENT_MEDIA_REMOVAL { PreventMediaRemoval: prevent as BOOLEAN };

        self.control(IOCTL_DISK_MEDIA_REMOVAL, &mut pmr as *mut _ as LPVOID, mem::size_of::<PREVENT_MEDIA_REMOVAL>() as DWORD)
    }

    fn eject_media(&mut self) -> io::Result<()> {
        self.control(IOCTL_DISK_EJECT_MEDIA, ptr::null_mut(), 0)
    }

    fn load_media(&mut self) -> io::Result<()> {
        self.control(IOCTL_DISK_LOAD_MEDIA, ptr::null_mut(), 0)
    }
}
