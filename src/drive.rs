//! Drive letters and the search for optical drives.

use std::fmt;
use std::str::FromStr;
use tracing::debug;
use crate::error::{EjectError, Result};

/// A logical drive letter, always stored in uppercase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriveLetter(u8);

impl DriveLetter {
    pub fn new(letter: char) -> Result<DriveLetter> {
        if !letter.is_ascii_alphabetic() {
            return Err(EjectError::InvalidDriveLetter(letter.to_string()));
        }

        Ok(DriveLetter(letter.to_ascii_uppercase() as u8))
    }

    /// The letter at position `index` of the logical drive bitmask, if any.
    pub fn from_index(index: u32) -> Option<DriveLetter> {
        if index < 26 {
            Some(DriveLetter(b'A' + index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> u32 {
        (self.0 - b'A') as u32
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// The root directory path, e.g. `D:\`, used to classify the drive.
    pub fn root_path(self) -> String {
        format!("{}:\\", self.as_char())
    }

    /// The NT device path of the volume, e.g. `\\.\D:`.
    pub fn device_path(self) -> String {
        format!("\\\\.\\{}:", self.as_char())
    }
}

impl fmt::Display for DriveLetter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Accepts `X` and `X:`.
impl FromStr for DriveLetter {
    type Err = EjectError;

    fn from_str(s: &str) -> Result<DriveLetter> {
        let mut chars = s.chars();

        match (chars.next(), chars.next(), chars.next()) {
            (Some(letter), None, None) | (Some(letter), Some(':'), None) => DriveLetter::new(letter),
            _ => Err(EjectError::InvalidDriveLetter(s.to_string()))
        }
    }
}

/// The set of logical drives present on the system, one bit per letter with
/// bit 0 standing for `A:`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct LogicalDrives(u32);

impl LogicalDrives {
    pub fn from_bits(bits: u32) -> LogicalDrives {
        LogicalDrives(bits & 0x03FF_FFFF)
    }

    pub fn empty() -> LogicalDrives {
        LogicalDrives(0)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, letter: DriveLetter) -> bool {
        self.0 & (1 << letter.index()) != 0
    }

    pub fn insert(&mut self, letter: DriveLetter) {
        self.0 |= 1 << letter.index();
    }

    /// Iterate the present drives in ascending letter order.
    pub fn iter(self) -> impl Iterator<Item = DriveLetter> {
        (0..26).filter_map(DriveLetter::from_index).filter(move |letter| self.contains(*letter))
    }
}

/// Drive classification as reported by the operating system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriveType {
    Unknown,
    NoRootDir,
    Removable,
    Fixed,
    Remote,
    CdRom,
    RamDisk
}

/// Read-only view of the system's logical drives.
pub trait DriveTable {
    /// Which logical drive letters currently exist.
    fn logical_drives(&self) -> LogicalDrives;

    /// Classify the drive mounted at `letter`.
    fn drive_type(&self, letter: DriveLetter) -> DriveType;
}

pub fn is_optical<T: DriveTable + ?Sized>(table: &T, letter: DriveLetter) -> bool {
    table.drive_type(letter) == DriveType::CdRom
}

/// Find the lowest lettered optical drive on the system.
pub fn find_first_optical<T: DriveTable + ?Sized>(table: &T) -> Option<DriveLetter> {
    let drives = table.logical_drives();
    let found = drives.iter().find(|letter| is_optical(table, *letter));

    debug!(drives = drives.bits(), ?found, "searched for optical drive");

    found
}

/// A drive letter known to name an optical drive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpticalDrive {
    letter: DriveLetter
}

impl OpticalDrive {
    pub fn new<T: DriveTable + ?Sized>(table: &T, letter: DriveLetter) -> Result<OpticalDrive> {
        if !is_optical(table, letter) {
            return Err(EjectError::NotOptical(letter));
        }

        Ok(OpticalDrive { letter })
    }

    pub fn letter(&self) -> DriveLetter {
        self.letter
    }
}
