//! Scripted host for exercising tray control without hardware.

use std::io;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use crate::drive::{DriveLetter, DriveTable, DriveType, LogicalDrives};
use crate::platform::Host;
use crate::volume::{Clock, VolumeDevice};

/// A control request as seen by the simulated device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Lock,
    Dismount,
    SetRemovalPrevention(bool),
    Eject,
    Load
}

#[derive(Default)]
struct State {
    now: Cell<Duration>,
    sleeps: RefCell<Vec<Duration>>,
    requests: RefCell<Vec<Request>>,
    failing: RefCell<Vec<Request>>,
    lock_failures: Cell<u32>,
    eject_latency: Cell<Duration>,
    refuse_open: Cell<bool>,
    opened: Cell<u32>,
    released: Cell<u32>
}

impl State {
    fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    fn issue(&self, request: Request) -> io::Result<()> {
        self.requests.borrow_mut().push(request);

        if request == Request::Lock && self.lock_failures.get() > 0 {
            self.lock_failures.set(self.lock_failures.get() - 1);
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "volume in use"));
        }

        if self.failing.borrow().contains(&request) {
            return Err(io::Error::new(io::ErrorKind::Other, format!("{:?} refused", request)));
        }

        Ok(())
    }
}

pub struct SimulatedHost {
    drives: Vec<(DriveLetter, DriveType)>,
    state: Rc<State>
}

impl SimulatedHost {
    pub fn new() -> SimulatedHost {
        SimulatedHost {
            drives: Vec::new(),
            state: Rc::new(State::default())
        }
    }

    pub fn with_drive(mut self, letter: char, kind: DriveType) -> Self {
        let letter = DriveLetter::new(letter).unwrap();

        self.drives.retain(|(existing, _)| *existing != letter);
        self.drives.push((letter, kind));
        self
    }

    /// Make every occurrence of `request` fail.
    pub fn failing(self, request: Request) -> Self {
        self.state.failing.borrow_mut().push(request);
        self
    }

    /// Make the first `count` lock requests fail.
    pub fn failing_lock_attempts(self, count: u32) -> Self {
        self.state.lock_failures.set(count);
        self
    }

    /// How long each eject request takes to complete.
    pub fn eject_latency(self, latency: Duration) -> Self {
        self.state.eject_latency.set(latency);
        self
    }

    pub fn refusing_open(self) -> Self {
        self.state.refuse_open.set(true);
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.requests.borrow().clone()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.sleeps.borrow().clone()
    }

    pub fn opened(&self) -> u32 {
        self.state.opened.get()
    }

    pub fn released(&self) -> u32 {
        self.state.released.get()
    }
}

impl DriveTable for SimulatedHost {
    fn logical_drives(&self) -> LogicalDrives {
        let mut drives = LogicalDrives::empty();

        for (letter, _) in self.drives.iter() {
            drives.insert(*letter);
        }

        drives
    }

    fn drive_type(&self, letter: DriveLetter) -> DriveType {
        self.drives.iter()
            .find(|(existing, _)| *existing == letter)
            .map(|(_, kind)| *kind)
            .unwrap_or(DriveType::NoRootDir)
    }
}

impl Clock for SimulatedHost {
    fn now(&self) -> Duration {
        self.state.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.state.sleeps.borrow_mut().push(duration);
        self.state.advance(duration);
    }
}

impl Host for SimulatedHost {
    type Volume = SimulatedVolume;

    fn open_volume(&self, letter: DriveLetter) -> io::Result<SimulatedVolume> {
        if self.state.refuse_open.get() {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("no volume at {}", letter)));
        }

        self.state.opened.set(self.state.opened.get() + 1);

        Ok(SimulatedVolume {
            state: self.state.clone()
        })
    }
}

pub struct SimulatedVolume {
    state: Rc<State>
}

impl Drop for SimulatedVolume {
    fn drop(&mut self) {
        self.state.released.set(self.state.released.get() + 1);
    }
}

impl VolumeDevice for SimulatedVolume {
    fn lock_volume(&mut self) -> io::Result<()> {
        self.state.issue(Request::Lock)
    }

    fn dismount_volume(&mut self) -> io::Result<()> {
        self.state.issue(Request::Dismount)
    }

    fn set_removal_prevention(&mut self, prevent: bool) -> io::Result<()> {
        self.state.issue(Request::SetRemovalPrevention(prevent))
    }

    fn eject_media(&mut self) -> io::Result<()> {
        self.state.advance(self.state.eject_latency.get());
        self.state.issue(Request::Eject)
    }

    fn load_media(&mut self) -> io::Result<()> {
        self.state.issue(Request::Load)
    }
}
