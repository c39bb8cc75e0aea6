//! Command line front end for the `eject` binary.

use std::io::Write;
use argparse::{ArgumentParser, StoreConst, StoreOption};
use tracing::debug;
use crate::drive::{DriveLetter, OpticalDrive, find_first_optical};
use crate::error::{EjectError, Result};
use crate::platform::Host;
use crate::tray;
use crate::tuning::Configuration;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ReportDefault,
    Open,
    Close,
    Toggle
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub action: Action,
    pub drive: Option<DriveLetter>
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Invocation),

    /// Help or a usage error has already been printed.
    Exit(i32)
}

/// Parse the process arguments, `args[0]` being the program name.
pub fn parse_args(args: Vec<String>, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Command {
    let mut invocation = Invocation {
        action: Action::Open,
        drive: None
    };

    let parsed = {
        let mut ap = ArgumentParser::new();

        ap.set_description("Open, close or toggle the tray of an optical drive. Without options the tray is opened.");

        ap.refer(&mut invocation.action).add_option(&["-d", "--default"], StoreConst(Action::ReportDefault), "display default drive")
            .add_option(&["-t", "--trayclose"], StoreConst(Action::Close), "close tray")
            .add_option(&["-T", "--traytoggle"], StoreConst(Action::Toggle), "toggle tray");
        ap.refer(&mut invocation.drive).add_argument("drive", StoreOption, "drive letter, as X or X: (default: first optical drive)");

        ap.parse(args, stdout, stderr)
    };

    match parsed {
        Ok(()) => Command::Run(invocation),
        Err(_) => Command::Exit(1)
    }
}

/// Carry out an action on a drive.
pub fn perform<H: Host>(host: &H, action: Action, letter: DriveLetter, tuning: &Configuration) -> Result<()> {
    let drive = OpticalDrive::new(host, letter)?;

    match action {
        Action::Open => tray::tray_open(host, &drive, tuning),
        Action::Close => tray::tray_close(host, &drive, tuning),
        Action::Toggle => tray::tray_toggle(host, &drive, tuning),
        Action::ReportDefault => Ok(())
    }
}

/// Run a parsed invocation and return the process exit code.
pub fn run<H: Host>(host: &H, invocation: &Invocation, tuning: &Configuration, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32 {
    if invocation.action == Action::ReportDefault {
        let device = match find_first_optical(host) {
            Some(letter) => letter.to_string(),
            None => "(none)".to_string()
        };

        let _ = writeln!(stdout, "eject: default device: `{}'", device);
        return 0;
    }

    let letter = match invocation.drive.or_else(|| find_first_optical(host)) {
        Some(letter) => letter,
        None => {
            let _ = writeln!(stderr, "eject: {}", EjectError::NoOpticalDrive);
            return 1;
        }
    };

    match perform(host, invocation.action, letter, tuning) {
        Ok(()) => 0,
        Err(e) => {
            debug!(drive = %letter, action = ?invocation.action, error = ?e, "action failed");
            let _ = writeln!(stderr, "eject: {}", e);
            1
        }
    }
}
