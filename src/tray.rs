//! Tray actions built on top of a volume session.

use tracing::{debug, info};
use crate::drive::OpticalDrive;
use crate::error::{EjectError, Result, Step};
use crate::platform::Host;
use crate::tuning::Configuration;
use crate::volume::{Clock, VolumeDevice, VolumeSession};

fn open_session<'h, H: Host>(host: &'h H, drive: &OpticalDrive, tuning: &Configuration) -> Result<VolumeSession<'h, H::Volume>> {
    let letter = drive.letter();
    let device = host.open_volume(letter).map_err(|source| EjectError::Open { letter, source })?;

    Ok(VolumeSession::new(device, host, tuning))
}

/// Lock, dismount and unprotect the volume so the tray may move.
pub fn prepare<D: VolumeDevice>(session: &mut VolumeSession<D>) -> Result<()> {
    if !session.lock() {
        return Err(EjectError::Sequence(Step::Lock));
    }

    if !session.dismount() {
        return Err(EjectError::Sequence(Step::Dismount));
    }

    if !session.allow_removal() {
        return Err(EjectError::Sequence(Step::AllowRemoval));
    }

    Ok(())
}

pub fn tray_open<H: Host>(host: &H, drive: &OpticalDrive, tuning: &Configuration) -> Result<()> {
    let mut session = open_session(host, drive, tuning)?;

    prepare(&mut session)?;

    if !session.eject_media() {
        return Err(EjectError::Sequence(Step::Eject));
    }

    info!(drive = %drive.letter(), "tray opened");
    Ok(())
}

pub fn tray_close<H: Host>(host: &H, drive: &OpticalDrive, tuning: &Configuration) -> Result<()> {
    let mut session = open_session(host, drive, tuning)?;

    prepare(&mut session)?;

    if !session.load_media() {
        return Err(EjectError::Sequence(Step::Load));
    }

    info!(drive = %drive.letter(), "tray closed");
    Ok(())
}

/// Open a closed tray or close an open one.
///
/// There is no way to ask the drive where its tray is, so this ejects and
/// times the request. Ejecting an already open tray returns almost at once,
/// and when the eject finishes within `already_open_threshold` the tray is
/// loaded again straight away. Slow drives or a busy bus can fool this.
pub fn tray_toggle<H: Host>(host: &H, drive: &OpticalDrive, tuning: &Configuration) -> Result<()> {
    let mut session = open_session(host, drive, tuning)?;

    prepare(&mut session)?;

    let start = host.now();
    if !session.eject_media() {
        return Err(EjectError::Sequence(Step::Eject));
    }
    let elapsed = host.now().checked_sub(start).unwrap_or_default();

    debug!(?elapsed, "eject completed");

    if elapsed < tuning.already_open_threshold {
        if !session.load_media() {
            return Err(EjectError::Sequence(Step::Load));
        }

        info!(drive = %drive.letter(), "tray was open, closed it");
    } else {
        info!(drive = %drive.letter(), "tray opened");
    }

    Ok(())
}
