use std::{fmt, io, result};
use thiserror::Error;
use crate::drive::DriveLetter;

/// One step of the volume control sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Lock,
    Dismount,
    AllowRemoval,
    Eject,
    Load
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::Lock => write!(f, "can't lock volume"),
            Step::Dismount => write!(f, "can't dismount volume"),
            Step::AllowRemoval => write!(f, "can't allow removal"),
            Step::Eject => write!(f, "can't eject media"),
            Step::Load => write!(f, "can't load media")
        }
    }
}

#[derive(Error, Debug)]
pub enum EjectError {
    #[error("invalid drive letter: {0}")]
    InvalidDriveLetter(String),

    #[error("not optical drive: {0}")]
    NotOptical(DriveLetter),

    #[error("can't open volume {letter}: {source}")]
    Open {
        letter: DriveLetter,
        #[source]
        source: io::Error
    },

    #[error("{0}")]
    Sequence(Step),

    #[error("no optical drive found")]
    NoOpticalDrive,
}

pub type Result<T> = result::Result<T, EjectError>;
