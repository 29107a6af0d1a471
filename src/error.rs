use std::io;
use thiserror::Error;

use crate::consts::{INVALID_MBR, READ_ERROR, SEEK_ERROR};

/// Reasons a sector is rejected by one of the boot structure decoders.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    #[error("Expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Missing 0x55AA boot signature")]
    InvalidMbrSignature,

    #[error("Missing \"NTFS    \" OEM id")]
    NotNtfs,
}

/// Failures that stop a disk scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Could not seek to offset 0x{offset:x}: {source}")]
    Seek { offset: u64, source: io::Error },

    #[error("Could not read sector at offset 0x{offset:x}: {source}")]
    Read { offset: u64, source: io::Error },

    #[error("Invalid master boot record: {0}")]
    Boot(#[from] BootError),
}

impl ScanError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::Seek { .. } => SEEK_ERROR,
            ScanError::Read { .. } => READ_ERROR,
            ScanError::Boot(_) => INVALID_MBR,
        }
    }
}
