use md5::{Digest, Md5};
use std::ops::Index;

use crate::consts::{BOOT_SIGNATURE, BOOT_SIGNATURE_OFFSET, SECTOR_SIZE};
use crate::error::BootError;

/// Decode the `width`-byte little-endian unsigned integer at `offset`.
///
/// `width` must be at most 8 and `offset + width` must lie inside `bytes`.
pub fn read_le(bytes: &[u8], offset: usize, width: usize) -> u64 {
    debug_assert!(width <= 8);
    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(&bytes[offset..offset + width]);
    u64::from_le_bytes(buf)
}

/// One 512-byte disk sector.
#[derive(Clone, PartialEq, Eq)]
pub struct SectorBuffer {
    data: [u8; SECTOR_SIZE],
}

impl SectorBuffer {
    pub fn new(data: &[u8]) -> Result<SectorBuffer, BootError> {
        let data: [u8; SECTOR_SIZE] = data.try_into().map_err(|_| BootError::SizeMismatch {
            expected: SECTOR_SIZE,
            actual: data.len(),
        })?;
        Ok(SectorBuffer { data })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    pub fn read_le(&self, offset: usize, width: usize) -> u64 {
        read_le(&self.data, offset, width)
    }

    /// True when the sector ends with 0x55 0xAA.
    pub fn has_boot_signature(&self) -> bool {
        self.data[BOOT_SIGNATURE_OFFSET..] == BOOT_SIGNATURE
    }

    pub fn md5_hex(&self) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.data);
        format!("{:x}", hasher.finalize())
    }
}

impl Index<usize> for SectorBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.data[index]
    }
}

impl std::fmt::Debug for SectorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectorBuffer")
            .field("boot_signature", &self.has_boot_signature())
            .field("md5", &self.md5_hex())
            .finish()
    }
}
