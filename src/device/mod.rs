use log::debug;
use std::io::{Read, Seek, SeekFrom};

use crate::consts::SECTOR_SIZE;
use crate::error::ScanError;
use crate::sector::SectorBuffer;

/// Anything sectors can be read from: a block device, a raw image, a buffer.
pub trait ByteSource {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ScanError>;
}

impl<T: Read + Seek> ByteSource for T {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ScanError> {
        debug!("Reading {:?} byte at offset 0x{:x}", buf.len(), offset);
        self.seek(SeekFrom::Start(offset))
            .map_err(|source| ScanError::Seek { offset, source })?;
        self.read_exact(buf)
            .map_err(|source| ScanError::Read { offset, source })
    }
}

/// Read the sector at logical block address `lba`.
pub fn read_sector<S: ByteSource + ?Sized>(source: &mut S, lba: u64) -> Result<SectorBuffer, ScanError> {
    let offset = lba * SECTOR_SIZE as u64;
    let mut data = [0u8; SECTOR_SIZE];
    source.read_exact_at(offset, &mut data)?;
    Ok(SectorBuffer::new(&data)?)
}
