// References
// https://en.wikipedia.org/wiki/NTFS#Partition_Boot_Sector_(VBR)

use crate::consts::{
    CLUSTER_SIZE, NTFS_BYTES_PER_SECTOR_OFFSET, NTFS_OEM_ID, NTFS_OEM_ID_OFFSET,
    NTFS_SECTORS_PER_CLUSTER_OFFSET, NTFS_TOTAL_SECTORS_OFFSET, NTFS_VBR_MFTMIRR_OFFSET,
    NTFS_VBR_MFT_OFFSET, SECTOR_SIZE,
};
use crate::error::BootError;
use crate::part::MasterBootRecord;
use crate::sector::SectorBuffer;
use log::{debug, info};

/// Byte offset of cluster `lcn`.
///
/// The product wraps on overflow; use [`checked_byte_address`] to detect it.
pub fn byte_address(lcn: u64, cluster_size_sectors: u64, sector_size: u64) -> u64 {
    lcn.wrapping_mul(cluster_size_sectors).wrapping_mul(sector_size)
}

pub fn checked_byte_address(lcn: u64, cluster_size_sectors: u64, sector_size: u64) -> Option<u64> {
    lcn.checked_mul(cluster_size_sectors)?.checked_mul(sector_size)
}

/// A validated NTFS Volume Boot Record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtfsBootSector {
    sector: SectorBuffer,
    bytes_per_sector: u16,
    sectors_per_cluster: u8,
    total_sectors: u64,
    mft_lcn: u64,
    mft_mirr_lcn: u64,
}

impl NtfsBootSector {
    pub fn new(sector: SectorBuffer) -> Result<NtfsBootSector, BootError> {
        debug!("Parsing NTFS volume boot record.");
        let sector = MasterBootRecord::new(sector)?.sector().clone();
        if sector.slice(NTFS_OEM_ID_OFFSET, NTFS_OEM_ID.len()) != NTFS_OEM_ID {
            return Err(BootError::NotNtfs);
        }
        Ok(NtfsBootSector {
            bytes_per_sector: sector.read_le(NTFS_BYTES_PER_SECTOR_OFFSET, 2) as u16,
            sectors_per_cluster: sector[NTFS_SECTORS_PER_CLUSTER_OFFSET],
            total_sectors: sector.read_le(NTFS_TOTAL_SECTORS_OFFSET, 8),
            mft_lcn: sector.read_le(NTFS_VBR_MFT_OFFSET, 8),
            mft_mirr_lcn: sector.read_le(NTFS_VBR_MFTMIRR_OFFSET, 8),
            sector,
        })
    }

    pub fn sector(&self) -> &SectorBuffer {
        &self.sector
    }

    pub fn mft_lcn(&self) -> u64 {
        self.mft_lcn
    }

    pub fn mft_mirr_lcn(&self) -> u64 {
        self.mft_mirr_lcn
    }

    // BPB values as recorded on disk. Addresses below use the fixed cluster size.
    pub fn bytes_per_sector(&self) -> u16 {
        self.bytes_per_sector
    }

    pub fn sectors_per_cluster(&self) -> u8 {
        self.sectors_per_cluster
    }

    pub fn total_sectors(&self) -> u64 {
        self.total_sectors
    }

    /// Byte offset of $MFT, relative to the start of the volume.
    pub fn mft_address(&self) -> u64 {
        byte_address(self.mft_lcn, CLUSTER_SIZE, SECTOR_SIZE as u64)
    }

    /// Byte offset of $MFTMirr, relative to the start of the volume.
    pub fn mft_mirr_address(&self) -> u64 {
        byte_address(self.mft_mirr_lcn, CLUSTER_SIZE, SECTOR_SIZE as u64)
    }

    pub fn print_info(&self) {
        info!(
            "bytes_per_sector : {:?}, sectors_per_cluster : {:?}, total_sectors : {:?}",
            self.bytes_per_sector, self.sectors_per_cluster, self.total_sectors
        );
        println!("$MFT address: 0x{:X}", self.mft_address());
        println!("$MFTMirr address: 0x{:X}", self.mft_mirr_address());
    }
}

/// Validate `bytes` as an NTFS VBR and decode its MFT locations.
pub fn decode_ntfs_vbr(bytes: &[u8]) -> Result<NtfsBootSector, BootError> {
    NtfsBootSector::new(SectorBuffer::new(bytes)?)
}
