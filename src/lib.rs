pub mod consts;
pub mod device;
pub mod disk;
pub mod error;
pub mod ntfs;
pub mod part;
pub mod sector;

pub use disk::{scan, DiskLayout, DiskReport, PartitionReport, VbrError};
pub use error::{BootError, ScanError};
pub use ntfs::{byte_address, checked_byte_address, decode_ntfs_vbr, NtfsBootSector};
pub use part::{decode_mbr, MasterBootRecord, PartitionEntry, PartitionTable};
pub use sector::SectorBuffer;
