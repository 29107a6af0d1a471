// References
// https://en.wikipedia.org/wiki/Master_boot_record#Sector_layout
// https://en.wikipedia.org/wiki/NTFS#Partition_Boot_Sector_(VBR)

pub const SECTOR_SIZE: usize = 512;

pub const PARTITION_TABLE_OFFSET: usize = 446;
pub const PARTITION_TABLE_SIZE: usize = 64;
pub const PARTITION_ENTRY_SIZE: usize = 16;
pub const PARTITION_ENTRY_COUNT: usize = PARTITION_TABLE_SIZE / PARTITION_ENTRY_SIZE;

// Offsets inside a partition entry.
pub const ENTRY_BOOT_INDICATOR_OFFSET: usize = 0x00;
pub const ENTRY_TYPE_OFFSET: usize = 0x04;
pub const ENTRY_STARTING_SECTOR_OFFSET: usize = 0x08;
pub const ENTRY_SECTOR_COUNT_OFFSET: usize = 0x0C;

pub const PARTITION_TYPE_EMPTY: u8 = 0x00;
pub const PARTITION_TYPE_NTFS: u8 = 0x07;
pub const PARTITION_TYPE_GPT_PROTECTIVE: u8 = 0xEE;

pub const BOOT_SIGNATURE_OFFSET: usize = 510;
pub const BOOT_SIGNATURE: [u8; 2] = [0x55, 0xAA];

pub const NTFS_OEM_ID_OFFSET: usize = 0x03;
pub const NTFS_OEM_ID: &[u8; 8] = b"NTFS    ";

// Extended BPB
pub const NTFS_BYTES_PER_SECTOR_OFFSET: usize = 0x0B;
pub const NTFS_SECTORS_PER_CLUSTER_OFFSET: usize = 0x0D;
pub const NTFS_TOTAL_SECTORS_OFFSET: usize = 0x28;
pub const NTFS_VBR_MFT_OFFSET: usize = 0x30;
pub const NTFS_VBR_MFTMIRR_OFFSET: usize = 0x38;

/// Cluster size, in sectors.
pub const CLUSTER_SIZE: u64 = 8;

// Process exit codes
pub const SUCCESS: i32 = 0;
pub const ARGUMENT_EXPECTED: i32 = 1;
pub const OPEN_ERROR: i32 = 2;
pub const READ_ERROR: i32 = 3;
pub const SEEK_ERROR: i32 = 4;
pub const GPT_FORMATTED: i32 = 5;
pub const INVALID_MBR: i32 = 6;
