// References
// https://en.wikipedia.org/wiki/Master_boot_record#PTE
// https://en.wikipedia.org/wiki/Partition_type

use crate::consts::{
    ENTRY_BOOT_INDICATOR_OFFSET, ENTRY_SECTOR_COUNT_OFFSET, ENTRY_STARTING_SECTOR_OFFSET,
    ENTRY_TYPE_OFFSET, PARTITION_ENTRY_COUNT, PARTITION_ENTRY_SIZE, PARTITION_TABLE_OFFSET,
    PARTITION_TABLE_SIZE, PARTITION_TYPE_EMPTY, PARTITION_TYPE_GPT_PROTECTIVE,
    PARTITION_TYPE_NTFS,
};
use crate::error::BootError;
use crate::sector::{read_le, SectorBuffer};
use log::debug;

/// One occupied slot of an MBR partition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionEntry {
    boot_indicator: bool,
    partition_type: u8,
    starting_sector: u64,
    sector_count: u64,
}

impl PartitionEntry {
    /// Decode a 16-byte table slot. An empty slot (type 0x00) yields `None`.
    pub fn new(data: &[u8]) -> Result<Option<PartitionEntry>, BootError> {
        if data.len() != PARTITION_ENTRY_SIZE {
            return Err(BootError::SizeMismatch {
                expected: PARTITION_ENTRY_SIZE,
                actual: data.len(),
            });
        }
        let partition_type = data[ENTRY_TYPE_OFFSET];
        if partition_type == PARTITION_TYPE_EMPTY {
            return Ok(None);
        }
        // Any non-zero flag counts as bootable, not only 0x80.
        Ok(Some(PartitionEntry {
            boot_indicator: data[ENTRY_BOOT_INDICATOR_OFFSET] != 0,
            partition_type,
            starting_sector: read_le(data, ENTRY_STARTING_SECTOR_OFFSET, 4),
            sector_count: read_le(data, ENTRY_SECTOR_COUNT_OFFSET, 4),
        }))
    }

    pub fn boot_indicator(&self) -> bool {
        self.boot_indicator
    }

    pub fn partition_type(&self) -> u8 {
        self.partition_type
    }

    /// First sector of the partition, i.e. the sector holding its VBR.
    pub fn starting_sector(&self) -> u64 {
        self.starting_sector
    }

    pub fn sector_count(&self) -> u64 {
        self.sector_count
    }

    pub fn is_ntfs(&self) -> bool {
        self.partition_type == PARTITION_TYPE_NTFS
    }

    pub fn is_gpt_protective(&self) -> bool {
        self.partition_type == PARTITION_TYPE_GPT_PROTECTIVE
    }

    pub fn print_info(&self) {
        println!(
            "Boot={}, Type=0x{:02x}, start_sector=0x{:x}, size=0x{:x}",
            self.boot_indicator, self.partition_type, self.starting_sector, self.sector_count
        );
    }
}

/// Outcome of decoding a valid MBR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionTable {
    /// Occupied entries in slot order.
    Mbr(Vec<PartitionEntry>),
    /// Slot 0 is a 0xEE protective entry; the real table is GPT.
    GptProtective,
}

/// A sector known to carry the 0x55AA boot signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterBootRecord {
    sector: SectorBuffer,
}

impl MasterBootRecord {
    pub fn new(sector: SectorBuffer) -> Result<MasterBootRecord, BootError> {
        if !sector.has_boot_signature() {
            return Err(BootError::InvalidMbrSignature);
        }
        Ok(MasterBootRecord { sector })
    }

    pub fn sector(&self) -> &SectorBuffer {
        &self.sector
    }

    pub fn table_bytes(&self) -> &[u8] {
        self.sector.slice(PARTITION_TABLE_OFFSET, PARTITION_TABLE_SIZE)
    }

    /// Decode all four slots, keeping empty ones as `None`.
    pub fn slots(&self) -> Result<[Option<PartitionEntry>; PARTITION_ENTRY_COUNT], BootError> {
        let mut slots = [None; PARTITION_ENTRY_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            let offset = PARTITION_TABLE_OFFSET + i * PARTITION_ENTRY_SIZE;
            *slot = PartitionEntry::new(self.sector.slice(offset, PARTITION_ENTRY_SIZE))?;
        }
        Ok(slots)
    }

    pub fn entries(&self) -> Result<Vec<PartitionEntry>, BootError> {
        Ok(self.slots()?.into_iter().flatten().collect())
    }

    pub fn partition_table(&self) -> Result<PartitionTable, BootError> {
        let slots = self.slots()?;
        if let Some(first) = &slots[0] {
            if first.is_gpt_protective() {
                debug!("Slot 0 holds a GPT protective entry.");
                return Ok(PartitionTable::GptProtective);
            }
        }
        let entries: Vec<PartitionEntry> = slots.into_iter().flatten().collect();
        debug!("Found {} occupied partition slots.", entries.len());
        Ok(PartitionTable::Mbr(entries))
    }
}

/// Validate `bytes` as an MBR and decode its partition table.
pub fn decode_mbr(bytes: &[u8]) -> Result<PartitionTable, BootError> {
    debug!("Parsing master boot record.");
    let mbr = MasterBootRecord::new(SectorBuffer::new(bytes)?)?;
    mbr.partition_table()
}
