use log::{debug, info, warn};

use crate::consts::CLUSTER_SIZE;
use crate::device::{read_sector, ByteSource};
use crate::error::{BootError, ScanError};
use crate::ntfs::NtfsBootSector;
use crate::part::{MasterBootRecord, PartitionEntry, PartitionTable};
use crate::sector::SectorBuffer;

/// What was found behind one occupied partition slot.
#[derive(Debug)]
pub struct PartitionReport {
    /// Position among the occupied slots, counting from 1.
    pub number: usize,
    pub entry: PartitionEntry,
    /// `None` for non-NTFS entries, which are never read.
    pub vbr: Option<Result<NtfsBootSector, VbrError>>,
}

/// A VBR that was read but rejected.
#[derive(Debug)]
pub struct VbrError {
    pub sector: SectorBuffer,
    pub reason: BootError,
}

#[derive(Debug)]
pub enum DiskLayout {
    Gpt,
    Mbr(Vec<PartitionReport>),
}

#[derive(Debug)]
pub struct DiskReport {
    pub mbr: MasterBootRecord,
    pub layout: DiskLayout,
}

impl DiskReport {
    pub fn ntfs_partitions(&self) -> impl Iterator<Item = &PartitionReport> {
        let partitions: &[PartitionReport] = match &self.layout {
            DiskLayout::Gpt => &[],
            DiskLayout::Mbr(partitions) => partitions,
        };
        partitions.iter().filter(|p| p.entry.is_ntfs())
    }

    pub fn print_info(&self) {
        println!("MBR md5 : {}", self.mbr.sector().md5_hex());
        let partitions = match &self.layout {
            DiskLayout::Gpt => {
                println!("This disk is in GPT format, which is unsupported.");
                return;
            }
            DiskLayout::Mbr(partitions) => partitions,
        };

        for partition in partitions {
            print!("Partition {}: ", partition.number);
            if partition.entry.is_ntfs() {
                println!("NTFS entry");
            } else {
                println!("Non-NTFS entry");
            }
            partition.entry.print_info();
        }
        println!("\n{} NTFS partitions on opened device\n", self.ntfs_partitions().count());

        for (i, partition) in self.ntfs_partitions().enumerate() {
            print!("Partition {}: ", i + 1);
            match &partition.vbr {
                Some(Ok(boot)) => {
                    println!("valid VBR (md5 : {})", boot.sector().md5_hex());
                    boot.print_info();
                }
                Some(Err(e)) => println!("invalid VBR ({}, md5 : {})", e.reason, e.sector.md5_hex()),
                None => println!("VBR not read"),
            }
            println!();
        }
    }
}

/// Read the MBR of `source`, then the VBR of every NTFS partition it lists.
///
/// A rejected VBR is recorded in the report; I/O failures and an invalid MBR
/// end the scan.
pub fn scan<S: ByteSource + ?Sized>(source: &mut S) -> Result<DiskReport, ScanError> {
    let mbr = MasterBootRecord::new(read_sector(source, 0)?)?;
    let entries = match mbr.partition_table()? {
        PartitionTable::GptProtective => {
            info!("GPT protective MBR found, partitions are not inspected.");
            return Ok(DiskReport { mbr, layout: DiskLayout::Gpt });
        }
        PartitionTable::Mbr(entries) => entries,
    };

    let mut partitions = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let vbr = if entry.is_ntfs() {
            Some(read_vbr(source, &entry)?)
        } else {
            debug!("Skipping partition {} of type 0x{:02x}", i + 1, entry.partition_type());
            None
        };
        partitions.push(PartitionReport { number: i + 1, entry, vbr });
    }
    Ok(DiskReport { mbr, layout: DiskLayout::Mbr(partitions) })
}

fn read_vbr<S: ByteSource + ?Sized>(
    source: &mut S,
    entry: &PartitionEntry,
) -> Result<Result<NtfsBootSector, VbrError>, ScanError> {
    let sector = read_sector(source, entry.starting_sector())?;
    match NtfsBootSector::new(sector.clone()) {
        Ok(boot) => {
            if u64::from(boot.sectors_per_cluster()) != CLUSTER_SIZE {
                warn!(
                    "VBR at sector {} reports {} sectors per cluster, addresses assume {}",
                    entry.starting_sector(),
                    boot.sectors_per_cluster(),
                    CLUSTER_SIZE
                );
            }
            Ok(Ok(boot))
        }
        Err(reason) => {
            warn!("Invalid VBR at sector {}: {}", entry.starting_sector(), reason);
            Ok(Err(VbrError { sector, reason }))
        }
    }
}
