use ntfsboot::consts::SECTOR_SIZE;
use ntfsboot::{byte_address, scan, BootError, DiskLayout, ScanError};
use std::io::Cursor;

fn put_entry(image: &mut [u8], slot: usize, boot: u8, ptype: u8, start: u32) {
    let offset = 446 + 16 * slot;
    image[offset] = boot;
    image[offset + 4] = ptype;
    image[offset + 8..offset + 12].copy_from_slice(&start.to_le_bytes());
    image[offset + 12..offset + 16].copy_from_slice(&0x10u32.to_le_bytes());
}

fn put_signature(image: &mut [u8], lba: usize) {
    image[lba * SECTOR_SIZE + 510] = 0x55;
    image[lba * SECTOR_SIZE + 511] = 0xAA;
}

fn put_vbr(image: &mut [u8], lba: usize, mft_lcn: u64, mft_mirr_lcn: u64) {
    let base = lba * SECTOR_SIZE;
    image[base + 3..base + 11].copy_from_slice(b"NTFS    ");
    image[base + 0x0B..base + 0x0D].copy_from_slice(&512u16.to_le_bytes());
    image[base + 0x0D] = 8;
    image[base + 0x30..base + 0x38].copy_from_slice(&mft_lcn.to_le_bytes());
    image[base + 0x38..base + 0x40].copy_from_slice(&mft_mirr_lcn.to_le_bytes());
    put_signature(image, lba);
}

#[test]
fn single_ntfs_partition() {
    let mut image = vec![0u8; 2049 * SECTOR_SIZE];
    put_entry(&mut image, 0, 0x80, 0x07, 2048);
    put_signature(&mut image, 0);
    put_vbr(&mut image, 2048, 4, 0x1869C0);

    let report = scan(&mut Cursor::new(image)).unwrap();
    let DiskLayout::Mbr(partitions) = &report.layout else {
        panic!("expected an MBR disk");
    };
    assert_eq!(partitions.len(), 1);
    assert!(partitions[0].entry.boot_indicator());
    assert_eq!(partitions[0].entry.starting_sector(), 2048);

    let boot = partitions[0].vbr.as_ref().unwrap().as_ref().unwrap();
    assert_eq!(boot.mft_lcn(), 4);
    assert_eq!(boot.mft_mirr_lcn(), 0x1869C0);
    assert_eq!(boot.mft_address(), 16384);
    assert_eq!(byte_address(boot.mft_lcn(), 8, 512), 16384);
}

#[test]
fn mixed_partitions_keep_slot_order() {
    let mut image = vec![0u8; 40 * SECTOR_SIZE];
    put_entry(&mut image, 0, 0x00, 0x83, 10);
    put_entry(&mut image, 2, 0x80, 0x07, 20);
    put_entry(&mut image, 3, 0x00, 0x07, 30);
    put_signature(&mut image, 0);
    put_vbr(&mut image, 20, 0x100, 0x200);
    // Sector 30 carries a signature but no NTFS OEM id.
    put_signature(&mut image, 30);

    let report = scan(&mut Cursor::new(image)).unwrap();
    let DiskLayout::Mbr(partitions) = &report.layout else {
        panic!("expected an MBR disk");
    };
    let numbers: Vec<usize> = partitions.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(partitions[0].vbr.is_none());

    let boot = partitions[1].vbr.as_ref().unwrap().as_ref().unwrap();
    assert_eq!(boot.mft_address(), 0x100000);

    let rejected = partitions[2].vbr.as_ref().unwrap().as_ref().unwrap_err();
    assert_eq!(rejected.reason, BootError::NotNtfs);
    assert_eq!(report.ntfs_partitions().count(), 2);
}

#[test]
fn unsigned_vbr_is_rejected() {
    let mut image = vec![0u8; 8 * SECTOR_SIZE];
    put_entry(&mut image, 0, 0x80, 0x07, 4);
    put_signature(&mut image, 0);
    image[4 * SECTOR_SIZE + 3..4 * SECTOR_SIZE + 11].copy_from_slice(b"NTFS    ");

    let report = scan(&mut Cursor::new(image)).unwrap();
    let partition = report.ntfs_partitions().next().unwrap();
    let rejected = partition.vbr.as_ref().unwrap().as_ref().unwrap_err();
    assert_eq!(rejected.reason, BootError::InvalidMbrSignature);
}

#[test]
fn gpt_disk_stops_before_partitions() {
    // The NTFS entry points past the end of the image and must not be read.
    let mut image = vec![0u8; SECTOR_SIZE];
    put_entry(&mut image, 0, 0x00, 0xEE, 1);
    put_entry(&mut image, 1, 0x80, 0x07, 4096);
    put_signature(&mut image, 0);

    let report = scan(&mut Cursor::new(image)).unwrap();
    assert!(matches!(report.layout, DiskLayout::Gpt));
    assert_eq!(report.ntfs_partitions().count(), 0);
}

#[test]
fn blank_disk_has_no_mbr() {
    let image = vec![0u8; 4 * SECTOR_SIZE];
    match scan(&mut Cursor::new(image)) {
        Err(ScanError::Boot(BootError::InvalidMbrSignature)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn partition_past_end_of_image_is_a_read_error() {
    let mut image = vec![0u8; 2 * SECTOR_SIZE];
    put_entry(&mut image, 0, 0x80, 0x07, 100);
    put_signature(&mut image, 0);

    let err = scan(&mut Cursor::new(image)).unwrap_err();
    assert_eq!(err.exit_code(), 3);
}
