use env_logger::Env;
use log::{log_enabled, Level};
use ntfsboot::consts::{ARGUMENT_EXPECTED, GPT_FORMATTED, OPEN_ERROR, SUCCESS};
use ntfsboot::{DiskLayout, DiskReport};
use std::env;
use std::fs::File;
use std::process;

fn dump(report: &DiskReport) {
    println!("Master boot record:");
    hexdump::hexdump(report.mbr.sector().as_bytes());
    println!("\nPartition table:");
    hexdump::hexdump(report.mbr.table_bytes());
    for partition in report.ntfs_partitions() {
        println!("\nVBR of partition {}:", partition.number);
        match &partition.vbr {
            Some(Ok(boot)) => hexdump::hexdump(boot.sector().as_bytes()),
            Some(Err(e)) => hexdump::hexdump(e.sector.as_bytes()),
            None => println!("Partition does not exist"),
        }
    }
    println!();
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Expected 3 arguments, got {}", args.len());
        eprintln!("Usage: ntfsboot <log-level> <device>");
        process::exit(ARGUMENT_EXPECTED);
    }
    let debug = &args[1];
    let file_path = &args[2];

    env_logger::Builder::from_env(Env::default().default_filter_or(debug)).init();
    let mut device = match File::open(file_path) {
        Ok(file) => file,
        Err(m) => {
            eprintln!("open: {}", m);
            process::exit(OPEN_ERROR);
        }
    };
    println!("{} opened successfully\n", file_path);

    let report = match ntfsboot::scan(&mut device) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
    };
    if log_enabled!(Level::Debug) {
        dump(&report);
    }
    report.print_info();

    match report.layout {
        DiskLayout::Gpt => process::exit(GPT_FORMATTED),
        DiskLayout::Mbr(_) => process::exit(SUCCESS),
    }
}
