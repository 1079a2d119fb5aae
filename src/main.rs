use clap::Parser;
use ctf_header::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(stats) if stats.is_success() => process::exit(0),
        Ok(stats) => {
            eprintln!("{} file(s) could not be parsed", stats.files_failed);
            process::exit(2);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ctf-header - EBSD Channel Text File metadata extractor");
    println!("======================================================");
    println!();
    println!("Reads the header and phase table of .ctf files and prints the");
    println!("metadata they declare.");
    println!();
    println!("USAGE:");
    println!("    ctf-header <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect     Print the metadata of one or more CTF files");
    println!("    scan        Parse every CTF file under a directory and summarise");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    ctf-header inspect scan.ctf");
    println!("    ctf-header inspect scan.ctf --format json --include-unknown");
    println!("    ctf-header scan /data/ebsd -e txt");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ctf-header <COMMAND> --help");
}
