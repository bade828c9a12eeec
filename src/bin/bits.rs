use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use std::io::{Write, stdout};
use vaddr_tools::{
    print_bits, set_bits,
    util::{init_tracing_subscriber, parse_decimal, parse_integer},
};

/// Print the bits of an integer, or build an integer from bit positions
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Options {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    subcommand: BitsSubcommand,
}

#[derive(Debug, Subcommand)]
enum BitsSubcommand {
    /// Print one `POSITION BIT` line per bit, least significant bit first
    Print {
        /// The integer, in decimal or in hex with a `0x` prefix
        #[arg(value_parser = parse_integer)]
        n: BigUint,
    },
    /// Print the integer that has exactly the given bits set, in decimal and hex
    Set {
        /// Zero-based bit positions, least significant first
        #[arg(value_parser = parse_position)]
        positions: Vec<u64>,
    },
}

fn main() -> Result<()> {
    let options = Options::parse();

    init_tracing_subscriber(options.debug)?;

    tracing::debug!(target: "bits", ?options, "parsed arguments");

    match options.subcommand {
        BitsSubcommand::Print { n } => {
            let mut stdout = stdout().lock();
            print_bits(n, &mut stdout)?;
            stdout.flush()?;
        }
        BitsSubcommand::Set { positions } => {
            let n = set_bits(positions);
            println!("{n} ({n:#x})");
        }
    }

    Ok(())
}

fn parse_position(s: &str) -> Result<u64> {
    let position = parse_decimal(s)?;
    u64::try_from(&position).with_context(|| format!("bit position `{s}` is too large"))
}
