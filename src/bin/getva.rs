use anyhow::Result;
use clap::Parser;
use num_bigint::BigUint;
use vaddr_tools::{
    Fields, assemble, bounds,
    util::{init_tracing_subscriber, parse_decimal, parse_hex},
};

/// Assemble a virtual address from three page-table indices and a page offset
///
/// The address is printed in hex: 25 one-bits, then the level-1, level-2 and level-3 indices
/// (9 bits each), then the page offset (12 bits).
#[derive(Debug, Parser)]
#[command(author, version, about, allow_negative_numbers = true)]
struct Options {
    /// Level-1 page-table index, in decimal (0-511)
    #[arg(value_parser = parse_decimal)]
    l1_index: BigUint,

    /// Level-2 page-table index, in decimal (0-511)
    #[arg(value_parser = parse_decimal)]
    l2_index: BigUint,

    /// Level-3 page-table index, in decimal (0-511)
    #[arg(value_parser = parse_decimal)]
    l3_index: BigUint,

    /// Page offset, in hex with or without a `0x` prefix (0-fff)
    #[arg(value_parser = parse_hex, allow_hyphen_values = true)]
    offset: BigUint,

    /// Keep oversized fields whole instead of failing; the address may then exceed 64 bits.
    /// Setting `ALLOW_OVERFLOW` in the environment has the same effect.
    #[arg(long)]
    allow_overflow: bool,

    /// Log debug output to stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let options = Options::parse();

    init_tracing_subscriber(options.debug)?;

    tracing::debug!(target: "getva", ?options, "parsed arguments");

    let fields = Fields {
        l1_index: options.l1_index,
        l2_index: options.l2_index,
        l3_index: options.l3_index,
        offset: options.offset,
    };

    let hex = assemble(&fields, bounds(options.allow_overflow))?;

    println!("{hex}");

    Ok(())
}
