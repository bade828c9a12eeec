use anyhow::{Context, Result, anyhow, bail, ensure};
use num_bigint::BigUint;
use tracing::Level;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

pub fn init_tracing_subscriber(debug: bool) -> Result<()> {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to install tracing subscriber: {}", error.to_string()))
}

/// Converts a string of `'0'`/`'1'` characters of any width to lowercase hex with a `0x` prefix.
///
/// Leading zeros are dropped, except that an all-zero (or empty) string yields `0x0`.
pub fn binary_to_hex(bits: &str) -> Result<String> {
    let digits = bits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(String::from("0x0"));
    }

    // Left-pad to a whole number of nibbles so that each chunk maps to one hex digit.
    let padding = (4 - digits.len() % 4) % 4;
    let padded = "0".repeat(padding) + digits;

    let mut hex = String::with_capacity(2 + padded.len() / 4);
    hex.push_str("0x");
    for chunk in padded.as_bytes().chunks(4) {
        let mut nibble = 0usize;
        for &byte in chunk {
            let bit = match byte {
                b'0' => 0,
                b'1' => 1,
                _ => bail!("invalid binary string `{bits}`"),
            };
            nibble = (nibble << 1) | bit;
        }
        hex.push(char::from(HEX_DIGITS[nibble]));
    }
    Ok(hex)
}

pub fn parse_decimal(s: &str) -> Result<BigUint> {
    reject_negative(s)?;
    parse_digits(s, 10).with_context(|| format!("invalid decimal integer `{s}`"))
}

// A `0x` or `0X` prefix is optional.
pub fn parse_hex(s: &str) -> Result<BigUint> {
    reject_negative(s)?;
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    parse_digits(digits, 16).with_context(|| format!("invalid hexadecimal integer `{s}`"))
}

// Hexadecimal if it starts with `0x`, decimal otherwise.
pub fn parse_integer(s: &str) -> Result<BigUint> {
    if s.starts_with("0x") || s.starts_with("0X") {
        parse_hex(s)
    } else {
        parse_decimal(s)
    }
}

// `BigUint::parse_bytes` tolerates a leading `+` and `_` separators, so check the digits first.
fn parse_digits(digits: &str, radix: u32) -> Result<BigUint> {
    ensure!(
        !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)),
        "unexpected character"
    );
    BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| anyhow!("unparsable digits"))
}

fn reject_negative(s: &str) -> Result<()> {
    ensure!(
        !s.trim_start().starts_with('-'),
        "invalid input: negative value `{s}`"
    );
    Ok(())
}
