use anyhow::Result;
use num_bigint::BigUint;
use std::io::Write;

// Zero is written as `0`, so its bit length is 1.
#[must_use]
pub fn bit_length(n: &BigUint) -> u64 {
    n.bits().max(1)
}

#[derive(Clone, Debug)]
pub struct Bits {
    n: BigUint,
    position: u64,
    len: u64,
}

/// Enumerates `(position, bit)` pairs of `n`, least significant bit first. Clone the iterator
/// before consuming it to replay the sequence.
#[must_use]
pub fn bits(n: BigUint) -> Bits {
    let len = bit_length(&n);
    Bits {
        n,
        position: 0,
        len,
    }
}

impl Iterator for Bits {
    type Item = (u64, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.len {
            return None;
        }
        let position = self.position;
        self.position += 1;
        Some((position, self.n.bit(position)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.len - self.position).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits {}

pub fn print_bits(n: BigUint, mut writer: impl Write) -> Result<()> {
    for (position, bit) in bits(n) {
        writeln!(writer, "{position} {}", u8::from(bit))?;
    }
    Ok(())
}

#[must_use]
pub fn set_bits(positions: impl IntoIterator<Item = u64>) -> BigUint {
    let mut n = BigUint::default();
    for position in positions {
        n.set_bit(position, true);
    }
    n
}
