//! Assembling 64-bit virtual addresses from page-table indices and a page offset.
//!
//! An address is laid out, from most to least significant bit, as:
//!
//! ```text
//! | prefix (25) | level 1 (9) | level 2 (9) | level 3 (9) | offset (12) |
//! ```
//!
//! The prefix is always all ones.

use crate::util::binary_to_hex;
use anyhow::{Result, ensure};
use num_bigint::BigUint;
use tracing::{debug, warn};

pub const PREFIX_BITS: u32 = 25;
pub const INDEX_BITS: u32 = 9;
pub const OFFSET_BITS: u32 = 12;

pub const PREFIX: u64 = !0 << (u64::BITS - PREFIX_BITS);

const L1_SHIFT: u32 = OFFSET_BITS + 2 * INDEX_BITS;
const L2_SHIFT: u32 = OFFSET_BITS + INDEX_BITS;
const L3_SHIFT: u32 = OFFSET_BITS;

const _: () = assert!(PREFIX_BITS + 3 * INDEX_BITS + OFFSET_BITS == u64::BITS);

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Fields {
    pub l1_index: BigUint,
    pub l2_index: BigUint,
    pub l3_index: BigUint,
    pub offset: BigUint,
}

/// What to do with a field that does not fit in its nominal width.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Bounds {
    /// Fail with an out-of-range error.
    #[default]
    Strict,
    /// Keep the field at its natural width. The assembled address is then wider than 64 bits.
    Pad,
}

impl Fields {
    #[must_use]
    pub fn new(l1_index: u64, l2_index: u64, l3_index: u64, offset: u64) -> Self {
        Self {
            l1_index: l1_index.into(),
            l2_index: l2_index.into(),
            l3_index: l3_index.into(),
            offset: offset.into(),
        }
    }

    fn named(&self) -> [(&'static str, &BigUint, u32); 4] {
        [
            ("level-1 index", &self.l1_index, INDEX_BITS),
            ("level-2 index", &self.l2_index, INDEX_BITS),
            ("level-3 index", &self.l3_index, INDEX_BITS),
            ("page offset", &self.offset, OFFSET_BITS),
        ]
    }

    fn check_bounds(&self) -> Result<()> {
        for (name, value, width) in self.named() {
            ensure!(
                value.bits() <= u64::from(width),
                "{name} {value} is out of range: it does not fit in {width} bits (maximum {})",
                (1u64 << width) - 1
            );
        }
        Ok(())
    }

    // Each field is zero-padded to its nominal width but never truncated.
    fn bit_string(&self) -> String {
        let mut bits = "1".repeat(PREFIX_BITS as usize);
        for (_, value, width) in self.named() {
            let digits = value.to_str_radix(2);
            bits.push_str(&format!("{digits:0>width$}", width = width as usize));
        }
        bits
    }
}

#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Vaddr(u64);

impl Vaddr {
    pub fn new(fields: &Fields) -> Result<Self> {
        fields.check_bounds()?;
        Ok(Self(
            PREFIX
                | (u64::try_from(&fields.l1_index)? << L1_SHIFT)
                | (u64::try_from(&fields.l2_index)? << L2_SHIFT)
                | (u64::try_from(&fields.l3_index)? << L3_SHIFT)
                | u64::try_from(&fields.offset)?,
        ))
    }

    // The prefix bits are ignored.
    #[must_use]
    pub fn fields(self) -> Fields {
        const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;
        const OFFSET_MASK: u64 = (1 << OFFSET_BITS) - 1;
        Fields::new(
            (self.0 >> L1_SHIFT) & INDEX_MASK,
            (self.0 >> L2_SHIFT) & INDEX_MASK,
            (self.0 >> L3_SHIFT) & INDEX_MASK,
            self.0 & OFFSET_MASK,
        )
    }

    #[must_use]
    pub const fn has_canonical_prefix(self) -> bool {
        self.0 & PREFIX == PREFIX
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Debug for Vaddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("0x{:x}", self.0))
    }
}

impl std::fmt::Display for Vaddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::fmt::LowerHex for Vaddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<u64> for Vaddr {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Assembles `fields` into a lowercase hex address string such as `0xffffff8000000000`.
///
/// With [`Bounds::Strict`], a field wider than its nominal width is an error. With
/// [`Bounds::Pad`], the field is kept whole and the result is wider than 64 bits. For in-range
/// fields both policies agree.
pub fn assemble(fields: &Fields, bounds: Bounds) -> Result<String> {
    let hex = match bounds {
        Bounds::Strict => Vaddr::new(fields)?.to_string(),
        Bounds::Pad => {
            let bits = fields.bit_string();
            if bits.len() > u64::BITS as usize {
                warn!(
                    width = bits.len(),
                    "a field exceeds its nominal width; address is wider than 64 bits"
                );
            }
            binary_to_hex(&bits)?
        }
    };
    debug!(?fields, ?bounds, %hex, "assembled address");
    Ok(hex)
}
