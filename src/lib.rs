use std::env::var_os;

mod bits;
pub use bits::{Bits, bit_length, bits, print_bits, set_bits};

pub mod util;

mod vaddr;
pub use vaddr::{Bounds, Fields, INDEX_BITS, OFFSET_BITS, PREFIX, PREFIX_BITS, Vaddr, assemble};

// Selects `Bounds::Pad` when set to any value.
pub const ALLOW_OVERFLOW: &str = "ALLOW_OVERFLOW";

#[must_use]
pub fn bounds(allow_overflow: bool) -> Bounds {
    if allow_overflow || var_os(ALLOW_OVERFLOW).is_some() {
        Bounds::Pad
    } else {
        Bounds::Strict
    }
}
