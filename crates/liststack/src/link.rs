//! Link-field encoding.
//!
//! Every link field and every control-block word is an unsigned
//! little-endian offset into the region, `W` bytes wide. Offset `0` is the
//! null sentinel: it addresses the size word, which is never a link field.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

/// The null sentinel stored in a link field that ends the chain.
pub const NULL_LINK: usize = 0;

/// Width in bytes of a link field (and of each control-block word).
///
/// Links are offsets, not addresses, so the width only bounds how large a
/// region can be addressed; it is independent of the target's pointer width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LinkWidth {
    /// 16-bit offsets. Regions up to 64 KiB.
    Two,
    /// 32-bit offsets. Regions up to 4 GiB.
    #[default]
    Four,
    /// 64-bit offsets.
    Eight,
}

impl LinkWidth {
    /// Number of bytes one link field occupies.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Largest offset a link of this width can encode.
    pub const fn max_offset(self) -> usize {
        match self {
            Self::Two => u16::MAX as usize,
            Self::Four => {
                if usize::BITS > 32 {
                    u32::MAX as usize
                } else {
                    usize::MAX
                }
            }
            Self::Eight => usize::MAX,
        }
    }

    /// Link width matching the target's pointer width.
    pub const fn native() -> Self {
        match std::mem::size_of::<usize>() {
            2 => Self::Two,
            4 => Self::Four,
            _ => Self::Eight,
        }
    }

    /// Decode the link stored at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + self.bytes()` exceeds `region.len()`.
    pub(crate) fn read(self, region: &[u8], offset: usize) -> usize {
        let word = &region[offset..offset + self.bytes()];
        match self {
            Self::Two => LittleEndian::read_u16(word) as usize,
            Self::Four => LittleEndian::read_u32(word) as usize,
            Self::Eight => LittleEndian::read_u64(word) as usize,
        }
    }

    /// Encode `value` into the link field at `offset`.
    ///
    /// `value` must not exceed [`max_offset`](Self::max_offset); callers clamp
    /// the declared region size at construction so every offset fits.
    ///
    /// # Panics
    ///
    /// Panics if `offset + self.bytes()` exceeds `region.len()`.
    pub(crate) fn write(self, region: &mut [u8], offset: usize, value: usize) {
        debug_assert!(value <= self.max_offset());
        let word = &mut region[offset..offset + self.bytes()];
        match self {
            Self::Two => LittleEndian::write_u16(word, value as u16),
            Self::Four => LittleEndian::write_u32(word, value as u32),
            Self::Eight => LittleEndian::write_u64(word, value as u64),
        }
    }
}

impl fmt::Display for LinkWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-byte", self.bytes())
    }
}
