//! The control block stored at the start of every region.
//!
//! ```text
//! 0      size word         declared region size
//! W      head word         offset of the front record's link field
//! 2W     terminator slot   always NULL_LINK
//! 3W..   records           [payload][link] ...
//! ```
//!
//! The control block is the only source of truth: a [`ListStack`](crate::ListStack)
//! keeps no shadow copy of size or head, so the raw bytes can be copied to
//! another buffer and re-attached.

use crate::error::ListStackError;
use crate::link::{LinkWidth, NULL_LINK};

/// Decoded control block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlBlock {
    /// Declared region size in bytes (header included).
    pub size: usize,
    /// Offset of the front record's link field, or the terminator slot.
    pub head: usize,
}

impl ControlBlock {
    /// Bytes occupied by the control block for the given link width.
    pub const fn encoded_len(width: LinkWidth) -> usize {
        3 * width.bytes()
    }

    /// Offset of the head word.
    pub const fn head_word(width: LinkWidth) -> usize {
        width.bytes()
    }

    /// Offset of the terminator slot, which is also the head of an empty stack.
    pub const fn terminator(width: LinkWidth) -> usize {
        2 * width.bytes()
    }

    /// Control block of an empty stack over `size` bytes.
    pub fn empty(size: usize, width: LinkWidth) -> Self {
        Self {
            size,
            head: Self::terminator(width),
        }
    }

    /// Encode into the first [`encoded_len`](Self::encoded_len) bytes of `region`.
    pub fn write(&self, region: &mut [u8], width: LinkWidth) {
        width.write(region, 0, self.size);
        width.write(region, Self::head_word(width), self.head);
        width.write(region, Self::terminator(width), NULL_LINK);
    }

    /// Decode without validation.
    pub fn read(region: &[u8], width: LinkWidth) -> Self {
        Self {
            size: width.read(region, 0),
            head: read_head(region, width),
        }
    }

    /// Decode and check that `region` holds a well-formed stack.
    ///
    /// Walks the whole chain: every link must point strictly backwards at a
    /// link field inside the record area, ending at the terminator slot.
    pub fn read_checked(region: &[u8], width: LinkWidth) -> Result<Self, ListStackError> {
        let w = width.bytes();
        let header = Self::encoded_len(width);
        if region.len() < header {
            return Err(ListStackError::RegionTooSmall {
                len: region.len(),
                required: header,
            });
        }

        let block = Self::read(region, width);
        if block.size < header {
            return Err(corrupt("size word smaller than the control block"));
        }
        if block.size > region.len() {
            return Err(corrupt("size word exceeds the buffer"));
        }
        if width.read(region, Self::terminator(width)) != NULL_LINK {
            return Err(corrupt("terminator slot is not null"));
        }

        let terminator = Self::terminator(width);
        let mut cursor = block.head;
        // block.size >= header, and cursor >= header past the lower-bound test,
        // so neither subtraction can underflow.
        if cursor != terminator && (cursor < header || cursor > block.size - w) {
            return Err(corrupt("head points outside the record area"));
        }
        while cursor != terminator {
            let link = width.read(region, cursor);
            if link != terminator && link < header {
                return Err(corrupt("link points into the control block"));
            }
            if link > cursor - w {
                return Err(corrupt("link does not point backwards"));
            }
            cursor = link;
        }
        Ok(block)
    }
}

pub(crate) fn read_head(region: &[u8], width: LinkWidth) -> usize {
    width.read(region, ControlBlock::head_word(width))
}

pub(crate) fn write_head(region: &mut [u8], width: LinkWidth, head: usize) {
    width.write(region, ControlBlock::head_word(width), head);
}

fn corrupt(reason: &'static str) -> ListStackError {
    ListStackError::CorruptHeader { reason }
}
