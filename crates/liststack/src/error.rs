//! List-stack error types.

use std::error::Error;
use std::fmt;

use crate::align::Misalignment;

/// Errors that can occur during list-stack operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListStackError {
    /// The record (payload plus link field) does not fit before the end of
    /// the region. The stack is left unmodified.
    OutOfSpace {
        /// Payload bytes requested.
        requested: usize,
        /// Largest payload that would currently be admitted.
        available: usize,
    },
    /// A push or blank push of zero bytes.
    ZeroSized,
    /// An address or size failed the alignment check under
    /// [`AlignmentPolicy::Reject`](crate::AlignmentPolicy::Reject).
    Misaligned {
        /// Which value was checked.
        what: Misalignment,
        /// The offending address or size.
        value: usize,
        /// The configured alignment.
        alignment: usize,
    },
    /// The buffer cannot hold the control block.
    RegionTooSmall {
        /// Usable length of the buffer.
        len: usize,
        /// Bytes required by the control block.
        required: usize,
    },
    /// Configured alignment is zero or not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        alignment: usize,
    },
    /// An existing region failed validation on attach.
    CorruptHeader {
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl fmt::Display for ListStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                available,
            } => {
                write!(
                    f,
                    "data is too large for stack: requested {requested} bytes, room for {available}"
                )
            }
            Self::ZeroSized => write!(f, "records must hold at least one byte"),
            Self::Misaligned {
                what,
                value,
                alignment,
            } => {
                write!(f, "{what} {value:#x} is not aligned to {alignment}")
            }
            Self::RegionTooSmall { len, required } => {
                write!(
                    f,
                    "region of {len} bytes cannot hold a {required}-byte control block"
                )
            }
            Self::InvalidAlignment { alignment } => {
                write!(f, "alignment {alignment} is not a power of two")
            }
            Self::CorruptHeader { reason } => write!(f, "corrupt list-stack region: {reason}"),
        }
    }
}

impl Error for ListStackError {}
