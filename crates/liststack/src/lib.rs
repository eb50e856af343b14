//! A singly-linked stack laid out sequentially in one caller-supplied region.
//!
//! Built for targets without an allocator: the caller hands over a byte
//! buffer, a small control block is written at its start, and every record
//! is bump-allocated after it. Links are stored after each payload and hold
//! offsets, not addresses, so a region can be copied and re-attached.
//!
//! # Layout
//!
//! ```text
//! 0      W      2W     3W
//! ┌──────┬──────┬──────┬───────────┬──────┬───────────┬──────┐
//! │ size │ head │ NULL │ payload 1 │ 2W   │ payload 2 │ L1   │ ...
//! └──────┴──────┴──────┴───────────┴──────┴───────────┴──────┘
//!                                    L1                 L2 = head
//! ```
//!
//! Each link holds the previous head; the head word points at the newest
//! link. Traversal therefore runs newest to oldest.
//!
//! # Example
//!
//! ```
//! use liststack::ListStack;
//!
//! let mut mem = [0u8; 128];
//! let mut stack = ListStack::new(&mut mem[..], 128)?;
//! stack.push(b"older")?.push(b"newer")?;
//!
//! let mut cursor = stack.start();
//! assert_eq!(cursor.head(), Some(&b"newer"[..]));
//! cursor = cursor.tail();
//! assert_eq!(cursor.head(), Some(&b"older"[..]));
//! assert!(cursor.tail().is_end());
//! # Ok::<(), liststack::ListStackError>(())
//! ```
//!
//! # Concurrency
//!
//! No internal synchronization. Mutating methods take `&mut self`; wrap the
//! stack in a `Mutex` to share it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod config;
pub mod cursor;
pub mod diag;
pub mod error;
pub mod header;
pub mod link;
pub mod stack;

// Public re-exports for the primary API surface.
pub use align::Misalignment;
pub use config::{AlignmentPolicy, ListStackConfig};
pub use cursor::{Cursor, Records};
pub use diag::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use error::ListStackError;
pub use link::LinkWidth;
pub use stack::ListStack;
