//! Advisory diagnostics.
//!
//! Conditions that do not stop an operation (misalignment under
//! [`AlignmentPolicy::Warn`](crate::AlignmentPolicy::Warn), a clamped
//! declared size) and admission failures are reported to a
//! [`DiagnosticSink`]. The default [`TracingSink`] forwards them to
//! `tracing` at WARN level.

use std::cell::RefCell;
use std::fmt;

use crate::align::Misalignment;

/// A human-readable warning raised by a list-stack operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// An address or size is not a multiple of the configured alignment.
    Misaligned {
        /// Which value was checked.
        what: Misalignment,
        /// The offending address or size.
        value: usize,
        /// The configured alignment.
        alignment: usize,
    },
    /// A push was refused by the admission check.
    OutOfSpace {
        /// Payload bytes requested.
        requested: usize,
        /// Largest payload that would have been admitted.
        available: usize,
    },
    /// The declared region size was larger than the buffer or than the link
    /// width can address, and was reduced.
    DeclaredSizeClamped {
        /// Size the caller declared.
        declared: usize,
        /// Size actually used.
        clamped: usize,
    },
}

impl Diagnostic {
    /// Short machine-friendly tag for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Misaligned { .. } => "misaligned",
            Self::OutOfSpace { .. } => "out_of_space",
            Self::DeclaredSizeClamped { .. } => "declared_size_clamped",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misaligned {
                what: Misalignment::Size,
                value,
                alignment,
            } => {
                write!(f, "size({value}) is not a multiple of alignment({alignment})")
            }
            Self::Misaligned {
                what,
                value,
                alignment,
            } => {
                write!(f, "{what} {value:#x} not aligned to {alignment}")
            }
            Self::OutOfSpace {
                requested,
                available,
            } => {
                write!(
                    f,
                    "data is too large for stack ({requested} bytes requested, {available} available)"
                )
            }
            Self::DeclaredSizeClamped { declared, clamped } => {
                write!(f, "declared size {declared} clamped to {clamped} bytes")
            }
        }
    }
}

/// Receiver for [`Diagnostic`]s.
///
/// Sinks take `&self` so a stack can report while it holds mutable borrows of
/// its region; implementations needing state use interior mutability.
pub trait DiagnosticSink {
    /// Report one diagnostic.
    fn warn(&self, diagnostic: &Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn warn(&self, diagnostic: &Diagnostic) {
        (**self).warn(diagnostic);
    }
}

/// Forwards diagnostics to `tracing::warn!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, diagnostic: &Diagnostic) {
        tracing::warn!(kind = diagnostic.kind(), "{diagnostic}");
    }
}

/// Keeps every diagnostic in memory, in arrival order.
///
/// Useful for asserting on warnings in tests and for hosts that want to
/// batch diagnostics to a serial console themselves.
#[derive(Debug, Default)]
pub struct RecordingSink {
    seen: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.seen.take()
    }

    /// Number of diagnostics currently held.
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Whether nothing has been recorded since the last [`take`](Self::take).
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, diagnostic: &Diagnostic) {
        self.seen.borrow_mut().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.warn(&Diagnostic::OutOfSpace {
            requested: 9,
            available: 1,
        });
        (&sink).warn(&Diagnostic::DeclaredSizeClamped {
            declared: 1000,
            clamped: 500,
        });
        assert_eq!(sink.len(), 2);
        let seen = sink.take();
        assert_eq!(seen[0].kind(), "out_of_space");
        assert_eq!(seen[1].kind(), "declared_size_clamped");
        assert!(sink.is_empty());
    }

    #[test]
    fn size_diagnostic_reads_like_a_sentence() {
        let d = Diagnostic::Misaligned {
            what: Misalignment::Size,
            value: 21,
            alignment: 4,
        };
        assert_eq!(d.to_string(), "size(21) is not a multiple of alignment(4)");
    }

    #[test]
    fn address_diagnostic_names_the_address() {
        let d = Diagnostic::Misaligned {
            what: Misalignment::Region,
            value: 0x2001,
            alignment: 4,
        };
        assert_eq!(d.to_string(), "region address 0x2001 not aligned to 4");
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.warn(&Diagnostic::OutOfSpace {
            requested: 1,
            available: 0,
        });
    }
}
