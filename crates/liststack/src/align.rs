//! Alignment predicates for record placement.
//!
//! Records are packed with no padding, so alignment is never enforced by
//! layout. These helpers only decide whether a value is aligned and apply
//! the configured [`AlignmentPolicy`] when it is not.

use std::fmt;

use crate::config::{AlignmentPolicy, ListStackConfig};
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::ListStackError;

/// The value an alignment check was applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Misalignment {
    /// Base address of the caller's buffer.
    Region,
    /// Address the payload is written to.
    Destination,
    /// Address of the caller's payload.
    Source,
    /// Size of a blank record.
    Size,
}

impl fmt::Display for Misalignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Region => "region address",
            Self::Destination => "destination address",
            Self::Source => "source address",
            Self::Size => "record size",
        })
    }
}

/// Whether `value` is a multiple of `alignment`.
///
/// `alignment` must be a power of two.
#[inline]
pub fn is_aligned(value: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    value & (alignment - 1) == 0
}

/// Machine address of the first byte of `bytes`.
#[inline]
pub fn address_of(bytes: &[u8]) -> usize {
    bytes.as_ptr() as usize
}

/// Apply `config.alignment_policy` to `value`.
///
/// Under [`AlignmentPolicy::Warn`] a misaligned value is reported to `sink`
/// and `Ok` is returned; under [`AlignmentPolicy::Reject`] it becomes an error.
pub(crate) fn enforce<S: DiagnosticSink + ?Sized>(
    config: &ListStackConfig,
    sink: &S,
    what: Misalignment,
    value: usize,
) -> Result<(), ListStackError> {
    if config.alignment_policy == AlignmentPolicy::Ignore || is_aligned(value, config.alignment) {
        return Ok(());
    }
    match config.alignment_policy {
        AlignmentPolicy::Reject => Err(ListStackError::Misaligned {
            what,
            value,
            alignment: config.alignment,
        }),
        _ => {
            sink.warn(&Diagnostic::Misaligned {
                what,
                value,
                alignment: config.alignment,
            });
            Ok(())
        }
    }
}

/// Report a misaligned `value` without ever failing.
///
/// Used for the region base address, which construction and attach only
/// warn about. [`AlignmentPolicy::Ignore`] still suppresses the report.
pub(crate) fn advise<S: DiagnosticSink + ?Sized>(
    config: &ListStackConfig,
    sink: &S,
    what: Misalignment,
    value: usize,
) {
    if config.alignment_policy == AlignmentPolicy::Ignore || is_aligned(value, config.alignment) {
        return;
    }
    sink.warn(&Diagnostic::Misaligned {
        what,
        value,
        alignment: config.alignment,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::RecordingSink;

    #[test]
    fn alignment_one_accepts_everything() {
        assert!((0..64).all(|v| is_aligned(v, 1)));
    }

    #[test]
    fn alignment_four_accepts_multiples_only() {
        assert!(is_aligned(0, 4));
        assert!(is_aligned(12, 4));
        assert!(!is_aligned(13, 4));
        assert!(!is_aligned(2, 4));
    }

    #[test]
    fn warn_policy_reports_and_proceeds() {
        let sink = RecordingSink::new();
        let config = ListStackConfig::new(4);
        assert!(enforce(&config, &sink, Misalignment::Size, 7).is_ok());
        assert_eq!(
            sink.take(),
            vec![Diagnostic::Misaligned {
                what: Misalignment::Size,
                value: 7,
                alignment: 4,
            }]
        );
    }

    #[test]
    fn reject_policy_returns_error_silently() {
        let sink = RecordingSink::new();
        let config = ListStackConfig::new(4).with_alignment_policy(AlignmentPolicy::Reject);
        let err = enforce(&config, &sink, Misalignment::Source, 0x1001).unwrap_err();
        assert!(matches!(err, ListStackError::Misaligned { value: 0x1001, .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn ignore_policy_never_reports() {
        let sink = RecordingSink::new();
        let config = ListStackConfig::new(8).with_alignment_policy(AlignmentPolicy::Ignore);
        assert!(enforce(&config, &sink, Misalignment::Destination, 3).is_ok());
        assert!(sink.is_empty());
    }

    #[test]
    fn advise_warns_even_under_reject() {
        let sink = RecordingSink::new();
        let config = ListStackConfig::new(4).with_alignment_policy(AlignmentPolicy::Reject);
        advise(&config, &sink, Misalignment::Region, 0x2002);
        assert_eq!(sink.len(), 1);

        let quiet = ListStackConfig::new(4).with_alignment_policy(AlignmentPolicy::Ignore);
        advise(&quiet, &sink, Misalignment::Region, 0x2002);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn aligned_value_is_silent() {
        let sink = RecordingSink::new();
        let config = ListStackConfig::new(4);
        assert!(enforce(&config, &sink, Misalignment::Destination, 16).is_ok());
        assert!(sink.is_empty());
    }
}
