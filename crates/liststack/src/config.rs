//! List-stack configuration parameters.

use crate::error::ListStackError;
use crate::link::LinkWidth;

/// What to do when an address or size fails the configured alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlignmentPolicy {
    /// Report a [`Diagnostic`](crate::Diagnostic) and proceed with the write.
    #[default]
    Warn,
    /// Skip alignment checks entirely.
    Ignore,
    /// Fail the operation with [`ListStackError::Misaligned`] before any write.
    Reject,
}

/// Configuration for a [`ListStack`](crate::ListStack).
///
/// Controls record alignment, the width of link fields, and how alignment
/// violations are handled. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListStackConfig {
    /// Boundary (in bytes) that payload and link addresses should respect.
    ///
    /// Default: 1. Must be a power of two.
    pub alignment: usize,

    /// Width of each link field and control-block word.
    ///
    /// Default: [`LinkWidth::Four`], which addresses regions up to 4 GiB.
    pub link_width: LinkWidth,

    /// Handling of misaligned writes.
    ///
    /// Default: [`AlignmentPolicy::Warn`].
    pub alignment_policy: AlignmentPolicy,
}

impl ListStackConfig {
    /// Default alignment. Targets that fault on unaligned access should
    /// configure 4 (or their word size) explicitly.
    pub const DEFAULT_ALIGNMENT: usize = 1;

    /// Default link width.
    pub const DEFAULT_LINK_WIDTH: LinkWidth = LinkWidth::Four;

    /// Create a config with the given alignment and defaults elsewhere.
    pub fn new(alignment: usize) -> Self {
        Self {
            alignment,
            link_width: Self::DEFAULT_LINK_WIDTH,
            alignment_policy: AlignmentPolicy::default(),
        }
    }

    /// Builder-style override of the link width.
    pub fn with_link_width(mut self, link_width: LinkWidth) -> Self {
        self.link_width = link_width;
        self
    }

    /// Builder-style override of the alignment policy.
    pub fn with_alignment_policy(mut self, policy: AlignmentPolicy) -> Self {
        self.alignment_policy = policy;
        self
    }

    /// Check structural invariants.
    ///
    /// Returns [`ListStackError::InvalidAlignment`] unless `alignment` is a
    /// non-zero power of two.
    pub fn validate(&self) -> Result<(), ListStackError> {
        if !self.alignment.is_power_of_two() {
            return Err(ListStackError::InvalidAlignment {
                alignment: self.alignment,
            });
        }
        Ok(())
    }

    /// Size in bytes of the control block at the start of the region.
    pub fn header_bytes(&self) -> usize {
        crate::header::ControlBlock::encoded_len(self.link_width)
    }
}

impl Default for ListStackConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALIGNMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ListStackConfig::default().validate().is_ok());
    }

    #[test]
    fn header_is_three_link_words() {
        let config = ListStackConfig::new(1).with_link_width(LinkWidth::Two);
        assert_eq!(config.header_bytes(), 6);
        let config = ListStackConfig::new(1).with_link_width(LinkWidth::Eight);
        assert_eq!(config.header_bytes(), 24);
    }

    #[test]
    fn default_alignment_is_one() {
        assert_eq!(ListStackConfig::default().alignment, 1);
    }

    #[test]
    fn zero_alignment_rejected() {
        let err = ListStackConfig::new(0).validate().unwrap_err();
        assert_eq!(err, ListStackError::InvalidAlignment { alignment: 0 });
    }

    #[test]
    fn non_power_of_two_alignment_rejected() {
        assert!(ListStackConfig::new(3).validate().is_err());
        assert!(ListStackConfig::new(8).validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let config = ListStackConfig::new(4)
            .with_link_width(LinkWidth::Eight)
            .with_alignment_policy(AlignmentPolicy::Reject);
        assert_eq!(config.alignment, 4);
        assert_eq!(config.link_width, LinkWidth::Eight);
        assert_eq!(config.alignment_policy, AlignmentPolicy::Reject);
    }
}
