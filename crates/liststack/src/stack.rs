//! The list-stack itself.
//!
//! [`ListStack`] interprets a caller-supplied byte buffer as a control block
//! followed by a bump-allocated chain of `[payload][link]` records. Pushing
//! advances the head past the new record's link field; popping moves the head
//! back to the previous link field, so the next push reuses those bytes.

use std::fmt;

use crate::align::{self, Misalignment};
use crate::config::ListStackConfig;
use crate::cursor::{Cursor, Records};
use crate::diag::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::ListStackError;
use crate::header::{self, ControlBlock};
use crate::link::{LinkWidth, NULL_LINK};

/// A singly-linked stack of variable-length records inside one byte region.
///
/// `B` is the backing storage: a borrowed `&mut [u8]`, an array, or an owned
/// `Vec<u8>`. The stack never allocates. `S` receives advisory diagnostics.
///
/// All state (declared size and head offset) lives in the region's control
/// block. Mutation needs `&mut self`; share across threads only behind an
/// external lock.
pub struct ListStack<B, S = TracingSink> {
    region: B,
    config: ListStackConfig,
    sink: S,
}

impl<B> ListStack<B, TracingSink>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Build an empty stack over `buffer` with the default config.
    ///
    /// `declared_size` larger than the buffer is clamped with a diagnostic.
    pub fn new(buffer: B, declared_size: usize) -> Result<Self, ListStackError> {
        Self::with_config(buffer, declared_size, ListStackConfig::default())
    }

    /// Build an empty stack over `buffer` with an explicit config.
    pub fn with_config(
        buffer: B,
        declared_size: usize,
        config: ListStackConfig,
    ) -> Result<Self, ListStackError> {
        Self::with_sink(buffer, declared_size, config, TracingSink)
    }

    /// Reopen a region that already holds a stack.
    pub fn attach(buffer: B, config: ListStackConfig) -> Result<Self, ListStackError> {
        Self::attach_with_sink(buffer, config, TracingSink)
    }
}

impl<B, S> ListStack<B, S>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    S: DiagnosticSink,
{
    /// Build an empty stack, reporting diagnostics to `sink`.
    ///
    /// Writes the control block into the first bytes of `buffer`. Fails only
    /// on an invalid config or a region too small for the control block; a
    /// misaligned base address is reported to `sink` under every policy but
    /// [`AlignmentPolicy::Ignore`](crate::AlignmentPolicy::Ignore).
    pub fn with_sink(
        mut buffer: B,
        declared_size: usize,
        config: ListStackConfig,
        sink: S,
    ) -> Result<Self, ListStackError> {
        config.validate()?;
        let width = config.link_width;
        let required = ControlBlock::encoded_len(width);

        let len = buffer.as_ref().len();
        let size = declared_size.min(len).min(width.max_offset());
        if size != declared_size {
            sink.warn(&Diagnostic::DeclaredSizeClamped {
                declared: declared_size,
                clamped: size,
            });
        }
        if size < required {
            return Err(ListStackError::RegionTooSmall {
                len: size,
                required,
            });
        }

        align::advise(
            &config,
            &sink,
            Misalignment::Region,
            align::address_of(buffer.as_ref()),
        );

        ControlBlock::empty(size, width).write(buffer.as_mut(), width);
        Ok(Self {
            region: buffer,
            config,
            sink,
        })
    }

    /// Reopen a region that already holds a stack, reporting to `sink`.
    ///
    /// The whole chain is validated, since links are offsets and the bytes
    /// may have been copied from elsewhere.
    pub fn attach_with_sink(
        buffer: B,
        config: ListStackConfig,
        sink: S,
    ) -> Result<Self, ListStackError> {
        config.validate()?;
        ControlBlock::read_checked(buffer.as_ref(), config.link_width)?;
        align::advise(
            &config,
            &sink,
            Misalignment::Region,
            align::address_of(buffer.as_ref()),
        );
        Ok(Self {
            region: buffer,
            config,
            sink,
        })
    }

    /// Whether `size` payload bytes plus a link field fit before the end of
    /// the region.
    pub fn room_for(&self, size: usize) -> bool {
        self.head()
            .checked_add(2 * self.width().bytes())
            .and_then(|end| end.checked_add(size))
            .is_some_and(|end| end <= self.declared_size())
    }

    fn admit(&self, size: usize) -> Result<(), ListStackError> {
        if size == 0 {
            return Err(ListStackError::ZeroSized);
        }
        if !self.room_for(size) {
            let available = self.remaining();
            self.sink.warn(&Diagnostic::OutOfSpace {
                requested: size,
                available,
            });
            return Err(ListStackError::OutOfSpace {
                requested: size,
                available,
            });
        }
        Ok(())
    }

    /// Copy `payload` into a new front record.
    ///
    /// On failure the stack is unchanged.
    pub fn push(&mut self, payload: &[u8]) -> Result<&mut Self, ListStackError> {
        self.admit(payload.len())?;
        let start = self.payload_start();
        self.check_alignment(Misalignment::Destination, self.base_address() + start)?;
        self.check_alignment(Misalignment::Source, align::address_of(payload))?;

        let end = start + payload.len();
        self.region.as_mut()[start..end].copy_from_slice(payload);
        self.splice(end);
        Ok(self)
    }

    /// Reserve a zeroed front record of `size` bytes and return it for the
    /// caller to fill in place.
    pub fn push_blank(&mut self, size: usize) -> Result<&mut [u8], ListStackError> {
        self.admit(size)?;
        self.check_alignment(Misalignment::Size, size)?;
        let start = self.payload_start();
        self.check_alignment(Misalignment::Destination, self.base_address() + start)?;

        let end = start + size;
        self.splice(end);
        let payload = &mut self.region.as_mut()[start..end];
        payload.fill(0);
        Ok(payload)
    }

    /// Write the current head into the link field at `link` and make it the head.
    fn splice(&mut self, link: usize) {
        let width = self.width();
        let head = self.head();
        let region = self.region.as_mut();
        width.write(region, link, head);
        header::write_head(region, width, link);
    }

    /// Discard the front record and return its payload.
    ///
    /// No bytes are reclaimed or cleared; the next push overwrites them.
    /// Returns `None` when already empty.
    pub fn pop(&mut self) -> Option<&[u8]> {
        let width = self.width();
        let head = self.head();
        let region = self.region.as_mut();
        let next = width.read(region, head);
        if next == NULL_LINK {
            return None;
        }
        header::write_head(region, width, next);
        Some(&region[next + width.bytes()..head])
    }

    /// Discard every record.
    pub fn clear(&mut self) {
        let width = self.width();
        header::write_head(self.region.as_mut(), width, ControlBlock::terminator(width));
    }

    /// Mutable access to the front payload.
    pub fn front_mut(&mut self) -> Option<&mut [u8]> {
        let width = self.width();
        let head = self.head();
        let region = self.region.as_mut();
        let next = width.read(region, head);
        if next == NULL_LINK {
            return None;
        }
        Some(&mut region[next + width.bytes()..head])
    }

    fn check_alignment(&self, what: Misalignment, value: usize) -> Result<(), ListStackError> {
        align::enforce(&self.config, &self.sink, what, value)
    }
}

impl<B, S> ListStack<B, S>
where
    B: AsRef<[u8]>,
{
    fn width(&self) -> LinkWidth {
        self.config.link_width
    }

    fn head(&self) -> usize {
        header::read_head(self.region.as_ref(), self.width())
    }

    fn payload_start(&self) -> usize {
        self.head() + self.width().bytes()
    }

    fn base_address(&self) -> usize {
        align::address_of(self.region.as_ref())
    }

    /// Size the stack manages, after any clamping at construction.
    pub fn declared_size(&self) -> usize {
        ControlBlock::read(self.region.as_ref(), self.width()).size
    }

    /// The managed bytes: control block and records.
    pub fn as_bytes(&self) -> &[u8] {
        &self.region.as_ref()[..self.declared_size()]
    }

    /// Cursor at the front record, or at the terminator when empty.
    pub fn start(&self) -> Cursor<'_> {
        Cursor::new(self.as_bytes(), self.width(), self.head())
    }

    /// Payload of the front record.
    pub fn front(&self) -> Option<&[u8]> {
        self.start().head()
    }

    /// Iterate payloads from most to least recently pushed.
    pub fn iter(&self) -> Records<'_> {
        self.start().into_iter()
    }

    /// Number of records. Walks the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the head is the terminator.
    pub fn is_empty(&self) -> bool {
        self.start().is_end()
    }

    /// Bytes in use, control block included.
    pub fn used(&self) -> usize {
        self.payload_start()
    }

    /// Largest payload the next push would admit.
    pub fn remaining(&self) -> usize {
        self.declared_size()
            .saturating_sub(self.head() + 2 * self.width().bytes())
    }

    /// The config this stack was built with.
    pub fn config(&self) -> &ListStackConfig {
        &self.config
    }

    /// Width of every link field.
    pub fn link_width(&self) -> LinkWidth {
        self.width()
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the backing buffer back. The stack can be re-attached later.
    pub fn into_inner(self) -> B {
        self.region
    }
}

impl<'a, B, S> IntoIterator for &'a ListStack<B, S>
where
    B: AsRef<[u8]>,
{
    type Item = &'a [u8];
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Records<'a> {
        self.iter()
    }
}

impl<B, S> fmt::Debug for ListStack<B, S>
where
    B: AsRef<[u8]>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListStack")
            .field("declared_size", &self.declared_size())
            .field("head", &self.head())
            .field("len", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
