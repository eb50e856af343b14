//! Traversal cursors and the record iterator.
//!
//! A [`Cursor`] denotes a link field. The record it exposes is the one whose
//! link field it denotes: the payload spans from just past the predecessor's
//! link field (the value stored in the cursor's own link) up to the cursor.
//! The terminator slot stores the null link, so a cursor positioned there
//! exposes nothing and [`is_end`](Cursor::is_end) holds.
//!
//! Cursors borrow the region, so a stack cannot be mutated while any cursor
//! into it is alive.

use std::fmt;
use std::iter::FusedIterator;

use crate::link::{LinkWidth, NULL_LINK};

/// Read-only position in a stack's chain.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    region: &'a [u8],
    width: LinkWidth,
    link: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(region: &'a [u8], width: LinkWidth, link: usize) -> Self {
        Self {
            region,
            width,
            link,
        }
    }

    /// Offset of the link field this cursor denotes.
    pub fn offset(&self) -> usize {
        self.link
    }

    fn next_link(&self) -> usize {
        self.width.read(self.region, self.link)
    }

    /// True exactly when the cursor sits on the terminator.
    pub fn is_end(&self) -> bool {
        self.next_link() == NULL_LINK
    }

    /// Payload of the record at this cursor, or `None` at the terminator.
    pub fn head(&self) -> Option<&'a [u8]> {
        let next = self.next_link();
        if next == NULL_LINK {
            return None;
        }
        Some(&self.region[next + self.width.bytes()..self.link])
    }

    /// Cursor to the next-older record.
    ///
    /// The tail of the terminator is the terminator itself.
    #[must_use]
    pub fn tail(&self) -> Cursor<'a> {
        let next = self.next_link();
        if next == NULL_LINK {
            return *self;
        }
        Self::new(self.region, self.width, next)
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.region, other.region) && self.link == other.link
    }
}

impl Eq for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("link", &self.link)
            .field("end", &self.is_end())
            .finish()
    }
}

impl<'a> IntoIterator for Cursor<'a> {
    type Item = &'a [u8];
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Records<'a> {
        Records { cursor: self }
    }
}

/// Iterator over record payloads, most recently pushed first.
#[derive(Clone, Debug)]
pub struct Records<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let payload = self.cursor.head()?;
        self.cursor = self.cursor.tail();
        Some(payload)
    }
}

impl FusedIterator for Records<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    const W: LinkWidth = LinkWidth::Two;

    /// Hand-built region: header (6 bytes) then "ab" + link, "xyz" + link.
    fn two_records() -> Vec<u8> {
        let mut region = vec![0u8; 16];
        W.write(&mut region, 0, 16);
        // terminator at 4 is already zero
        region[6..8].copy_from_slice(b"ab");
        W.write(&mut region, 8, 4);
        region[10..13].copy_from_slice(b"xyz");
        W.write(&mut region, 13, 8);
        W.write(&mut region, 2, 13);
        region
    }

    #[test]
    fn walks_front_to_back() {
        let region = two_records();
        let start = Cursor::new(&region, W, 13);
        assert!(!start.is_end());
        assert_eq!(start.head(), Some(&b"xyz"[..]));
        let second = start.tail();
        assert_eq!(second.offset(), 8);
        assert_eq!(second.head(), Some(&b"ab"[..]));
        let end = second.tail();
        assert!(end.is_end());
        assert_eq!(end.head(), None);
    }

    #[test]
    fn tail_of_end_is_end() {
        let region = two_records();
        let end = Cursor::new(&region, W, 4);
        assert_eq!(end.tail(), end);
    }

    #[test]
    fn iterator_is_fused() {
        let region = two_records();
        let mut records = Cursor::new(&region, W, 13).into_iter();
        assert_eq!(records.next(), Some(&b"xyz"[..]));
        assert_eq!(records.next(), Some(&b"ab"[..]));
        assert_eq!(records.next(), None);
        assert_eq!(records.next(), None);
    }
}
