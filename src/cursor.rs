//! Enumeration cursor
//!
//! A cursor walks the candidate space word-major: every mask combination
//! of word 0, then every combination of word 1, and so on. It can jump to
//! any linear offset without replaying earlier candidates. Cursors only
//! borrow the shared pattern and word index, so any number of them can run
//! side by side.

use bstr::ByteSlice;

use crate::candidate::render;
use crate::error::{Error, Result};
use crate::keyspace::{index_to_digits, Keyspace};
use crate::pattern::CompiledPattern;
use crate::wordlist::WordIndex;

/// Per-consumer enumeration state
#[derive(Debug, Clone)]
pub struct Cursor<'e> {
    pattern: &'e CompiledPattern,
    index: &'e WordIndex,
    words: &'e [u8],
    keyspace: Keyspace,
    max_length: usize,

    word_index: u64,
    mask_index: u64,
    offset: u64,
    digits: Vec<u32>,
}

impl<'e> Cursor<'e> {
    /// Create a cursor positioned at the first candidate
    pub fn new(
        pattern: &'e CompiledPattern,
        index: &'e WordIndex,
        words: &'e [u8],
        keyspace: Keyspace,
        max_length: usize,
    ) -> Self {
        let mut digits = vec![0u32; pattern.len()];
        index_to_digits(pattern, 0, &mut digits);

        Self {
            pattern,
            index,
            words,
            keyspace,
            max_length,
            word_index: 0,
            mask_index: 0,
            offset: 0,
            digits,
        }
    }

    /// Render the current candidate into `out` and advance.
    ///
    /// Writes at most `min(out.len(), max_length)` bytes. Returns `None`
    /// once every candidate has been produced, and keeps doing so.
    pub fn next(&mut self, out: &mut [u8]) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }

        let word = self.index.word(self.words, self.word_index as usize);
        let cap = out.len().min(self.max_length);
        let len = render(self.pattern, word, &self.digits, &mut out[..cap]);

        self.advance();

        Some(len)
    }

    /// Jump to linear `offset`; on error the cursor is left untouched
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if offset >= self.keyspace.total {
            return Err(Error::OffsetOutOfRange {
                offset,
                keyspace: self.keyspace.total,
            });
        }

        self.word_index = offset / self.keyspace.mask;
        self.mask_index = offset % self.keyspace.mask;
        self.offset = offset;
        index_to_digits(self.pattern, self.mask_index, &mut self.digits);

        log::debug!(
            "Seek to {} (word {}, mask {})",
            offset,
            self.word_index,
            self.mask_index
        );

        Ok(())
    }

    fn advance(&mut self) {
        self.mask_index += 1;

        if self.mask_index >= self.keyspace.mask {
            self.mask_index = 0;
            self.word_index += 1;
        }

        if !self.is_exhausted() {
            index_to_digits(self.pattern, self.mask_index, &mut self.digits);
        }

        self.offset = self.offset.saturating_add(1);
    }

    /// Linear offset of the next candidate
    pub fn position(&self) -> u64 {
        self.offset
    }

    pub fn word_index(&self) -> u64 {
        self.word_index
    }

    pub fn mask_index(&self) -> u64 {
        self.mask_index
    }

    /// Current digit per position (0 at the word position)
    pub fn digits(&self) -> &[u32] {
        &self.digits
    }

    pub fn keyspace(&self) -> Keyspace {
        self.keyspace
    }

    /// True once every word is done or the (possibly saturated) total is reached
    pub fn is_exhausted(&self) -> bool {
        self.word_index >= self.keyspace.word_count || self.offset >= self.keyspace.total
    }

    /// Candidates left, including the current one
    pub fn remaining(&self) -> u64 {
        if self.is_exhausted() {
            0
        } else {
            self.keyspace.total.saturating_sub(self.offset)
        }
    }

    /// Turn the cursor into an iterator of owned candidates
    pub fn candidates(self) -> Candidates<'e> {
        let buffer = vec![0u8; self.max_length];
        Candidates {
            cursor: self,
            buffer,
        }
    }
}

/// Iterator over owned candidates, see [`Cursor::candidates`]
pub struct Candidates<'e> {
    cursor: Cursor<'e>,
    buffer: Vec<u8>,
}

impl Iterator for Candidates<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.cursor.next(&mut self.buffer)?;
        log::trace!("candidate {}", self.buffer[..len].as_bstr());
        Some(self.buffer[..len].to_vec())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.cursor.remaining()).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}
