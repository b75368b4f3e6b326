//! Word-list source and line index
//!
//! The word list is read as raw bytes, never copied or transcoded. A
//! [`WordIndex`] records where each line starts and how long it is so a
//! cursor can fetch word *n* in constant time.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{Error, Result};

/// Memory-mapped word-list file
pub struct Wordlist {
    mmap: Mmap,
    path: PathBuf,
}

impl Wordlist {
    /// Map `path` read-only
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let len = file.metadata().map_err(|e| Error::io(path, e))?.len();

        if len == 0 {
            return Err(Error::EmptyWordlist);
        }

        // The mapping is private and read-only; the file is not expected to
        // be truncated while candidates are generated.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::io(path, e))?;

        advise_sequential(&mmap, path);

        Ok(Self {
            mmap,
            path: path.to_path_buf(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Size of the file in bytes
    pub fn size(&self) -> usize {
        self.mmap.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Offset and length of every line of a word-list buffer, in file order
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    offsets: Vec<u64>,
    lengths: Vec<u32>,
}

impl WordIndex {
    /// Scan `data` and index every line.
    ///
    /// Lines end at `\n`; one trailing `\r` is dropped from the recorded
    /// length. A final line without a newline still counts.
    pub fn build(data: &[u8]) -> Result<Self> {
        let count = count_lines(data);

        if count == 0 {
            return Err(Error::EmptyWordlist);
        }

        let capacity = usize::try_from(count).map_err(|_| Error::CapacityExceeded { count })?;
        let mut offsets = Vec::new();
        let mut lengths = Vec::new();
        offsets
            .try_reserve_exact(capacity)
            .map_err(|_| Error::CapacityExceeded { count })?;
        lengths
            .try_reserve_exact(capacity)
            .map_err(|_| Error::CapacityExceeded { count })?;

        let mut start = 0;
        let ends = memchr::memchr_iter(b'\n', data).chain(
            // Unterminated last line
            (data.last() != Some(&b'\n')).then_some(data.len()),
        );

        for end in ends {
            let line = &data[start..end];
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let len = u32::try_from(line.len()).map_err(|_| Error::CapacityExceeded { count })?;

            offsets.push(start as u64);
            lengths.push(len);
            start = end + 1;
        }

        debug_assert_eq!(offsets.len() as u64, count);

        Ok(Self { offsets, lengths })
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset and trimmed length of word `index`
    #[inline]
    pub fn entry(&self, index: usize) -> (u64, u32) {
        (self.offsets[index], self.lengths[index])
    }

    /// Bytes of word `index` inside the buffer the index was built from
    #[inline]
    pub fn word<'a>(&self, data: &'a [u8], index: usize) -> &'a [u8] {
        let (offset, len) = self.entry(index);
        let start = offset as usize;
        &data[start..start + len as usize]
    }

    /// Longest recorded word
    pub fn max_word_len(&self) -> u32 {
        self.lengths.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(unix)]
fn advise_sequential(mmap: &Mmap, path: &Path) {
    if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
        log::debug!("madvise(SEQUENTIAL) failed for {:?}: {}", path, e);
    }
}

#[cfg(not(unix))]
fn advise_sequential(_mmap: &Mmap, _path: &Path) {}

/// Newline-terminated lines plus one for an unterminated tail
fn count_lines(data: &[u8]) -> u64 {
    let newlines = memchr::memchr_iter(b'\n', data).count() as u64;
    let tail = matches!(data.last(), Some(&b) if b != b'\n');
    newlines + tail as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn words(data: &[u8]) -> Vec<&[u8]> {
        let index = WordIndex::build(data).unwrap();
        (0..index.len()).map(|i| index.word(data, i)).collect()
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"a"), 1);
        assert_eq!(count_lines(b"a\n"), 1);
        assert_eq!(count_lines(b"a\nb"), 2);
        assert_eq!(count_lines(b"\n\n"), 2);
    }

    #[test]
    fn test_lf_and_unterminated_tail() {
        assert_eq!(words(b"a\nbb\nccc"), vec![&b"a"[..], &b"bb"[..], &b"ccc"[..]]);
        assert_eq!(words(b"a\nbb\nccc\n"), vec![&b"a"[..], &b"bb"[..], &b"ccc"[..]]);
    }

    #[test]
    fn test_crlf_is_stripped_once() {
        assert_eq!(words(b"one\r\ntwo\r\n"), vec![&b"one"[..], &b"two"[..]]);
        assert_eq!(words(b"x\r\r\n"), vec![&b"x\r"[..]]);
        assert_eq!(words(b"tail\r"), vec![&b"tail"[..]]);
    }

    #[test]
    fn test_blank_lines_are_words() {
        let data = b"a\n\nb\n";
        let index = WordIndex::build(data).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.entry(1), (2, 0));
        assert_eq!(index.word(data, 1), b"");
    }

    #[test]
    fn test_offsets() {
        let index = WordIndex::build(b"ab\r\ncd\nefg").unwrap();

        assert_eq!(index.entry(0), (0, 2));
        assert_eq!(index.entry(1), (4, 2));
        assert_eq!(index.entry(2), (7, 3));
        assert_eq!(index.max_word_len(), 3);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(matches!(WordIndex::build(b""), Err(Error::EmptyWordlist)));
    }

    #[test]
    fn test_open_maps_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "alpha\r\nbeta\n").unwrap();
        file.flush().unwrap();

        let wordlist = Wordlist::open(file.path()).unwrap();
        assert_eq!(wordlist.size(), 12);
        assert_eq!(words(wordlist.as_bytes()), vec![&b"alpha"[..], &b"beta"[..]]);
    }

    #[test]
    fn test_open_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(Wordlist::open(file.path()), Err(Error::EmptyWordlist)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Wordlist::open(Path::new("/nonexistent/words.txt")).err().unwrap();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.to_string(), "Cannot read wordlist /nonexistent/words.txt");
    }
}
