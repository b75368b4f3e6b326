//! Output management module
//!
//! Buffers newline-terminated candidates to a file or stdout.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered candidate sink
pub struct OutputWriter {
    writer: BufWriter<Box<dyn Write + Send>>,
    path: Option<PathBuf>,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) an output file
    pub fn create(path: PathBuf, buffer_size: usize) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_output_dir(parent)?;
        }

        let file: File = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self::with_sink(Box::new(file), Some(path), buffer_size))
    }

    /// Write to standard output
    pub fn stdout(buffer_size: usize) -> Self {
        Self::with_sink(Box::new(io::stdout()), None, buffer_size)
    }

    /// Write to any sink
    pub fn with_sink(sink: Box<dyn Write + Send>, path: Option<PathBuf>, buffer_size: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(buffer_size, sink),
            path,
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write one candidate followed by a newline
    pub fn write_candidate(&mut self, candidate: &[u8]) -> io::Result<()> {
        self.writer.write_all(candidate)?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        self.bytes_written += candidate.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Write a block of `lines` already newline-terminated candidates
    pub fn write_block(&mut self, block: &[u8], lines: u64) -> io::Result<()> {
        self.writer.write_all(block)?;
        self.lines_written += lines;
        self.bytes_written += block.len() as u64;
        Ok(())
    }

    /// Flush the buffer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Output path, `None` for stdout
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get number of lines written
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Get bytes written
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> anyhow::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
