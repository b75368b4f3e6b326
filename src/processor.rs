//! Core processing engine
//!
//! Drives cursors over a candidate range and writes the results, either on
//! one thread or split into chunks rendered in parallel and written back in
//! order.

use crate::cli::Args;
use crate::engine::Engine;
use crate::error::Error;
use crate::keyspace::Keyspace;
use crate::output::OutputWriter;
use crate::progress::{create_progress_bar, print_header, print_info, print_success, GenerationStats};

use bstr::ByteSlice;
use colored::*;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;

/// Progress bar updates are batched to keep the hot loop cheap
const PROGRESS_STEP: u64 = 4096;

/// Chunks rendered per thread before a batch is flushed
const CHUNKS_PER_THREAD: usize = 4;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub skip: u64,
    pub limit: Option<u64>,
    pub output: Option<PathBuf>,
    pub threads: usize,
    pub chunk_size: u64,
    pub buffer_size: usize,
    pub quiet: bool,
    pub verbose: bool,
    pub show_stats: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        if args.chunk_size == 0 {
            anyhow::bail!("--chunk-size must be at least 1");
        }

        Ok(Self {
            skip: args.skip,
            limit: args.limit,
            output: args.output.clone(),
            threads: args.thread_count(),
            chunk_size: args.chunk_size,
            buffer_size: args.parse_buffer_size()?,
            quiet: args.quiet,
            verbose: args.verbose,
            show_stats: args.stats,
        })
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: None,
            output: None,
            threads: 1,
            chunk_size: 65536,
            buffer_size: 8 * 1024 * 1024,
            quiet: true,
            verbose: false,
            show_stats: false,
        }
    }
}

/// Main processor
pub struct Processor<'e, 'w> {
    engine: &'e Engine<'w>,
    config: ProcessorConfig,
    stats: Arc<GenerationStats>,
}

impl<'e, 'w> Processor<'e, 'w> {
    pub fn new(engine: &'e Engine<'w>, config: ProcessorConfig) -> Self {
        Self {
            engine,
            config,
            stats: Arc::new(GenerationStats::new()),
        }
    }

    /// Generate into the configured output, returning candidates written
    pub fn process(&self) -> anyhow::Result<u64> {
        let mut output = match self.config.output {
            Some(ref path) => OutputWriter::create(path.clone(), self.config.buffer_size)?,
            None => OutputWriter::stdout(self.config.buffer_size),
        };

        let written = self.process_into(&mut output)?;

        if !self.config.quiet {
            if let Some(path) = output.path() {
                print_success(&format!("Output written to: {:?}", path));
            }
        }

        Ok(written)
    }

    /// Generate into `output`
    pub fn process_into(&self, output: &mut OutputWriter) -> anyhow::Result<u64> {
        let keyspace = self.engine.keyspace()?;
        let range = self.range(&keyspace)?;
        let count = range.end - range.start;

        if !self.config.quiet {
            print_header("Generating candidates...");
            print_info(&format!("Keyspace: {}", keyspace.total));
            print_info(&format!("Range:    {}..{} ({} candidates)", range.start, range.end, count));
        }

        let pb = if self.config.quiet {
            ProgressBar::hidden()
        } else {
            create_progress_bar(count, "Generating...")
        };

        if self.config.threads > 1 && count > self.config.chunk_size {
            self.process_parallel(range, output, &pb)?;
        } else {
            self.process_sequential(range, output, &pb)?;
        }

        output.flush()?;
        pb.finish_with_message("Complete".green().to_string());

        if self.config.show_stats && !self.config.quiet {
            self.stats.print_summary(keyspace.total);
        }

        Ok(self.stats.get_candidates())
    }

    /// Linear range selected by skip and limit
    fn range(&self, keyspace: &Keyspace) -> anyhow::Result<Range<u64>> {
        let start = self.config.skip;

        if start >= keyspace.total {
            return Err(Error::OffsetOutOfRange {
                offset: start,
                keyspace: keyspace.total,
            }
            .into());
        }

        let end = match self.config.limit {
            Some(limit) => start.saturating_add(limit).min(keyspace.total),
            None => keyspace.total,
        };

        Ok(start..end)
    }

    /// One cursor, straight through the range
    fn process_sequential(
        &self,
        range: Range<u64>,
        output: &mut OutputWriter,
        pb: &ProgressBar,
    ) -> anyhow::Result<()> {
        let mut cursor = self.engine.cursor()?;
        let mut buf = vec![0u8; self.engine.max_length()];
        let mut pending = 0;
        let mut bytes = 0;

        if range.is_empty() {
            return Ok(());
        }
        cursor.seek(range.start)?;

        for _ in range {
            let Some(len) = cursor.next(&mut buf) else {
                break;
            };
            output.write_candidate(&buf[..len])?;

            pending += 1;
            bytes += len as u64 + 1;
            if pending == PROGRESS_STEP {
                self.stats.add_candidates(pending, bytes);
                pb.inc(pending);
                pending = 0;
                bytes = 0;
            }
        }

        self.stats.add_candidates(pending, bytes);
        pb.inc(pending);

        Ok(())
    }

    /// Split into chunks, render each with its own cursor, write in order
    fn process_parallel(
        &self,
        range: Range<u64>,
        output: &mut OutputWriter,
        pb: &ProgressBar,
    ) -> anyhow::Result<()> {
        let chunk_size = self.config.chunk_size;
        let batch_len = self.config.threads * CHUNKS_PER_THREAD;
        let mut next = range.start;

        log::debug!(
            "Parallel generation: {} threads, {} candidates per chunk",
            self.config.threads,
            chunk_size
        );

        while next < range.end {
            let mut batch = Vec::with_capacity(batch_len);
            while batch.len() < batch_len && next < range.end {
                let end = next.saturating_add(chunk_size).min(range.end);
                batch.push(next..end);
                next = end;
            }

            let blocks = batch
                .into_par_iter()
                .map(|chunk| self.render_chunk(chunk))
                .collect::<Result<Vec<_>, Error>>()?;

            for (block, lines) in blocks {
                output.write_block(&block, lines)?;
                self.stats.add_candidates(lines, block.len() as u64);
                self.stats.add_chunk();
                pb.inc(lines);
            }
        }

        Ok(())
    }

    /// Render `chunk` as newline-terminated candidates
    fn render_chunk(&self, chunk: Range<u64>) -> Result<(Vec<u8>, u64), Error> {
        let mut cursor = self.engine.cursor()?;
        cursor.seek(chunk.start)?;

        let mut buf = vec![0u8; self.engine.max_length()];
        let mut block = Vec::with_capacity(((chunk.end - chunk.start) as usize).min(1 << 20) * 16);
        let mut lines = 0;

        for _ in chunk.clone() {
            let Some(len) = cursor.next(&mut buf) else {
                break;
            };
            block.extend_from_slice(&buf[..len]);
            block.push(b'\n');
            lines += 1;
        }

        if self.config.verbose {
            let first = block.split(|&b| b == b'\n').next().unwrap_or_default();
            log::debug!("Chunk {}..{} starts with {}", chunk.start, chunk.end, first.as_bstr());
        }

        Ok((block, lines))
    }

    /// Get generation statistics
    pub fn stats(&self) -> Arc<GenerationStats> {
        Arc::clone(&self.stats)
    }
}
