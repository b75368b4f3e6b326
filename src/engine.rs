//! Candidate engine
//!
//! Ties the registry, compiled pattern and word index together over a
//! borrowed word-list buffer. The index is built on first use and shared by
//! every cursor created afterwards.

use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use crate::candidate::DEFAULT_MAX_LENGTH;
use crate::charset::CharsetRegistry;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::keyspace::Keyspace;
use crate::pattern::CompiledPattern;
use crate::wordlist::WordIndex;

/// Everything needed to build an [`Engine`] apart from the word list
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub pattern: String,
    /// `(slot, definition)` pairs, applied in order
    pub custom_charsets: Vec<(u8, String)>,
    /// Maximum candidate length in bytes
    pub max_length: usize,
}

impl EngineConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            custom_charsets: Vec::new(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Add a custom charset definition for `slot`
    pub fn custom_charset(mut self, slot: u8, definition: impl Into<String>) -> Self {
        self.custom_charsets.push((slot, definition.into()));
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

#[derive(Debug)]
struct Indexed {
    index: WordIndex,
    keyspace: Keyspace,
}

/// Compiled pattern plus word list, ready to hand out cursors
#[derive(Debug)]
pub struct Engine<'w> {
    pattern: CompiledPattern,
    words: &'w [u8],
    max_length: usize,
    indexed: OnceLock<Indexed>,
    build_lock: Mutex<()>,
}

impl<'w> Engine<'w> {
    /// Build the registry, apply custom charsets and compile the pattern
    pub fn new(config: &EngineConfig, words: &'w [u8]) -> Result<Self> {
        let mut registry = CharsetRegistry::new();

        for (slot, definition) in &config.custom_charsets {
            registry.define_custom(*slot, definition.as_bytes())?;
        }

        let pattern = CompiledPattern::compile(config.pattern.as_bytes(), Arc::new(registry))?;

        Ok(Self {
            pattern,
            words,
            max_length: config.max_length,
            indexed: OnceLock::new(),
            build_lock: Mutex::new(()),
        })
    }

    /// Index the word list if not done yet; concurrent callers wait for one build
    fn indexed(&self) -> Result<&Indexed> {
        if let Some(indexed) = self.indexed.get() {
            return Ok(indexed);
        }

        // Poisoning only means another builder failed; the cell is still unset
        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(indexed) = self.indexed.get() {
            return Ok(indexed);
        }

        let start = Instant::now();
        let index = WordIndex::build(self.words)?;
        let keyspace = Keyspace::new(&self.pattern, index.len() as u64);

        log::info!(
            "Indexed {} words in {:?}: mask keyspace {}, total keyspace {}",
            keyspace.word_count,
            start.elapsed(),
            keyspace.mask,
            keyspace.total
        );
        if keyspace.is_saturated() {
            log::warn!("Keyspace exceeds 64 bits and is reported as {}", u64::MAX);
        }

        Ok(self.indexed.get_or_init(|| Indexed { index, keyspace }))
    }

    /// Word index, built on first call
    pub fn word_index(&self) -> Result<&WordIndex> {
        Ok(&self.indexed()?.index)
    }

    /// Keyspace sizes, building the word index on first call
    pub fn keyspace(&self) -> Result<Keyspace> {
        Ok(self.indexed()?.keyspace)
    }

    /// A fresh cursor at offset 0
    pub fn cursor(&self) -> Result<Cursor<'_>> {
        let indexed = self.indexed()?;
        Ok(Cursor::new(
            &self.pattern,
            &indexed.index,
            self.words,
            indexed.keyspace,
            self.max_length,
        ))
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The borrowed word-list bytes
    pub fn words(&self) -> &'w [u8] {
        self.words
    }
}
