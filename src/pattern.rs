//! Pattern compiler
//!
//! Turns a pattern such as `?d?d?W?s` into an ordered list of positions.
//! Each `?X` pair is one placeholder, `??` is a literal `?` and any other
//! byte is a literal. Exactly one `?W` marks where the dictionary word goes.

use std::sync::Arc;

use crate::charset::{CharClass, CharsetId, CharsetRegistry};
use crate::error::{Error, Result};

/// Maximum number of positions in a compiled pattern, word included
pub const MAX_POSITIONS: usize = 32;

/// Specifier byte of the word placeholder
pub const WORD_SPECIFIER: u8 = b'W';

/// One slot of a compiled pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A placeholder drawing from a charset of the registry
    Charset { class: CharClass, id: CharsetId },
    /// A fixed byte
    Literal(u8),
    /// The dictionary word
    Word,
}

/// Immutable compiled pattern sharing its charsets with the registry
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    registry: Arc<CharsetRegistry>,
    positions: Vec<Position>,
    word_position: usize,
}

impl CompiledPattern {
    /// Parse `pattern` against a fully populated registry
    pub fn compile(pattern: &[u8], registry: Arc<CharsetRegistry>) -> Result<Self> {
        let mut positions = Vec::new();
        let mut word_position = None;
        let mut i = 0;

        while i < pattern.len() {
            if positions.len() >= MAX_POSITIONS {
                return Err(Error::PatternTooLong { max: MAX_POSITIONS });
            }

            let position = if pattern[i] == b'?' {
                let spec = *pattern
                    .get(i + 1)
                    .ok_or(Error::DanglingEscape { position: i })?;
                i += 2;

                match spec {
                    WORD_SPECIFIER => {
                        if word_position.is_some() {
                            return Err(Error::WordPlaceholderDuplicated {
                                position: positions.len(),
                            });
                        }
                        word_position = Some(positions.len());
                        Position::Word
                    }
                    b'?' => Position::Literal(b'?'),
                    _ => {
                        let (class, id) = registry.resolve(spec)?;
                        Position::Charset { class, id }
                    }
                }
            } else {
                i += 1;
                Position::Literal(pattern[i - 1])
            };

            positions.push(position);
        }

        let word_position = word_position.ok_or(Error::WordPlaceholderMissing)?;

        log::debug!(
            "Compiled pattern into {} positions (word at {})",
            positions.len(),
            word_position
        );

        Ok(Self {
            registry,
            positions,
            word_position,
        })
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: a compiled pattern contains at least the word
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the `?W` position
    pub fn word_position(&self) -> usize {
        self.word_position
    }

    /// Positions strictly before the word
    pub fn prefix_len(&self) -> usize {
        self.word_position
    }

    /// Positions strictly after the word
    pub fn suffix_len(&self) -> usize {
        self.positions.len() - self.word_position - 1
    }

    pub fn registry(&self) -> &CharsetRegistry {
        &self.registry
    }

    /// Number of choices at position `index`; `None` for the word
    #[inline]
    pub fn radix(&self, index: usize) -> Option<u64> {
        match self.positions[index] {
            Position::Charset { id, .. } => Some(self.registry.get(id).len() as u64),
            Position::Literal(_) => Some(1),
            Position::Word => None,
        }
    }

    /// Byte emitted at `index` for the given digit value
    ///
    /// # Panics
    ///
    /// Panics if `index` is the word position or `digit` is out of range.
    #[inline]
    pub fn byte_at(&self, index: usize, digit: u32) -> u8 {
        match self.positions[index] {
            Position::Charset { id, .. } => self.registry.get(id)[digit as usize],
            Position::Literal(byte) => byte,
            Position::Word => panic!("word position has no charset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Builtin;

    fn compile(pattern: &str) -> Result<CompiledPattern> {
        CompiledPattern::compile(pattern.as_bytes(), Arc::new(CharsetRegistry::new()))
    }

    #[test]
    fn test_compile_prefix_and_suffix() {
        let pattern = compile("?d?d?W?s").unwrap();

        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.word_position(), 2);
        assert_eq!(pattern.prefix_len(), 2);
        assert_eq!(pattern.suffix_len(), 1);
        assert_eq!(pattern.radix(0), Some(10));
        assert_eq!(pattern.radix(2), None);
        assert_eq!(pattern.radix(3), Some(33));
    }

    #[test]
    fn test_literals_and_escaped_question_mark() {
        let pattern = compile("a??b?W").unwrap();

        assert_eq!(
            pattern.positions(),
            &[
                Position::Literal(b'a'),
                Position::Literal(b'?'),
                Position::Literal(b'b'),
                Position::Word,
            ]
        );
        assert_eq!(pattern.radix(1), Some(1));
        assert_eq!(pattern.byte_at(1, 0), b'?');
    }

    #[test]
    fn test_escaped_question_mark_is_not_word() {
        assert!(matches!(compile("??W"), Err(Error::WordPlaceholderMissing)));
        assert!(matches!(compile("abc"), Err(Error::WordPlaceholderMissing)));
        assert!(matches!(compile(""), Err(Error::WordPlaceholderMissing)));
    }

    #[test]
    fn test_duplicate_word() {
        assert!(matches!(
            compile("?W?d?W"),
            Err(Error::WordPlaceholderDuplicated { position: 2 })
        ));
    }

    #[test]
    fn test_dangling_escape() {
        assert!(matches!(compile("?W?"), Err(Error::DanglingEscape { position: 2 })));
    }

    #[test]
    fn test_invalid_specifier() {
        assert!(matches!(compile("?W?x"), Err(Error::SpecifierInvalid { spec: b'x' })));
        assert!(matches!(compile("?w"), Err(Error::SpecifierInvalid { spec: b'w' })));
    }

    #[test]
    fn test_undefined_custom_reference() {
        assert!(matches!(compile("?3?W"), Err(Error::UndefinedReference { slot: 3 })));
    }

    #[test]
    fn test_custom_charset_position() {
        let mut registry = CharsetRegistry::new();
        registry.define_custom(1, b"xy").unwrap();
        let pattern = CompiledPattern::compile(b"?1?W", Arc::new(registry)).unwrap();

        assert!(matches!(
            pattern.positions()[0],
            Position::Charset { class: CharClass::Custom(1), .. }
        ));
        assert_eq!(pattern.radix(0), Some(2));
        assert_eq!(pattern.byte_at(0, 1), b'y');
    }

    #[test]
    fn test_position_limit() {
        let max = format!("?W{}", "?d".repeat(MAX_POSITIONS - 1));
        assert_eq!(compile(&max).unwrap().len(), MAX_POSITIONS);

        let over = format!("?W{}", "?d".repeat(MAX_POSITIONS));
        assert!(matches!(compile(&over), Err(Error::PatternTooLong { max: 32 })));
    }

    #[test]
    fn test_positions_share_registry_charsets() {
        let pattern = compile("?a?W?a").unwrap();

        let all = pattern.registry().builtin(Builtin::All);
        assert_eq!(
            pattern.positions()[0],
            Position::Charset { class: CharClass::Builtin(Builtin::All), id: all }
        );
        assert_eq!(pattern.positions()[0], pattern.positions()[2]);
    }
}
