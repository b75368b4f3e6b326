//! Character set registry
//!
//! Holds the built-in mask charsets and up to four user-defined custom
//! charsets in a single arena. Pattern positions refer to charsets by
//! [`CharsetId`] so every charset is stored exactly once.

use crate::error::{Error, Result};

/// Number of user-definable charset slots (`?1`..`?4`)
pub const MAX_CUSTOM_CHARSETS: usize = 4;

/// Maximum number of bytes in an expanded custom charset
pub const CUSTOM_CHARSET_CAPACITY: usize = 256;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGIT: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b" !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const HEX_LOWER: &[u8] = b"0123456789abcdef";
const HEX_UPPER: &[u8] = b"0123456789ABCDEF";

/// Built-in character classes, in arena order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `?l`
    Lower,
    /// `?u`
    Upper,
    /// `?d`
    Digit,
    /// `?s`
    Special,
    /// `?a` - lower, upper, digit and special concatenated
    All,
    /// `?h`
    HexLower,
    /// `?H`
    HexUpper,
    /// `?b` - every byte value 0x00-0xff
    Binary,
}

impl Builtin {
    pub const ALL: [Builtin; 8] = [
        Builtin::Lower,
        Builtin::Upper,
        Builtin::Digit,
        Builtin::Special,
        Builtin::All,
        Builtin::HexLower,
        Builtin::HexUpper,
        Builtin::Binary,
    ];

    /// The specifier byte that selects this class after `?`
    pub fn specifier(self) -> u8 {
        match self {
            Builtin::Lower => b'l',
            Builtin::Upper => b'u',
            Builtin::Digit => b'd',
            Builtin::Special => b's',
            Builtin::All => b'a',
            Builtin::HexLower => b'h',
            Builtin::HexUpper => b'H',
            Builtin::Binary => b'b',
        }
    }

    fn bytes(self) -> Vec<u8> {
        match self {
            Builtin::Lower => LOWER.to_vec(),
            Builtin::Upper => UPPER.to_vec(),
            Builtin::Digit => DIGIT.to_vec(),
            Builtin::Special => SPECIAL.to_vec(),
            Builtin::All => [LOWER, UPPER, DIGIT, SPECIAL].concat(),
            Builtin::HexLower => HEX_LOWER.to_vec(),
            Builtin::HexUpper => HEX_UPPER.to_vec(),
            Builtin::Binary => (0..=u8::MAX).collect(),
        }
    }
}

/// A character class a placeholder can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Builtin(Builtin),
    /// Custom slot, 1-based
    Custom(u8),
}

impl CharClass {
    /// Map the byte following `?` to a class.
    ///
    /// Returns `None` for `?W`, `??` and anything unrecognized; callers
    /// decide what those mean in their own grammar.
    pub fn from_specifier(spec: u8) -> Option<Self> {
        match spec {
            b'1'..=b'4' => Some(CharClass::Custom(spec - b'0')),
            _ => Builtin::ALL
                .into_iter()
                .find(|b| b.specifier() == spec)
                .map(CharClass::Builtin),
        }
    }
}

/// Index of a charset inside a [`CharsetRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharsetId(usize);

/// Arena of every charset a pattern can reference.
///
/// Built-ins occupy the first slots and are created once per registry,
/// custom charsets are appended as they are defined.
#[derive(Debug, Clone)]
pub struct CharsetRegistry {
    sets: Vec<Box<[u8]>>,
    custom: [Option<CharsetId>; MAX_CUSTOM_CHARSETS],
}

impl CharsetRegistry {
    /// Create a registry holding only the built-in charsets
    pub fn new() -> Self {
        let sets = Builtin::ALL
            .iter()
            .map(|b| b.bytes().into_boxed_slice())
            .collect();

        Self {
            sets,
            custom: [None; MAX_CUSTOM_CHARSETS],
        }
    }

    /// Expand `definition` and store it as custom charset `slot` (1-4).
    ///
    /// The definition uses pattern syntax: `?l`, `?a`, `?1`, `??` and plain
    /// literal bytes. Only slots already defined may be referenced.
    pub fn define_custom(&mut self, slot: u8, definition: &[u8]) -> Result<CharsetId> {
        let index = Self::slot_index(slot)?;
        let bytes = self.expand(slot, definition)?;

        if bytes.is_empty() {
            return Err(Error::EmptyCharset { slot });
        }

        if self.custom[index].is_some() {
            log::warn!("Custom charset ?{} redefined", slot);
        }

        let id = CharsetId(self.sets.len());
        log::debug!("Custom charset ?{} defined with {} characters", slot, bytes.len());
        self.sets.push(bytes.into_boxed_slice());
        self.custom[index] = Some(id);

        Ok(id)
    }

    /// Resolve a class to its charset
    pub fn lookup(&self, class: CharClass) -> Result<CharsetId> {
        match class {
            CharClass::Builtin(builtin) => Ok(self.builtin(builtin)),
            CharClass::Custom(slot) => self.custom[Self::slot_index(slot)?]
                .ok_or(Error::UndefinedReference { slot }),
        }
    }

    /// Resolve a specifier byte (the `X` in `?X`) to a class and charset
    pub fn resolve(&self, spec: u8) -> Result<(CharClass, CharsetId)> {
        let class = CharClass::from_specifier(spec).ok_or(Error::SpecifierInvalid { spec })?;
        Ok((class, self.lookup(class)?))
    }

    /// Charset id of a built-in class
    pub fn builtin(&self, builtin: Builtin) -> CharsetId {
        // Built-ins are stored in `Builtin::ALL` order at the front of the arena
        CharsetId(builtin as usize)
    }

    /// Bytes of a charset
    #[inline]
    pub fn get(&self, id: CharsetId) -> &[u8] {
        &self.sets[id.0]
    }

    /// Is custom slot `slot` defined?
    pub fn is_defined(&self, slot: u8) -> bool {
        Self::slot_index(slot)
            .map(|i| self.custom[i].is_some())
            .unwrap_or(false)
    }

    fn slot_index(slot: u8) -> Result<usize> {
        match slot as usize {
            n @ 1..=MAX_CUSTOM_CHARSETS => Ok(n - 1),
            _ => Err(Error::InvalidSlot { slot }),
        }
    }

    fn expand(&self, slot: u8, definition: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < definition.len() {
            let chunk: &[u8] = match definition[i] {
                b'?' => {
                    let spec = *definition
                        .get(i + 1)
                        .ok_or(Error::DanglingEscape { position: i })?;
                    i += 2;

                    if spec == b'?' {
                        b"?"
                    } else {
                        let (_, id) = self.resolve(spec)?;
                        self.get(id)
                    }
                }
                _ => {
                    i += 1;
                    &definition[i - 1..i]
                }
            };

            if out.len() + chunk.len() > CUSTOM_CHARSET_CAPACITY {
                return Err(Error::CharsetCapacityExceeded {
                    slot,
                    max: CUSTOM_CHARSET_CAPACITY,
                });
            }
            out.extend_from_slice(chunk);
        }

        Ok(out)
    }
}

impl Default for CharsetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
