//! Keyspace model
//!
//! The non-word positions of a pattern form a mixed-radix number whose
//! least-significant digit is the last position. A linear mask index maps
//! to one digit per position like an odometer; the full candidate space is
//! `word_count × mask_keyspace`, word-major.

use std::ops::Range;

use crate::pattern::CompiledPattern;

/// Cached keyspace sizes for a pattern and word list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyspace {
    pub word_count: u64,
    /// Combinations of all non-word positions
    pub mask: u64,
    /// `word_count × mask`
    pub total: u64,
}

impl Keyspace {
    pub fn new(pattern: &CompiledPattern, word_count: u64) -> Self {
        let mask = mask_keyspace(pattern);
        let total = total_keyspace(word_count, mask);

        Self {
            word_count,
            mask,
            total,
        }
    }

    /// Did either product saturate at `u64::MAX`?
    pub fn is_saturated(&self) -> bool {
        self.mask == u64::MAX || self.total == u64::MAX
    }

    /// Split `[0, total)` into `workers` contiguous ranges.
    ///
    /// Worker *k* starts at `k × total / workers`. Empty ranges are kept so
    /// the result always has `workers` entries.
    pub fn split(&self, workers: u64) -> Vec<Range<u64>> {
        let workers = workers.max(1);
        let bound = |k: u64| (k as u128 * self.total as u128 / workers as u128) as u64;

        (0..workers).map(|k| bound(k)..bound(k + 1)).collect()
    }
}

/// Product of every non-word radix, saturating at `u64::MAX`
pub fn mask_keyspace(pattern: &CompiledPattern) -> u64 {
    let mut keyspace: u64 = 1;

    for radix in (0..pattern.len()).filter_map(|i| pattern.radix(i)) {
        keyspace = match keyspace.checked_mul(radix) {
            Some(product) => product,
            None => {
                log::warn!("Mask keyspace overflows 64 bits, saturating");
                return u64::MAX;
            }
        };
    }

    keyspace
}

/// `word_count × mask`, saturating at `u64::MAX`
pub fn total_keyspace(word_count: u64, mask: u64) -> u64 {
    word_count.saturating_mul(mask)
}

/// Decompose `mask_index` into one digit per position, last position first.
///
/// `digits` must hold one entry per position; the word position gets 0.
pub fn index_to_digits(pattern: &CompiledPattern, mask_index: u64, digits: &mut [u32]) {
    debug_assert_eq!(digits.len(), pattern.len());

    let mut remaining = mask_index;

    for i in (0..pattern.len()).rev() {
        digits[i] = match pattern.radix(i) {
            Some(radix) => {
                let digit = remaining % radix;
                remaining /= radix;
                digit as u32
            }
            None => 0,
        };
    }
}

/// Inverse of [`index_to_digits`]
pub fn digits_to_index(pattern: &CompiledPattern, digits: &[u32]) -> u64 {
    debug_assert_eq!(digits.len(), pattern.len());

    (0..pattern.len()).fold(0u64, |index, i| match pattern.radix(i) {
        Some(radix) => index.saturating_mul(radix).saturating_add(digits[i] as u64),
        None => index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharsetRegistry;
    use std::sync::Arc;

    fn compile(pattern: &str) -> CompiledPattern {
        CompiledPattern::compile(pattern.as_bytes(), Arc::new(CharsetRegistry::new())).unwrap()
    }

    #[test]
    fn test_mask_keyspace() {
        assert_eq!(mask_keyspace(&compile("?W")), 1);
        assert_eq!(mask_keyspace(&compile("?d?d?W?s")), 3300);
        assert_eq!(mask_keyspace(&compile("abc?W!")), 1);
        assert_eq!(mask_keyspace(&compile("?a?W?b")), 95 * 256);
    }

    #[test]
    fn test_mask_keyspace_saturates() {
        // 256^8 = 2^64 overflows by exactly one
        assert_eq!(mask_keyspace(&compile("?b?b?b?b?b?b?b?W")), 1 << 56);
        assert_eq!(mask_keyspace(&compile("?b?b?b?b?b?b?b?b?W")), u64::MAX);
        assert_eq!(mask_keyspace(&compile("?W?a?a?a?a?a?a?a?a?a?a?a?a")), u64::MAX);
    }

    #[test]
    fn test_total_keyspace_saturates() {
        assert_eq!(total_keyspace(3, 1), 3);
        assert_eq!(total_keyspace(2, u64::MAX / 2 + 1), u64::MAX);

        let keyspace = Keyspace::new(&compile("?b?b?b?b?b?b?b?W"), 1 << 9);
        assert_eq!(keyspace.total, u64::MAX);
        assert!(keyspace.is_saturated());
    }

    #[test]
    fn test_odometer_order() {
        let pattern = compile("?d?d?W");
        let mut digits = [0u32; 3];
        let mut seen = Vec::new();

        for i in 0..100 {
            index_to_digits(&pattern, i, &mut digits);
            seen.push((digits[0], digits[1]));
        }

        let expected: Vec<_> = (0..10).flat_map(|a| (0..10).map(move |b| (a, b))).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_word_position_digit_is_zero() {
        let pattern = compile("?d?W?d");
        let mut digits = [9u32; 3];

        index_to_digits(&pattern, 57, &mut digits);
        assert_eq!(digits, [5, 0, 7]);
    }

    #[test]
    fn test_bijection() {
        let pattern = compile("?h?d?W-?l");
        let mask = mask_keyspace(&pattern);
        let mut digits = vec![0u32; pattern.len()];

        assert_eq!(mask, 16 * 10 * 26);
        for i in 0..mask {
            index_to_digits(&pattern, i, &mut digits);
            assert!(digits[3] == 0, "literal digit must stay 0");
            assert_eq!(digits_to_index(&pattern, &digits), i);
        }
    }

    #[test]
    fn test_split_covers_keyspace() {
        let keyspace = Keyspace {
            word_count: 10,
            mask: 10,
            total: 100,
        };

        let ranges = keyspace.split(3);
        assert_eq!(ranges, vec![0..33, 33..66, 66..100]);

        let ranges = keyspace.split(0);
        assert_eq!(ranges, vec![0..100]);
    }

    #[test]
    fn test_split_huge_keyspace() {
        let keyspace = Keyspace {
            word_count: 1,
            mask: u64::MAX,
            total: u64::MAX,
        };

        let ranges = keyspace.split(4);
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges[3].end, u64::MAX);
        assert!(ranges.windows(2).all(|w| w[0].end == w[1].start));
    }
}
