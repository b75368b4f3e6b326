//! Candidate rendering

use crate::pattern::CompiledPattern;

/// Default maximum candidate length, matching hashcat's `PW_MAX`
pub const DEFAULT_MAX_LENGTH: usize = 256;

/// Render prefix, word and suffix into `out`, returning the bytes written.
///
/// `out.len()` is the length cap. The word is truncated to fit after the
/// prefix; suffix characters stop once the cap is reached. Nothing past
/// `word` is ever read.
pub fn render(pattern: &CompiledPattern, word: &[u8], digits: &[u32], out: &mut [u8]) -> usize {
    let max = out.len();
    let word_position = pattern.word_position();
    let mut len = 0;

    for i in 0..word_position {
        if len == max {
            return len;
        }
        out[len] = pattern.byte_at(i, digits[i]);
        len += 1;
    }

    let take = word.len().min(max - len);
    out[len..len + take].copy_from_slice(&word[..take]);
    len += take;

    for i in word_position + 1..pattern.len() {
        if len == max {
            break;
        }
        out[len] = pattern.byte_at(i, digits[i]);
        len += 1;
    }

    len
}
