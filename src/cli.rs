//! Command-line interface definition for pattern-dict
//!
//! Provides argument parsing and validation for the candidate generator.

use clap::Parser;
use std::path::PathBuf;

use crate::candidate::DEFAULT_MAX_LENGTH;
use crate::engine::EngineConfig;

/// Pattern-dictionary candidate generator for password auditing
///
/// Embed every word of a wordlist inside a hashcat-style mask.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pattern-dict",
    author = "m0h1nd4",
    version,
    about = "Pattern-dictionary candidate generator for password auditing",
    long_about = r##"
╔══════════════════════════════════════════════════════════════════════════════╗
║                           PATTERN-DICT v1.0.0                                ║
║                  Dictionary Words Inside Mask Patterns                       ║
║                         For Penetration Testing                              ║
╚══════════════════════════════════════════════════════════════════════════════╝

Generate every combination of mask characters around each word of a wordlist,
in a fixed, resumable order. Exactly one ?W marks where the word goes.

EXAMPLES:
    # 00password  01password ... 99password~
    pattern-dict '?d?d?W?s' rockyou.txt

    # Custom charset: a word followed by one lowercase letter or digit
    pattern-dict -1 '?l?d' '?W?1' rockyou.txt

    # Print the keyspace only
    pattern-dict --keyspace '?u?W?d?d' rockyou.txt

    # Resume at candidate 1000000, emit 5000000, write to a file
    pattern-dict -s 1000000 -l 5000000 -o out.txt '?W?d?d?d?d' rockyou.txt

PLACEHOLDERS:
    ?l  abcdefghijklmnopqrstuvwxyz
    ?u  ABCDEFGHIJKLMNOPQRSTUVWXYZ
    ?d  0123456789
    ?s  «space»!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
    ?a  ?l?u?d?s
    ?h  0123456789abcdef
    ?H  0123456789ABCDEF
    ?b  0x00 - 0xff
    ?1 - ?4  custom charsets
    ?W  the dictionary word (exactly one)
    ??  a literal '?'
"##,
    after_help = "For more information, visit: https://github.com/m0h1nd4/pattern-dict"
)]
pub struct Args {
    /// Mask pattern containing exactly one ?W
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Wordlist file (one word per line, LF or CRLF)
    #[arg(value_name = "WORDLIST")]
    pub wordlist: PathBuf,

    /// User-defined charset ?1
    #[arg(short = '1', long = "custom-charset1", value_name = "CHARSET")]
    pub custom_charset1: Option<String>,

    /// User-defined charset ?2
    #[arg(short = '2', long = "custom-charset2", value_name = "CHARSET")]
    pub custom_charset2: Option<String>,

    /// User-defined charset ?3
    #[arg(short = '3', long = "custom-charset3", value_name = "CHARSET")]
    pub custom_charset3: Option<String>,

    /// User-defined charset ?4
    #[arg(short = '4', long = "custom-charset4", value_name = "CHARSET")]
    pub custom_charset4: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip the first N candidates
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub skip: u64,

    /// Emit at most N candidates
    #[arg(short, long, value_name = "N")]
    pub limit: Option<u64>,

    /// Maximum candidate length in bytes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Print the total keyspace and exit
    #[arg(long, default_value_t = false)]
    pub keyspace: bool,

    /// Number of threads (default: auto-detect)
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Candidates per parallel work unit
    #[arg(long, value_name = "N", default_value_t = 65536)]
    pub chunk_size: u64,

    /// Buffer size for output writes (default: 8MB)
    #[arg(long, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Custom charset definitions in slot order
    pub fn custom_charsets(&self) -> Vec<(u8, String)> {
        [
            &self.custom_charset1,
            &self.custom_charset2,
            &self.custom_charset3,
            &self.custom_charset4,
        ]
        .into_iter()
        .zip(1u8..)
        .filter_map(|(def, slot)| def.clone().map(|d| (slot, d)))
        .collect()
    }

    /// Build the engine configuration
    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        if self.max_length == 0 {
            anyhow::bail!("--max-length must be at least 1");
        }

        Ok(EngineConfig {
            pattern: self.pattern.clone(),
            custom_charsets: self.custom_charsets(),
            max_length: self.max_length,
        })
    }

    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.buffer_size)
    }

    /// Thread count, defaulting to the number of CPUs
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = size_str.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = size_str.strip_suffix('B') {
        (n, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str.trim().parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    Ok(num * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pattern-dict").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&["?d?W", "words.txt"]);

        assert_eq!(args.pattern, "?d?W");
        assert_eq!(args.wordlist, PathBuf::from("words.txt"));
        assert_eq!(args.skip, 0);
        assert_eq!(args.limit, None);
        assert_eq!(args.max_length, 256);
        assert!(!args.keyspace);
    }

    #[test]
    fn test_custom_charsets_in_slot_order() {
        let args = parse(&["-3", "xyz", "-1", "?l?d", "?1?W?3", "words.txt"]);

        assert_eq!(
            args.custom_charsets(),
            vec![(1, "?l?d".to_string()), (3, "xyz".to_string())]
        );

        let config = args.engine_config().unwrap();
        assert_eq!(config.pattern, "?1?W?3");
        assert_eq!(config.custom_charsets.len(), 2);
    }

    #[test]
    fn test_skip_limit_and_keyspace() {
        let args = parse(&["-s", "100", "-l", "5", "--keyspace", "?W", "w.txt"]);

        assert_eq!(args.skip, 100);
        assert_eq!(args.limit, Some(5));
        assert!(args.keyspace);
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let args = parse(&["--max-length", "0", "?W", "w.txt"]);
        assert!(args.engine_config().is_err());
    }

    #[test]
    fn test_missing_wordlist_is_usage_error() {
        assert!(Args::try_parse_from(["pattern-dict", "?W"]).is_err());
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;

        Args::command().debug_assert();

        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("PLACEHOLDERS:"));
        assert!(help.contains("?s  «space»!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"));
        assert!(help.contains("??  a literal '?'"));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("8GB").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert!(parse_size("lots").is_err());
    }
}
