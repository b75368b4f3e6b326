//! # Pattern Dict
//!
//! Pattern-dictionary candidate generation for password auditing.
//!
//! A pattern mixes hashcat-style mask placeholders with exactly one `?W`,
//! the slot where each dictionary word is inserted. Every combination of
//! placeholder characters is generated for every word, in a fixed order
//! that can be resumed at any offset.
//!
//! ## Features
//!
//! - **Mask placeholders**: `?l ?u ?d ?s ?a ?h ?H ?b` and custom charsets `?1`-`?4`
//! - **Random access**: seek to any candidate without replaying earlier output
//! - **Large wordlists**: memory-mapped, indexed once, never copied
//! - **Saturating keyspace**: oversized patterns report `u64::MAX` instead of wrapping
//! - **Parallel generation**: independent cursors over shared, read-only state
//!
//! ## Usage
//!
//! ```bash
//! # 00password 01password ... 99password~
//! pattern-dict '?d?d?W?s' wordlist.txt
//!
//! # Custom charset
//! pattern-dict -1 '?l?d' '?1?W' wordlist.txt
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pattern_dict::{Engine, EngineConfig};
//!
//! let config = EngineConfig::new("?d?W!");
//! let engine = Engine::new(&config, b"pass\nword\n").unwrap();
//! assert_eq!(engine.keyspace().unwrap().total, 20);
//!
//! let mut cursor = engine.cursor().unwrap();
//! cursor.seek(13).unwrap();
//!
//! let mut out = [0u8; 256];
//! let len = cursor.next(&mut out).unwrap();
//! assert_eq!(&out[..len], b"3word!");
//! ```

pub mod candidate;
pub mod charset;
pub mod cli;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod keyspace;
pub mod output;
pub mod pattern;
pub mod processor;
pub mod progress;
pub mod wordlist;

pub use cli::Args;
pub use cursor::Cursor;
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use keyspace::Keyspace;
pub use processor::{Processor, ProcessorConfig};
pub use wordlist::{WordIndex, Wordlist};
