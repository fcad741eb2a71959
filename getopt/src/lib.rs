//! POSIX/GNU style command-line option scanning.
//!
//! Implements the `getopt` / `getopt_long` model with glibc behavior:
//! - short options from a compact option string (`"ab:c::"`), clustering
//!   (`-abc`), attached (`-ofile`) and separate (`-o file`) arguments;
//! - long options (`--name`, `--name=value`, `--name value`);
//! - operand permutation, or the `+` / `-` / `:` option-string modes and
//!   `POSIXLY_CORRECT`;
//! - declarative option tables and usage text built from them.
//!
//! ```
//! use getopt::{OptionScanner, ScannerConfig, Token};
//!
//! let mut argv: Vec<String> = ["prog", "in.txt", "-v", "-o", "out.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let mut scanner = OptionScanner::new(ScannerConfig::default());
//! let mut verbose = false;
//! let mut output = None;
//! loop {
//!     match scanner.scan_short(&mut argv, "vo:").unwrap() {
//!         Token::Done => break,
//!         t if t == Token::from('v') => verbose = true,
//!         t if t == Token::from('o') => output = scanner.last_argument().map(String::from),
//!         other => panic!("unexpected {:?}", other),
//!     }
//! }
//! assert!(verbose);
//! assert_eq!(output.as_deref(), Some("out.txt"));
//! assert_eq!(&argv[scanner.next_index()..], ["in.txt"]);
//! ```

pub mod config;
pub mod error;
pub mod scanner;
pub mod spec;
pub mod table;
pub mod usage;

pub use config::ScannerConfig;
pub use error::{Diagnostic, Error, Result};
pub use scanner::{OptionScanner, ScanState, Token};
pub use spec::{ArgRequirement, OptionSpec, Ordering, ShortSpec};
pub use table::{Compiled, Mode, OptionEntry, OptionTable};
pub use usage::Usage;
