//! The option-scanning state machine.
//!
//! An [`OptionScanner`] is driven one call at a time. Each call examines the
//! argument vector from where the previous call stopped and yields a single
//! [`Token`]:
//! - a recognized option (`-a`, a letter inside a cluster like `-abc`, or
//!   `--name`), with its argument in [`OptionScanner::last_argument`];
//! - [`Token::NonOption`] for operands in return-in-order (`-`) mode;
//! - [`Token::Unrecognized`] / [`Token::MissingArgument`] for problems, which
//!   never abort the scan;
//! - [`Token::Done`] once no options remain.
//!
//! In the default mode operands are moved to the end of the vector as they
//! are passed over, so after the scan `argv[next_index..]` holds the operands
//! in their original relative order.

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::config::ScannerConfig;
use crate::error::{Diagnostic, Result};
use crate::spec::{find_long, ArgRequirement, OptionSpec, Ordering, ShortSpec};

/// Result of one scan call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A recognized option; carries the letter or the long option's value.
    Opt(i32),
    Unrecognized,
    /// Only produced when the option string starts with `:`.
    MissingArgument,
    /// An operand, returned in `-` mode. The element is in `last_argument`.
    NonOption,
    Done,
}

impl Token {
    /// The integer glibc's `getopt` would return.
    pub fn code(self) -> i32 {
        match self {
            Token::Opt(val) => val,
            Token::Unrecognized => '?' as i32,
            Token::MissingArgument => ':' as i32,
            Token::NonOption => 1,
            Token::Done => -1,
        }
    }

    pub fn as_char(self) -> Option<char> {
        match self {
            Token::Opt(val) => u32::try_from(val).ok().and_then(char::from_u32),
            _ => None,
        }
    }
}

impl From<char> for Token {
    fn from(c: char) -> Self {
        Token::Opt(c as i32)
    }
}

/// Cursor state carried between scan calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanState {
    /// Inside a short-option cluster, the next letter starts at byte
    /// `cursor + 1`. 0 when not inside a cluster.
    pub cursor: usize,
    /// The argv element to examine next.
    pub next_index: usize,
    /// Argument of the most recent option, or the operand in `-` mode.
    pub last_argument: Option<String>,
    /// The option character behind the most recent unrecognized option or
    /// missing argument. `None` for long options that do not map to one.
    pub last_unrecognized: Option<char>,
    /// Set once `--` has been consumed.
    pub terminated: bool,
    /// Operands moved to the end of argv and not yet put back in order.
    /// They occupy the last `permuted` elements and are never scanned.
    pub permuted: usize,
}

impl ScanState {
    pub fn new() -> Self {
        ScanState {
            cursor: 0,
            next_index: 1,
            last_argument: None,
            last_unrecognized: None,
            terminated: false,
            permuted: 0,
        }
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

fn looks_like_option(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

/// A `getopt_long` style scanner.
///
/// Diagnostics go to `W`, standard error unless built with
/// [`OptionScanner::with_writer`].
pub struct OptionScanner<W: Write = io::Stderr> {
    state: ScanState,
    config: ScannerConfig,
    last_diagnostic: Option<Diagnostic>,
    out: W,
}

impl OptionScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self::with_writer(config, io::stderr())
    }

    /// A scanner whose POSIX mode follows `POSIXLY_CORRECT`.
    pub fn from_env() -> Self {
        Self::new(ScannerConfig::from_env())
    }
}

impl Default for OptionScanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl<W: Write> OptionScanner<W> {
    pub fn with_writer(config: ScannerConfig, out: W) -> Self {
        OptionScanner {
            state: ScanState::new(),
            config,
            last_diagnostic: None,
            out,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn config(&self) -> ScannerConfig {
        self.config
    }

    pub fn next_index(&self) -> usize {
        self.state.next_index
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn last_argument(&self) -> Option<&str> {
        self.state.last_argument.as_deref()
    }

    pub fn last_unrecognized(&self) -> Option<char> {
        self.state.last_unrecognized
    }

    /// The diagnostic raised by the latest call, reported or not.
    pub fn last_diagnostic(&self) -> Option<&Diagnostic> {
        self.last_diagnostic.as_ref()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn set_report_errors(&mut self, on: bool) {
        self.config.report_errors = on;
    }

    pub fn set_posixly_correct(&mut self, on: bool) {
        self.config.posixly_correct = on;
    }

    /// Continue scanning at `index`. Leaves any cluster and clears a `--`
    /// termination. Index 0 restarts at the first argument.
    pub fn seek(&mut self, index: usize) {
        self.state.next_index = index;
        self.state.cursor = 0;
        self.state.terminated = false;
        self.state.permuted = 0;
    }

    /// Scan for short options only.
    pub fn scan_short(&mut self, argv: &mut Vec<String>, optstring: &str) -> Result<Token> {
        self.scan_long(argv, optstring, &[]).map(|(token, _)| token)
    }

    /// Scan for the next option.
    ///
    /// Returns the token and, for a matched long option, its index in
    /// `long_opts`. Fails only if `optstring` is malformed, in which case no
    /// state changes.
    pub fn scan_long(
        &mut self,
        argv: &mut Vec<String>,
        optstring: &str,
        long_opts: &[OptionSpec],
    ) -> Result<(Token, Option<usize>)> {
        let spec = ShortSpec::parse(optstring)?;
        self.state.last_argument = None;
        self.last_diagnostic = None;
        Ok(self.step(argv, &spec, long_opts))
    }

    fn step(
        &mut self,
        argv: &mut Vec<String>,
        spec: &ShortSpec,
        long_opts: &[OptionSpec],
    ) -> (Token, Option<usize>) {
        if self.state.next_index == 0 {
            self.state.next_index = 1;
            self.state.cursor = 0;
        }
        if self.state.next_index > argv.len() {
            self.state.next_index = argv.len();
            self.state.cursor = 0;
        }
        self.state.permuted = self.state.permuted.min(argv.len() - self.state.next_index);
        if self.state.terminated {
            return (Token::Done, None);
        }

        // Drop a cluster position that no longer fits (argv edited between calls).
        if self.state.cursor > 0 {
            let pos = self.state.cursor + 1;
            let fits = argv
                .get(self.state.next_index)
                .is_some_and(|arg| pos < arg.len() && arg.is_char_boundary(pos));
            if !fits {
                self.state.cursor = 0;
            }
        }

        loop {
            let idx = self.state.next_index;
            let end = self.scan_end(argv);
            if idx >= end {
                return self.finish(argv);
            }
            let arg = &argv[idx];
            trace!(index = idx, element = %arg, cursor = self.state.cursor, "scan step");

            if self.state.cursor > 0 {
                return (self.short_option(argv, spec), None);
            }

            if arg == "--" {
                if idx + 1 < argv.len() {
                    self.state.next_index += 1;
                }
                self.state.terminated = true;
                debug!(index = idx, "end of options");
                return self.finish(argv);
            }

            if looks_like_option(arg) {
                if arg.starts_with("--") {
                    return self.long_option(argv, spec, long_opts);
                }
                return (self.short_option(argv, spec), None);
            }

            if self.config.posixly_correct || spec.ordering == Ordering::RequireOrder {
                return self.finish(argv);
            }
            if spec.ordering == Ordering::ReturnInOrder {
                self.state.last_argument = Some(arg.clone());
                self.state.next_index += 1;
                return (Token::NonOption, None);
            }
            if !argv[idx + 1..end].iter().any(|a| looks_like_option(a)) {
                return self.finish(argv);
            }

            let operand = argv.remove(idx);
            debug!(operand = %operand, "moving operand to the end");
            argv.push(operand);
            self.state.permuted += 1;
        }
    }

    /// End of the unscanned region; permuted operands lie beyond it.
    fn scan_end(&self, argv: &[String]) -> usize {
        argv.len() - self.state.permuted
    }

    /// Report completion, first restoring the original order of the operands
    /// that were moved to the end.
    fn finish(&mut self, argv: &mut [String]) -> (Token, Option<usize>) {
        if self.state.permuted > 0 {
            argv[self.state.next_index..].rotate_right(self.state.permuted);
            self.state.permuted = 0;
        }
        (Token::Done, None)
    }

    /// The element after the current one, if it is an unscanned non-option.
    fn operand_at_next(&self, argv: &[String]) -> Option<String> {
        let idx = self.state.next_index;
        if idx >= self.scan_end(argv) {
            return None;
        }
        argv.get(idx)
            .filter(|next| !looks_like_option(next))
            .cloned()
    }

    fn short_option(&mut self, argv: &[String], spec: &ShortSpec) -> Token {
        let arg = &argv[self.state.next_index];
        let pos = self.state.cursor + 1;
        let Some(c) = arg[pos..].chars().next() else {
            self.end_element();
            return Token::Done;
        };
        let after = pos + c.len_utf8();
        let more = after < arg.len();

        let requirement = match spec.lookup(c) {
            Some(requirement) => requirement,
            None => {
                self.state.last_unrecognized = Some(c);
                self.advance_cluster(after, more);
                self.report(argv, spec, Diagnostic::UnrecognizedOption(c.to_string()));
                return Token::Unrecognized;
            }
        };

        if requirement == ArgRequirement::None {
            self.advance_cluster(after, more);
            return Token::from(c);
        }

        if more {
            self.state.last_argument = Some(arg[after..].to_string());
            self.end_element();
            return Token::from(c);
        }
        self.end_element();
        if requirement == ArgRequirement::Optional {
            return Token::from(c);
        }

        match self.operand_at_next(argv) {
            Some(next) => {
                self.state.last_argument = Some(next);
                self.state.next_index += 1;
                Token::from(c)
            }
            None => {
                self.state.last_unrecognized = Some(c);
                self.missing_argument(argv, spec, c.to_string())
            }
        }
    }

    fn long_option(
        &mut self,
        argv: &[String],
        spec: &ShortSpec,
        long_opts: &[OptionSpec],
    ) -> (Token, Option<usize>) {
        let arg = &argv[self.state.next_index];
        let body = &arg[2..];
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        self.state.next_index += 1;

        let Some((index, option)) = find_long(long_opts, name) else {
            self.state.last_unrecognized = None;
            self.report(argv, spec, Diagnostic::UnrecognizedOption(arg.clone()));
            return (Token::Unrecognized, None);
        };

        if option.arg != ArgRequirement::None {
            if let Some(value) = inline {
                self.state.last_argument = Some(value.to_string());
            } else if let Some(next) = self.operand_at_next(argv) {
                self.state.last_argument = Some(next);
                self.state.next_index += 1;
            } else if option.arg == ArgRequirement::Required {
                self.state.last_unrecognized =
                    u32::try_from(option.val).ok().and_then(char::from_u32);
                let token = self.missing_argument(argv, spec, format!("--{}", name));
                return (token, None);
            }
        }

        trace!(name, index, "long option");
        (Token::Opt(option.val), Some(index))
    }

    fn missing_argument(&mut self, argv: &[String], spec: &ShortSpec, name: String) -> Token {
        self.report(argv, spec, Diagnostic::MissingArgument(name));
        if spec.silent {
            Token::MissingArgument
        } else {
            Token::Unrecognized
        }
    }

    /// Move within the current cluster, or past it when it is used up.
    fn advance_cluster(&mut self, after: usize, more: bool) {
        if more {
            self.state.cursor = after - 1;
        } else {
            self.end_element();
        }
    }

    fn end_element(&mut self) {
        self.state.cursor = 0;
        self.state.next_index += 1;
    }

    fn report(&mut self, argv: &[String], spec: &ShortSpec, diagnostic: Diagnostic) {
        debug!(%diagnostic, "scan problem");
        if self.config.report_errors && !spec.silent {
            let program = argv.first().map(String::as_str).unwrap_or_default();
            let _ = writeln!(self.out, "{}: {}", program, diagnostic);
        }
        self.last_diagnostic = Some(diagnostic);
    }
}
