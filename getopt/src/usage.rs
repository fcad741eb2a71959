//! Help text for an option list.

use std::fmt;
use std::io::{self, Write};

use crate::spec::ArgRequirement;
use crate::table::OptionEntry;

const MAX_COL_WIDTH: usize = 79;

/// Renders `Usage:` followed by one aligned line per option, ungrouped options
/// first and then each group under its label.
pub struct Usage<'a> {
    program: String,
    summary: Option<String>,
    entries: &'a [OptionEntry],
}

impl<'a> Usage<'a> {
    pub fn new(program: &str, entries: &'a [OptionEntry]) -> Self {
        Usage {
            program: program.to_string(),
            summary: None,
            entries,
        }
    }

    /// Text after `[OPTION]...` on the first line, e.g. `FILE...`.
    pub fn summary(mut self, text: &str) -> Self {
        self.summary = Some(text.to_string());
        self
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "Usage: {} [OPTION]...", self.program)?;
        if let Some(ref summary) = self.summary {
            write!(out, " {}", summary)?;
        }
        writeln!(out)?;

        let max_left_col = self
            .entries
            .iter()
            .map(|entry| left_column(entry).chars().count())
            .max()
            .unwrap_or(0);
        let indent_length = max_left_col + 5; // 2 prefix + max_left_col + 3 separator
        let line_length = if MAX_COL_WIDTH > indent_length + 20 {
            MAX_COL_WIDTH - indent_length
        } else {
            20
        };

        let ungrouped: Vec<&OptionEntry> =
            self.entries.iter().filter(|e| e.group.is_none()).collect();
        if !ungrouped.is_empty() {
            writeln!(out)?;
            for entry in ungrouped {
                write_entry(out, entry, max_left_col, indent_length, line_length)?;
            }
        }

        for label in self.groups() {
            write!(out, "\n{}:\n", label)?;
            for entry in self
                .entries
                .iter()
                .filter(|e| e.group.as_deref() == Some(label))
            {
                write_entry(out, entry, max_left_col, indent_length, line_length)?;
            }
        }
        Ok(())
    }

    /// Group labels in order of first appearance.
    fn groups(&self) -> Vec<&'a str> {
        let mut labels: Vec<&'a str> = Vec::new();
        for entry in self.entries {
            if let Some(ref label) = entry.group {
                if !labels.contains(&label.as_str()) {
                    labels.push(label);
                }
            }
        }
        labels
    }
}

impl fmt::Display for Usage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.render(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

/// `-o, --output=FILE`, `    --color[=WHEN]` or `-x LEVEL`.
fn left_column(entry: &OptionEntry) -> String {
    let short = entry.short_form();
    let long = entry.long_form();

    let mut left = match (short, long) {
        (Some(c), Some(name)) => format!("-{}, --{}", c, name),
        (None, Some(name)) => format!("    --{}", name),
        (Some(c), None) => format!("-{}", c),
        (None, None) => String::new(),
    };

    if let Some(ref label) = entry.arg_label {
        let sep = if long.is_some() { "=" } else { " " };
        match entry.arg {
            ArgRequirement::None => {}
            ArgRequirement::Required => {
                left.push_str(sep);
                left.push_str(label);
            }
            ArgRequirement::Optional => {
                left.push('[');
                if long.is_some() {
                    left.push('=');
                }
                left.push_str(label);
                left.push(']');
            }
        }
    }
    left
}

fn write_entry<W: Write>(
    out: &mut W,
    entry: &OptionEntry,
    max_left_col: usize,
    indent_length: usize,
    line_length: usize,
) -> io::Result<()> {
    let left = left_column(entry);
    match entry.description.as_deref() {
        Some(help) if !help.is_empty() => {
            write!(out, "  {:width$}   ", left, width = max_left_col)?;
            write_wrapped_text(out, help, indent_length, line_length)
        }
        _ => writeln!(out, "  {}", left),
    }
}

/// Word-wrap `text` at spaces, continuation lines indented by `indent_length`.
fn write_wrapped_text<W: Write>(
    out: &mut W,
    text: &str,
    indent_length: usize,
    line_length: usize,
) -> io::Result<()> {
    let mut help = text;
    while help.chars().count() > line_length {
        let limit = help
            .char_indices()
            .nth(line_length)
            .map_or(help.len(), |(i, _)| i);
        let break_pos = match help[..limit].rfind(' ') {
            Some(pos) if pos > 0 => pos,
            _ => break,
        };
        write!(
            out,
            "{}\n{:indent$}",
            &help[..break_pos],
            "",
            indent = indent_length
        )?;
        help = help[break_pos..].trim_start_matches(' ');
    }
    writeln!(out, "{}", help)
}
