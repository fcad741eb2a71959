//! Option specifications: the compact short-option string and the long-option
//! table.

use crate::error::{Error, Result};

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRequirement {
    None,
    Required,
    Optional,
}

impl ArgRequirement {
    /// The trailing colons that encode this requirement in an option string.
    pub fn colons(self) -> &'static str {
        match self {
            ArgRequirement::None => "",
            ArgRequirement::Required => ":",
            ArgRequirement::Optional => "::",
        }
    }
}

/// One entry of a long-option table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub arg: ArgRequirement,
    /// Returned by the scanner when this option matches.
    pub val: i32,
    /// Reserved; always zero.
    pub flag: i32,
}

impl OptionSpec {
    pub fn new(name: &str, arg: ArgRequirement, val: char) -> Self {
        Self::with_value(name, arg, val as i32)
    }

    pub fn with_value(name: &str, arg: ArgRequirement, val: i32) -> Self {
        OptionSpec {
            name: name.to_string(),
            arg,
            val,
            flag: 0,
        }
    }
}

/// Find a long option by exact name. The first match wins.
pub fn find_long<'a>(long_opts: &'a [OptionSpec], name: &str) -> Option<(usize, &'a OptionSpec)> {
    long_opts.iter().enumerate().find(|(_, spec)| spec.name == name)
}

/// How non-option arguments are treated, selected by the option string's
/// leading character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// Move non-options to the end and keep scanning.
    Permute,
    /// `+`: stop at the first non-option.
    RequireOrder,
    /// `-`: hand each non-option back as if it were an option argument.
    ReturnInOrder,
}

/// A validated short-option string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortSpec {
    pub ordering: Ordering,
    /// `:` prefix: no diagnostics, and missing arguments get their own token.
    pub silent: bool,
    options: Vec<(char, ArgRequirement)>,
}

impl ShortSpec {
    /// Parse an option string matching `^([+]|-|:)?([A-Za-z0-9]:?:?)*$`.
    pub fn parse(optstring: &str) -> Result<ShortSpec> {
        let bytes = optstring.as_bytes();
        let (ordering, silent, mut i) = match bytes.first() {
            Some(b'+') => (Ordering::RequireOrder, false, 1),
            Some(b'-') => (Ordering::ReturnInOrder, false, 1),
            Some(b':') => (Ordering::Permute, true, 1),
            _ => (Ordering::Permute, false, 0),
        };

        let mut options = Vec::new();
        while i < bytes.len() {
            let c = bytes[i];
            if !c.is_ascii_alphanumeric() {
                return Err(Error::Specification {
                    optstring: optstring.to_string(),
                    position: i,
                });
            }
            i += 1;

            let mut colons = 0;
            while colons < 2 && bytes.get(i) == Some(&b':') {
                colons += 1;
                i += 1;
            }
            let arg = match colons {
                0 => ArgRequirement::None,
                1 => ArgRequirement::Required,
                _ => ArgRequirement::Optional,
            };
            options.push((c as char, arg));
        }

        Ok(ShortSpec {
            ordering,
            silent,
            options,
        })
    }

    pub fn lookup(&self, c: char) -> Option<ArgRequirement> {
        self.options
            .iter()
            .find(|&&(letter, _)| letter == c)
            .map(|&(_, arg)| arg)
    }
}
