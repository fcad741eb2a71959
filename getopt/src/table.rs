//! Declarative option lists.
//!
//! An [`OptionTable`] describes each option once (value, name, argument,
//! description, group) and compiles into the option string and long-option
//! table the scanner consumes. The same entries feed the usage printer.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::spec::{ArgRequirement, OptionSpec};

/// One option as the program documents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Short letter, and the value reported for the long form.
    pub value: char,
    /// Long name. A single character means the option has no long form.
    pub name: String,
    pub arg: ArgRequirement,
    pub arg_label: Option<String>,
    pub description: Option<String>,
    pub group: Option<String>,
    short: bool,
}

impl OptionEntry {
    pub fn new(value: char, name: &str) -> Self {
        OptionEntry {
            value,
            name: name.to_string(),
            arg: ArgRequirement::None,
            arg_label: None,
            description: None,
            group: None,
            short: true,
        }
    }

    pub fn required(mut self, label: &str) -> Self {
        self.arg = ArgRequirement::Required;
        self.arg_label = Some(label.to_string());
        self
    }

    pub fn optional(mut self, label: &str) -> Self {
        self.arg = ArgRequirement::Optional;
        self.arg_label = Some(label.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn group(mut self, label: &str) -> Self {
        self.group = Some(label.to_string());
        self
    }

    /// Keep `value` as an identifier only, without a `-x` spelling.
    pub fn long_only(mut self) -> Self {
        self.short = false;
        self
    }

    /// The short letter, if the option can be written `-x`.
    pub fn short_form(&self) -> Option<char> {
        (self.short && self.value.is_ascii_alphanumeric()).then_some(self.value)
    }

    pub fn long_form(&self) -> Option<&str> {
        (self.name.chars().count() > 1).then_some(self.name.as_str())
    }
}

/// How the compiled option string treats operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Permute,
    /// `+`
    RequireOrder,
    /// `-`
    ReturnInOrder,
    /// `:`
    Silent,
}

impl Mode {
    pub fn prefix(self) -> &'static str {
        match self {
            Mode::Permute => "",
            Mode::RequireOrder => "+",
            Mode::ReturnInOrder => "-",
            Mode::Silent => ":",
        }
    }
}

/// Scanner input produced by [`OptionTable::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub optstring: String,
    pub long_opts: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    entries: Vec<OptionEntry>,
    mode: Mode,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn option(mut self, entry: OptionEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    pub fn compile(&self) -> Result<Compiled> {
        let mut optstring = self.mode.prefix().to_string();
        let mut long_opts = Vec::new();
        let mut shorts = HashSet::new();
        let mut longs = HashSet::new();

        for entry in &self.entries {
            let short = entry.short_form();
            let long = entry.long_form();
            if short.is_none() && long.is_none() {
                return Err(Error::InvalidEntry(entry.name.clone()));
            }

            if let Some(c) = short {
                if !shorts.insert(c) {
                    return Err(Error::Duplicate(format!("-{}", c)));
                }
                optstring.push(c);
                optstring.push_str(entry.arg.colons());
            }
            if let Some(name) = long {
                if !longs.insert(name) {
                    return Err(Error::Duplicate(format!("--{}", name)));
                }
                long_opts.push(OptionSpec::new(name, entry.arg, entry.value));
            }
        }

        Ok(Compiled {
            optstring,
            long_opts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ShortSpec;
    use pretty_assertions::assert_eq;

    fn sample() -> OptionTable {
        OptionTable::new()
            .option(OptionEntry::new('v', "verbose").description("be chatty"))
            .option(OptionEntry::new('o', "output").required("FILE"))
            .option(OptionEntry::new('c', "color").optional("WHEN").long_only())
            .option(OptionEntry::new('x', "x").description("short only"))
    }

    #[test]
    fn compile_optstring_and_long_table() {
        let compiled = sample().compile().unwrap();
        assert_eq!(compiled.optstring, "vo:x");
        assert_eq!(
            compiled.long_opts,
            vec![
                OptionSpec::new("verbose", ArgRequirement::None, 'v'),
                OptionSpec::new("output", ArgRequirement::Required, 'o'),
                OptionSpec::new("color", ArgRequirement::Optional, 'c'),
            ]
        );
    }

    #[test]
    fn compiled_optstring_parses() {
        for mode in [
            Mode::Permute,
            Mode::RequireOrder,
            Mode::ReturnInOrder,
            Mode::Silent,
        ] {
            let compiled = sample().mode(mode).compile().unwrap();
            assert!(compiled.optstring.starts_with(mode.prefix()));
            assert!(ShortSpec::parse(&compiled.optstring).is_ok());
        }
    }

    #[test]
    fn optional_short_gets_two_colons() {
        let table = OptionTable::new().option(OptionEntry::new('d', "debug").optional("LEVEL"));
        assert_eq!(table.compile().unwrap().optstring, "d::");
    }

    #[test]
    fn non_alphanumeric_value_is_long_only() {
        let table = OptionTable::new().option(OptionEntry::new('\u{100}', "help"));
        let compiled = table.compile().unwrap();
        assert_eq!(compiled.optstring, "");
        assert_eq!(compiled.long_opts[0].val, 0x100);
    }

    #[test]
    fn entry_without_any_form_is_rejected() {
        let table = OptionTable::new().option(OptionEntry::new('?', "?"));
        assert!(matches!(table.compile(), Err(Error::InvalidEntry(name)) if name == "?"));
    }

    #[test]
    fn duplicate_short_is_rejected() {
        let table = OptionTable::new()
            .option(OptionEntry::new('a', "all"))
            .option(OptionEntry::new('a', "append"));
        assert!(matches!(table.compile(), Err(Error::Duplicate(name)) if name == "-a"));
    }

    #[test]
    fn duplicate_long_is_rejected() {
        let table = OptionTable::new()
            .option(OptionEntry::new('a', "all"))
            .option(OptionEntry::new('b', "all"));
        assert!(matches!(table.compile(), Err(Error::Duplicate(name)) if name == "--all"));
    }

    #[test]
    fn entry_forms() {
        let entry = OptionEntry::new('o', "output");
        assert_eq!(entry.short_form(), Some('o'));
        assert_eq!(entry.long_form(), Some("output"));
        let entry = OptionEntry::new('q', "q");
        assert_eq!(entry.long_form(), None);
        assert_eq!(entry.long_only().short_form(), None);
    }
}
