#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid option string {optstring:?}: unexpected character at byte {position}")]
    Specification { optstring: String, position: usize },

    #[error("option entry {0:?} has neither a short nor a long form")]
    InvalidEntry(String),

    #[error("option {0:?} is defined more than once")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable scanning problem.
///
/// These never abort a scan; the scanner reports them through its token and
/// keeps the most recent one around for inspection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("unrecognised option '{0}'")]
    UnrecognizedOption(String),

    #[error("option '{0}' requires an argument")]
    MissingArgument(String),
}
