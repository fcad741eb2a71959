/// Scanner settings that are fixed for a session unless overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Write diagnostics for unrecognized options and missing arguments.
    pub report_errors: bool,
    /// Stop at the first non-option regardless of the option string's mode.
    pub posixly_correct: bool,
}

impl ScannerConfig {
    /// Defaults with `posixly_correct` taken from the `POSIXLY_CORRECT`
    /// environment variable. The environment is read once, here.
    pub fn from_env() -> Self {
        ScannerConfig {
            posixly_correct: std::env::var_os("POSIXLY_CORRECT").is_some(),
            ..Self::default()
        }
    }

    pub fn report_errors(mut self, on: bool) -> Self {
        self.report_errors = on;
        self
    }

    pub fn posixly_correct(mut self, on: bool) -> Self {
        self.posixly_correct = on;
        self
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            report_errors: true,
            posixly_correct: false,
        }
    }
}
