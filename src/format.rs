//! best-effort output formatting
//!
//! generated code is piped through an external formatter. a formatter that is
//! missing or rejects the code never aborts generation: the unformatted text
//! is kept and a warning is logged.

use xshell::{cmd, Shell};

/// formatter failure
#[derive(Debug, thiserror::Error)]
#[error("formatter failed: {0}")]
pub struct FormatError(pub String);

impl From<xshell::Error> for FormatError {
    fn from(err: xshell::Error) -> Self {
        FormatError(err.to_string())
    }
}

/// source text formatter
pub trait SourceFormatter {
    fn format(&self, code: &str) -> std::result::Result<String, FormatError>;
}

/// formats typescript with the `prettier` cli
#[derive(Debug, Clone)]
pub struct Prettier {
    bin: String,
}

impl Prettier {
    pub fn new() -> Self {
        Self::with_bin("prettier")
    }

    /// use a specific prettier executable
    pub fn with_bin(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for Prettier {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFormatter for Prettier {
    fn format(&self, code: &str) -> std::result::Result<String, FormatError> {
        let sh = Shell::new()?;
        let bin = &self.bin;
        let mut formatted = cmd!(sh, "{bin} --parser typescript")
            .stdin(code)
            .quiet()
            .read()?;
        formatted.push('\n');
        Ok(formatted)
    }
}

/// leaves code untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Unformatted;

impl SourceFormatter for Unformatted {
    fn format(&self, code: &str) -> std::result::Result<String, FormatError> {
        Ok(code.to_string())
    }
}

/// format `code`, falling back to the input when the formatter fails
pub fn format(code: &str, formatter: &dyn SourceFormatter) -> String {
    match formatter.format(code) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "there is a syntax error in generated code, unformatted code kept"
            );
            code.to_string()
        }
    }
}
