use crate::error::EventError;
use serde::Deserialize;

/// Default marker that turns a jump into a save-and-jump
const DEFAULT_PREFIX: &str = "Return: ";

/// Default sentinel label that pops the return stack
const DEFAULT_SENTINEL: &str = "RETURN";

/// Settings for the return-label extension.
///
/// A jump whose label starts with `prefix` saves its resume point before
/// jumping; a jump whose label is exactly `return_sentinel` pops the saved
/// point and returns there. `verbose` turns on the per-jump console trace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReturnLabelConfig {
    pub prefix: String,
    pub return_sentinel: String,
    pub verbose: bool,
}

impl Default for ReturnLabelConfig {
    fn default() -> Self {
        ReturnLabelConfig {
            prefix: DEFAULT_PREFIX.to_string(),
            return_sentinel: DEFAULT_SENTINEL.to_string(),
            verbose: false,
        }
    }
}

impl ReturnLabelConfig {
    /// Convenience constructor for programmatic setup
    pub fn new(prefix: &str, return_sentinel: &str) -> Self {
        ReturnLabelConfig {
            prefix: prefix.to_string(),
            return_sentinel: return_sentinel.to_string(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check the markers for ambiguity.
    ///
    /// When the prefix and the sentinel are the same string, every save jump
    /// is indistinguishable from a return jump. The caller is expected to
    /// warn and keep running rather than refuse to start.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.prefix == self.return_sentinel {
            return Err(EventError::ConfigConflict(self.prefix.clone()));
        }
        Ok(())
    }
}
