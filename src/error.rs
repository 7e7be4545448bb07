// Event engine error handling

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EventError {
    // Configuration errors
    ConfigConflict(String), // the value both markers share

    // Jump errors
    LabelNotFound(String),
    StackUnderflow,

    // Command surface errors
    InvalidArgument(String, String), // command, offending argument
    MissingArgument(String),         // command

    // Script loading errors
    ScriptError(String),
    IoError(String),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventError::ConfigConflict(value) => {
                write!(
                    f,
                    "prefix and return sentinel are both {:?}; return jumps will shadow save jumps",
                    value
                )
            }
            EventError::LabelNotFound(name) => {
                write!(f, "no label named {:?} in the current event", name)
            }
            EventError::StackUnderflow => {
                write!(f, "return requested with an empty return stack")
            }
            EventError::InvalidArgument(command, arg) => {
                write!(f, "argument {:?} to '{}' is not a whole number", arg, command)
            }
            EventError::MissingArgument(command) => {
                write!(f, "'{}' requires an argument", command)
            }
            EventError::ScriptError(msg) => {
                write!(f, "script error: {}", msg)
            }
            EventError::IoError(msg) => {
                write!(f, "io error: {}", msg)
            }
        }
    }
}

impl std::error::Error for EventError {}
