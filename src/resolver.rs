use crate::config::ReturnLabelConfig;
use crate::instruction::{codes, Instruction};
use log::debug;

/// How a requested label name is to be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Plain jump to the named label
    Ordinary,
    /// Save the resume point, then jump to the label after the prefix
    Save,
    /// Pop the return stack and go back
    Return,
}

/// Result of resolving a requested label against an instruction list
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A label definition was found at `index`
    Target {
        classification: Classification,
        index: usize,
    },
    /// Return requested; the target comes off the stack, not from a scan
    UseStack,
    /// No matching label definition exists; the jump is abandoned
    NotFound(String),
}

/// Classifies requested label names and locates their targets.
///
/// The sentinel is checked before the prefix, so when the configuration is
/// conflicted (both markers equal) every such jump resolves as a return.
#[derive(Debug, Clone)]
pub struct LabelResolver {
    prefix: String,
    return_sentinel: String,
}

impl LabelResolver {
    pub fn new(config: &ReturnLabelConfig) -> Self {
        LabelResolver {
            prefix: config.prefix.clone(),
            return_sentinel: config.return_sentinel.clone(),
        }
    }

    /// Classify `requested` and derive the label actually searched for.
    ///
    /// Save jumps strip exactly the configured prefix from the front; the
    /// remainder may be empty, which then only matches a label whose name
    /// is the empty string. Matching is literal, with no trimming.
    pub fn classify<'a>(&self, requested: &'a str) -> (Classification, &'a str) {
        if requested == self.return_sentinel {
            (Classification::Return, requested)
        } else if let Some(stripped) = requested.strip_prefix(self.prefix.as_str()) {
            (Classification::Save, stripped)
        } else {
            (Classification::Ordinary, requested)
        }
    }

    /// Classify `requested` and, unless it is a return, scan `list` for the
    /// target label definition.
    pub fn resolve(&self, requested: &str, list: &[Instruction]) -> Resolution {
        let (classification, effective) = self.classify(requested);
        match classification {
            Classification::Return => {
                debug!("detected return sentinel {:?}", requested);
                Resolution::UseStack
            }
            Classification::Save | Classification::Ordinary => {
                debug!(
                    "resolving {:?} label {:?}",
                    classification, effective
                );
                match find_label(list, effective) {
                    Some(index) => Resolution::Target {
                        classification,
                        index,
                    },
                    None => Resolution::NotFound(effective.to_string()),
                }
            }
        }
    }
}

/// Forward scan for the first label definition named `name`.
///
/// The scan always starts at index 0 regardless of the current position, so
/// with duplicate label names the first occurrence wins every time.
pub fn find_label(list: &[Instruction], name: &str) -> Option<usize> {
    list.iter()
        .position(|inst| inst.code == codes::LABEL && inst.label_name() == Some(name))
}
