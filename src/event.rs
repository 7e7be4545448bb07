use crate::config::ReturnLabelConfig;
use crate::error::EventError;
use crate::instruction::{codes, Instruction, Param};
use crate::listing;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// One event's instruction list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventScript {
    #[serde(default)]
    pub list: Vec<Instruction>,
}

impl EventScript {
    pub fn new(list: Vec<Instruction>) -> Self {
        EventScript { list }
    }

    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }
}

impl fmt::Display for EventScript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", listing::format_list(&self.list))
    }
}

/// Incremental construction of instruction lists, mostly for tests and
/// embedded scripts
#[derive(Debug, Default)]
pub struct EventBuilder {
    list: Vec<Instruction>,
    indent: u16,
}

impl EventBuilder {
    /// Set the indent applied to subsequently added instructions
    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    pub fn instruction(mut self, code: u16, parameters: Vec<Param>) -> Self {
        self.list
            .push(Instruction::new(code, parameters, self.indent));
        self
    }

    pub fn text(self, line: &str) -> Self {
        self.instruction(codes::TEXT, vec![Param::Text(line.to_string())])
    }

    pub fn label(self, name: &str) -> Self {
        self.instruction(codes::LABEL, vec![Param::Text(name.to_string())])
    }

    pub fn jump(self, name: &str) -> Self {
        self.instruction(codes::JUMP_TO_LABEL, vec![Param::Text(name.to_string())])
    }

    pub fn conditional(self, condition: bool) -> Self {
        self.instruction(codes::CONDITIONAL, vec![Param::Bool(condition)])
    }

    pub fn else_branch(self) -> Self {
        self.instruction(codes::ELSE, vec![])
    }

    pub fn branch_end(self) -> Self {
        self.instruction(codes::BRANCH_END, vec![])
    }

    pub fn exit(self) -> Self {
        self.instruction(codes::EXIT_EVENT, vec![])
    }

    pub fn plugin_command(self, line: &str) -> Self {
        self.instruction(codes::PLUGIN_COMMAND, vec![Param::Text(line.to_string())])
    }

    pub fn build(self) -> EventScript {
        EventScript { list: self.list }
    }
}

/// A loaded script file: extension settings plus named events, kept in the
/// order the file declares them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptFile {
    #[serde(default)]
    pub config: ReturnLabelConfig,
    #[serde(default)]
    pub events: IndexMap<String, EventScript>,
}

impl ScriptFile {
    /// Parse a script from TOML text
    pub fn parse(source: &str) -> Result<Self, EventError> {
        toml::from_str(source).map_err(|e| EventError::ScriptError(e.to_string()))
    }

    /// Load a script file from disk
    pub fn load(path: &Path) -> Result<Self, EventError> {
        let source = fs::read_to_string(path).map_err(|e| EventError::IoError(e.to_string()))?;
        Self::parse(&source)
    }
}
