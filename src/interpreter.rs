use crate::event::EventScript;
use crate::instruction::{codes, Instruction, Param};
use crate::jump::{JumpHandler, JumpOutcome};
use crate::resolver;
use log::{debug, warn};
use std::collections::HashMap;

/// Result of executing one instruction
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// Pointer advanced to the next instruction
    Continue,
    /// A jump relocated the pointer; it now rests on the target
    Jumped(usize),
    /// The event finished
    Done,
}

/// A minimal scripted-event engine.
///
/// Drives one event's instruction list: a pointer, the current indent, and
/// per-indent branch bookkeeping. Jump-to-label instructions are routed
/// through a [`JumpHandler`] supplied by the caller, which is the seam the
/// return-label extension plugs into.
pub struct EventInterpreter {
    list: Vec<Instruction>,
    index: usize,
    indent: u16,
    /// Which branch was taken at each indent level
    branch: HashMap<u16, bool>,
    /// Text lines produced by the event so far
    output: Vec<String>,
}

impl EventInterpreter {
    pub fn new(script: EventScript) -> Self {
        Self::from_list(script.list)
    }

    pub fn from_list(list: Vec<Instruction>) -> Self {
        EventInterpreter {
            list,
            index: 0,
            indent: 0,
            branch: HashMap::new(),
            output: Vec::new(),
        }
    }

    pub fn list(&self) -> &[Instruction] {
        &self.list
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn indent(&self) -> u16 {
        self.indent
    }

    pub fn branch(&self) -> &HashMap<u16, bool> {
        &self.branch
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Relocate the pointer to `target`, repairing branch bookkeeping.
    ///
    /// Walks every instruction between the current position and the target
    /// and clears the branch slot of each indent level the jump crosses, so
    /// stale "which branch was taken" state cannot leak into execution on
    /// the other side of the jump.
    pub fn jump_to(&mut self, target: usize) {
        let start = self.index.min(target);
        let end = self.index.max(target);
        let mut indent = self.indent;
        for i in start..=end {
            let new_indent = self.list[i].indent;
            if new_indent != indent {
                self.branch.remove(&indent);
                indent = new_indent;
            }
        }
        self.index = target;
    }

    /// Relocate the pointer with no branch repair.
    ///
    /// Return jumps use this: the forward relocation already repaired the
    /// crossed levels when the matching save jump ran, and repairing again
    /// would reset branch state that is still live at the resume point.
    pub fn return_to(&mut self, target: usize) {
        self.index = target;
    }

    /// The engine's native jump-to-label behavior: forward scan for the
    /// first matching label definition, then relocate with repair.
    pub fn default_jump(&mut self, name: &str) -> Option<usize> {
        match resolver::find_label(&self.list, name) {
            Some(target) => {
                self.jump_to(target);
                Some(target)
            }
            None => None,
        }
    }

    /// Skip forward over instructions nested deeper than the current indent
    fn skip_branch(&mut self) {
        while self.index + 1 < self.list.len() && self.list[self.index + 1].indent > self.indent {
            self.index += 1;
        }
    }

    /// Execute the instruction under the pointer.
    ///
    /// After a successful jump the pointer rests ON the target instruction
    /// and is not advanced this step; the saved resume point of a save jump
    /// (`index + 1`) therefore lands exactly where execution continues after
    /// a return.
    pub fn step(&mut self, handler: &mut dyn JumpHandler) -> StepResult {
        let inst = match self.list.get(self.index) {
            Some(inst) => inst.clone(),
            None => return StepResult::Done,
        };
        self.indent = inst.indent;

        match inst.code {
            codes::END | codes::EXIT_EVENT => return StepResult::Done,
            codes::TEXT => {
                if let Some(line) = inst.parameters.first().and_then(Param::as_text) {
                    debug!("text: {}", line);
                    self.output.push(line.to_string());
                }
            }
            codes::COMMENT | codes::COMMENT_MORE | codes::BRANCH_END | codes::LABEL => {}
            codes::CONDITIONAL => {
                let result = inst.parameters.first().map(Param::truthy).unwrap_or(false);
                self.branch.insert(self.indent, result);
                if !result {
                    self.skip_branch();
                }
            }
            codes::ELSE => {
                if self.branch.get(&self.indent) != Some(&false) {
                    self.skip_branch();
                }
            }
            codes::JUMP_TO_LABEL => match inst.label_name() {
                Some(requested) => {
                    let requested = requested.to_string();
                    match handler.handle_jump(self, &requested) {
                        JumpOutcome::Jumped(target) | JumpOutcome::Returned(target) => {
                            return StepResult::Jumped(target);
                        }
                        // Abandoned jumps fall through to the next instruction
                        JumpOutcome::NotFound | JumpOutcome::Underflow => {}
                    }
                }
                None => warn!("jump at index {} has no label name", self.index),
            },
            codes::PLUGIN_COMMAND => {
                if let Some(line) = inst.parameters.first().and_then(Param::as_text) {
                    let mut words = line.split_whitespace().map(str::to_string);
                    if let Some(command) = words.next() {
                        let args: Vec<String> = words.collect();
                        handler.plugin_command(self, &command, &args);
                    }
                }
            }
            other => {
                debug!("unhandled command code {} at index {}", other, self.index);
            }
        }

        self.index += 1;
        StepResult::Continue
    }

    /// Run the event to completion
    pub fn run(&mut self, handler: &mut dyn JumpHandler) {
        loop {
            if self.step(handler) == StepResult::Done {
                break;
            }
        }
    }
}
