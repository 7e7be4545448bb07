use crate::command;
use crate::config::ReturnLabelConfig;
use crate::error::EventError;
use crate::instruction::Instruction;
use crate::interpreter::EventInterpreter;
use crate::resolver::{find_label, Classification, LabelResolver, Resolution};
use crate::return_stack::{PopReport, ReturnStack};
use log::{debug, info, warn};

/// What a jump request ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum JumpOutcome {
    /// Pointer moved to a label definition
    Jumped(usize),
    /// Pointer restored from the return stack
    Returned(usize),
    /// No matching label definition; the jump was abandoned
    NotFound,
    /// Return requested with an empty stack; the jump was abandoned
    Underflow,
}

/// The engine's jump-handling extension point.
///
/// The interpreter routes every jump-to-label instruction through the
/// installed handler; an implementation may delegate plain jumps back to
/// [`EventInterpreter::default_jump`] and layer its own behavior on top.
pub trait JumpHandler {
    /// Resolve `requested` and relocate the interpreter accordingly
    fn handle_jump(&mut self, interp: &mut EventInterpreter, requested: &str) -> JumpOutcome;

    /// Script-driven housekeeping command; the default implementation
    /// ignores it
    fn plugin_command(
        &mut self,
        _interp: &mut EventInterpreter,
        _command: &str,
        _args: &[String],
    ) {
    }
}

/// The engine's stock behavior: ordinary jumps only, no stack
pub struct DefaultJump;

impl JumpHandler for DefaultJump {
    fn handle_jump(&mut self, interp: &mut EventInterpreter, requested: &str) -> JumpOutcome {
        match interp.default_jump(requested) {
            Some(target) => JumpOutcome::Jumped(target),
            None => {
                debug!("no label named {:?}; jump abandoned", requested);
                JumpOutcome::NotFound
            }
        }
    }
}

/// The return-label extension.
///
/// A jump whose label starts with the configured prefix pushes its resume
/// point (the index right after the jump) onto the return stack before
/// jumping; a jump to the configured sentinel pops the stack and returns
/// there. The value is session-scoped: keep one `ReturnLabel` across event
/// runs and the stack persists between them, exactly like the engine it
/// models. Call [`ReturnLabel::reset`] at whatever boundary independent
/// runs should not leak across.
pub struct ReturnLabel {
    config: ReturnLabelConfig,
    resolver: LabelResolver,
    stack: ReturnStack,
    verbose: bool,
}

impl ReturnLabel {
    /// Build the extension from its configuration.
    ///
    /// A conflicted configuration (prefix equal to the sentinel) is
    /// reported loudly exactly once, and the extension keeps running in a
    /// degraded mode where every marked jump classifies as a return.
    pub fn new(config: ReturnLabelConfig) -> Self {
        match config.validate() {
            Ok(()) => {
                if config.verbose {
                    info!(
                        "return label markers: prefix {:?}, sentinel {:?}",
                        config.prefix, config.return_sentinel
                    );
                }
            }
            Err(e) => warn!("{}", e),
        }
        ReturnLabel {
            resolver: LabelResolver::new(&config),
            stack: ReturnStack::new(),
            verbose: config.verbose,
            config,
        }
    }

    pub fn config(&self) -> &ReturnLabelConfig {
        &self.config
    }

    pub fn stack(&self) -> &ReturnStack {
        &self.stack
    }

    pub fn resolver(&self) -> &LabelResolver {
        &self.resolver
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn toggle_verbose(&mut self) {
        self.verbose = !self.verbose;
    }

    /// Host-facing boundary between independent runs
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    /// Diagnostic trace, chatty only when the verbose flag is on
    pub(crate) fn trace(&self, message: &str) {
        if self.verbose {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }

    // Housekeeping operations, also reachable through the command surface.

    /// Forget every saved resume point
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Pop up to `count` saved points, reporting each underflow
    pub fn pop_n(&mut self, count: usize) -> PopReport {
        self.stack.pop_n(count)
    }

    /// Manually seed a resume point
    pub fn push_index(&mut self, index: usize) {
        self.stack.push(index);
    }

    /// Resolve `name` by ordinary scan and remember its index without
    /// jumping, as if a save jump there had been executed and suppressed
    pub fn learn(&mut self, list: &[Instruction], name: &str) -> Result<usize, EventError> {
        match find_label(list, name) {
            Some(index) => {
                self.stack.push(index);
                self.trace(&format!("learned label {:?} at index {}", name, index));
                Ok(index)
            }
            None => Err(EventError::LabelNotFound(name.to_string())),
        }
    }
}

impl JumpHandler for ReturnLabel {
    fn handle_jump(&mut self, interp: &mut EventInterpreter, requested: &str) -> JumpOutcome {
        // Plain labels stay the engine's business
        let (classification, _) = self.resolver.classify(requested);
        if classification == Classification::Ordinary {
            return match interp.default_jump(requested) {
                Some(target) => {
                    self.trace(&format!("jump to label {:?} at index {}", requested, target));
                    JumpOutcome::Jumped(target)
                }
                None => {
                    self.trace(&format!("no label named {:?}; jump abandoned", requested));
                    JumpOutcome::NotFound
                }
            };
        }

        match self.resolver.resolve(requested, interp.list()) {
            Resolution::UseStack => match self.stack.pop() {
                Some(target) => {
                    self.trace(&format!("return to saved index {}", target));
                    interp.return_to(target);
                    JumpOutcome::Returned(target)
                }
                None => {
                    warn!("{}", EventError::StackUnderflow);
                    JumpOutcome::Underflow
                }
            },
            Resolution::Target { index, .. } => {
                let resume = interp.index() + 1;
                self.stack.push(resume);
                self.trace(&format!(
                    "saved resume point {}, jumping to index {}",
                    resume, index
                ));
                interp.jump_to(index);
                JumpOutcome::Jumped(index)
            }
            Resolution::NotFound(name) => {
                self.trace(&format!("no label named {:?}; jump abandoned", name));
                JumpOutcome::NotFound
            }
        }
    }

    fn plugin_command(&mut self, interp: &mut EventInterpreter, cmd: &str, args: &[String]) {
        if let Err(e) = command::dispatch(self, interp, cmd, args) {
            warn!("{}", e);
        }
    }
}
