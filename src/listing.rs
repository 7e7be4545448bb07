use crate::instruction::{codes, Instruction};
use std::collections::HashMap;
use std::fmt::Write;

lazy_static! {
    static ref CODE_NAMES: HashMap<u16, &'static str> = {
        let mut m = HashMap::new();
        m.insert(codes::END, "end");
        m.insert(codes::TEXT, "text");
        m.insert(codes::COMMENT, "comment");
        m.insert(codes::COMMENT_MORE, "comment");
        m.insert(codes::CONDITIONAL, "if");
        m.insert(codes::ELSE, "else");
        m.insert(codes::BRANCH_END, "endif");
        m.insert(codes::EXIT_EVENT, "exit");
        m.insert(codes::LABEL, "label");
        m.insert(codes::JUMP_TO_LABEL, "jump");
        m.insert(codes::PLUGIN_COMMAND, "plugin");
        m
    };
}

pub fn code_name(code: u16) -> &'static str {
    CODE_NAMES.get(&code).copied().unwrap_or("unknown")
}

/// Render one instruction as `index  indent  name args`
pub fn format_instruction(index: usize, inst: &Instruction) -> String {
    let mut line = format!(
        "{:4}  {}{}",
        index,
        "  ".repeat(inst.indent as usize),
        code_name(inst.code)
    );
    for param in &inst.parameters {
        let _ = write!(line, " {}", param);
    }
    line
}

/// Render a whole instruction list, one instruction per line
pub fn format_list(list: &[Instruction]) -> String {
    let mut out = String::new();
    for (i, inst) in list.iter().enumerate() {
        out.push_str(&format_instruction(i, inst));
        out.push('\n');
    }
    out
}
