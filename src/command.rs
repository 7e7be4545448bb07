use crate::error::EventError;
use crate::interpreter::EventInterpreter;
use crate::jump::ReturnLabel;
use log::{debug, info};

/// Command word the housekeeping surface answers to
const COMMAND_WORD: &str = "ReturnLabel";
/// Command word of the diagnostic toggle
const CONSOLE_WORD: &str = "Console";

/// Apply one housekeeping command line to the extension.
///
/// `command` is the first word of the line, `args` the remaining words.
/// Recognized forms:
///
/// - `ReturnLabel ForgetAll`
/// - `ReturnLabel ForgetLast [n]` / `ReturnLabel Pop [n]` (default 1)
/// - `ReturnLabel Push n`
/// - `ReturnLabel LearnNew <label name>`
/// - `Console ReturnLabel on|true|off|false|switch|toggle` (either word
///   order)
///
/// Failures are recoverable: the operation is skipped and the error is
/// returned for the caller to report. Nothing here stops event execution.
pub fn dispatch(
    plugin: &mut ReturnLabel,
    interp: &mut EventInterpreter,
    command: &str,
    args: &[String],
) -> Result<(), EventError> {
    let sub = args.first().map(String::as_str);

    if (command == CONSOLE_WORD && sub == Some(COMMAND_WORD))
        || (command == COMMAND_WORD && sub == Some(CONSOLE_WORD))
    {
        return console_toggle(plugin, args.get(1).map(String::as_str));
    }

    if command != COMMAND_WORD {
        return Ok(());
    }

    match sub {
        Some("ForgetAll") => {
            plugin.clear();
            plugin.trace("forgot every saved resume point");
            Ok(())
        }
        Some(name @ ("ForgetLast" | "Pop")) => {
            let count = match args.get(1) {
                Some(arg) => parse_whole(name, arg)?,
                None => 1,
            };
            let report = plugin.pop_n(count);
            plugin.trace(&format!(
                "popped {:?}, {} underflow(s)",
                report.popped, report.underflows
            ));
            Ok(())
        }
        Some("Push") => {
            let arg = args
                .get(1)
                .ok_or_else(|| EventError::MissingArgument("Push".to_string()))?;
            let index = parse_whole("Push", arg)?;
            plugin.push_index(index);
            plugin.trace(&format!("pushed resume point {}", index));
            Ok(())
        }
        Some("LearnNew") => {
            if args.len() < 2 {
                return Err(EventError::MissingArgument("LearnNew".to_string()));
            }
            // Label names may contain spaces
            let name = args[1..].join(" ");
            plugin.learn(interp.list(), &name)?;
            Ok(())
        }
        Some(other) => {
            debug!("unknown {} sub-command {:?}", COMMAND_WORD, other);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Flip or set the verbose diagnostic flag; never touches stack state
fn console_toggle(plugin: &mut ReturnLabel, mode: Option<&str>) -> Result<(), EventError> {
    let mode = mode.ok_or_else(|| EventError::MissingArgument("Console".to_string()))?;
    match mode.to_lowercase().as_str() {
        "on" | "true" => plugin.set_verbose(true),
        "off" | "false" => plugin.set_verbose(false),
        "switch" | "toggle" => plugin.toggle_verbose(),
        other => {
            info!("unfamiliar console argument {:?}", other);
            return Ok(());
        }
    }
    info!(
        "return label console is {}",
        if plugin.verbose() { "on" } else { "off" }
    );
    Ok(())
}

fn parse_whole(command: &str, arg: &str) -> Result<usize, EventError> {
    arg.parse::<usize>()
        .map_err(|_| EventError::InvalidArgument(command.to_string(), arg.to_string()))
}
