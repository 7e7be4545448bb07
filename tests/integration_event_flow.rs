//! Integration tests for the return-label extension.
//!
//! These drive whole event scripts through the interpreter with the
//! extension installed, the way the CLI does: script parsed from TOML, one
//! extension instance shared across every event run. They verify:
//! - the documented detour ordering (code 1, code 2, code 3)
//! - custom markers configured through the script's `[config]` table
//! - saved resume points persisting across events until explicitly cleared
//! - the bundled demo script staying in sync with the crate

use relabel::config::ReturnLabelConfig;
use relabel::event::{EventScript, ScriptFile};
use relabel::interpreter::EventInterpreter;
use relabel::jump::ReturnLabel;
use std::path::PathBuf;

const DEMO_SCRIPT: &str = "resources/demo/return_talk.toml";

fn run(script: EventScript, plugin: &mut ReturnLabel) -> Vec<String> {
    let mut interp = EventInterpreter::new(script);
    interp.run(plugin);
    interp.take_output()
}

#[test]
fn test_detour_order_from_parsed_script() {
    let script = ScriptFile::parse(
        r#"
        [events.intro]
        list = [
            { code = 401, parameters = ["...code 1..."] },
            { code = 119, parameters = ["Return: Random Talk 1"] },
            { code = 401, parameters = ["...code 3..."] },
            { code = 115 },
            { code = 118, parameters = ["Random Talk 1"] },
            { code = 401, parameters = ["...code 2..."] },
            { code = 119, parameters = ["RETURN"] },
        ]
        "#,
    )
    .unwrap();

    let mut plugin = ReturnLabel::new(script.config.clone());
    let event = script.events.get("intro").unwrap().clone();
    let output = run(event, &mut plugin);
    assert_eq!(output, ["...code 1...", "...code 2...", "...code 3..."]);
    assert!(plugin.stack().is_empty());
}

#[test]
fn test_custom_markers_from_config_table() {
    let script = ScriptFile::parse(
        r#"
        [config]
        prefix = "CALL "
        return_sentinel = "BACK"

        [events.main]
        list = [
            { code = 119, parameters = ["CALL Sub"] },
            { code = 401, parameters = ["after"] },
            { code = 115 },
            { code = 118, parameters = ["Sub"] },
            { code = 401, parameters = ["inside"] },
            { code = 119, parameters = ["BACK"] },
        ]
        "#,
    )
    .unwrap();
    assert_eq!(script.config.prefix, "CALL ");

    let mut plugin = ReturnLabel::new(script.config.clone());
    let event = script.events.get("main").unwrap().clone();
    let output = run(event, &mut plugin);
    assert_eq!(output, ["inside", "after"]);
}

#[test]
fn test_saves_persist_across_events_until_cleared() {
    // An event that saves without ever returning
    let leaky = EventScript::builder()
        .jump("Return: Done")
        .exit()
        .label("Done")
        .exit()
        .build();
    // A later event that inherits the stale save and clears it
    let cleanup = EventScript::builder()
        .plugin_command("ReturnLabel ForgetAll")
        .text("clean")
        .build();

    let mut plugin = ReturnLabel::new(ReturnLabelConfig::default());
    run(leaky, &mut plugin);
    assert_eq!(plugin.stack().len(), 1);

    let output = run(cleanup, &mut plugin);
    assert_eq!(output, ["clean"]);
    assert!(plugin.stack().is_empty());
}

#[test]
fn test_stale_save_returns_into_the_wrong_list() {
    // The stack carries bare indices with no tie to the list they came
    // from; a sentinel jump in a later event lands wherever that index
    // falls in the new list. Documented behavior, hence pinned here.
    let leaky = EventScript::builder()
        .text("lead")
        .jump("Return: Done") // saves index 2
        .exit()
        .label("Done")
        .build();
    let victim = EventScript::builder()
        .jump("RETURN") // pops 2, lands on "surprise"
        .exit()
        .text("surprise")
        .build();

    let mut plugin = ReturnLabel::new(ReturnLabelConfig::default());
    run(leaky, &mut plugin);
    assert_eq!(plugin.stack().len(), 1);

    let output = run(victim, &mut plugin);
    assert_eq!(output, ["surprise"]);
}

#[test]
fn test_demo_script_runs_as_documented() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(DEMO_SCRIPT);
    let script = ScriptFile::load(&path).unwrap();

    let mut plugin = ReturnLabel::new(script.config.clone());

    let intro = script.events.get("intro").unwrap().clone();
    let output = run(intro, &mut plugin);
    assert_eq!(output, ["...code 1...", "...code 2...", "...code 3..."]);

    let housekeeping = script.events.get("housekeeping").unwrap().clone();
    let output = run(housekeeping, &mut plugin);
    assert_eq!(output, ["housekeeping done"]);
    assert!(plugin.stack().is_empty());
}
