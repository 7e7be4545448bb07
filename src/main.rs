use log::{debug, info};
use relabel::event::ScriptFile;
use relabel::interpreter::EventInterpreter;
use relabel::jump::ReturnLabel;
use std::env;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Display help information if no script file provided
    // Exit with success status since user is requesting help, not encountering an error
    if args.len() < 2 {
        println!("relabel - run event scripts with label call/return support");
        println!();
        println!("Usage: {} <script.toml> [--event NAME] [--list]", args[0]);
        println!("Examples:");
        println!("  {} resources/demo/return_talk.toml", args[0]);
        println!(
            "  {} resources/demo/return_talk.toml --event intro --list",
            args[0]
        );
        println!();
        println!("The --event option runs a single named event from the script;");
        println!("--list prints each event's instruction listing instead of running it.");
        println!("Set RUST_LOG=debug (or use 'Console ReturnLabel on' in a script)");
        println!("to see the extension's jump trace.");
        return Ok(());
    }

    let script_path = &args[1];

    let mut only_event = None;
    let mut list_only = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--event" => {
                only_event = args.get(i + 1).cloned();
                if only_event.is_none() {
                    eprintln!("Error: --event requires a name");
                    std::process::exit(1);
                }
                i += 2;
            }
            "--list" => {
                list_only = true;
                i += 1;
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                std::process::exit(1);
            }
        }
    }

    // Load the script file with user-friendly error handling
    debug!("Loading event script: {}", script_path);
    let source = match fs::read_to_string(script_path) {
        Ok(source) => source,
        Err(e) => {
            match e.kind() {
                std::io::ErrorKind::NotFound => {
                    eprintln!("Error: Script file not found: {}", script_path);
                    eprintln!();
                    eprintln!("Please check:");
                    eprintln!("• File path is correct");
                    eprintln!("• You're running from the right directory");
                    eprintln!("• File exists and is readable");
                }
                std::io::ErrorKind::PermissionDenied => {
                    eprintln!(
                        "Error: Permission denied accessing script file: {}",
                        script_path
                    );
                    eprintln!();
                    eprintln!("Please check file permissions.");
                }
                _ => {
                    eprintln!("Error: Cannot open script file '{}': {}", script_path, e);
                }
            }
            std::process::exit(1);
        }
    };

    let script = match ScriptFile::parse(&source) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Error: Cannot parse '{}': {}", script_path, e);
            std::process::exit(1);
        }
    };

    if script.events.is_empty() {
        eprintln!("Error: '{}' defines no events", script_path);
        std::process::exit(1);
    }

    if let Some(name) = &only_event {
        if !script.events.contains_key(name) {
            eprintln!("Error: no event named '{}' in '{}'", name, script_path);
            std::process::exit(1);
        }
    }

    // One extension instance across every event run, so saved resume points
    // persist between events exactly as they do in the engine this models
    let mut plugin = ReturnLabel::new(script.config.clone());

    for (name, event) in &script.events {
        if let Some(only) = &only_event {
            if name != only {
                continue;
            }
        }

        if list_only {
            println!("[{}]", name);
            print!("{}", event);
            continue;
        }

        info!("Running event '{}'", name);
        let mut interp = EventInterpreter::new(event.clone());
        interp.run(&mut plugin);
        for line in interp.output() {
            println!("{}", line);
        }
    }

    if !plugin.stack().is_empty() {
        info!(
            "{} unreturned save(s) left on the return stack",
            plugin.stack().len()
        );
    }

    Ok(())
}
