use clap::Parser;
use jouken::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

/// Loads, edits, layers and stores filter condition trees
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the filter document JSON file. The built-in seed tree is used when omitted
    filter_path: Option<String>,

    /// JSON file holding an array of edit events to apply
    #[arg(short, long)]
    events: Option<String>,

    /// Where to write the resulting filter document
    #[arg(short, long)]
    output: Option<String>,

    /// Resume from a session snapshot instead of a filter document
    #[arg(long, conflicts_with = "filter_path")]
    resume: Option<String>,

    /// Save a session snapshot after editing
    #[arg(long)]
    snapshot: Option<String>,

    /// Allow removing the root condition
    #[arg(long)]
    unprotected_root: bool,

    /// Run in interactive mode to edit the tree with prompts
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let load_start = Instant::now();
    let mut session = open_session(&cli);
    println!(
        "Loaded graph rooted at '{}': {} condition(s), {} connection(s) in {:?}",
        session.graph().root(),
        session.graph().node_count(),
        session.graph().edge_count(),
        load_start.elapsed()
    );

    if let Some(events_path) = &cli.events {
        apply_event_file(&mut session, events_path);
    }

    if cli.human {
        run_interactive(&mut session);
    }

    print_layers(&session);
    finish(&session, cli.output.as_deref(), cli.snapshot.as_deref());
}

fn open_session(cli: &Cli) -> EditSession {
    let dag = if let Some(snapshot_path) = &cli.resume {
        println!("Resuming session from snapshot: {}", snapshot_path);
        SessionSnapshot::from_file(snapshot_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load snapshot: {}", e)))
            .graph
    } else {
        let document = match &cli.filter_path {
            Some(path) => {
                println!("Loading filter from: {}", path);
                FilterDocument::from_file(path).unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to load filter '{}': {}", path, e))
                })
            }
            None => {
                println!("No filter file provided. Using the seed filter tree.");
                FilterDocument::sample()
            }
        };
        document
            .to_dag()
            .unwrap_or_else(|e| exit_with_error(&format!("Malformed filter: {}", e)))
    };

    EditSession::builder(dag)
        .with_root_protection(!cli.unprotected_root)
        .build()
}

fn apply_event_file(session: &mut EditSession, events_path: &str) {
    let events_json = fs::read_to_string(events_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read events file '{}': {}",
            events_path, e
        ))
    });
    let events: Vec<GraphEvent> = serde_json::from_str(&events_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse events JSON: {}", e)));

    let total = events.len();
    let changed = session
        .apply_all(events)
        .unwrap_or_else(|e| exit_with_error(&format!("Edit rejected: {}", e)));
    println!("Applied {} event(s), {} changed the graph", total, changed);
}

fn print_layers(session: &EditSession) {
    match session.layers() {
        Ok(layers) => println!("\n{}", render_layers(&layers, session.graph())),
        Err(e) => eprintln!("\nWarning: could not layer the graph: {}", e),
    }
}

fn finish(session: &EditSession, output: Option<&str>, snapshot: Option<&str>) {
    if let Some(snapshot_path) = snapshot {
        session
            .snapshot()
            .save(snapshot_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save snapshot: {}", e)));
        println!("  -> Wrote session snapshot to '{}'", snapshot_path);
    }

    let document = session
        .to_document()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));

    match output {
        Some(path) => {
            document.save(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write filter '{}': {}", path, e))
            });
            println!("  -> Wrote filter document to '{}'", path);
        }
        None => {
            let json = document
                .to_json_pretty()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode filter: {}", e)));
            println!("{}", json);
        }
    }
}

/// Runs a small prompt loop that edits the session until the user quits.
fn run_interactive(session: &mut EditSession) {
    println!("--- Jouken Interactive Mode ---");
    print_help();

    loop {
        let line = prompt_for_input("Enter command", Some("layers"));
        let parts: Vec<&str> = line.split_whitespace().collect();

        let outcome = match parts.as_slice() {
            ["add", parameter, operator, value] => match operator.parse::<Operator>() {
                Ok(operator) => {
                    let id = session.add_condition(parameter, operator, value);
                    println!("  -> Added condition '{}'", id);
                    Ok(())
                }
                Err(e) => {
                    println!("{}", e);
                    Ok(())
                }
            },
            ["update", id, parameter, operator, value] => match operator.parse::<Operator>() {
                Ok(operator) => session.update_condition(id, parameter, operator, value),
                Err(e) => {
                    println!("{}", e);
                    Ok(())
                }
            },
            ["connect", source, target] => session.connect(source, target).map(|edge_id| {
                println!("  -> Added connection '{}'", edge_id);
            }),
            ["remove-node", id] => session.apply(GraphEvent::remove_node(id)).map(|_| ()),
            ["remove-edge", id] => session.apply(GraphEvent::remove_edge(id)).map(|_| ()),
            ["undo"] => {
                if !session.undo() {
                    println!("Nothing to undo.");
                }
                Ok(())
            }
            ["redo"] => {
                if !session.redo() {
                    println!("Nothing to redo.");
                }
                Ok(())
            }
            ["layers"] => {
                print_layers(session);
                Ok(())
            }
            ["help"] => {
                print_help();
                Ok(())
            }
            ["quit"] | ["q"] => break,
            _ => {
                println!("Invalid command. Type 'help' for the list of commands.");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("Edit rejected: {}", e);
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  add <parameter> <op> <value>          add an unconnected condition");
    println!("  update <id> <parameter> <op> <value>  change a condition");
    println!("  connect <source> <target>             add a connection");
    println!("  remove-node <id> | remove-edge <id>   remove an element");
    println!("  undo | redo | layers | help | quit");
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    let read = io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    if read == 0 {
        // stdin closed
        return "quit".to_string();
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
