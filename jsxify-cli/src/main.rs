//! Command-line interface for jsxify
//! Cleans pasted HTML and turns it into JSX source.
//!
//! Usage:
//!   jsxify sanitize [<path>]                           - Print the sanitized markup
//!   jsxify generate [<path>] [--component <name>]      - Print a JSX function component
//!   jsxify snippet [<path>] [--strip-class <class>]... - Print a bare JSX fragment
//!
//! `<path>` defaults to `-` (stdin). Settings come from the built-in defaults, then
//! `.jsxify.toml` in the working directory, then `--config <file>`, then flags.

use clap::{Arg, ArgAction, ArgMatches, Command};
use jsxify::GenerateOutput;
use jsxify_config::{JsxifyConfig, Loader, ValueKind};
use std::io::Read;

fn main() {
    let matches = cli().get_matches();
    let (name, sub) = match matches.subcommand() {
        Some(found) => found,
        None => fail("no command given"),
    };
    init_logging(sub.get_flag("verbose"));

    let config = load_config(sub);
    let pipeline = config
        .pipeline()
        .unwrap_or_else(|e| fail(&format!("Configuration error: {e}")));
    let input = read_input(sub.get_one::<String>("path").map(String::as_str).unwrap_or("-"));

    match name {
        "sanitize" => println!("{}", pipeline.sanitize(&input)),
        "generate" => print_output(pipeline.generate(&input), sub.get_flag("json")),
        "snippet" => print_output(pipeline.snippet(&input), sub.get_flag("json")),
        other => fail(&format!("unknown command '{other}'")),
    }
}

fn cli() -> Command {
    let path = Arg::new("path")
        .help("Input file, or - for stdin")
        .default_value("-")
        .index(1);
    let json = Arg::new("json")
        .long("json")
        .help("Print source, formatted flag and warning as JSON")
        .action(ArgAction::SetTrue);
    let no_format = Arg::new("no-format")
        .long("no-format")
        .help("Skip the external formatter")
        .action(ArgAction::SetTrue);

    Command::new("jsxify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sanitize pasted HTML and generate JSX from it")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log every removal and rewrite (debug level)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("events")
                .long("events")
                .global(true)
                .value_parser(["drop", "inert"])
                .help("What to do with inline event handlers"),
        )
        .subcommand(
            Command::new("sanitize")
                .about("Clean markup or plain text into safe HTML")
                .arg(path.clone()),
        )
        .subcommand(
            Command::new("generate")
                .about("Sanitize, then emit a JSX function component")
                .arg(path.clone())
                .arg(
                    Arg::new("component")
                        .long("component")
                        .help("Component name (made PascalCase)"),
                )
                .arg(no_format.clone())
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("snippet")
                .about("Emit a bare JSX fragment from rendered markup")
                .arg(path)
                .arg(
                    Arg::new("strip-class")
                        .long("strip-class")
                        .help("Class token to remove (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(no_format)
                .arg(json),
        )
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

/// Defaults, then `.jsxify.toml`, then `--config`, then flags.
fn load_config(sub: &ArgMatches) -> JsxifyConfig {
    let mut loader = Loader::new().with_optional_file(".jsxify.toml");
    if let Some(path) = sub.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let mut overrides: Vec<(&str, ValueKind)> = Vec::new();
    if let Some(events) = sub.get_one::<String>("events") {
        overrides.push(("sanitize.event_handlers", events.as_str().into()));
    }
    if let Ok(Some(name)) = sub.try_get_one::<String>("component") {
        overrides.push(("transpile.component_name", name.as_str().into()));
    }
    if let Ok(Some(classes)) = sub.try_get_many::<String>("strip-class") {
        let classes: Vec<String> = classes.cloned().collect();
        overrides.push(("transpile.strip_classes", classes.into()));
    }
    if matches!(sub.try_get_one::<bool>("no-format"), Ok(Some(true))) {
        overrides.push(("formatter.enabled", false.into()));
    }

    for (key, value) in overrides {
        loader = loader
            .set_override(key, value)
            .unwrap_or_else(|e| fail(&format!("Configuration error: {e}")));
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(&format!("Configuration error: {e}")))
}

fn read_input(path: &str) -> String {
    let result = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| fail(&format!("Error reading {path}: {e}")))
}

fn print_output(output: GenerateOutput, json: bool) {
    if json {
        let rendered = serde_json::to_string_pretty(&output)
            .unwrap_or_else(|e| fail(&format!("Error encoding output: {e}")));
        println!("{rendered}");
        return;
    }
    if let Some(warning) = &output.warning {
        eprintln!("warning: {warning}; printing unformatted source");
    }
    if output.source.ends_with('\n') {
        print!("{}", output.source);
    } else {
        println!("{}", output.source);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
