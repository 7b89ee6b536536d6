//! Command-line interface for cuesheet
//!
//! Reads a route file (JSON, YAML or the route service's CSV export) and prints the cue
//! sheet to stdout.
//!
//! Usage:
//!   cuesheet `<path>` [--format latex|text|json] [--input auto|json|yaml|csv]
//!            [--id `<id>`] [--name `<name>`] [--config `<file>`] [--no-splice]
//!            [--quick-threshold `<miles>`] [--gray-level `<level>`]
//!   cuesheet --list-formats
//!
//! Without `--config`, a `cuesheet.toml` in the working directory is layered over the
//! built-in defaults when present.
//!
//! Set `RUST_LOG=debug` to see ingestion and splicing decisions on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use cuesheet::cue::config::{CueConfig, Loader};
use cuesheet::cue::formats::{FormatRegistry, JsonFormatter, LatexFormatter, TextFormatter};
use cuesheet::cue::records::{read_route_file, InputFormat};
use cuesheet::cue::transforms::standard::build_route_transform;
use std::error::Error;

const LOCAL_CONFIG: &str = "cuesheet.toml";

fn main() {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let matches = Command::new("cuesheet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turns turn-by-turn route data into a printable bicycle cue sheet")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the route file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (see --list-formats)")
                .default_value("latex"),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .help("Input encoding; 'auto' picks it from the file extension")
                .value_parser(["auto", "json", "yaml", "csv"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("id")
                .long("id")
                .help("Route id shown in the header (defaults to the file's id or name)"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .help("Route name shown in the header"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("quick-threshold")
                .long("quick-threshold")
                .help("Gap in miles below which a turn is marked quick")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("gray-level")
                .long("gray-level")
                .help("Gray shade for highlighted rows, 0.0 (black) to 1.0 (white)")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("no-splice")
                .long("no-splice")
                .help("Keep [start]/[end] tagged entries where they are")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = load_config(matches)?;
    let registry = build_registry(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return Ok(());
    }

    let path = matches
        .get_one::<String>("path")
        .ok_or("missing route file path")?;
    let input = match matches.get_one::<String>("input").map(String::as_str) {
        None | Some("auto") => None,
        Some(name) => Some(name.parse::<InputFormat>()?),
    };

    let mut source = read_route_file(path, input)?;
    if let Some(id) = matches.get_one::<String>("id") {
        source.metadata.id = id.clone();
    }
    if let Some(name) = matches.get_one::<String>("name") {
        source.metadata.name = Some(name.clone());
    }

    let splice = !matches.get_flag("no-splice");
    let route = build_route_transform(&config, splice).run(source)?;

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("latex");
    let output = registry.serialize(&route, format)?;
    print!("{output}");
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<CueConfig, Box<dyn Error>> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(threshold) = matches.get_one::<f64>("quick-threshold") {
        loader = loader.set_override("ingest.quick_threshold_mi", *threshold)?;
    }
    if let Some(level) = matches.get_one::<f64>("gray-level") {
        loader = loader.set_override("render.gray_level", *level)?;
    }
    Ok(loader.build()?)
}

fn build_registry(config: &CueConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(LatexFormatter::new(config.render.clone()));
    registry.register(TextFormatter);
    registry.register(JsonFormatter);
    registry
}

/// Handle the --list-formats flag
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        println!("  {name}");
        if let Some(formatter) = registry.get(&name) {
            println!("    {}", formatter.description());
        }
    }
}
