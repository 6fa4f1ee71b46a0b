//! Command-line interface for hed
//! This binary inspects hosts files and writes edited entry lists back into them.
//!
//! Usage:
//!   hed lines  [path]                                 - Classified lines
//!   hed list   [path] [--group `<name>`]              - Folded entries
//!   hed groups [path]                                 - Groups with their text and entries
//!   hed format [path]                                 - Rewrite the file with merged entries
//!   hed apply  --items `<file>` [path] [--group `<name>`] - Write an edited entry list
//!   hed is-ip  `<text>`                               - Check IP syntax
//!
//! Configuration is layered: built-in defaults, then the per-user file (see
//! [hed_config::user_config_path]), then `--config`, then `--hosts-per-line`.
//!
//! Output goes to stdout; the hosts file itself is never written.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use hed_config::{HedConfig, Loader};
use tracing_subscriber::EnvFilter;

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the hosts file (default: configured or system hosts file)")
        .value_parser(clap::value_parser!(PathBuf))
        .index(1)
}

fn group_arg() -> Arg {
    Arg::new("group")
        .long("group")
        .short('g')
        .help("Treat the input as the private text of this group")
}

fn cli() -> Command {
    Command::new("hed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and editing hosts files with named groups")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("hosts-per-line")
                .long("hosts-per-line")
                .short('w')
                .global(true)
                .value_parser(clap::value_parser!(u32))
                .help("Maximum hosts per generated line (overrides format.hosts_per_line)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(
            Command::new("lines")
                .about("Print the classified lines of a hosts file")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("Print the entries of a hosts file")
                .arg(path_arg())
                .arg(group_arg()),
        )
        .subcommand(
            Command::new("groups")
                .about("Print every group with its private text and entries")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("format")
                .about("Print the hosts file rewritten with merged, deduplicated entries")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("apply")
                .about("Print the hosts file with an edited entry list written over it")
                .arg(
                    Arg::new("items")
                        .long("items")
                        .short('i')
                        .required(true)
                        .help("JSON array of entries to write ('-' reads stdin)"),
                )
                .arg(path_arg())
                .arg(group_arg()),
        )
        .subcommand(
            Command::new("is-ip")
                .about("Check whether the argument is a valid IPv4 or IPv6 address")
                .arg(Arg::new("text").required(true).index(1)),
        )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<HedConfig> {
    let mut loader = Loader::new();
    if let Some(path) = hed_config::user_config_path() {
        tracing::debug!(path = %path.display(), "layering user config if present");
        loader = loader.with_optional_file(path);
    }
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(width) = matches.get_one::<u32>("hosts-per-line") {
        loader = loader.set_override("format.hosts_per_line", i64::from(*width))?;
    }
    Ok(loader.build()?)
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let config = load_config(matches)?;
    let Some((name, sub)) = matches.subcommand() else {
        unreachable!("clap requires a subcommand");
    };

    let path = sub.try_get_one::<PathBuf>("path").ok().flatten();
    let group = sub
        .try_get_one::<String>("group")
        .ok()
        .flatten()
        .map(String::as_str);

    let out = match name {
        "lines" => commands::lines(&config, path)?,
        "list" => commands::list(&config, path, group)?,
        "groups" => commands::groups(&config, path)?,
        "format" => commands::format(&config, path)?,
        "apply" => {
            let items = sub
                .get_one::<String>("items")
                .expect("items is a required argument");
            commands::apply(&config, path, items, group)?
        }
        "is-ip" => {
            let text = sub
                .get_one::<String>("text")
                .expect("text is a required argument");
            let valid = hed_parser::is_ip(text);
            println!("{}", valid);
            return Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        other => unreachable!("unknown subcommand {other}"),
    };

    print!("{}", out);
    Ok(ExitCode::SUCCESS)
}
