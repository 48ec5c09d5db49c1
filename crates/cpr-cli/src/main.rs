use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};
use cpr_cli::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let input = || {
        Arg::new("input")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Experimental request JSON file")
    };

    Command::new("cpr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve, validate and inspect experimental request documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level unless RUST_LOG is set"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve every reference and re-serialize")
                .arg(input())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write here instead of stdout"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print JSON"),
                )
                .arg(
                    Arg::new("inline-blocks")
                        .long("inline-blocks")
                        .action(ArgAction::SetTrue)
                        .help("Replace block references with their definitions"),
                )
                .arg(
                    Arg::new("expand-sweeps")
                        .long("expand-sweeps")
                        .action(ArgAction::SetTrue)
                        .help("Rewrite generate blocks as sums of fixed values"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Report problems; exits 1 if any are found")
                .arg(input()),
        )
        .subcommand(
            Command::new("show")
                .about("Print each design tree")
                .arg(input()),
        )
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("resolve", args)) => {
            let config = match args.get_one::<PathBuf>("config") {
                Some(path) => CliConfig::load(path)?,
                None => CliConfig::default(),
            }
            .with_pretty(args.get_flag("pretty"))
            .with_inline_blocks(args.get_flag("inline-blocks"))
            .with_expand_sweeps(args.get_flag("expand-sweeps"));

            let Some(input) = args.get_one::<PathBuf>("input") else {
                unreachable!("input is required")
            };
            let output = args.get_one::<PathBuf>("output");
            let text = cpr_cli::resolve(input, output.map(PathBuf::as_path), &config)?;
            if output.is_none() {
                print!("{text}");
            }
        }
        Some(("validate", args)) => {
            let Some(input) = args.get_one::<PathBuf>("input") else {
                unreachable!("input is required")
            };
            let issues = cpr_cli::validate(input)?;
            for issue in &issues {
                println!("{issue}");
            }
            if !issues.is_empty() {
                eprintln!("{} issue(s) found", issues.len());
                std::process::exit(1);
            }
            println!("ok");
        }
        Some(("show", args)) => {
            let Some(input) = args.get_one::<PathBuf>("input") else {
                unreachable!("input is required")
            };
            print!("{}", cpr_cli::show(input)?);
        }
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}
