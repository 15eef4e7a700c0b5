//! gridplan entry point: CLI wiring and batch execution.

use std::path::{Path, PathBuf};
use std::process;

use gridplan::config::RunConfig;
use gridplan::io::export::{SummaryRow, export_csv, summary_rows};
use gridplan::runner::run_instance_file;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    instances: Vec<String>,
    seed_override: Option<u64>,
    summary_out: Option<String>,
}

fn print_help() {
    eprintln!("gridplan — batch household power allocation");
    eprintln!();
    eprintln!("Usage: gridplan [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>       Load batch run config from TOML file");
    eprintln!("  --instance <path>     Run a single instance file (repeatable)");
    eprintln!("  --seed <u64>          Override random seed");
    eprintln!("  --summary-out <path>  Export consumption summary to CSV");
    eprintln!("  --help                Show this help message");
    eprintln!();
    eprintln!("Each instance <path> produces an assignment file <path>.out.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        instances: Vec::new(),
        seed_override: None,
        summary_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--instance" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --instance requires a path argument");
                    process::exit(1);
                }
                cli.instances.push(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--summary-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --summary-out requires a path argument");
                    process::exit(1);
                }
                cli.summary_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.config_path.is_some() && !cli.instances.is_empty() {
        eprintln!("error: --config and --instance are mutually exclusive");
        process::exit(1);
    }

    cli
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    // Build run config: --config takes priority, otherwise from --instance args
    let mut config = if let Some(ref path) = cli.config_path {
        match RunConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        RunConfig {
            instances: cli.instances.iter().map(PathBuf::from).collect(),
            ..RunConfig::default()
        }
    };

    // Apply overrides
    if let Some(seed) = cli.seed_override {
        config.seed = seed;
    }
    if let Some(ref path) = cli.summary_out {
        config.summary_csv = Some(PathBuf::from(path));
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        print_help();
        process::exit(1);
    }

    // Run the batch; a failed instance is reported and skipped
    let mut failed = 0_usize;
    let mut all_rows: Vec<SummaryRow> = Vec::new();
    for path in &config.instances {
        match run_instance_file(path, config.seed) {
            Ok(result) => {
                println!("{}", result.billing);
                if config.summary_csv.is_some() {
                    let label = path.display().to_string();
                    all_rows.extend(summary_rows(&label, &result.households));
                }
            }
            Err(e) => {
                eprintln!("error: {}: {e}", path.display());
                failed += 1;
            }
        }
    }

    if let Some(ref path) = config.summary_csv {
        if let Err(e) = export_csv(&all_rows, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Summary written to {}", path.display());
    }

    if failed > 0 {
        eprintln!("{failed} instance(s) failed");
        process::exit(1);
    }
}
