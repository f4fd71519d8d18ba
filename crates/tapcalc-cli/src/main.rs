//! tapcalc: keypad calculator for the terminal

use std::io::{self, Read};
use std::process::ExitCode;

use clap::Parser;
use tapcalc_cli::{
    evaluate, render_json, render_keys, render_text, terminal, Cli, CliConfig, CliResult,
    Commands, EvalArgs, Verbosity,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = CliConfig::from_cli(&cli)?;
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Run => terminal::run(config.engine),
        Commands::Eval(args) => run_eval(&config, &args),
        Commands::Keys => {
            print!("{}", render_keys());
            Ok(())
        }
        Commands::Config => {
            print!("{}", serde_yaml_ng::to_string(&config.engine)?);
            Ok(())
        }
    }
}

/// Explicit `-v`/`-q` flags win over `RUST_LOG`; logs go to stderr
fn init_tracing(cli: &Cli) {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let filter = if cli.quiet || cli.verbose > 0 {
        EnvFilter::new(verbosity.filter_directive())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_eval(config: &CliConfig, args: &EvalArgs) -> CliResult<()> {
    let script = if args.script == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.script.clone()
    };

    let report = evaluate(&config.engine, &script, args.steps)?;
    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}
