//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tapcalc: keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "tapcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine configuration file (YAML)
    #[arg(long, global = true, env = "TAPCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive terminal calculator
    Run,

    /// Replay a key script and print the result
    ///
    /// Keys are separated by whitespace or run together: `5+3==` and
    /// `5 + 3 = =` are the same script. Named keys (Enter, Backspace, CE,
    /// AC) must stand alone. Pass `-` to read the script from stdin.
    Eval(EvalArgs),

    /// Show the keyboard map
    Keys,

    /// Show the effective engine configuration
    Config,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Key script, or `-` for stdin
    #[arg(allow_hyphen_values = true)]
    pub script: String,

    /// Print engine snapshots as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the state after every key
    #[arg(long)]
    pub steps: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_eval() {
        let cli = Cli::try_parse_from(["tapcalc", "eval", "5+3=", "--json"]).unwrap();
        match cli.command {
            Commands::Eval(args) => {
                assert_eq!(args.script, "5+3=");
                assert!(args.json);
                assert!(!args.steps);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_eval_hyphen_script() {
        let cli = Cli::try_parse_from(["tapcalc", "eval", "-"]).unwrap();
        assert!(matches!(cli.command, Commands::Eval(ref a) if a.script == "-"));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["tapcalc", "keys", "-vv", "--config", "calc.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("calc.yaml")));
        assert!(matches!(cli.command, Commands::Keys));
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["tapcalc"]).is_err());
    }

    #[test]
    fn test_parse_eval_requires_script() {
        assert!(Cli::try_parse_from(["tapcalc", "eval"]).is_err());
    }
}
