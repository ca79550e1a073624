use crate::utils::parser::parse_pseudo_assignment;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Christian Vorwerk",
    version,
    about = "qboxio - convert and inspect Qbox input files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Configuration file in TOML format (pseudopotential table and overrides)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a summary of a structure file (Qbox input or JSON document).
    Inspect(InspectArgs),
    /// Convert between Qbox input files and JSON structure documents.
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Structure file to summarize. Files ending in `.json` are read as JSON.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input structure file. The format follows the extension (`.json` or Qbox).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output structure file. The format follows the extension (`.json` or Qbox).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Pseudopotential table in TOML format, overriding the config file.
    #[arg(long, value_name = "PATH")]
    pub pseudo_table: Option<PathBuf>,

    /// Assign a pseudopotential file to a species. Can be used multiple times.
    /// Example: --pseudo Si=Si_VBC_LDA-1.0.xml
    #[arg(long = "pseudo", value_name = "SPECIES=FILE", value_parser = parse_pseudo_assignment)]
    pub pseudos: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn convert_collects_repeated_pseudos() {
        let cli = Cli::try_parse_from([
            "qboxio", "-vv", "convert", "-i", "in.i", "-o", "out.json", "--pseudo",
            "Si=Si.xml", "--pseudo", "O2-=O.xml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(
            args.pseudos,
            vec![
                ("Si".to_string(), "Si.xml".to_string()),
                ("O2-".to_string(), "O.xml".to_string())
            ]
        );
    }

    #[test]
    fn malformed_pseudo_is_rejected() {
        let result = Cli::try_parse_from([
            "qboxio", "convert", "-i", "in.i", "-o", "out.i", "--pseudo", "Si",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["qboxio", "-q", "-v", "inspect", "in.i"]).is_err());
    }

    #[test]
    fn global_config_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["qboxio", "inspect", "in.i", "--config", "q.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("q.toml")));
    }
}
