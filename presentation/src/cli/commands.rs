//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for a deliberation printed by `ask`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every branch outcome, every synthesis attempt, then the answer
    Full,
    /// Only the council's answer
    Synthesis,
    /// JSON output
    Json,
}

impl From<astris_domain::OutputFormat> for OutputFormat {
    fn from(format: astris_domain::OutputFormat) -> Self {
        match format {
            astris_domain::OutputFormat::Full => OutputFormat::Full,
            astris_domain::OutputFormat::Synthesis => OutputFormat::Synthesis,
            astris_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for astris
#[derive(Parser, Debug)]
#[command(name = "astris")]
#[command(author, version, about = "Deliberation council - four specialists and a lead councillor")]
#[command(long_about = r#"
Astris answers a question by convening a council.

The process has two phases:
1. Council: four specialists and a web search run in parallel
2. Synthesis: a lead councillor merges their input into one answer,
   falling back through the configured synthesis chain

Configuration files are loaded from (in priority order):
1. ASTRIS_* environment variables
2. --config <path>     Explicit config file
3. ./astris.toml       Project-level config
4. ~/.config/astris/config.toml   Global config

Example:
  astris serve --port 8000
  astris ask "Should I move from backend development into UI/UX design?"
  astris ask -o full "How do I prepare for a product management interview?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the council over HTTP
    Serve {
        /// Address to bind (overrides [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides [server].port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the council a single question and print the answer
    Ask {
        /// The question to put to the council
        question: String,

        /// Output format (overrides [output].format)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_with_output() {
        let cli = Cli::parse_from(["astris", "-vv", "ask", "-o", "json", "What next?"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Ask {
                question,
                output,
                quiet,
            }) => {
                assert_eq!(question, "What next?");
                assert_eq!(output, Some(OutputFormat::Json));
                assert!(!quiet);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_with_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["astris", "serve", "--port", "9000", "--config", "c.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(
            cli.command,
            Some(Command::Serve {
                host: None,
                port: Some(9000)
            })
        ));
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::parse_from(["astris", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
