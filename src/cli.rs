use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "slack-attach")]
#[command(about = "Check, normalise and inspect Slack message attachment JSON", version)]
#[command(after_help = "EXAMPLES:
    slack-attach roundtrip attachment.json     Verify a lossless decode/encode
    slack-attach fmt attachment.json           Print the normalised encoding
    slack-attach inspect attachment.json       Summarise actions or blocks
    cat a.json | slack-attach roundtrip -      Read from stdin")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Reject unrecognized block and element types
    #[arg(long, global = true)]
    pub strict: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format: --json, then --format, then config
    pub fn output_format(&self, configured: Option<OutputFormat>) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.or(configured).unwrap_or_default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode and re-encode documents, reporting any difference
    #[command(
        alias = "rt",
        after_help = "EXAMPLES:
    slack-attach roundtrip a.json b.json
    slack-attach roundtrip --strict a.json
    slack-attach roundtrip a.json --format json"
    )]
    Roundtrip(RoundtripArgs),
    /// Print the normalised encoding of a document
    #[command(after_help = "EXAMPLES:
    slack-attach fmt a.json
    slack-attach fmt a.json --compact")]
    Fmt(FmtArgs),
    /// Summarise an attachment's content
    #[command(
        alias = "i",
        after_help = "EXAMPLES:
    slack-attach inspect a.json
    slack-attach inspect a.json --format json"
    )]
    Inspect {
        /// Attachment JSON file, or - for stdin
        file: PathBuf,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    slack-attach completions bash > ~/.bash_completion.d/slack-attach
    slack-attach completions zsh > ~/.zfunc/_slack-attach
    slack-attach completions fish > ~/.config/fish/completions/slack-attach.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    slack-attach init")]
    Init,
}

#[derive(Args)]
pub struct RoundtripArgs {
    /// Attachment JSON files, or - for stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct FmtArgs {
    /// Attachment JSON file, or - for stdin
    pub file: PathBuf,

    /// Print on one line even if the config asks for pretty output
    #[arg(long, conflicts_with = "pretty")]
    pub compact: bool,

    /// Indent the output
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_json_flag_overrides_format() {
        let cli = Cli::parse_from(["slack-attach", "--json", "inspect", "a.json", "-o", "table"]);
        assert_eq!(cli.output_format(None), OutputFormat::Json);
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let cli = Cli::parse_from(["slack-attach", "fmt", "a.json"]);
        assert_eq!(cli.output_format(Some(OutputFormat::Compact)), OutputFormat::Compact);
        assert_eq!(cli.output_format(None), OutputFormat::Table);
    }

    #[test]
    fn test_roundtrip_takes_many_files() {
        let cli = Cli::parse_from(["slack-attach", "rt", "a.json", "b.json", "--strict"]);
        assert!(cli.strict);
        match cli.command {
            Commands::Roundtrip(args) => assert_eq!(args.files.len(), 2),
            _ => panic!("expected roundtrip"),
        }
    }
}
