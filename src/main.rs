mod cli;
mod commands;
mod config;
mod output;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use config::Config;
use slack_attachments::codec::DecodeOptions;
use slack_attachments::error::Result;

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");

        if verbose {
            for cause in causes(&e) {
                eprintln!("Caused by: {cause}");
            }
        }

        std::process::exit(1);
    }
}

/// Messages of the error's source chain, skipping any cause whose text the
/// message above it already includes.
fn causes(error: &dyn Error) -> Vec<String> {
    let mut shown = error.to_string();
    let mut causes = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !shown.contains(&message) {
            causes.push(message.clone());
        }
        shown = message;
        source = cause.source();
    }
    causes
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "slack_attachments=debug,slack_attach=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Commands that don't require config
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "slack-attach", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        ref command => {
            let config = Config::load()?;

            output::set_format(cli.output_format(config.format));
            output::set_quiet(cli.quiet);

            let options = DecodeOptions {
                strict: config.strict(cli.strict),
            };
            tracing::debug!(strict = options.strict, "loaded configuration");

            match command {
                Commands::Roundtrip(args) => {
                    commands::roundtrip::run(args, options)?;
                }
                Commands::Fmt(args) => {
                    commands::fmt::run(args, options, config.pretty)?;
                }
                Commands::Inspect { file } => {
                    commands::inspect::run(file, options)?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slack_attachments::error::AttachmentError;
    use std::path::PathBuf;

    #[test]
    fn test_causes_skip_messages_already_shown() {
        let parse = slack_attachments::decode(b"{").unwrap_err();
        assert!(parse.source().is_some());
        assert!(causes(&parse).is_empty());

        let read = AttachmentError::FileRead {
            path: PathBuf::from("missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(causes(&read).is_empty());
    }

    #[test]
    fn test_causes_keep_new_information() {
        #[derive(Debug)]
        struct Outer(io::Error);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("could not load payload")
            }
        }
        impl Error for Outer {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let error = Outer(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        assert_eq!(causes(&error), vec!["access denied".to_string()]);
    }
}
