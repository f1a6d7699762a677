use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::args::{Args, ParseArgs, USAGE, io_paths};
use crate::cli::commands::run_parse_command;
use crate::config::{ResumexConfig, resolve_token};

pub struct RootCommand;

impl RootCommand {
    pub async fn execute() -> Result<()> {
        let args = match Args::try_parse() {
            Ok(args) => args,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(_) => {
                println!("{USAGE}");
                std::process::exit(1);
            }
        };

        let parse_args = ParseArgs::from(&args);

        if parse_args.generate_config {
            println!("{}", ResumexConfig::generate_default_config());
            return Ok(());
        }

        let Some((input, output)) = io_paths(&args) else {
            println!("{USAGE}");
            std::process::exit(1);
        };

        // The credential is resolved before any file or network traffic; a
        // missing token propagates out of main instead of through the ❌
        // handler below.
        let token = resolve_token()?;

        if let Err(e) = run_parse_command(&parse_args, &input, &output, token).await {
            println!("❌ Parsing failed: {e:#}");
            std::process::exit(1);
        }

        Ok(())
    }
}
