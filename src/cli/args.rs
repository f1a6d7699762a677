use clap::Parser;
use std::path::PathBuf;

/// Usage line printed on argument misuse. Argument-count errors exit with
/// code 1, matching the documented CLI contract rather than clap's default.
pub const USAGE: &str = "Usage: resumex <input_txt_file> <output_json_file>";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Plain-text resume to parse
    pub input: Option<PathBuf>,

    /// Destination file for the extracted JSON
    pub output: Option<PathBuf>,

    /// Model identifier sent to the completion endpoint
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override the inference endpoint base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[arg(long)]
    pub debug: bool,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub generate_config: bool,
}

/// Non-positional settings carried into the parse command.
#[derive(Debug, Clone)]
pub struct ParseArgs {
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub verbosity: u8,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub generate_config: bool,
}

impl From<&Args> for ParseArgs {
    fn from(args: &Args) -> Self {
        ParseArgs {
            model: args.model.clone(),
            api_base_url: args.api_base_url.clone(),
            verbosity: args.verbosity,
            debug: args.debug,
            config: args.config.clone(),
            generate_config: args.generate_config,
        }
    }
}

/// Both positionals, or None when the invocation is incomplete.
pub fn io_paths(args: &Args) -> Option<(PathBuf, PathBuf)> {
    match (&args.input, &args.output) {
        (Some(input), Some(output)) => Some((input.clone(), output.clone())),
        _ => None,
    }
}
