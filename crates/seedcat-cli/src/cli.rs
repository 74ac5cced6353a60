//! Argument parsing and command dispatch for the `seedcat` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use seedcat_corpus::SelectionRange;
use seedcat_prov::DEFAULT_DOT_PROGRAM;
use seedcat_store::DEFAULT_GCS_ENDPOINT;
use seedcat_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};

use crate::client::{CliError, CliResult, StoreSettings};
use crate::commands::fetch::{handle_prov, handle_translations};
use crate::commands::graph::handle_graph;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CORPUS_SIZE: usize = 6193;
pub(crate) const DEFAULT_RANGE: [u64; 2] = [1, 6193];

/// Parses CLI arguments, installs logging, and executes the requested command.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
        build_sha: build_sha(),
    };
    if let Err(err) = init_logging(&logging) {
        let err = CliError::failure(err);
        eprintln!("error: {}", err.display_message());
        return err.exit_code();
    }

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let settings = StoreSettings {
        endpoint: cli.gcs_endpoint,
        token: cli.gcs_token,
        timeout_secs: cli.timeout,
    };

    match cli.command {
        Command::Prov(args) => handle_prov(&settings, args).await,
        Command::Translations(args) => handle_translations(&settings, args).await,
        Command::Graph(args) => handle_graph(&cli.dot, args).await,
    }
}

#[derive(Parser)]
#[command(
    name = "seedcat",
    about = "Download seed-corpus annotations and render their provenance"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "SEEDCAT_GCS_ENDPOINT",
        default_value = DEFAULT_GCS_ENDPOINT
    )]
    pub(crate) gcs_endpoint: String,
    #[arg(long, global = true, env = "SEEDCAT_GCS_TOKEN", hide_env_values = true)]
    pub(crate) gcs_token: Option<String>,
    #[arg(
        long,
        global = true,
        env = "SEEDCAT_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "SEEDCAT_GRAPHVIZ_DOT",
        default_value = DEFAULT_DOT_PROGRAM
    )]
    pub(crate) dot: PathBuf,
    #[arg(long, global = true, env = "SEEDCAT_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "SEEDCAT_LOG_FORMAT",
        value_parser = parse_log_format,
        default_value = "pretty"
    )]
    pub(crate) log_format: LogFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Download every `prov.json` under a prefix into per-index files.
    Prov(ProvArgs),
    /// Download every `translation.txt` under a prefix into one ordered corpus file.
    Translations(TranslationArgs),
    /// Render a PROV-JSON document as an image.
    Graph(GraphArgs),
}

/// Listing location shared by the download commands.
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    #[arg(long, help = "Bucket holding the annotation objects")]
    pub(crate) bucket: String,
    #[arg(long, help = "Key prefix, usually the target language code")]
    pub(crate) prefix: String,
    #[arg(
        long,
        num_args = 2,
        value_names = ["LOW", "HIGH"],
        default_values_t = DEFAULT_RANGE,
        help = "Inclusive index range to download"
    )]
    pub(crate) range: Vec<u64>,
}

impl SourceArgs {
    /// Listing prefix with a trailing delimiter so `en` never matches `eng/...`.
    pub(crate) fn listing_prefix(&self) -> String {
        let prefix = self.prefix.trim();
        if prefix.is_empty() || prefix.ends_with('/') {
            prefix.to_string()
        } else {
            format!("{prefix}/")
        }
    }

    pub(crate) fn selection_range(&self) -> CliResult<SelectionRange> {
        match self.range.as_slice() {
            [low, high] => Ok(SelectionRange::new(*low, *high)),
            other => Err(CliError::validation(format!(
                "--range expects two bounds, got {}",
                other.len()
            ))),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ProvArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    #[arg(
        long,
        default_value = "prov-json",
        help = "Directory receiving <index>.json files"
    )]
    pub(crate) directory: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct TranslationArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    #[arg(
        long,
        default_value_t = DEFAULT_CORPUS_SIZE,
        help = "Number of lines in the assembled corpus"
    )]
    pub(crate) size: usize,
    #[arg(long, default_value = "corpus.txt", help = "Corpus file to write")]
    pub(crate) output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GraphArgs {
    #[arg(help = "PROV-JSON document to render")]
    pub(crate) document: PathBuf,
    #[arg(long, default_value = "png", help = "Image format: png, pdf or svg")]
    pub(crate) format: String,
    #[arg(long, default_value = ".", help = "Directory receiving prov.<format>")]
    pub(crate) output_dir: PathBuf,
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input
        .parse::<LogFormat>()
        .map_err(|_| format!("unknown log format '{input}' (expected json or pretty)"))
}
