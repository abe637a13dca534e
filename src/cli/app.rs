//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::output::{Output, OutputFormat};
use super::{document_cmd, meta_cmd, templates_cmd};
use crate::document::Transcoder;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "adrkit")]
#[command(author, version, about = "Template-driven parser and generator for decision records")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true, env = "ADRKIT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize an adrkit project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Inspect available templates
    #[command(subcommand)]
    Templates(templates_cmd::TemplateCommands),

    /// Parse a document into its sections
    Parse {
        /// Document path (- for stdin)
        file: PathBuf,

        /// Template to parse against (skips detection)
        #[arg(long, short)]
        template: Option<String>,
    },

    /// Detect which template a document follows
    Classify {
        /// Document path (- for stdin)
        file: PathBuf,

        /// Show per-template match scores
        #[arg(long)]
        explain: bool,
    },

    /// Create an empty document from a template
    New {
        /// Document title
        title: String,

        /// Template id (defaults to the project's default_template)
        #[arg(long, short)]
        template: Option<String>,

        /// Initial status (todo, in-progress, done, backlog)
        #[arg(long, short)]
        status: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Write to this path instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Render a document from a JSON request
    Generate {
        /// Template id
        #[arg(long, short)]
        template: String,

        /// JSON request path (- for stdin)
        #[arg(long, short, default_value = "-")]
        input: PathBuf,

        /// Write to this path instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Read or update document metadata
    #[command(subcommand)]
    Meta(meta_cmd::MetaCommands),
}

/// Installs the tracing subscriber. `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "adrkit=debug" } else { "adrkit=warn" };

    // A second init (e.g. from tests) is harmless; keep the first subscriber
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("adrkit starting");
    if let Some(root) = &config.project_root {
        output.verbose_ctx("config", &format!("Project root: {}", root.display()));
    }

    let transcoder = Transcoder::builtin()?;
    config.validate(transcoder.registry())?;

    match cli.command {
        Commands::Init { path } => init(&output, &path)?,

        Commands::Templates(cmd) => templates_cmd::run(cmd, &transcoder, &output)?,

        Commands::Parse { file, template } => {
            document_cmd::parse(&transcoder, &config, &output, &file, template.as_deref())?
        }

        Commands::Classify { file, explain } => {
            document_cmd::classify(&transcoder, &output, &file, explain)?
        }

        Commands::New {
            title,
            template,
            status,
            tags,
            output: path,
            force,
        } => document_cmd::new_document(
            &transcoder,
            &config,
            &output,
            document_cmd::NewOptions {
                title: &title,
                template: template.as_deref(),
                status: status.as_deref(),
                tags: &tags,
                output_path: path.as_deref(),
                force,
            },
        )?,

        Commands::Generate {
            template,
            input,
            output: path,
            force,
        } => document_cmd::generate(
            &transcoder,
            &output,
            &template,
            &input,
            path.as_deref(),
            force,
        )?,

        Commands::Meta(cmd) => meta_cmd::run(cmd, &config, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn init(output: &Output, path: &Path) -> Result<()> {
    output.verbose_ctx("init", &format!("Initializing project at: {}", path.display()));
    let config = Config::init_project(path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "root": path,
            "default_template": config.project.default_template,
        }));
    } else {
        output.success(&format!("Initialized adrkit project at {}", path.display()));
    }
    Ok(())
}
