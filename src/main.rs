//! SUNTRAM landing server
//!
//! Serves the landing page and its `/site` JSON summary.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use suntram_landing::{
    config::{DEFAULT_HOST, DEFAULT_PORT, HOST_ENV, PORT_ENV, ROOT_ENV},
    init_tracing, serve, summarize_index, LogFormat, ServerConfig,
};

/// SUNTRAM landing server
#[derive(Parser, Debug)]
#[command(name = "suntram-landing")]
#[command(version)]
#[command(about = "SUNTRAM Digital landing page server with an AI-readable /site summary")]
#[command(long_about = r#"SUNTRAM Digital landing page server

Serves the landing page from a project directory and exposes a JSON summary
of index.html at /site for assistants, crawlers and integrations.

ENDPOINTS:
  GET /site            Site summary (add ?pretty=1 for indented JSON)
  GET /<path>          Static files from the project root

ENVIRONMENT:
  HOST, PORT, SITE_ROOT     Defaults for `serve`
  RUST_LOG                  Log filter (overrides --verbose)
  SUNTRAM_LOG_FORMAT        json | pretty | compact

EXAMPLES:
  # Serve the current directory on 127.0.0.1:4174
  suntram-landing

  # Serve another checkout on all interfaces
  suntram-landing serve --host 0.0.0.0 --port 8080 --root ../landing

  # Write the summary to a file without starting a server
  suntram-landing summary --pretty --output site.json
"#)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site (default)
    Serve(ServeArgs),

    /// Print the /site summary of an index.html and exit
    Summary {
        /// Project root containing index.html
        #[arg(short, long, env = ROOT_ENV, default_value = ".")]
        root: PathBuf,

        /// Indent the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Project root to serve
    #[arg(short, long, env = ROOT_ENV, default_value = ".")]
    root: PathBuf,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig::new(self.root)
            .with_host(self.host)
            .with_port(self.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(LogFormat::from_env(), args.verbose);

    match args.command {
        Some(Command::Serve(serve_args)) => run_server(serve_args.into_config()).await,
        None => run_server(ServerConfig::from_env()).await,
        Some(Command::Summary {
            root,
            pretty,
            output,
        }) => write_summary(root, pretty, output).await,
    }
}

async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let address = config.bind_address();
    serve(config)
        .await
        .with_context(|| format!("server on {address} failed"))
}

async fn write_summary(root: PathBuf, pretty: bool, output: Option<PathBuf>) -> anyhow::Result<()> {
    let index_path = ServerConfig::new(root).index_path();
    let extraction = summarize_index(&index_path)
        .await
        .with_context(|| format!("could not summarize {}", index_path.display()))?;

    if !extraction.missing_anchors.is_empty() {
        tracing::warn!(missing = ?extraction.missing_anchors, "summary has empty fields");
    }

    let mut json = extraction.summary.to_json(pretty)?;
    json.push('\n');

    match output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("could not write {}", path.display()))?;
            tracing::info!(path = %path.display(), "summary written");
        }
        None => print!("{json}"),
    }
    Ok(())
}
