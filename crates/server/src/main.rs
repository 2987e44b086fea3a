use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use convenio::{AssetStore, ConvenioRenderer};
use convenio_server::{router, AppState, ENDPOINT};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the agreement endpoint over HTTP
    Serve(ServeArgs),
    /// Render a request body from a file and write the PDF
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "CONVENIO_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory holding the logo and footer images
    #[arg(long, env = "CONVENIO_ASSETS_DIR", default_value = "./assets")]
    assets_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON request body
    input: PathBuf,

    /// Output PDF (defaults to the suggested file name)
    output: Option<PathBuf>,

    /// Directory holding the logo and footer images
    #[arg(long, env = "CONVENIO_ASSETS_DIR", default_value = "./assets")]
    assets_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Render(args) => render(args),
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", args.host, args.port))?;

    let app = router(AppState::with_assets(AssetStore::new(&args.assets_dir)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        address = %listener.local_addr()?,
        endpoint = ENDPOINT,
        assets_dir = %args.assets_dir.display(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let body = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let request = convenio::parse_request_slice(&body)
        .with_context(|| format!("invalid request in {}", args.input.display()))?;

    let renderer = ConvenioRenderer::new(AssetStore::new(&args.assets_dir));
    let pdf = renderer.render(&request.input)?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(request.file_name()));
    std::fs::write(&output, &pdf)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(output = %output.display(), bytes = pdf.len(), "agreement written");
    Ok(())
}
