use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio::net::TcpListener;

use tw_skin_gateway::server::{router, AppState};
use tw_skin_gateway::GatewayConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Teeworlds skin render gateway")]
struct Args {
    /// Address to serve `GET /render-skin` on
    #[arg(long, env = "TW_LISTEN", default_value = "0.0.0.0:3000")]
    listen: SocketAddr,
    /// Rendering engine endpoint; without it the local preview renderer is used
    #[arg(long, env = "TW_ENGINE_URL")]
    engine_url: Option<String>,
    /// Timeout for one engine call in milliseconds
    #[arg(long, env = "TW_ENGINE_TIMEOUT_MS", default_value_t = 30000)]
    timeout_ms: u64,
    /// Edge length of preview images when a request has no size
    #[arg(long, env = "TW_PREVIEW_SIZE", default_value_t = 128)]
    preview_size: u32,
    /// Runtime worker threads (defaults to the number of CPUs)
    #[arg(long, env = "TW_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let workers = args.worker_threads.unwrap_or_else(num_cpus::get).max(1);
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(serve(args))
}

async fn serve(args: Args) -> Result<()> {
    let config = GatewayConfig {
        engine_url: args.engine_url,
        timeout_ms: args.timeout_ms,
        preview_size: args.preview_size,
        ..Default::default()
    };

    let gateway = tw_skin_gateway::new_gateway(&config).context("failed to create render gateway")?;
    info!("using {} render backend", gateway.name());
    if let Some(url) = &config.engine_url {
        info!("engine endpoint: {}", url);
    }

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::from(gateway)))
        .await
        .context("HTTP server failed")?;

    Ok(())
}
