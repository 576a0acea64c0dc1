use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use rossevita_local::{JsonFileStorage, JsonRepository, UploadCache};
use rossevita_server::routes::InnerAppState;
use rossevita_service::{AttachmentConfig, AttachmentService};
use rossevita_store::StoreConfig;

#[derive(Parser)]
#[command(name = "rossevita-server")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "ROSSEVITA_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "ROSSEVITA_PORT", default_value_t = 3860)]
    port: u16,

    /// Data directory (sqlite db, local objects, device-local state)
    #[arg(long, env = "ROSSEVITA_DATA_DIR")]
    data_dir: Option<String>,

    /// Storage bucket name for uploads
    #[arg(long, env = "ROSSEVITA_BUCKET", default_value = "uploads")]
    bucket: String,

    /// Base URL for derived public object URLs. Defaults to this server's
    /// own /files mount so the local backend stays reachable.
    #[arg(long, env = "ROSSEVITA_PUBLIC_BASE_URL")]
    public_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .map(std::path::PathBuf::from)
        .unwrap_or_else(rossevita_db::default_data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let addr = SocketAddr::new(cli.bind.parse()?, cli.port);
    let public_base_url = cli
        .public_base_url
        .unwrap_or_else(|| format!("http://{addr}/files"));

    let db = rossevita_db::Db::open(&data_dir.join("rossevita.db"))?;

    let mut store_config = StoreConfig::from_env();
    store_config.local_data_dir = Some(data_dir.join("objects").to_string_lossy().to_string());
    if store_config.is_s3() {
        tracing::info!(bucket = %cli.bucket, "object store: s3");
    } else {
        tracing::info!(dir = %data_dir.display(), "object store: local filesystem");
    }
    let store = rossevita_store::create_store(&store_config)
        .map_err(|e| anyhow::anyhow!("object store: {e}"))?;

    let local = Arc::new(JsonFileStorage::new(data_dir.join("local")));
    let cache = UploadCache::new(local.clone());

    let attachments = AttachmentService::new(
        db,
        store,
        cache,
        AttachmentConfig::new(cli.bucket, public_base_url),
    );

    let state = Arc::new(InnerAppState {
        attachments,
        employees: JsonRepository::new(local.clone(), "employees"),
        suppliers: JsonRepository::new(local.clone(), "suppliers"),
        supplies: JsonRepository::new(local.clone(), "supplies"),
        events: JsonRepository::new(local.clone(), "events"),
        event_types: JsonRepository::new(local.clone(), "event_types"),
        venue_tasks: JsonRepository::new(local, "tasks"),
    });

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");

    rossevita_server::serve(listener, state).await
}
