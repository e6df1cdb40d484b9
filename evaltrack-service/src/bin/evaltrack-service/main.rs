mod cli;

use crate::cli::Cli;
use evaltrack_core::infrastructure::blobs::FsBlobStore;
use evaltrack_core::infrastructure::config::{load_config, load_config_from_file};
use evaltrack_core::infrastructure::logging::init_logger;
use evaltrack_core::infrastructure::storage::JsonFileStorage;
use evaltrack_service::api::{run_http_server, AppState};
use log::info;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DB_FILE_NAME: &str = "evaltrack-db.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse_args();
    args.apply_to_env();

    let app_config = match &args.config {
        Some(path) => load_config_from_file(path)?,
        None => {
            let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("./data"));
            load_config(&data_dir)?
        }
    };
    let service = &app_config.service;

    let filters = if args.log_filters == "info" && service.log_filters != "info" {
        service.log_filters.clone()
    } else {
        args.log_filters.clone()
    };
    init_logger(service.log_dir.as_deref(), &filters);
    info!("evaltrack-service starting log_filters={}", filters);
    info!(
        "config loaded listen_addr={} data_dir={} upload_dir={}",
        service.listen_addr, service.data_dir, service.upload_dir
    );

    std::fs::create_dir_all(&service.data_dir)?;
    let storage = Arc::new(JsonFileStorage::open(Path::new(&service.data_dir).join(DB_FILE_NAME))?);
    let blobs = Arc::new(FsBlobStore::open(&service.upload_dir)?);
    info!("storage initialized data_dir={}", service.data_dir);

    let state = AppState::new(storage, blobs);
    let seq = state.allocator.initialize()?;
    info!("reference allocator ready next_seq={}", seq + 1);

    let addr: SocketAddr = service
        .listen_addr
        .parse()
        .map_err(|err| format!("invalid listen_addr {}: {}", service.listen_addr, err))?;

    tokio::select! {
        result = run_http_server(addr, state, service.max_body_bytes) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
