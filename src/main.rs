use std::path::Path;
use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;
mod store;

use crate::config::AppState;
use handler::{RouteTable, StaticAssets};
use server::signal::SignalHandler;
use store::CountryStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Load everything the handlers need before accepting traffic; a bad
    // dataset or route table aborts startup here.
    let countries = store::load_from(Path::new(&cfg.resources.dataset))?;
    logger::log_dataset_loaded(countries.len(), &cfg.resources.dataset);

    let assets = StaticAssets::load(&cfg.resources.assets_dir);
    let routes = RouteTable::builtin()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, countries, assets, routes))
}

async fn async_main(
    cfg: config::Config,
    countries: Vec<store::Country>,
    assets: StaticAssets,
    routes: RouteTable,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::bind(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(
        cfg,
        CountryStore::new(countries),
        assets,
        routes,
    ));

    let signals = Arc::new(SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signals));

    server::run(listener, state, signals).await
}
