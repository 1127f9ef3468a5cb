// Application state module
// Everything a request handler needs, built once at startup

use super::types::Config;
use crate::handler::{RouteTable, StaticAssets};
use crate::store::CountryStore;

/// Application state shared by all connection tasks
pub struct AppState {
    pub config: Config,
    pub store: CountryStore,
    pub assets: StaticAssets,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(
        config: Config,
        store: CountryStore,
        assets: StaticAssets,
        routes: RouteTable,
    ) -> Self {
        Self {
            config,
            store,
            assets,
            routes,
        }
    }
}
