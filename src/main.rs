use crate::catalog::{CatalogSource, HttpCatalog, StaticCatalog};
use crate::config::Config;
use crate::db::{init_db, Database, DbCatalog};
use crate::responses::error_response;
use crate::router::{handle, App};
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod catalog;
mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let catalog: Box<dyn CatalogSource + Send + Sync> =
        match (&config.catalog_url, &config.catalog_file) {
            (Some(url), _) => match HttpCatalog::new(url.as_str()) {
                Ok(http) => {
                    info!(url = %url, "listings served from remote catalog");
                    Box::new(http)
                }
                Err(e) => {
                    error!("{e}");
                    std::process::exit(1);
                }
            },
            (None, Some(path)) => match StaticCatalog::from_file(path) {
                Ok(fixed) => {
                    info!(path = %path, "listings served from catalog file");
                    Box::new(fixed)
                }
                Err(e) => {
                    error!("{e}");
                    std::process::exit(1);
                }
            },
            (None, None) => Box::new(DbCatalog::new(db.clone())),
        };

    let app = App { db, catalog };

    info!(addr = %config.addr, workers = config.max_workers, "starting server");
    let server = Server::bind(&config.addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down");
}
