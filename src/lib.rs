use std::io;

pub mod clients;
use clients::OmdbClient;

pub mod config;
use config::Config;

pub mod error;
pub mod extractors;
pub mod model;

pub mod persisters;
use persisters::open_storage;

pub mod report;

pub mod service;
use service::MovieService;

pub mod shell;
use shell::MovieApp;

pub use error::{MovieError, Result};

pub async fn run(config: Config) -> Result<()> {
    let format = config.storage_format();
    log::info!(
        "Using {:?} collection at {}",
        format,
        config.file.display()
    );

    let service = MovieService::new(open_storage(&config.file, format));
    let stdin = io::stdin();
    let mut app = MovieApp::new(service, stdin.lock(), io::stdout())
        .with_report_dir(&config.report_dir);

    match &config.omdb_api_key {
        Some(api_key) => {
            app = app.with_lookup(Box::new(OmdbClient::new(api_key.as_str(), config.omdb_url.as_str())?));
        }
        None => log::info!("No OMDb API key configured, movies are added manually"),
    }

    app.run().await
}
