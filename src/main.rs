use clap::Parser;

use movie_shelf::config::Config;

mod logging;

#[tokio::main]
async fn main() {
    logging::setup_logging();

    if let Err(e) = movie_shelf::run(Config::parse()).await {
        log::error!("movie-shelf stopped: {}", e);
        std::process::exit(1);
    }
}
