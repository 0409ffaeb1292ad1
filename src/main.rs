extern crate diesel;

#[macro_use]
mod wrapper;
pub use wrapper::*;

use dotenv::dotenv;

mod config;
mod domain;
mod infra;
mod initializer;
mod repository;
mod schema;
mod web;

#[cfg(test)]
mod testing;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = config::command().get_matches();
    let cli = config::CliArgs::from_matches(&matches);
    let config = config::load(&cli)?;

    let app = initializer::new(config);

    app.infras
        .ensure_initialized()
        .await
        .map_err(|err| format!("Infra initialization error: {}", err.detail()))?;

    let (addr, server) = web::bind(app, shutdown_signal())?;
    log::info!("listening on http://{}", addr);
    server.await?;

    Ok(())
}
