//! Recipe Translator server entry point

use std::process::ExitCode;

use actix_web::{App, HttpServer, middleware, web};
use recipe_translator_web::config::Config;
use recipe_translator_web::{build_state, handlers, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 日志可能尚未初始化
            eprintln!("recipe-translator: {e:#}");
            tracing::error!("Fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _log_guard = logging::init(&config.log)?;

    tracing::info!("Starting Recipe Translator {}", env!("CARGO_PKG_VERSION"));

    let state = build_state(&config).await?;
    if config.provider.verify_on_startup {
        state.verify_provider().await;
    }
    let state = web::Data::new(state);

    let workers = config.server.workers();
    let addr = (config.server.host.clone(), config.server.port);
    tracing::info!("Listening on http://{}:{} ({workers} workers)", addr.0, addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .workers(workers)
    .bind(addr)?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
