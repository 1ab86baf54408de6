use std::{process, sync::Arc};

use reelboard::{
    application::{catalog::CatalogSource, error::AppError},
    config::{self, CatalogBackend, Settings},
    infra::{
        catalog::{HttpCatalog, MemoryCatalog},
        error::InfraError,
        http::{self, AdminState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: Settings) -> Result<(), AppError> {
    let catalog = build_catalog(&settings).await?;
    let router = http::build_admin_router(AdminState::new(catalog));

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| InfraError::bind(settings.server.addr, err))?;
    info!(
        target = "reelboard::serve",
        addr = %settings.server.addr,
        "dashboard listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!(target = "reelboard::serve", "dashboard stopped");
    Ok(())
}

async fn build_catalog(settings: &Settings) -> Result<Arc<dyn CatalogSource>, AppError> {
    let catalog: Arc<dyn CatalogSource> = match &settings.catalog.backend {
        CatalogBackend::Http { base_url } => {
            info!(
                target = "reelboard::serve",
                base_url = %base_url,
                "using upstream catalog"
            );
            Arc::new(HttpCatalog::new(base_url.as_str(), settings.catalog.timeout)?)
        }
        CatalogBackend::Fixture { path: Some(path) } => {
            Arc::new(MemoryCatalog::from_path(path).await?)
        }
        CatalogBackend::Fixture { path: None } => {
            info!(target = "reelboard::serve", "using built-in catalog fixture");
            Arc::new(MemoryCatalog::builtin()?)
        }
    };
    Ok(catalog)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(
            target = "reelboard::serve",
            error = %err,
            "failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
    info!(target = "reelboard::serve", "shutdown requested");
}
