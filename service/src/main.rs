use inkpost_common::database;
use inkpost_service::domain::{
    access::AccessGate, repository::PostRepository, service::ContentService,
};
use inkpost_service::infrastructure::AppStateImpl;
use inkpost_service::infrastructure::access::SessionCookieGate;
use inkpost_service::infrastructure::http::{HttpServer, HttpServerConfig};
use inkpost_service::infrastructure::persistence::{
    memory::InMemoryPostRepository, repository::PostgresPostRepository,
};
use inkpost_service::infrastructure::settings::{Settings, StorageKind};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let gate = SessionCookieGate::from(&settings.access);

    match settings.storage.kind {
        StorageKind::Postgres => {
            let database = database::connect(settings.database()?).await?;
            serve(&settings, PostgresPostRepository::new(database), gate).await
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage, posts will not survive a restart");
            serve(&settings, InMemoryPostRepository::default(), gate).await
        }
    }
}

async fn serve<R: PostRepository, G: AccessGate>(
    settings: &Settings,
    repository: R,
    gate: G,
) -> anyhow::Result<()> {
    let state = AppStateImpl::new(ContentService::new(repository, gate));

    let server_config = HttpServerConfig {
        port: &settings.server_port,
    };
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
