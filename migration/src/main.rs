use crate::{
    domain::migration::Migration,
    infrastructure::{persistence::PersistenceAdapter, settings::Settings},
};
use inkpost_common::database;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod domain;
pub mod infrastructure;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    tracing::info!("configuration loaded");

    let database = database::connect(&settings.database).await?;
    let persistence = PersistenceAdapter::new(database);

    // create the blog schema if it is not there yet
    let migration = Migration::new(persistence);
    let applied = migration.migrate().await?;
    tracing::info!(applied, "migration finished");

    Ok(())
}
