use std::collections::HashSet;

use crate::domain::{
    persistence::Persistence,
    required_tables,
    tables::Table,
};

#[derive(Clone)]
pub struct Migration<P: Persistence> {
    persistence: P,
}

pub trait MigrationStep {
    fn ctx(&self) -> &'static str;
    fn ddls(self) -> Vec<String>;
}

pub struct CreateTableStep {
    ddls: Vec<String>,
}

impl CreateTableStep {
    fn new(database_schema: &str, table: &Table) -> Self {
        Self {
            ddls: table.create_ddls(database_schema),
        }
    }
}

impl MigrationStep for CreateTableStep {
    fn ctx(&self) -> &'static str {
        "CREATE TABLE"
    }

    fn ddls(self) -> Vec<String> {
        self.ddls
    }
}

impl<P: Persistence> Migration<P> {
    pub fn new(persistence: P) -> Self {
        Self { persistence }
    }

    /// Creates every missing table. Returns the number of steps applied;
    /// zero when the schema is already in place.
    pub async fn migrate(&self) -> Result<usize, anyhow::Error> {
        let existing = self.persistence.load().await?;
        let steps = migration_steps(self.persistence.database_schema(), &existing);
        let count = steps.len();

        if count == 0 {
            tracing::info!("schema is up to date");
            return Ok(0);
        }

        self.persistence.apply_migration_steps(steps).await?;
        Ok(count)
    }
}

pub fn migration_steps(database_schema: &str, existing: &HashSet<String>) -> Vec<CreateTableStep> {
    required_tables()
        .iter()
        .filter(|table| !existing.contains(table.name))
        .map(|table| CreateTableStep::new(database_schema, table))
        .collect()
}
