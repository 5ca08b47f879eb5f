use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are generated from SeaORM entities using the SQLite backend and created in the
/// order they were added, so tables with foreign keys must come after the tables they
/// reference.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_vote_tables()
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds every table the proposal and vote lifecycle touches.
    ///
    /// Adds, in dependency order:
    /// - Proposal
    /// - OngoingVote
    /// - ConcludedVote
    pub fn with_vote_tables(self) -> Self {
        self.with_table(Proposal)
            .with_table(OngoingVote)
            .with_table(ConcludedVote)
    }

    /// Adds the contributor registry and its mention audit table.
    pub fn with_contributor_tables(self) -> Self {
        self.with_table(Contributor).with_table(Mention)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
