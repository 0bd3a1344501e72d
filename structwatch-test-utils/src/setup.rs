//! Shared test environment: a mockito ESI server plus an in-memory
//! sqlite database with the schema created from the entity definitions.
//!
//! The main crate's `AppState` is constructed by the test itself from the
//! fields here, which keeps this crate free of a circular dependency.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

pub struct TestSetup {
    pub server: ServerGuard,
    pub db: DatabaseConnection,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup {
            server,
            db,
            mocks: Vec::new(),
        })
    }

    /// Base URL of the mock ESI server.
    pub fn esi_url(&self) -> String {
        self.server.url()
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Create a setup with every table the sync pipeline touches.
#[macro_export]
macro_rules! test_setup_with_all_tables {
    () => {{
        $crate::test_setup_with_tables!(
            entity::prelude::Owner,
            entity::prelude::OwnerCharacter,
            entity::prelude::Structure,
            entity::prelude::StructureService,
            entity::prelude::OwnerAsset,
            entity::prelude::Notification,
            entity::prelude::NotificationDelivery,
            entity::prelude::Webhook,
            entity::prelude::OwnerWebhook,
            entity::prelude::StructureWebhook,
            entity::prelude::FuelAlertConfig,
            entity::prelude::FuelAlert,
            entity::prelude::JumpFuelAlertConfig,
            entity::prelude::JumpFuelAlert,
        )
    }};
}
