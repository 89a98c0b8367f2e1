//! Shared MySQL container for the integration tests.

use larder_config::DatabaseConfig;
use larder_repository::{create_pool, DatabasePool};
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mysql::Mysql;

const STARTUP_ATTEMPTS: u32 = 30;

/// A throwaway MySQL server with `user_table` migrated in.
pub struct TestDatabase {
    _container: ContainerAsync<Mysql>,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    pub async fn new() -> Self {
        // The module image allows an empty root password and creates `test`.
        let container = Mysql::default()
            .start()
            .await
            .expect("Failed to start MySQL container");
        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get MySQL port");

        let config = DatabaseConfig {
            url: format!("mysql://root@127.0.0.1:{port}/test"),
            max_connections: 5,
            connect_timeout_secs: 2,
            run_migrations: true,
            ..DatabaseConfig::default()
        };

        Self {
            _container: container,
            pool: wait_for_pool(&config).await,
        }
    }

    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }
}

/// The server accepts connections a few seconds after the container starts.
async fn wait_for_pool(config: &DatabaseConfig) -> Arc<DatabasePool> {
    let mut last_error = None;
    for _ in 0..STARTUP_ATTEMPTS {
        match create_pool(config).await {
            Ok(pool) => return pool,
            Err(e) => last_error = Some(e),
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    panic!("MySQL never became ready: {last_error:?}");
}
