use std::time::Duration;

use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::APP_CONFIG;

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connects on first use and hands out the process-wide pooled connection.
pub async fn get_database_connection() -> &'static DatabaseConnection {
    if DATABASE_CONNECTION.get().is_none() {
        let mut options = ConnectOptions::new(APP_CONFIG.database_url.clone());
        options
            .max_connections(10)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let connection = Database::connect(options)
            .await
            .expect("Failed to connect to database");

        let _ = DATABASE_CONNECTION.set(connection);
    }

    DATABASE_CONNECTION
        .get()
        .expect("DATABASE_CONNECTION not set")
}
