use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared handler state. The connection pool is opened in `main` and
/// closed there on shutdown; handlers only borrow it.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}
