use sea_orm::DatabaseConnection;

/// Состояние, которое axum передает в каждый обработчик.
///
/// `DatabaseConnection` - это пул соединений, клонировать его дешево.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
