use std::path::Path;

use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

/// Открыть (или создать) файл БД и подготовить схему
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", db_url);

    let conn = Database::connect(&db_url).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// URL `sqlite://` для абсолютного пути, с учетом букв дисков Windows
fn sqlite_url(absolute_path: &Path) -> String {
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Создать таблицу log_entry и индексы, если их еще нет
pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let check_table = r#"
        SELECT name FROM sqlite_master WHERE type='table' AND name='log_entry';
    "#;
    let table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_table.to_string(),
        ))
        .await?;

    if table_exists.is_empty() {
        tracing::info!("Creating log_entry table");
        let create_table_sql = r#"
            CREATE TABLE log_entry (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                timestamp TEXT NOT NULL,
                level TEXT NOT NULL,
                message TEXT NOT NULL,
                source TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_table_sql.to_string(),
        ))
        .await?;
    }

    for sql in [
        "CREATE INDEX IF NOT EXISTS idx_log_entry_timestamp ON log_entry (timestamp);",
        "CREATE INDEX IF NOT EXISTS idx_log_entry_level ON log_entry (level);",
        "CREATE INDEX IF NOT EXISTS idx_log_entry_source ON log_entry (source);",
    ] {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_unix() {
        assert_eq!(
            sqlite_url(Path::new("/var/lib/logscope/logs.db")),
            "sqlite:///var/lib/logscope/logs.db?mode=rwc"
        );
    }

    #[test]
    fn test_sqlite_url_windows_drive() {
        assert_eq!(
            sqlite_url(Path::new(r"C:\data\logs.db")),
            "sqlite:///C:/data/logs.db?mode=rwc"
        );
    }
}
