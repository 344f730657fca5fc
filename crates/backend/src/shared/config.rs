use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Переменная окружения с явным путем к config.toml
pub const CONFIG_ENV: &str = "LOGSCOPE_CONFIG";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Максимальный размер тела запроса, ограничивает загрузку файлов.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 64 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "target/logs".to_string(),
        }
    }
}

/// Откуда была загружена конфигурация
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Embedded => write!(f, "embedded default"),
        }
    }
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/logs.db"

[server]
host = "0.0.0.0"
port = 5000
max_upload_bytes = 67108864

[logging]
dir = "target/logs"
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Загрузить конфигурацию
///
/// Порядок поиска:
/// 1. Путь из `LOGSCOPE_CONFIG`
/// 2. config.toml рядом с исполняемым файлом
/// 3. Встроенная конфигурация по умолчанию
///
/// Вызывается до инициализации tracing, поэтому источник возвращается вызывающему для логирования.
pub fn load_config() -> anyhow::Result<(Config, ConfigOrigin)> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        return Ok((parse_config(&contents)?, ConfigOrigin::File(path)));
    }

    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");
        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            return Ok((parse_config(&contents)?, ConfigOrigin::File(config_path)));
        }
    }

    Ok((parse_config(DEFAULT_CONFIG)?, ConfigOrigin::Embedded))
}

/// Получить путь из конфигурации.
/// Относительные пути считаются от директории исполняемого файла.
pub fn resolve_path(configured: &str) -> PathBuf {
    resolve_against(configured, exe_dir().as_deref())
}

fn resolve_against(configured: &str, base: Option<&Path>) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match base {
        Some(dir) => dir.join(path),
        None => PathBuf::from(configured),
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/logs.db");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_upload_bytes, 64 * 1024 * 1024);
        assert_eq!(config.logging.dir, "target/logs");
    }

    #[test]
    fn test_workspace_config_loads() {
        let config = parse_config(include_str!("../../../../config.toml")).unwrap();
        assert_eq!(config.database.path, "db/logs.db");
        assert_eq!(config.logging.dir, "logs");
    }

    #[test]
    fn test_optional_sections_default() {
        let config = parse_config("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.dir, "target/logs");
    }

    #[test]
    fn test_partial_server_section() {
        let config = parse_config("[database]\npath = \"a.db\"\n[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_missing_database_section_fails() {
        assert!(parse_config("[server]\nport = 1\n").is_err());
    }

    #[test]
    fn test_resolve_against() {
        let base = Path::new("/opt/logscope");
        assert_eq!(
            resolve_against("db/logs.db", Some(base)),
            PathBuf::from("/opt/logscope/db/logs.db")
        );
        assert_eq!(
            resolve_against("/var/lib/logs.db", Some(base)),
            PathBuf::from("/var/lib/logs.db")
        );
        assert_eq!(resolve_against("logs.db", None), PathBuf::from("logs.db"));
    }
}
