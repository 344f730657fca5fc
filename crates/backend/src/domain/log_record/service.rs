use chrono::Utc;
use contracts::domain::log_record::{LogRecordDto, LogStats};
use sea_orm::DatabaseConnection;

use super::filter::{LogFilter, LogQueryParams};
use super::{parser, repository};

/// Итог импорта одного файла
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: u64,
    pub dropped: usize,
    /// Записей в таблице после импорта
    pub total: u64,
}

/// Разобрать загруженный файл и сохранить все записи одной транзакцией
pub async fn import_file(
    db: &DatabaseConnection,
    filename: &str,
    content: &[u8],
) -> anyhow::Result<ImportSummary> {
    let ingested_at = Utc::now().naive_utc();
    let parsed = parser::parse_log(content, filename, ingested_at)?;

    if parsed.dropped > 0 {
        tracing::debug!(
            "{}: dropped {} line(s) with fewer than four fields",
            filename,
            parsed.dropped
        );
    }

    let inserted = repository::insert_batch(db, &parsed.records).await?;
    let total = repository::count_all(db).await?;
    tracing::info!(
        "Imported {} record(s) from {} ({} bytes), {} in table",
        inserted,
        filename,
        content.len(),
        total
    );

    Ok(ImportSummary {
        inserted,
        dropped: parsed.dropped,
        total,
    })
}

pub async fn list(
    db: &DatabaseConnection,
    params: LogQueryParams,
) -> anyhow::Result<Vec<LogRecordDto>> {
    let filter = LogFilter::from(params);
    let items = repository::list_with_filters(db, &filter).await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn stats(db: &DatabaseConnection) -> anyhow::Result<LogStats> {
    let stats = LogStats {
        levels: repository::count_by_level(db).await?,
        sources: repository::count_by_source(db).await?,
    };
    // Обе разбивки считаются по всей таблице, суммы должны совпадать
    if stats.total_by_level() != stats.total_by_source() {
        tracing::warn!(
            "Stats breakdowns disagree: {} by level, {} by source",
            stats.total_by_level(),
            stats.total_by_source()
        );
    }
    Ok(stats)
}
