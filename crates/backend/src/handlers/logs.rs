use axum::extract::{Multipart, Query, State};
use axum::Json;
use contracts::domain::log_record::{LogRecordDto, LogStats};
use contracts::shared::api::ApiMessage;

use crate::domain::log_record::filter::LogQueryParams;
use crate::domain::log_record::service;
use crate::shared::error::AppError;
use crate::shared::state::AppState;

/// POST /api/upload - загрузка лог-файла
///
/// Multipart-поле `file`. Все строки файла сохраняются одной транзакцией.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> Result<Json<ApiMessage>, AppError> {
    let Some(mut multipart) = multipart else {
        return Err(AppError::BadRequest("No file part".into()));
    };

    let mut file = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                // Поврежденное тело формы: файловую часть найти не удалось
                tracing::warn!("Malformed multipart body: {}", e);
                break;
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        // Поле без filename - обычное поле формы, а не файл
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(e.into()))?;
        file = Some((filename, bytes));
        break;
    }

    let Some((filename, bytes)) = file else {
        return Err(AppError::BadRequest("No file part".into()));
    };
    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".into()));
    }

    service::import_file(&state.db, &filename, &bytes).await?;

    Ok(Json(ApiMessage::new("Log file processed successfully")))
}

/// GET /api/logs - записи по фильтрам
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<LogQueryParams>,
) -> Result<Json<Vec<LogRecordDto>>, AppError> {
    let logs = service::list(&state.db, params).await?;
    Ok(Json(logs))
}

/// GET /api/stats - статистика по уровням и источникам
pub async fn stats(State(state): State<AppState>) -> Result<Json<LogStats>, AppError> {
    let stats = service::stats(&state.db).await?;
    Ok(Json(stats))
}
