use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Максимальное количество записей в ответе `GET /api/logs`
pub const MAX_RESULTS: u64 = 1000;

/// Параметры запроса `GET /api/logs` как они пришли в URL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQueryParams {
    pub level: Option<String>,
    pub source: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Проверенный фильтр. Отсутствующее поле означает, что условие не применяется.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Уже в верхнем регистре.
    pub level: Option<String>,
    pub source: Option<String>,
    /// Включительно, полночь `start_date`.
    pub start: Option<NaiveDateTime>,
    /// Включительно, `end_date` 23:59:59.
    pub end: Option<NaiveDateTime>,
}

impl From<LogQueryParams> for LogFilter {
    fn from(params: LogQueryParams) -> Self {
        // Некорректные даты молча игнорируются
        let start = non_empty(params.start_date)
            .and_then(|s| parse_date(&s))
            .and_then(|d| d.and_hms_opt(0, 0, 0));
        let end = non_empty(params.end_date)
            .and_then(|s| parse_date(&s))
            .and_then(|d| d.and_hms_opt(23, 59, 59));

        Self {
            level: non_empty(params.level).map(|l| l.to_uppercase()),
            source: non_empty(params.source),
            start,
            end,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(level: &str, source: &str, start: &str, end: &str) -> LogQueryParams {
        let opt = |s: &str| Some(s.to_string());
        LogQueryParams {
            level: opt(level),
            source: opt(source),
            start_date: opt(start),
            end_date: opt(end),
        }
    }

    #[test]
    fn test_full_filter() {
        let filter = LogFilter::from(params("error", "App.log", "2024-01-01", "2024-01-31"));
        assert_eq!(filter.level.as_deref(), Some("ERROR"));
        assert_eq!(filter.source.as_deref(), Some("App.log"));
        assert_eq!(
            filter.start.unwrap().to_string(),
            "2024-01-01 00:00:00"
        );
        assert_eq!(filter.end.unwrap().to_string(), "2024-01-31 23:59:59");
    }

    #[test]
    fn test_empty_values_are_absent() {
        let filter = LogFilter::from(params("", "", "", ""));
        assert_eq!(filter, LogFilter::default());
    }

    #[test]
    fn test_malformed_dates_are_ignored() {
        let filter = LogFilter::from(params("info", "a.log", "2024-02-30", "01/02/2024"));
        assert!(filter.start.is_none());
        assert!(filter.end.is_none());
        assert_eq!(filter.level.as_deref(), Some("INFO"));
    }

    #[test]
    fn test_missing_params() {
        let filter = LogFilter::from(LogQueryParams::default());
        assert_eq!(filter, LogFilter::default());
    }
}
