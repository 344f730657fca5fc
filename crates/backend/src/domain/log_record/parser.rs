use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// Ошибки разбора загруженного файла целиком.
///
/// Отдельные строки никогда не приводят к ошибке: строка без нужного числа
/// полей отбрасывается, а неразобранная метка времени заменяется временем загрузки.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'utf-8' codec can't decode byte at position {position}: invalid utf-8 sequence")]
    InvalidUtf8 { position: usize },
}

/// Разобранная строка лога, еще не сохраненная в БД (без id и created_at)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogRecord {
    pub timestamp: NaiveDateTime,
    pub level: String,
    pub message: String,
    pub source: String,
}

#[derive(Debug, Default)]
pub struct ParseSummary {
    pub records: Vec<NewLogRecord>,
    /// Непустые строки, в которых меньше четырех полей через пробел.
    pub dropped: usize,
}

/// Разобрать содержимое файла в записи.
///
/// `ingested_at` подставляется вместо метки времени, которую не удалось разобрать.
pub fn parse_log(
    content: &[u8],
    source: &str,
    ingested_at: NaiveDateTime,
) -> Result<ParseSummary, ParseError> {
    let text = std::str::from_utf8(content).map_err(|e| ParseError::InvalidUtf8 {
        position: e.valid_up_to(),
    })?;

    let mut summary = ParseSummary::default();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, source, ingested_at) {
            Some(record) => summary.records.push(record),
            None => summary.dropped += 1,
        }
    }
    Ok(summary)
}

/// Строка вида `2024-01-01 12:00:00,123456 [LEVEL] message ...`.
///
/// `None`, если в строке меньше четырех полей через пробел.
pub fn parse_line(line: &str, source: &str, ingested_at: NaiveDateTime) -> Option<NewLogRecord> {
    let mut parts = line.splitn(4, ' ');
    let date = parts.next()?;
    let time = parts.next()?;
    let level = parts.next()?;
    let message = parts.next()?;

    let timestamp = parse_timestamp(&format!("{date} {time}")).unwrap_or(ingested_at);

    Some(NewLogRecord {
        timestamp,
        level: level.trim_matches(|c| c == '[' || c == ']').to_string(),
        message: message.to_string(),
        source: source.to_string(),
    })
}

/// Метка времени `YYYY-MM-DD HH:MM:SS,ffffff`, в дробной части от 1 до 6 цифр.
pub fn parse_timestamp(candidate: &str) -> Option<NaiveDateTime> {
    let (whole, fraction) = candidate.split_once(',')?;
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Год строго из 4 цифр: chrono принимает знак и 5+ цифр, что ломает сортировку строк в БД
    let year = whole.as_bytes().get(..5)?;
    if !year[..4].iter().all(u8::is_ascii_digit) || year[4] != b'-' {
        return None;
    }
    let base = NaiveDateTime::parse_from_str(whole, "%Y-%m-%d %H:%M:%S").ok()?;
    // Секунда 60 (leap second) chrono хранит как nanosecond >= 1e9
    if base.nanosecond() >= 1_000_000_000 {
        return None;
    }
    let micros: u32 = format!("{fraction:0<6}").parse().ok()?;
    base.with_nanosecond(micros * 1_000)
}
