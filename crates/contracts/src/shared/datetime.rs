use chrono::{NaiveDateTime, Timelike};

/// Формат хранения даты-времени в SQLite.
///
/// Фиксированная ширина (всегда 6 знаков дробной части), поэтому сравнение
/// строк в SQL совпадает с хронологическим.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn to_storage(dt: &NaiveDateTime) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

pub fn from_storage(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()
}

/// ISO-8601 без часового пояса; дробная часть выводится, только если микросекунды не нулевые.
pub fn to_iso(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() / 1_000 == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Значение из БД в ISO-8601. Неразобранные значения возвращаются как есть.
pub fn storage_to_iso(s: &str) -> String {
    match from_storage(s) {
        Some(dt) => to_iso(&dt),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_storage_is_fixed_width() {
        assert_eq!(to_storage(&dt(0, 0, 0, 0)), "2024-01-01 00:00:00.000000");
        assert_eq!(to_storage(&dt(23, 59, 59, 5)), "2024-01-01 23:59:59.000005");
    }

    #[test]
    fn test_storage_ordering_matches_time() {
        let a = to_storage(&dt(9, 0, 0, 999_999));
        let b = to_storage(&dt(10, 0, 0, 0));
        assert!(a < b);
    }

    #[test]
    fn test_iso_fraction_only_when_present() {
        assert_eq!(to_iso(&dt(12, 30, 0, 0)), "2024-01-01T12:30:00");
        assert_eq!(to_iso(&dt(12, 30, 0, 123_000)), "2024-01-01T12:30:00.123000");
    }

    #[test]
    fn test_storage_to_iso() {
        assert_eq!(
            storage_to_iso("2024-01-01 08:15:42.000100"),
            "2024-01-01T08:15:42.000100"
        );
        assert_eq!(storage_to_iso("garbage"), "garbage");
    }
}
