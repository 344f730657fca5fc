use serde::{Deserialize, Serialize};

/// Запись лога в том виде, в котором ее отдает `GET /api/logs`
///
/// `timestamp` и `created_at` передаются строками ISO-8601 без часового пояса.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecordDto {
    pub id: i64,
    pub timestamp: String,
    pub level: String,
    pub message: String,
    pub source: String,
    pub created_at: String,
}

/// Одна группа разбивки: значение поля и количество записей
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: i64,
}

/// Ответ `GET /api/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    pub levels: Vec<NameCount>,
    pub sources: Vec<NameCount>,
}

impl LogStats {
    pub fn total_by_level(&self) -> i64 {
        self.levels.iter().map(|g| g.count).sum()
    }

    pub fn total_by_source(&self) -> i64 {
        self.sources.iter().map(|g| g.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_json_shape() {
        let stats = LogStats {
            levels: vec![NameCount {
                name: "ERROR".into(),
                count: 2,
            }],
            sources: vec![],
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "levels": [{"name": "ERROR", "count": 2}],
                "sources": []
            })
        );
    }

    #[test]
    fn test_stats_totals() {
        let stats = LogStats {
            levels: vec![
                NameCount { name: "INFO".into(), count: 3 },
                NameCount { name: "ERROR".into(), count: 1 },
            ],
            sources: vec![NameCount { name: "app.log".into(), count: 4 }],
        };
        assert_eq!(stats.total_by_level(), 4);
        assert_eq!(stats.total_by_source(), 4);
    }
}
