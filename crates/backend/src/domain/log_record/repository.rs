use anyhow::Result;
use chrono::Utc;
use contracts::domain::log_record::{LogRecordDto, NameCount};
use contracts::shared::datetime;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveValue::NotSet, DatabaseBackend, DatabaseTransaction, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, Statement, TransactionTrait,
};

use super::filter::{LogFilter, MAX_RESULTS};
use super::parser::NewLogRecord;

/// Строк в одном INSERT: держим число параметров ниже лимита SQLite
const INSERT_CHUNK: usize = 500;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "log_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub level: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub source: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogRecordDto {
    fn from(m: Model) -> Self {
        LogRecordDto {
            id: m.id,
            timestamp: datetime::storage_to_iso(&m.timestamp),
            level: m.level,
            message: m.message,
            source: m.source,
            created_at: datetime::storage_to_iso(&m.created_at),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct GroupCount {
    name: Option<String>,
    count: i64,
}

impl From<GroupCount> for NameCount {
    fn from(g: GroupCount) -> Self {
        NameCount {
            name: g.name.unwrap_or_default(),
            count: g.count,
        }
    }
}

/// Сохранить пачку записей одной транзакцией.
///
/// Либо видны все записи пачки, либо ни одной. Возвращает количество вставленных строк.
pub async fn insert_batch(db: &DatabaseConnection, records: &[NewLogRecord]) -> Result<u64> {
    if records.is_empty() {
        return Ok(0);
    }

    let created_at = datetime::to_storage(&Utc::now().naive_utc());

    let txn = db.begin().await?;
    if let Err(e) = insert_chunks(&txn, records, &created_at).await {
        txn.rollback().await?;
        return Err(e);
    }
    txn.commit().await?;

    Ok(records.len() as u64)
}

async fn insert_chunks(
    txn: &DatabaseTransaction,
    records: &[NewLogRecord],
    created_at: &str,
) -> Result<()> {
    for chunk in records.chunks(INSERT_CHUNK) {
        let models = chunk.iter().map(|r| ActiveModel {
            id: NotSet,
            timestamp: Set(datetime::to_storage(&r.timestamp)),
            level: Set(r.level.clone()),
            message: Set(r.message.clone()),
            source: Set(r.source.clone()),
            created_at: Set(created_at.to_string()),
        });
        Entity::insert_many(models).exec(txn).await?;
    }
    Ok(())
}

/// Записи по фильтру, новые сверху, не более `MAX_RESULTS`
pub async fn list_with_filters(db: &DatabaseConnection, filter: &LogFilter) -> Result<Vec<Model>> {
    let mut query = Entity::find();

    if let Some(ref level) = filter.level {
        query = query.filter(Column::Level.eq(level.as_str()));
    }
    if let Some(ref source) = filter.source {
        query = query.filter(Column::Source.eq(source.as_str()));
    }
    if let Some(start) = filter.start {
        query = query.filter(Column::Timestamp.gte(datetime::to_storage(&start)));
    }
    if let Some(end) = filter.end {
        query = query.filter(Column::Timestamp.lte(datetime::to_storage(&end)));
    }

    let items = query
        .order_by_desc(Column::Timestamp)
        .order_by_desc(Column::Id)
        .limit(MAX_RESULTS)
        .all(db)
        .await?;

    Ok(items)
}

/// Всего записей в таблице
pub async fn count_all(db: &DatabaseConnection) -> Result<u64> {
    Ok(Entity::find().count(db).await?)
}

/// Количество записей по уровням
pub async fn count_by_level(db: &DatabaseConnection) -> Result<Vec<NameCount>> {
    count_grouped_by(db, "level").await
}

/// Количество записей по источникам (именам файлов)
pub async fn count_by_source(db: &DatabaseConnection) -> Result<Vec<NameCount>> {
    count_grouped_by(db, "source").await
}

async fn count_grouped_by(db: &DatabaseConnection, column: &'static str) -> Result<Vec<NameCount>> {
    let sql = format!(
        "SELECT {column} AS name, CAST(COUNT(id) AS INTEGER) AS count \
         FROM log_entry GROUP BY {column}"
    );
    let rows = GroupCount::find_by_statement(Statement::from_string(DatabaseBackend::Sqlite, sql))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}
