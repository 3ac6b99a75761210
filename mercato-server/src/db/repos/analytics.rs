//! Analytics record repository
//!
//! Documents live in one JSONB table keyed by kind. The visitor lookup
//! compares the `visitor` attribute as JSON, so `"v1"` and `1` differ.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use mercato_core::{AnalyticsRecord, NewRecord, RecordKind};

use crate::error::{StoreError, StoreResult};

/// Analytics record from database
#[derive(Debug, Clone, FromRow)]
pub struct RecordRow {
    pub id: Uuid,
    pub kind: String,
    pub body: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for AnalyticsRecord {
    type Error = StoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| StoreError::Corrupt {
            table: "analytics_records",
            reason,
        };
        let kind: RecordKind = row.kind.parse().map_err(|_| corrupt(format!("kind '{}'", row.kind)))?;
        let JsonValue::Object(fields) = row.body else {
            return Err(corrupt(format!("record {} body is not an object", row.id)));
        };
        Ok(Self {
            id: row.id,
            kind,
            created_at: row.created_at,
            fields,
        })
    }
}

/// Analytics repository
pub struct AnalyticsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AnalyticsRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &NewRecord) -> StoreResult<AnalyticsRecord> {
        let row: RecordRow = sqlx::query_as(
            r#"
            INSERT INTO analytics_records (id, kind, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.kind.as_str())
        .bind(JsonValue::Object(record.fields.clone()))
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    pub async fn list(&self, kind: RecordKind) -> StoreResult<Vec<AnalyticsRecord>> {
        let rows: Vec<RecordRow> = sqlx::query_as(
            "SELECT * FROM analytics_records WHERE kind = $1 ORDER BY created_at, id",
        )
        .bind(kind.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(AnalyticsRecord::try_from).collect()
    }

    pub async fn get(&self, kind: RecordKind, id: Uuid) -> StoreResult<Option<AnalyticsRecord>> {
        let row: Option<RecordRow> =
            sqlx::query_as("SELECT * FROM analytics_records WHERE kind = $1 AND id = $2")
                .bind(kind.as_str())
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(AnalyticsRecord::try_from).transpose()
    }

    pub async fn for_visitor(
        &self,
        kind: RecordKind,
        visitor: &JsonValue,
    ) -> StoreResult<Vec<AnalyticsRecord>> {
        let rows: Vec<RecordRow> = sqlx::query_as(
            r#"
            SELECT * FROM analytics_records
            WHERE kind = $1 AND body -> 'visitor' = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(kind.as_str())
        .bind(visitor)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(AnalyticsRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_conversion() {
        let row = RecordRow {
            id: Uuid::new_v4(),
            kind: "goals".into(),
            body: json!({"visitor": "v9"}),
            created_at: Utc::now(),
        };
        let record = AnalyticsRecord::try_from(row).unwrap();
        assert_eq!(record.kind, RecordKind::Goals);
        assert_eq!(record.visitor(), Some(&json!("v9")));
    }

    #[test]
    fn unknown_kind_is_corrupt() {
        let row = RecordRow {
            id: Uuid::new_v4(),
            kind: "clicks".into(),
            body: json!({}),
            created_at: Utc::now(),
        };
        assert!(matches!(
            AnalyticsRecord::try_from(row),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
