//! Analytics collection and goal-to-visitor correlation

use serde_json::Value as JsonValue;
use uuid::Uuid;

use mercato_core::{AnalyticsRecord, GoalDetails, NewRecord, RecordKind};

use crate::error::{Error, Result};
use crate::store::AnalyticsStore;

pub struct Collector<'a> {
    store: &'a dyn AnalyticsStore,
}

impl<'a> Collector<'a> {
    pub fn new(store: &'a dyn AnalyticsStore) -> Self {
        Self { store }
    }

    pub async fn record(&self, kind: RecordKind, body: JsonValue) -> Result<AnalyticsRecord> {
        let input = NewRecord::new(kind, body)?;
        let record = self.store.insert_record(&input).await?;
        tracing::debug!(kind = %kind, id = %record.id, "analytics record stored");
        Ok(record)
    }

    pub async fn list(&self, kind: RecordKind) -> Result<Vec<AnalyticsRecord>> {
        Ok(self.store.list_records(kind).await?)
    }

    /// A goal plus every view and action sharing its visitor.
    ///
    /// A goal without a visitor correlates with nothing.
    pub async fn goal_details(&self, goal_id: Uuid) -> Result<GoalDetails> {
        let goal = self
            .store
            .get_record(RecordKind::Goals, goal_id)
            .await?
            .ok_or_else(|| Error::not_found("goal", goal_id))?;

        let Some(visitor) = goal.visitor().cloned() else {
            return Ok(GoalDetails {
                goal,
                visitor: None,
                views: Vec::new(),
                actions: Vec::new(),
            });
        };

        let (views, actions) = tokio::try_join!(
            self.store.records_for_visitor(RecordKind::Views, &visitor),
            self.store.records_for_visitor(RecordKind::Actions, &visitor),
        )?;

        Ok(GoalDetails {
            goal,
            visitor: Some(visitor),
            views,
            actions,
        })
    }
}
