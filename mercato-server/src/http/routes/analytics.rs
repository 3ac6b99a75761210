//! Analytics collector endpoints
//!
//! One collection per record kind: `/views`, `/actions`, `/goals`.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::Value as JsonValue;

use mercato_core::{AnalyticsRecord, GoalDetails, RecordKind};

use crate::error::Error;
use crate::http::extractors::{JsonBody, ValidUuid};
use crate::http::server::AnalyticsState;
use crate::workflows::Collector;

/// POST /{kind}
async fn record(
    state: AnalyticsState,
    kind: RecordKind,
    body: JsonValue,
) -> Result<(StatusCode, Json<AnalyticsRecord>), Error> {
    let record = Collector::new(state.store.as_ref())
        .record(kind, body)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /{kind}
async fn list(
    state: AnalyticsState,
    kind: RecordKind,
) -> Result<Json<Vec<AnalyticsRecord>>, Error> {
    let records = Collector::new(state.store.as_ref()).list(kind).await?;
    Ok(Json(records))
}

/// GET /goals/{id}/details
async fn goal_details(
    State(state): State<AnalyticsState>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<GoalDetails>, Error> {
    let details = Collector::new(state.store.as_ref()).goal_details(id).await?;
    Ok(Json(details))
}

/// Analytics routes
pub fn router() -> Router<AnalyticsState> {
    let mut router = Router::new();
    for kind in RecordKind::ALL {
        router = router.route(
            &format!("/{}", kind),
            get(move |State(state): State<AnalyticsState>| list(state, kind)).post(
                move |State(state): State<AnalyticsState>, JsonBody(body): JsonBody<JsonValue>| {
                    record(state, kind, body)
                },
            ),
        );
    }
    router.route("/goals/{id}/details", get(goal_details))
}
