//! Order endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mercato_core::{NewOrder, Order, OrderView, ProductId, UserId};

use crate::error::Error;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::MarketState;
use crate::workflows::OrderPricing;

/// Create order request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<UserId>,
    #[schema(value_type = Option<Vec<i64>>)]
    pub product_ids: Option<Vec<ProductId>>,
}

/// Partial order update
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[schema(value_type = Option<Vec<i64>>)]
    pub product_ids: Option<Vec<ProductId>>,
    pub payment: Option<bool>,
}

/// Response for DELETE /orders/{id}
#[derive(Debug, Serialize)]
pub struct DeletedOrder {
    pub message: &'static str,
    pub deleted: Order,
}

/// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order priced with tax and stored"),
        (status = 400, description = "Invalid body or unknown product ids"),
        (status = 404, description = "No such user"),
    )
)]
pub(super) async fn create_order(
    State(state): State<MarketState>,
    JsonBody(req): JsonBody<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderView>), Error> {
    let input = NewOrder::new(req.user_id, req.product_ids)?;
    let view = OrderPricing::new(state.store.as_ref()).create(input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    responses((status = 200, description = "Orders with owners and products embedded"))
)]
pub(super) async fn list_orders(State(state): State<MarketState>) -> Result<Json<Vec<OrderView>>, Error> {
    let views = OrderPricing::new(state.store.as_ref()).list().await?;
    Ok(Json(views))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
        params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with owner and products embedded"),
        (status = 404, description = "No such order"),
    )
)]
pub(super) async fn get_order(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
) -> Result<Json<OrderView>, Error> {
    let view = OrderPricing::new(state.store.as_ref()).get(id).await?;
    Ok(Json(view))
}

/// PATCH /orders/{id}
#[utoipa::path(
    patch,
    path = "/orders/{id}",
    tag = "orders",
        params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated, re-priced when products change"),
        (status = 400, description = "Empty product list or unknown product ids"),
        (status = 404, description = "No such order"),
    )
)]
pub(super) async fn update_order(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<UpdateOrderRequest>,
) -> Result<Json<OrderView>, Error> {
    let view = OrderPricing::new(state.store.as_ref())
        .update(id, req.product_ids, req.payment)
        .await?;
    Ok(Json(view))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "orders",
        params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Deleted order record"),
        (status = 404, description = "No such order"),
    )
)]
pub(super) async fn delete_order(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
) -> Result<Json<DeletedOrder>, Error> {
    let deleted = OrderPricing::new(state.store.as_ref()).delete(id).await?;
    Ok(Json(DeletedOrder {
        message: "order deleted",
        deleted,
    }))
}

/// Order routes
pub fn router() -> Router<MarketState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
}
