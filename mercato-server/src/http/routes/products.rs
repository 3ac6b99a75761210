//! Product endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use mercato_core::{NewProduct, Product, ProductDetail, ProductFilter};

use crate::error::Error;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::MarketState;
use crate::workflows::Catalog;

/// Create product request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub about: Option<String>,
    pub price: Option<f64>,
}

/// Query filters for GET /products
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub about: Option<String>,
    /// Maximum price; ignored unless numeric
    pub price: Option<String>,
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Missing, blank, or out-of-range field"),
    )
)]
pub(super) async fn create_product(
    State(state): State<MarketState>,
    JsonBody(req): JsonBody<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), Error> {
    let input = NewProduct::new(req.name, req.about, req.price)?;
    let product = Catalog::new(state.store.as_ref()).create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("about" = Option<String>, Query, description = "Case-insensitive description substring"),
        ("price" = Option<f64>, Query, description = "Inclusive maximum price"),
    ),
    responses((status = 200, description = "Matching products"))
)]
pub(super) async fn list_products(
    State(state): State<MarketState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, Error> {
    let filter = ProductFilter::from_query(query.name, query.about, query.price);
    let products = Catalog::new(state.store.as_ref()).list(&filter).await?;
    Ok(Json(products))
}

/// GET /products/{id} - product with its reviews
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
        params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with its reviews embedded"),
        (status = 404, description = "No such product"),
    )
)]
pub(super) async fn get_product(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
) -> Result<Json<ProductDetail>, Error> {
    let detail = Catalog::new(state.store.as_ref()).detail(id).await?;
    Ok(Json(detail))
}

/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
        params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 404, description = "No such product"),
    )
)]
pub(super) async fn delete_product(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
) -> Result<Json<Product>, Error> {
    let product = Catalog::new(state.store.as_ref()).delete(id).await?;
    Ok(Json(product))
}

/// Product routes
pub fn router() -> Router<MarketState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", get(get_product).delete(delete_product))
}
