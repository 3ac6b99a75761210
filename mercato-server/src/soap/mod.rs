//! SOAP product service
//!
//! `GET /products?wsdl` publishes the contract; `POST /products` runs
//! `CreateProduct` through the same catalogue workflow as the REST API.

pub mod envelope;
pub mod fault;

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use mercato_core::{NewProduct, Product};

use crate::error::Error;
use crate::http::server::MarketState;
use crate::store::MarketStore;
use crate::workflows::Catalog;

pub use envelope::{parse_create_product, CreateProductArgs, EnvelopeError};
pub use fault::SoapFault;

pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Service contract served at `?wsdl`
pub const WSDL: &str = include_str!("../../wsdl/products.wsdl");

/// GET /products?wsdl
async fn wsdl(RawQuery(query): RawQuery) -> Response {
    if query.as_deref().is_some_and(|q| q.contains("wsdl")) {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
            WSDL,
        )
            .into_response()
    } else {
        (StatusCode::NOT_FOUND, "404: Not Found: /products").into_response()
    }
}

/// POST /products - CreateProduct
async fn call(State(state): State<MarketState>, body: String) -> Response {
    match create_product(state.store.as_ref(), &body).await {
        Ok(product) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, SOAP_CONTENT_TYPE)],
            envelope::create_product_response(&product),
        )
            .into_response(),
        Err(fault) => {
            tracing::debug!(code = fault.code(), reason = fault.reason(), "SOAP fault");
            fault.into_response()
        }
    }
}

/// Run `CreateProduct` against the store, reporting failure as a fault.
pub async fn create_product(store: &dyn MarketStore, body: &str) -> Result<Product, SoapFault> {
    let args = parse_create_product(body)?;

    let price = args
        .price
        .map(|p| p.trim().parse::<f64>())
        .transpose()
        .map_err(|_| SoapFault::BadArguments {
            reason: "price must be a number".into(),
        })?;

    let input = NewProduct::new(args.name, args.about, price).map_err(Error::from)?;
    Ok(Catalog::new(store).create(input).await?)
}

/// SOAP routes
pub fn router() -> Router<MarketState> {
    Router::new().route("/products", get(wsdl).post(call))
}
