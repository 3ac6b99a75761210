//! SOAP product service over the in-memory store

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};

use common::send_raw;
use mercato_server::{soap_app, MemoryStore};

const SOAP: &str = "application/soap+xml; charset=utf-8";

fn envelope(args: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope" xmlns:tns="http://localhost:8000/products">
  <soap:Body><tns:CreateProduct>{args}</tns:CreateProduct></soap:Body>
</soap:Envelope>"#
    )
}

#[tokio::test]
async fn health_names_soap() {
    let app = soap_app(Arc::new(MemoryStore::new()));
    let (status, _, body) =
        send_raw(&app, Method::GET, "/health", "text/plain", String::new()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""service":"soap""#));
}

#[tokio::test]
async fn wsdl_is_published() {
    let app = soap_app(Arc::new(MemoryStore::new()));
    let (status, content_type, body) =
        send_raw(&app, Method::GET, "/products?wsdl", "text/plain", String::new()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/xml"));
    assert!(body.contains("CreateProduct"));

    let (status, _, _) = send_raw(&app, Method::GET, "/products", "text/plain", String::new()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_product_round_trip() {
    let app = soap_app(Arc::new(MemoryStore::new()));
    let (status, content_type, body) = send_raw(
        &app,
        Method::POST,
        "/products",
        SOAP,
        envelope("<tns:name>Kettle</tns:name><tns:about>steel</tns:about><tns:price>25</tns:price>"),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(content_type.as_deref(), Some(SOAP));
    assert!(body.contains("CreateProductResponse"));
    assert!(body.contains("<tns:name>Kettle</tns:name>"));
    assert!(body.contains("<tns:price>25.00</tns:price>"));
}

#[tokio::test]
async fn missing_fields_fault() {
    let app = soap_app(Arc::new(MemoryStore::new()));
    let (status, _, body) = send_raw(
        &app,
        Method::POST,
        "/products",
        SOAP,
        envelope("<tns:name>Kettle</tns:name>"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("soap:Sender"));
    assert!(body.contains("rpc:BadArguments"));
}
