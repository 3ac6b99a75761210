//! OpenAPI document and Swagger UI for the marketplace service
//!
//! The raw document is served at `/openapi.json` and the interactive
//! explorer at `/api-docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::{orders, products, reviews, users};

pub const DOCS_PATH: &str = "/api-docs";
pub const SPEC_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mercato Marketplace API",
        description = "Products, users, orders, and reviews"
    ),
    servers((url = "http://localhost:8000", description = "Local server")),
    paths(
        products::create_product,
        products::list_products,
        products::get_product,
        products::delete_product,
        users::create_user,
        users::get_user,
        users::replace_user,
        users::patch_user,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
        reviews::create_review,
    ),
    components(schemas(
        products::CreateProductRequest,
        users::UserRequest,
        orders::CreateOrderRequest,
        orders::UpdateOrderRequest,
        reviews::CreateReviewRequest,
    )),
    tags(
        (name = "products", description = "Catalogue with review averages"),
        (name = "users", description = "Accounts; password hashes never leave the service"),
        (name = "orders", description = "Orders priced from their product list, tax included"),
        (name = "reviews", description = "Scores from 1 to 5 feeding product averages"),
    )
)]
pub struct MarketApiDoc;

/// Swagger UI plus the document it renders
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(SPEC_PATH, MarketApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_market_paths() {
        let doc = MarketApiDoc::openapi();
        for path in ["/products", "/products/{id}", "/users/{id}", "/orders/{id}", "/reviews"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let order = &doc.paths.paths["/orders/{id}"];
        assert!(order.patch.is_some());
        assert!(order.delete.is_some());
    }
}
