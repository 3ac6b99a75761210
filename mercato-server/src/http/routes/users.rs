//! User endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use mercato_core::{NewUser, PublicUser, UserPatch};

use crate::error::Error;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::MarketState;
use crate::workflows::Accounts;

/// Body for POST, PUT, and PATCH. PATCH accepts any subset.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User registered, password hash omitted"),
        (status = 400, description = "Missing or malformed field"),
    )
)]
pub(super) async fn create_user(
    State(state): State<MarketState>,
    JsonBody(req): JsonBody<UserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), Error> {
    let input = NewUser::new(req.username, req.email, req.password)?;
    let user = Accounts::new(state.store.as_ref()).register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
        params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User without password hash"),
        (status = 404, description = "No such user"),
    )
)]
pub(super) async fn get_user(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
) -> Result<Json<PublicUser>, Error> {
    let user = Accounts::new(state.store.as_ref()).get(id).await?;
    Ok(Json(user))
}

/// PUT /users/{id} - replace every field
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
        params(("id" = i64, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced"),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "No such user"),
    )
)]
pub(super) async fn replace_user(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<UserRequest>,
) -> Result<Json<PublicUser>, Error> {
    let input = NewUser::new(req.username, req.email, req.password)?;
    let user = Accounts::new(state.store.as_ref()).replace(id, input).await?;
    Ok(Json(user))
}

/// PATCH /users/{id}
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
        params(("id" = i64, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Supplied fields updated"),
        (status = 400, description = "No fields, or a malformed one"),
        (status = 404, description = "No such user"),
    )
)]
pub(super) async fn patch_user(
    State(state): State<MarketState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<UserRequest>,
) -> Result<Json<PublicUser>, Error> {
    let patch = UserPatch::new(req.username, req.email, req.password)?;
    let user = Accounts::new(state.store.as_ref()).update(id, patch).await?;
    Ok(Json(user))
}

/// User routes
pub fn router() -> Router<MarketState> {
    Router::new().route("/users", post(create_user)).route(
        "/users/{id}",
        get(get_user).put(replace_user).patch(patch_user),
    )
}
