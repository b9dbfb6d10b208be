//! User record handlers.
//!
//! ```text
//! GET    /v1/users?page=&limit=&filter=&sort=&minAge=&maxAge=
//! GET    /v1/users/{id}
//! POST   /v1/users        {"name":"Sam Smith","email":"sam@example.com","age":20}
//! PUT    /v1/users/{id}   {"age":21}
//! DELETE /v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::Value;

use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{list_params, parse_new_user, parse_user_patch};

/// Scope every user route is mounted under.
pub const USERS_SCOPE: &str = "/v1";

/// Page of users matching the optional filters.
#[utoipa::path(
    get,
    path = "/v1/users",
    params(crate::inbound::http::schemas::UserListParamsSchema),
    responses(
        (status = 200, description = "Matching users, possibly empty", body = [crate::inbound::http::schemas::UserSchema]),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::ErrorMessageSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    pairs: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<User>>> {
    let params = list_params(pairs.into_inner());
    let users = state.users.list(&params).await?;
    Ok(web::Json(users))
}

/// Single user by identifier.
///
/// A missing record answers 500 with `User {id} not found`.
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = crate::inbound::http::schemas::UserSchema),
        (status = 500, description = "Not found or store failure", body = crate::inbound::http::schemas::ErrorMessageSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get(&UserId::new(id.into_inner())).await?;
    Ok(web::Json(user))
}

#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = crate::inbound::http::schemas::NewUserSchema,
    responses(
        (status = 201, description = "Created user with its identifier", body = crate::inbound::http::schemas::UserSchema),
        (status = 422, description = "Validation failed", body = crate::inbound::http::schemas::ValidationFailureSchema),
        (status = 500, description = "Store failure, including duplicate email", body = crate::inbound::http::schemas::ErrorMessageSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let new_user = parse_new_user(payload.into_inner()).map_err(Error::validation)?;
    let created = state.users.create(new_user).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Partial update; only the supplied fields change.
#[utoipa::path(
    put,
    path = "/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = crate::inbound::http::schemas::UserPatchSchema,
    responses(
        (status = 200, description = "User after the update", body = crate::inbound::http::schemas::UserSchema),
        (status = 422, description = "Validation failed", body = crate::inbound::http::schemas::ValidationFailureSchema),
        (status = 500, description = "Not found or store failure", body = crate::inbound::http::schemas::ErrorMessageSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<User>> {
    let patch = parse_user_patch(payload.into_inner()).map_err(Error::validation)?;
    let updated = state
        .users
        .update(&UserId::new(id.into_inner()), patch)
        .await?;
    Ok(web::Json(updated))
}

/// Remove a user. Succeeds for identifiers that no longer exist.
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted or already absent"),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::ErrorMessageSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.users.delete(&UserId::new(id.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `/v1` scope with every user route registered.
pub fn scope() -> actix_web::Scope {
    web::scope(USERS_SCOPE)
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
}
