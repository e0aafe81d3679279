use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use common::types::{Created, Message};
use models::user;
use service::{errors::ServiceError, user_service::{self, UserChanges}};

use crate::{errors::ApiError, routes::ServerState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub group_id: Option<i32>,
}

/// Absent fields are left unchanged; `"group_id": null` removes the user
/// from its group.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<i32>)]
    pub group_id: Option<Option<i32>>,
}

impl From<UpdateUserInput> for UserChanges {
    fn from(input: UpdateUserInput) -> Self {
        Self { email: input.email, password: input.password, name: input.name, group_id: input.group_id }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserOutput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub group_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersOutput {
    pub users: Vec<UserOutput>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailOutput {
    pub name: String,
    pub email: String,
    /// Name of the user's group, `null` when ungrouped or the group is gone
    pub group: Option<String>,
}

impl From<user::Model> for UserOutput {
    fn from(u: user::Model) -> Self {
        Self { email: u.email, password: u.password, name: u.name, group_id: u.group_id }
    }
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    responses((status = 200, description = "All users", body = UsersOutput))
)]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<UsersOutput>, ApiError> {
    let users = user_service::list_users(&state.db).await?;
    Ok(Json(UsersOutput { users: users.into_iter().map(UserOutput::from).collect() }))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "OK", body = UserDetailOutput),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_user(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserDetailOutput>, ApiError> {
    let Path(id) = id?;
    let (found, owner) = user_service::get_user_with_group(&state.db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    Ok(Json(UserDetailOutput { name: found.name, email: found.email, group: owner.map(|g| g.name) }))
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = CreateUserInput,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Missing field or invalid group_id"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn create_user(
    State(state): State<ServerState>,
    input: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
    let Json(input) = input?;
    let created = user_service::create_user(
        &state.db,
        input.email.as_deref().unwrap_or_default(),
        input.password.as_deref().unwrap_or_default(),
        input.name.as_deref().unwrap_or_default(),
        input.group_id,
    )
    .await?;
    info!(id = created.id, group_id = ?created.group_id, "created user");
    Ok(Json(Created { id: created.id }))
}

#[utoipa::path(
    put, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already taken"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update_user(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    input: Result<Json<UpdateUserInput>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id?;
    let Json(input) = input?;
    user_service::update_user(&state.db, id, input.into()).await?;
    info!(id, "updated user");
    Ok(Json(Message::updated()))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id?;
    user_service::delete_user(&state.db, id).await?;
    info!(id, "deleted user");
    Ok(Json(Message::deleted()))
}
