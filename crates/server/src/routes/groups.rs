use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use common::types::{Created, Message};
use models::{group, user};
use service::group_service;

use crate::{errors::ApiError, routes::ServerState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGroupInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Absent fields are left unchanged; `"description": null` clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateGroupInput {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberOutput {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupOutput {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub users: Vec<MemberOutput>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupsOutput {
    pub groups: Vec<GroupOutput>,
}

impl From<(group::Model, Vec<user::Model>)> for GroupOutput {
    fn from((g, users): (group::Model, Vec<user::Model>)) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
            users: users.into_iter().map(|u| MemberOutput { email: u.email, name: u.name }).collect(),
        }
    }
}

#[utoipa::path(
    get, path = "/groups", tag = "groups",
    responses((status = 200, description = "All groups with their members", body = GroupsOutput))
)]
pub async fn list_groups(State(state): State<ServerState>) -> Result<Json<GroupsOutput>, ApiError> {
    let groups = group_service::list_groups_with_users(&state.db).await?;
    Ok(Json(GroupsOutput { groups: groups.into_iter().map(GroupOutput::from).collect() }))
}

#[utoipa::path(
    get, path = "/groups/{id}", tag = "groups",
    params(("id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "OK", body = GroupOutput),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_group(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<GroupOutput>, ApiError> {
    let Path(id) = id?;
    let found = group_service::get_group_with_users(&state.db, id)
        .await?
        .ok_or_else(|| service::errors::ServiceError::not_found("group"))?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    post, path = "/groups", tag = "groups",
    request_body = CreateGroupInput,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_group(
    State(state): State<ServerState>,
    input: Result<Json<CreateGroupInput>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
    let Json(input) = input?;
    let created = group_service::create_group(
        &state.db,
        input.name.as_deref().unwrap_or_default(),
        input.description.as_deref(),
    )
    .await?;
    info!(id = created.id, name = %created.name, "created group");
    Ok(Json(Created { id: created.id }))
}

#[utoipa::path(
    put, path = "/groups/{id}", tag = "groups",
    params(("id" = i32, Path, description = "Group id")),
    request_body = UpdateGroupInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_group(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    input: Result<Json<UpdateGroupInput>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id?;
    let Json(input) = input?;
    let description = input.description.as_ref().map(Option::as_deref);
    group_service::update_group(&state.db, id, input.name.as_deref(), description).await?;
    info!(id, "updated group");
    Ok(Json(Message::updated()))
}

#[utoipa::path(
    delete, path = "/groups/{id}", tag = "groups",
    params(("id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_group(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(id) = id?;
    group_service::delete_group(&state.db, id).await?;
    info!(id, "deleted group");
    Ok(Json(Message::deleted()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_input_distinguishes_missing_and_null_description() {
        let missing: UpdateGroupInput = serde_json::from_str(r#"{"name": "G"}"#).unwrap();
        assert_eq!(missing.description, None);

        let cleared: UpdateGroupInput = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert!(cleared.name.is_none());

        let set: UpdateGroupInput = serde_json::from_str(r#"{"description": "infra"}"#).unwrap();
        assert_eq!(set.description, Some(Some("infra".to_string())));
    }
}
