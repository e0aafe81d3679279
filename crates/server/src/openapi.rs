use axum::Json;
use utoipa::OpenApi;

use crate::routes::{groups, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::index,
        crate::routes::health,
        crate::routes::groups::list_groups,
        crate::routes::groups::get_group,
        crate::routes::groups::create_group,
        crate::routes::groups::update_group,
        crate::routes::groups::delete_group,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            groups::CreateGroupInput,
            groups::UpdateGroupInput,
            groups::MemberOutput,
            groups::GroupOutput,
            groups::GroupsOutput,
            users::CreateUserInput,
            users::UpdateUserInput,
            users::UserOutput,
            users::UsersOutput,
            users::UserDetailOutput,
        )
    ),
    tags(
        (name = "health"),
        (name = "groups"),
        (name = "users")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
