use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::group;

pub const EMAIL_MAX: usize = 120;
pub const PASSWORD_MAX: usize = 120;
pub const NAME_MAX: usize = 120;

/// `password` is kept as supplied; nothing hashes it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub name: String,
    pub group_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Group,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Group => Entity::belongs_to(group::Entity).from(Column::GroupId).to(group::Column::Id).into(),
        }
    }
}

impl Related<group::Entity> for Entity {
    fn to() -> RelationDef { Relation::Group.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    errors::require_text("email", email, EMAIL_MAX)
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    errors::require_text("password", password, PASSWORD_MAX)
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_text("name", name, NAME_MAX)
}

/// Insert a user. `group_id` is stored as given; callers decide whether the
/// referenced group has to exist.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    email: &str,
    password: &str,
    name: &str,
    group_id: Option<i32>,
) -> Result<Model, ModelError> {
    validate_email(email)?;
    validate_password(password)?;
    validate_name(name)?;
    let am = ActiveModel {
        email: Set(email.to_string()),
        password: Set(password.to_string()),
        name: Set(name.to_string()),
        group_id: Set(group_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
