use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::user;

pub const NAME_MAX: usize = 80;
pub const DESCRIPTION_MAX: usize = 120;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::User => Entity::has_many(user::Entity).into() }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_text("name", name, NAME_MAX)
}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    errors::limit_text("description", description, DESCRIPTION_MAX)
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, description: Option<&str>) -> Result<Model, ModelError> {
    validate_name(name)?;
    if let Some(d) = description { validate_description(d)?; }
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Remove a group. Users pointing at it are left untouched.
pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
