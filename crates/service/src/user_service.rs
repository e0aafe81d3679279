use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set, TransactionTrait};
use tracing::{debug, warn};

use models::{group, user};
use crate::errors::ServiceError;

/// Partial update of a user. `None` leaves a field unchanged; for
/// `group_id`, `Some(None)` clears the membership.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub group_id: Option<Option<i32>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.name.is_none() && self.group_id.is_none()
    }

    fn validate(&self) -> Result<(), ServiceError> {
        if let Some(e) = &self.email { user::validate_email(e)?; }
        if let Some(p) = &self.password { user::validate_password(p)?; }
        if let Some(n) = &self.name { user::validate_name(n)?; }
        Ok(())
    }
}

/// Create a user. A supplied `group_id` must reference an existing group.
pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    name: &str,
    group_id: Option<i32>,
) -> Result<user::Model, ServiceError> {
    user::validate_email(email)?;
    user::validate_password(password)?;
    user::validate_name(name)?;
    if let Some(gid) = group_id {
        let exists = group::Entity::find_by_id(gid).one(db).await.map_err(ServiceError::db)?;
        if exists.is_none() {
            return Err(ServiceError::Validation("invalid group_id".into()));
        }
    }
    let created = user::create(db, email, password, name, group_id).await?;
    debug!(id = created.id, group_id = ?created.group_id, "user created");
    Ok(created)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<Option<user::Model>, ServiceError> {
    user::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

/// Get a user and the group it belongs to. The group is `None` when the user
/// has no `group_id` or the referenced group no longer exists.
pub async fn get_user_with_group(db: &DatabaseConnection, id: i32) -> Result<Option<(user::Model, Option<group::Model>)>, ServiceError> {
    let Some(found) = get_user(db, id).await? else { return Ok(None) };
    let owner = match found.group_id {
        Some(_) => found.find_related(group::Entity).one(db).await.map_err(ServiceError::db)?,
        None => None,
    };
    Ok(Some((found, owner)))
}

/// List all users ordered by id.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// Apply a partial update inside a transaction; any store failure rolls the
/// transaction back. `group_id` is stored as given without an existence check.
pub async fn update_user(db: &DatabaseConnection, id: i32, changes: UserChanges) -> Result<user::Model, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let found = match user::Entity::find_by_id(id).one(&txn).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            txn.rollback().await.map_err(ServiceError::db)?;
            return Err(ServiceError::not_found("user"));
        }
        Err(e) => {
            txn.rollback().await.map_err(ServiceError::db)?;
            return Err(ServiceError::db(e));
        }
    };
    if let Err(e) = changes.validate() {
        txn.rollback().await.map_err(ServiceError::db)?;
        return Err(e);
    }
    if changes.is_empty() {
        txn.commit().await.map_err(ServiceError::db)?;
        return Ok(found);
    }

    let mut am: user::ActiveModel = found.into();
    if let Some(e) = changes.email { am.email = Set(e); }
    if let Some(p) = changes.password { am.password = Set(p); }
    if let Some(n) = changes.name { am.name = Set(n); }
    if let Some(g) = changes.group_id { am.group_id = Set(g); }

    match am.update(&txn).await {
        Ok(updated) => {
            txn.commit().await.map_err(ServiceError::db)?;
            Ok(updated)
        }
        Err(e) => {
            warn!(id, error = %e, "user update failed, rolling back");
            txn.rollback().await.map_err(ServiceError::db)?;
            Err(ServiceError::db(e))
        }
    }
}

/// Delete a user.
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if user::hard_delete(db, id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found("user"))
    }
}
