use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use models::{group, user};
use crate::errors::ServiceError;

/// A group together with the users whose `group_id` points at it.
pub type GroupWithUsers = (group::Model, Vec<user::Model>);

/// Create a group.
pub async fn create_group(db: &DatabaseConnection, name: &str, description: Option<&str>) -> Result<group::Model, ServiceError> {
    let created = group::create(db, name, description).await?;
    debug!(id = created.id, "group created");
    Ok(created)
}

/// Get a group by id.
pub async fn get_group(db: &DatabaseConnection, id: i32) -> Result<Option<group::Model>, ServiceError> {
    group::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

/// Get a group by id along with its members, ordered by user id.
pub async fn get_group_with_users(db: &DatabaseConnection, id: i32) -> Result<Option<GroupWithUsers>, ServiceError> {
    let Some(found) = get_group(db, id).await? else { return Ok(None) };
    let users = found
        .find_related(user::Entity)
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(Some((found, users)))
}

/// List every group with its members. Grouped users are fetched in one query
/// and attached in memory; users pointing at a deleted group are dropped.
pub async fn list_groups_with_users(db: &DatabaseConnection) -> Result<Vec<GroupWithUsers>, ServiceError> {
    let groups = group::Entity::find()
        .order_by_asc(group::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    if groups.is_empty() { return Ok(Vec::new()); }

    let members = user::Entity::find()
        .filter(user::Column::GroupId.is_not_null())
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;

    let mut by_group: HashMap<i32, Vec<user::Model>> = HashMap::new();
    for u in members {
        if let Some(gid) = u.group_id { by_group.entry(gid).or_default().push(u); }
    }
    Ok(groups
        .into_iter()
        .map(|g| {
            let users = by_group.remove(&g.id).unwrap_or_default();
            (g, users)
        })
        .collect())
}

/// Update a group's name and/or description. Absent fields keep their value;
/// `Some(None)` clears the description.
pub async fn update_group(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
    description: Option<Option<&str>>,
) -> Result<group::Model, ServiceError> {
    let found = get_group(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("group"))?;
    if let Some(n) = name { group::validate_name(n)?; }
    if let Some(Some(d)) = description { group::validate_description(d)?; }
    if name.is_none() && description.is_none() { return Ok(found); }
    let mut am: group::ActiveModel = found.into();
    if let Some(n) = name { am.name = Set(n.to_string()); }
    if let Some(d) = description { am.description = Set(d.map(str::to_string)); }
    let updated = am.update(db).await.map_err(ServiceError::db)?;
    Ok(updated)
}

/// Delete a group. Its users keep their (now dangling) `group_id`.
pub async fn delete_group(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    if group::hard_delete(db, id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found("group"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn group_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let g = create_group(&db, "Eng", None).await?;
        let found = get_group(&db, g.id).await?.unwrap();
        assert_eq!(found.name, "Eng");

        let updated = update_group(&db, g.id, Some("Platform"), None).await?;
        assert_eq!(updated.name, "Platform");
        assert_eq!(updated.description, None);

        let updated = update_group(&db, g.id, None, Some(Some("infra people"))).await?;
        assert_eq!(updated.name, "Platform");
        assert_eq!(updated.description.as_deref(), Some("infra people"));

        let cleared = update_group(&db, g.id, None, Some(None)).await?;
        assert_eq!(cleared.name, "Platform");
        assert_eq!(cleared.description, None);

        delete_group(&db, g.id).await?;
        assert!(get_group(&db, g.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_name() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_group(&db, "", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "name required"), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_on_create_and_update() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_group(&db, "A", None).await?;
        let b = create_group(&db, "B", None).await?;

        assert!(matches!(create_group(&db, "A", None).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(update_group(&db, b.id, Some("A"), None).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_group_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(get_group_with_users(&db, 42).await?.is_none());
        assert!(matches!(update_group(&db, 42, Some("x"), None).await, Err(ServiceError::NotFound(_))));
        // existence is checked before the fields
        assert!(matches!(update_group(&db, 42, Some(""), None).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_group(&db, 42).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_attaches_members_to_their_group() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let eng = create_group(&db, "Eng", None).await?;
        let ops = create_group(&db, "Ops", None).await?;
        user::create(&db, "a@example.com", "p", "A", Some(eng.id)).await?;
        user::create(&db, "b@example.com", "p", "B", Some(ops.id)).await?;
        user::create(&db, "c@example.com", "p", "C", Some(eng.id)).await?;
        user::create(&db, "d@example.com", "p", "D", None).await?;
        user::create(&db, "e@example.com", "p", "E", Some(ops.id + 50)).await?;

        let listed = list_groups_with_users(&db).await?;
        assert_eq!(listed.len(), 2);
        let (g0, u0) = &listed[0];
        assert_eq!(g0.name, "Eng");
        assert_eq!(u0.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["A", "C"]);
        let (g1, u1) = &listed[1];
        assert_eq!(g1.name, "Ops");
        assert_eq!(u1.len(), 1);

        let (_, members) = get_group_with_users(&db, eng.id).await?.unwrap();
        assert_eq!(members.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_group_keeps_members() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let g = create_group(&db, "Gone", None).await?;
        let u = user::create(&db, "left@example.com", "p", "Left", Some(g.id)).await?;

        delete_group(&db, g.id).await?;

        let still = user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
        assert_eq!(still.group_id, Some(g.id));
        assert!(list_groups_with_users(&db).await?.is_empty());
        Ok(())
    }
}
