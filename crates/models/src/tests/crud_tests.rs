use anyhow::Result;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter};

use super::setup_test_db;
use crate::errors::ModelError;
use crate::{group, user};

#[tokio::test]
async fn test_group_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = group::create(&db, "Eng", Some("engineering")).await?;
    assert_eq!(created.name, "Eng");
    assert_eq!(created.description.as_deref(), Some("engineering"));

    let found = group::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created.clone()));

    let by_name = group::Entity::find().filter(group::Column::Name.eq("Eng")).one(&db).await?;
    assert_eq!(by_name.map(|g| g.id), Some(created.id));

    assert!(group::hard_delete(&db, created.id).await?);
    assert!(!group::hard_delete(&db, created.id).await?);
    assert!(group::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_group_name_is_conflict() -> Result<()> {
    let db = setup_test_db().await?;
    group::create(&db, "Ops", None).await?;
    let err = group::create(&db, "Ops", None).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_user_crud_without_group() -> Result<()> {
    let db = setup_test_db().await?;

    let u = user::create(&db, "a@b.com", "p", "N", None).await?;
    assert_eq!(u.group_id, None);

    let found = user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
    assert_eq!(found.email, "a@b.com");
    assert_eq!(found.password, "p");
    assert_eq!(found.group_id, None);

    assert!(user::hard_delete(&db, u.id).await?);
    assert!(user::Entity::find_by_id(u.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_conflict_but_name_is_not() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, "x@example.com", "p", "Same", None).await?;
    user::create(&db, "y@example.com", "p", "Same", None).await?;
    let err = user::create(&db, "x@example.com", "q", "Other", None).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_relations_resolve_both_ways() -> Result<()> {
    let db = setup_test_db().await?;
    let g = group::create(&db, "Team", None).await?;
    let u1 = user::create(&db, "one@example.com", "p", "One", Some(g.id)).await?;
    let u2 = user::create(&db, "two@example.com", "p", "Two", Some(g.id)).await?;
    user::create(&db, "solo@example.com", "p", "Solo", None).await?;

    let members = g.find_related(user::Entity).all(&db).await?;
    let mut ids: Vec<i32> = members.iter().map(|u| u.id).collect();
    ids.sort();
    assert_eq!(ids, vec![u1.id, u2.id]);

    let owner = u1.find_related(group::Entity).one(&db).await?;
    assert_eq!(owner.map(|g| g.name), Some("Team".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_deleting_group_leaves_users_orphaned() -> Result<()> {
    let db = setup_test_db().await?;
    let g = group::create(&db, "Temp", None).await?;
    let u = user::create(&db, "orphan@example.com", "p", "Orphan", Some(g.id)).await?;

    group::hard_delete(&db, g.id).await?;

    let still_there = user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
    assert_eq!(still_there.group_id, Some(g.id));
    assert!(still_there.find_related(group::Entity).one(&db).await?.is_none());
    Ok(())
}
