//! Persistence for users and posts.
//!
//! [`UserStore`] and [`PostStore`] are the seams the services talk to; the
//! `Sea*` types implement them on top of a sea-orm connection. Referential
//! consistency (the post's owner exists, deleting a user removes its posts)
//! is enforced by the schema, not here.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, TryIntoModel,
};

use crate::entities::{UserWithPosts, post, user};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user with its posts, ordered by id.
    async fn find_all(&self) -> Result<Vec<UserWithPosts>, StoreError>;

    /// `None` when no user has this id.
    async fn find_by_id(&self, id: i64) -> Result<Option<UserWithPosts>, StoreError>;

    /// The user row alone, without loading its posts.
    async fn find_row(&self, id: i64) -> Result<Option<user::Model>, StoreError>;

    /// Inserts when `user.id` is unset, updates otherwise.
    async fn save(&self, user: user::ActiveModel) -> Result<user::Model, StoreError>;

    /// Removes the user and, through the foreign key, all of its posts.
    /// Returns `false` if there was nothing to delete.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Posts whose owner is `user_id`. Empty for an unknown user.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<post::Model>, StoreError>;

    /// Inserts when `post.id` is unset, updates otherwise.
    async fn save(&self, post: post::ActiveModel) -> Result<post::Model, StoreError>;
}

#[derive(Clone)]
pub struct SeaUserStore {
    db: DatabaseConnection,
}

impl SeaUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for SeaUserStore {
    async fn find_all(&self) -> Result<Vec<UserWithPosts>, StoreError> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .find_with_related(post::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(user, posts)| UserWithPosts { user, posts })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserWithPosts>, StoreError> {
        let Some(user) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let posts = user
            .find_related(post::Entity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await?;
        Ok(Some(UserWithPosts { user, posts }))
    }

    async fn find_row(&self, id: i64) -> Result<Option<user::Model>, StoreError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn save(&self, user: user::ActiveModel) -> Result<user::Model, StoreError> {
        Ok(user.save(&self.db).await?.try_into_model()?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let res = user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[derive(Clone)]
pub struct SeaPostStore {
    db: DatabaseConnection,
}

impl SeaPostStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for SeaPostStore {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<post::Model>, StoreError> {
        Ok(post::Entity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn save(&self, post: post::ActiveModel) -> Result<post::Model, StoreError> {
        Ok(post.save(&self.db).await?.try_into_model()?)
    }
}

/// Both stores over one connection.
pub fn sea_stores(db: DatabaseConnection) -> (Arc<dyn UserStore>, Arc<dyn PostStore>) {
    (
        Arc::new(SeaUserStore::new(db.clone())),
        Arc::new(SeaPostStore::new(db)),
    )
}
