use std::sync::Arc;

use crate::entities::post;
use crate::entities::user::{self, NewUser, UserWithPosts};
use crate::store::{PostStore, StoreError, UserStore};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_users(&self) -> Result<Vec<UserWithPosts>, StoreError> {
        self.store.find_all().await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<UserWithPosts>, StoreError> {
        self.store.find_by_id(id).await
    }

    /// Just the user row. Cheaper than [`Self::get_user_by_id`] when the
    /// posts are not needed.
    pub async fn find_user(&self, id: i64) -> Result<Option<user::Model>, StoreError> {
        self.store.find_row(id).await
    }

    /// A freshly inserted user owns nothing, so its post list starts empty.
    pub async fn create_user(&self, new: NewUser) -> Result<UserWithPosts, StoreError> {
        let user = self.store.save(user::ActiveModel::from(new)).await?;
        tracing::info!(user_id = user.id, "created user");
        Ok(UserWithPosts {
            user,
            posts: Vec::new(),
        })
    }

    pub async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            tracing::info!(user_id = id, "deleted user and its posts");
        }
        Ok(deleted)
    }
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Does not check that the user exists.
    pub async fn get_all_posts_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<post::Model>, StoreError> {
        self.store.find_by_user_id(user_id).await
    }

    /// `post` must already carry its owner.
    pub async fn create_post(&self, post: post::ActiveModel) -> Result<post::Model, StoreError> {
        let post = self.store.save(post).await?;
        tracing::info!(post_id = post.id, user_id = post.user_id, "created post");
        Ok(post)
    }
}
