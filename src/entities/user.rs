use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    /// Stored as given. Nothing hashes or checks it.
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A user together with the posts that reference it.
///
/// The post list is the inverse side of `posts.user_id`; it is loaded through
/// the relation and never stored on the user row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserWithPosts {
    pub user: Model,
    pub posts: Vec<super::post::Model>,
}

/// Fields accepted when registering a user.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

impl From<NewUser> for ActiveModel {
    fn from(new: NewUser) -> Self {
        Self {
            id: NotSet,
            email: Set(new.email),
            password: Set(new.password),
        }
    }
}
