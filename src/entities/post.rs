use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Title and content of a post that has no owner yet.
#[derive(Clone, Debug)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// Attaches `owner` and yields an insertable row.
    pub fn owned_by(self, owner: &super::user::Model) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            title: Set(self.title),
            content: Set(self.content),
            user_id: Set(owner.id),
        }
    }
}
