use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object, OpenApi};

use super::{AppState, PostView};
use crate::entities::post::NewPost;

#[derive(Debug, Object)]
#[oai(rename = "NewPost")]
struct PostCreate {
    title: String,
    content: String,
}

#[derive(ApiResponse)]
enum CreatePostResponse {
    #[oai(status = 200)]
    Ok(Json<PostView>),
    /// No user with the given id. The body is empty.
    #[oai(status = 404)]
    NotFound,
}

pub struct PostApi {
    state: AppState,
}

impl PostApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl PostApi {
    /// Posts owned by a user
    ///
    /// An unknown user yields an empty list rather than 404.
    #[oai(path = "/users/:user_id/posts", method = "get")]
    async fn get_all_posts_for_user(
        &self,
        Path(user_id): Path<i64>,
    ) -> poem::Result<Json<Vec<PostView>>> {
        let posts = self.state.posts.get_all_posts_for_user(user_id).await?;
        Ok(Json(posts.into_iter().map(PostView::from).collect()))
    }

    /// Create a post for a user
    #[oai(path = "/users/:user_id/posts", method = "post")]
    async fn create_post(
        &self,
        Path(user_id): Path<i64>,
        Json(input): Json<PostCreate>,
    ) -> poem::Result<CreatePostResponse> {
        let Some(owner) = self.state.users.find_user(user_id).await? else {
            return Ok(CreatePostResponse::NotFound);
        };
        let draft = NewPost {
            title: input.title,
            content: input.content,
        };
        let created = self
            .state
            .posts
            .create_post(draft.owned_by(&owner))
            .await?;
        Ok(CreatePostResponse::Ok(Json(created.into())))
    }
}
