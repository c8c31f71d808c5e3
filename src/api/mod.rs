//! HTTP endpoint layer.
//!
//! Two poem-openapi services share one [`AppState`]: [`PostApi`] for
//! `/users/:user_id/posts` and [`UserApi`] for `/users`. Both are mounted
//! under `/api/v1`; the Swagger UI sits at `/`.

mod posts;
mod users;

use std::sync::Arc;

use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::middleware::{Cors, Tracing};
use poem::{Endpoint, EndpointExt, Response, Route};
use poem_openapi::{Object, OpenApiService};
use sea_orm::DatabaseConnection;

use crate::entities::{UserWithPosts, post};
use crate::service::{PostService, UserService};
use crate::store::{PostStore, StoreError, UserStore, sea_stores};

pub use posts::PostApi;
pub use users::UserApi;

pub const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub posts: PostService,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let (users, posts) = sea_stores(db);
        Self::from_stores(users, posts)
    }

    pub fn from_stores(users: Arc<dyn UserStore>, posts: Arc<dyn PostStore>) -> Self {
        Self {
            users: UserService::new(users),
            posts: PostService::new(posts),
        }
    }
}

/// A post as returned to clients. The owner is deliberately absent so a user's
/// post list never points back at the user.
#[derive(Debug, Object)]
#[oai(rename = "Post")]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl From<post::Model> for PostView {
    fn from(post: post::Model) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
        }
    }
}

#[derive(Debug, Object)]
#[oai(rename = "User")]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub posts: Vec<PostView>,
}

impl From<UserWithPosts> for UserView {
    fn from(UserWithPosts { user, posts }: UserWithPosts) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password: user.password,
            posts: posts.into_iter().map(PostView::from).collect(),
        }
    }
}

impl ResponseError for StoreError {
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn as_response(&self) -> Response
    where
        Self: std::error::Error + Send + Sync + 'static,
    {
        tracing::error!(error = %self, "store operation failed");
        Response::builder()
            .status(self.status())
            .body("internal server error")
    }
}

/// The full route tree over `db`.
pub fn app(db: DatabaseConnection) -> impl Endpoint {
    routes(AppState::new(db))
}

pub fn routes(state: AppState) -> impl Endpoint {
    let api = OpenApiService::new(
        (PostApi::new(state.clone()), UserApi::new(state)),
        "User Posts API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(API_PREFIX);
    let ui = api.swagger_ui();

    Route::new()
        .nest(API_PREFIX, api)
        .nest("/", ui)
        .with(Cors::new())
        .with(Tracing)
}
