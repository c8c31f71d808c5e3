use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object, OpenApi};

use super::{AppState, UserView};
use crate::entities::user::NewUser;

#[derive(Debug, Object)]
#[oai(rename = "NewUser")]
struct UserCreate {
    email: String,
    password: String,
}

#[derive(ApiResponse)]
enum GetUserResponse {
    #[oai(status = 200)]
    Ok(Json<UserView>),
    #[oai(status = 404)]
    NotFound,
}

#[derive(ApiResponse)]
enum DeleteUserResponse {
    /// The user and all of its posts are gone.
    #[oai(status = 200)]
    Deleted,
    #[oai(status = 404)]
    NotFound,
}

pub struct UserApi {
    state: AppState,
}

impl UserApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl UserApi {
    /// All users with their posts
    #[oai(path = "/users", method = "get")]
    async fn get_all_users(&self) -> poem::Result<Json<Vec<UserView>>> {
        let users = self.state.users.get_all_users().await?;
        Ok(Json(users.into_iter().map(UserView::from).collect()))
    }

    /// One user with its posts
    #[oai(path = "/users/:user_id", method = "get")]
    async fn get_user(&self, Path(user_id): Path<i64>) -> poem::Result<GetUserResponse> {
        Ok(match self.state.users.get_user_by_id(user_id).await? {
            Some(user) => GetUserResponse::Ok(Json(user.into())),
            None => GetUserResponse::NotFound,
        })
    }

    /// Register a user
    #[oai(path = "/users", method = "post")]
    async fn create_user(&self, Json(input): Json<UserCreate>) -> poem::Result<Json<UserView>> {
        let created = self
            .state
            .users
            .create_user(NewUser {
                email: input.email,
                password: input.password,
            })
            .await?;
        Ok(Json(created.into()))
    }

    /// Delete a user together with its posts
    #[oai(path = "/users/:user_id", method = "delete")]
    async fn delete_user(&self, Path(user_id): Path<i64>) -> poem::Result<DeleteUserResponse> {
        Ok(if self.state.users.delete_user(user_id).await? {
            DeleteUserResponse::Deleted
        } else {
            DeleteUserResponse::NotFound
        })
    }
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use serde_json::json;

    use crate::api::app;
    use crate::test_support::memory_db;

    #[tokio::test]
    async fn created_user_has_an_empty_post_list() {
        let cli = TestClient::new(app(memory_db().await));

        let resp = cli
            .post("/api/v1/users")
            .body_json(&json!({ "email": "alice@example.com", "password": "pw" }))
            .send()
            .await;
        resp.assert_status_is_ok();
        let json = resp.json().await;
        let user = json.value().object();
        assert!(user.get("id").i64() > 0);
        user.get("email").assert_string("alice@example.com");
        user.get("password").assert_string("pw");
        user.get("posts").array().assert_len(0);
    }

    #[tokio::test]
    async fn user_serializes_posts_without_back_reference() {
        let cli = TestClient::new(app(memory_db().await));
        let user_id = cli
            .post("/api/v1/users")
            .body_json(&json!({ "email": "alice@example.com", "password": "pw" }))
            .send()
            .await
            .json()
            .await
            .value()
            .object()
            .get("id")
            .i64();
        cli.post(format!("/api/v1/users/{user_id}/posts"))
            .body_json(&json!({ "title": "T", "content": "C" }))
            .send()
            .await
            .assert_status_is_ok();

        let resp = cli.get(format!("/api/v1/users/{user_id}")).send().await;
        resp.assert_status_is_ok();
        let json = resp.json().await;
        let user = json.value().object();
        user.get("id").assert_i64(user_id);
        let posts = user.get("posts").array();
        posts.assert_len(1);
        let post = posts.get(0).object();
        post.assert_len(3);
        post.get("title").assert_string("T");
        assert!(post.get_opt("user").is_none());

        let all = cli.get("/api/v1/users").send().await.json().await;
        all.value().array().assert_len(1);
    }

    #[tokio::test]
    async fn unknown_user_is_404() {
        let cli = TestClient::new(app(memory_db().await));

        cli.get("/api/v1/users/5")
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND);
        cli.delete("/api/v1/users/5")
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_a_user_empties_its_post_list() {
        let cli = TestClient::new(app(memory_db().await));
        let user_id = cli
            .post("/api/v1/users")
            .body_json(&json!({ "email": "alice@example.com", "password": "pw" }))
            .send()
            .await
            .json()
            .await
            .value()
            .object()
            .get("id")
            .i64();
        for title in ["one", "two"] {
            cli.post(format!("/api/v1/users/{user_id}/posts"))
                .body_json(&json!({ "title": title, "content": "x" }))
                .send()
                .await
                .assert_status_is_ok();
        }

        cli.delete(format!("/api/v1/users/{user_id}"))
            .send()
            .await
            .assert_status_is_ok();

        let resp = cli.get(format!("/api/v1/users/{user_id}/posts")).send().await;
        resp.assert_status_is_ok();
        resp.json().await.value().array().assert_len(0);
    }
}
