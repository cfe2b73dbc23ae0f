mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_todo_success() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;

    let response = app
        .post_authenticated("/api/todos", &session.access_token)
        .json(&json!({
            "title": "Buy milk",
            "description": "Two litres"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Buy milk");
    assert_eq!(body["data"]["description"], "Two litres");
    assert_eq!(body["data"]["done"], false);
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_create_todo_blank_title() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;

    let response = app
        .post_authenticated("/api/todos", &session.access_token)
        .json(&json!({
            "title": "  ",
            "description": "Desc"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_todos_require_authentication() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/todos")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_todos_paginates_newest_first() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;

    for title in ["first", "second", "third"] {
        app.create_todo(&session.access_token, title).await;
    }

    let response = app
        .get_authenticated("/api/todos?limit=2&offset=0", &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "third");
    assert_eq!(items[1]["title"], "second");
    assert_eq!(body["data"]["pagination"]["limit"], 2);
    assert_eq!(body["data"]["pagination"]["offset"], 0);
    assert_eq!(body["data"]["pagination"]["count"], 2);
}

#[tokio::test]
async fn test_list_todos_default_limit() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;

    let response = app
        .get_authenticated("/api/todos", &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["pagination"]["limit"], 10);
    assert_eq!(body["data"]["pagination"]["count"], 0);
}

#[tokio::test]
async fn test_list_todos_limit_out_of_range() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;

    let response = app
        .get_authenticated("/api/todos?limit=51", &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_todos_malformed_query_uses_error_envelope() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;

    for query in ["limit=abc", "offset=-1", "limit=-5"] {
        let response = app
            .get_authenticated(&format!("/api/todos?{}", query), &session.access_token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", query);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status_code"], 422);
        assert!(body["data"]["message"].is_string());
    }
}

#[tokio::test]
async fn test_list_only_shows_own_todos() {
    let app = TestApp::spawn().await;
    let alice = app.register("Alice", "alice@example.com").await;
    let bob = app.register("Bob", "bob@example.com").await;

    app.create_todo(&alice.access_token, "alice's").await;

    let response = app
        .get_authenticated("/api/todos", &bob.access_token)
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["pagination"]["count"], 0);
}

#[tokio::test]
async fn test_get_foreign_todo_is_forbidden() {
    let app = TestApp::spawn().await;
    let alice = app.register("Alice", "alice@example.com").await;
    let bob = app.register("Bob", "bob@example.com").await;
    let todo_id = app.create_todo(&alice.access_token, "private").await;

    let path = format!("/api/todos/{}", todo_id);

    let get = app
        .get_authenticated(&path, &bob.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(get.status(), StatusCode::FORBIDDEN);

    let patch = app
        .patch_authenticated(&path, &bob.access_token)
        .json(&json!({ "done": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(patch.status(), StatusCode::FORBIDDEN);

    let delete = app
        .delete_authenticated(&path, &bob.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_missing_todo() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;

    let path = format!("/api/todos/{}", uuid::Uuid::new_v4());
    let response = app
        .get_authenticated(&path, &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let malformed = app
        .get_authenticated("/api/todos/not-a-uuid", &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(malformed.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_done_todo_rejects_edits() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;
    let todo_id = app.create_todo(&session.access_token, "Sample").await;
    let path = format!("/api/todos/{}", todo_id);

    let done = app
        .patch_authenticated(&path, &session.access_token)
        .json(&json!({ "done": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(done.status(), StatusCode::OK);

    let edit = app
        .patch_authenticated(&path, &session.access_token)
        .json(&json!({ "title": "X" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(edit.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = edit.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Done items can only be unchecked or deleted"
    );

    let unchanged = app
        .get_authenticated(&path, &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = unchanged.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Sample");
    assert_eq!(body["data"]["done"], true);
}

#[tokio::test]
async fn test_unmark_and_edit_in_one_patch() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;
    let todo_id = app.create_todo(&session.access_token, "Sample").await;
    let path = format!("/api/todos/{}", todo_id);

    app.patch_authenticated(&path, &session.access_token)
        .json(&json!({ "done": true }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .patch_authenticated(&path, &session.access_token)
        .json(&json!({ "title": "X", "done": false }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "X");
    assert_eq!(body["data"]["done"], false);
}

#[tokio::test]
async fn test_empty_patch_is_bad_request() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;
    let todo_id = app.create_todo(&session.access_token, "Sample").await;

    let response = app
        .patch_authenticated(&format!("/api/todos/{}", todo_id), &session.access_token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_todo() {
    let app = TestApp::spawn().await;
    let session = app.register("Alice", "alice@example.com").await;
    let todo_id = app.create_todo(&session.access_token, "Sample").await;
    let path = format!("/api/todos/{}", todo_id);

    let response = app
        .delete_authenticated(&path, &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["success"], true);

    let gone = app
        .get_authenticated(&path, &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL on DATABASE_URL"]
async fn test_postgres_done_todo_rejects_edits() {
    let app = TestApp::spawn_with_postgres().await;
    let session = app.register("Alice", "alice@example.com").await;
    let todo_id = app.create_todo(&session.access_token, "Sample").await;
    let path = format!("/api/todos/{}", todo_id);

    app.patch_authenticated(&path, &session.access_token)
        .json(&json!({ "done": true }))
        .send()
        .await
        .expect("Failed to execute request");

    let edit = app
        .patch_authenticated(&path, &session.access_token)
        .json(&json!({ "description": "changed" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(edit.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let delete = app
        .delete_authenticated("/api/me", &session.access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(delete.status(), StatusCode::OK);
}
