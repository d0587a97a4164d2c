//! End-to-end conformance tests for the Quill blog API.
//!
//! Each test spawns an ephemeral in-process server (real TCP, real HTTP) via
//! [`quill_conformance::spawn_server`] and exercises the API with a `reqwest`
//! client. A few tests repeat the critical flows over SQLite through
//! [`quill_conformance::spawn_with_storage`].
//!
//! # Coverage
//!
//! | Test | Area |
//! |------|------|
//! | `health_returns_ok` | liveness |
//! | `create_post_and_fetch_by_id` | posts create/get |
//! | `create_post_ignores_client_id` | server-assigned ids |
//! | `invalid_post_returns_validation_error` | post field rules |
//! | `duplicate_title_returns_409` | title uniqueness |
//! | `list_posts_defaults` | paging defaults |
//! | `list_posts_pagination_and_sort` | paging + sort |
//! | `list_posts_clamps_page_size` | max page size |
//! | `list_posts_unknown_sort_returns_400` | sort validation |
//! | `update_post_overwrites_fields` | posts update |
//! | `delete_post_returns_204_then_404` | posts delete |
//! | `delete_post_cascades_to_comments` | cascade delete |
//! | `create_comment_then_list` | comments create/list |
//! | `list_comments_for_post_without_comments_is_empty` | empty listing |
//! | `comment_operations_on_unknown_post_return_404` | post existence |
//! | `comment_through_wrong_post_returns_400` | ownership |
//! | `update_comment_keeps_id_and_post` | comments update |
//! | `delete_comment_returns_204` | comments delete |
//! | `invalid_comment_returns_validation_error` | comment field rules |
//! | `malformed_json_returns_400` | request decoding |
//! | `sqlite_*` | same flows over SQLite |

use std::sync::Arc;

use quill_api::{CommentDto, ErrorResponse, PostDto, PostPage};
use quill_conformance::{spawn_server, spawn_with_storage};
use quill_server::{SqliteStorage, Storage};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap()
}

fn post_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": format!("All about {title}"),
        "content": "Conformance content.",
    })
}

fn comment_body(name: &str) -> Value {
    json!({ "name": name, "email": "a@x.com", "body": "hi" })
}

async fn create_post(client: &reqwest::Client, base: &str, title: &str) -> PostDto {
    let resp = client
        .post(format!("{base}/api/posts"))
        .json(&post_body(title))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "create post should return 201");
    resp.json().await.unwrap()
}

async fn create_comment(
    client: &reqwest::Client,
    base: &str,
    post_id: i64,
    name: &str,
) -> CommentDto {
    let resp = client
        .post(format!("{base}/api/posts/{post_id}/comments"))
        .json(&comment_body(name))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "create comment should return 201");
    resp.json().await.unwrap()
}

async fn spawn_sqlite() -> String {
    let storage = SqliteStorage::open_in_memory().expect("open in-memory SQLite");
    spawn_with_storage(Arc::new(storage) as Arc<dyn Storage>).await
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_ok() {
    let (base, _storage) = spawn_server().await;
    let resp = make_client()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_post_and_fetch_by_id() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();

    let created = create_post(&client, &base, "Hello Quill").await;
    let id = created.id.expect("server assigns id");

    let resp = client
        .get(format!("{base}/api/posts/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: PostDto = resp.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_post_ignores_client_id() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();

    let mut body = post_body("Client id");
    body["id"] = json!(999);
    let resp = client
        .post(format!("{base}/api/posts"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: PostDto = resp.json().await.unwrap();
    assert_eq!(created.id, Some(1));
}

#[tokio::test]
async fn invalid_post_returns_validation_error() {
    let (base, _storage) = spawn_server().await;
    let resp = make_client()
        .post(format!("{base}/api/posts"))
        .json(&json!({ "title": "A", "description": "tiny", "content": " " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let err: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(err.code, "validation_failed");
    let fields = err.fields.expect("fields present");
    for f in ["title", "description", "content"] {
        assert!(fields.contains_key(f), "missing field {f}");
    }
}

#[tokio::test]
async fn duplicate_title_returns_409() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();

    create_post(&client, &base, "Unique").await;
    let resp = client
        .post(format!("{base}/api/posts"))
        .json(&post_body("Unique"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let err: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(err.code, "conflict");
}

#[tokio::test]
async fn list_posts_defaults() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    for i in 0..12 {
        create_post(&client, &base, &format!("Post {i:02}")).await;
    }

    let page: PostPage = client
        .get(format!("{base}/api/posts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.page_no, 0);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.content.len(), 10);
    assert_eq!(page.total_elements, 12);
    assert_eq!(page.total_pages, 2);
    assert!(!page.last);
    assert_eq!(page.content[0].id, Some(1));
}

#[tokio::test]
async fn list_posts_pagination_and_sort() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    for t in ["delta", "alpha", "charlie", "bravo"] {
        create_post(&client, &base, t).await;
    }

    let page: PostPage = client
        .get(format!(
            "{base}/api/posts?page_no=1&page_size=2&sort_by=title&sort_dir=asc"
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = page.content.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["charlie", "delta"]);
    assert_eq!(page.page_no, 1);
    assert!(page.last);

    let page: PostPage = client
        .get(format!("{base}/api/posts?sort_by=id&sort_dir=desc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<Option<i64>> = page.content.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![Some(4), Some(3), Some(2), Some(1)]);
}

#[tokio::test]
async fn list_posts_clamps_page_size() {
    let (base, _storage) = spawn_server().await;
    let page: PostPage = make_client()
        .get(format!("{base}/api/posts?page_size=1000"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.page_size, 100);
    assert!(page.content.is_empty());
    assert_eq!(page.total_pages, 0);
    assert!(page.last);
}

#[tokio::test]
async fn list_posts_unknown_sort_returns_400() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    for query in ["sort_by=author", "sort_dir=sideways", "page_no=-1"] {
        let resp = client
            .get(format!("{base}/api/posts?{query}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "query {query}");
    }
}

#[tokio::test]
async fn update_post_overwrites_fields() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    let id = create_post(&client, &base, "Draft").await.id.unwrap();

    let resp = client
        .put(format!("{base}/api/posts/{id}"))
        .json(&json!({
            "title": "Published",
            "description": "Now with a real description",
            "content": "Final text.",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: PostDto = resp.json().await.unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.title, "Published");
    assert_eq!(updated.content, "Final text.");

    let resp = client
        .put(format!("{base}/api/posts/999"))
        .json(&post_body("Ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_post_returns_204_then_404() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    let id = create_post(&client, &base, "Short lived").await.id.unwrap();

    let resp = client
        .delete(format!("{base}/api/posts/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/api/posts/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let err: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(err.error, format!("Post not found with id : '{id}'"));
}

#[tokio::test]
async fn delete_post_cascades_to_comments() {
    let (base, storage) = spawn_server().await;
    let client = make_client();
    let id = create_post(&client, &base, "With comments").await.id.unwrap();
    let c = create_comment(&client, &base, id, "A").await.id.unwrap();

    client
        .delete(format!("{base}/api/posts/{id}"))
        .send()
        .await
        .unwrap();

    assert!(storage.find_comment_by_id(c).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_comment_then_list() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    let post_id = create_post(&client, &base, "Commented").await.id.unwrap();

    let created = create_comment(&client, &base, post_id, "A").await;
    assert!(created.id.is_some());
    assert_eq!(created.body, "hi");

    let list: Vec<CommentDto> = client
        .get(format!("{base}/api/posts/{post_id}/comments"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, vec![created.clone()]);

    let post: PostDto = client
        .get(format!("{base}/api/posts/{post_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(post.comments, vec![created]);
}

#[tokio::test]
async fn list_comments_for_post_without_comments_is_empty() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    let post_id = create_post(&client, &base, "Quiet").await.id.unwrap();

    let resp = client
        .get(format!("{base}/api/posts/{post_id}/comments"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let list: Vec<CommentDto> = resp.json().await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn comment_operations_on_unknown_post_return_404() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    let post_id = create_post(&client, &base, "Real").await.id.unwrap();
    let c = create_comment(&client, &base, post_id, "A").await.id.unwrap();

    let requests = vec![
        client
            .post(format!("{base}/api/posts/99/comments"))
            .json(&comment_body("B")),
        client.get(format!("{base}/api/posts/99/comments")),
        client.get(format!("{base}/api/posts/99/comments/{c}")),
        client
            .put(format!("{base}/api/posts/99/comments/{c}"))
            .json(&comment_body("B")),
        client.delete(format!("{base}/api/posts/99/comments/{c}")),
    ];
    for req in requests {
        let resp = req.send().await.unwrap();
        assert_eq!(resp.status(), 404);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.error, "Post not found with id : '99'");
    }
}

#[tokio::test]
async fn comment_through_wrong_post_returns_400() {
    let (base, storage) = spawn_server().await;
    let client = make_client();
    let p1 = create_post(&client, &base, "Owner").await.id.unwrap();
    let p2 = create_post(&client, &base, "Stranger").await.id.unwrap();
    let c = create_comment(&client, &base, p1, "A").await.id.unwrap();

    let requests = vec![
        client.get(format!("{base}/api/posts/{p2}/comments/{c}")),
        client
            .put(format!("{base}/api/posts/{p2}/comments/{c}"))
            .json(&comment_body("B")),
        client.delete(format!("{base}/api/posts/{p2}/comments/{c}")),
    ];
    for req in requests {
        let resp = req.send().await.unwrap();
        assert_eq!(resp.status(), 400);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.code, "bad_request");
        assert_eq!(err.error, "Comment does not belong to a post");
    }

    let stored = storage.find_comment_by_id(c).await.unwrap().unwrap();
    assert_eq!(stored.name, "A");
    assert_eq!(stored.post_id, p1);
}

#[tokio::test]
async fn update_comment_keeps_id_and_post() {
    let (base, storage) = spawn_server().await;
    let client = make_client();
    let post_id = create_post(&client, &base, "Editable").await.id.unwrap();
    let c = create_comment(&client, &base, post_id, "A").await.id.unwrap();

    let resp = client
        .put(format!("{base}/api/posts/{post_id}/comments/{c}"))
        .json(&json!({ "id": 555, "name": "B", "email": "b@x.com", "body": "edited" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: CommentDto = resp.json().await.unwrap();
    assert_eq!(updated.id, Some(c));
    assert_eq!(updated.name, "B");

    let stored = storage.find_comment_by_id(c).await.unwrap().unwrap();
    assert_eq!(stored.name, "B");
    assert_eq!(stored.post_id, post_id);
}

#[tokio::test]
async fn delete_comment_returns_204() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    let post_id = create_post(&client, &base, "Pruned").await.id.unwrap();
    let c = create_comment(&client, &base, post_id, "A").await.id.unwrap();

    let resp = client
        .delete(format!("{base}/api/posts/{post_id}/comments/{c}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/api/posts/{post_id}/comments/{c}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let err: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(err.error, format!("Comment not found with id : '{c}'"));
}

#[tokio::test]
async fn invalid_comment_returns_validation_error() {
    let (base, _storage) = spawn_server().await;
    let client = make_client();
    let post_id = create_post(&client, &base, "Strict").await.id.unwrap();

    let resp = client
        .post(format!("{base}/api/posts/{post_id}/comments"))
        .json(&json!({ "name": "", "email": "nope", "body": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let err: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(err.code, "validation_failed");
    let fields = err.fields.unwrap();
    for f in ["name", "email", "body"] {
        assert!(fields.contains_key(f), "missing field {f}");
    }
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let (base, _storage) = spawn_server().await;
    let resp = make_client()
        .post(format!("{base}/api/posts"))
        .header("content-type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let err: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(err.code, "bad_request");
}

// ---------------------------------------------------------------------------
// SQLite backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlite_post_and_comment_lifecycle() {
    let base = spawn_sqlite().await;
    let client = make_client();

    let post_id = create_post(&client, &base, "Persistent").await.id.unwrap();
    let c = create_comment(&client, &base, post_id, "A").await.id.unwrap();

    let resp = client
        .put(format!("{base}/api/posts/{post_id}/comments/{c}"))
        .json(&json!({ "name": "B", "email": "b@x.com", "body": "edited" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let post: PostDto = client
        .get(format!("{base}/api/posts/{post_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].name, "B");
}

#[tokio::test]
async fn sqlite_duplicate_title_and_cascade() {
    let base = spawn_sqlite().await;
    let client = make_client();

    let post_id = create_post(&client, &base, "Only once").await.id.unwrap();
    let resp = client
        .post(format!("{base}/api/posts"))
        .json(&post_body("Only once"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let c = create_comment(&client, &base, post_id, "A").await.id.unwrap();
    let resp = client
        .delete(format!("{base}/api/posts/{post_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    // Recreate a post; the old comment must not reappear under any post.
    let new_id = create_post(&client, &base, "Replacement").await.id.unwrap();
    let resp = client
        .get(format!("{base}/api/posts/{new_id}/comments/{c}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
