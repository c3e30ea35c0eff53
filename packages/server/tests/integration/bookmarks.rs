use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn empty_bookmark_list_is_ok() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;

    let res = app.get_with_token(&routes::bookmarks(&alice.id), &alice.token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn bookmark_lifecycle() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let toss = app.create_company(&alice.token, "Toss", "1", 1).await;
    let path = routes::bookmarks(&alice.id);

    let res = app
        .post_with_token(&path, &json!({"companyId": toss}), &alice.token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app
        .post_with_token(&path, &json!({"companyId": toss}), &alice.token)
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "DUPLICATE");

    let res = app.get_with_token(&path, &alice.token).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body[0]["companyId"], toss);
    assert_eq!(res.body[0]["name"], "Toss");

    let res = app
        .delete_with_body(&path, &json!({"companyId": toss}), &alice.token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["deletedAt"].is_string());

    let res = app.get_with_token(&path, &alice.token).await;
    assert_eq!(res.body, json!([]));

    // A removed bookmark can be re-created.
    let res = app
        .post_with_token(&path, &json!({"companyId": toss}), &alice.token)
        .await;
    assert_eq!(res.status, 201);
}

#[tokio::test]
async fn bookmarks_of_other_users_are_forbidden() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let bob = app.create_user("bob@example.com").await;

    let res = app.get_with_token(&routes::bookmarks(&alice.id), &bob.token).await;

    assert_eq!(res.status, 403);
}

#[tokio::test]
async fn deleted_company_cannot_be_bookmarked() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let gone = app.create_company(&alice.token, "Gone", "1", 1).await;
    app.delete_company(&alice.token, &gone).await;

    let res = app
        .post_with_token(&routes::bookmarks(&alice.id), &json!({"companyId": gone}), &alice.token)
        .await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn removing_a_missing_bookmark_is_not_found() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let toss = app.create_company(&alice.token, "Toss", "1", 1).await;

    let res = app
        .delete_with_body(&routes::bookmarks(&alice.id), &json!({"companyId": toss}), &alice.token)
        .await;

    assert_eq!(res.status, 404);
}
