use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn comment_is_authored_by_the_caller() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let toss = app.create_company(&alice.token, "Toss", "1", 1).await;

    let res = app
        .post_with_token(
            routes::COMMENTS,
            &json!({"companyId": toss, "content": "Great team"}),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["user"]["id"], alice.id);
    assert_eq!(res.body["company"]["name"], "Toss");

    let res = app.get_without_token(&routes::comment(&toss)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn content_length_is_validated() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let toss = app.create_company(&alice.token, "Toss", "1", 1).await;

    for content in [String::new(), "x".repeat(2001)] {
        let res = app
            .post_with_token(
                routes::COMMENTS,
                &json!({"companyId": toss, "content": content}),
                &alice.token,
            )
            .await;
        assert_eq!(res.status, 400);
    }
}

#[tokio::test]
async fn only_the_author_edits_or_deletes() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let bob = app.create_user("bob@example.com").await;
    let toss = app.create_company(&alice.token, "Toss", "1", 1).await;

    let res = app
        .post_with_token(
            routes::COMMENTS,
            &json!({"companyId": toss, "content": "First"}),
            &alice.token,
        )
        .await;
    let id = res.id();

    let res = app
        .patch_with_token(&routes::comment(&id), &json!({"content": "Mine now"}), &bob.token)
        .await;
    assert_eq!(res.status, 403);

    let res = app.delete_with_token(&routes::comment(&id), &bob.token).await;
    assert_eq!(res.status, 403);

    let res = app
        .patch_with_token(&routes::comment(&id), &json!({"content": "Edited"}), &alice.token)
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["content"], "Edited");

    let res = app.delete_with_token(&routes::comment(&id), &alice.token).await;
    assert_eq!(res.status, 200);

    let res = app.get_without_token(routes::COMMENTS).await;
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn comments_of_deleted_companies_are_hidden() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let gone = app.create_company(&alice.token, "Gone", "1", 1).await;

    let res = app
        .post_with_token(
            routes::COMMENTS,
            &json!({"companyId": gone, "content": "Hello"}),
            &alice.token,
        )
        .await;
    assert_eq!(res.status, 201);

    app.delete_company(&alice.token, &gone).await;

    let res = app.get_without_token(routes::COMMENTS).await;
    assert_eq!(res.body, json!([]));

    let res = app.get_without_token(&routes::comment(&gone)).await;
    assert_eq!(res.status, 404);
}
