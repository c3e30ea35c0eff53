use sea_orm::EntityTrait;
use serde_json::json;

use crate::common::{TestApp, entry, routes};
use server::entity::company;

#[tokio::test]
async fn revenue_beyond_safe_integers_round_trips_exactly() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;

    let id = app
        .create_company(&alice.token, "Huge", "9223372036854775807", 10)
        .await;

    let res = app.get_without_token(&routes::company(&id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["salesRevenue"], "9223372036854775807");
}

#[tokio::test]
async fn integer_revenue_is_accepted_and_returned_as_string() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;

    let res = app
        .post_with_token(
            routes::COMPANIES,
            &json!({
                "name": "Toss",
                "content": "Payments",
                "salesRevenue": 1_000_000_000_000i64,
                "employeeCnt": 50,
            }),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["salesRevenue"], "1000000000000");
}

#[tokio::test]
async fn revenue_out_of_range_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;

    for revenue in [json!("9223372036854775808"), json!(-1), json!("12.5")] {
        let res = app
            .post_with_token(
                routes::COMPANIES,
                &json!({
                    "name": "Bad",
                    "content": "Bad",
                    "salesRevenue": revenue,
                    "employeeCnt": 1,
                }),
                &alice.token,
            )
            .await;
        assert_eq!(res.status, 400, "{revenue}: {}", res.text);
    }
}

#[tokio::test]
async fn creating_a_company_requires_auth() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::COMPANIES,
            &json!({"name": "A", "content": "A", "salesRevenue": "1", "employeeCnt": 1}),
        )
        .await;

    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn categories_are_attached_and_replaced() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let fintech = app.create_category(&alice.token, "Fintech").await;
    let ai = app.create_category(&alice.token, "AI").await;

    let res = app
        .post_with_token(
            routes::COMPANIES,
            &json!({
                "name": "Toss",
                "content": "Payments",
                "salesRevenue": "10",
                "employeeCnt": 5,
                "categoryIds": [fintech],
            }),
            &alice.token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["category"][0]["category"], "Fintech");
    let id = res.id();

    let res = app
        .patch_with_token(&routes::company(&id), &json!({"categoryIds": [ai]}), &alice.token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let category = res.body["category"].as_array().unwrap();
    assert_eq!(category.len(), 1);
    assert_eq!(category[0]["id"], ai);
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;

    let res = app
        .post_with_token(
            routes::COMPANIES,
            &json!({
                "name": "Toss",
                "content": "Payments",
                "salesRevenue": "10",
                "employeeCnt": 5,
                "categoryIds": [uuid::Uuid::now_v7()],
            }),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let id = app.create_company(&alice.token, "Toss", "100", 5).await;

    let res = app
        .patch_with_token(
            &routes::company(&id),
            &json!({"employeeCnt": 7, "salesRevenue": "200"}),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["name"], "Toss");
    assert_eq!(res.body["employeeCnt"], 7);
    assert_eq!(res.body["salesRevenue"], "200");
}

#[tokio::test]
async fn soft_deleted_company_is_hidden_but_kept() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice@example.com").await;
    let kept = app.create_company(&alice.token, "Kept", "1", 1).await;
    let gone = app.create_company(&alice.token, "Gone", "2", 2).await;

    app.delete_company(&alice.token, &gone).await;

    let res = app.get_without_token(&routes::company(&gone)).await;
    assert_eq!(res.status, 404);

    let res = app
        .patch_with_token(&routes::company(&gone), &json!({"name": "Back"}), &alice.token)
        .await;
    assert_eq!(res.status, 404);

    let res = app.get_without_token(routes::COMPANIES).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    entry(&res.body, &kept);

    let row = company::Entity::find_by_id(uuid::Uuid::parse_str(&gone).unwrap())
        .one(&app.db)
        .await
        .unwrap()
        .expect("soft-deleted row should still exist");
    assert!(row.deleted_at.is_some());
}
