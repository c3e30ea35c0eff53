use serde_json::json;

use crate::common::{PASSWORD, TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "Alice@Example.com",
                    "password": PASSWORD,
                    "name": "Alice",
                    "nickname": "alice",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_string());
        assert_eq!(res.body["email"], "alice@example.com");
        assert!(res.body.get("password").is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let app = TestApp::spawn().await;
        app.create_user("alice@example.com").await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "password": PASSWORD,
                    "name": "Other",
                    "nickname": "other",
                }),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "password": "short",
                    "name": "Alice",
                    "nickname": "alice",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::REGISTER, &json!({"email": 42}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_user("alice@example.com").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "alice@example.com", "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn token_identifies_the_user() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice@example.com").await;

        let res = app.get_with_token(routes::ME, &alice.token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], alice.id);
    }

    #[tokio::test]
    async fn missing_and_garbage_tokens_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");

        let res = app.get_with_token(routes::ME, "not-a-jwt").await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn users_update_only_their_own_profile() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice@example.com").await;
        let bob = app.create_user("bob@example.com").await;

        let res = app
            .patch_with_token(
                &routes::profile(&alice.id),
                &json!({"nickname": "ally"}),
                &alice.token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["nickname"], "ally");

        let res = app
            .patch_with_token(
                &routes::profile(&alice.id),
                &json!({"nickname": "hacked"}),
                &bob.token,
            )
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn changed_password_is_hashed_and_usable() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice@example.com").await;

        let res = app
            .patch_with_token(
                &routes::profile(&alice.id),
                &json!({"password": "a-brand-new-password"}),
                &alice.token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "alice@example.com", "password": "a-brand-new-password"}),
            )
            .await;
        assert_eq!(res.status, 200);
    }

    #[tokio::test]
    async fn unknown_profile_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::profile(&uuid::Uuid::now_v7().to_string()))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleted_user_disappears_and_cannot_authenticate() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice@example.com").await;
        let bob = app.create_user("bob@example.com").await;

        let res = app.delete_with_token(&routes::user(&alice.id), &alice.token).await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app.get_with_token(routes::ME, &alice.token).await;
        assert_eq!(res.status, 401);

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "alice@example.com", "password": PASSWORD}),
            )
            .await;
        assert_eq!(res.status, 401);

        let res = app.get_with_token(routes::USERS, &bob.token).await;
        assert_eq!(res.status, 200);
        let users = res.body.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["id"], bob.id);
    }

    #[tokio::test]
    async fn cannot_delete_someone_else() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice@example.com").await;
        let bob = app.create_user("bob@example.com").await;

        let res = app.delete_with_token(&routes::user(&alice.id), &bob.token).await;

        assert_eq!(res.status, 403);
    }
}
