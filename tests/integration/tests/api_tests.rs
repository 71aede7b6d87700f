//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Datelike, Utc};
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use yamdb_core::entities::Role;

/// Category plus two genres created by a fresh admin
async fn catalogue(server: &TestServer) -> (String, SlugItem, SlugItem, SlugItem) {
    let admin = server.admin_token().await.unwrap();
    let category = SlugItem::unique("category");
    let drama = SlugItem::unique("drama");
    let scifi = SlugItem::unique("scifi");

    let response = server.post("/categories", Some(&admin), &category).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    for genre in [&drama, &scifi] {
        let response = server.post("/genres", Some(&admin), genre).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    (admin, category, drama, scifi)
}

async fn create_title(server: &TestServer) -> (String, i64) {
    let (admin, category, drama, _) = catalogue(server).await;
    let request = TitleRequest::new(1965, &category, &[&drama]);
    let response = server.post("/titles", Some(&admin), &request).await.unwrap();
    let title: TitleWriteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (admin, title.id)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_and_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();

    let response = server.post("/auth/signup", None, &signup).await.unwrap();
    let echo: SignupResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(echo.username, signup.username);
    assert_eq!(echo.email, signup.email);

    // wrong code: no token, code still usable
    let wrong = TokenRequest {
        username: signup.username.clone(),
        confirmation_code: "0-deadbeef".to_string(),
    };
    let response = server.post("/auth/token", None, &wrong).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let request = TokenRequest {
        username: signup.username.clone(),
        confirmation_code: server.last_code(&signup.email).unwrap(),
    };
    let response = server.post("/auth/token", None, &request).await.unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let claims = server
        .state
        .service_context()
        .jwt_service()
        .validate_access_token(&token.token)
        .unwrap();
    let response = server.get("/users/me", Some(&token.token)).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.username, signup.username);
    assert!(claims.user_id().is_ok());

    // the exchange stamped last_login, so the same code no longer verifies
    let response = server.post("/auth/token", None, &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_trailing_slash_urls() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();

    let response = server.post("/auth/signup/", None, &signup).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let request = TokenRequest {
        username: signup.username.clone(),
        confirmation_code: server.last_code(&signup.email).unwrap(),
    };
    let response = server.post("/auth/token/", None, &request).await.unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get("/users/me/", Some(&token.token)).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.username, signup.username);

    let response = server.get("/titles/", None).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_repeated_signup_sends_new_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();

    for _ in 0..2 {
        let response = server.post("/auth/signup", None, &signup).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let sent = server
        .mailer
        .sent()
        .into_iter()
        .filter(|m| m.to == signup.email)
        .count();
    assert_eq!(sent, 2);
}

#[tokio::test]
async fn test_signup_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    let response = server.post("/auth/signup", None, &signup).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // same email, other username
    let other = SignupRequest {
        username: SignupRequest::unique().username,
        ..signup.clone()
    };
    let response = server.post("/auth/signup", None, &other).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // reserved username
    let reserved = SignupRequest {
        username: "me".to_string(),
        ..SignupRequest::unique()
    };
    let response = server.post("/auth/signup", None, &reserved).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body.error.details.unwrap().get("username").is_some());
}

#[tokio::test]
async fn test_token_for_unknown_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = TokenRequest {
        username: format!("ghost{}", unique_suffix()),
        confirmation_code: "whatever".to_string(),
    };
    let response = server.post("/auth/token", None, &request).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_invalid_bearer_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users/me", None).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/users/me", Some("not-a-jwt")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // a bad token on a public endpoint is still rejected
    let response = server.get("/titles", Some("not-a-jwt")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_me_role_is_read_only_for_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server
        .signup_and_login(&SignupRequest::unique())
        .await
        .unwrap();

    let body = json!({"role": "admin", "bio": "just reading"});
    let response = server.patch("/users/me", Some(&token), &body).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.role, "user");
    assert_eq!(me.bio.as_deref(), Some("just reading"));

    let response = server.get("/users/me", Some(&token)).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.role, "user");
}

#[tokio::test]
async fn test_admin_manages_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let username = format!("managed{}", unique_suffix());

    let body = json!({"username": username, "email": format!("{username}@example.com"), "role": "moderator"});
    let response = server.post("/users", Some(&admin), &body).await.unwrap();
    let created: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.role, "moderator");

    // duplicate username
    let response = server.post("/users", Some(&admin), &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get(&format!("/users?search={username}"), Some(&admin))
        .await
        .unwrap();
    let page: Paginated<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 1);

    let path = format!("/users/{username}");
    let response = server
        .patch(&path, Some(&admin), &json!({"role": "user"}))
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.role, "user");

    let response = server.delete(&path, Some(&admin)).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    let response = server.get(&path, Some(&admin)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_users_endpoint_forbidden_for_moderator() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, moderator) = server.user_with_role(Role::Moderator).await.unwrap();

    let response = server.get("/users", Some(&moderator)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Catalogue Tests
// ============================================================================

#[tokio::test]
async fn test_category_permissions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = server.user_with_role(Role::User).await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let category = SlugItem::unique("films");

    let response = server.post("/categories", None, &category).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    let response = server.post("/categories", Some(&user), &category).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.post("/categories", Some(&admin), &category).await.unwrap();
    let created: SlugItem = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created, category);

    let response = server.post("/categories", Some(&admin), &category).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get(&format!("/categories?search={}", category.name), None)
        .await
        .unwrap();
    let page: Paginated<SlugItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.results, vec![category.clone()]);

    let path = format!("/categories/{}", category.slug);
    let response = server.delete(&path, Some(&user)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    let response = server.delete(&path, Some(&admin)).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    let response = server.delete(&path, Some(&admin)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_genre_admin_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.admin_token().await.unwrap();
    let genre = SlugItem::unique("noir");

    let response = server.post("/genres", Some(&admin), &genre).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/genres/{}", genre.slug);
    let response = server.delete(&path, Some(&admin)).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Title Tests
// ============================================================================

#[tokio::test]
async fn test_title_shapes_and_filters() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, category, drama, scifi) = catalogue(&server).await;

    let request = TitleRequest::new(1972, &category, &[&scifi, &drama]);
    let response = server.post("/titles", Some(&admin), &request).await.unwrap();
    let written: TitleWriteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(written.category.as_deref(), Some(category.slug.as_str()));
    assert_eq!(written.genre, vec![scifi.slug.clone(), drama.slug.clone()]);

    let response = server.get(&format!("/titles/{}", written.id), None).await.unwrap();
    let read: TitleReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(read.rating, None);
    assert_eq!(read.category, Some(category.clone()));
    assert_eq!(read.genre.len(), 2);

    let response = server
        .get(&format!("/titles?genre={}&year=1972", drama.slug), None)
        .await
        .unwrap();
    let page: Paginated<TitleReadResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].id, written.id);

    let response = server
        .get(&format!("/titles?category={}&year=1900", category.slug), None)
        .await
        .unwrap();
    let page: Paginated<TitleReadResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 0);
}

#[tokio::test]
async fn test_title_year_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, category, drama, _) = catalogue(&server).await;

    let request = TitleRequest::new(Utc::now().year() + 1, &category, &[&drama]);
    let response = server.post("/titles", Some(&admin), &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body.error.details.unwrap().get("year").is_some());

    let request = TitleRequest::new(Utc::now().year(), &category, &[&drama]);
    let response = server.post("/titles", Some(&admin), &request).await.unwrap();
    let title: TitleWriteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/titles/{}", title.id);
    let body = json!({"year": Utc::now().year() + 5});
    let response = server.patch(&path, Some(&admin), &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_title_unknown_slug_and_put() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, category, drama, _) = catalogue(&server).await;

    let mut request = TitleRequest::new(2001, &category, &[&drama]);
    request.category = format!("missing-{}", unique_suffix());
    let response = server.post("/titles", Some(&admin), &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body.error.details.unwrap().get("category").is_some());

    let request = TitleRequest::new(2001, &category, &[&drama]);
    let response = server.post("/titles", Some(&admin), &request).await.unwrap();
    let title: TitleWriteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/titles/{}", title.id);

    // PUT needs the whole body
    let response = server
        .put(&path, Some(&admin), &json!({"name": "Renamed"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .patch(&path, Some(&admin), &json!({"name": "Renamed"}))
        .await
        .unwrap();
    let patched: TitleWriteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(patched.name, "Renamed");
    assert_eq!(patched.year, 2001);

    let (_, user) = server.user_with_role(Role::User).await.unwrap();
    let response = server.delete(&path, Some(&user)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_pagination_links() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, category, drama, _) = catalogue(&server).await;
    for _ in 0..3 {
        let request = TitleRequest::new(1999, &category, &[&drama]);
        let response = server.post("/titles", Some(&admin), &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let filter = format!("category={}", category.slug);
    let response = server
        .get(&format!("/titles?{filter}&limit=2"), None)
        .await
        .unwrap();
    let page: Paginated<TitleReadResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 3);
    assert_eq!(page.results.len(), 2);
    assert_eq!(
        page.next.as_deref(),
        Some(format!("/api/v1/titles?{filter}&limit=2&offset=2").as_str())
    );
    assert!(page.previous.is_none());

    let response = server
        .get(&format!("/titles?{filter}&limit=2&offset=2"), None)
        .await
        .unwrap();
    let page: Paginated<TitleReadResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.results.len(), 1);
    assert!(page.next.is_none());
    assert_eq!(
        page.previous.as_deref(),
        Some(format!("/api/v1/titles?{filter}&limit=2").as_str())
    );
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_review_score_bounds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, title_id) = create_title(&server).await;
    let path = format!("/titles/{title_id}/reviews");

    for score in [0, 11] {
        let (_, token) = server.user_with_role(Role::User).await.unwrap();
        let response = server
            .post(&path, Some(&token), &ReviewRequest::new(score))
            .await
            .unwrap();
        let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert!(body.error.details.unwrap().get("score").is_some());
    }

    for score in [1, 10] {
        let (_, token) = server.user_with_role(Role::User).await.unwrap();
        let response = server
            .post(&path, Some(&token), &ReviewRequest::new(score))
            .await
            .unwrap();
        let review: ReviewResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(review.score, score as i16);
    }
}

#[tokio::test]
async fn test_one_review_per_title_and_rating() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, title_id) = create_title(&server).await;
    let path = format!("/titles/{title_id}/reviews");
    let (author, first) = server.user_with_role(Role::User).await.unwrap();
    let (_, second) = server.user_with_role(Role::User).await.unwrap();

    let response = server.post(&path, Some(&first), &ReviewRequest::new(10)).await.unwrap();
    let review: ReviewResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(review.author, author);

    let response = server.post(&path, Some(&first), &ReviewRequest::new(3)).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "DUPLICATE_REVIEW");

    let response = server.post(&path, Some(&second), &ReviewRequest::new(7)).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&format!("/titles/{title_id}"), None).await.unwrap();
    let title: TitleReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(title.rating, Some(8));

    let response = server.get(&path, None).await.unwrap();
    let page: Paginated<ReviewResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 2);
}

#[tokio::test]
async fn test_review_object_permissions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, title_id) = create_title(&server).await;
    let (_, author) = server.user_with_role(Role::User).await.unwrap();
    let (_, stranger) = server.user_with_role(Role::User).await.unwrap();
    let (_, moderator) = server.user_with_role(Role::Moderator).await.unwrap();

    let response = server
        .post(&format!("/titles/{title_id}/reviews"), Some(&author), &ReviewRequest::new(6))
        .await
        .unwrap();
    let review: ReviewResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/titles/{title_id}/reviews/{}", review.id);

    let response = server
        .patch(&path, Some(&stranger), &json!({"score": 9}))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    let response = server.patch(&path, None, &json!({"score": 9})).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .patch(&path, Some(&author), &json!({"score": 9}))
        .await
        .unwrap();
    let updated: ReviewResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.score, 9);
    assert_eq!(updated.text, review.text);

    let response = server.delete(&path, Some(&moderator)).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    let response = server.get(&path, None).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reviews_of_missing_title() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/titles/987654321/reviews", None).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/titles/not-a-number/reviews", None).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, title_id) = create_title(&server).await;
    let (_, reviewer) = server.user_with_role(Role::User).await.unwrap();
    let (commenter_name, commenter) = server.user_with_role(Role::User).await.unwrap();

    let response = server
        .post(&format!("/titles/{title_id}/reviews"), Some(&reviewer), &ReviewRequest::new(8))
        .await
        .unwrap();
    let review: ReviewResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let comments = format!("/titles/{title_id}/reviews/{}/comments", review.id);

    let body = CommentRequest {
        text: "Agreed".to_string(),
    };
    let response = server.post(&comments, None, &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.post(&comments, Some(&commenter), &body).await.unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.author, commenter_name);

    let path = format!("{comments}/{}", comment.id);
    let response = server
        .put(&path, Some(&reviewer), &json!({"text": "hijacked"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put(&path, Some(&commenter), &json!({"text": "Strongly agreed"}))
        .await
        .unwrap();
    let updated: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.text, "Strongly agreed");

    let response = server.get(&comments, None).await.unwrap();
    let page: Paginated<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 1);

    // the review must belong to the title in the path
    let (_, other_title) = create_title(&server).await;
    let response = server
        .get(&format!("/titles/{other_title}/reviews/{}/comments", review.id), None)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_title_delete_cascades() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, title_id) = create_title(&server).await;
    let (_, reader) = server.user_with_role(Role::User).await.unwrap();

    let response = server
        .post(&format!("/titles/{title_id}/reviews"), Some(&reader), &ReviewRequest::new(5))
        .await
        .unwrap();
    let review: ReviewResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let response = server
        .post(
            &format!("/titles/{title_id}/reviews/{}/comments", review.id),
            Some(&reader),
            &CommentRequest {
                text: "first".to_string(),
            },
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete(&format!("/titles/{title_id}"), Some(&admin))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let ctx = server.state.service_context();
    assert!(ctx
        .review_repo()
        .find_in_title(title_id, review.id)
        .await
        .unwrap()
        .is_none());
    assert!(ctx
        .comment_repo()
        .find_in_review(review.id, comment.id)
        .await
        .unwrap()
        .is_none());
}
