use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;

use kanboard::auth::AuthMiddleware;
use kanboard::routes;

mod common;

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    common::remove_user(&pool, "integration@example.com").await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    // Register a new user
    let register_payload = json!({
        "username": "integration_user",
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(status, 201, "Registration failed. Body: {}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "integration@example.com");
    assert!(body["user"].get("passwordHash").is_none());

    let user_id = body["user"]["id"].as_i64().unwrap() as i32;
    let token = body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    // The token decodes back to the created user's identity.
    let claims = kanboard::auth::verify_token(&token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "integration_user");
    assert_eq!(claims.exp - claims.iat, 3600);

    // Registering the same user again conflicts.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username or email already exists");

    // Same email under a different username still conflicts.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({
            "username": "other_user",
            "email": "integration@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // Login with the registered credentials.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({
            "email": "integration@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(status, 200, "Login failed. Body: {}", body);
    assert_eq!(body["message"], "Logged in successfully");
    let login_token = body["token"].as_str().unwrap().to_string();

    // The token opens protected routes.
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .append_header(("Authorization", format!("Bearer {}", login_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["data"]["sub"].as_i64().unwrap() as i32, user_id);

    // No token, garbage token: both rejected.
    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .append_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    common::remove_user(&pool, "integration@example.com").await;
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    common::remove_user(&pool, "enumeration@example.com").await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&json!({
            "username": "enumeration_user",
            "email": "enumeration@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // Wrong password for an existing account.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({
            "email": "enumeration@example.com",
            "password": "WrongPassword123!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let wrong_password_status = resp.status();
    let wrong_password_body = test::read_body(resp).await;

    // Account that does not exist at all.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({
            "email": "nobody@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let unknown_email_status = resp.status();
    let unknown_email_body = test::read_body(resp).await;

    assert_eq!(wrong_password_status, 401);
    assert_eq!(unknown_email_status, 401);
    // Byte-identical bodies: callers cannot tell which part was wrong.
    assert_eq!(wrong_password_body, unknown_email_body);

    common::remove_user(&pool, "enumeration@example.com").await;
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let test_cases = vec![
        (
            json!({ "email": "test@example.com", "password": "Password123!" }),
            "missing username",
        ),
        (
            json!({ "username": "testuser", "password": "Password123!" }),
            "missing email",
        ),
        (
            json!({ "username": "testuser", "email": "test@example.com" }),
            "missing password",
        ),
        (
            json!({ "username": "testuser", "email": "invalid-email", "password": "Password123!" }),
            "invalid email format",
        ),
        (
            json!({ "username": "u", "email": "test@example.com", "password": "Password123!" }),
            "username too short",
        ),
        (
            json!({ "username": "a".repeat(33), "email": "test@example.com", "password": "Password123!" }),
            "username too long",
        ),
        (
            json!({ "username": "user name!", "email": "test@example.com", "password": "Password123!" }),
            "username with invalid chars",
        ),
        (
            json!({ "username": "testuser", "email": "test@example.com", "password": "short" }),
            "password too short",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;

        assert_eq!(
            status,
            400,
            "Test case failed: {}. Got {}. Body: {:?}",
            description,
            status,
            String::from_utf8_lossy(&body)
        );
    }
}
