//! HTTP-level tests for the `/api/gallery` resource.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_user, delete_auth, get, get_auth, login, send_multipart, Part, PNG};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_list_and_retrieve(pool: PgPool) {
    let uploader = create_user(&pool, "snapper", false).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "snapper").await;

    let response = send_multipart(
        app.clone(),
        Method::POST,
        "/api/gallery",
        Some(&token),
        &[Part::file("image", "garden.png", PNG), Part::text("caption", "Sunny day")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let image = body_json(response).await;
    assert_eq!(image["caption"], "Sunny day");
    assert_eq!(image["uploaded_by"]["id"], uploader.id);
    assert!(image["image"].as_str().unwrap().starts_with("/media/gallery/"));
    let id = image["id"].as_i64().unwrap();

    let response = get(app.clone(), "/api/gallery").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    // Single images need a login; the listing does not.
    let response = get(app.clone(), &format!("/api/gallery/{id}")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, &format!("/api/gallery/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uploader_comes_from_the_token(pool: PgPool) {
    let uploader = create_user(&pool, "snapper", false).await;
    let other = create_user(&pool, "other", false).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "snapper").await;

    let response = send_multipart(
        app,
        Method::POST,
        "/api/gallery",
        Some(&token),
        &[
            Part::file("image", "garden.png", PNG),
            Part::text("uploaded_by", &other.id.to_string()),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let image = body_json(response).await;
    assert_eq!(image["uploaded_by"]["id"], uploader.id);
    assert_eq!(image["uploaded_by"]["username"], "snapper");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn image_is_required_and_must_be_an_image(pool: PgPool) {
    create_user(&pool, "snapper", false).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "snapper").await;

    let response = send_multipart(
        app.clone(),
        Method::POST,
        "/api/gallery",
        Some(&token),
        &[Part::text("caption", "No file")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "image");

    let response = send_multipart(
        app.clone(),
        Method::POST,
        "/api/gallery",
        Some(&token),
        &[Part::file("image", "notes.txt", b"just some text")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_multipart(
        app,
        Method::POST,
        "/api/gallery",
        None,
        &[Part::file("image", "garden.png", PNG)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn any_user_may_edit_or_remove(pool: PgPool) {
    create_user(&pool, "snapper", false).await;
    create_user(&pool, "visitor", false).await;
    let app = common::build_test_app(pool);
    let snapper = login(&app, "snapper").await;
    let visitor = login(&app, "visitor").await;

    let response = send_multipart(
        app.clone(),
        Method::POST,
        "/api/gallery",
        Some(&snapper),
        &[Part::file("image", "garden.png", PNG)],
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/gallery/{id}");

    let response = send_multipart(
        app.clone(),
        Method::PUT,
        &uri,
        Some(&visitor),
        &[Part::text("caption", "Renamed")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let image = body_json(response).await;
    assert_eq!(image["caption"], "Renamed");
    assert_eq!(image["uploaded_by"]["username"], "snapper");

    let response = delete_auth(app.clone(), &uri, &visitor).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &snapper).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
