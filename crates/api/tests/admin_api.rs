//! Integration tests for the admin painting endpoints.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, seed_painting, send_auth, send_multipart, viewer_token};
use serde_json::json;
use sqlx::PgPool;

use atelier_db::models::painting::PaintingStatus;
use atelier_db::repositories::PaintingRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/admin/paintings").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_non_admin_roles(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send_auth(app, "GET", "/api/v1/admin/paintings", &viewer_token(), None).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_listing_includes_hidden_paintings(pool: PgPool) {
    seed_painting(&pool, "Public One", "public-one", PaintingStatus::Available, 0).await;
    seed_painting(&pool, "Drafts Only", "drafts-only", PaintingStatus::Hidden, 10).await;

    let app = common::build_test_app(pool);
    let response = send_auth(app, "GET", "/api/v1/admin/paintings", &admin_token(), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let slugs: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["public-one", "drafts-only"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_painting_uploads_blob_and_derives_slug(pool: PgPool) {
    let (app, blobs) = common::build_test_app_with_blobs(pool.clone());

    let form = json!({
        "title": "Sunset, Over the Bay!",
        "price": 1800.0,
        "status": "available",
        "images": [
            { "upload": "file-0", "alt": "A sunset over the bay" }
        ]
    });
    let response = send_multipart(
        app,
        "POST",
        "/api/v1/admin/paintings",
        &admin_token(),
        &form,
        &[("file-0", "sunset.jpg", b"jpegbytes")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "sunset-over-the-bay");
    // Singleton set: implicit primary.
    assert_eq!(
        json["data"]["primary_image"]["alt"],
        "A sunset over the bay"
    );

    // One blob stored, and the record points at it.
    let names = blobs.object_names();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with(".jpg"));
    assert_eq!(
        json["data"]["primary_image"]["image_url"],
        format!("https://blobs.test/{}", names[0])
    );

    let persisted = PaintingRepo::find_by_slug(&pool, "sunset-over-the-bay")
        .await
        .unwrap();
    assert!(persisted.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_duplicate_title_probes_slug(pool: PgPool) {
    seed_painting(&pool, "Harbour Light", "harbour-light", PaintingStatus::Available, 0).await;

    let (app, _blobs) = common::build_test_app_with_blobs(pool);
    let form = json!({
        "title": "Harbour Light",
        "status": "available",
        "images": [{ "upload": "file-0", "alt": "Harbour at dawn" }]
    });
    let response = send_multipart(
        app,
        "POST",
        "/api/v1/admin/paintings",
        &admin_token(),
        &form,
        &[("file-0", "harbour.png", b"pngbytes")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "harbour-light-2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_invalid_image_sets(pool: PgPool) {
    let app = common::build_test_app(pool);
    // Two images, no secondary flagged anywhere.
    let form = json!({
        "title": "Two Views",
        "status": "available",
        "images": [
            { "upload": "file-0", "alt": "First view", "is_primary": true },
            { "upload": "file-1" }
        ]
    });
    let response = send_multipart(
        app,
        "POST",
        "/api/v1/admin/paintings",
        &admin_token(),
        &form,
        &[
            ("file-0", "a.jpg", b"a"),
            ("file-1", "b.jpg", b"b"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_surfaces_blob_store_failures(pool: PgPool) {
    let (app, blobs) = common::build_test_app_with_blobs(pool.clone());
    blobs.fail_uploads(true);

    let form = json!({
        "title": "Doomed Upload",
        "status": "available",
        "images": [{ "upload": "file-0", "alt": "Never stored" }]
    });
    let response = send_multipart(
        app,
        "POST",
        "/api/v1/admin/paintings",
        &admin_token(),
        &form,
        &[("file-0", "doomed.jpg", b"bytes")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_ERROR");

    // Nothing persisted on either side.
    assert!(blobs.is_empty());
    assert!(PaintingRepo::find_by_slug(&pool, "doomed-upload")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_the_image_set(pool: PgPool) {
    let painting =
        seed_painting(&pool, "Harbour Light", "harbour-light", PaintingStatus::Available, 0).await;

    let (app, blobs) = common::build_test_app_with_blobs(pool);
    let form = json!({
        "title": "Harbour Light (reworked)",
        "price": 2400.0,
        "status": "available",
        "images": [{ "upload": "file-0", "alt": "The reworked canvas" }]
    });
    let response = send_multipart(
        app,
        "PUT",
        &format!("/api/v1/admin/paintings/{}", painting.id),
        &admin_token(),
        &form,
        &[("file-0", "reworked.webp", b"webpbytes")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Harbour Light (reworked)");
    // Slug never changes on update.
    assert_eq!(json["data"]["slug"], "harbour-light");

    let images = json["data"]["all_images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    let names = blobs.object_names();
    assert_eq!(names.len(), 1);
    assert_eq!(
        images[0]["image_url"],
        format!("https://blobs.test/{}", names[0])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_unknown_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let form = json!({
        "title": "Ghost",
        "status": "available",
        "images": [{ "upload": "file-0", "alt": "Nothing here" }]
    });
    let response = send_multipart(
        app,
        "PUT",
        "/api/v1/admin/paintings/999999",
        &admin_token(),
        &form,
        &[("file-0", "ghost.jpg", b"bytes")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_patch_flips_public_visibility(pool: PgPool) {
    let painting =
        seed_painting(&pool, "Harbour Light", "harbour-light", PaintingStatus::Available, 0).await;

    let app = common::build_test_app(pool);
    let response = send_auth(
        app.clone(),
        "PATCH",
        &format!("/api/v1/admin/paintings/{}/status", painting.id),
        &admin_token(),
        Some(json!({ "status": "hidden" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "hidden");

    let public = body_json(common::get(app, "/api/v1/gallery").await).await;
    assert_eq!(public["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_persists_and_survives_refetch(pool: PgPool) {
    let a = seed_painting(&pool, "A", "a", PaintingStatus::Available, 0).await;
    let b = seed_painting(&pool, "B", "b", PaintingStatus::Available, 10).await;
    let c = seed_painting(&pool, "C", "c", PaintingStatus::Available, 20).await;

    let app = common::build_test_app(pool);
    // Move C before A.
    let response = send_auth(
        app.clone(),
        "PUT",
        "/api/v1/admin/paintings/reorder",
        &admin_token(),
        Some(json!([
            { "id": c.id, "sort_index": 0 },
            { "id": a.id, "sort_index": 10 },
            { "id": b.id, "sort_index": 20 }
        ])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(
        send_auth(app, "GET", "/api/v1/admin/paintings", &admin_token(), None).await,
    )
    .await;
    let slugs: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["c", "a", "b"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_unknown_id_rolls_back(pool: PgPool) {
    let a = seed_painting(&pool, "A", "a", PaintingStatus::Available, 0).await;
    let b = seed_painting(&pool, "B", "b", PaintingStatus::Available, 10).await;

    let app = common::build_test_app(pool);
    let response = send_auth(
        app.clone(),
        "PUT",
        "/api/v1/admin/paintings/reorder",
        &admin_token(),
        Some(json!([
            { "id": b.id, "sort_index": 0 },
            { "id": 999999, "sort_index": 10 },
            { "id": a.id, "sort_index": 20 }
        ])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The prefix that persisted before the failure stays (last writer wins
    // on the store), but the list still resolves without the phantom id.
    let json = body_json(
        send_auth(app, "GET", "/api/v1/admin/paintings", &admin_token(), None).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_record_and_blobs(pool: PgPool) {
    let (app, blobs) = common::build_test_app_with_blobs(pool.clone());

    // Create through the API so the blob actually lives in the store.
    let form = json!({
        "title": "Short Lived",
        "status": "available",
        "images": [{ "upload": "file-0", "alt": "Soon gone" }]
    });
    let created = body_json(
        send_multipart(
            app.clone(),
            "POST",
            "/api/v1/admin/paintings",
            &admin_token(),
            &form,
            &[("file-0", "gone.jpg", b"bytes")],
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(blobs.len(), 1);

    let response = send_auth(
        app.clone(),
        "DELETE",
        &format!("/api/v1/admin/paintings/{id}"),
        &admin_token(),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(blobs.is_empty());
    assert!(PaintingRepo::find_by_id(&pool, id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unknown_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send_auth(
        app,
        "DELETE",
        "/api/v1/admin/paintings/424242",
        &admin_token(),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
