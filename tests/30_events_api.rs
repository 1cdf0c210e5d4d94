mod common;

use axum::http::StatusCode;
use common::{authed_delete, authed_get, body_json, multipart_request, test_app};

#[tokio::test]
async fn create_event_without_poster_uses_defaults() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let response = app
        .request(multipart_request(
            "POST",
            "/api/admin/events",
            &cookie,
            &[("title", "Open Mic"), ("dateTime", "2025-05-01T21:30")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Open Mic");
    assert!(body["data"]["posterUrl"].is_null());
    assert!(body["data"]["description"].is_null());
    assert_eq!(body["data"]["isPublished"], true);

    let list = body_json(app.request(authed_get("/api/admin/events", &cookie)).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn uploaded_poster_overrides_typed_url_and_is_served_back() {
    let app = test_app();
    let cookie = app.login_cookie().await;
    let poster_bytes = vec![42u8; 10 * 1024];

    let response = app
        .request(multipart_request(
            "POST",
            "/api/admin/events",
            &cookie,
            &[
                ("title", "Gala Night"),
                ("dateTime", "2025-06-01T20:00"),
                ("posterUrl", "/events/manual.jpg"),
            ],
            Some(("posterFile", "gala.png", &poster_bytes)),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let poster_url = body["data"]["posterUrl"].as_str().expect("poster url");
    assert!(
        poster_url.starts_with("/uploads/event-"),
        "got {poster_url}"
    );
    assert!(poster_url.ends_with(".png"), "got {poster_url}");

    // The stored poster is publicly reachable at its stable path
    let served = app.request(common::get_request(poster_url)).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(common::body_bytes(served).await, poster_bytes);
}

#[tokio::test]
async fn create_without_title_is_a_validation_error() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let response = app
        .request(multipart_request(
            "POST",
            "/api/admin/events",
            &cookie,
            &[("dateTime", "2025-05-01T21:30")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let list = body_json(app.request(authed_get("/api/admin/events", &cookie)).await).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_with_malformed_tickets_url_is_rejected() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let response = app
        .request(multipart_request(
            "POST",
            "/api/admin/events",
            &cookie,
            &[
                ("title", "Open Mic"),
                ("dateTime", "2025-05-01T21:30"),
                ("ticketsUrl", "not a url"),
            ],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_replaces_every_editable_field() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let created = body_json(
        app.request(multipart_request(
            "POST",
            "/api/admin/events",
            &cookie,
            &[
                ("title", "Open Mic"),
                ("dateTime", "2025-05-01T21:30"),
                ("description", "Weekly open mic"),
                ("tag", "Stand-up"),
            ],
            None,
        ))
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(multipart_request(
            "PUT",
            &format!("/api/admin/events/{}", id),
            &cookie,
            &[
                ("title", "Open Mic Finale"),
                ("dateTime", "2025-05-02T21:30"),
                ("isPublished", "off"),
            ],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], "Open Mic Finale");
    // Full replacement: omitted optionals are cleared
    assert!(body["data"]["description"].is_null());
    assert!(body["data"]["tag"].is_null());
    assert_eq!(body["data"]["isPublished"], false);
}

#[tokio::test]
async fn update_without_date_time_is_rejected_and_event_unchanged() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let created = body_json(
        app.request(multipart_request(
            "POST",
            "/api/admin/events",
            &cookie,
            &[("title", "Open Mic"), ("dateTime", "2025-05-01T21:30")],
            None,
        ))
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(multipart_request(
            "PUT",
            &format!("/api/admin/events/{}", id),
            &cookie,
            &[("title", "Renamed")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let list = body_json(app.request(authed_get("/api/admin/events", &cookie)).await).await;
    assert_eq!(list["data"][0]["title"], "Open Mic");
}

#[tokio::test]
async fn update_of_unknown_event_is_not_found() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let response = app
        .request(multipart_request(
            "PUT",
            "/api/admin/events/00000000-0000-0000-0000-000000000000",
            &cookie,
            &[("title", "Ghost"), ("dateTime", "2025-05-01T21:30")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_removes_the_event_and_retries_report_not_found() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let created = body_json(
        app.request(multipart_request(
            "POST",
            "/api/admin/events",
            &cookie,
            &[("title", "Doomed"), ("dateTime", "2025-05-01T21:30")],
            None,
        ))
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/admin/events/{}", id);

    let response = app.request(authed_delete(&uri, &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(app.request(authed_get("/api/admin/events", &cookie)).await).await;
    assert!(list["data"].as_array().unwrap().is_empty());

    let retry = app.request(authed_delete(&uri, &cookie)).await;
    assert_eq!(retry.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_unknown_event_is_not_found() {
    let app = test_app();
    let cookie = app.login_cookie().await;

    let response = app
        .request(authed_delete(
            "/api/admin/events/00000000-0000-0000-0000-000000000000",
            &cookie,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
