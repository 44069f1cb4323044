use actix_web::http::header::{ACCEPT, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::Value;

use crate::apis::configure;
use crate::apis_mock::{multipart_body, multipart_content_type, setup_test_state};
use crate::constants::MIME_JSON;
use crate::repo::FileRepo;

fn upload_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/files")
        .insert_header((ACCEPT, MIME_JSON))
        .insert_header((CONTENT_TYPE, multipart_content_type()))
        .set_payload(body)
}

#[actix_rt::test]
async fn test_upload_then_download() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = upload_request(multipart_body("file", Some("test.txt"), b"File contents")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let uploaded: Value = test::read_body_json(resp).await;
    assert_eq!(uploaded["name"], "test.txt");
    assert_eq!(uploaded["path"], "/uploads/test.txt");

    let file_id = uploaded["id"].as_i64().unwrap();
    let row = FileRepo::new(&state.pool).get_file_by_id(file_id).await.unwrap().unwrap();
    assert_eq!(row.name, "test.txt");

    let req = test::TestRequest::get().uri("/uploads/test.txt").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"), "got {}", content_type);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"File contents");
}

#[actix_rt::test]
async fn test_download_is_repeatable() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = upload_request(multipart_body("file", Some("track.mp3"), b"ID3fake")).to_request();
    test::call_service(&app, req).await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/uploads/track.mp3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "audio/mpeg");
        bodies.push(test::read_body(resp).await);
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[actix_rt::test]
async fn test_upload_without_file_field() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = upload_request(multipart_body("other", Some("x.txt"), b"nope")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["message"], "Could not find file data");

    // a plain form value named `file` carries no file data either
    let req = upload_request(multipart_body("file", None, b"just text")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["message"], "Could not find file data");
}

#[actix_rt::test]
async fn test_upload_sanitizes_filename() {
    let (state, dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = upload_request(multipart_body("file", Some("../../evil song.txt"), b"payload")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let uploaded: Value = test::read_body_json(resp).await;
    assert_eq!(uploaded["name"], "evil_song.txt");
    assert!(state.uploads.resolve("evil_song.txt").is_file());
    assert!(!dir.path().join("evil song.txt").exists());
}

#[actix_rt::test]
async fn test_upload_rejects_unusable_filename() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = upload_request(multipart_body("file", Some("../.."), b"payload")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_rt::test]
async fn test_upload_requires_multipart() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/files")
        .insert_header((ACCEPT, MIME_JSON))
        .insert_header((CONTENT_TYPE, MIME_JSON))
        .set_payload("{}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let req = test::TestRequest::post()
        .uri("/api/files")
        .insert_header((CONTENT_TYPE, multipart_content_type()))
        .set_payload(multipart_body("file", Some("a.txt"), b"a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE);
    assert!(!state.uploads.resolve("a.txt").exists());
}

#[actix_rt::test]
async fn test_download_missing_file() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/uploads/missing.mp3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // names that would not survive sanitizing are never looked up
    let req = test::TestRequest::get().uri("/uploads/..%2Fsecret").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn upload_dir_entries(state: &crate::state::AppState) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(state.uploads.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[actix_rt::test]
async fn test_upload_same_name_overwrites() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let mut ids = Vec::new();
    for content in [&b"one"[..], &b"two"[..]] {
        let req = upload_request(multipart_body("file", Some("dup.bin"), content)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let uploaded: Value = test::read_body_json(resp).await;
        assert_eq!(uploaded["name"], "dup.bin");
        ids.push(uploaded["id"].as_i64().unwrap());
    }
    assert_ne!(ids[0], ids[1]);

    let req = test::TestRequest::get().uri("/uploads/dup.bin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "application/octet-stream");
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"two");

    assert_eq!(upload_dir_entries(&state), vec!["dup.bin".to_string()]);
}

#[actix_rt::test]
async fn test_upload_removes_bytes_when_insert_fails() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    sqlx::query("DROP TABLE song").execute(&state.pool).await.unwrap();
    sqlx::query("DROP TABLE file").execute(&state.pool).await.unwrap();

    let req = upload_request(multipart_body("file", Some("lost.txt"), b"gone")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "message": "Internal Server Error" }));
    assert!(!state.uploads.resolve("lost.txt").exists());
    assert!(upload_dir_entries(&state).is_empty());
}

#[actix_rt::test]
async fn test_upload_leaves_no_scratch_files() {
    let (state, _dir) = setup_test_state().await;
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let big = vec![7u8; 256 * 1024];
    let req = upload_request(multipart_body("file", Some("big.wav"), &big)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // rejected names must not leave their scratch file behind either
    let req = upload_request(multipart_body("file", Some("../.."), b"payload")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(upload_dir_entries(&state), vec!["big.wav".to_string()]);
    assert_eq!(std::fs::read(state.uploads.resolve("big.wav")).unwrap(), big);
}
