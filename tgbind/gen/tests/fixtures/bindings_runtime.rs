//! Runtime tests copied into a generated bindings crate.

use serde_json::json;
use tgbind_bindings::methods::GetUpdatesOpts;
use tgbind_bindings::{Attachment, Bot, BotError, InputFile};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn existing_file_is_staged_as_attachment() {
    let name = format!("tgbind-upload-{}.jpg", std::process::id());
    let file = std::env::temp_dir().join(name);
    std::fs::write(&file, b"jpeg").unwrap();

    let mut files: Vec<Attachment> = Vec::new();
    let value = InputFile::from(file.as_path()).stage("photo", &mut files);
    std::fs::remove_file(&file).unwrap();

    assert_eq!(value.unwrap(), "attach://photo");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].field, "photo");
    assert_eq!(files[0].data, b"jpeg");
}

#[test]
fn unknown_path_passes_through_as_remote_id() {
    let mut files: Vec<Attachment> = Vec::new();
    let value = InputFile::from("AgADremoteid").stage("photo", &mut files).unwrap();

    assert_eq!(value, "AgADremoteid");
    assert!(files.is_empty());
}

#[test]
fn directory_is_an_unsupported_input_file() {
    let dir = std::env::temp_dir();
    let mut files: Vec<Attachment> = Vec::new();
    let err = InputFile::from(dir.as_path())
        .stage("photo", &mut files)
        .unwrap_err();

    assert!(matches!(err, BotError::UnsupportedInputFile(ref field) if field == "photo"));
    assert!(files.is_empty());
}

#[test]
fn memory_contents_are_always_uploaded() {
    let mut files: Vec<Attachment> = Vec::new();
    let upload = InputFile::Memory {
        name: "cat.png".to_string(),
        data: vec![1, 2, 3],
    };

    assert_eq!(upload.stage("photo", &mut files).unwrap(), "attach://photo");
    assert_eq!(files[0].file_name, "cat.png");
}

#[tokio::test]
async fn optional_parameters_are_sent_only_when_supplied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/botTOKEN/getUpdates"))
        .and(body_string_contains("timeout=30"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true, "result": [{ "update_id": 7 }] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/botTOKEN/getUpdates"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bot = Bot::with_base_url("TOKEN", server.uri());

    let opts = GetUpdatesOpts {
        timeout: Some(30),
        ..Default::default()
    };
    let updates = bot.get_updates(Some(&opts)).await.unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].update_id, 7);

    let updates = bot.get_updates(None).await.unwrap();
    assert!(updates.is_empty());
}

#[tokio::test]
async fn api_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTOKEN/getMe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let bot = Bot::with_base_url("TOKEN", server.uri());
    let err = bot.get_me().await.unwrap_err();

    assert!(matches!(
        err,
        BotError::Api { code: 401, ref description } if description == "Unauthorized"
    ));
}
