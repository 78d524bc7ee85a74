mod support;

use std::sync::Arc;

use axum::http::StatusCode;

use support::{app, body_string, get_path, test_config, InMemoryRecords, MockBot};
use tg_media_relay::media::records::{MediaRecordStore, NewMediaRecord};
use tg_media_relay::media::resolver::NOT_FOUND_MESSAGE;
use tg_media_relay::telegram::client::BotApiError;

#[tokio::test]
async fn unknown_access_code_is_a_plain_404() {
    let records = Arc::new(InMemoryRecords::default());
    let bot = MockBot::new();

    let router = app(test_config(&[]), records, Arc::new(bot));

    let response = get_path(&router, "/get/zzzzzzzz").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn failed_file_lookup_maps_to_bad_gateway() {
    let records = Arc::new(InMemoryRecords::default());
    records
        .insert(NewMediaRecord {
            access_code: "abcd1234".into(),
            media_id: "gone_file".into(),
            chat_id: 42,
        })
        .await
        .expect("seed record");

    let mut bot = MockBot::new();
    bot.expect_file_url()
        .withf(|file_id| file_id == "gone_file")
        .times(1)
        .returning(|file_id| {
            Err(BotApiError::MissingFilePath {
                file_id: file_id.to_string(),
            })
        });

    let router = app(test_config(&[]), records, Arc::new(bot));

    let response = get_path(&router, "/get/abcd1234").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
