//! Outbound client against a mock Bot API: request shapes and error mapping.

use mockito::Matcher;
use replybot::telegram::payload::{AUDIO_URL, PHOTO_CAPTION, PHOTO_URL, VIDEO_URL};
use replybot::telegram::{Outbound, TelegramClient, TelegramError};
use serde_json::json;
use std::time::Duration;

const TOKEN: &str = "123:test-token";

fn client(server: &mockito::ServerGuard) -> TelegramClient {
    TelegramClient::new(&server.url(), TOKEN, Duration::from_secs(5)).expect("build client")
}

fn path(method: &str) -> String {
    format!("/bot{}/{}", TOKEN, method)
}

async fn json_mock(
    server: &mut mockito::ServerGuard,
    method: &str,
    body: serde_json::Value,
) -> mockito::Mock {
    server
        .mock("POST", path(method).as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(body))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{}}"#)
        .expect(1)
        .create_async()
        .await
}

async fn form_mock(
    server: &mut mockito::ServerGuard,
    method: &str,
    fields: &[(&str, &str)],
) -> mockito::Mock {
    let matchers = fields
        .iter()
        .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
        .collect();
    server
        .mock("POST", path(method).as_str())
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(matchers))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn send_text_posts_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "sendMessage",
        json!({"chat_id": 42, "text": "Hello, world!"}),
    )
    .await;
    client(&server).send_text(42, "Hello, world!").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn send_photo_posts_form_with_caption() {
    let mut server = mockito::Server::new_async().await;
    let mock = form_mock(
        &mut server,
        "sendPhoto",
        &[("chat_id", "42"), ("photo", PHOTO_URL), ("caption", PHOTO_CAPTION)],
    )
    .await;
    client(&server).send_photo(42).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn send_audio_and_video_post_forms() {
    let mut server = mockito::Server::new_async().await;
    let audio = form_mock(&mut server, "sendAudio", &[("chat_id", "-7"), ("audio", AUDIO_URL)]).await;
    let video = form_mock(&mut server, "sendVideo", &[("chat_id", "-7"), ("video", VIDEO_URL)]).await;
    let c = client(&server);
    c.send_audio(-7).await.unwrap();
    c.send_video(-7).await.unwrap();
    audio.assert_async().await;
    video.assert_async().await;
}

#[tokio::test]
async fn send_poll_posts_fixed_quiz() {
    let mut server = mockito::Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "sendPoll",
        json!({
            "chat_id": 1001,
            "question": "In which direction does the sun rise ?",
            "options": ["North", "South", "East", "West"],
            "is_anonymous": false,
            "type": "quiz",
            "correct_option_id": 2
        }),
    )
    .await;
    client(&server).send_poll(1001).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn send_button_posts_reply_keyboard() {
    let mut server = mockito::Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "sendMessage",
        json!({
            "chat_id": 5,
            "text": "What is this ?",
            "reply_markup": {"keyboard": [[{"text": "Rizki"}, {"text": "Juju"}]]}
        }),
    )
    .await;
    client(&server).send_button(5).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn non_200_is_remote_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", path("sendPoll").as_str())
        .with_status(500)
        .with_body(r#"{"ok":false}"#)
        .expect(1)
        .create_async()
        .await;
    let err = client(&server).send_poll(3).await.unwrap_err();
    assert!(
        matches!(err, TelegramError::Remote { status: 500, method: "sendPoll" }),
        "{:?}",
        err
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn other_2xx_is_still_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("sendMessage").as_str())
        .with_status(204)
        .create_async()
        .await;
    let err = client(&server).send_text(3, "x").await.unwrap_err();
    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn unreachable_api_is_transport_error_without_token() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let port = listener.local_addr().expect("local_addr").port();
    drop(listener);
    let c = TelegramClient::new(
        &format!("http://127.0.0.1:{}", port),
        TOKEN,
        Duration::from_secs(2),
    )
    .unwrap();
    let err = c.send_button(1).await.unwrap_err();
    assert!(matches!(err, TelegramError::Transport(_)), "{:?}", err);
    assert!(!err.to_string().contains(TOKEN), "{}", err);
}

/// A Bot API that accepts the connection but never answers must not block past the timeout.
#[tokio::test]
async fn silent_api_times_out_as_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local_addr");
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let c = TelegramClient::new(&format!("http://{}", addr), TOKEN, Duration::from_secs(1)).unwrap();
    let started = std::time::Instant::now();
    let err = c.send_poll(1).await.unwrap_err();
    let elapsed = started.elapsed();
    silent.abort();

    match &err {
        TelegramError::Transport(e) => assert!(e.is_timeout(), "{:?}", e),
        other => panic!("expected transport timeout, got {:?}", other),
    }
    assert!(elapsed >= Duration::from_millis(900), "returned after {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(3), "returned after {:?}", elapsed);
}

#[tokio::test]
async fn set_and_delete_webhook() {
    let mut server = mockito::Server::new_async().await;
    let set = json_mock(
        &mut server,
        "setWebhook",
        json!({"url": "https://bot.example.com/"}),
    )
    .await;
    let delete = server
        .mock("POST", path("deleteWebhook").as_str())
        .with_status(200)
        .with_body(r#"{"ok":true,"result":true}"#)
        .expect(1)
        .create_async()
        .await;
    let c = client(&server);
    c.set_webhook("https://bot.example.com/").await.unwrap();
    c.delete_webhook().await.unwrap();
    set.assert_async().await;
    delete.assert_async().await;
}
