//! End-to-end run of every operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Chatwork` over real
//! HTTP with the default `ureq` transport.

use chatwork_core::{
    ApiError, Chatwork, ChatworkConfig, CreateMessage, CreateTask, MessageId, RoomId, UserId,
};
use chrono::DateTime;

const TOKEN: &str = "integration-token";

/// Start the mock server on its own thread and return its `/v2` base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
        .unwrap();
    });

    format!("http://{addr}/v2")
}

#[test]
fn full_lifecycle() {
    let base_url = spawn_server();
    let chatwork = Chatwork::from_config(ChatworkConfig::new(TOKEN).base_url(base_url));

    // Step 1: who am I.
    let me = chatwork.get_me().unwrap();
    assert_eq!(me.account_id, UserId(123));
    assert_eq!(me.room_id, RoomId(322));
    assert_eq!(me.name, "John Smith");
    assert_eq!(me.mail, "taro@example.com");

    // Step 2: post a message with characters that need form encoding.
    let text = "Deploy done & tests green = ship it\n[info]ok[/info]";
    let created = chatwork
        .create_message(&CreateMessage::new(RoomId(42), text))
        .unwrap();

    // Step 3: read it back.
    let message = chatwork.get_message(RoomId(42), &created.message_id).unwrap();
    assert_eq!(message.message_id, created.message_id);
    assert_eq!(message.body, text);
    assert_eq!(message.account.account_id, me.account_id);

    // Step 4: create tasks with and without a due time.
    let due = DateTime::from_timestamp(1_893_456_000, 0).unwrap();
    let assignees = vec![UserId(1), UserId(2), UserId(3)];
    let tasks = chatwork
        .create_task(&CreateTask::new(RoomId(42), "Write release notes", assignees).due(due))
        .unwrap();
    assert_eq!(tasks.task_ids.len(), 3);

    let more = chatwork
        .create_task(&CreateTask::new(RoomId(42), "Tidy up", vec![UserId(9)]))
        .unwrap();
    assert_eq!(more.task_ids.len(), 1);
    assert!(more.task_ids[0] > tasks.task_ids[2]);

    // Step 5: unknown message.
    let err = chatwork
        .get_message(RoomId(42), &MessageId::from("999999"))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 6: server-side validation surfaces as an API error.
    let err = chatwork
        .create_task(&CreateTask::new(RoomId(42), "Nobody", Vec::new()))
        .unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 400, .. }));
}

#[test]
fn wrong_token_is_rejected() {
    let base_url = spawn_server();
    let chatwork = Chatwork::from_config(ChatworkConfig::new("not-the-token").base_url(base_url));

    let err = chatwork.get_me().unwrap_err();
    match err {
        ApiError::Api { status, errors } => {
            assert_eq!(status, 401);
            assert_eq!(errors, vec!["Invalid API token".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let chatwork =
        Chatwork::from_config(ChatworkConfig::new(TOKEN).base_url(format!("http://{addr}/v2")));

    let err = chatwork.get_me().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
