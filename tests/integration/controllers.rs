use crate::mock_server::{unreachable_client, MockServerFixture};
use call_helper_client::chat::{
    ChatClient, ChatRole, DeliveryStatus, CHAT_PATH, DEFAULT_USER_TYPE,
};
use call_helper_client::normalize::NETWORK_MESSAGE;
use call_helper_client::resolve::{ResolveClient, ResolveRequest, RESOLVE_PATH};
use call_helper_client::state::{ChatController, ChatState, ResolveController, ResolveState};
use serde_json::json;

const SERVER_MESSAGE: &str = "خطأ في الخادم. الرجاء المحاولة لاحقا.";

fn login_request() -> ResolveRequest {
    ResolveRequest::new("Ali", "umrah", "login fails")
}

#[tokio::test]
async fn test_resolve_success_updates_state() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(
            RESOLVE_PATH,
            json!({"name": "Ali"}),
            200,
            json!({
                "success": true,
                "message": "ok",
                "match": {"response_text": "clear the cache", "score": 8},
                "alternatives": [
                    {"response_text": "clear the cache", "score": 8},
                    {"response_text": "reset the password", "score": 5}
                ]
            }),
        )
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    let mut updates = controller.subscribe();
    let resp = controller.resolve(&login_request()).await.unwrap();

    let state = controller.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.result.as_ref(), Some(&resp));
    assert_eq!(state.alternatives.len(), 2);
    assert!(updates.has_changed().unwrap());
    assert_eq!(*updates.borrow_and_update(), state);
}

#[tokio::test]
async fn test_resolve_failure_records_localized_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(RESOLVE_PATH, json!({}), 500, json!({"error": "db down"}))
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    let err = controller.resolve(&login_request()).await.unwrap_err();

    assert_eq!(err.status, 500);
    assert_eq!(err.message, "db down");
    let state = controller.state();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(SERVER_MESSAGE));
    assert!(state.result.is_none());
}

#[tokio::test]
async fn test_new_call_clears_previous_error() {
    let mut fixture = MockServerFixture::new().await;
    let _fail = fixture
        .mock_post(RESOLVE_PATH, json!({"issue": "bad"}), 500, json!({"error": "db down"}))
        .await;
    let _ok = fixture
        .mock_post(
            RESOLVE_PATH,
            json!({"issue": "login fails"}),
            200,
            json!({"success": true, "message": "ok"}),
        )
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    let _ = controller
        .resolve(&ResolveRequest::new("Ali", "umrah", "bad"))
        .await;
    assert!(controller.state().error.is_some());

    controller.resolve(&login_request()).await.unwrap();
    assert!(controller.state().error.is_none());
}

#[tokio::test]
async fn test_alternatives_cycle_and_wrap() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(
            RESOLVE_PATH,
            json!({}),
            200,
            json!({
                "success": true,
                "message": "ok",
                "match": {"case_id": "A"},
                "alternatives": [{"case_id": "A"}, {"case_id": "B"}, {"case_id": "C"}]
            }),
        )
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    controller.resolve(&login_request()).await.unwrap();

    let id = |m: Option<call_helper_client::resolve::MatchResult>| m.and_then(|m| m.case_id);
    assert_eq!(id(controller.current_match()).as_deref(), Some("A"));
    assert_eq!(id(controller.next_alternative()).as_deref(), Some("B"));
    assert_eq!(id(controller.next_alternative()).as_deref(), Some("C"));
    assert_eq!(id(controller.next_alternative()).as_deref(), Some("A"));
}

#[tokio::test]
async fn test_single_candidate_does_not_cycle() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(
            RESOLVE_PATH,
            json!({}),
            200,
            json!({"success": true, "message": "ok", "match": {"case_id": "A"}}),
        )
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    controller.resolve(&login_request()).await.unwrap();
    assert!(controller.next_alternative().is_none());
    assert_eq!(controller.state().current_alternative, 0);
}

#[tokio::test]
async fn test_latest_overlapping_resolve_wins() {
    let mut fixture = MockServerFixture::new().await;
    let _first = fixture
        .mock_post(
            RESOLVE_PATH,
            json!({"issue": "first"}),
            200,
            json!({"success": true, "message": "first"}),
        )
        .await;
    let _second = fixture
        .mock_post(
            RESOLVE_PATH,
            json!({"issue": "second"}),
            200,
            json!({"success": true, "message": "second"}),
        )
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    let first = ResolveRequest::new("Ali", "umrah", "first");
    let second = ResolveRequest::new("Ali", "umrah", "second");
    let (a, b) = tokio::join!(controller.resolve(&first), controller.resolve(&second));

    assert_eq!(a.unwrap().message, "first");
    assert_eq!(b.unwrap().message, "second");
    let state = controller.state();
    assert!(!state.loading);
    assert_eq!(state.result.unwrap().message, "second");
}

#[tokio::test]
async fn test_reset_discards_in_flight_result() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(RESOLVE_PATH, json!({}), 200, json!({"success": true, "message": "late"}))
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    let req = login_request();
    let (outcome, _) = tokio::join!(controller.resolve(&req), async { controller.reset() });

    assert!(outcome.is_ok());
    assert_eq!(controller.state(), ResolveState::default());
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_call() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(RESOLVE_PATH, json!({}), 200, json!({"success": true, "message": "late"}))
        .await;

    let controller = ResolveController::new(ResolveClient::new(fixture.client()));
    let req = login_request();
    let (outcome, _) = tokio::join!(controller.resolve(&req), async { controller.shutdown() });

    let err = outcome.unwrap_err();
    assert_eq!(err.status, 0);
    assert_eq!(err.message, "Request cancelled");
    let state = controller.state();
    assert!(!state.loading);
    assert!(state.result.is_none());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_resolve_after_shutdown_is_refused() {
    let controller = ResolveController::new(ResolveClient::new(unreachable_client()));
    let mut updates = controller.subscribe();
    controller.shutdown();

    let err = controller.resolve(&login_request()).await.unwrap_err();
    assert_eq!(err.status, 0);
    assert_eq!(controller.state(), ResolveState::default());
    assert!(!updates.has_changed().unwrap());
}

#[tokio::test]
async fn test_chat_init_then_send() {
    let mut fixture = MockServerFixture::new().await;
    let _welcome = fixture
        .mock_post(
            CHAT_PATH,
            json!({"is_first": true}),
            200,
            json!({
                "success": true,
                "response": "welcome",
                "quick_replies": ["login", "visa"],
                "session_id": "s-1"
            }),
        )
        .await;
    let reply = fixture
        .mock_post(
            CHAT_PATH,
            json!({"message": "hello", "session_id": "s-1", "is_first": false}),
            200,
            json!({"success": true, "response": "how can I help?", "quick_replies": []}),
        )
        .await;

    let controller = ChatController::new(ChatClient::new(fixture.client()), "umrah");
    controller.init_chat().await.unwrap();
    assert_eq!(controller.state().messages.len(), 1);

    controller.send_message("hello").await.unwrap();
    reply.assert_async().await;

    let state = controller.state();
    let roles: Vec<_> = state.messages.iter().map(|e| e.role()).collect();
    assert_eq!(roles, [ChatRole::Bot, ChatRole::User, ChatRole::Bot]);
    assert!(state
        .messages
        .iter()
        .all(|e| e.status == DeliveryStatus::Confirmed));
    assert_eq!(state.messages[1].content(), "hello");
    assert_eq!(state.session_id.as_deref(), Some("s-1"));
    assert!(state.quick_replies.is_empty());
    assert!(!state.loading);

    let session = controller.session().unwrap();
    assert_eq!(session.messages.len(), 3);
    assert_eq!(session.user_type, "umrah");
}

#[tokio::test]
async fn test_chat_adopts_new_session_id() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(
            CHAT_PATH,
            json!({"is_first": false}),
            200,
            json!({
                "success": true,
                "response": "ok",
                "quick_replies": ["more"],
                "session_id": "s-2"
            }),
        )
        .await;

    let controller = ChatController::new(ChatClient::new(fixture.client()), "umrah");
    controller.send_message("hi").await.unwrap();
    let state = controller.state();
    assert_eq!(state.session_id.as_deref(), Some("s-2"));
    assert_eq!(state.quick_replies, ["more"]);
}

#[tokio::test]
async fn test_init_chat_replaces_history() {
    let mut fixture = MockServerFixture::new().await;
    let _welcome = fixture
        .mock_post(
            CHAT_PATH,
            json!({"is_first": true}),
            200,
            json!({
                "success": true,
                "response": "welcome",
                "quick_replies": [],
                "session_id": "s-1"
            }),
        )
        .await;
    let _reply = fixture
        .mock_post(
            CHAT_PATH,
            json!({"is_first": false}),
            200,
            json!({"success": true, "response": "ok", "quick_replies": []}),
        )
        .await;

    let controller = ChatController::new(ChatClient::new(fixture.client()), "umrah");
    controller.init_chat().await.unwrap();
    controller.send_message("hello").await.unwrap();
    controller.init_chat().await.unwrap();

    let state = controller.state();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].content(), "welcome");
}

#[tokio::test]
async fn test_failed_send_keeps_user_message_marked_failed() {
    let controller = ChatController::new(ChatClient::new(unreachable_client()), "umrah");
    let err = controller.send_message("hello").await.unwrap_err();
    assert_eq!(err.status, 0);

    let state = controller.state();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].role(), ChatRole::User);
    assert_eq!(state.messages[0].status, DeliveryStatus::Failed);
    assert_eq!(state.error.as_deref(), Some(NETWORK_MESSAGE));
    assert!(!state.loading);
}

#[tokio::test]
async fn test_chat_reset_clears_everything() {
    let mut fixture = MockServerFixture::new().await;
    let _welcome = fixture
        .mock_post(
            CHAT_PATH,
            json!({"is_first": true}),
            200,
            json!({
                "success": true,
                "response": "welcome",
                "quick_replies": ["a"],
                "session_id": "s-1"
            }),
        )
        .await;

    let controller = ChatController::new(ChatClient::new(fixture.client()), "umrah");
    controller.init_chat().await.unwrap();
    controller.reset();

    let state = controller.state();
    assert!(state.messages.is_empty());
    assert!(state.session_id.is_none());
    assert!(state.quick_replies.is_empty());
    assert!(controller.session().is_none());
}

#[tokio::test]
async fn test_overlapping_sends_keep_only_latest_reply() {
    let mut fixture = MockServerFixture::new().await;
    let _a = fixture
        .mock_post(
            CHAT_PATH,
            json!({"message": "a"}),
            200,
            json!({"success": true, "response": "re-a", "quick_replies": ["a"]}),
        )
        .await;
    let _b = fixture
        .mock_post(
            CHAT_PATH,
            json!({"message": "b"}),
            200,
            json!({"success": true, "response": "re-b", "quick_replies": ["b"]}),
        )
        .await;

    let controller = ChatController::new(ChatClient::new(fixture.client()), "umrah");
    let (a, b) = tokio::join!(controller.send_message("a"), controller.send_message("b"));
    assert_eq!(a.unwrap().response, "re-a");
    assert_eq!(b.unwrap().response, "re-b");

    let state = controller.state();
    let entries: Vec<_> = state
        .messages
        .iter()
        .map(|e| (e.content().to_string(), e.status))
        .collect();
    assert_eq!(
        entries,
        [
            ("a".to_string(), DeliveryStatus::Confirmed),
            ("b".to_string(), DeliveryStatus::Confirmed),
            ("re-b".to_string(), DeliveryStatus::Confirmed),
        ]
    );
    assert_eq!(state.quick_replies, ["b"]);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_chat_shutdown_fails_pending_send() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_post(
            CHAT_PATH,
            json!({}),
            200,
            json!({"success": true, "response": "late", "quick_replies": []}),
        )
        .await;

    let controller = ChatController::new(ChatClient::new(fixture.client()), "umrah");
    let (outcome, _) =
        tokio::join!(controller.send_message("hello"), async { controller.shutdown() });

    assert_eq!(outcome.unwrap_err().status, 0);
    let state = controller.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].content(), "hello");
    assert_eq!(state.messages[0].status, DeliveryStatus::Failed);
}

#[tokio::test]
async fn test_chat_after_shutdown_writes_nothing() {
    let controller = ChatController::new(ChatClient::new(unreachable_client()), "umrah");
    controller.shutdown();

    let err = controller.send_message("hello").await.unwrap_err();
    assert_eq!(err.status, 0);
    assert_eq!(err.message, "Request cancelled");
    assert!(controller.init_chat().await.is_err());
    assert_eq!(controller.state(), ChatState::default());
}

#[tokio::test]
async fn test_blank_user_type_sends_default() {
    let mut fixture = MockServerFixture::new().await;
    let welcome = fixture
        .mock_post(
            CHAT_PATH,
            json!({"user_type": DEFAULT_USER_TYPE, "is_first": true}),
            200,
            json!({"success": true, "response": "welcome", "quick_replies": []}),
        )
        .await;

    let controller = ChatController::new(ChatClient::new(fixture.client()), "");
    assert_eq!(controller.user_type(), DEFAULT_USER_TYPE);
    controller.init_chat().await.unwrap();
    welcome.assert_async().await;
}
