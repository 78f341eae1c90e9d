//! Session protocol tests against a scripted in-memory backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chatwidget_common::{ChatMessage, ConversationId, Event, EventBus, Role};
use chatwidget_config::{Position, WidgetConfig};
use tokio::sync::Notify;

use super::*;
use crate::{ApiError, AssistantReply, ChatApi, CreatedConversation, NewConversation};

const SEED: &str = "Hello! How can I help you today?";

/// Backend double: replies are queued per endpoint, requests recorded.
#[derive(Default)]
struct ScriptedApi {
    create_replies: Mutex<VecDeque<Result<String, ApiError>>>,
    send_replies: Mutex<VecDeque<Result<String, ApiError>>>,
    creates: Mutex<Vec<NewConversation>>,
    sends: Mutex<Vec<(ConversationId, String)>>,
    /// When set, create requests park here until notified.
    create_gate: Option<Arc<Notify>>,
}

impl ScriptedApi {
    fn new() -> Self {
        Self::default()
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            create_gate: Some(gate),
            ..Self::default()
        }
    }

    fn create_ok(self, id: &str) -> Self {
        self.create_replies.lock().unwrap().push_back(Ok(id.into()));
        self
    }

    fn create_err(self, err: ApiError) -> Self {
        self.create_replies.lock().unwrap().push_back(Err(err));
        self
    }

    fn send_ok(self, content: &str) -> Self {
        self.send_replies.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    fn send_err(self, err: ApiError) -> Self {
        self.send_replies.lock().unwrap().push_back(Err(err));
        self
    }

    fn create_count(&self) -> usize {
        self.creates.lock().unwrap().len()
    }

    fn send_count(&self) -> usize {
        self.sends.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatApi for ScriptedApi {
    async fn create_conversation(
        &self,
        request: &NewConversation,
    ) -> Result<CreatedConversation, ApiError> {
        self.creates.lock().unwrap().push(request.clone());
        if let Some(ref gate) = self.create_gate {
            gate.notified().await;
        }
        let reply = self
            .create_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())));
        reply.map(|id| CreatedConversation {
            id: ConversationId::new(id),
        })
    }

    async fn send_message(
        &self,
        conversation_id: &ConversationId,
        content: &str,
    ) -> Result<AssistantReply, ApiError> {
        self.sends
            .lock()
            .unwrap()
            .push((conversation_id.clone(), content.to_string()));
        let reply = self
            .send_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())));
        reply.map(|content| AssistantReply { content })
    }
}

fn mount(api: ScriptedApi) -> (ChatSession, Arc<ScriptedApi>) {
    let api = Arc::new(api);
    let session = ChatSession::initialize(
        SessionConfig::new("tenant-1"),
        api.clone(),
        Arc::new(EventBus::new(64)),
    )
    .unwrap();
    (session, api)
}

fn http_500() -> ApiError {
    ApiError::Http {
        status: 500,
        body: "Internal Server Error".into(),
    }
}

// -- Mount ------------------------------------------------------------------

#[tokio::test]
async fn initialize_seeds_welcome_and_is_visible() {
    let (session, api) = mount(ScriptedApi::new());

    assert_eq!(session.messages().await, vec![ChatMessage::assistant(SEED)]);
    assert!(session.is_open());
    assert_eq!(session.state(), SessionState::Mounted);
    assert!(session.conversation_id().is_none());
    assert_eq!(api.create_count(), 0);
    assert_eq!(api.send_count(), 0);
}

#[tokio::test]
async fn initialize_publishes_seed_to_early_subscribers() {
    let bus = Arc::new(EventBus::new(16));
    let mut rx = bus.subscribe();
    let _session =
        ChatSession::initialize(SessionConfig::new("t"), Arc::new(ScriptedApi::new()), bus)
            .unwrap();

    let event = rx.recv().await.unwrap();
    assert!(matches!(
        event,
        Event::MessageAppended { index: 0, ref message } if message.content == SEED
    ));
}

#[test]
fn initialize_requires_tenant() {
    let result = ChatSession::initialize(
        SessionConfig::new("  "),
        Arc::new(ScriptedApi::new()),
        Arc::new(EventBus::new(16)),
    );
    let err = result.err().unwrap();
    assert!(err.to_string().contains("tenant_id"));
}

#[test]
fn session_config_reads_customer_cookie() {
    let mut config = WidgetConfig::default();
    config.widget.tenant_id = "t-9".into();
    config.widget.position = Position::Left;
    config.widget.welcome_message = "Welcome back".into();
    config.customer.cookies = "theme=dark; customer_id=cust-77".into();

    let session_config = SessionConfig::from_widget_config(&config);
    assert_eq!(session_config.tenant_id, "t-9");
    assert_eq!(session_config.position, Position::Left);
    assert_eq!(session_config.welcome_message, "Welcome back");
    assert_eq!(session_config.customer_identifier.as_deref(), Some("cust-77"));
}

#[test]
fn session_config_without_cookie_has_no_customer() {
    let config = WidgetConfig::default();
    assert!(SessionConfig::from_widget_config(&config)
        .customer_identifier
        .is_none());
}

// -- Send scenarios ---------------------------------------------------------

#[tokio::test]
async fn first_send_bootstraps_then_exchanges() {
    let (session, api) = mount(ScriptedApi::new().create_ok("c1").send_ok("Hello!"));

    let outcome = session.send_message("Hi").await;

    assert_eq!(outcome, SendOutcome::Replied("Hello!".into()));
    assert_eq!(
        session.messages().await,
        vec![
            ChatMessage::assistant(SEED),
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello!"),
        ]
    );
    assert_eq!(session.conversation_id().unwrap().as_str(), "c1");
    assert_eq!(
        session.state(),
        SessionState::Active {
            conversation_id: ConversationId::new("c1")
        }
    );

    let creates = api.creates.lock().unwrap();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].tenant_id, "tenant-1");
    assert!(creates[0].customer_identifier.is_none());
    let sends = api.sends.lock().unwrap();
    assert_eq!(sends[0], (ConversationId::new("c1"), "Hi".to_string()));
}

#[tokio::test]
async fn failed_bootstrap_appends_connect_error_and_retries_next_time() {
    let (session, api) = mount(
        ScriptedApi::new()
            .create_err(http_500())
            .create_ok("c2")
            .send_ok("Back online"),
    );

    let outcome = session.send_message("Hi").await;

    assert_eq!(outcome, SendOutcome::BootstrapFailed);
    assert_eq!(
        session.messages().await,
        vec![
            ChatMessage::assistant(SEED),
            ChatMessage::user("Hi"),
            ChatMessage::assistant(CONNECT_ERROR_MESSAGE),
        ]
    );
    assert!(session.conversation_id().is_none());
    assert_eq!(session.state(), SessionState::Mounted);
    assert_eq!(api.send_count(), 0);

    let outcome = session.send_message("Hi again").await;
    assert_eq!(outcome, SendOutcome::Replied("Back online".into()));
    assert_eq!(session.conversation_id().unwrap().as_str(), "c2");

    // Each attempt minted its own session identifier.
    let creates = api.creates.lock().unwrap();
    assert_eq!(creates.len(), 2);
    assert_ne!(creates[0].session_id, creates[1].session_id);
    assert_eq!(
        session.conversation_session_id().unwrap().as_str(),
        creates[1].session_id
    );
}

#[tokio::test]
async fn send_timeout_on_established_conversation() {
    let (session, api) = mount(
        ScriptedApi::new()
            .create_ok("c1")
            .send_ok("first")
            .send_err(ApiError::Timeout),
    );
    session.send_message("Hi").await;

    let outcome = session.send_message("Bye").await;

    assert_eq!(outcome, SendOutcome::ExchangeFailed);
    let messages = session.messages().await;
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[3], ChatMessage::user("Bye"));
    assert_eq!(messages[4], ChatMessage::assistant(PROCESSING_ERROR_MESSAGE));
    assert_eq!(session.conversation_id().unwrap().as_str(), "c1");
    assert_eq!(api.create_count(), 1);
}

#[tokio::test]
async fn exchange_error_text_differs_from_connect_error() {
    assert_ne!(CONNECT_ERROR_MESSAGE, PROCESSING_ERROR_MESSAGE);

    let (session, _api) = mount(
        ScriptedApi::new()
            .create_ok("c1")
            .send_err(ApiError::Parse("missing field `content`".into())),
    );
    let outcome = session.send_message("Hi").await;

    assert_eq!(outcome, SendOutcome::ExchangeFailed);
    let messages = session.messages().await;
    assert_eq!(messages.last().unwrap().content, PROCESSING_ERROR_MESSAGE);
    assert_eq!(
        messages.iter().filter(|m| m.role == Role::Assistant).count(),
        2
    );
}

#[tokio::test]
async fn blank_input_is_a_no_op() {
    let (session, api) = mount(ScriptedApi::new().create_ok("c1"));

    for blank in ["", "   ", "\n\t "] {
        assert_eq!(session.send_message(blank).await, SendOutcome::Ignored);
    }

    assert_eq!(session.message_count().await, 1);
    assert_eq!(api.create_count(), 0);
    assert_eq!(api.send_count(), 0);
}

#[tokio::test]
async fn input_is_trimmed_before_echo_and_send() {
    let (session, api) = mount(ScriptedApi::new().create_ok("c1").send_ok("ok"));

    session.send_message("  where is my order?  \n").await;

    assert_eq!(
        session.messages().await[1],
        ChatMessage::user("where is my order?")
    );
    assert_eq!(api.sends.lock().unwrap()[0].1, "where is my order?");
}

#[tokio::test]
async fn customer_identifier_is_passed_through() {
    let api = Arc::new(ScriptedApi::new().create_ok("c1").send_ok("ok"));
    let session = ChatSession::initialize(
        SessionConfig::new("tenant-1").with_customer_identifier("cust-1"),
        api.clone(),
        Arc::new(EventBus::new(16)),
    )
    .unwrap();

    session.send_message("Hi").await;

    assert_eq!(session.customer_identifier(), Some("cust-1"));
    assert_eq!(
        api.creates.lock().unwrap()[0].customer_identifier.as_deref(),
        Some("cust-1")
    );
}

// -- Bootstrap --------------------------------------------------------------

#[tokio::test]
async fn conversation_id_is_never_overwritten() {
    let (session, api) = mount(ScriptedApi::new().create_ok("c1").create_ok("c-other"));

    let first = session.bootstrap_conversation().await.unwrap();
    let second = session.bootstrap_conversation().await.unwrap();

    assert_eq!(first.as_str(), "c1");
    assert_eq!(second.as_str(), "c1");
    assert_eq!(api.create_count(), 1);
}

#[tokio::test]
async fn failed_bootstrap_reports_cause() {
    let (session, _api) = mount(ScriptedApi::new().create_err(http_500()));

    let err = session.bootstrap_conversation().await.unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert!(session.conversation_id().is_none());
}

#[tokio::test]
async fn bootstrap_events_are_published() {
    let (session, _api) = mount(ScriptedApi::new().create_err(http_500()).create_ok("c1"));
    let mut rx = session.events().subscribe();

    let _ = session.bootstrap_conversation().await;
    let _ = session.bootstrap_conversation().await;

    let e1 = rx.recv().await.unwrap();
    assert!(matches!(e1, Event::BootstrapFailed { ref reason } if reason.contains("500")));
    let e2 = rx.recv().await.unwrap();
    assert!(
        matches!(e2, Event::ConversationStarted { ref conversation_id } if conversation_id == "c1")
    );
}

// -- Ordering and concurrency -----------------------------------------------

#[tokio::test]
async fn user_echo_precedes_network_resolution() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(ScriptedApi::gated(gate.clone()).create_ok("c1").send_ok("Hello!"));
    let bus = Arc::new(EventBus::new(16));
    let session = Arc::new(
        ChatSession::initialize(SessionConfig::new("tenant-1"), api.clone(), bus.clone()).unwrap(),
    );
    let mut rx = bus.subscribe();

    let task = {
        let session = session.clone();
        tokio::spawn(async move { session.send_message("Hi").await })
    };

    // The echo arrives while the create request is still parked.
    let event = rx.recv().await.unwrap();
    assert!(matches!(
        event,
        Event::MessageAppended { index: 1, ref message } if *message == ChatMessage::user("Hi")
    ));
    assert_eq!(session.message_count().await, 2);
    assert!(session.conversation_id().is_none());

    gate.notify_one();
    assert_eq!(task.await.unwrap(), SendOutcome::Replied("Hello!".into()));
    assert_eq!(session.message_count().await, 3);
}

#[tokio::test]
async fn concurrent_sends_share_one_bootstrap() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(
        ScriptedApi::gated(gate.clone())
            .create_ok("c1")
            .create_ok("c-never")
            .send_ok("one")
            .send_ok("two"),
    );
    let session = Arc::new(
        ChatSession::initialize(
            SessionConfig::new("tenant-1"),
            api.clone(),
            Arc::new(EventBus::new(64)),
        )
        .unwrap(),
    );

    let a = {
        let session = session.clone();
        tokio::spawn(async move { session.send_message("first").await })
    };
    let b = {
        let session = session.clone();
        tokio::spawn(async move { session.send_message("second").await })
    };

    // Both echoes land before the single create request resolves.
    while session.message_count().await < 3 {
        tokio::task::yield_now().await;
    }
    assert_eq!(api.create_count(), 1);
    gate.notify_one();

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, SendOutcome::Replied(_))));
    assert_eq!(api.create_count(), 1);
    assert_eq!(api.send_count(), 2);
    assert!(api
        .sends
        .lock()
        .unwrap()
        .iter()
        .all(|(id, _)| id.as_str() == "c1"));
    assert_eq!(session.message_count().await, 5);
}

#[tokio::test]
async fn failed_shared_bootstrap_lets_waiter_retry() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(
        ScriptedApi::gated(gate.clone())
            .create_err(http_500())
            .create_ok("c1")
            .send_ok("two"),
    );
    let session = Arc::new(
        ChatSession::initialize(
            SessionConfig::new("tenant-1"),
            api.clone(),
            Arc::new(EventBus::new(64)),
        )
        .unwrap(),
    );

    let a = {
        let session = session.clone();
        tokio::spawn(async move { session.send_message("one").await })
    };
    let b = {
        let session = session.clone();
        tokio::spawn(async move { session.send_message("two").await })
    };

    while session.message_count().await < 3 {
        tokio::task::yield_now().await;
    }
    assert_eq!(api.create_count(), 1);

    // Fail the first attempt; the waiting send then issues its own create.
    gate.notify_one();
    while api.create_count() < 2 {
        tokio::task::yield_now().await;
    }
    gate.notify_one();

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, SendOutcome::BootstrapFailed))
            .count(),
        1
    );
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, SendOutcome::Replied(r) if r == "two"))
            .count(),
        1
    );

    let creates = api.creates.lock().unwrap().clone();
    assert_eq!(creates.len(), 2);
    assert_ne!(creates[0].session_id, creates[1].session_id);
    assert_eq!(session.conversation_id().unwrap().as_str(), "c1");
    assert_eq!(
        session.conversation_session_id().unwrap().as_str(),
        creates[1].session_id
    );
    assert_eq!(api.send_count(), 1);

    let messages = session.messages().await;
    assert_eq!(messages.len(), 5);
    assert!(messages.contains(&ChatMessage::assistant(CONNECT_ERROR_MESSAGE)));
    assert!(messages.contains(&ChatMessage::assistant("two")));
}

// -- Visibility -------------------------------------------------------------

#[tokio::test]
async fn toggle_twice_restores_visibility_without_network() {
    let (session, api) = mount(ScriptedApi::new());
    let mut rx = session.events().subscribe();

    assert!(!session.toggle_visibility());
    assert!(!session.is_open());
    assert!(session.toggle_visibility());
    assert!(session.is_open());

    assert!(matches!(
        rx.recv().await.unwrap(),
        Event::VisibilityChanged { open: false }
    ));
    assert!(matches!(
        rx.recv().await.unwrap(),
        Event::VisibilityChanged { open: true }
    ));
    assert_eq!(api.create_count(), 0);
    assert_eq!(api.send_count(), 0);
    assert_eq!(session.message_count().await, 1);
}

#[tokio::test]
async fn sends_work_while_closed() {
    let (session, _api) = mount(ScriptedApi::new().create_ok("c1").send_ok("ok"));
    session.toggle_visibility();

    assert_eq!(
        session.send_message("Hi").await,
        SendOutcome::Replied("ok".into())
    );
    assert!(!session.is_open());
}
