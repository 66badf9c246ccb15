//! Assistant bridge and chat session behavior against substitute services

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use cosmoslearn::assistant::{
    AssistantError, CompletionRequest, CompletionService, ServiceError, EMPTY_RESULT_REPLY,
    SERVICE_ERROR_REPLY, UNCONFIGURED_REPLY,
};
use cosmoslearn::chat::{ChatSession, Role};
use cosmoslearn::{AssistantBridge, AssistantConfig, SOLAR_SYSTEM};
use rstest::rstest;

/// How the fake service answers
#[derive(Debug, Clone)]
enum Behavior {
    Text(&'static str),
    NoText,
    Fail,
    Echo,
}

struct FakeService {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeService {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionService for FakeService {
    fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Text(text) => Ok(Some(text.to_string())),
            Behavior::NoText => Ok(None),
            Behavior::Fail => Err(ServiceError::Other("connection reset".to_string())),
            Behavior::Echo => Ok(Some(format!("echo: {}", request.prompt))),
        }
    }
}

fn bridge_with(service: &Arc<FakeService>) -> AssistantBridge {
    AssistantBridge::new(Some(service.clone()))
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t")]
fn blank_prompts_never_reach_the_service(#[case] prompt: &str) {
    let service = FakeService::new(Behavior::Text("unused"));
    let bridge = bridge_with(&service);

    let reply = bridge.ask(prompt);
    assert!(!reply.is_empty());
    assert!(matches!(bridge.try_ask(prompt), Err(AssistantError::EmptyPrompt)));
    assert_eq!(service.calls(), 0);
}

#[rstest]
#[case("Why is Mars red?")]
#[case("x")]
fn unconfigured_bridge_returns_notice(#[case] prompt: &str) {
    let bridge = AssistantBridge::unconfigured();
    assert_eq!(bridge.ask(prompt), UNCONFIGURED_REPLY);
}

#[test]
fn unconfigured_from_empty_environment() {
    let config = AssistantConfig::from_lookup(|_| None);
    let bridge = AssistantBridge::from_config(&config).unwrap();
    assert_eq!(bridge.ask("What is a planet?"), UNCONFIGURED_REPLY);
}

#[test]
fn service_failure_becomes_disturbance_message() {
    let service = FakeService::new(Behavior::Fail);
    let bridge = bridge_with(&service);

    assert_eq!(bridge.ask("Tell me about Venus"), SERVICE_ERROR_REPLY);
    assert_eq!(service.calls(), 1);
}

#[test]
fn success_is_returned_verbatim() {
    let service = FakeService::new(Behavior::Text("Mars is red."));
    assert_eq!(bridge_with(&service).ask("Why is Mars red?"), "Mars is red.");

    let padded = FakeService::new(Behavior::Text("  Mars is red. 🔴\n"));
    assert_eq!(bridge_with(&padded).ask("Why?"), "  Mars is red. 🔴\n");
}

#[rstest]
#[case(Behavior::NoText)]
#[case(Behavior::Text(""))]
fn empty_result_uses_fallback(#[case] behavior: Behavior) {
    let service = FakeService::new(behavior);
    assert_eq!(bridge_with(&service).ask("Hello?"), EMPTY_RESULT_REPLY);
    assert_eq!(service.calls(), 1);
}

#[test]
fn fallback_messages_are_distinct() {
    assert_ne!(UNCONFIGURED_REPLY, EMPTY_RESULT_REPLY);
    assert_ne!(UNCONFIGURED_REPLY, SERVICE_ERROR_REPLY);
    assert_ne!(EMPTY_RESULT_REPLY, SERVICE_ERROR_REPLY);
}

#[test]
fn no_retry_after_failure() {
    let service = FakeService::new(Behavior::Fail);
    let bridge = bridge_with(&service);
    bridge.ask("one");
    bridge.ask("two");
    assert_eq!(service.calls(), 2);
}

#[test]
fn bridge_serves_concurrent_callers() {
    let service = FakeService::new(Behavior::Echo);
    let bridge = Arc::new(bridge_with(&service));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || bridge.ask(&format!("question {}", i)))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("echo: question {}", i));
    }
    assert_eq!(service.calls(), 8);
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(25)]
fn chat_pairs_stay_in_order(#[case] pairs: usize) {
    let service = FakeService::new(Behavior::Echo);
    let bridge = bridge_with(&service);
    let mut session = ChatSession::empty();

    for i in 0..pairs {
        session.submit(&bridge, &format!("q{}", i)).unwrap();
    }

    let messages = session.messages();
    assert_eq!(messages.len(), 2 * pairs);
    for (i, pair) in messages.chunks(2).enumerate() {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[0].text, format!("q{}", i));
        assert_eq!(pair[1].role, Role::Model);
        assert_eq!(pair[1].text, format!("echo: q{}", i));
    }
    assert!(messages.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn blank_chat_input_is_not_sent() {
    let service = FakeService::new(Behavior::Echo);
    let bridge = bridge_with(&service);
    let mut session = ChatSession::new();

    assert!(session.submit(&bridge, "   ").is_err());
    assert_eq!(session.len(), 1);
    assert_eq!(service.calls(), 0);
}

#[test]
fn selected_body_feeds_the_chat() {
    let service = FakeService::new(Behavior::Echo);
    let bridge = bridge_with(&service);
    let mut session = ChatSession::empty();

    let venus = SOLAR_SYSTEM.get("Venus").unwrap();
    let reply = session.ask_about(&bridge, venus).unwrap();
    assert_eq!(reply.text, "echo: Tell me about Venus.");
}
