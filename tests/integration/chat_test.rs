//! Integration tests for ordered chat delivery.

use joinin::engine::JoinOutcome;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_all_subscribers_observe_the_same_order() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 3))
        .expect("create");

    let mut sub_a = app.engine.subscribe_chat(session.id).expect("sub a");
    let mut sub_b = app.engine.subscribe_chat(session.id).expect("sub b");

    for i in 0..6 {
        app.engine
            .send_message(session.id, &host, &format!("message {i}"))
            .expect("send");
    }

    // Drain each subscriber until it has seen the full history.
    let mut seen_a = Vec::new();
    while seen_a.len() < 6 {
        seen_a = sub_a.next().await.expect("a snapshot").to_vec();
    }
    let mut seen_b = Vec::new();
    while seen_b.len() < 6 {
        seen_b = sub_b.next().await.expect("b snapshot").to_vec();
    }

    let ids_a: Vec<_> = seen_a.iter().map(|m| m.id).collect();
    let ids_b: Vec<_> = seen_b.iter().map(|m| m.id).collect();
    assert_eq!(ids_a, ids_b);

    for pair in seen_a.windows(2) {
        assert!(pair[0].ordering_key() < pair[1].ordering_key());
    }
}

#[tokio::test]
async fn test_system_messages_are_ordered_like_user_messages() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");

    app.engine
        .send_message(session.id, &host, "before")
        .expect("send");

    // Joining triggers the system icebreaker between the two user sends.
    let joiner = helpers::test_user("joiner");
    assert_eq!(
        app.engine.join(session.id, &joiner).await.expect("join"),
        JoinOutcome::Admitted
    );

    app.engine
        .send_message(session.id, &joiner, "after")
        .expect("send");

    let history = app.engine.chat().history(session.id).expect("history");
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].text, "before");
    assert!(history[1].sender.is_system());
    assert_eq!(history[2].text, "after");
}

#[tokio::test]
async fn test_dropped_subscription_is_a_clean_unsubscribe() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");

    let sub = app.engine.subscribe_chat(session.id).expect("subscribe");
    drop(sub);

    // Appending after the drop must not fail or panic.
    app.engine
        .send_message(session.id, &host, "still fine")
        .expect("send");
    assert_eq!(app.engine.chat().history(session.id).expect("history").len(), 1);
}
