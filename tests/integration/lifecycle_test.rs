//! Integration tests for session lifecycle: discovery, expiry, and
//! host-only cascading close.

use chrono::Duration;

use joinin::core::error::ErrorKind;
use joinin::entity::session::Category;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_non_host_close_is_forbidden_and_changes_nothing() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");
    app.engine
        .send_message(session.id, &host, "hello")
        .expect("send");

    let outsider = helpers::test_user("outsider");
    let err = app
        .engine
        .close_session(session.id, outsider.id)
        .expect_err("forbidden");
    assert_eq!(err.kind, ErrorKind::Forbidden);

    // Record, roster, and chat are untouched.
    assert!(app.engine.get_session(session.id).is_ok());
    assert_eq!(app.store.participants(session.id).expect("roster").len(), 1);
    assert_eq!(app.store.messages(session.id).expect("chat").len(), 1);
}

#[tokio::test]
async fn test_host_close_cascades_and_ends_feeds() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");
    app.engine
        .join(session.id, &helpers::test_user("joiner"))
        .await
        .expect("join");

    let mut roster = app.engine.subscribe_roster(session.id).expect("roster sub");
    let mut chat = app.engine.subscribe_chat(session.id).expect("chat sub");

    app.engine
        .close_session(session.id, host.id)
        .expect("host close");

    assert_eq!(
        app.engine.get_session(session.id).expect_err("gone").kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        app.store.participants(session.id).expect_err("gone").kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        app.store.messages(session.id).expect_err("gone").kind,
        ErrorKind::NotFound
    );

    // Both feeds deliver a final empty snapshot and then end.
    let mut last_roster = None;
    while let Some(snapshot) = roster.next().await {
        last_roster = Some(snapshot);
    }
    assert!(last_roster.expect("final roster snapshot").is_empty());

    let mut last_chat = None;
    while let Some(snapshot) = chat.next().await {
        last_chat = Some(snapshot);
    }
    assert!(last_chat.expect("final chat snapshot").is_empty());
}

#[tokio::test]
async fn test_expired_session_leaves_listing_but_keeps_history() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let mut short = helpers::create_request(&host, 2);
    short.duration = Duration::milliseconds(1);
    let session = app.engine.create_session(short).expect("create");
    app.engine
        .send_message(session.id, &host, "see you there")
        .expect("send");
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    assert!(app.engine.list_active(None).is_empty());
    // Expiry hides the session from discovery only.
    assert!(app.engine.get_session(session.id).is_ok());
    assert_eq!(app.engine.chat().history(session.id).expect("chat").len(), 1);
}

#[tokio::test]
async fn test_active_listing_subscription_follows_create_and_close() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let mut listing = app.engine.subscribe_active(Some(Category::Coding));

    assert!(listing.next().await.expect("initial").is_empty());

    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");
    let after_create = listing.next().await.expect("after create");
    assert_eq!(after_create.len(), 1);
    assert_eq!(after_create[0].id, session.id);

    app.engine
        .close_session(session.id, host.id)
        .expect("close");
    assert!(listing.next().await.expect("after close").is_empty());
}

#[tokio::test]
async fn test_close_is_not_reissuable_once_gone() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");

    app.engine
        .close_session(session.id, host.id)
        .expect("first close");
    let err = app
        .engine
        .close_session(session.id, host.id)
        .expect_err("second close");
    assert_eq!(err.kind, ErrorKind::NotFound);
}
