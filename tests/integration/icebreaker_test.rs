//! Integration tests for icebreaker injection.

use joinin::engine::JoinOutcome;

use crate::helpers::{self, GeneratorScript, TestApp};

#[tokio::test]
async fn test_generated_icebreaker_lands_in_chat() {
    let app = TestApp::with_script(GeneratorScript::Reply(
        "✨ ask what bug everyone is hunting!".to_string(),
    ));
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");

    let joiner = helpers::test_user("joiner");
    assert_eq!(
        app.engine.join(session.id, &joiner).await.expect("join"),
        JoinOutcome::Admitted
    );

    let history = app.engine.chat().history(session.id).expect("history");
    assert_eq!(history.len(), 1);
    assert!(history[0].sender.is_system());
    assert_eq!(history[0].text, "✨ ask what bug everyone is hunting!");
    assert_eq!(app.generator.call_count(), 1);
}

#[tokio::test]
async fn test_generator_timeout_yields_exactly_one_fallback() {
    let app = TestApp::with_script(GeneratorScript::Hang);
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");

    let joiner = helpers::test_user("joiner");
    // The join still reports Admitted even though the generator hangs.
    assert_eq!(
        app.engine.join(session.id, &joiner).await.expect("join"),
        JoinOutcome::Admitted
    );

    let history = app.engine.chat().history(session.id).expect("history");
    assert_eq!(history.len(), 1);
    assert!(history[0].sender.is_system());
    // The fallback references the literal activity text.
    assert!(history[0].text.contains("Debugging Python code"));
}

#[tokio::test]
async fn test_generator_failure_is_absorbed() {
    let app = TestApp::with_script(GeneratorScript::Fail);
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");

    let joiner = helpers::test_user("joiner");
    assert_eq!(
        app.engine.join(session.id, &joiner).await.expect("join"),
        JoinOutcome::Admitted
    );

    let history = app.engine.chat().history(session.id).expect("history");
    assert_eq!(history.len(), 1);
    assert!(history[0].text.contains("Debugging Python code"));
}

#[tokio::test]
async fn test_already_member_does_not_retrigger_injection() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");

    let joiner = helpers::test_user("joiner");
    app.engine.join(session.id, &joiner).await.expect("join");
    app.engine.join(session.id, &joiner).await.expect("rejoin");
    app.engine.join(session.id, &joiner).await.expect("rejoin");

    assert_eq!(app.generator.call_count(), 1);
    assert_eq!(app.engine.chat().history(session.id).expect("history").len(), 1);
}

#[tokio::test]
async fn test_full_outcome_does_not_trigger_injection() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 1))
        .expect("create");

    app.engine
        .join(session.id, &helpers::test_user("first"))
        .await
        .expect("first join");
    assert_eq!(
        app.engine
            .join(session.id, &helpers::test_user("second"))
            .await
            .expect("second join"),
        JoinOutcome::Full
    );

    // One injection for the single admission, none for the rejection.
    assert_eq!(app.generator.call_count(), 1);
}
