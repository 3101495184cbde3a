//! Integration tests for capacity-safe join admission.

use std::collections::HashSet;

use joinin::core::error::ErrorKind;
use joinin::core::types::id::{SessionId, UserId};
use joinin::engine::JoinOutcome;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_two_racers_for_one_slot_admit_exactly_one() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    // capacity = 2: host plus one open slot.
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 1))
        .expect("create");

    let alice = helpers::test_user("alice");
    let bob = helpers::test_user("bob");
    let (a, b) = tokio::join!(
        app.engine.join(session.id, &alice),
        app.engine.join(session.id, &bob),
    );
    let outcomes = [a.expect("alice join"), b.expect("bob join")];

    let admitted = outcomes
        .iter()
        .filter(|o| **o == JoinOutcome::Admitted)
        .count();
    let full = outcomes.iter().filter(|o| **o == JoinOutcome::Full).count();
    assert_eq!(admitted, 1);
    assert_eq!(full, 1);

    // The roster converges to {host, admitted user}.
    let winner = if outcomes[0] == JoinOutcome::Admitted {
        alice.id
    } else {
        bob.id
    };
    let mut roster = app.engine.subscribe_roster(session.id).expect("subscribe");
    let mut uids: HashSet<UserId> = HashSet::new();
    while let Some(snapshot) = roster.next().await {
        uids = snapshot.iter().map(|p| p.uid).collect();
        if uids.len() == 2 {
            break;
        }
    }
    assert_eq!(uids, HashSet::from([host.id, winner]));
}

#[tokio::test]
async fn test_capacity_never_exceeded_under_contention() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 3))
        .expect("create");

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..12 {
        let engine = app.engine.clone();
        let user = helpers::test_user(&format!("user-{i}"));
        let id = session.id;
        tasks.spawn(async move { engine.join(id, &user).await });
    }

    let mut admitted = 0;
    while let Some(result) = tasks.join_next().await {
        if result.expect("task").expect("join") == JoinOutcome::Admitted {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 3);
    let final_state = app.store.get(session.id).expect("get");
    assert!(final_state.participant_ids.len() as u32 <= final_state.capacity);
    assert_eq!(
        final_state.participant_ids.len() as u32,
        final_state.capacity
    );
}

#[tokio::test]
async fn test_rejoin_is_idempotent_and_keeps_one_roster_record() {
    let app = TestApp::new();
    let host = helpers::test_user("host");
    let session = app
        .engine
        .create_session(helpers::create_request(&host, 2))
        .expect("create");
    let user = helpers::test_user("repeat");

    assert_eq!(
        app.engine.join(session.id, &user).await.expect("join"),
        JoinOutcome::Admitted
    );
    for _ in 0..3 {
        assert_eq!(
            app.engine.join(session.id, &user).await.expect("rejoin"),
            JoinOutcome::AlreadyMember
        );
    }

    let roster = app.store.participants(session.id).expect("roster");
    assert_eq!(roster.iter().filter(|p| p.uid == user.id).count(), 1);
}

#[tokio::test]
async fn test_join_unknown_session_is_not_found() {
    let app = TestApp::new();
    let user = helpers::test_user("lost");
    let err = app
        .engine
        .join(SessionId::new(), &user)
        .await
        .expect_err("missing session");
    assert_eq!(err.kind, ErrorKind::NotFound);
}
