use std::time::Duration;

use tokio::time::sleep;
use truco_backend::domain::Mode;
use truco_backend::ErrorCode;

use crate::support::{registry, started, TestClient, DEFAULT_GRACE, NAMES};

async fn advance(secs: u64) {
    sleep(Duration::from_secs(secs)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn match_with_nobody_connected_is_removed_after_grace() {
    let registry = registry(DEFAULT_GRACE);
    let (id, clients) = started(&registry, Mode::OneVsOne);
    for client in &clients {
        registry.disconnect(client.conn).unwrap();
    }

    advance(59).await;
    assert!(registry.snapshot(&id).is_ok());

    advance(2).await;
    let err = registry.snapshot(&id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MatchNotFound);
    assert_eq!(registry.match_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn reconnect_within_grace_keeps_the_match() {
    let registry = registry(DEFAULT_GRACE);
    let (id, clients) = started(&registry, Mode::OneVsOne);
    for client in &clients {
        registry.disconnect(client.conn).unwrap();
    }

    advance(59).await;
    let back = TestClient::connect(registry.hub());
    registry.reconnect(back.conn, &id, NAMES[0], None).unwrap();

    advance(120).await;
    let (_, snap) = registry.snapshot(&id).unwrap();
    assert!(snap.seats[0].connected);
    assert!(!snap.seats[1].connected);
}

#[tokio::test(start_paused = true)]
async fn match_nobody_joins_expires() {
    let registry = registry(DEFAULT_GRACE);
    let creator = TestClient::connect(registry.hub());
    let id = registry.create_match(creator.conn, Mode::TwoVsTwo).unwrap();

    advance(30).await;
    assert_eq!(registry.list_matches().len(), 1);

    advance(31).await;
    assert!(registry.list_matches().is_empty());
    let err = registry.join(creator.conn, &id, "Ana").unwrap_err();
    assert_eq!(err.code(), ErrorCode::MatchNotFound);
}

#[tokio::test(start_paused = true)]
async fn every_abandonment_gets_a_fresh_grace() {
    let registry = registry(DEFAULT_GRACE);
    let (id, clients) = started(&registry, Mode::OneVsOne);
    for client in &clients {
        registry.disconnect(client.conn).unwrap();
    }

    advance(10).await;
    let back = TestClient::connect(registry.hub());
    registry.reconnect(back.conn, &id, NAMES[1], None).unwrap();

    advance(20).await;
    registry.disconnect(back.conn).unwrap();

    // The first timer would have fired at 60s; the second is due at 90s.
    advance(31).await;
    assert!(registry.snapshot(&id).is_ok());

    advance(30).await;
    assert_eq!(
        registry.snapshot(&id).unwrap_err().code(),
        ErrorCode::MatchNotFound
    );
}

#[tokio::test(start_paused = true)]
async fn partial_disconnect_never_arms_removal() {
    let registry = registry(Duration::from_secs(5));
    let (id, clients) = started(&registry, Mode::TwoVsTwo);
    for client in &clients[1..] {
        registry.disconnect(client.conn).unwrap();
    }

    advance(60).await;
    let (_, snap) = registry.snapshot(&id).unwrap();
    assert_eq!(snap.seats.iter().filter(|s| s.connected).count(), 1);
}
