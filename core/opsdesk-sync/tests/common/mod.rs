//! Shared fixtures for session tests.

#![allow(dead_code)]

use opsdesk_model::{RawEntity, UserProjector};
use opsdesk_sync::transport::mock::MockTransport;
use opsdesk_sync::{ConsoleConfig, ConsoleSession};
use opsdesk_types::ResourceKind;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// The default quiet period.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Routes `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn user(id: i64, username: &str, balance: f64) -> RawEntity {
    RawEntity::new(
        ResourceKind::Users,
        json!({
            "id": id,
            "username": username,
            "gender": "f",
            "phone_number": format!("+1555{id:04}"),
            "wallet": {"balance": balance},
            "total_play": 3,
            "total_available_play": 40,
        }),
    )
}

/// `n` users with ids `1..=n` and balances `10, 20, ...`.
pub fn users(n: i64) -> Vec<RawEntity> {
    (1..=n)
        .map(|i| user(i, &format!("user{i:02}"), (i * 10) as f64))
        .collect()
}

pub fn mock_with(listing: Vec<RawEntity>) -> Arc<MockTransport> {
    let mock = Arc::new(MockTransport::new());
    mock.set_listing(ResourceKind::Users, listing);
    mock
}

pub fn session(mock: &Arc<MockTransport>) -> ConsoleSession {
    ConsoleSession::new(
        Arc::clone(mock) as Arc<dyn opsdesk_sync::ConsoleTransport>,
        Arc::new(UserProjector),
        ConsoleConfig::default(),
    )
    .unwrap()
}

/// A users session, mounted.
pub async fn mounted(mock: &Arc<MockTransport>) -> ConsoleSession {
    init_tracing();
    let session = session(mock);
    session.mount().await.unwrap();
    session
}
