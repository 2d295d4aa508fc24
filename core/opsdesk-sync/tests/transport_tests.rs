mod common;

use async_trait::async_trait;
use common::{mock_with, ms, user, users};
use opsdesk_model::RawEntity;
use opsdesk_sync::transport::mock::{MockCall, MockTransport};
use opsdesk_sync::{
    CommitRequest, CommitResponse, ConsoleError, ConsoleResult, ConsoleTransport, PreviewResult,
};
use opsdesk_types::{FieldFamily, OperationKind, ResourceKind, RowId};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::time::Instant;

/// A backend with no single-record endpoint.
struct ListingOnly(Vec<RawEntity>);

#[async_trait]
impl ConsoleTransport for ListingOnly {
    async fn fetch_all(&self, _resource: ResourceKind) -> ConsoleResult<Vec<RawEntity>> {
        Ok(self.0.clone())
    }

    async fn compute_preview(
        &self,
        _family: FieldFamily,
        _subject: &RowId,
        _adjustment: &str,
    ) -> ConsoleResult<Option<PreviewResult>> {
        Ok(None)
    }

    async fn commit(&self, _request: CommitRequest) -> ConsoleResult<CommitResponse> {
        Ok(CommitResponse::default())
    }
}

// ── Default fetch_one ────────────────────────────────────────────

#[tokio::test]
async fn fetch_one_falls_back_to_the_listing() {
    let transport = ListingOnly(users(3));

    let found = transport
        .fetch_one(ResourceKind::Users, &RowId::from(2))
        .await
        .unwrap();
    assert_eq!(found, Some(user(2, "user02", 20.0)));

    let missing = transport
        .fetch_one(ResourceKind::Users, &RowId::from(9))
        .await
        .unwrap();
    assert_eq!(missing, None);
}

// ── MockTransport ────────────────────────────────────────────────

#[tokio::test]
async fn mock_records_calls_in_order() {
    let mock = mock_with(users(2));

    mock.fetch_all(ResourceKind::Users).await.unwrap();
    mock.compute_preview(FieldFamily::Profit, &RowId::from(1), "7")
        .await
        .unwrap();
    let request = CommitRequest::for_subject(OperationKind::ToggleActive, RowId::from(1));
    mock.commit(request.clone()).await.unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            MockCall::FetchAll(ResourceKind::Users),
            MockCall::Preview {
                family: FieldFamily::Profit,
                subject: RowId::from(1),
                adjustment: "7".into(),
            },
            MockCall::Commit(request),
        ]
    );
    assert_eq!(mock.fetch_count(ResourceKind::Users), 1);
    assert_eq!(mock.fetch_count(ResourceKind::Packages), 0);
    assert_eq!(mock.commit_count(), 1);
}

#[tokio::test]
async fn unscripted_preview_echoes_the_adjustment() {
    let mock = MockTransport::new();
    let preview = mock
        .compute_preview(FieldFamily::Balance, &RowId::from(1), "12.5")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(preview, PreviewResult::new(FieldFamily::Balance, 0.0, 12.5, 12.5));
}

#[tokio::test]
async fn unset_listing_is_empty() {
    let mock = MockTransport::new();
    assert!(mock.fetch_all(ResourceKind::Packages).await.unwrap().is_empty());
}

#[tokio::test]
async fn failing_fetches_fail_both_ways() {
    let mock = mock_with(users(2));
    mock.fail_fetches(true);

    assert!(matches!(
        mock.fetch_all(ResourceKind::Users).await,
        Err(ConsoleError::Network(_))
    ));
    assert!(matches!(
        mock.fetch_one(ResourceKind::Users, &RowId::from(1)).await,
        Err(ConsoleError::Network(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn scripted_replies_are_served_in_order_after_their_delay() {
    let mock = MockTransport::new();
    mock.push_preview(None, ms(300));
    mock.push_preview_failure(503, Duration::ZERO);

    let start = Instant::now();
    let first = mock
        .compute_preview(FieldFamily::Salary, &RowId::from(1), "1")
        .await
        .unwrap();
    assert_eq!(first, None);
    assert!(start.elapsed() >= ms(300));

    let second = mock
        .compute_preview(FieldFamily::Salary, &RowId::from(1), "2")
        .await;
    assert!(matches!(
        second,
        Err(ConsoleError::Backend { status: 503, .. })
    ));
    assert_eq!(mock.preview_inputs(FieldFamily::Salary), vec!["1", "2"]);
}

#[tokio::test]
async fn scripted_commit_failures() {
    let mock = MockTransport::new();
    mock.push_commit_failure(403, Some("Wrong admin password"));
    mock.push_commit_unreachable();

    let request = CommitRequest::new(OperationKind::AddPackage);
    let rejected = mock.commit(request.clone()).await.unwrap_err();
    let unreachable = mock.commit(request.clone()).await.unwrap_err();
    let fallback = mock.commit(request).await.unwrap();

    assert_eq!(rejected.user_message(), "Wrong admin password");
    assert!(matches!(unreachable, ConsoleError::Network(_)));
    assert_eq!(fallback, CommitResponse::default());
}
