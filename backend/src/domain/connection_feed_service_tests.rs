//! Tests for the connection feed service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockConnectionRequestRepository, MockUserProfileRepository};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

type Service = ConnectionFeedService<MockConnectionRequestRepository, MockUserProfileRepository>;

fn make_service(
    requests: MockConnectionRequestRepository,
    users: MockUserProfileRepository,
) -> Service {
    ConnectionFeedService::new(Arc::new(requests), Arc::new(users))
}

fn profile(id: &UserId, name: &str) -> UserProfile {
    UserProfile::new(id.clone(), name).expect("valid profile")
}

struct Cast {
    alice: UserId,
    bob: UserId,
    carol: UserId,
    dave: UserId,
}

#[fixture]
fn cast() -> Cast {
    Cast {
        alice: UserId::random(),
        bob: UserId::random(),
        carol: UserId::random(),
        dave: UserId::random(),
    }
}

#[rstest]
#[tokio::test]
async fn received_requests_join_requester_profiles(cast: Cast) {
    let Cast {
        alice, bob, carol, ..
    } = cast;
    let from_alice =
        ConnectionRequest::new(alice.clone(), bob.clone(), ConnectionStatus::Interested);
    let from_carol =
        ConnectionRequest::new(carol.clone(), bob.clone(), ConnectionStatus::Interested);

    let mut requests = MockConnectionRequestRepository::new();
    let stored = vec![from_alice.clone(), from_carol.clone()];
    requests
        .expect_find_received()
        .with(eq(bob.clone()), eq(ConnectionStatus::Interested))
        .times(1)
        .return_once(move |_, _| Ok(stored));

    let mut users = MockUserProfileRepository::new();
    let (alice_profile, carol_profile) = (profile(&alice, "Alice"), profile(&carol, "Carol"));
    let expected_ids = vec![alice.clone(), carol.clone()];
    users
        .expect_find_profiles()
        .withf(move |ids| ids == expected_ids.as_slice())
        .times(1)
        .return_once(move |_| Ok(vec![carol_profile, alice_profile]));

    let received = make_service(requests, users)
        .received_requests(&bob)
        .await
        .expect("requests load");

    assert_eq!(received.len(), 2);
    assert_eq!(received[0].id, from_alice.id);
    let names: Vec<_> = received
        .iter()
        .map(|r| r.from_user_id.as_ref().map(|p| p.first_name.as_str()))
        .collect();
    assert_eq!(names, vec![Some("Alice"), Some("Carol")]);
}

#[rstest]
#[tokio::test]
async fn received_requests_keep_missing_requesters_as_null(cast: Cast) {
    let Cast { alice, bob, .. } = cast;
    let orphan = ConnectionRequest::new(alice, bob.clone(), ConnectionStatus::Interested);
    let orphan_id = orphan.id;

    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_received()
        .return_once(move |_, _| Ok(vec![orphan]));
    let mut users = MockUserProfileRepository::new();
    users.expect_find_profiles().return_once(|_| Ok(Vec::new()));

    let received = make_service(requests, users)
        .received_requests(&bob)
        .await
        .expect("requests load");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].id, orphan_id);
    assert!(received[0].from_user_id.is_none());
    assert_eq!(received[0].to_user_id, bob);
}

#[rstest]
#[tokio::test]
async fn received_requests_are_empty_without_profile_lookup(cast: Cast) {
    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_received()
        .return_once(|_, _| Ok(Vec::new()));
    let mut users = MockUserProfileRepository::new();
    users.expect_find_profiles().never();

    let received = make_service(requests, users)
        .received_requests(&cast.alice)
        .await
        .expect("requests load");
    assert!(received.is_empty());
}

#[rstest]
#[tokio::test]
async fn connections_project_the_other_party(cast: Cast) {
    let Cast {
        alice, bob, carol, ..
    } = cast;
    let outgoing = ConnectionRequest::new(alice.clone(), bob.clone(), ConnectionStatus::Accepted);
    let incoming = ConnectionRequest::new(carol.clone(), alice.clone(), ConnectionStatus::Accepted);

    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_involving()
        .with(eq(alice.clone()), eq(Some(ConnectionStatus::Accepted)))
        .times(1)
        .return_once(move |_, _| Ok(vec![outgoing, incoming]));

    let mut users = MockUserProfileRepository::new();
    let (bob_profile, carol_profile) = (profile(&bob, "Bob"), profile(&carol, "Carol"));
    users
        .expect_find_profiles()
        .return_once(move |_| Ok(vec![carol_profile, bob_profile]));

    let connections = make_service(requests, users)
        .connections(&alice)
        .await
        .expect("connections load");

    let names: Vec<&str> = connections.iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(names, ["Bob", "Carol"]);
}

#[rstest]
#[tokio::test]
async fn explore_excludes_related_users_and_badges_connected_ones(cast: Cast) {
    let Cast {
        alice,
        bob,
        carol,
        dave,
    } = cast;
    let pending = ConnectionRequest::new(alice.clone(), bob.clone(), ConnectionStatus::Interested);
    let elsewhere = ConnectionRequest::new(carol.clone(), bob.clone(), ConnectionStatus::Accepted);

    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_involving()
        .with(eq(alice.clone()), eq(None))
        .return_once(move |_, _| Ok(vec![pending]));
    requests
        .expect_find_by_status()
        .with(eq(ConnectionStatus::Accepted))
        .return_once(move |_| Ok(vec![elsewhere]));

    let mut users = MockUserProfileRepository::new();
    let (excluded_alice, excluded_bob) = (alice.clone(), bob.clone());
    let (carol_profile, dave_profile) = (profile(&carol, "Carol"), profile(&dave, "Dave"));
    users
        .expect_find_excluding()
        .withf(move |excluded, window| {
            excluded.len() == 2
                && excluded.contains(&excluded_alice)
                && excluded.contains(&excluded_bob)
                && window.is_none()
        })
        .return_once(move |_, _| Ok(vec![carol_profile, dave_profile]));

    let entries = make_service(requests, users)
        .explore(&alice)
        .await
        .expect("explore loads");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].profile.id, carol);
    assert_eq!(entries[0].status, ConnectionBadge::Connected);
    assert_eq!(entries[1].profile.id, dave);
    assert_eq!(entries[1].status, ConnectionBadge::NotConnected);
}

#[rstest]
#[tokio::test]
async fn feed_excludes_globally_connected_users(cast: Cast) {
    let Cast {
        alice,
        bob,
        carol,
        dave,
    } = cast;
    let elsewhere = ConnectionRequest::new(bob.clone(), carol.clone(), ConnectionStatus::Accepted);

    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_involving()
        .return_once(|_, _| Ok(Vec::new()));
    requests
        .expect_find_by_status()
        .return_once(move |_| Ok(vec![elsewhere]));

    let mut users = MockUserProfileRepository::new();
    let expected = [alice.clone(), bob.clone(), carol.clone()];
    let dave_profile = profile(&dave, "Dave");
    users
        .expect_find_excluding()
        .withf(move |excluded, window| {
            excluded.len() == 3 && expected.iter().all(|id| excluded.contains(id)) && window.is_none()
        })
        .return_once(move |_, _| Ok(vec![dave_profile]));

    let feed = make_service(requests, users)
        .feed(&alice, PageRequest::new(Some(2), Some(1000)))
        .await
        .expect("feed loads");

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].id, dave);
}

#[rstest]
#[tokio::test]
async fn feed_pushes_clamped_window_when_applied(cast: Cast) {
    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_involving()
        .return_once(|_, _| Ok(Vec::new()));
    requests
        .expect_find_by_status()
        .return_once(|_| Ok(Vec::new()));

    let mut users = MockUserProfileRepository::new();
    users
        .expect_find_excluding()
        .withf(|_, window| {
            window.is_some_and(|w| w.skip() == 50 && w.limit() == pagination::MAX_LIMIT)
        })
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let service = make_service(requests, users).with_pagination(FeedPagination::Apply);
    let feed = service
        .feed(&cast.alice, PageRequest::new(Some(2), Some(1000)))
        .await
        .expect("feed loads");
    assert!(feed.is_empty());
}

#[rstest]
#[case(
    ConnectionRequestRepositoryError::query("relation missing"),
    "relation missing"
)]
#[case(
    ConnectionRequestRepositoryError::connection("pool exhausted"),
    "pool exhausted"
)]
#[tokio::test]
async fn store_failures_surface_as_invalid_requests(
    cast: Cast,
    #[case] failure: ConnectionRequestRepositoryError,
    #[case] message: &str,
) {
    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_involving()
        .return_once(move |_, _| Err(failure));
    requests
        .expect_find_by_status()
        .returning(|_| Ok(Vec::new()));
    let mut users = MockUserProfileRepository::new();
    users.expect_find_excluding().never();

    let error = make_service(requests, users)
        .feed(&cast.alice, PageRequest::default())
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), message);
}

#[rstest]
#[tokio::test]
async fn profile_failures_surface_as_invalid_requests(cast: Cast) {
    let mut requests = MockConnectionRequestRepository::new();
    requests
        .expect_find_involving()
        .return_once(|_, _| Ok(Vec::new()));
    requests
        .expect_find_by_status()
        .return_once(|_| Ok(Vec::new()));
    let mut users = MockUserProfileRepository::new();
    users
        .expect_find_excluding()
        .return_once(|_, _| Err(UserProfileRepositoryError::query("users table missing")));

    let error = make_service(requests, users)
        .explore(&cast.alice)
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "users table missing");
}

#[rstest]
#[case(false, FeedPagination::Ignore)]
#[case(true, FeedPagination::Apply)]
fn feed_pagination_follows_flag(#[case] apply: bool, #[case] expected: FeedPagination) {
    assert_eq!(FeedPagination::from(apply), expected);
}
